pub mod account;
pub mod address;
pub mod contract;
mod error;
pub mod genesis;
pub mod hooks;
pub mod keepers;
pub mod memo;
pub mod msg;
pub mod query;
pub mod queue;
pub mod registry;
pub mod state;
pub mod sweep;
pub mod validation;

pub use crate::error::ContractError;




#[cfg(test)]
mod testing_sweep;
