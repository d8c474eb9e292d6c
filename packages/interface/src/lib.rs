pub mod forwarding;
