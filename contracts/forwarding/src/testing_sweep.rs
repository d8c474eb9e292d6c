use cosmwasm_std::testing::mock_env;
use cosmwasm_std::{Coin, StdResult, Uint128};
use ibc_proto::cosmos::base::v1beta1::Coin as ProtoCoin;
use ibc_proto::ibc::core::channel::v1::State;
use ibc_proto::ibc::core::client::v1::Height;

use crate::contract::{instantiate, sudo};
use crate::msg::SudoMsg;
use crate::state::CONFIG;
use crate::testing::{
    end_block, event_attribute, find_event, fund_account, get_default_instantiate_msg,
    get_message_info, is_pending, query_stats_by_channel, register_forwarding_account, setup,
    DENOM, OTHER_DENOM, RECIPIENT,
};
use crate::testing_mocks::{mock_dependencies, OPEN_CHANNEL, OTHER_OPEN_CHANNEL};
use crate::ContractError;

#[test]
fn sweep_forwards_balance_test() {
    let mut deps = setup();
    let address = register_forwarding_account(&mut deps, OPEN_CHANNEL, RECIPIENT, None).unwrap();

    fund_account(&mut deps, &address, 100, DENOM);
    assert!(is_pending(&deps, &address));

    let res = end_block(&mut deps);

    assert_eq!(deps.transfer.requests.len(), 1);
    let request = &deps.transfer.requests[0];
    assert_eq!(request.source_port, "transfer");
    assert_eq!(request.source_channel, OPEN_CHANNEL);
    assert_eq!(
        request.token,
        Some(ProtoCoin {
            denom: DENOM.to_string(),
            amount: "100".to_string(),
        })
    );
    assert_eq!(request.sender, address.to_string());
    assert_eq!(request.receiver, RECIPIENT);
    assert_eq!(
        request.timeout_height,
        Some(Height {
            revision_number: 0,
            revision_height: 0,
        })
    );
    assert_eq!(
        request.timeout_timestamp,
        mock_env().block.time.plus_seconds(600).nanos()
    );
    assert_eq!(request.memo, "");

    let event = find_event(&res, "forward_executed").unwrap();
    assert_eq!(event_attribute(event, "address"), address.to_string());
    assert_eq!(event_attribute(event, "channel"), OPEN_CHANNEL);
    assert_eq!(event_attribute(event, "denom"), DENOM);
    assert_eq!(event_attribute(event, "amount"), "100");
    assert_eq!(event_attribute(event, "sequence"), "1");

    let stats = query_stats_by_channel(&deps, OPEN_CHANNEL);
    assert_eq!(stats.num_of_forwards, 1);
    assert_eq!(stats.total_forwarded, vec![Coin::new(100u128, DENOM)]);

    // the queue was drained, the next cycle has nothing to do
    assert!(!is_pending(&deps, &address));
    let res = end_block(&mut deps);
    assert!(res.events.is_empty());
    assert_eq!(deps.transfer.requests.len(), 1);
}

#[test]
fn sweep_allowed_denoms_in_order_test() {
    let mut deps = setup();
    let address = register_forwarding_account(&mut deps, OPEN_CHANNEL, RECIPIENT, None).unwrap();

    fund_account(&mut deps, &address, 5, OTHER_DENOM);
    fund_account(&mut deps, &address, 7, "uatom");
    fund_account(&mut deps, &address, 10, DENOM);

    end_block(&mut deps);

    let tokens: Vec<ProtoCoin> = deps
        .transfer
        .requests
        .iter()
        .filter_map(|request| request.token.clone())
        .collect();
    assert_eq!(
        tokens,
        vec![
            ProtoCoin {
                denom: DENOM.to_string(),
                amount: "10".to_string(),
            },
            ProtoCoin {
                denom: OTHER_DENOM.to_string(),
                amount: "5".to_string(),
            },
        ]
    );

    let stats = query_stats_by_channel(&deps, OPEN_CHANNEL);
    assert_eq!(stats.num_of_forwards, 2);
    assert_eq!(
        stats.total_forwarded,
        vec![Coin::new(5u128, OTHER_DENOM), Coin::new(10u128, DENOM)]
    );
}

#[test]
fn sweep_accounts_in_address_order_test() {
    let mut deps = setup();

    let mut addresses = vec![];
    for i in 0..5 {
        let recipient = format!("osmo1recipient{i}");
        let address =
            register_forwarding_account(&mut deps, OTHER_OPEN_CHANNEL, &recipient, None).unwrap();
        fund_account(&mut deps, &address, 1 + i as u128, DENOM);
        addresses.push(address.to_string());
    }

    end_block(&mut deps);

    let senders: Vec<String> = deps
        .transfer
        .requests
        .iter()
        .map(|request| request.sender.clone())
        .collect();
    addresses.sort();
    assert_eq!(senders, addresses);

    let stats = query_stats_by_channel(&deps, OTHER_OPEN_CHANNEL);
    assert_eq!(stats.num_of_accounts, 5);
    assert_eq!(stats.num_of_forwards, 5);
    assert_eq!(stats.total_forwarded, vec![Coin::new(15u128, DENOM)]);
}

#[test]
fn sweep_skips_closed_channel_test() {
    let mut deps = setup();
    let address = register_forwarding_account(&mut deps, OPEN_CHANNEL, RECIPIENT, None).unwrap();

    deps.channels.set_channel(OPEN_CHANNEL, State::Closed);
    fund_account(&mut deps, &address, 100, DENOM);
    assert!(is_pending(&deps, &address));

    let res = end_block(&mut deps);
    assert!(find_event(&res, "forward_executed").is_none());
    assert!(deps.transfer.requests.is_empty());

    // funds stay put and the account isn't queued again
    assert_eq!(deps.ledger.balance(&address, DENOM), 100);
    assert!(!is_pending(&deps, &address));

    let stats = query_stats_by_channel(&deps, OPEN_CHANNEL);
    assert_eq!(stats.num_of_forwards, 0);
    assert!(stats.total_forwarded.is_empty());

    // once the channel reopens, the next receipt forwards everything
    deps.channels.set_channel(OPEN_CHANNEL, State::Open);
    fund_account(&mut deps, &address, 1, DENOM);
    end_block(&mut deps);
    assert_eq!(deps.transfer.requests.len(), 1);
    assert_eq!(
        deps.transfer.requests[0].token.as_ref().unwrap().amount,
        "101"
    );
}

#[test]
fn sweep_rejected_transfer_test() {
    let mut deps = setup();
    let first = register_forwarding_account(&mut deps, OPEN_CHANNEL, RECIPIENT, None).unwrap();

    fund_account(&mut deps, &first, 100, DENOM);
    deps.transfer.reject = true;

    let res = end_block(&mut deps);
    assert!(find_event(&res, "forward_executed").is_none());
    assert!(!is_pending(&deps, &first));

    let stats = query_stats_by_channel(&deps, OPEN_CHANNEL);
    assert_eq!(stats.num_of_forwards, 0);
    assert!(stats.total_forwarded.is_empty());

    // a rejected forward is not retried
    deps.transfer.reject = false;
    end_block(&mut deps);
    assert!(deps.transfer.requests.is_empty());
}

#[test]
fn sweep_custom_timeout_test() {
    let mut deps = mock_dependencies();
    let info = get_message_info(&deps.api, "creator", &[]);
    let mut msg = get_default_instantiate_msg(&deps.api);
    msg.transfer_timeout_seconds = Some(60);
    instantiate(deps.as_mut(), mock_env(), info, msg).unwrap();

    let address = register_forwarding_account(&mut deps, OPEN_CHANNEL, RECIPIENT, None).unwrap();
    fund_account(&mut deps, &address, 42, DENOM);
    end_block(&mut deps);

    assert_eq!(deps.transfer.requests.len(), 1);
    assert_eq!(
        deps.transfer.requests[0].timeout_timestamp,
        mock_env().block.time.plus_seconds(60).nanos()
    );
    assert_eq!(
        query_stats_by_channel(&deps, OPEN_CHANNEL).total_forwarded,
        vec![Coin {
            denom: DENOM.to_string(),
            amount: Uint128::new(42),
        }]
    );
}

#[test]
fn sweep_rejected_denom_test() {
    let mut deps = setup();
    let address = register_forwarding_account(&mut deps, OPEN_CHANNEL, RECIPIENT, None).unwrap();

    fund_account(&mut deps, &address, 100, DENOM);
    fund_account(&mut deps, &address, 7, OTHER_DENOM);
    deps.transfer.reject_denoms.insert(DENOM.to_string());

    let res = end_block(&mut deps);

    // the rejected denom doesn't stop the remaining denoms of the account
    assert_eq!(deps.transfer.requests.len(), 1);
    assert_eq!(
        deps.transfer.requests[0].token,
        Some(ProtoCoin {
            denom: OTHER_DENOM.to_string(),
            amount: "7".to_string(),
        })
    );
    let event = find_event(&res, "forward_executed").unwrap();
    assert_eq!(event_attribute(event, "denom"), OTHER_DENOM);
    assert_eq!(event_attribute(event, "sequence"), "1");
    assert_eq!(
        res.attributes
            .iter()
            .find(|attr| attr.key == "forwards_executed")
            .map(|attr| attr.value.as_str()),
        Some("1")
    );

    let stats = query_stats_by_channel(&deps, OPEN_CHANNEL);
    assert_eq!(stats.num_of_forwards, 1);
    assert_eq!(stats.total_forwarded, vec![Coin::new(7u128, OTHER_DENOM)]);
    assert_eq!(deps.ledger.balance(&address, DENOM), 100);
}

#[test]
fn sweep_closed_channel_next_to_open_test() {
    let mut deps = setup();
    let closed = register_forwarding_account(&mut deps, OPEN_CHANNEL, RECIPIENT, None).unwrap();
    let open =
        register_forwarding_account(&mut deps, OTHER_OPEN_CHANNEL, RECIPIENT, None).unwrap();

    deps.channels.set_channel(OPEN_CHANNEL, State::Closed);
    fund_account(&mut deps, &closed, 100, DENOM);
    fund_account(&mut deps, &open, 50, DENOM);

    let res = end_block(&mut deps);

    let senders: Vec<&str> = deps
        .transfer
        .requests
        .iter()
        .map(|request| request.sender.as_str())
        .collect();
    assert_eq!(senders, vec![open.as_str()]);
    assert_eq!(deps.transfer.requests[0].source_channel, OTHER_OPEN_CHANNEL);
    assert_eq!(res.events.len(), 1);

    assert_eq!(deps.ledger.balance(&closed, DENOM), 100);
    assert_eq!(query_stats_by_channel(&deps, OPEN_CHANNEL).num_of_forwards, 0);
    assert_eq!(
        query_stats_by_channel(&deps, OTHER_OPEN_CHANNEL).total_forwarded,
        vec![Coin::new(50u128, DENOM)]
    );
}

#[test]
fn sweep_timeout_overflow_test() {
    let mut deps = setup();
    let address = register_forwarding_account(&mut deps, OPEN_CHANNEL, RECIPIENT, None).unwrap();
    fund_account(&mut deps, &address, 100, DENOM);

    // out of range for instantiate, but a stored config must not make the cycle panic
    CONFIG
        .update(&mut deps.storage, |mut config| -> StdResult<_> {
            config.transfer_timeout_seconds = u64::MAX;
            Ok(config)
        })
        .unwrap();

    let res = sudo(deps.as_mut(), mock_env(), SudoMsg::EndBlock {});
    assert!(matches!(res, Err(ContractError::OverflowError(_))));
    assert!(deps.transfer.requests.is_empty());
    assert_eq!(query_stats_by_channel(&deps, OPEN_CHANNEL).num_of_forwards, 0);
}
