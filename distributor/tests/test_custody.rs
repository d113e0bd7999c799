//! CW20 Reward Custody Integration Tests.
//!
//! Covers a distribution paying out a CW20 token:
//! - Funding custody through the CW20 `Send` hook
//! - Claims paid with CW20 transfers (net to claimant, fee to recipient)
//! - Rejection of foreign tokens and native deposits

use cosmwasm_std::{coins, to_json_binary, Addr, Binary, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_multi_test::{App, ContractWrapper, Executor};

use common::AssetInfo;
use distributor::hash::claim_leaf_value;
use distributor::merkle::MerkleTree;
use distributor::msg::{CustodyResponse, ExecuteMsg, InstantiateMsg, QueryMsg, ReceiveMsg};

// ============================================================================
// Test Setup
// ============================================================================

fn contract_distributor() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        distributor::contract::execute,
        distributor::contract::instantiate,
        distributor::contract::query,
    );
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

fn instantiate_cw20(app: &mut App, holder: &Addr, symbol: &str) -> Addr {
    let code_id = app.store_code(contract_cw20());
    app.instantiate_contract(
        code_id,
        holder.clone(),
        &cw20_base::msg::InstantiateMsg {
            name: format!("Wrapped {}", symbol),
            symbol: symbol.to_string(),
            decimals: 8,
            initial_balances: vec![Cw20Coin {
                address: holder.to_string(),
                amount: Uint128::from(100_000_000_000u128),
            }],
            mint: None,
            marketing: None,
        },
        &[],
        "cw20-reward",
        None,
    )
    .unwrap()
}

struct TestEnv {
    app: App,
    contract_addr: Addr,
    token: Addr,
    owner: Addr,
    fee_recipient: Addr,
}

fn setup() -> TestEnv {
    let mut app = App::default();
    let owner = Addr::unchecked("terra1owner");
    let fee_recipient = Addr::unchecked("terra1feerecipient");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &owner, coins(1_000_000, "uluna"))
            .unwrap();
    });

    let token = instantiate_cw20(&mut app, &owner, "WBTC");

    let code_id = app.store_code(contract_distributor());
    let contract_addr = app
        .instantiate_contract(
            code_id,
            owner.clone(),
            &InstantiateMsg {
                owner: owner.to_string(),
                super_admin: owner.to_string(),
                normal_admins: vec![],
                reward_asset: AssetInfo::Cw20 {
                    contract_addr: token.clone(),
                },
                fee_recipient: fee_recipient.to_string(),
                fee_bps: 25,
                settlement_interval: Some(60),
            },
            &[],
            "btc-layer2-distributor",
            Some(owner.to_string()),
        )
        .unwrap();

    TestEnv {
        app,
        contract_addr,
        token,
        owner,
        fee_recipient,
    }
}

fn deposit(env: &mut TestEnv, token: &Addr, amount: u128) -> Result<(), String> {
    env.app
        .execute_contract(
            env.owner.clone(),
            token.clone(),
            &Cw20ExecuteMsg::Send {
                contract: env.contract_addr.to_string(),
                amount: Uint128::from(amount),
                msg: to_json_binary(&ReceiveMsg::Deposit {}).unwrap(),
            },
            &[],
        )
        .map(|_| ())
        .map_err(|err| err.root_cause().to_string())
}

fn token_balance(app: &App, token: &Addr, address: &Addr) -> Uint128 {
    let res: BalanceResponse = app
        .wrap()
        .query_wasm_smart(
            token,
            &Cw20QueryMsg::Balance {
                address: address.to_string(),
            },
        )
        .unwrap();
    res.balance
}

fn custody(env: &TestEnv) -> CustodyResponse {
    env.app
        .wrap()
        .query_wasm_smart(&env.contract_addr, &QueryMsg::Custody {})
        .unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_cw20_deposit_and_claim() {
    let mut env = setup();
    let token = env.token.clone();
    deposit(&mut env, &token, 10_000_000).unwrap();

    let res = custody(&env);
    assert_eq!(
        res.asset,
        AssetInfo::Cw20 {
            contract_addr: token.clone()
        }
    );
    assert_eq!(res.amount, Uint128::from(10_000_000u128));

    let entries = [
        (Addr::unchecked("terra1alice"), Uint128::from(4_000_000u128)),
        (Addr::unchecked("terra1bob"), Uint128::from(2_000_000u128)),
        (Addr::unchecked("terra1carol"), Uint128::from(1_000_000u128)),
    ];
    let values: Vec<[u8; 32]> = entries
        .iter()
        .map(|(addr, amount)| claim_leaf_value(addr.as_str(), *amount))
        .collect();
    let tree = MerkleTree::from_values(&values);

    env.app
        .execute_contract(
            env.owner.clone(),
            env.contract_addr.clone(),
            &ExecuteMsg::PublishRoot {
                epoch_id: 1,
                root: Binary::from(tree.root().to_vec()),
                total_leaves: tree.leaf_count(),
                claimable_after: 0,
            },
            &[],
        )
        .unwrap();
    env.app.update_block(|block| {
        block.time = block.time.plus_seconds(60);
        block.height += 12;
    });

    let (alice, amount) = entries[0].clone();
    env.app
        .execute_contract(
            alice.clone(),
            env.contract_addr.clone(),
            &ExecuteMsg::Claim {
                epoch_id: 1,
                leaf_index: 0,
                amount,
                proof: tree
                    .proof(0)
                    .unwrap()
                    .into_iter()
                    .map(|node| Binary::from(node.to_vec()))
                    .collect(),
                claimant: None,
            },
            &[],
        )
        .unwrap();

    // 0.25% of 4,000,000
    assert_eq!(
        token_balance(&env.app, &token, &alice),
        Uint128::from(3_990_000u128)
    );
    assert_eq!(
        token_balance(&env.app, &token, &env.fee_recipient),
        Uint128::from(10_000u128)
    );
    assert_eq!(custody(&env).amount, Uint128::from(6_000_000u128));
    assert_eq!(
        token_balance(&env.app, &token, &env.contract_addr),
        Uint128::from(6_000_000u128)
    );
}

#[test]
fn test_foreign_token_rejected() {
    let mut env = setup();
    let owner = env.owner.clone();
    let foreign = instantiate_cw20(&mut env.app, &owner, "FAKE");

    let err = deposit(&mut env, &foreign, 1_000).unwrap_err();
    assert!(err.starts_with("Invalid asset"));
    assert_eq!(custody(&env).amount, Uint128::zero());
}

#[test]
fn test_native_deposit_rejected_for_cw20_reward() {
    let mut env = setup();

    let res = env.app.execute_contract(
        env.owner.clone(),
        env.contract_addr.clone(),
        &ExecuteMsg::Deposit {},
        &coins(1_000, "uluna"),
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .starts_with("Invalid asset"));
}

#[test]
fn test_stray_transfer_not_counted_as_custody() {
    let mut env = setup();
    let token = env.token.clone();

    // Plain transfer bypasses the receive hook
    env.app
        .execute_contract(
            env.owner.clone(),
            token.clone(),
            &Cw20ExecuteMsg::Transfer {
                recipient: env.contract_addr.to_string(),
                amount: Uint128::from(5_000u128),
            },
            &[],
        )
        .unwrap();

    assert_eq!(
        token_balance(&env.app, &token, &env.contract_addr),
        Uint128::from(5_000u128)
    );
    assert_eq!(custody(&env).amount, Uint128::zero());
}
