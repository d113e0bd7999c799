//! Custody funding handlers.
//!
//! Only the configured reward asset is accepted. Native deposits arrive as
//! funds on `Deposit`, CW20 deposits through the `Receive` hook.

use cosmwasm_std::{from_json, DepsMut, MessageInfo, Response, Uint128};
use cw20::Cw20ReceiveMsg;

use common::AssetInfo;

use crate::custody::credit_custody;
use crate::error::ContractError;
use crate::msg::ReceiveMsg;
use crate::state::CONFIG;

/// Credit native funds sent with the message.
pub fn execute_deposit(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let denom = match &config.reward_asset {
        AssetInfo::Native { denom } => denom,
        AssetInfo::Cw20 { .. } => {
            return Err(ContractError::InvalidAsset {
                reason: "Reward asset is a CW20 token; use CW20 send".to_string(),
            })
        }
    };

    let amount = match info.funds.as_slice() {
        [coin] if coin.denom == *denom => coin.amount,
        _ => {
            return Err(ContractError::InvalidAsset {
                reason: format!("Expected a single coin of {}", denom),
            })
        }
    };

    deposit(deps, &config.reward_asset, amount, &info.sender.to_string())
}

/// Handle the CW20 receive hook.
pub fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    // info.sender is the token contract
    let is_reward_token = matches!(
        &config.reward_asset,
        AssetInfo::Cw20 { contract_addr } if *contract_addr == info.sender
    );
    if !is_reward_token {
        return Err(ContractError::InvalidAsset {
            reason: format!("Token {} is not the reward asset", info.sender),
        });
    }

    match from_json(&msg.msg)? {
        ReceiveMsg::Deposit {} => deposit(deps, &config.reward_asset, msg.amount, &msg.sender),
    }
}

fn deposit(
    deps: DepsMut,
    asset: &AssetInfo,
    amount: Uint128,
    depositor: &str,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }

    let balance = credit_custody(deps.storage, asset, amount)?;

    Ok(Response::new()
        .add_attribute("method", "deposit")
        .add_attribute("asset", asset.to_string())
        .add_attribute("depositor", depositor)
        .add_attribute("amount", amount.to_string())
        .add_attribute("custody", balance.to_string()))
}
