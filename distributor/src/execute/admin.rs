//! Admin operations handlers.
//!
//! This module handles:
//! - Pause/unpause claims
//! - Settlement interval
//! - Asset recovery (emergency)

use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};

use crate::custody::{AssetCustody, LedgerCustody};
use crate::error::ContractError;
use crate::roles::{ensure_any_admin, ensure_owner, ensure_owner_or_super_admin};
use crate::state::{CONFIG, MAX_SETTLEMENT_INTERVAL};

// ============================================================================
// Pause/Unpause
// ============================================================================

/// Pause the contract (stops all claims).
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_any_admin(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "pause")
        .add_attribute("sender", info.sender))
}

/// Unpause the contract (resumes claims).
pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_owner_or_super_admin(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "unpause")
        .add_attribute("sender", info.sender))
}

// ============================================================================
// Settlement Interval
// ============================================================================

/// Set the minimum delay between publication and claimability.
///
/// Applies to roots published afterwards; existing epochs keep their window.
pub fn execute_set_settlement_interval(
    deps: DepsMut,
    info: MessageInfo,
    interval_seconds: u64,
) -> Result<Response, ContractError> {
    ensure_owner_or_super_admin(deps.storage, &info.sender)?;
    validate_settlement_interval(interval_seconds)?;

    let mut config = CONFIG.load(deps.storage)?;
    let old_interval = config.settlement_interval;
    config.settlement_interval = interval_seconds;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_settlement_interval")
        .add_attribute("old_interval", old_interval.to_string())
        .add_attribute("new_interval", interval_seconds.to_string()))
}

/// Reject intervals above `MAX_SETTLEMENT_INTERVAL`.
pub fn validate_settlement_interval(interval_seconds: u64) -> Result<u64, ContractError> {
    if interval_seconds > MAX_SETTLEMENT_INTERVAL {
        return Err(ContractError::InvalidSettlementInterval {
            interval_seconds,
            max_seconds: MAX_SETTLEMENT_INTERVAL,
        });
    }
    Ok(interval_seconds)
}

// ============================================================================
// Asset Recovery
// ============================================================================

/// Recover custody (emergency, requires paused state).
///
/// Goes through the custody ledger, so recovered funds can no longer back
/// claims.
pub fn execute_recover_asset(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
    recipient: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    let config = CONFIG.load(deps.storage)?;
    if !config.paused {
        return Err(ContractError::RecoveryNotAvailable);
    }
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }

    let recipient_addr = deps.api.addr_validate(&recipient)?;
    let messages = LedgerCustody
        .release_asset(deps.storage, &config.reward_asset, amount, &recipient_addr)?
        .into_iter();

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "recover_asset")
        .add_attribute("asset", config.reward_asset.to_string())
        .add_attribute("recipient", recipient_addr)
        .add_attribute("amount", amount.to_string()))
}
