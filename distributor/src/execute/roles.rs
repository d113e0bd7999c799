//! Role registry handlers.
//!
//! This module handles:
//! - Granting and revoking admin tiers
//! - Owner transfer (propose/accept/cancel)
//! - Fee configuration

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};

use crate::error::ContractError;
use crate::fee_manager::FeeConfig;
use crate::roles::{ensure_owner, ensure_owner_or_super_admin, grant, revoke, AdminTier};
use crate::state::{PendingOwner, FEE_CONFIG, OWNER, PENDING_OWNER};

// ============================================================================
// Admin Tiers
// ============================================================================

pub fn execute_grant_role(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
    tier: AdminTier,
) -> Result<Response, ContractError> {
    ensure_owner_or_super_admin(deps.storage, &info.sender)?;

    let addr = deps.api.addr_validate(&address)?;
    grant(deps.storage, &tier, &addr)?;

    Ok(Response::new()
        .add_attribute("method", "grant_role")
        .add_attribute("role", tier.role().as_str())
        .add_attribute("address", addr)
        .add_attribute("granted_by", info.sender))
}

pub fn execute_revoke_role(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
    tier: AdminTier,
) -> Result<Response, ContractError> {
    ensure_owner_or_super_admin(deps.storage, &info.sender)?;

    let addr = deps.api.addr_validate(&address)?;
    revoke(deps.storage, &tier, &addr);

    Ok(Response::new()
        .add_attribute("method", "revoke_role")
        .add_attribute("role", tier.role().as_str())
        .add_attribute("address", addr)
        .add_attribute("revoked_by", info.sender))
}

// ============================================================================
// Owner Transfer
// ============================================================================

/// Propose a new owner. Replaces any earlier proposal.
pub fn execute_propose_owner(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    let new_owner_addr = deps.api.addr_validate(&new_owner)?;
    let pending = PendingOwner {
        new_owner: new_owner_addr.clone(),
        proposed_at: env.block.time,
    };
    PENDING_OWNER.save(deps.storage, &pending)?;

    Ok(Response::new()
        .add_attribute("method", "propose_owner")
        .add_attribute("new_owner", new_owner_addr))
}

/// Accept a pending owner proposal.
pub fn execute_accept_owner(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingOwner)?;

    if info.sender != pending.new_owner {
        return Err(ContractError::Unauthorized);
    }

    let previous = OWNER.load(deps.storage)?;
    OWNER.save(deps.storage, &pending.new_owner)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_owner")
        .add_attribute("previous_owner", previous)
        .add_attribute("new_owner", pending.new_owner))
}

/// Cancel pending owner proposal.
pub fn execute_cancel_owner_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    if !PENDING_OWNER.exists(deps.storage) {
        return Err(ContractError::NoPendingOwner);
    }
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new().add_attribute("method", "cancel_owner_proposal"))
}

// ============================================================================
// Fee Configuration
// ============================================================================

pub fn execute_set_fee_config(
    deps: DepsMut,
    info: MessageInfo,
    fee_bps: u64,
    fee_recipient: String,
) -> Result<Response, ContractError> {
    ensure_owner_or_super_admin(deps.storage, &info.sender)?;

    let recipient = deps.api.addr_validate(&fee_recipient)?;
    let fee_config = FeeConfig::new(fee_bps, recipient)?;
    FEE_CONFIG.save(deps.storage, &fee_config)?;

    Ok(Response::new()
        .add_attribute("method", "set_fee_config")
        .add_attribute("fee_bps", fee_bps.to_string())
        .add_attribute("fee_recipient", fee_config.fee_recipient))
}
