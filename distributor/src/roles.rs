//! Role registry.
//!
//! | operation                    | allowed roles                       |
//! |------------------------------|-------------------------------------|
//! | grant/revoke admin tiers     | Owner, SuperAdmin                   |
//! | set fee config               | Owner, SuperAdmin                   |
//! | publish root / interval      | Owner, SuperAdmin                   |
//! | pause                        | Owner, SuperAdmin, NormalAdmin      |
//! | unpause                      | Owner, SuperAdmin                   |
//! | propose owner / upgrade      | Owner                               |
//! | accept owner                 | proposed owner                      |

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Storage};

use crate::error::ContractError;
use crate::state::{FEE_CONFIG, NORMAL_ADMINS, OWNER, SUPER_ADMINS};

/// Role tags an address can hold
#[cw_serde]
pub enum Role {
    Owner,
    SuperAdmin,
    NormalAdmin,
    FeeRecipient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::SuperAdmin => "super_admin",
            Role::NormalAdmin => "normal_admin",
            Role::FeeRecipient => "fee_recipient",
        }
    }
}

/// Admin tiers that can be granted and revoked.
///
/// Ownership moves only through the two-step handover and the fee recipient
/// only through the fee config, so neither is representable here.
#[cw_serde]
pub enum AdminTier {
    SuperAdmin,
    NormalAdmin,
}

impl AdminTier {
    pub fn role(&self) -> Role {
        match self {
            AdminTier::SuperAdmin => Role::SuperAdmin,
            AdminTier::NormalAdmin => Role::NormalAdmin,
        }
    }
}

pub fn is_owner(storage: &dyn Storage, addr: &Addr) -> Result<bool, ContractError> {
    Ok(OWNER.load(storage)? == *addr)
}

pub fn is_super_admin(storage: &dyn Storage, addr: &Addr) -> Result<bool, ContractError> {
    Ok(SUPER_ADMINS.may_load(storage, addr)?.unwrap_or(false))
}

pub fn is_normal_admin(storage: &dyn Storage, addr: &Addr) -> Result<bool, ContractError> {
    Ok(NORMAL_ADMINS.may_load(storage, addr)?.unwrap_or(false))
}

/// All roles held by `addr`, highest first.
pub fn roles_of(storage: &dyn Storage, addr: &Addr) -> Result<Vec<Role>, ContractError> {
    let mut roles = vec![];
    if is_owner(storage, addr)? {
        roles.push(Role::Owner);
    }
    if is_super_admin(storage, addr)? {
        roles.push(Role::SuperAdmin);
    }
    if is_normal_admin(storage, addr)? {
        roles.push(Role::NormalAdmin);
    }
    if FEE_CONFIG.load(storage)?.fee_recipient == *addr {
        roles.push(Role::FeeRecipient);
    }
    Ok(roles)
}

pub fn ensure_owner(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if !is_owner(storage, sender)? {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

pub fn ensure_owner_or_super_admin(
    storage: &dyn Storage,
    sender: &Addr,
) -> Result<(), ContractError> {
    if !is_owner(storage, sender)? && !is_super_admin(storage, sender)? {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

pub fn ensure_any_admin(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if !is_owner(storage, sender)?
        && !is_super_admin(storage, sender)?
        && !is_normal_admin(storage, sender)?
    {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Add `addr` to the set for `tier`.
pub fn grant(storage: &mut dyn Storage, tier: &AdminTier, addr: &Addr) -> Result<(), ContractError> {
    match tier {
        AdminTier::SuperAdmin => SUPER_ADMINS.save(storage, addr, &true)?,
        AdminTier::NormalAdmin => NORMAL_ADMINS.save(storage, addr, &true)?,
    }
    Ok(())
}

/// Remove `addr` from the set for `tier`.
pub fn revoke(storage: &mut dyn Storage, tier: &AdminTier, addr: &Addr) {
    match tier {
        AdminTier::SuperAdmin => SUPER_ADMINS.remove(storage, addr),
        AdminTier::NormalAdmin => NORMAL_ADMINS.remove(storage, addr),
    }
}
