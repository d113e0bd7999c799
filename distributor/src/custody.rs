//! Asset custody.
//!
//! The distribution contract holds the reward asset on behalf of the bridge.
//! Custody is tracked per asset so a claim can never release more than was
//! deposited, independent of stray balances sent to the contract.

use common::AssetInfo;
use cosmwasm_std::{Addr, CosmosMsg, StdError, Storage, Uint128};

use crate::error::ContractError;
use crate::state::CUSTODY;

/// Releases assets held in custody.
///
/// The claim ledger calls this only after the claim bitmap is written, so an
/// implementation that re-enters the ledger observes the claim as spent.
pub trait AssetCustody {
    /// Debit `amount` of `asset` and return the message paying `recipient`.
    ///
    /// Returns `Ok(None)` for a zero amount.
    fn release_asset(
        &mut self,
        storage: &mut dyn Storage,
        asset: &AssetInfo,
        amount: Uint128,
        recipient: &Addr,
    ) -> Result<Option<CosmosMsg>, ContractError>;
}

/// Custody backed by the on-chain `CUSTODY` ledger.
#[derive(Debug, Default)]
pub struct LedgerCustody;

impl AssetCustody for LedgerCustody {
    fn release_asset(
        &mut self,
        storage: &mut dyn Storage,
        asset: &AssetInfo,
        amount: Uint128,
        recipient: &Addr,
    ) -> Result<Option<CosmosMsg>, ContractError> {
        if amount.is_zero() {
            return Ok(None);
        }

        let key = asset.key();
        let available = custody_balance(storage, asset)?;
        if available < amount {
            return Err(ContractError::InsufficientCustody {
                available,
                requested: amount,
            });
        }
        CUSTODY.save(storage, &key, &(available - amount))?;

        Ok(Some(asset.transfer_msg(recipient, amount)?))
    }
}

/// Current tracked custody for `asset`.
pub fn custody_balance(storage: &dyn Storage, asset: &AssetInfo) -> Result<Uint128, ContractError> {
    Ok(CUSTODY
        .may_load(storage, &asset.key())?
        .unwrap_or_default())
}

/// Credit `amount` of `asset` into custody, returning the new balance.
pub fn credit_custody(
    storage: &mut dyn Storage,
    asset: &AssetInfo,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let balance = custody_balance(storage, asset)?
        .checked_add(amount)
        .map_err(StdError::from)?;
    CUSTODY.save(storage, &asset.key(), &balance)?;
    Ok(balance)
}
