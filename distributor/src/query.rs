//! Query handlers for the reward distribution contract.
//!
//! This module contains all query message handlers for retrieving contract state.

use cosmwasm_std::{Addr, Binary, Deps, Env, Order, StdError, StdResult, Timestamp, Uint128};
use cw_storage_plus::{Bound, Map};

use crate::bitmap::is_claimed;
use crate::custody::custody_balance;
use crate::execute::parse_proof;
use crate::fee_manager::split_amount;
use crate::hash::claim_leaf_value;
use crate::merkle::{self, leaf_hash};
use crate::msg::{
    AdminsResponse, ClaimRecordResponse, ClaimRecordsResponse, ComputeLeafResponse,
    ConfigResponse, CustodyResponse, EpochResponse, EpochStatus, EpochStatusResponse,
    EpochsResponse, FeeConfigResponse, IsClaimedResponse, LogicInfoResponse, OwnerResponse,
    PendingOwnerResponse, RolesResponse, SettlementIntervalResponse, SimulateClaimResponse,
    StatsResponse, StorageLayoutResponse, VerifyProofResponse,
};
use crate::roles::roles_of;
use crate::state::{
    ClaimRecord, SettlementRoot, CLAIM_RECORDS, CONFIG, DEFAULT_LIMIT, EPOCHS, FEE_CONFIG,
    LATEST_EPOCH, LOGIC_INFO, MAX_LIMIT, NORMAL_ADMINS, OWNER, PENDING_OWNER, STATS,
    STORAGE_LAYOUT, SUPER_ADMINS,
};

fn page_limit(limit: Option<u32>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize
}

// ============================================================================
// Core Queries
// ============================================================================

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: OWNER.load(deps.storage)?,
        paused: config.paused,
        reward_asset: config.reward_asset,
        settlement_interval: config.settlement_interval,
    })
}

/// Query distribution statistics.
pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        total_claims: stats.total_claims,
        total_claimed: stats.total_claimed,
        total_fees: stats.total_fees,
    })
}

// ============================================================================
// Role Queries
// ============================================================================

pub fn query_roles(deps: Deps, address: String) -> StdResult<RolesResponse> {
    let addr = deps.api.addr_validate(&address)?;
    let roles = roles_of(deps.storage, &addr)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(RolesResponse {
        address: addr,
        roles,
    })
}

pub fn query_owner(deps: Deps) -> StdResult<OwnerResponse> {
    Ok(OwnerResponse {
        owner: OWNER.load(deps.storage)?,
    })
}

pub fn query_pending_owner(deps: Deps) -> StdResult<Option<PendingOwnerResponse>> {
    Ok(PENDING_OWNER
        .may_load(deps.storage)?
        .map(|pending| PendingOwnerResponse {
            new_owner: pending.new_owner,
            proposed_at: pending.proposed_at,
        }))
}

pub fn query_super_admins(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AdminsResponse> {
    list_admins(deps, &SUPER_ADMINS, start_after, limit)
}

pub fn query_normal_admins(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AdminsResponse> {
    list_admins(deps, &NORMAL_ADMINS, start_after, limit)
}

fn list_admins(
    deps: Deps,
    set: &Map<&Addr, bool>,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<AdminsResponse> {
    let limit = page_limit(limit);
    let start_addr = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let admins = set
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AdminsResponse { admins })
}

// ============================================================================
// Fee Queries
// ============================================================================

pub fn query_fee_config(deps: Deps) -> StdResult<FeeConfigResponse> {
    let fee_config = FEE_CONFIG.load(deps.storage)?;
    Ok(FeeConfigResponse {
        fee_bps: fee_config.fee_bps,
        fee_recipient: fee_config.fee_recipient,
    })
}

pub fn query_settlement_interval(deps: Deps) -> StdResult<SettlementIntervalResponse> {
    Ok(SettlementIntervalResponse {
        interval_seconds: CONFIG.load(deps.storage)?.settlement_interval,
    })
}

/// Simulate the net/fee split of a claim.
pub fn query_simulate_claim(deps: Deps, amount: Uint128) -> StdResult<SimulateClaimResponse> {
    let fee_config = FEE_CONFIG.load(deps.storage)?;
    let (net_amount, fee_amount) = split_amount(amount, fee_config.fee_bps);
    Ok(SimulateClaimResponse {
        gross_amount: amount,
        net_amount,
        fee_amount,
    })
}

// ============================================================================
// Ledger Queries
// ============================================================================

fn epoch_status(epoch: Option<&SettlementRoot>, now: Timestamp) -> EpochStatus {
    match epoch {
        None => EpochStatus::Unpublished,
        Some(epoch) if now < epoch.claimable_after => EpochStatus::Published,
        Some(_) => EpochStatus::Claimable,
    }
}

fn epoch_response(epoch: SettlementRoot, now: Timestamp) -> EpochResponse {
    let status = epoch_status(Some(&epoch), now);
    EpochResponse {
        epoch_id: epoch.epoch_id,
        root: Binary::from(epoch.root.to_vec()),
        total_leaves: epoch.total_leaves,
        published_at: epoch.published_at,
        claimable_after: epoch.claimable_after,
        published_by: epoch.published_by,
        status,
    }
}

pub fn query_epoch(deps: Deps, env: Env, epoch_id: u64) -> StdResult<Option<EpochResponse>> {
    Ok(EPOCHS
        .may_load(deps.storage, epoch_id)?
        .map(|epoch| epoch_response(epoch, env.block.time)))
}

pub fn query_epoch_status(deps: Deps, env: Env, epoch_id: u64) -> StdResult<EpochStatusResponse> {
    let epoch = EPOCHS.may_load(deps.storage, epoch_id)?;
    Ok(EpochStatusResponse {
        epoch_id,
        status: epoch_status(epoch.as_ref(), env.block.time),
    })
}

pub fn query_latest_epoch(deps: Deps, env: Env) -> StdResult<Option<EpochResponse>> {
    match LATEST_EPOCH.may_load(deps.storage)? {
        Some(epoch_id) => query_epoch(deps, env, epoch_id),
        None => Ok(None),
    }
}

/// Query paginated list of published roots.
pub fn query_epochs(
    deps: Deps,
    env: Env,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<EpochsResponse> {
    let limit = page_limit(limit);
    let start = start_after.map(Bound::exclusive);

    let epochs = EPOCHS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, epoch)| epoch_response(epoch, env.block.time)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(EpochsResponse { epochs })
}

pub fn query_is_claimed(deps: Deps, epoch_id: u64, leaf_index: u32) -> StdResult<IsClaimedResponse> {
    Ok(IsClaimedResponse {
        claimed: is_claimed(deps.storage, epoch_id, leaf_index)?,
    })
}

fn record_response(record: ClaimRecord) -> ClaimRecordResponse {
    ClaimRecordResponse {
        epoch_id: record.epoch_id,
        leaf_index: record.leaf_index,
        claimant: record.claimant,
        gross_amount: record.gross_amount,
        net_amount: record.net_amount,
        fee_amount: record.fee_amount,
        claimed_at: record.claimed_at,
    }
}

pub fn query_claim_record(
    deps: Deps,
    epoch_id: u64,
    leaf_index: u32,
) -> StdResult<Option<ClaimRecordResponse>> {
    Ok(CLAIM_RECORDS
        .may_load(deps.storage, (epoch_id, leaf_index))?
        .map(record_response))
}

/// Query paginated claim records of one epoch.
pub fn query_claim_records(
    deps: Deps,
    epoch_id: u64,
    start_after: Option<u32>,
    limit: Option<u32>,
) -> StdResult<ClaimRecordsResponse> {
    let limit = page_limit(limit);
    let start = start_after.map(Bound::exclusive);

    let records = CLAIM_RECORDS
        .prefix(epoch_id)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, record)| record_response(record)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ClaimRecordsResponse { records })
}

/// Verify a proof without claiming. Unknown epochs verify as invalid.
pub fn query_verify_proof(
    deps: Deps,
    epoch_id: u64,
    leaf_index: u32,
    claimant: String,
    amount: Uint128,
    proof: Vec<Binary>,
) -> StdResult<VerifyProofResponse> {
    let claimant = deps.api.addr_validate(&claimant)?;
    let epoch = match EPOCHS.may_load(deps.storage, epoch_id)? {
        Some(epoch) => epoch,
        None => return Ok(VerifyProofResponse { valid: false }),
    };

    let valid = match parse_proof(&proof) {
        Some(proof) => merkle::verify(
            &epoch.root,
            leaf_index,
            &claim_leaf_value(claimant.as_str(), amount),
            &proof,
            epoch.total_leaves,
        ),
        None => false,
    };

    Ok(VerifyProofResponse { valid })
}

pub fn query_compute_leaf(
    deps: Deps,
    leaf_index: u32,
    claimant: String,
    amount: Uint128,
) -> StdResult<ComputeLeafResponse> {
    let claimant = deps.api.addr_validate(&claimant)?;
    let leaf_value = claim_leaf_value(claimant.as_str(), amount);
    Ok(ComputeLeafResponse {
        leaf_value: Binary::from(leaf_value.to_vec()),
        leaf_hash: Binary::from(leaf_hash(leaf_index, &leaf_value).to_vec()),
    })
}

// ============================================================================
// Custody & Upgrade Queries
// ============================================================================

pub fn query_custody(deps: Deps) -> StdResult<CustodyResponse> {
    let config = CONFIG.load(deps.storage)?;
    let amount = custody_balance(deps.storage, &config.reward_asset)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(CustodyResponse {
        asset: config.reward_asset,
        amount,
    })
}

pub fn query_storage_layout(deps: Deps) -> StdResult<StorageLayoutResponse> {
    Ok(StorageLayoutResponse {
        slots: STORAGE_LAYOUT.load(deps.storage)?,
    })
}

pub fn query_logic_info(deps: Deps) -> StdResult<LogicInfoResponse> {
    let logic = LOGIC_INFO.load(deps.storage)?;
    Ok(LogicInfoResponse {
        code_id: logic.code_id,
        version: logic.version,
        installed_at: logic.installed_at,
    })
}
