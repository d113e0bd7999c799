//! Claim ledger handlers.
//!
//! Epoch lifecycle: `Unpublished -> Published -> Claimable`.
//!
//! 1. `PublishRoot` - Owner/SuperAdmin stores an immutable settlement root
//! 2. After `claimable_after`, anyone submits `(leaf_index, amount, proof)`
//! 3. The leaf is marked spent, then net amount and fee leave custody

use cosmwasm_std::{
    to_json_binary, Addr, Binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, Storage,
    Timestamp, Uint128,
};

use crate::bitmap::{is_claimed, set_claimed};
use crate::custody::{AssetCustody, LedgerCustody};
use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, claim_leaf_value, parse_bytes32};
use crate::merkle;
use crate::msg::ClaimResultData;
use crate::roles::ensure_owner_or_super_admin;
use crate::state::{
    ClaimRecord, SettlementRoot, CLAIM_RECORDS, CONFIG, EPOCHS, FEE_CONFIG, LATEST_EPOCH,
    MAX_TIMESTAMP_SECONDS, STATS,
};

/// A claim against a published settlement root.
#[derive(Clone, Debug, PartialEq)]
pub struct ClaimRequest {
    pub epoch_id: u64,
    pub leaf_index: u32,
    pub amount: Uint128,
    pub claimant: Addr,
    pub proof: Vec<Binary>,
}

/// Result of a successful claim.
#[derive(Clone, Debug, PartialEq)]
pub struct ClaimOutcome {
    pub record: ClaimRecord,
    pub messages: Vec<CosmosMsg>,
}

// ============================================================================
// PublishRoot - Owner/SuperAdmin
// ============================================================================

/// Publish the settlement root for a new epoch.
pub fn execute_publish_root(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    epoch_id: u64,
    root: Binary,
    total_leaves: u32,
    claimable_after: u64,
) -> Result<Response, ContractError> {
    ensure_owner_or_super_admin(deps.storage, &info.sender)?;

    if EPOCHS.has(deps.storage, epoch_id) {
        return Err(ContractError::DuplicateEpoch { epoch_id });
    }

    let root = parse_bytes32(&root)?;
    if root == [0u8; 32] {
        return Err(ContractError::InvalidEpoch {
            reason: "root must not be zero".to_string(),
        });
    }
    if total_leaves == 0 {
        return Err(ContractError::InvalidEpoch {
            reason: "total_leaves must be greater than zero".to_string(),
        });
    }

    if claimable_after > MAX_TIMESTAMP_SECONDS {
        return Err(ContractError::InvalidEpoch {
            reason: format!("claimable_after exceeds maximum {}", MAX_TIMESTAMP_SECONDS),
        });
    }

    let config = CONFIG.load(deps.storage)?;
    let earliest = env
        .block
        .time
        .seconds()
        .checked_add(config.settlement_interval)
        .filter(|seconds| *seconds <= MAX_TIMESTAMP_SECONDS)
        .ok_or_else(|| ContractError::InvalidEpoch {
            reason: "settlement interval overflows the timestamp range".to_string(),
        })?;
    let claimable_after = Timestamp::from_seconds(claimable_after.max(earliest));

    let settlement = SettlementRoot {
        epoch_id,
        root,
        total_leaves,
        published_at: env.block.time,
        claimable_after,
        published_by: info.sender.clone(),
    };
    EPOCHS.save(deps.storage, epoch_id, &settlement)?;
    LATEST_EPOCH.save(deps.storage, &epoch_id)?;

    Ok(Response::new()
        .add_attribute("method", "publish_root")
        .add_attribute("epoch_id", epoch_id.to_string())
        .add_attribute("root", bytes32_to_hex(&root))
        .add_attribute("total_leaves", total_leaves.to_string())
        .add_attribute("claimable_after", claimable_after.seconds().to_string())
        .add_attribute("publisher", info.sender))
}

// ============================================================================
// Claim - Anyone
// ============================================================================

/// Claim a leaf of a published epoch.
#[allow(clippy::too_many_arguments)]
pub fn execute_claim(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    epoch_id: u64,
    leaf_index: u32,
    amount: Uint128,
    proof: Vec<Binary>,
    claimant: Option<String>,
) -> Result<Response, ContractError> {
    let claimant = match claimant {
        Some(claimant) => deps.api.addr_validate(&claimant)?,
        None => info.sender.clone(),
    };

    let request = ClaimRequest {
        epoch_id,
        leaf_index,
        amount,
        claimant,
        proof,
    };
    let outcome = process_claim(deps.storage, &mut LedgerCustody, env.block.time, &request)?;
    let record = outcome.record;

    Ok(Response::new()
        .add_messages(outcome.messages)
        .set_data(to_json_binary(&ClaimResultData {
            net_amount: record.net_amount,
            fee_amount: record.fee_amount,
        })?)
        .add_attribute("method", "claim")
        .add_attribute("epoch_id", epoch_id.to_string())
        .add_attribute("leaf_index", leaf_index.to_string())
        .add_attribute("claimant", record.claimant.to_string())
        .add_attribute("submitted_by", info.sender)
        .add_attribute("gross_amount", record.gross_amount.to_string())
        .add_attribute("net_amount", record.net_amount.to_string())
        .add_attribute("fee_amount", record.fee_amount.to_string()))
}

/// Validate and settle a claim.
///
/// Checks run in a fixed order so callers get the most specific reason:
/// paused, epoch missing, window not open, already claimed, zero amount,
/// bad proof.
/// The bitmap bit is written before `custody` is asked to release anything.
pub fn process_claim(
    storage: &mut dyn Storage,
    custody: &mut dyn AssetCustody,
    now: Timestamp,
    request: &ClaimRequest,
) -> Result<ClaimOutcome, ContractError> {
    let config = CONFIG.load(storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }

    let epoch_id = request.epoch_id;
    let leaf_index = request.leaf_index;

    let epoch = EPOCHS
        .may_load(storage, epoch_id)?
        .ok_or(ContractError::EpochNotFound { epoch_id })?;

    if now < epoch.claimable_after {
        return Err(ContractError::NotYetClaimable {
            epoch_id,
            remaining_seconds: epoch.claimable_after.seconds() - now.seconds(),
        });
    }

    if is_claimed(storage, epoch_id, leaf_index)? {
        return Err(ContractError::AlreadyClaimed {
            epoch_id,
            leaf_index,
        });
    }

    if request.amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }

    let proof = parse_proof(&request.proof).ok_or(ContractError::InvalidProof {
        epoch_id,
        leaf_index,
    })?;
    let leaf_value = claim_leaf_value(request.claimant.as_str(), request.amount);
    if !merkle::verify(
        &epoch.root,
        leaf_index,
        &leaf_value,
        &proof,
        epoch.total_leaves,
    ) {
        return Err(ContractError::InvalidProof {
            epoch_id,
            leaf_index,
        });
    }

    // Spend the leaf before any asset leaves custody
    set_claimed(storage, epoch_id, leaf_index)?;

    let fee_config = FEE_CONFIG.load(storage)?;
    let (net_amount, fee_amount) = fee_config.split(request.amount);

    let mut messages = vec![];
    if let Some(msg) =
        custody.release_asset(storage, &config.reward_asset, net_amount, &request.claimant)?
    {
        messages.push(msg);
    }
    if let Some(msg) = custody.release_asset(
        storage,
        &config.reward_asset,
        fee_amount,
        &fee_config.fee_recipient,
    )? {
        messages.push(msg);
    }

    let record = ClaimRecord {
        epoch_id,
        leaf_index,
        claimant: request.claimant.clone(),
        gross_amount: request.amount,
        net_amount,
        fee_amount,
        claimed_at: now,
    };
    CLAIM_RECORDS.save(storage, (epoch_id, leaf_index), &record)?;

    let mut stats = STATS.load(storage)?;
    stats.total_claims += 1;
    stats.total_claimed += request.amount;
    stats.total_fees += fee_amount;
    STATS.save(storage, &stats)?;

    Ok(ClaimOutcome { record, messages })
}

/// Parse proof elements; `None` if any element is not 32 bytes.
pub fn parse_proof(proof: &[Binary]) -> Option<Vec<[u8; 32]>> {
    proof
        .iter()
        .map(|node| parse_bytes32(node).ok())
        .collect()
}
