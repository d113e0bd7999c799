//! Reward Distribution Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use common::AssetInfo;

use crate::error::ContractError;
use crate::execute::{
    apply_upgrade, execute_accept_owner, execute_cancel_owner_proposal, execute_claim,
    execute_deposit, execute_grant_role, execute_pause, execute_propose_owner,
    execute_publish_root, execute_receive, execute_recover_asset, execute_revoke_role,
    execute_set_fee_config, execute_set_settlement_interval, execute_unpause, execute_upgrade_to,
    validate_settlement_interval,
};
use crate::fee_manager::FeeConfig;
use crate::layout::{record_layout, SlotSpec, CURRENT_LAYOUT};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_claim_record, query_claim_records, query_compute_leaf, query_config, query_custody,
    query_epoch, query_epoch_status, query_epochs, query_fee_config, query_is_claimed,
    query_latest_epoch, query_logic_info, query_normal_admins, query_owner, query_pending_owner,
    query_roles, query_settlement_interval, query_simulate_claim, query_stats,
    query_storage_layout, query_super_admins, query_verify_proof,
};
use crate::state::{
    Config, LogicInfo, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION,
    DEFAULT_SETTLEMENT_INTERVAL, FEE_CONFIG, LOGIC_INFO, NORMAL_ADMINS, OWNER, STATS, SUPER_ADMINS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    record_layout(deps.storage, CURRENT_LAYOUT)?;

    // Validate role holders
    let owner = deps.api.addr_validate(&msg.owner)?;
    let super_admin = deps.api.addr_validate(&msg.super_admin)?;
    let fee_recipient = deps.api.addr_validate(&msg.fee_recipient)?;

    // Validate reward asset
    let reward_asset = match msg.reward_asset {
        AssetInfo::Native { denom } => {
            if denom.is_empty() {
                return Err(ContractError::InvalidAsset {
                    reason: "Native denom must not be empty".to_string(),
                });
            }
            AssetInfo::Native { denom }
        }
        AssetInfo::Cw20 { contract_addr } => AssetInfo::Cw20 {
            contract_addr: deps.api.addr_validate(contract_addr.as_str())?,
        },
    };

    OWNER.save(deps.storage, &owner)?;
    SUPER_ADMINS.save(deps.storage, &super_admin, &true)?;
    for admin in &msg.normal_admins {
        let admin = deps.api.addr_validate(admin)?;
        NORMAL_ADMINS.save(deps.storage, &admin, &true)?;
    }

    FEE_CONFIG.save(deps.storage, &FeeConfig::new(msg.fee_bps, fee_recipient)?)?;

    let settlement_interval =
        validate_settlement_interval(msg.settlement_interval.unwrap_or(DEFAULT_SETTLEMENT_INTERVAL))?;
    let config = Config {
        paused: false,
        reward_asset,
        settlement_interval,
    };
    CONFIG.save(deps.storage, &config)?;
    STATS.save(deps.storage, &Stats::default())?;

    LOGIC_INFO.save(
        deps.storage,
        &LogicInfo {
            code_id: 0,
            version: CONTRACT_VERSION.to_string(),
            installed_at: env.block.time,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("super_admin", super_admin)
        .add_attribute("normal_admins", msg.normal_admins.len().to_string())
        .add_attribute("reward_asset", config.reward_asset.to_string())
        .add_attribute("fee_bps", msg.fee_bps.to_string())
        .add_attribute("settlement_interval", settlement_interval.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Claim ledger
        ExecuteMsg::PublishRoot {
            epoch_id,
            root,
            total_leaves,
            claimable_after,
        } => execute_publish_root(
            deps,
            env,
            info,
            epoch_id,
            root,
            total_leaves,
            claimable_after,
        ),
        ExecuteMsg::Claim {
            epoch_id,
            leaf_index,
            amount,
            proof,
            claimant,
        } => execute_claim(
            deps, env, info, epoch_id, leaf_index, amount, proof, claimant,
        ),

        // Custody
        ExecuteMsg::Deposit {} => execute_deposit(deps, info),
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, info, cw20_msg),
        ExecuteMsg::RecoverAsset { amount, recipient } => {
            execute_recover_asset(deps, info, amount, recipient)
        }

        // Role registry
        ExecuteMsg::GrantRole { address, tier } => execute_grant_role(deps, info, address, tier),
        ExecuteMsg::RevokeRole { address, tier } => {
            execute_revoke_role(deps, info, address, tier)
        }
        ExecuteMsg::ProposeOwner { new_owner } => {
            execute_propose_owner(deps, env, info, new_owner)
        }
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, info),
        ExecuteMsg::CancelOwnerProposal {} => execute_cancel_owner_proposal(deps, info),
        ExecuteMsg::SetFeeConfig {
            fee_bps,
            fee_recipient,
        } => execute_set_fee_config(deps, info, fee_bps, fee_recipient),
        ExecuteMsg::SetSettlementInterval { interval_seconds } => {
            execute_set_settlement_interval(deps, info, interval_seconds)
        }
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),

        // Upgrade
        ExecuteMsg::UpgradeTo { new_code_id } => {
            execute_upgrade_to(deps, env, info, new_code_id)
        }
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        // Core queries
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),

        // Role queries
        QueryMsg::Roles { address } => to_json_binary(&query_roles(deps, address)?),
        QueryMsg::Owner {} => to_json_binary(&query_owner(deps)?),
        QueryMsg::PendingOwner {} => to_json_binary(&query_pending_owner(deps)?),
        QueryMsg::SuperAdmins { start_after, limit } => {
            to_json_binary(&query_super_admins(deps, start_after, limit)?)
        }
        QueryMsg::NormalAdmins { start_after, limit } => {
            to_json_binary(&query_normal_admins(deps, start_after, limit)?)
        }
        QueryMsg::FeeConfig {} => to_json_binary(&query_fee_config(deps)?),
        QueryMsg::SettlementInterval {} => to_json_binary(&query_settlement_interval(deps)?),
        QueryMsg::SimulateClaim { amount } => {
            to_json_binary(&query_simulate_claim(deps, amount)?)
        }

        // Ledger queries
        QueryMsg::Epoch { epoch_id } => to_json_binary(&query_epoch(deps, env, epoch_id)?),
        QueryMsg::EpochStatus { epoch_id } => {
            to_json_binary(&query_epoch_status(deps, env, epoch_id)?)
        }
        QueryMsg::LatestEpoch {} => to_json_binary(&query_latest_epoch(deps, env)?),
        QueryMsg::Epochs { start_after, limit } => {
            to_json_binary(&query_epochs(deps, env, start_after, limit)?)
        }
        QueryMsg::IsClaimed {
            epoch_id,
            leaf_index,
        } => to_json_binary(&query_is_claimed(deps, epoch_id, leaf_index)?),
        QueryMsg::ClaimRecord {
            epoch_id,
            leaf_index,
        } => to_json_binary(&query_claim_record(deps, epoch_id, leaf_index)?),
        QueryMsg::ClaimRecords {
            epoch_id,
            start_after,
            limit,
        } => to_json_binary(&query_claim_records(deps, epoch_id, start_after, limit)?),
        QueryMsg::VerifyProof {
            epoch_id,
            leaf_index,
            claimant,
            amount,
            proof,
        } => to_json_binary(&query_verify_proof(
            deps, epoch_id, leaf_index, claimant, amount, proof,
        )?),
        QueryMsg::ComputeLeaf {
            leaf_index,
            claimant,
            amount,
        } => to_json_binary(&query_compute_leaf(deps, leaf_index, claimant, amount)?),

        // Custody & upgrade queries
        QueryMsg::Custody {} => to_json_binary(&query_custody(deps)?),
        QueryMsg::StorageLayout {} => to_json_binary(&query_storage_layout(deps)?),
        QueryMsg::LogicInfo {} => to_json_binary(&query_logic_info(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, env: Env, msg: MigrateMsg) -> Result<Response, ContractError> {
    migrate_with_layout(deps, env, msg, CURRENT_LAYOUT)
}

/// Migrate entry point for logic declaring `layout` as its storage layout.
pub fn migrate_with_layout(
    deps: DepsMut,
    env: Env,
    _msg: MigrateMsg,
    layout: &[SlotSpec],
) -> Result<Response, ContractError> {
    apply_upgrade(deps, env, layout)
}
