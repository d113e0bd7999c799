//! Message types for the reward distribution contract
//!
//! This module defines all messages for instantiation, execution, queries and
//! migration.

use common::AssetInfo;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};

use crate::layout::LayoutSlot;
use crate::roles::{AdminTier, Role};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
///
/// Only accepted when the owner requested the upgrade through `UpgradeTo`.
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Initial owner
    pub owner: String,
    /// Initial super admin
    pub super_admin: String,
    /// Initial normal admins
    #[serde(default)]
    pub normal_admins: Vec<String>,
    /// Asset paid out by claims (bridge-wrapped token)
    pub reward_asset: AssetInfo,
    /// Fee recipient address
    pub fee_recipient: String,
    /// Claim fee in basis points (0-10000)
    pub fee_bps: u64,
    /// Settlement interval in seconds (default 24h, at most 365 days)
    pub settlement_interval: Option<u64>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Claim Ledger
    // ========================================================================
    /// Publish the settlement root for an epoch
    ///
    /// Authorization: Owner or SuperAdmin
    ///
    /// The root becomes claimable at `max(claimable_after, now + settlement_interval)`.
    PublishRoot {
        epoch_id: u64,
        /// 32-byte merkle root
        root: Binary,
        /// Number of leaves in the tree
        total_leaves: u32,
        /// Requested earliest claim time (unix seconds)
        claimable_after: u64,
    },

    /// Claim a settlement leaf
    ///
    /// Authorization: Anyone. Payout goes to the claimant committed in the leaf.
    Claim {
        epoch_id: u64,
        leaf_index: u32,
        /// Gross amount committed in the leaf
        amount: Uint128,
        /// Sibling hashes from leaf level to root (32 bytes each)
        proof: Vec<Binary>,
        /// Claimant committed in the leaf (defaults to the sender)
        claimant: Option<String>,
    },

    // ========================================================================
    // Custody
    // ========================================================================
    /// Fund custody with the native reward asset sent along with this message
    Deposit {},

    /// Fund custody with the CW20 reward asset (called via CW20 send)
    Receive(cw20::Cw20ReceiveMsg),

    /// Recover custody (emergency, requires paused state)
    ///
    /// Authorization: Owner only
    RecoverAsset { amount: Uint128, recipient: String },

    // ========================================================================
    // Role Registry
    // ========================================================================
    /// Grant an admin tier
    ///
    /// Authorization: Owner or SuperAdmin
    GrantRole { address: String, tier: AdminTier },

    /// Revoke an admin tier
    ///
    /// Authorization: Owner or SuperAdmin
    RevokeRole { address: String, tier: AdminTier },

    /// Propose a new owner (first step of the handover)
    ///
    /// Authorization: Owner only
    ProposeOwner { new_owner: String },

    /// Accept ownership (second step of the handover)
    ///
    /// Authorization: Proposed owner only
    AcceptOwner {},

    /// Cancel a pending owner proposal
    ///
    /// Authorization: Owner only
    CancelOwnerProposal {},

    /// Set the claim fee
    ///
    /// Authorization: Owner or SuperAdmin
    SetFeeConfig { fee_bps: u64, fee_recipient: String },

    /// Set the minimum delay between publication and claimability (at most 365 days)
    ///
    /// Authorization: Owner or SuperAdmin
    SetSettlementInterval { interval_seconds: u64 },

    /// Pause claims
    ///
    /// Authorization: Owner, SuperAdmin or NormalAdmin
    Pause {},

    /// Resume claims
    ///
    /// Authorization: Owner or SuperAdmin
    Unpause {},

    // ========================================================================
    // Upgrade
    // ========================================================================
    /// Install new logic by migrating this contract to `new_code_id`
    ///
    /// Authorization: Owner only. The contract must be its own chain admin.
    UpgradeTo { new_code_id: u64 },
}

/// CW20 receive hook payloads
#[cw_serde]
pub enum ReceiveMsg {
    /// Credit the received tokens to custody
    Deposit {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    // ========================================================================
    // Core Queries
    // ========================================================================
    /// Returns contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Returns distribution statistics
    #[returns(StatsResponse)]
    Stats {},

    // ========================================================================
    // Role Queries
    // ========================================================================
    /// Returns every role held by an address
    #[returns(RolesResponse)]
    Roles { address: String },

    /// Returns the owner
    #[returns(OwnerResponse)]
    Owner {},

    /// Returns pending owner proposal details
    #[returns(Option<PendingOwnerResponse>)]
    PendingOwner {},

    /// Lists super admins
    #[returns(AdminsResponse)]
    SuperAdmins {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Lists normal admins
    #[returns(AdminsResponse)]
    NormalAdmins {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Returns fee configuration
    #[returns(FeeConfigResponse)]
    FeeConfig {},

    /// Returns the settlement interval
    #[returns(SettlementIntervalResponse)]
    SettlementInterval {},

    /// Net/fee split for a gross amount at the current fee
    #[returns(SimulateClaimResponse)]
    SimulateClaim { amount: Uint128 },

    // ========================================================================
    // Ledger Queries
    // ========================================================================
    /// Returns a published settlement root
    #[returns(Option<EpochResponse>)]
    Epoch { epoch_id: u64 },

    /// Returns the lifecycle state of an epoch (including unpublished)
    #[returns(EpochStatusResponse)]
    EpochStatus { epoch_id: u64 },

    /// Returns the most recently published settlement root
    #[returns(Option<EpochResponse>)]
    LatestEpoch {},

    /// Lists published settlement roots
    #[returns(EpochsResponse)]
    Epochs {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// Whether a leaf has been claimed
    #[returns(IsClaimedResponse)]
    IsClaimed { epoch_id: u64, leaf_index: u32 },

    /// Returns the claim record for a leaf
    #[returns(Option<ClaimRecordResponse>)]
    ClaimRecord { epoch_id: u64, leaf_index: u32 },

    /// Lists claim records of an epoch
    #[returns(ClaimRecordsResponse)]
    ClaimRecords {
        epoch_id: u64,
        start_after: Option<u32>,
        limit: Option<u32>,
    },

    /// Dry-run proof verification against a published root
    #[returns(VerifyProofResponse)]
    VerifyProof {
        epoch_id: u64,
        leaf_index: u32,
        claimant: String,
        amount: Uint128,
        proof: Vec<Binary>,
    },

    /// Compute a leaf the way the ledger does (for tree builders)
    #[returns(ComputeLeafResponse)]
    ComputeLeaf {
        leaf_index: u32,
        claimant: String,
        amount: Uint128,
    },

    // ========================================================================
    // Custody & Upgrade Queries
    // ========================================================================
    /// Returns the tracked custody of the reward asset
    #[returns(CustodyResponse)]
    Custody {},

    /// Returns the installed storage layout manifest
    #[returns(StorageLayoutResponse)]
    StorageLayout {},

    /// Returns the installed logic version
    #[returns(LogicInfoResponse)]
    LogicInfo {},
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub paused: bool,
    pub reward_asset: AssetInfo,
    pub settlement_interval: u64,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_claims: u64,
    pub total_claimed: Uint128,
    pub total_fees: Uint128,
}

#[cw_serde]
pub struct RolesResponse {
    pub address: Addr,
    pub roles: Vec<Role>,
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
}

#[cw_serde]
pub struct PendingOwnerResponse {
    pub new_owner: Addr,
    pub proposed_at: Timestamp,
}

#[cw_serde]
pub struct AdminsResponse {
    pub admins: Vec<Addr>,
}

#[cw_serde]
pub struct FeeConfigResponse {
    pub fee_bps: u64,
    pub fee_recipient: Addr,
}

#[cw_serde]
pub struct SettlementIntervalResponse {
    pub interval_seconds: u64,
}

#[cw_serde]
pub struct SimulateClaimResponse {
    pub gross_amount: Uint128,
    pub net_amount: Uint128,
    pub fee_amount: Uint128,
}

/// Lifecycle of an epoch
#[cw_serde]
pub enum EpochStatus {
    /// No root published
    Unpublished,
    /// Root published, claim window not yet open
    Published,
    /// Claim window open
    Claimable,
}

#[cw_serde]
pub struct EpochResponse {
    pub epoch_id: u64,
    pub root: Binary,
    pub total_leaves: u32,
    pub published_at: Timestamp,
    pub claimable_after: Timestamp,
    pub published_by: Addr,
    pub status: EpochStatus,
}

#[cw_serde]
pub struct EpochStatusResponse {
    pub epoch_id: u64,
    pub status: EpochStatus,
}

#[cw_serde]
pub struct EpochsResponse {
    pub epochs: Vec<EpochResponse>,
}

#[cw_serde]
pub struct IsClaimedResponse {
    pub claimed: bool,
}

#[cw_serde]
pub struct ClaimRecordResponse {
    pub epoch_id: u64,
    pub leaf_index: u32,
    pub claimant: Addr,
    pub gross_amount: Uint128,
    pub net_amount: Uint128,
    pub fee_amount: Uint128,
    pub claimed_at: Timestamp,
}

#[cw_serde]
pub struct ClaimRecordsResponse {
    pub records: Vec<ClaimRecordResponse>,
}

/// Data attached to a successful `Claim` response
#[cw_serde]
pub struct ClaimResultData {
    pub net_amount: Uint128,
    pub fee_amount: Uint128,
}

#[cw_serde]
pub struct VerifyProofResponse {
    pub valid: bool,
}

#[cw_serde]
pub struct ComputeLeafResponse {
    /// keccak256(claimant key ‖ amount)
    pub leaf_value: Binary,
    /// keccak256(leaf index ‖ leaf value)
    pub leaf_hash: Binary,
}

#[cw_serde]
pub struct CustodyResponse {
    pub asset: AssetInfo,
    pub amount: Uint128,
}

#[cw_serde]
pub struct StorageLayoutResponse {
    pub slots: Vec<LayoutSlot>,
}

#[cw_serde]
pub struct LogicInfoResponse {
    pub code_id: u64,
    pub version: String,
    pub installed_at: Timestamp,
}
