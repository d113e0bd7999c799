//! State definitions for the reward distribution contract
//!
//! Every storage namespace is declared once as an `NS_*` constant. The same
//! constants feed the compiled storage layout manifest in `layout.rs`, so a
//! namespace can never silently change meaning between logic versions.

use common::AssetInfo;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

use crate::fee_manager::FeeConfig;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Whether claims are currently paused
    pub paused: bool,
    /// Asset paid out to claimants (held in custody by this contract)
    pub reward_asset: AssetInfo,
    /// Minimum delay between root publication and the root becoming claimable
    pub settlement_interval: u64,
}

/// Pending two-step owner handover
#[cw_serde]
pub struct PendingOwner {
    /// Proposed new owner
    pub new_owner: Addr,
    /// Block time of the proposal
    pub proposed_at: Timestamp,
}

/// Distribution statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    /// Number of successful claims
    pub total_claims: u64,
    /// Sum of gross claimed amounts
    pub total_claimed: Uint128,
    /// Sum of fees sent to the fee recipient
    pub total_fees: Uint128,
}

// ============================================================================
// Claim Ledger Structures
// ============================================================================

/// A published settlement root. Immutable once stored.
#[cw_serde]
pub struct SettlementRoot {
    pub epoch_id: u64,
    /// Merkle root over all leaves of the epoch
    pub root: [u8; 32],
    /// Number of leaves in the tree (bounds the claim bitmap)
    pub total_leaves: u32,
    pub published_at: Timestamp,
    pub claimable_after: Timestamp,
    pub published_by: Addr,
}

/// Append-only evidence of a payout
#[cw_serde]
pub struct ClaimRecord {
    pub epoch_id: u64,
    pub leaf_index: u32,
    pub claimant: Addr,
    pub gross_amount: Uint128,
    pub net_amount: Uint128,
    pub fee_amount: Uint128,
    pub claimed_at: Timestamp,
}

// ============================================================================
// Upgrade Structures
// ============================================================================

/// Upgrade requested by the owner and not yet applied by `migrate`
#[cw_serde]
pub struct PendingUpgrade {
    pub new_code_id: u64,
    pub requested_by: Addr,
    pub requested_at: Timestamp,
}

/// Currently installed logic version
#[cw_serde]
pub struct LogicInfo {
    /// Code id of the installed logic (0 until the first upgrade)
    pub code_id: u64,
    /// cw2 version string of the installed logic
    pub version: String,
    pub installed_at: Timestamp,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:btc-layer2-distributor";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default settlement interval in seconds (24 hours)
pub const DEFAULT_SETTLEMENT_INTERVAL: u64 = 86_400;

/// Maximum settlement interval in seconds (365 days)
pub const MAX_SETTLEMENT_INTERVAL: u64 = 365 * 86_400;

/// Largest second count a `Timestamp` can hold without overflowing nanoseconds
pub const MAX_TIMESTAMP_SECONDS: u64 = u64::MAX / 1_000_000_000;

/// Default page size for paginated queries
pub const DEFAULT_LIMIT: u32 = 10;

/// Maximum page size for paginated queries
pub const MAX_LIMIT: u32 = 30;

// ============================================================================
// Storage Namespaces
// ============================================================================

/// Namespace used by `cw2` for contract name/version
pub const NS_CONTRACT_INFO: &str = "contract_info";
pub const NS_CONFIG: &str = "config";
pub const NS_OWNER: &str = "owner";
pub const NS_PENDING_OWNER: &str = "pending_owner";
pub const NS_SUPER_ADMINS: &str = "super_admins";
pub const NS_NORMAL_ADMINS: &str = "normal_admins";
pub const NS_FEE_CONFIG: &str = "fee_config";
pub const NS_EPOCHS: &str = "epochs";
pub const NS_LATEST_EPOCH: &str = "latest_epoch";
pub const NS_CLAIM_BITMAP: &str = "claim_bitmap";
pub const NS_CLAIM_RECORDS: &str = "claim_records";
pub const NS_CUSTODY: &str = "custody";
pub const NS_STATS: &str = "stats";
pub const NS_STORAGE_LAYOUT: &str = "storage_layout";
pub const NS_LOGIC_INFO: &str = "logic_info";
pub const NS_PENDING_UPGRADE: &str = "pending_upgrade";

// ============================================================================
// Core State Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new(NS_CONFIG);

/// Distribution statistics
pub const STATS: Item<Stats> = Item::new(NS_STATS);

// ============================================================================
// Role Registry State
// ============================================================================

/// The single contract owner
pub const OWNER: Item<Addr> = Item::new(NS_OWNER);

/// Pending owner handover (if any)
pub const PENDING_OWNER: Item<PendingOwner> = Item::new(NS_PENDING_OWNER);

/// Super admin set
/// Key: address, Value: whether active
pub const SUPER_ADMINS: Map<&Addr, bool> = Map::new(NS_SUPER_ADMINS);

/// Normal admin set
/// Key: address, Value: whether active
pub const NORMAL_ADMINS: Map<&Addr, bool> = Map::new(NS_NORMAL_ADMINS);

/// Fee configuration (basis points + recipient)
pub const FEE_CONFIG: Item<FeeConfig> = Item::new(NS_FEE_CONFIG);

// ============================================================================
// Claim Ledger State
// ============================================================================

/// Published settlement roots
/// Key: epoch id, Value: SettlementRoot
pub const EPOCHS: Map<u64, SettlementRoot> = Map::new(NS_EPOCHS);

/// Most recently published epoch id
pub const LATEST_EPOCH: Item<u64> = Item::new(NS_LATEST_EPOCH);

/// Claimed bits, 64 leaves per word
/// Key: (epoch id, word index), Value: bit word
pub const CLAIM_BITMAP: Map<(u64, u32), u64> = Map::new(NS_CLAIM_BITMAP);

/// Claim history
/// Key: (epoch id, leaf index), Value: ClaimRecord
pub const CLAIM_RECORDS: Map<(u64, u32), ClaimRecord> = Map::new(NS_CLAIM_RECORDS);

// ============================================================================
// Custody State
// ============================================================================

/// Tracked custody balance per asset
/// Key: asset key (denom or CW20 address), Value: amount held
pub const CUSTODY: Map<&str, Uint128> = Map::new(NS_CUSTODY);

// ============================================================================
// Upgrade State
// ============================================================================

/// Storage layout manifest written by the installed logic
pub const STORAGE_LAYOUT: Item<Vec<crate::layout::LayoutSlot>> = Item::new(NS_STORAGE_LAYOUT);

/// Installed logic version
pub const LOGIC_INFO: Item<LogicInfo> = Item::new(NS_LOGIC_INFO);

/// Owner-requested upgrade awaiting `migrate`
pub const PENDING_UPGRADE: Item<PendingUpgrade> = Item::new(NS_PENDING_UPGRADE);
