//! Reward Distribution Contract - Merkle Claim Ledger for TerraClassic
//!
//! Distributes a bridge-wrapped reward asset to many recipients per
//! settlement epoch. Off-chain settlement builds a merkle tree over
//! `(claimant, amount)` leaves and publishes only the root.
//!
//! # Claim Flow
//! 1. Owner or SuperAdmin publishes the epoch root (`PublishRoot`)
//! 2. The root becomes claimable after the settlement interval
//! 3. Anyone submits `(leaf_index, amount, proof)` for a claimant
//! 4. The leaf is marked in the claim bitmap, then net amount and fee are
//!    paid out of custody
//!
//! # Security
//! - Replay protection via a per-epoch bitmap, written before any payout
//! - Tiered role registry with two-step owner handover
//! - Owner-gated upgrades with a storage layout compatibility check
//! - Emergency pause functionality

pub mod bitmap;
pub mod contract;
pub mod custody;
pub mod error;
mod execute;
pub mod fee_manager;
pub mod hash;
pub mod layout;
pub mod merkle;
pub mod msg;
mod query;
pub mod roles;
pub mod state;

pub use crate::error::ContractError;
pub use crate::execute::{process_claim, ClaimOutcome, ClaimRequest};
pub use crate::fee_manager::{calculate_fee_from_bps, FeeConfig};
pub use crate::hash::{claim_leaf_value, keccak256};
pub use crate::merkle::MerkleTree;
