//! Error types for the reward distribution contract
//!
//! Every rejection reason is a distinct variant so callers can tell a late
//! claim from a forged proof.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: caller lacks the required role")]
    Unauthorized,

    #[error("No pending owner transfer")]
    NoPendingOwner,

    // ========================================================================
    // Settlement Root Errors
    // ========================================================================

    #[error("Duplicate epoch: root for epoch {epoch_id} already published")]
    DuplicateEpoch { epoch_id: u64 },

    #[error("Epoch not found: {epoch_id}")]
    EpochNotFound { epoch_id: u64 },

    #[error("Invalid epoch: {reason}")]
    InvalidEpoch { reason: String },

    #[error("Invalid settlement interval: {interval_seconds} seconds exceeds maximum {max_seconds}")]
    InvalidSettlementInterval {
        interval_seconds: u64,
        max_seconds: u64,
    },

    #[error("Invalid hash length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },

    // ========================================================================
    // Claim Errors
    // ========================================================================

    #[error("Distribution is paused")]
    Paused,

    #[error("Epoch {epoch_id} not yet claimable: {remaining_seconds} seconds remaining")]
    NotYetClaimable {
        epoch_id: u64,
        remaining_seconds: u64,
    },

    #[error("Already claimed: epoch {epoch_id}, leaf {leaf_index}")]
    AlreadyClaimed { epoch_id: u64, leaf_index: u32 },

    #[error("Invalid merkle proof for epoch {epoch_id}, leaf {leaf_index}")]
    InvalidProof { epoch_id: u64, leaf_index: u32 },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    // ========================================================================
    // Fee Errors
    // ========================================================================

    #[error("Invalid fee: {fee_bps} bps exceeds maximum {max_bps}")]
    InvalidFeeBps { fee_bps: u64, max_bps: u64 },

    // ========================================================================
    // Custody Errors
    // ========================================================================

    #[error("Insufficient custody: available {available}, requested {requested}")]
    InsufficientCustody {
        available: Uint128,
        requested: Uint128,
    },

    #[error("Invalid asset: {reason}")]
    InvalidAsset { reason: String },

    #[error("Asset recovery only available when distribution is paused")]
    RecoveryNotAvailable,

    // ========================================================================
    // Upgrade Errors
    // ========================================================================

    #[error("Incompatible storage layout: {reason}")]
    IncompatibleLayout { reason: String },

    #[error("Contract name mismatch: stored {stored}, expected {expected}")]
    ContractNameMismatch { stored: String, expected: String },
}
