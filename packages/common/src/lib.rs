//! Common - Shared Types and Utilities for the BTC Layer2 Bridge Contracts
//!
//! This package provides the asset definitions shared by the bridge custody
//! layer and the reward distribution contract.

pub mod asset;

pub use asset::AssetInfo;
