//! Execute handlers for the reward distribution contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `claim` - Root publication and merkle claims
//! - `roles` - Admin tiers, owner handover, fee config
//! - `admin` - Pause, settlement interval, asset recovery
//! - `custody` - Funding the reward asset
//! - `upgrade` - Owner-requested logic upgrades

mod admin;
mod claim;
mod custody;
mod roles;
mod upgrade;

pub use admin::*;
pub use claim::*;
pub use custody::*;
pub use roles::*;
pub use upgrade::*;
