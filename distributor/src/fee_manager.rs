//! Fee Manager Module
//!
//! Claims pay a flat fee in basis points to the configured fee recipient.
//!
//! `fee = floor(gross * fee_bps / 10000)` and `net = gross - fee`, so
//! `net + fee == gross` holds exactly for every rate in `[0, 10000]`.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};

use crate::error::ContractError;

// ============================================================================
// Constants
// ============================================================================

/// Maximum fee in basis points (100%)
pub const MAX_FEE_BPS: u64 = 10_000;

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u128 = 10_000;

// ============================================================================
// Data Structures
// ============================================================================

/// Fee configuration parameters
#[cw_serde]
pub struct FeeConfig {
    /// Fee in basis points taken from every claim
    pub fee_bps: u64,
    /// Address to receive collected fees
    pub fee_recipient: Addr,
}

impl FeeConfig {
    pub fn new(fee_bps: u64, fee_recipient: Addr) -> Result<Self, ContractError> {
        validate_fee_bps(fee_bps)?;
        Ok(Self {
            fee_bps,
            fee_recipient,
        })
    }

    /// Split a gross amount into `(net, fee)` at this config's rate.
    pub fn split(&self, gross: Uint128) -> (Uint128, Uint128) {
        split_amount(gross, self.fee_bps)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Calculate fee amount from amount and bps (floor division)
pub fn calculate_fee_from_bps(amount: Uint128, fee_bps: u64) -> Uint128 {
    amount.multiply_ratio(fee_bps as u128, BPS_DENOMINATOR)
}

/// Split `gross` into `(net, fee)`.
pub fn split_amount(gross: Uint128, fee_bps: u64) -> (Uint128, Uint128) {
    // bps is capped at 10000 so fee <= gross
    let fee = calculate_fee_from_bps(gross, fee_bps.min(MAX_FEE_BPS));
    (gross - fee, fee)
}

/// Validate a fee rate is within `[0, 10000]`
pub fn validate_fee_bps(fee_bps: u64) -> Result<(), ContractError> {
    if fee_bps > MAX_FEE_BPS {
        return Err(ContractError::InvalidFeeBps {
            fee_bps,
            max_bps: MAX_FEE_BPS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_fee_from_bps() {
        // 0.5% of 1000 = 5
        let fee = calculate_fee_from_bps(Uint128::from(1000u128), 50);
        assert_eq!(fee, Uint128::from(5u128));

        // 100% of 1000 = 1000
        let fee = calculate_fee_from_bps(Uint128::from(1000u128), 10_000);
        assert_eq!(fee, Uint128::from(1000u128));

        // 0% of 1000 = 0
        let fee = calculate_fee_from_bps(Uint128::from(1000u128), 0);
        assert_eq!(fee, Uint128::zero());
    }

    #[test]
    fn test_fee_truncates_toward_zero() {
        // 0.3% of 999 = 2.997 -> 2
        let (net, fee) = split_amount(Uint128::from(999u128), 30);
        assert_eq!(fee, Uint128::from(2u128));
        assert_eq!(net, Uint128::from(997u128));
    }

    #[test]
    fn test_split_conserves_gross() {
        let amounts = [
            0u128,
            1,
            7,
            9_999,
            10_001,
            5_751_927_000_000_000_000_000_000,
            u128::MAX,
        ];
        let rates = [0u64, 1, 30, 50, 333, 5_000, 9_999, 10_000];

        for amount in amounts {
            for bps in rates {
                let gross = Uint128::new(amount);
                let (net, fee) = split_amount(gross, bps);
                assert_eq!(net + fee, gross, "amount {} bps {}", amount, bps);
                assert!(fee <= gross);
            }
        }
    }

    #[test]
    fn test_validate_fee_bps() {
        assert!(validate_fee_bps(0).is_ok());
        assert!(validate_fee_bps(50).is_ok());
        assert!(validate_fee_bps(10_000).is_ok());

        assert_eq!(
            validate_fee_bps(10_001),
            Err(ContractError::InvalidFeeBps {
                fee_bps: 10_001,
                max_bps: 10_000,
            })
        );
    }

    #[test]
    fn test_fee_config_split() {
        let config = FeeConfig::new(50, Addr::unchecked("terra1fees")).unwrap();
        let (net, fee) = config.split(Uint128::from(1000u128));
        assert_eq!(net, Uint128::from(995u128));
        assert_eq!(fee, Uint128::from(5u128));

        assert!(FeeConfig::new(10_001, Addr::unchecked("terra1fees")).is_err());
    }
}
