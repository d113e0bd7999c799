//! Hash computation for settlement leaves
//!
//! Leaves commit to the claimant and the gross amount owed to them:
//!
//! ```text
//! leaf_value = keccak256(keccak256(claimant_address_utf8) ‖ uint256(amount))
//! ```
//!
//! The claimant is hashed from its address string so that off-chain tree
//! builders do not need the chain's canonical address codec.
//!
//! # Byte Layout of `leaf_value` preimage (64 bytes total)
//! - Bytes 0-31:  keccak256 of the bech32 address string
//! - Bytes 32-63: amount (uint256, big-endian, left-padded)

use cosmwasm_std::{Binary, Uint128};
use tiny_keccak::{Hasher, Keccak};

use crate::error::ContractError;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Encode a u128 as a big-endian uint256 word
pub fn encode_uint256(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// 32-byte key for a claimant address
pub fn claimant_key(claimant: &str) -> [u8; 32] {
    keccak256(claimant.as_bytes())
}

/// Compute the value committed in a settlement leaf for `(claimant, amount)`
pub fn claim_leaf_value(claimant: &str, amount: Uint128) -> [u8; 32] {
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(&claimant_key(claimant));
    data[32..].copy_from_slice(&encode_uint256(amount.u128()));
    keccak256(&data)
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a 32-byte hash from Binary input.
pub fn parse_bytes32(value: &Binary) -> Result<[u8; 32], ContractError> {
    value
        .as_slice()
        .try_into()
        .map_err(|_| ContractError::InvalidHashLength { got: value.len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test keccak256 produces expected output for known input
    #[test]
    fn test_keccak256_basic() {
        // keccak256("hello") = 0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8
        let result = keccak256(b"hello");
        assert_eq!(
            bytes32_to_hex(&result),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            bytes32_to_hex(&keccak256(&[])),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    /// Test amount encoding - verifies left-padding is correct
    #[test]
    fn test_uint256_encoding() {
        let word = encode_uint256(1_000_000_000_000_000_000);

        // First 16 bytes should be zero (left-padding)
        assert_eq!(&word[0..16], &[0u8; 16]);
        assert_eq!(&word[16..], &1_000_000_000_000_000_000u128.to_be_bytes());

        let word = encode_uint256(42);
        assert_eq!(&word[0..31], &[0u8; 31]);
        assert_eq!(word[31], 42);
    }

    #[test]
    fn test_leaf_value_binds_claimant_and_amount() {
        let base = claim_leaf_value("terra1alice", Uint128::from(100u128));

        assert_eq!(base, claim_leaf_value("terra1alice", Uint128::from(100u128)));
        assert_ne!(base, claim_leaf_value("terra1alice", Uint128::from(101u128)));
        assert_ne!(base, claim_leaf_value("terra1bob", Uint128::from(100u128)));
    }

    #[test]
    fn test_leaf_value_preimage_layout() {
        let amount = Uint128::from(5_751_927_000_000_000_000_000_000u128);
        let mut preimage = Vec::with_capacity(64);
        preimage.extend_from_slice(&keccak256(b"terra1alice"));
        preimage.extend_from_slice(&encode_uint256(amount.u128()));

        assert_eq!(claim_leaf_value("terra1alice", amount), keccak256(&preimage));
    }

    #[test]
    fn test_parse_bytes32() {
        let ok = Binary::from(vec![7u8; 32]);
        assert_eq!(parse_bytes32(&ok).unwrap(), [7u8; 32]);

        let short = Binary::from(vec![7u8; 31]);
        assert_eq!(
            parse_bytes32(&short),
            Err(ContractError::InvalidHashLength { got: 31 })
        );
    }

    #[test]
    fn test_bytes32_to_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x2b;
        bytes[31] = 0x96;
        let hex = bytes32_to_hex(&bytes);
        assert_eq!(hex.len(), 66);
        assert!(hex.starts_with("0x2b00"));
        assert!(hex.ends_with("0096"));
    }
}
