//! Per-epoch claimed-leaf bitmap.
//!
//! Bits are packed 64 to a word under `(epoch_id, leaf_index / 64)`. A set bit
//! is never cleared.

use cosmwasm_std::{StdResult, Storage};

use crate::error::ContractError;
use crate::state::CLAIM_BITMAP;

const WORD_BITS: u32 = 64;

fn word_position(leaf_index: u32) -> (u32, u64) {
    (leaf_index / WORD_BITS, 1u64 << (leaf_index % WORD_BITS))
}

/// Whether `leaf_index` of `epoch_id` has been claimed.
pub fn is_claimed(storage: &dyn Storage, epoch_id: u64, leaf_index: u32) -> StdResult<bool> {
    let (word_index, mask) = word_position(leaf_index);
    let word = CLAIM_BITMAP
        .may_load(storage, (epoch_id, word_index))?
        .unwrap_or(0);
    Ok(word & mask == mask)
}

/// Mark `leaf_index` of `epoch_id` as claimed.
///
/// Fails with `AlreadyClaimed` if the bit is already set.
pub fn set_claimed(
    storage: &mut dyn Storage,
    epoch_id: u64,
    leaf_index: u32,
) -> Result<(), ContractError> {
    let (word_index, mask) = word_position(leaf_index);
    let word = CLAIM_BITMAP
        .may_load(storage, (epoch_id, word_index))?
        .unwrap_or(0);
    if word & mask == mask {
        return Err(ContractError::AlreadyClaimed {
            epoch_id,
            leaf_index,
        });
    }
    CLAIM_BITMAP.save(storage, (epoch_id, word_index), &(word | mask))?;
    Ok(())
}
