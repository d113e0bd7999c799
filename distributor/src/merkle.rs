//! Merkle proof verification for settlement roots.
//!
//! Leaf hash: `keccak256(uint256(leaf_index) ‖ leaf_value)`.
//! Internal nodes: `keccak256(left ‖ right)`.
//!
//! Sibling ordering is decided by index parity, never by sorting: at each
//! level an even index puts the running hash on the left, an odd index on the
//! right, and the index is halved before the next level. Trees whose leaf
//! count is not a power of two are padded with `[0u8; 32]` leaves, so a tree
//! of `n` leaves always has depth `ceil(log2(n))`.

use crate::hash::{encode_uint256, keccak256};

/// Zero digest used to pad the leaf layer.
pub const EMPTY_LEAF: [u8; 32] = [0u8; 32];

/// Hash a leaf from its index and committed value.
pub fn leaf_hash(leaf_index: u32, leaf_value: &[u8]) -> [u8; 32] {
    let mut data = Vec::with_capacity(32 + leaf_value.len());
    data.extend_from_slice(&encode_uint256(leaf_index as u128));
    data.extend_from_slice(leaf_value);
    keccak256(&data)
}

/// Hash two child nodes to produce a parent.
pub fn hash_pair(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(left);
    data[32..].copy_from_slice(right);
    keccak256(&data)
}

/// Tree depth for `total_leaves` leaves (0 for a single leaf).
pub fn tree_depth(total_leaves: u32) -> usize {
    if total_leaves <= 1 {
        return 0;
    }
    (32 - (total_leaves - 1).leading_zeros()) as usize
}

/// Verify `leaf_value` sits at `leaf_index` in a tree of `total_leaves`
/// leaves committed to by `root`.
///
/// Returns `false` for an empty tree, an out-of-range index, a proof whose
/// length differs from the tree depth, or a root mismatch.
pub fn verify(
    root: &[u8; 32],
    leaf_index: u32,
    leaf_value: &[u8],
    proof: &[[u8; 32]],
    total_leaves: u32,
) -> bool {
    if total_leaves == 0 || leaf_index >= total_leaves {
        return false;
    }
    if proof.len() != tree_depth(total_leaves) {
        return false;
    }
    compute_root(leaf_index, leaf_hash(leaf_index, leaf_value), proof) == *root
}

/// Fold a proof path from a leaf hash up to a root.
pub fn compute_root(leaf_index: u32, leaf: [u8; 32], proof: &[[u8; 32]]) -> [u8; 32] {
    let mut current = leaf;
    let mut idx = leaf_index;
    for sibling in proof {
        current = if idx % 2 == 0 {
            hash_pair(&current, sibling)
        } else {
            hash_pair(sibling, &current)
        };
        idx /= 2;
    }
    current
}

/// A binary Merkle tree built with the same convention `verify` accepts.
///
/// Used by off-chain tooling to produce roots and proofs for an epoch.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// All nodes stored level by level, bottom-up. `layers[0]` = padded leaves.
    layers: Vec<Vec<[u8; 32]>>,
    leaf_count: u32,
}

impl MerkleTree {
    /// Build a tree from leaf values; leaf `i` is hashed with index `i`.
    pub fn from_values<V: AsRef<[u8]>>(values: &[V]) -> Self {
        let leaves = values
            .iter()
            .enumerate()
            .map(|(i, value)| leaf_hash(i as u32, value.as_ref()))
            .collect();
        Self::from_leaf_hashes(leaves)
    }

    /// Build a tree from already-hashed leaves.
    pub fn from_leaf_hashes(leaves: Vec<[u8; 32]>) -> Self {
        let leaf_count = leaves.len() as u32;
        let padded_len = leaves.len().max(1).next_power_of_two();
        let mut padded = leaves;
        padded.resize(padded_len, EMPTY_LEAF);

        let mut layers = vec![padded];
        loop {
            let prev = &layers[layers.len() - 1];
            if prev.len() <= 1 {
                break;
            }
            let next: Vec<[u8; 32]> = prev
                .chunks(2)
                .map(|pair| hash_pair(&pair[0], &pair[1]))
                .collect();
            layers.push(next);
        }

        Self { layers, leaf_count }
    }

    pub fn root(&self) -> [u8; 32] {
        self.layers[self.layers.len() - 1][0]
    }

    pub fn leaf_count(&self) -> u32 {
        self.leaf_count
    }

    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Sibling path for the leaf at `leaf_index`, bottom-up.
    ///
    /// Returns `None` for indices outside the real (unpadded) leaves.
    pub fn proof(&self, leaf_index: u32) -> Option<Vec<[u8; 32]>> {
        if leaf_index >= self.leaf_count {
            return None;
        }

        let mut siblings = Vec::with_capacity(self.depth());
        let mut idx = leaf_index as usize;
        for layer in &self.layers[..self.layers.len() - 1] {
            siblings.push(layer[idx ^ 1]);
            idx /= 2;
        }
        Some(siblings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(n: usize) -> Vec<Vec<u8>> {
        (0..n)
            .map(|i| keccak256(format!("leaf-{}", i).as_bytes()).to_vec())
            .collect()
    }

    #[test]
    fn test_tree_depth() {
        assert_eq!(tree_depth(0), 0);
        assert_eq!(tree_depth(1), 0);
        assert_eq!(tree_depth(2), 1);
        assert_eq!(tree_depth(3), 2);
        assert_eq!(tree_depth(4), 2);
        assert_eq!(tree_depth(5), 3);
        assert_eq!(tree_depth(8), 3);
        assert_eq!(tree_depth(9), 4);
        assert_eq!(tree_depth(u32::MAX), 32);
    }

    #[test]
    fn test_every_leaf_verifies() {
        for n in [1usize, 2, 3, 5, 8, 13] {
            let vals = values(n);
            let tree = MerkleTree::from_values(&vals);
            assert_eq!(tree.depth(), tree_depth(n as u32));

            for (i, value) in vals.iter().enumerate() {
                let proof = tree.proof(i as u32).unwrap();
                assert!(
                    verify(&tree.root(), i as u32, value, &proof, n as u32),
                    "leaf {} of {}",
                    i,
                    n
                );
            }
        }
    }

    #[test]
    fn test_single_leaf_tree_root_is_leaf_hash() {
        let vals = values(1);
        let tree = MerkleTree::from_values(&vals);
        assert_eq!(tree.root(), leaf_hash(0, &vals[0]));
        assert!(tree.proof(0).unwrap().is_empty());
        assert!(verify(&tree.root(), 0, &vals[0], &[], 1));
    }

    #[test]
    fn test_flipped_proof_bit_rejected() {
        let vals = values(5);
        let tree = MerkleTree::from_values(&vals);
        let proof = tree.proof(3).unwrap();

        for level in 0..proof.len() {
            for bit in [0usize, 7, 128, 255] {
                let mut tampered = proof.clone();
                tampered[level][bit / 8] ^= 1 << (bit % 8);
                assert!(!verify(&tree.root(), 3, &vals[3], &tampered, 5));
            }
        }
    }

    #[test]
    fn test_flipped_leaf_bit_rejected() {
        let vals = values(4);
        let tree = MerkleTree::from_values(&vals);
        let proof = tree.proof(2).unwrap();

        for bit in 0..256usize {
            let mut tampered = vals[2].clone();
            tampered[bit / 8] ^= 1 << (bit % 8);
            assert!(!verify(&tree.root(), 2, &tampered, &proof, 4));
        }
    }

    #[test]
    fn test_wrong_index_rejected() {
        let vals = values(4);
        let tree = MerkleTree::from_values(&vals);
        let proof = tree.proof(1).unwrap();

        assert!(!verify(&tree.root(), 0, &vals[1], &proof, 4));
        assert!(!verify(&tree.root(), 3, &vals[1], &proof, 4));
    }

    #[test]
    fn test_malformed_proof_length_rejected() {
        let vals = values(4);
        let tree = MerkleTree::from_values(&vals);
        let mut proof = tree.proof(0).unwrap();

        let mut short = proof.clone();
        short.pop();
        assert!(!verify(&tree.root(), 0, &vals[0], &short, 4));

        proof.push([0u8; 32]);
        assert!(!verify(&tree.root(), 0, &vals[0], &proof, 4));

        // Same valid proof, but claimed against a larger tree
        let proof = tree.proof(0).unwrap();
        assert!(!verify(&tree.root(), 0, &vals[0], &proof, 5));
    }

    #[test]
    fn test_out_of_range_and_empty_rejected() {
        let vals = values(3);
        let tree = MerkleTree::from_values(&vals);

        assert!(tree.proof(3).is_none());
        // Index 3 is a padding leaf: never claimable
        let padding_proof = vec![tree.layers[0][2], tree.layers[1][0]];
        assert!(!verify(&tree.root(), 3, &EMPTY_LEAF, &padding_proof, 3));
        assert!(!verify(&tree.root(), 0, &vals[0], &[], 0));
    }

    #[test]
    fn test_parity_ordering_is_not_sorted() {
        // With sorted pairs, swapping siblings would not change the root.
        let vals = values(2);
        let tree = MerkleTree::from_values(&vals);
        let l0 = leaf_hash(0, &vals[0]);
        let l1 = leaf_hash(1, &vals[1]);

        assert_eq!(tree.root(), hash_pair(&l0, &l1));
        assert_ne!(tree.root(), hash_pair(&l1, &l0));
    }
}
