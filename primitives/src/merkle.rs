//! Positional Merkle accumulator over an ordered transaction list.
//!
//! The root commits to the exact sequence of transactions: reordering the
//! list changes the root. Construction:
//!
//! - 0 transactions: `H("")`
//! - 1 transaction: `H(canonical(tx))`
//! - n ≥ 2: leaves `H(canonical(tx_i))` padded with `H("")` up to the next
//!   power of two, then each parent is `H(hex(left) ++ hex(right))`
//!
//! where `H` is SHA-256². Siblings are never sorted.

use crate::crypto::double_sha256_str;
use crate::transaction::Transaction;
use crate::types::{hash_to_hex, Hash};

/// Fully materialized Merkle tree; `levels()[0]` holds the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build the tree for `transactions` in the order given.
    pub fn build(transactions: &[Transaction]) -> Self {
        match transactions.len() {
            0 => Self {
                levels: vec![vec![empty_leaf()]],
            },
            1 => Self {
                levels: vec![vec![leaf_hash(&transactions[0])]],
            },
            count => {
                let width = count.next_power_of_two();
                let mut leaves: Vec<Hash> = transactions.iter().map(leaf_hash).collect();
                leaves.resize(width, empty_leaf());

                let mut levels = vec![leaves];
                while levels[0].len() > 1 {
                    let parents = levels[0]
                        .chunks_exact(2)
                        .map(|pair| hash_internal(&pair[0], &pair[1]))
                        .collect();
                    levels.insert(0, parents);
                }
                Self { levels }
            }
        }
    }

    pub fn root(&self) -> Hash {
        self.levels[0][0]
    }

    /// All levels, root first, leaves (including padding) last.
    pub fn levels(&self) -> &[Vec<Hash>] {
        &self.levels
    }

    /// Number of leaf slots, padding included.
    pub fn leaf_count(&self) -> usize {
        self.levels.last().map_or(0, Vec::len)
    }
}

/// Compute the Merkle root of `transactions`.
///
/// An empty list has root [`empty_leaf`], a single SHA-256² of the empty
/// string. It is not SHA-256² applied to that digest again.
pub fn merkle_root(transactions: &[Transaction]) -> Hash {
    MerkleTree::build(transactions).root()
}

/// Padding leaf and empty-list root: `H("")`.
pub fn empty_leaf() -> Hash {
    double_sha256_str("")
}

fn leaf_hash(tx: &Transaction) -> Hash {
    double_sha256_str(&tx.canonical())
}

/// Parent node: `H(hex(left) ++ hex(right))`.
fn hash_internal(left: &Hash, right: &Hash) -> Hash {
    let mut joined = hash_to_hex(left);
    joined.push_str(&hash_to_hex(right));
    double_sha256_str(&joined)
}
