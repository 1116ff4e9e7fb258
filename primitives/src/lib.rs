//! `forkchain-primitives`: foundational types for the forkchain ledger.
//!
//! This crate provides the hashing utility, the positional Merkle
//! accumulator, the block and transaction entities, and the verdict
//! taxonomy shared by the validity engine and its callers.

pub mod types;
pub mod error;
pub mod crypto;
pub mod transaction;
pub mod merkle;
pub mod block;
pub mod verdict;

// Re-export commonly used types at the crate root for convenience.
pub use types::{
    Address, BlockHeight, Hash, Target, Timestamp, GENESIS_PARENT, MAX_BLOCK_TRANSACTIONS,
};
pub use error::{Error, Result};
pub use transaction::{InputRef, OutPoint, Transaction, TxOutput};
pub use merkle::{merkle_root, MerkleTree};
pub use block::{Block, BlockTemplate, ParentRef, SealData};
pub use verdict::{ReasonCode, Rejection, Verdict};
