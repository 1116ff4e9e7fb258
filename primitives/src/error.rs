//! Error types for the forkchain ledger.
//!
//! Block validation never returns these: a rejected block is a
//! [`Verdict`](crate::verdict::Verdict), not an error. `Error` covers
//! malformed references and ledger-index bookkeeping failures.

use thiserror::Error;

/// Primary error type used by the primitives and the ledger index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An input reference that is not `<64 hex digits>:<index>`.
    #[error("malformed input reference `{0}`")]
    MalformedInputRef(String),

    /// A block with this hash is already registered.
    #[error("block {0} is already in the ledger")]
    DuplicateBlock(String),

    /// A non-genesis block whose parent is not registered.
    #[error("parent {0} is not in the ledger")]
    UnknownParent(String),

    /// A lookup for a block hash the ledger does not know.
    #[error("block {0} is not in the ledger")]
    UnknownBlock(String),

    /// A ledger lock was poisoned by a panicking writer.
    #[error("ledger lock poisoned")]
    LockPoisoned,

    /// Engine configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for the ledger.
pub type Result<T> = core::result::Result<T, Error>;
