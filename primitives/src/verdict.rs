//! Outcome of a block validity check.
//!
//! A verdict is either acceptance or the first violated rule. Rules are
//! checked in a fixed order and never aggregated, so each rejection names
//! exactly one invariant.

use thiserror::Error;

/// The rule a rejected block violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Rejection {
    #[error("Merkle root failed to match")]
    MerkleMismatch,
    #[error("Hash failed to match")]
    HashMismatch,
    #[error("Too many transactions")]
    TooManyTransactions,
    #[error("Invalid genesis")]
    InvalidGenesis,
    #[error("Nonexistent parent")]
    NonexistentParent,
    #[error("Invalid height")]
    InvalidHeight,
    #[error("Invalid timestamp")]
    InvalidTimestamp,
    #[error("Invalid seal")]
    InvalidSeal,
    #[error("Malformed transaction included")]
    MalformedTransaction,
    #[error("Double transaction inclusion")]
    DoubleTransactionInclusion,
    #[error("Double-spent input")]
    DoubleSpentInput,
    #[error("Required output not found")]
    RequiredOutputNotFound,
    #[error("Input transaction not found")]
    InputTransactionNotFound,
    #[error("User inconsistencies")]
    UserInconsistency,
    #[error("Creating money")]
    CreatingMoney,
}

impl Rejection {
    /// Human-readable reason, identical to the `Display` form.
    pub fn message(self) -> &'static str {
        match self {
            Self::MerkleMismatch => "Merkle root failed to match",
            Self::HashMismatch => "Hash failed to match",
            Self::TooManyTransactions => "Too many transactions",
            Self::InvalidGenesis => "Invalid genesis",
            Self::NonexistentParent => "Nonexistent parent",
            Self::InvalidHeight => "Invalid height",
            Self::InvalidTimestamp => "Invalid timestamp",
            Self::InvalidSeal => "Invalid seal",
            Self::MalformedTransaction => "Malformed transaction included",
            Self::DoubleTransactionInclusion => "Double transaction inclusion",
            Self::DoubleSpentInput => "Double-spent input",
            Self::RequiredOutputNotFound => "Required output not found",
            Self::InputTransactionNotFound => "Input transaction not found",
            Self::UserInconsistency => "User inconsistencies",
            Self::CreatingMoney => "Creating money",
        }
    }
}

/// Enumerated reason codes, acceptance included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    AllChecksPassed,
    MerkleMismatch,
    HashMismatch,
    TooManyTransactions,
    InvalidGenesis,
    NonexistentParent,
    InvalidHeight,
    InvalidTimestamp,
    InvalidSeal,
    MalformedTransaction,
    DoubleTransactionInclusion,
    DoubleSpentInput,
    RequiredOutputNotFound,
    InputTransactionNotFound,
    UserInconsistency,
    CreatingMoney,
}

impl From<Rejection> for ReasonCode {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::MerkleMismatch => Self::MerkleMismatch,
            Rejection::HashMismatch => Self::HashMismatch,
            Rejection::TooManyTransactions => Self::TooManyTransactions,
            Rejection::InvalidGenesis => Self::InvalidGenesis,
            Rejection::NonexistentParent => Self::NonexistentParent,
            Rejection::InvalidHeight => Self::InvalidHeight,
            Rejection::InvalidTimestamp => Self::InvalidTimestamp,
            Rejection::InvalidSeal => Self::InvalidSeal,
            Rejection::MalformedTransaction => Self::MalformedTransaction,
            Rejection::DoubleTransactionInclusion => Self::DoubleTransactionInclusion,
            Rejection::DoubleSpentInput => Self::DoubleSpentInput,
            Rejection::RequiredOutputNotFound => Self::RequiredOutputNotFound,
            Rejection::InputTransactionNotFound => Self::InputTransactionNotFound,
            Rejection::UserInconsistency => Self::UserInconsistency,
            Rejection::CreatingMoney => Self::CreatingMoney,
        }
    }
}

/// Result of validating one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

/// Message reported for an accepted block.
pub const ALL_CHECKS_PASSED: &str = "All checks passed";

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Accepted => None,
            Self::Rejected(rejection) => Some(*rejection),
        }
    }

    pub fn code(&self) -> ReasonCode {
        match self {
            Self::Accepted => ReasonCode::AllChecksPassed,
            Self::Rejected(rejection) => (*rejection).into(),
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::Accepted => ALL_CHECKS_PASSED,
            Self::Rejected(rejection) => rejection.message(),
        }
    }

    /// The `(accepted, reason)` pair.
    pub fn into_pair(self) -> (bool, &'static str) {
        (self.is_accepted(), self.reason())
    }
}

impl From<Result<(), Rejection>> for Verdict {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Self::Accepted,
            Err(rejection) => Self::Rejected(rejection),
        }
    }
}
