//! `forkchain-engine`: fork-aware block validity engine.
//!
//! Given a candidate block, a ledger of every block accepted so far (across
//! all forks), and a consensus seal mechanism, the engine decides whether
//! the block may be appended. All economic rules are evaluated against the
//! candidate's own ancestry, so sibling forks may legitimately spend the
//! same output.
//!
//! ## Architecture
//!
//! - [`ledger::LedgerView`]: read-only view the validator consumes
//! - [`ledger::Ledger`]: in-memory, append-only multi-fork index
//! - [`consensus::SealMechanism`]: target selection and seal verification
//! - [`validator::BlockValidator`]: ordered validity rules, returns a [`Verdict`]
//! - [`shared::SharedLedger`]: read/write-locked handle for concurrent use
//! - [`config::EngineConfig`]: validation and seal-search limits
//!
//! [`Verdict`]: forkchain_primitives::Verdict

pub mod config;
pub mod consensus;
pub mod ledger;
pub mod shared;
pub mod validator;

// Re-export key types for convenience
pub use config::EngineConfig;
pub use consensus::{ProofOfAuthority, ProofOfWork, SealMechanism};
pub use ledger::{Ledger, LedgerView};
pub use shared::SharedLedger;
pub use validator::BlockValidator;
