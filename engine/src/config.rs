//! Engine configuration.

use forkchain_primitives::{Error, Result, MAX_BLOCK_TRANSACTIONS};
use serde::{Deserialize, Serialize};

/// Configuration for block validation and seal search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum transactions per block. Default: 900.
    pub max_block_transactions: usize,

    /// Upper bound on nonces tried by `ProofOfWork::mine_with_config`.
    pub max_nonce_attempts: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_block_transactions: MAX_BLOCK_TRANSACTIONS,
            max_nonce_attempts: 1_000_000,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}
