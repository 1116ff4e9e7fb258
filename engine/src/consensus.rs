//! Consensus seal capability.
//!
//! The validator only asks two questions of a consensus mechanism: which
//! target a new block should carry, and whether a block's seal is valid.
//! [`SealMechanism`] is that seam; [`ProofOfWork`] and [`ProofOfAuthority`]
//! are the two mechanisms shipped with the engine.

use ed25519_dalek::{SigningKey, VerifyingKey};
use forkchain_primitives::{
    crypto::{sign_ed25519, verify_ed25519},
    Block, BlockTemplate, SealData, Target,
};

use crate::config::EngineConfig;

/// Consensus-specific target selection and seal verification.
pub trait SealMechanism {
    /// Target a block built from `template` should carry.
    fn calculate_appropriate_target(&self, template: &BlockTemplate) -> Target;

    /// True iff `block.seal_data` is a valid seal for the block.
    fn seal_is_valid(&self, block: &Block) -> bool;

    /// Consensus weight contributed by `block`.
    fn weight(&self, block: &Block) -> u64;

    /// Build a block, filling in this mechanism's target when the template
    /// carries none.
    fn build_block(&self, template: BlockTemplate) -> Block {
        template.into_block(|t| self.calculate_appropriate_target(t))
    }
}

// ── Proof of work ──

/// Hash-below-target proof of work with a fixed target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofOfWork {
    target: Target,
}

impl ProofOfWork {
    pub fn new(target: Target) -> Self {
        Self { target }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Search nonces `0..max_attempts` for one that seals `block`.
    ///
    /// Leaves the last tried nonce in the block when no nonce succeeds.
    pub fn mine(&self, block: &mut Block, max_attempts: u64) -> Option<u64> {
        (0..max_attempts).find(|&nonce| {
            block.set_seal_data(SealData::from_nonce(nonce));
            self.seal_is_valid(block)
        })
    }

    /// [`mine`](ProofOfWork::mine) within `config.max_nonce_attempts`.
    pub fn mine_with_config(&self, block: &mut Block, config: &EngineConfig) -> Option<u64> {
        self.mine(block, config.max_nonce_attempts)
    }
}

impl SealMechanism for ProofOfWork {
    fn calculate_appropriate_target(&self, _template: &BlockTemplate) -> Target {
        self.target
    }

    fn seal_is_valid(&self, block: &Block) -> bool {
        // Byte-wise comparison of 32-byte arrays is big-endian numeric order.
        block.target == self.target
            && block.seal_data.nonce().is_some()
            && block.calculate_hash() < self.target
    }

    fn weight(&self, block: &Block) -> u64 {
        let mut top = [0u8; 8];
        top.copy_from_slice(&block.target[..8]);
        u64::MAX / u64::from_be_bytes(top).max(1)
    }
}

// ── Proof of authority ──

/// Single-authority signing: the authority's Ed25519 signature over the
/// unsealed header is the seal, and its key is the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofOfAuthority {
    authority: VerifyingKey,
}

impl ProofOfAuthority {
    pub fn new(authority: VerifyingKey) -> Self {
        Self { authority }
    }

    pub fn authority(&self) -> &VerifyingKey {
        &self.authority
    }

    /// Sign `block`'s unsealed header and install the signature as its seal.
    pub fn seal(&self, block: &mut Block, signing_key: &SigningKey) {
        let signature = sign_ed25519(block.unsealed_header().as_bytes(), signing_key);
        block.set_seal_data(SealData::from_signature(signature));
    }
}

impl SealMechanism for ProofOfAuthority {
    fn calculate_appropriate_target(&self, _template: &BlockTemplate) -> Target {
        self.authority.to_bytes()
    }

    fn seal_is_valid(&self, block: &Block) -> bool {
        let authority = self.authority.to_bytes();
        if block.target != authority {
            return false;
        }
        let Some(signature) = block.seal_data.signature() else {
            return false;
        };
        verify_ed25519(block.unsealed_header().as_bytes(), &signature, &authority)
    }

    fn weight(&self, _block: &Block) -> u64 {
        1
    }
}
