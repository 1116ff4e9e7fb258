//! Block entity: header fields, header encoding, and hash identity.
//!
//! A block's `hash` and `merkle_root` are pure functions of its other
//! fields. Construction computes both but performs no validation; a block
//! may be built and still be invalid. Validity is a separate query made
//! against a ledger by the engine's validator.

use std::fmt;

use crate::crypto::double_sha256_str;
use crate::merkle::merkle_root;
use crate::transaction::Transaction;
use crate::types::{
    encode_fields, hash_to_hex, BlockHeight, Hash, Target, Timestamp, GENESIS_PARENT,
    HEADER_SEPARATOR, ZERO_HASH,
};

/// Reference from a block to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentRef {
    /// The `"genesis"` sentinel carried by a genesis block.
    Genesis,
    /// Hash of the parent block.
    Block(Hash),
}

impl ParentRef {
    /// The parent block hash, if this is not the genesis sentinel.
    pub fn hash(&self) -> Option<&Hash> {
        match self {
            Self::Genesis => None,
            Self::Block(hash) => Some(hash),
        }
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genesis => f.write_str(GENESIS_PARENT),
            Self::Block(hash) => f.write_str(&hash_to_hex(hash)),
        }
    }
}

/// Opaque seal payload: a proof-of-work nonce or an authority signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SealData(Vec<u8>);

impl SealData {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Big-endian encoding of a proof-of-work nonce.
    pub fn from_nonce(nonce: u64) -> Self {
        Self(nonce.to_be_bytes().to_vec())
    }

    /// The nonce, if this seal is exactly eight bytes long.
    pub fn nonce(&self) -> Option<u64> {
        let bytes: [u8; 8] = self.0.as_slice().try_into().ok()?;
        Some(u64::from_be_bytes(bytes))
    }

    pub fn from_signature(signature: [u8; 64]) -> Self {
        Self(signature.to_vec())
    }

    /// The signature, if this seal is exactly 64 bytes long.
    pub fn signature(&self) -> Option<[u8; 64]> {
        self.0.as_slice().try_into().ok()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SealData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

/// Inputs to block construction.
///
/// `target` and `merkle_root` are computed when absent; a supplied
/// `merkle_root` is stored as given (and checked later by the validator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTemplate {
    pub height: BlockHeight,
    pub transactions: Vec<Transaction>,
    pub parent: ParentRef,
    pub is_genesis: bool,
    pub timestamp: Timestamp,
    pub target: Option<Target>,
    pub merkle_root: Option<Hash>,
    pub seal_data: SealData,
}

impl BlockTemplate {
    /// Template for a genesis block.
    pub fn genesis(transactions: Vec<Transaction>, timestamp: Timestamp) -> Self {
        Self {
            height: 0,
            transactions,
            parent: ParentRef::Genesis,
            is_genesis: true,
            timestamp,
            target: None,
            merkle_root: None,
            seal_data: SealData::empty(),
        }
    }

    /// Template for a block extending `parent`.
    pub fn child(
        height: BlockHeight,
        transactions: Vec<Transaction>,
        parent: Hash,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            height,
            transactions,
            parent: ParentRef::Block(parent),
            is_genesis: false,
            timestamp,
            target: None,
            merkle_root: None,
            seal_data: SealData::empty(),
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Build the block, asking `default_target` for a target if none was set.
    pub fn into_block(self, default_target: impl FnOnce(&BlockTemplate) -> Target) -> Block {
        let target = match self.target {
            Some(target) => target,
            None => default_target(&self),
        };
        let merkle_root = self
            .merkle_root
            .unwrap_or_else(|| merkle_root(&self.transactions));

        let mut block = Block {
            height: self.height,
            parent: self.parent,
            transactions: self.transactions,
            timestamp: self.timestamp,
            target,
            is_genesis: self.is_genesis,
            merkle_root,
            seal_data: self.seal_data,
            hash: ZERO_HASH,
        };
        block.hash = block.calculate_hash();
        block
    }
}

/// A block of ordered transactions sealed under a consensus mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Height in the chain; 0 only for genesis.
    pub height: BlockHeight,
    /// Parent block, or the genesis sentinel.
    pub parent: ParentRef,
    /// Ordered transactions. Order feeds the Merkle root.
    pub transactions: Vec<Transaction>,
    /// Must not decrease from parent to child.
    pub timestamp: Timestamp,
    /// Consensus-specific target the seal is checked against.
    pub target: Target,
    pub is_genesis: bool,
    /// Merkle root over `transactions`.
    pub merkle_root: Hash,
    /// Consensus seal (nonce or signature).
    pub seal_data: SealData,
    /// Cached SHA-256² of [`Block::header`]; the block's identity.
    pub hash: Hash,
}

impl Block {
    /// Build a block with an explicit target, computing its Merkle root.
    pub fn new(
        height: BlockHeight,
        transactions: Vec<Transaction>,
        parent: ParentRef,
        is_genesis: bool,
        timestamp: Timestamp,
        target: Target,
    ) -> Self {
        BlockTemplate {
            height,
            transactions,
            parent,
            is_genesis,
            timestamp,
            target: Some(target),
            merkle_root: None,
            seal_data: SealData::empty(),
        }
        .into_block(|_| target)
    }

    /// Header without the seal: the part a seal commits to.
    pub fn unsealed_header(&self) -> String {
        encode_fields(
            &[
                &self.height,
                &self.timestamp,
                &hash_to_hex(&self.target),
                &self.parent,
                &self.is_genesis,
                &hash_to_hex(&self.merkle_root),
            ],
            HEADER_SEPARATOR,
        )
    }

    /// Full header, seal included.
    pub fn header(&self) -> String {
        encode_fields(&[&self.unsealed_header(), &self.seal_data], HEADER_SEPARATOR)
    }

    pub fn calculate_hash(&self) -> Hash {
        double_sha256_str(&self.header())
    }

    pub fn calculate_merkle_root(&self) -> Hash {
        merkle_root(&self.transactions)
    }

    /// Replace the seal and recompute the hash.
    ///
    /// The ledger takes ownership of accepted blocks and only lends shared
    /// references, so an accepted block's identity cannot change through
    /// this method.
    pub fn set_seal_data(&mut self, seal_data: SealData) {
        self.seal_data = seal_data;
        self.hash = self.calculate_hash();
    }

    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl fmt::Display for Block {
    /// Header followed by every transaction, `!`-separated. Debugging aid.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let txs: Vec<String> = self.transactions.iter().map(Transaction::canonical).collect();
        write!(f, "{}{}{}", self.header(), HEADER_SEPARATOR, txs.join("!"))
    }
}
