//! Fork-aware ledger index.
//!
//! The ledger keeps every accepted block across all forks, together with
//! three derived indices: all included transactions, the blocks including
//! each transaction, and the blocks spending each input reference. None of
//! these is fork-relative on its own; the validator intersects them with
//! [`LedgerView::ancestry_of`] to ask "does this happen on *this* fork".
//!
//! - [`LedgerView`]: read-only contract consumed by the validator
//! - [`Ledger`]: in-memory, append-only implementation

use std::collections::{BTreeMap, BTreeSet};

use forkchain_primitives::{
    types::hash_to_hex, Block, Error, Hash, InputRef, ParentRef, Result, Transaction,
};
use tracing::info;

/// Read accessors the block validator depends on.
pub trait LedgerView {
    /// Any known block, on any fork.
    fn block(&self, hash: &Hash) -> Option<&Block>;

    /// Any transaction included in any known block.
    fn transaction(&self, tx_hash: &Hash) -> Option<&Transaction>;

    /// Hashes of all blocks, on any fork, that include `tx_hash`.
    fn blocks_containing_tx(&self, tx_hash: &Hash) -> Option<&BTreeSet<Hash>>;

    /// Hashes of all blocks, on any fork, with a transaction spending `input`.
    ///
    /// Keyed by [`InputRef::canonical`]; callers pass the canonical form.
    fn blocks_spending_input(&self, input: &InputRef) -> Option<&BTreeSet<Hash>>;

    /// Block hashes from genesis to `hash`, inclusive.
    ///
    /// Fails with `UnknownBlock` for a hash the ledger does not hold.
    fn ancestry_of(&self, hash: &Hash) -> Result<Vec<Hash>>;

    /// [`ancestry_of`](LedgerView::ancestry_of) as a set, for intersections.
    fn ancestry_set(&self, hash: &Hash) -> Result<BTreeSet<Hash>> {
        Ok(self.ancestry_of(hash)?.into_iter().collect())
    }
}

/// In-memory ledger index.
///
/// Uses `BTreeMap`/`BTreeSet` so iteration order is deterministic.
/// Blocks are owned by the ledger once added; callers only get shared
/// references back, so an accepted block's hash cannot change.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    blocks: BTreeMap<Hash, Block>,
    transactions: BTreeMap<Hash, Transaction>,
    blocks_containing_tx: BTreeMap<Hash, BTreeSet<Hash>>,
    blocks_spending_input: BTreeMap<InputRef, BTreeSet<Hash>>,
    /// Blocks with no known child.
    tips: BTreeSet<Hash>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `block` in every index.
    ///
    /// Performs linkage checks only (duplicate hash, unknown parent); the
    /// caller is responsible for validating the block first. Either all
    /// indices are updated or none is.
    pub fn add_block(&mut self, block: Block) -> Result<Hash> {
        let hash = block.hash;
        if self.blocks.contains_key(&hash) {
            return Err(Error::DuplicateBlock(hash_to_hex(&hash)));
        }
        if let ParentRef::Block(parent) = &block.parent {
            if !self.blocks.contains_key(parent) {
                return Err(Error::UnknownParent(hash_to_hex(parent)));
            }
        }

        for tx in &block.transactions {
            self.transactions
                .entry(tx.hash)
                .or_insert_with(|| tx.clone());
            self.blocks_containing_tx
                .entry(tx.hash)
                .or_default()
                .insert(hash);
            for input in &tx.input_refs {
                self.blocks_spending_input
                    .entry(input.canonical())
                    .or_default()
                    .insert(hash);
            }
        }

        if let Some(parent) = block.parent.hash() {
            self.tips.remove(parent);
        }
        self.tips.insert(hash);

        info!(
            height = block.height,
            hash = %hash_to_hex(&hash),
            txs = block.tx_count(),
            "registered block"
        );
        self.blocks.insert(hash, block);
        Ok(hash)
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.blocks.contains_key(hash)
    }

    /// Number of known blocks across all forks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Fork tips: known blocks that no known block extends.
    pub fn tips(&self) -> &BTreeSet<Hash> {
        &self.tips
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }
}

impl LedgerView for Ledger {
    fn block(&self, hash: &Hash) -> Option<&Block> {
        self.blocks.get(hash)
    }

    fn transaction(&self, tx_hash: &Hash) -> Option<&Transaction> {
        self.transactions.get(tx_hash)
    }

    fn blocks_containing_tx(&self, tx_hash: &Hash) -> Option<&BTreeSet<Hash>> {
        self.blocks_containing_tx.get(tx_hash)
    }

    fn blocks_spending_input(&self, input: &InputRef) -> Option<&BTreeSet<Hash>> {
        self.blocks_spending_input.get(input)
    }

    fn ancestry_of(&self, hash: &Hash) -> Result<Vec<Hash>> {
        let mut chain = Vec::new();
        let mut current = *hash;
        loop {
            let block = self
                .blocks
                .get(&current)
                .ok_or_else(|| Error::UnknownBlock(hash_to_hex(&current)))?;
            chain.push(current);
            match block.parent {
                ParentRef::Genesis => break,
                ParentRef::Block(parent) => current = parent,
            }
        }
        chain.reverse();
        Ok(chain)
    }
}
