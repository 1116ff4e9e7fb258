//! Block validity rules.
//!
//! [`BlockValidator::is_valid`] evaluates a candidate block against a
//! ledger view and a seal mechanism and reports the first violated rule:
//!
//! 1. Structure: Merkle root, hash, transaction count
//! 2. Genesis blocks: height 0 and the `genesis` parent; nothing else
//! 3. Lineage: parent known, height = parent + 1, timestamp not decreasing
//! 4. Seal and transaction well-formedness
//! 5. Economics, evaluated against the ancestry of the parent only:
//!    no double inclusion, no double spend, resolvable and reachable
//!    inputs, single-party consistency, no money creation
//!
//! Validation only reads the ledger. A transaction or input that appears
//! on a sibling fork does not count against this block.

use std::collections::{BTreeMap, BTreeSet};

use forkchain_primitives::{
    types::{hash_to_hex, nonempty_intersection},
    Address, Block, Hash, InputRef, ParentRef, Rejection, Transaction, TxOutput, Verdict,
};
use tracing::debug;

use crate::config::EngineConfig;
use crate::consensus::SealMechanism;
use crate::ledger::LedgerView;

/// Stateless validator; all chain state comes through the [`LedgerView`].
#[derive(Debug, Clone, Default)]
pub struct BlockValidator {
    config: EngineConfig,
}

impl BlockValidator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decide whether `block` may be appended to `ledger`.
    pub fn is_valid(
        &self,
        block: &Block,
        ledger: &dyn LedgerView,
        seal: &dyn SealMechanism,
    ) -> Verdict {
        let verdict = Verdict::from(self.check(block, ledger, seal));
        if let Verdict::Rejected(rejection) = verdict {
            debug!(
                hash = %hash_to_hex(&block.hash),
                height = block.height,
                reason = %rejection,
                "block rejected"
            );
        }
        verdict
    }

    fn check(
        &self,
        block: &Block,
        ledger: &dyn LedgerView,
        seal: &dyn SealMechanism,
    ) -> Result<(), Rejection> {
        check_structure(block, self.config.max_block_transactions)?;

        if block.is_genesis {
            return check_genesis(block);
        }

        let parent = check_lineage(block, ledger)?;

        if !seal.seal_is_valid(block) {
            return Err(Rejection::InvalidSeal);
        }
        if !block.transactions.iter().all(Transaction::is_valid) {
            return Err(Rejection::MalformedTransaction);
        }

        let ancestry = ledger
            .ancestry_set(&parent.hash)
            .map_err(|_| Rejection::NonexistentParent)?;
        check_transactions(block, ledger, &ancestry)
    }
}

/// Chain-independent checks: Merkle root, cached hash, transaction count.
pub fn check_structure(block: &Block, max_transactions: usize) -> Result<(), Rejection> {
    if block.calculate_merkle_root() != block.merkle_root {
        return Err(Rejection::MerkleMismatch);
    }
    if block.calculate_hash() != block.hash {
        return Err(Rejection::HashMismatch);
    }
    if block.transactions.len() > max_transactions {
        return Err(Rejection::TooManyTransactions);
    }
    Ok(())
}

/// A genesis block sits at height 0 under the `genesis` sentinel.
pub fn check_genesis(block: &Block) -> Result<(), Rejection> {
    if block.height != 0 || block.parent != ParentRef::Genesis {
        return Err(Rejection::InvalidGenesis);
    }
    Ok(())
}

/// Parent exists, height follows it, and time does not run backwards.
///
/// Returns the parent on success.
pub fn check_lineage<'a>(
    block: &Block,
    ledger: &'a dyn LedgerView,
) -> Result<&'a Block, Rejection> {
    let parent = block
        .parent
        .hash()
        .and_then(|hash| ledger.block(hash))
        .ok_or(Rejection::NonexistentParent)?;

    if parent.height.checked_add(1) != Some(block.height) {
        return Err(Rejection::InvalidHeight);
    }
    if block.timestamp < parent.timestamp {
        return Err(Rejection::InvalidTimestamp);
    }
    Ok(parent)
}

/// Economic checks for every transaction, in block order, against the
/// fork identified by `ancestry`.
pub fn check_transactions(
    block: &Block,
    ledger: &dyn LedgerView,
    ancestry: &BTreeSet<Hash>,
) -> Result<(), Rejection> {
    // Duplicates anywhere in the block fail at their first occurrence.
    let repeated_txs = repeated(block.transactions.iter().map(|tx| tx.hash));
    let repeated_inputs = repeated(
        block
            .transactions
            .iter()
            .flat_map(|tx| tx.input_refs.iter().map(InputRef::canonical)),
    );

    // Transactions earlier in this block, available as input sources.
    let mut earlier: BTreeMap<Hash, &Transaction> = BTreeMap::new();

    for tx in &block.transactions {
        if repeated_txs.contains(&tx.hash)
            || on_fork(ledger.blocks_containing_tx(&tx.hash), ancestry)
        {
            return Err(Rejection::DoubleTransactionInclusion);
        }

        let spend = TxSpend {
            ledger,
            ancestry,
            earlier: &earlier,
            repeated_inputs: &repeated_inputs,
        };
        spend.check(tx)?;

        earlier.insert(tx.hash, tx);
    }
    Ok(())
}

/// Keys that occur more than once in `items`.
fn repeated<K: Ord>(items: impl IntoIterator<Item = K>) -> BTreeSet<K> {
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for item in items {
        *counts.entry(item).or_default() += 1;
    }
    counts
        .into_iter()
        .filter_map(|(key, count)| (count > 1).then_some(key))
        .collect()
}

/// Input resolution context for one transaction.
struct TxSpend<'a> {
    ledger: &'a dyn LedgerView,
    ancestry: &'a BTreeSet<Hash>,
    earlier: &'a BTreeMap<Hash, &'a Transaction>,
    /// Canonical input references spent more than once in this block.
    repeated_inputs: &'a BTreeSet<InputRef>,
}

impl<'a> TxSpend<'a> {
    fn check(&self, tx: &Transaction) -> Result<(), Rejection> {
        let mut sender: Option<Address> = None;
        let mut input_sum: u64 = 0;

        for input in &tx.input_refs {
            let key = input.canonical();
            if self.repeated_inputs.contains(&key) {
                return Err(Rejection::DoubleSpentInput);
            }

            let output = self.resolve(input)?;

            if on_fork(self.ledger.blocks_spending_input(&key), self.ancestry) {
                return Err(Rejection::DoubleSpentInput);
            }

            match sender {
                None => sender = Some(output.receiver),
                Some(expected) if expected != output.receiver => {
                    return Err(Rejection::UserInconsistency);
                }
                Some(_) => {}
            }

            input_sum = input_sum.saturating_add(output.amount);
        }

        // Without inputs the first output names the sender.
        let sender = sender.or_else(|| tx.outputs.first().map(|out| out.sender));
        if tx.outputs.iter().any(|out| Some(out.sender) != sender) {
            return Err(Rejection::UserInconsistency);
        }

        let output_sum = tx.total_output().ok_or(Rejection::CreatingMoney)?;
        if input_sum < output_sum {
            return Err(Rejection::CreatingMoney);
        }
        Ok(())
    }

    /// Find the output `input` points at and make sure its transaction is
    /// reachable from this fork (earlier in this block, or on the ancestry).
    fn resolve(&self, input: &InputRef) -> Result<&'a TxOutput, Rejection> {
        let point = input
            .parse()
            .map_err(|_| Rejection::RequiredOutputNotFound)?;

        let (source, in_block) = match self.earlier.get(&point.tx_hash) {
            Some(tx) => (*tx, true),
            None => (
                self.ledger
                    .transaction(&point.tx_hash)
                    .ok_or(Rejection::RequiredOutputNotFound)?,
                false,
            ),
        };
        let output = source
            .outputs
            .get(point.index)
            .ok_or(Rejection::RequiredOutputNotFound)?;

        if !in_block && !on_fork(self.ledger.blocks_containing_tx(&point.tx_hash), self.ancestry) {
            return Err(Rejection::InputTransactionNotFound);
        }
        Ok(output)
    }
}

/// True iff any of `blocks` lies on `ancestry`.
fn on_fork(blocks: Option<&BTreeSet<Hash>>, ancestry: &BTreeSet<Hash>) -> bool {
    blocks.is_some_and(|blocks| nonempty_intersection(blocks, ancestry))
}
