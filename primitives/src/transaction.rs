//! UTXO transactions and the input references that spend their outputs.
//!
//! A transaction consumes earlier outputs through [`InputRef`]s and creates
//! new [`TxOutput`]s. Its identity is the SHA-256² of its canonical string
//! form, so two transactions with identical inputs and outputs are the
//! same transaction.

use std::fmt;

use crate::crypto::double_sha256_str;
use crate::error::{Error, Result};
use crate::types::{hash_from_hex, hash_to_hex, Address, Hash, ZERO_HASH};

/// One output of a transaction: `amount` moved from `sender` to `receiver`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxOutput {
    pub sender: Address,
    pub receiver: Address,
    pub amount: u64,
}

impl TxOutput {
    pub fn new(sender: Address, receiver: Address, amount: u64) -> Self {
        Self {
            sender,
            receiver,
            amount,
        }
    }
}

impl fmt::Display for TxOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}>{}:{}",
            hash_to_hex(&self.sender),
            hash_to_hex(&self.receiver),
            self.amount
        )
    }
}

/// A parsed input reference: output `index` of transaction `tx_hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutPoint {
    pub tx_hash: Hash,
    pub index: usize,
}

/// Raw input reference in its `"<tx hash hex>:<output index>"` form.
///
/// References are kept as received so that a block carrying an
/// unparseable reference is still a well-typed value; the validator
/// reports such a reference as an unresolvable output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InputRef(String);

impl InputRef {
    /// Reference output `index` of the transaction with hash `tx_hash`.
    pub fn new(tx_hash: &Hash, index: usize) -> Self {
        Self(format!("{}:{}", hash_to_hex(tx_hash), index))
    }

    /// Wrap a raw reference string without checking it.
    pub fn raw(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Normalized form used as an index key: lowercase hex and a plain
    /// decimal index. Unparseable references are returned unchanged.
    pub fn canonical(&self) -> InputRef {
        match self.parse() {
            Ok(point) => point.into(),
            Err(_) => self.clone(),
        }
    }

    /// Split the reference into its transaction hash and output index.
    pub fn parse(&self) -> Result<OutPoint> {
        let malformed = || Error::MalformedInputRef(self.0.clone());
        let (hash_part, index_part) = self.0.split_once(':').ok_or_else(malformed)?;
        let tx_hash = hash_from_hex(hash_part).ok_or_else(malformed)?;
        let index = index_part.parse::<usize>().map_err(|_| malformed())?;
        Ok(OutPoint { tx_hash, index })
    }
}

impl From<OutPoint> for InputRef {
    fn from(point: OutPoint) -> Self {
        Self::new(&point.tx_hash, point.index)
    }
}

impl fmt::Display for InputRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transaction spending `input_refs` into `outputs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Ordered references to the outputs being consumed.
    pub input_refs: Vec<InputRef>,
    /// Ordered outputs created by this transaction.
    pub outputs: Vec<TxOutput>,
    /// Cached SHA-256² of [`Transaction::canonical`].
    pub hash: Hash,
}

impl Transaction {
    /// Create a transaction and compute its hash.
    pub fn new(input_refs: Vec<InputRef>, outputs: Vec<TxOutput>) -> Self {
        let mut tx = Self {
            input_refs,
            outputs,
            hash: ZERO_HASH,
        };
        tx.hash = tx.calculate_hash();
        tx
    }

    /// Canonical string form: comma-joined inputs, `|`, comma-joined outputs.
    ///
    /// This is both the hash pre-image and the Merkle leaf pre-image.
    pub fn canonical(&self) -> String {
        let inputs: Vec<&str> = self.input_refs.iter().map(InputRef::as_str).collect();
        let outputs: Vec<String> = self.outputs.iter().map(TxOutput::to_string).collect();
        format!("{}|{}", inputs.join(","), outputs.join(","))
    }

    pub fn calculate_hash(&self) -> Hash {
        double_sha256_str(&self.canonical())
    }

    /// Sum of output amounts, or `None` on overflow.
    pub fn total_output(&self) -> Option<u64> {
        self.outputs
            .iter()
            .try_fold(0u64, |acc, out| acc.checked_add(out.amount))
    }

    /// Transaction-local well-formedness.
    ///
    /// Requires at least one output, a cached hash matching the content,
    /// and a non-overflowing output total. Input references are resolved
    /// (and parsed) by the block validator against the ledger.
    pub fn is_valid(&self) -> bool {
        !self.outputs.is_empty()
            && self.hash == self.calculate_hash()
            && self.total_output().is_some()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
