//! Core type aliases and constants for the forkchain ledger.
//!
//! These types are shared by the primitives crate and the validity engine.

use std::collections::BTreeSet;
use std::fmt::Display;

/// 32-byte digest used for block hashes, transaction hashes and Merkle nodes.
pub type Hash = [u8; 32];

/// 32-byte party identity (an Ed25519 verifying key).
pub type Address = [u8; 32];

/// Block height (number of blocks between a block and genesis).
pub type BlockHeight = u64;

/// Block timestamp, seconds since the Unix epoch.
pub type Timestamp = u64;

/// Consensus-specific target carried in every block header.
///
/// Proof-of-work reads it as a big-endian threshold; proof-of-authority
/// stores the authority's verifying key in it.
pub type Target = [u8; 32];

/// Parent reference of a genesis block.
pub const GENESIS_PARENT: &str = "genesis";

/// Maximum number of transactions a block may carry.
pub const MAX_BLOCK_TRANSACTIONS: usize = 900;

/// Field separator used when encoding block headers.
///
/// Never produced by any encoded header field (decimal integers, lowercase
/// hex, `genesis`, `true`/`false`).
pub const HEADER_SEPARATOR: &str = "`";

/// A zero-valued hash (32 zero bytes).
pub const ZERO_HASH: Hash = [0u8; 32];

/// Convert a `Hash` to lowercase hex without a prefix.
pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

/// Parse exactly 64 hex digits into a `Hash`.
pub fn hash_from_hex(s: &str) -> Option<Hash> {
    let mut out = [0u8; 32];
    hex::decode_to_slice(s, &mut out).ok()?;
    Some(out)
}

/// Join the `Display` form of each field with `sep`.
pub fn encode_fields(fields: &[&dyn Display], sep: &str) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Returns true iff the two sets share at least one element.
pub fn nonempty_intersection<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> bool {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().any(|x| large.contains(x))
}
