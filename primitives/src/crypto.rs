//! Cryptographic operations for the forkchain ledger.
//!
//! - SHA-256 applied twice (SHA-256²) for block hashes, transaction hashes
//!   and Merkle nodes
//! - Ed25519 for proof-of-authority seals
//!
//! All operations are deterministic.

use crate::types::Hash;

/// Compute SHA-256 hash of the input data.
pub fn hash_sha256(data: &[u8]) -> Hash {
    use sha2::Digest;
    let result = sha2::Sha256::digest(data);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Compute SHA-256² of the input data.
///
/// The second round hashes the raw 32-byte digest of the first, not its
/// hex rendering.
pub fn double_sha256(data: &[u8]) -> Hash {
    hash_sha256(&hash_sha256(data))
}

/// SHA-256² of a string's UTF-8 bytes.
pub fn double_sha256_str(s: &str) -> Hash {
    double_sha256(s.as_bytes())
}

/// Verify an Ed25519 signature.
///
/// Returns `true` if the signature is valid for the given message and
/// public key, `false` otherwise (including malformed keys).
pub fn verify_ed25519(message: &[u8], signature: &[u8; 64], public_key: &[u8; 32]) -> bool {
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};

    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    let sig = Signature::from_bytes(signature);
    verifying_key.verify(message, &sig).is_ok()
}

/// Sign a message with an Ed25519 private key.
pub fn sign_ed25519(message: &[u8], secret_key: &ed25519_dalek::SigningKey) -> [u8; 64] {
    use ed25519_dalek::Signer;
    let sig = secret_key.sign(message);
    sig.to_bytes()
}
