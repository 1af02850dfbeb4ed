//! Hash function primitives for the Hoosat SDK.
//!
//! Provides SHA-256, double SHA-256, the keyed BLAKE3 domains used for
//! transaction hashing, and BIP-340 tagged hashing for Schnorr signature
//! digests.  Redeem scripts and ECDSA signature hashes use double SHA-256;
//! transaction ids and the reused sighash components use keyed BLAKE3.

use sha2::{Digest, Sha256};

/// BLAKE3 key domain for transaction ids.
pub const TRANSACTION_ID_DOMAIN: &str = "TransactionID";

/// BLAKE3 key domain (and BIP-340 tag) for signature hashing.
pub const TRANSACTION_SIGNING_DOMAIN: &str = "TransactionSigningHash";

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute double SHA-256 (SHA-256d) hash of the input data.
///
/// Used for redeem-script hashing (the P2SH script hash) and as the
/// finalization step of the ECDSA signature hash.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte double-SHA-256 digest.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute a keyed BLAKE3 hash under the given ASCII domain.
///
/// The domain string is zero-padded to the 32-byte BLAKE3 key.  Hoosat uses
/// `TransactionID` for transaction ids and `TransactionSigningHash` for the
/// reused sighash component hashes.
///
/// # Arguments
/// * `domain` - ASCII domain string, at most 32 bytes.
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte keyed BLAKE3 digest.
pub fn blake3_keyed(domain: &str, data: &[u8]) -> [u8; 32] {
    let mut key = [0u8; 32];
    let domain_bytes = domain.as_bytes();
    key[..domain_bytes.len()].copy_from_slice(domain_bytes);
    *blake3::keyed_hash(&key, data).as_bytes()
}

/// Compute a BIP-340 tagged SHA-256 hash.
///
/// `SHA256(SHA256(tag) || SHA256(tag) || data)`, the domain-separation
/// construction used by Schnorr signature digests.
///
/// # Arguments
/// * `tag` - ASCII tag string.
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte tagged digest.
pub fn tagged_sha256(tag: &str, data: &[u8]) -> [u8; 32] {
    let tag_hash = sha256(tag.as_bytes());
    let mut hasher = Sha256::new();
    hasher.update(tag_hash);
    hasher.update(tag_hash);
    hasher.update(data);
    hasher.finalize().into()
}
