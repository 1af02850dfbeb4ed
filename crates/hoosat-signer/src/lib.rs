//! Hoosat SDK - Remote signer adapter.
//!
//! Private keys never live in this process: they are held by an external
//! threshold-signing service identified by a key name.  The engine hands
//! the service a 32-byte digest and receives a raw 64-byte Schnorr
//! signature or a DER-encoded ECDSA signature; the single `SIGHASH_ALL`
//! hashtype byte is appended by the caller before the signature enters a
//! signature script.

pub mod client;

mod error;
pub use client::ThresholdSignerClient;
pub use error::SignerError;

/// A remote signing service.
///
/// Implementations are opaque to the engine: given a digest, they return
/// a signature for the named key.  Failures surface as `SignerError` and
/// are wrapped into the cryptographic error taxonomy by callers.
pub trait RemoteSigner {
    /// Request an ECDSA secp256k1 signature over a 32-byte digest.
    ///
    /// # Arguments
    /// * `key_name` - The service-side key identifier.
    /// * `digest` - The 32-byte sighash to sign.
    ///
    /// # Returns
    /// The DER-encoded signature bytes.
    fn sign_ecdsa(
        &self,
        key_name: &str,
        digest: [u8; 32],
    ) -> impl std::future::Future<Output = Result<Vec<u8>, SignerError>> + Send;

    /// Request a Schnorr BIP-340 signature over a 32-byte digest.
    ///
    /// # Arguments
    /// * `key_name` - The service-side key identifier.
    /// * `digest` - The 32-byte sighash to sign.
    ///
    /// # Returns
    /// The raw 64-byte signature.
    fn sign_schnorr(
        &self,
        key_name: &str,
        digest: [u8; 32],
    ) -> impl std::future::Future<Output = Result<Vec<u8>, SignerError>> + Send;
}
