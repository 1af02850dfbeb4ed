//! HTTP client for the threshold-signing service.
//!
//! Posts `{keyName, derivationPath, curve, digest}` and expects
//! `{signature}` with the signature as hex: DER for ECDSA, 64 raw bytes
//! for Schnorr.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{RemoteSigner, SignerError};

/// Expected raw Schnorr signature length in bytes.
const SCHNORR_SIGNATURE_LEN: usize = 64;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignRequest<'a> {
    key_name: &'a str,
    derivation_path: &'a str,
    curve: &'a str,
    digest: String,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    signature: String,
}

/// HTTP client for a remote threshold signer.
#[derive(Debug, Clone)]
pub struct ThresholdSignerClient {
    /// Base URL of the signing service.
    base_url: String,
    /// BIP-32-style derivation path sent with every request.
    derivation_path: String,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl ThresholdSignerClient {
    /// Create a client against the given signer URL.
    ///
    /// # Arguments
    /// * `base_url` - The signer service URL, without a trailing slash.
    /// * `derivation_path` - The derivation path supplied on each request.
    ///
    /// # Returns
    /// A `ThresholdSignerClient`.
    pub fn new(base_url: impl Into<String>, derivation_path: impl Into<String>) -> Self {
        ThresholdSignerClient {
            base_url: base_url.into(),
            derivation_path: derivation_path.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn sign(
        &self,
        key_name: &str,
        curve: &str,
        digest: [u8; 32],
    ) -> Result<Vec<u8>, SignerError> {
        let url = format!("{}/sign", self.base_url);
        let request = SignRequest {
            key_name,
            derivation_path: &self.derivation_path,
            curve,
            digest: hex::encode(digest),
        };
        debug!(key_name, curve, "requesting signature");

        let resp = self.client.post(&url).json(&request).send().await?;
        if !resp.status().is_success() {
            return Err(SignerError::Rejected {
                status: resp.status().as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let response: SignResponse = resp.json().await?;
        hex::decode(&response.signature)
            .map_err(|e| SignerError::InvalidSignature(format!("bad signature hex: {}", e)))
    }
}

impl RemoteSigner for ThresholdSignerClient {
    async fn sign_ecdsa(&self, key_name: &str, digest: [u8; 32]) -> Result<Vec<u8>, SignerError> {
        let signature = self.sign(key_name, "secp256k1", digest).await?;
        if signature.is_empty() {
            return Err(SignerError::InvalidSignature("empty signature".to_string()));
        }
        Ok(signature)
    }

    async fn sign_schnorr(&self, key_name: &str, digest: [u8; 32]) -> Result<Vec<u8>, SignerError> {
        let signature = self.sign(key_name, "schnorr", digest).await?;
        if signature.len() != SCHNORR_SIGNATURE_LEN {
            return Err(SignerError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SCHNORR_SIGNATURE_LEN,
                signature.len()
            )));
        }
        Ok(signature)
    }
}
