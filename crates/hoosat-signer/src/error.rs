/// Errors from the remote signing service.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// HTTP request to the signer failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The signer refused to sign.
    #[error("signer rejected request ({status}): {message}")]
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// The response body, if any.
        message: String,
    },

    /// The signer returned a malformed signature.
    #[error("invalid signature from signer: {0}")]
    InvalidSignature(String),
}
