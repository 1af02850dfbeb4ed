/// Errors that can occur when talking to the node.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a non-success status.
    #[error("node rejected request ({status}): {message}")]
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// The response body, if any.
        message: String,
    },

    /// The node's response could not be interpreted.
    #[error("invalid node response: {0}")]
    InvalidResponse(String),
}
