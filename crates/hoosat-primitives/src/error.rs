/// Unified error type for all primitives operations.
///
/// Covers errors from hex decoding, binary deserialization, and hashing.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    /// Invalid hexadecimal string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Unexpected end of input data.
    #[error("unexpected end of data")]
    UnexpectedEof,

    /// Variable-length integer exceeds maximum size.
    #[error("varint too large")]
    VarIntTooLarge,

    /// A hash value has the wrong length.
    #[error("invalid hash: {0}")]
    InvalidHash(String),

    /// Catch-all error.
    #[error("{0}")]
    Other(String),
}
