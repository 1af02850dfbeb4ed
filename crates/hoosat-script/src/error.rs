/// Error types for script and address operations.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Invalid address string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Public key has the wrong length for the signing curve.
    #[error("invalid public key: expected {expected} bytes, got {got}")]
    InvalidPubkey {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        got: usize,
    },

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Attempted to append a push-data opcode through append_opcode.
    #[error("use append_push_data for push data opcodes: {0:#04x}")]
    InvalidOpcodeType(u8),

    /// Push data exceeds maximum allowed size.
    #[error("data too big: {0} bytes")]
    DataTooBig(usize),

    /// Not enough data in script to complete a push operation.
    #[error("not enough data")]
    DataTooSmall,

    /// Error from the primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] hoosat_primitives::PrimitivesError),
}
