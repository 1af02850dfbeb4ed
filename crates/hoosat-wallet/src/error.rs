//! The wallet-level error taxonomy.
//!
//! Lower layers keep their own error enums; at the operation boundary
//! everything maps into these variants.  All errors are surfaced, never
//! silently recovered; the one exception is the deploy consolidation
//! fallback, which converts `InsufficientFunds` into a structured
//! retry-later result instead of an error.

use hoosat_hrc20::Hrc20Error;
use hoosat_node::NodeError;
use hoosat_script::ScriptError;
use hoosat_signer::SignerError;
use hoosat_transaction::TransactionError;

/// Errors surfaced by wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// Address checksum, prefix, length, or alphabet violation.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Odd-length or non-hex input.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Public key has the wrong length for the signing curve.
    #[error("invalid public key: {0}")]
    InvalidPubkey(String),

    /// Malformed transaction or missing pending reveal.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Funding cannot meet the operation's requirement.
    #[error("insufficient funds: required {required} sompi, available {available}")]
    InsufficientFunds {
        /// Total sompi the operation requires.
        required: u64,
        /// Sompi actually available to it.
        available: u64,
    },

    /// Signer failure or infeasible signature hash.
    #[error("cryptographic error: {0}")]
    CryptographicError(String),

    /// Node HTTP failure.
    #[error("network error: {0}")]
    NetworkError(String),

    /// Catch-all for wrapped host errors.
    #[error("{0}")]
    Unknown(String),
}

impl From<ScriptError> for WalletError {
    fn from(err: ScriptError) -> Self {
        match err {
            ScriptError::InvalidAddress(msg) => WalletError::InvalidAddress(msg),
            ScriptError::InvalidPubkey { .. } => WalletError::InvalidPubkey(err.to_string()),
            ScriptError::InvalidHex(msg) => WalletError::InvalidHex(msg),
            ScriptError::HexDecode(e) => WalletError::InvalidHex(e.to_string()),
            other => WalletError::Unknown(other.to_string()),
        }
    }
}

impl From<Hrc20Error> for WalletError {
    fn from(err: Hrc20Error) -> Self {
        match err {
            Hrc20Error::InsufficientFunds { required, available } => {
                WalletError::InsufficientFunds { required, available }
            }
            Hrc20Error::Script(e) => e.into(),
            Hrc20Error::Transaction(e) => e.into(),
        }
    }
}

impl From<TransactionError> for WalletError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::InvalidTransaction(msg) => WalletError::InvalidTransaction(msg),
            TransactionError::SerializationError(msg) => WalletError::InvalidTransaction(msg),
            TransactionError::Script(e) => e.into(),
            TransactionError::Primitives(e) => WalletError::Unknown(e.to_string()),
        }
    }
}

impl From<NodeError> for WalletError {
    fn from(err: NodeError) -> Self {
        WalletError::NetworkError(err.to_string())
    }
}

impl From<SignerError> for WalletError {
    fn from(err: SignerError) -> Self {
        WalletError::CryptographicError(err.to_string())
    }
}
