/// Error types for HRC-20 payload and transaction building.
#[derive(Debug, thiserror::Error)]
pub enum Hrc20Error {
    /// Funding cannot cover the requested amount plus fee.
    #[error("insufficient funds: required {required} sompi, available {available}")]
    InsufficientFunds {
        /// Total sompi the operation requires.
        required: u64,
        /// Sompi actually available to it.
        available: u64,
    },

    /// An underlying script error (forwarded from `hoosat-script`).
    #[error("script error: {0}")]
    Script(#[from] hoosat_script::ScriptError),

    /// An underlying transaction error (forwarded from `hoosat-transaction`).
    #[error("transaction error: {0}")]
    Transaction(#[from] hoosat_transaction::TransactionError),
}
