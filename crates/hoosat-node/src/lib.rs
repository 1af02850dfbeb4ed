//! Hoosat SDK - Node REST adapter.
//!
//! Consumes the node's JSON REST surface: address UTXO and balance
//! queries, and raw-transaction submission.

pub mod client;
pub mod types;

mod error;
pub use client::NodeClient;
pub use error::NodeError;
pub use types::RpcTransaction;
