#![deny(missing_docs)]

//! Hoosat SDK - Complete HRC-20 token engine.
//!
//! Re-exports all SDK components for convenient single-crate usage.

pub use hoosat_primitives as primitives;
pub use hoosat_script as script;
pub use hoosat_transaction as transaction;
pub use hoosat_hrc20 as hrc20;
pub use hoosat_node as node;
pub use hoosat_signer as signer;
pub use hoosat_wallet as wallet;
