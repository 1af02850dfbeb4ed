//! Hoosat SDK - HRC-20 operation orchestrator.
//!
//! Ties the layers together: turns a token intent into a canonical
//! payload, a P2SH commit, and a reveal that publishes the payload
//! on-chain.  Funds come from the node's UTXO index, signatures from the
//! remote threshold signer, and the pending-reveal registry survives
//! restarts through an explicit snapshot/restore contract.

pub mod config;
pub mod registry;
pub mod selection;
pub mod wallet;

mod error;
pub use config::WalletConfig;
pub use error::WalletError;
pub use registry::{PendingReveal, PendingReveals};
pub use wallet::{AddressInfo, CommitResult, DeployOutcome, Hrc20Wallet, RevealResult};
