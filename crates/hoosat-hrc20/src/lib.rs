//! Hoosat SDK - HRC-20 token protocol support.
//!
//! HRC-20 is a fungible-token convention on the Hoosat chain: state
//! changes are ASCII payloads embedded inside redeem scripts and
//! published through a two-phase commit/reveal transaction pair.  This
//! crate provides the canonical payload formatter, the commit-envelope
//! redeem script builder, the commit/reveal transaction factories, and
//! the protocol fee table.

pub mod commit;
pub mod envelope;
pub mod fees;
pub mod operation;

mod error;
pub use commit::{build_commit, build_reveal, CommitPair};
pub use envelope::{build_redeem_script, extract_payload, hash_redeem_script};
pub use error::Hrc20Error;
pub use operation::Hrc20Operation;
