//! Hoosat SDK - Script building and address handling.
//!
//! Provides the script type with minimal push-data encoding, the opcode
//! constants used by Hoosat standard scripts, the CashAddr-style bech32
//! address codec with configurable prefix, and the standard
//! script-public-key generators.

pub mod address;
pub mod opcodes;
pub mod script;
pub mod standard;

mod error;
pub use error::ScriptError;
pub use address::{Address, AddressType, Prefix};
pub use script::Script;
