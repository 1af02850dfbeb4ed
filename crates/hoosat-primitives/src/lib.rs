/// Hoosat SDK - Hashing, hex, and binary serialization primitives.
///
/// This crate provides the foundational building blocks for the Hoosat SDK:
/// - Hash functions (SHA-256, double SHA-256, keyed BLAKE3 domains,
///   BIP-340 tagged hashing)
/// - Strict lowercase hex encoding/decoding
/// - Variable-length integer encoding
/// - `HtnReader`/`HtnWriter` for Hoosat wire-format binary data

pub mod hash;
pub mod hexutil;
pub mod util;

mod error;
pub use error::PrimitivesError;
