//! Opcode constants for Hoosat standard scripts.
//!
//! Hoosat scripts are a Bitcoin derivative; only the subset of opcodes
//! appearing in standard pay-to-pubkey, pay-to-script-hash, and HRC-20
//! data-carrier scripts is defined here.

/// Push an empty value onto the stack (also known as OP_0).
pub const OP_FALSE: u8 = 0x00;

/// Smallest direct data push (1 byte).
pub const OP_DATA_1: u8 = 0x01;

/// Direct push of 32 bytes (Schnorr public keys, script hashes).
pub const OP_DATA_32: u8 = 0x20;

/// Direct push of 33 bytes (compressed ECDSA public keys).
pub const OP_DATA_33: u8 = 0x21;

/// Largest direct data push (75 bytes).
pub const OP_DATA_75: u8 = 0x4b;

/// Push data with a 1-byte length prefix (76-255 bytes).
pub const OP_PUSHDATA1: u8 = 0x4c;

/// Push data with a 2-byte little-endian length prefix (256-65535 bytes).
pub const OP_PUSHDATA2: u8 = 0x4d;

/// Push data with a 4-byte little-endian length prefix.
pub const OP_PUSHDATA4: u8 = 0x4e;

/// Conditional execution start.
pub const OP_IF: u8 = 0x63;

/// Conditional execution end.
pub const OP_ENDIF: u8 = 0x68;

/// Byte-wise equality check.
pub const OP_EQUAL: u8 = 0x87;

/// BLAKE3 hash of the top stack element (P2SH script hashing).
pub const OP_BLAKE3: u8 = 0xaa;

/// ECDSA signature check against a 33-byte compressed public key.
pub const OP_CHECKSIG_ECDSA: u8 = 0xab;

/// Schnorr signature check against a 32-byte x-only public key.
pub const OP_CHECKSIG: u8 = 0xac;
