//! Strict lowercase hex encoding and decoding.
//!
//! Thin typed wrappers over the `hex` crate.  Decoding rejects odd-length
//! input and non-hex digits with `PrimitivesError::InvalidHex`.

use crate::PrimitivesError;

/// Encode bytes as a lowercase hex string.
///
/// # Arguments
/// * `data` - Byte slice to encode.
///
/// # Returns
/// A lowercase hex string of twice the input length.
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Decode a hex string into bytes.
///
/// Accepts both upper- and lowercase digits.  Odd-length input and
/// non-hex characters are rejected.
///
/// # Arguments
/// * `s` - The hex string to decode.
///
/// # Returns
/// The decoded bytes, or `PrimitivesError::InvalidHex` on malformed input.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    hex::decode(s).map_err(|e| PrimitivesError::InvalidHex(e.to_string()))
}

/// Decode a hex string into a fixed 32-byte array.
///
/// Used for transaction ids and script hashes.
///
/// # Arguments
/// * `s` - A 64-character hex string.
///
/// # Returns
/// The decoded 32-byte array, or an error if the length is wrong.
pub fn decode_hex_32(s: &str) -> Result<[u8; 32], PrimitivesError> {
    let bytes = decode_hex(s)?;
    if bytes.len() != 32 {
        return Err(PrimitivesError::InvalidHash(format!(
            "expected 32 bytes, got {}",
            bytes.len()
        )));
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}
