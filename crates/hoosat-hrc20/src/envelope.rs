//! The HRC-20 commit envelope.
//!
//! The payload rides inside the redeem script of a P2SH output:
//!
//! ```text
//! <pubkey push> <OP_CHECKSIG | OP_CHECKSIG_ECDSA> OP_FALSE OP_IF <payload pushes> OP_ENDIF
//! ```
//!
//! The `OP_FALSE OP_IF ... OP_ENDIF` block never executes, so the payload
//! costs nothing at spend time but becomes visible on-chain when the
//! reveal transaction publishes the script.  The script is canonical and
//! deterministic from (pubkey, payload): the same pair always hashes to
//! the same P2SH address.  Funds sent to a script hash derived from even
//! one differing payload byte are unrecoverable, so the builder exposes
//! script and hash together (see `commit`).

use hoosat_primitives::hash::sha256d;
use hoosat_script::opcodes::{OP_CHECKSIG, OP_CHECKSIG_ECDSA, OP_ENDIF, OP_FALSE, OP_IF};
use hoosat_script::{Script, ScriptError};

use crate::Hrc20Error;

/// Maximum byte length of a single script data push.
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;

/// Build the redeem script embedding an HRC-20 payload.
///
/// Payloads longer than 520 bytes are split into successive 520-byte
/// pushes whose concatenation equals the payload.
///
/// # Arguments
/// * `signer_pubkey` - 32-byte x-only key (Schnorr) or 33-byte compressed
///   key (ECDSA), selected by `use_ecdsa`.
/// * `payload` - The canonical payload document bytes.
/// * `use_ecdsa` - Choose `OP_CHECKSIG_ECDSA` over `OP_CHECKSIG`.
///
/// # Returns
/// The redeem script bytes, or `InvalidPubkey` if the key length does
/// not match the curve.
pub fn build_redeem_script(
    signer_pubkey: &[u8],
    payload: &[u8],
    use_ecdsa: bool,
) -> Result<Vec<u8>, Hrc20Error> {
    let expected_len = if use_ecdsa { 33 } else { 32 };
    if signer_pubkey.len() != expected_len {
        return Err(Hrc20Error::Script(ScriptError::InvalidPubkey {
            expected: expected_len,
            got: signer_pubkey.len(),
        }));
    }

    let mut script = Script::new();
    script.append_push_data(signer_pubkey)?;
    script.append_opcode(if use_ecdsa { OP_CHECKSIG_ECDSA } else { OP_CHECKSIG })?;
    script.append_opcode(OP_FALSE)?;
    script.append_opcode(OP_IF)?;
    for chunk in payload.chunks(MAX_SCRIPT_ELEMENT_SIZE) {
        script.append_push_data(chunk)?;
    }
    script.append_opcode(OP_ENDIF)?;
    Ok(script.into_bytes())
}

/// Extract the payload carried by a redeem script.
///
/// Re-assembles the data pushes between `OP_FALSE OP_IF` and `OP_ENDIF`.
/// Used when only the stored redeem script survives (e.g. at reveal
/// time) and the operation's protocol fee must be re-derived.
///
/// # Arguments
/// * `redeem_script` - The redeem script bytes.
///
/// # Returns
/// `Some(payload)` when the script contains a well-formed envelope,
/// otherwise `None`.
pub fn extract_payload(redeem_script: &[u8]) -> Option<Vec<u8>> {
    use hoosat_script::opcodes::{OP_PUSHDATA1, OP_PUSHDATA2};

    // Find the envelope start: OP_FALSE OP_IF after the key and checksig.
    let start = redeem_script
        .windows(2)
        .position(|w| w == [OP_FALSE, OP_IF])?
        + 2;

    let mut payload = Vec::new();
    let mut pos = start;
    while pos < redeem_script.len() {
        match redeem_script[pos] {
            OP_ENDIF => return Some(payload),
            OP_PUSHDATA1 => {
                let len = *redeem_script.get(pos + 1)? as usize;
                payload.extend_from_slice(redeem_script.get(pos + 2..pos + 2 + len)?);
                pos += 2 + len;
            }
            OP_PUSHDATA2 => {
                let len = u16::from_le_bytes([
                    *redeem_script.get(pos + 1)?,
                    *redeem_script.get(pos + 2)?,
                ]) as usize;
                payload.extend_from_slice(redeem_script.get(pos + 3..pos + 3 + len)?);
                pos += 3 + len;
            }
            direct @ 0x01..=0x4b => {
                let len = direct as usize;
                payload.extend_from_slice(redeem_script.get(pos + 1..pos + 1 + len)?);
                pos += 1 + len;
            }
            _ => return None,
        }
    }
    None
}

/// Hash a redeem script.
///
/// Double SHA-256 of the script bytes.  This single quantity is both the
/// P2SH address payload and the hash inside the P2SH script public key.
///
/// # Arguments
/// * `redeem_script` - The redeem script bytes.
///
/// # Returns
/// The 32-byte script hash.
pub fn hash_redeem_script(redeem_script: &[u8]) -> [u8; 32] {
    sha256d(redeem_script)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &[u8] = br#"{"p":"hrc-20","op":"mint","tick":"HOOS"}"#;

    /// Schnorr envelope structure: pk push, OP_CHECKSIG, OP_FALSE OP_IF,
    /// payload push, OP_ENDIF.
    #[test]
    fn test_schnorr_envelope_structure() {
        let pubkey = [0xAB; 32];
        let script = build_redeem_script(&pubkey, PAYLOAD, false).unwrap();

        assert_eq!(script[0], 0x20);
        assert_eq!(&script[1..33], &pubkey);
        assert_eq!(script[33], OP_CHECKSIG);
        assert_eq!(script[34], OP_FALSE);
        assert_eq!(script[35], OP_IF);
        assert_eq!(script[36] as usize, PAYLOAD.len());
        assert_eq!(&script[37..37 + PAYLOAD.len()], PAYLOAD);
        assert_eq!(*script.last().unwrap(), OP_ENDIF);
    }

    /// ECDSA envelope uses the 33-byte key and OP_CHECKSIG_ECDSA.
    #[test]
    fn test_ecdsa_envelope_structure() {
        let mut pubkey = [0xAB; 33];
        pubkey[0] = 0x02;
        let script = build_redeem_script(&pubkey, PAYLOAD, true).unwrap();
        assert_eq!(script[0], 0x21);
        assert_eq!(script[34], OP_CHECKSIG_ECDSA);
    }

    /// Wrong pubkey length for the selected curve is rejected.
    #[test]
    fn test_pubkey_length_mismatch_rejected() {
        assert!(build_redeem_script(&[0u8; 33], PAYLOAD, false).is_err());
        assert!(build_redeem_script(&[0u8; 32], PAYLOAD, true).is_err());
        assert!(build_redeem_script(&[0u8; 20], PAYLOAD, false).is_err());
    }

    /// Same (pubkey, payload) always yields the same script and hash.
    #[test]
    fn test_script_determinism() {
        let pubkey = [0x17; 32];
        let a = build_redeem_script(&pubkey, PAYLOAD, false).unwrap();
        let b = build_redeem_script(&pubkey, PAYLOAD, false).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_redeem_script(&a), hash_redeem_script(&b));
    }

    /// Any payload byte change changes the script hash.
    #[test]
    fn test_hash_sensitive_to_payload() {
        let pubkey = [0x17; 32];
        let a = build_redeem_script(&pubkey, PAYLOAD, false).unwrap();
        let mut altered = PAYLOAD.to_vec();
        altered[10] ^= 0x01;
        let b = build_redeem_script(&pubkey, &altered, false).unwrap();
        assert_ne!(hash_redeem_script(&a), hash_redeem_script(&b));
    }

    /// The embedded payload is recoverable from the script.
    #[test]
    fn test_extract_payload_roundtrip() {
        let script = build_redeem_script(&[0x17; 32], PAYLOAD, false).unwrap();
        assert_eq!(extract_payload(&script).as_deref(), Some(PAYLOAD));

        let long = vec![0x5A; 1200];
        let script = build_redeem_script(&[0x17; 32], &long, false).unwrap();
        assert_eq!(extract_payload(&script), Some(long));
    }

    /// Scripts without an envelope yield no payload.
    #[test]
    fn test_extract_payload_no_envelope() {
        assert_eq!(extract_payload(&[0x20; 34]), None);
        assert_eq!(extract_payload(&[]), None);
    }

    /// Payloads longer than 520 bytes split into chained pushes whose
    /// concatenation equals the payload.
    #[test]
    fn test_long_payload_chunking() {
        let pubkey = [0x17; 32];
        let payload = vec![0x5A; 1200];
        let script = build_redeem_script(&pubkey, &payload, false).unwrap();

        // Walk the pushes inside the OP_IF block and reassemble the data.
        let mut pos = 36; // past pk push, checksig, OP_FALSE, OP_IF
        let mut collected = Vec::new();
        while script[pos] != OP_ENDIF {
            let (len, header) = match script[pos] {
                0x4c => (script[pos + 1] as usize, 2),
                0x4d => (
                    u16::from_le_bytes([script[pos + 1], script[pos + 2]]) as usize,
                    3,
                ),
                direct => (direct as usize, 1),
            };
            assert!(len <= MAX_SCRIPT_ELEMENT_SIZE, "push exceeds element size limit");
            collected.extend_from_slice(&script[pos + header..pos + header + len]);
            pos += header + len;
        }
        assert_eq!(collected, payload);
    }
}
