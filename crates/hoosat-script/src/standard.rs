//! Standard script generation.
//!
//! Builds the script public keys paying to each address type and the
//! signature scripts spending them.  Script shapes:
//!
//! | Type    | Script                              |
//! |---------|-------------------------------------|
//! | Schnorr | `OP_DATA_32 <pk> OP_CHECKSIG`       |
//! | ECDSA   | `OP_DATA_33 <pk> OP_CHECKSIG_ECDSA` |
//! | P2SH    | `OP_BLAKE3 OP_DATA_32 <hash> OP_EQUAL` |

use crate::address::{Address, AddressType};
use crate::opcodes::*;
use crate::{Script, ScriptError};

/// Build a Schnorr pay-to-pubkey script public key.
///
/// # Arguments
/// * `pubkey` - The 32-byte x-only public key.
///
/// # Returns
/// The 34-byte script `0x20 <pk> 0xac`.
pub fn pay_to_pubkey_script(pubkey: &[u8; 32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(34);
    bytes.push(OP_DATA_32);
    bytes.extend_from_slice(pubkey);
    bytes.push(OP_CHECKSIG);
    bytes
}

/// Build an ECDSA pay-to-pubkey script public key.
///
/// # Arguments
/// * `pubkey` - The 33-byte compressed public key.
///
/// # Returns
/// The 35-byte script `0x21 <pk> 0xab`.
pub fn pay_to_pubkey_ecdsa_script(pubkey: &[u8; 33]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(35);
    bytes.push(OP_DATA_33);
    bytes.extend_from_slice(pubkey);
    bytes.push(OP_CHECKSIG_ECDSA);
    bytes
}

/// Build a pay-to-script-hash script public key.
///
/// # Arguments
/// * `script_hash` - The 32-byte hash of the redeem script.
///
/// # Returns
/// The 35-byte script `0xaa 0x20 <hash> 0x87`.
pub fn pay_to_script_hash_script(script_hash: &[u8; 32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(35);
    bytes.push(OP_BLAKE3);
    bytes.push(OP_DATA_32);
    bytes.extend_from_slice(script_hash);
    bytes.push(OP_EQUAL);
    bytes
}

/// Build the script public key paying to the given address.
///
/// # Arguments
/// * `address` - The destination address.
///
/// # Returns
/// The script bytes for the address type.
pub fn pay_to_address_script(address: &Address) -> Vec<u8> {
    match address.address_type {
        AddressType::Schnorr => {
            let mut pk = [0u8; 32];
            pk.copy_from_slice(&address.payload);
            pay_to_pubkey_script(&pk)
        }
        AddressType::Ecdsa => {
            let mut pk = [0u8; 33];
            pk.copy_from_slice(&address.payload);
            pay_to_pubkey_ecdsa_script(&pk)
        }
        AddressType::ScriptHash => {
            let mut hash = [0u8; 32];
            hash.copy_from_slice(&address.payload);
            pay_to_script_hash_script(&hash)
        }
    }
}

/// Extract the script hash from a pay-to-script-hash script public key.
///
/// # Arguments
/// * `script` - The script public key bytes.
///
/// # Returns
/// `Some(hash)` when the script matches the P2SH shape, otherwise `None`.
pub fn extract_script_hash(script: &[u8]) -> Option<[u8; 32]> {
    if script.len() == 35
        && script[0] == OP_BLAKE3
        && script[1] == OP_DATA_32
        && script[34] == OP_EQUAL
    {
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&script[2..34]);
        Some(hash)
    } else {
        None
    }
}

/// Build a pay-to-pubkey signature script.
///
/// # Arguments
/// * `sig_with_hashtype` - The signature with the hashtype byte appended.
///
/// # Returns
/// A script containing a single push of the signature.
pub fn signature_script(sig_with_hashtype: &[u8]) -> Result<Vec<u8>, ScriptError> {
    let mut script = Script::new();
    script.append_push_data(sig_with_hashtype)?;
    Ok(script.into_bytes())
}

/// Build a P2SH signature script spending a script-hash output.
///
/// The spender provides the signature and the redeem script preimage:
/// `<push sig> <push redeem_script>`.
///
/// # Arguments
/// * `sig_with_hashtype` - The signature with the hashtype byte appended.
/// * `redeem_script` - The redeem script whose hash the output commits to.
///
/// # Returns
/// The signature script bytes.
pub fn p2sh_signature_script(
    sig_with_hashtype: &[u8],
    redeem_script: &[u8],
) -> Result<Vec<u8>, ScriptError> {
    let mut script = Script::new();
    script.append_push_data(sig_with_hashtype)?;
    script.append_push_data(redeem_script)?;
    Ok(script.into_bytes())
}
