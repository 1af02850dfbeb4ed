//! Signature hash computation for transaction signing.
//!
//! Computes the digest a signer authorizes when spending a transaction
//! input.  Hoosat uses a BIP-143-style scheme: the hashes of the
//! previous outpoints, sequences, sig-op counts, outputs, and payload
//! are each computed once per transaction and reused for every input.
//! The ECDSA digest finalizes the per-input preimage with double
//! SHA-256; the Schnorr digest uses BIP-340 tagged hashing.

use hoosat_primitives::hash::{
    blake3_keyed, sha256d, tagged_sha256, TRANSACTION_SIGNING_DOMAIN,
};
use hoosat_primitives::util::HtnWriter;

use crate::output::ScriptPublicKey;
use crate::transaction::Transaction;
use crate::TransactionError;

/// Sign all inputs and all outputs.  The only hash type this system uses;
/// the byte is appended to signatures in signature scripts.
pub const SIG_HASH_ALL: u8 = 0x01;

/// Lazily-computed per-transaction hashes reused across input digests.
///
/// Each slot is computed on first access and then shared by every input
/// of the same transaction.  A cache must not be reused across different
/// transactions.
#[derive(Debug, Default)]
pub struct ReusedValues {
    previous_outputs: Option<[u8; 32]>,
    sequences: Option<[u8; 32]>,
    sig_op_counts: Option<[u8; 32]>,
    outputs: Option<[u8; 32]>,
    payload: Option<[u8; 32]>,
}

impl ReusedValues {
    /// Create an empty cache.
    ///
    /// # Returns
    /// A `ReusedValues` with no hashes computed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash of all input outpoints (txid ‖ index each).
    fn previous_outputs_hash(&mut self, tx: &Transaction) -> [u8; 32] {
        if let Some(hash) = self.previous_outputs {
            return hash;
        }
        let mut writer = HtnWriter::with_capacity(tx.inputs.len() * 36);
        for input in &tx.inputs {
            writer.write_bytes(&input.previous_outpoint.transaction_id);
            writer.write_u32_le(input.previous_outpoint.index);
        }
        let hash = blake3_keyed(TRANSACTION_SIGNING_DOMAIN, writer.as_bytes());
        self.previous_outputs = Some(hash);
        hash
    }

    /// Hash of all input sequences (u64 LE each).
    fn sequences_hash(&mut self, tx: &Transaction) -> [u8; 32] {
        if let Some(hash) = self.sequences {
            return hash;
        }
        let mut writer = HtnWriter::with_capacity(tx.inputs.len() * 8);
        for input in &tx.inputs {
            writer.write_u64_le(input.sequence);
        }
        let hash = blake3_keyed(TRANSACTION_SIGNING_DOMAIN, writer.as_bytes());
        self.sequences = Some(hash);
        hash
    }

    /// Hash of all input sig-op counts (one byte each).
    fn sig_op_counts_hash(&mut self, tx: &Transaction) -> [u8; 32] {
        if let Some(hash) = self.sig_op_counts {
            return hash;
        }
        let mut writer = HtnWriter::with_capacity(tx.inputs.len());
        for input in &tx.inputs {
            writer.write_u8(input.sig_op_count);
        }
        let hash = blake3_keyed(TRANSACTION_SIGNING_DOMAIN, writer.as_bytes());
        self.sig_op_counts = Some(hash);
        hash
    }

    /// Hash of all serialized outputs.
    fn outputs_hash(&mut self, tx: &Transaction) -> [u8; 32] {
        if let Some(hash) = self.outputs {
            return hash;
        }
        let mut writer = HtnWriter::new();
        for output in &tx.outputs {
            output.write_to(&mut writer);
        }
        let hash = blake3_keyed(TRANSACTION_SIGNING_DOMAIN, writer.as_bytes());
        self.outputs = Some(hash);
        hash
    }

    /// Hash of the transaction payload; all-zero while the payload is
    /// empty (the native-subnetwork convention).
    fn payload_hash(&mut self, tx: &Transaction) -> [u8; 32] {
        if let Some(hash) = self.payload {
            return hash;
        }
        let hash = if tx.payload.is_empty() {
            [0u8; 32]
        } else {
            blake3_keyed(TRANSACTION_SIGNING_DOMAIN, &tx.payload)
        };
        self.payload = Some(hash);
        hash
    }
}

/// Assemble the per-input sighash preimage.
///
/// Field order: version ‖ previous-outputs hash ‖ sequences hash ‖
/// sig-op-counts hash ‖ outpoint(i) ‖ spent script version ‖ spent script ‖
/// spent amount ‖ sequence(i) ‖ sig-op count(i) ‖ outputs hash ‖ lock time ‖
/// subnetwork id ‖ gas ‖ payload hash ‖ hash type.
fn calc_preimage(
    tx: &Transaction,
    input_index: usize,
    spent_script_public_key: &ScriptPublicKey,
    spent_amount: u64,
    hash_type: u8,
    reused: &mut ReusedValues,
) -> Result<Vec<u8>, TransactionError> {
    let input = tx.inputs.get(input_index).ok_or_else(|| {
        TransactionError::InvalidTransaction(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        ))
    })?;

    let mut writer = HtnWriter::with_capacity(256);
    writer.write_u16_le(tx.version);
    writer.write_bytes(&reused.previous_outputs_hash(tx));
    writer.write_bytes(&reused.sequences_hash(tx));
    writer.write_bytes(&reused.sig_op_counts_hash(tx));

    writer.write_bytes(&input.previous_outpoint.transaction_id);
    writer.write_u32_le(input.previous_outpoint.index);

    writer.write_u16_le(spent_script_public_key.version);
    writer.write_var_bytes(&spent_script_public_key.script);
    writer.write_u64_le(spent_amount);

    writer.write_u64_le(input.sequence);
    writer.write_u8(input.sig_op_count);

    writer.write_bytes(&reused.outputs_hash(tx));
    writer.write_u64_le(tx.lock_time);
    writer.write_bytes(&tx.subnetwork_id);
    writer.write_u64_le(tx.gas);
    writer.write_bytes(&reused.payload_hash(tx));
    writer.write_u8(hash_type);

    Ok(writer.into_bytes())
}

/// Compute the Schnorr signature hash for a given input.
///
/// Finalizes the preimage with the domain-separated single SHA-256 of
/// BIP-340 tagged hashing.
///
/// # Arguments
/// * `tx` - The transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `spent_script_public_key` - The script public key of the output being spent.
/// * `spent_amount` - The sompi value of the output being spent.
/// * `hash_type` - The hash type (`SIG_HASH_ALL`).
/// * `reused` - The per-transaction hash cache.
///
/// # Returns
/// The 32-byte digest for the Schnorr signer.
pub fn sighash_schnorr(
    tx: &Transaction,
    input_index: usize,
    spent_script_public_key: &ScriptPublicKey,
    spent_amount: u64,
    hash_type: u8,
    reused: &mut ReusedValues,
) -> Result<[u8; 32], TransactionError> {
    let preimage = calc_preimage(
        tx,
        input_index,
        spent_script_public_key,
        spent_amount,
        hash_type,
        reused,
    )?;
    Ok(tagged_sha256(TRANSACTION_SIGNING_DOMAIN, &preimage))
}

/// Compute the ECDSA signature hash for a given input.
///
/// Finalizes the preimage with double SHA-256.
///
/// # Arguments
/// * `tx` - The transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `spent_script_public_key` - The script public key of the output being spent.
/// * `spent_amount` - The sompi value of the output being spent.
/// * `hash_type` - The hash type (`SIG_HASH_ALL`).
/// * `reused` - The per-transaction hash cache.
///
/// # Returns
/// The 32-byte digest for the ECDSA signer.
pub fn sighash_ecdsa(
    tx: &Transaction,
    input_index: usize,
    spent_script_public_key: &ScriptPublicKey,
    spent_amount: u64,
    hash_type: u8,
    reused: &mut ReusedValues,
) -> Result<[u8; 32], TransactionError> {
    let preimage = calc_preimage(
        tx,
        input_index,
        spent_script_public_key,
        spent_amount,
        hash_type,
        reused,
    )?;
    Ok(sha256d(&preimage))
}
