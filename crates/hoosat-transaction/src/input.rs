//! Transaction input referencing a previous output.
//!
//! Contains the outpoint of the output being spent, the signature script
//! (empty until signing), the 64-bit sequence, and the sig-op count.
//! Provides binary serialization following the Hoosat wire format.

use hoosat_primitives::hexutil::{decode_hex_32, encode_hex};
use hoosat_primitives::util::{HtnReader, HtnWriter};

use crate::TransactionError;

/// Default sequence number for finalized inputs.
pub const DEFAULT_SEQUENCE: u64 = 0;

/// Sig-op count for standard single-signature inputs.
pub const DEFAULT_SIG_OP_COUNT: u8 = 1;

/// A reference to a specific output of a previous transaction.
///
/// Equality is by value; the transaction id is stored in hash order and
/// rendered as big-endian hex for display and the node API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Outpoint {
    /// The 32-byte id of the transaction holding the output.
    pub transaction_id: [u8; 32],
    /// Index of the output within that transaction.
    pub index: u32,
}

impl Outpoint {
    /// Create an outpoint from a transaction id and output index.
    ///
    /// # Arguments
    /// * `transaction_id` - The 32-byte transaction id.
    /// * `index` - The output index.
    ///
    /// # Returns
    /// The new `Outpoint`.
    pub fn new(transaction_id: [u8; 32], index: u32) -> Self {
        Outpoint { transaction_id, index }
    }

    /// Create an outpoint from a hex-encoded transaction id.
    ///
    /// # Arguments
    /// * `transaction_id_hex` - A 64-character hex transaction id.
    /// * `index` - The output index.
    ///
    /// # Returns
    /// The new `Outpoint`, or an error if the hex is malformed.
    pub fn from_hex(transaction_id_hex: &str, index: u32) -> Result<Self, TransactionError> {
        let transaction_id = decode_hex_32(transaction_id_hex)?;
        Ok(Outpoint { transaction_id, index })
    }

    /// Return the transaction id as a hex string.
    ///
    /// # Returns
    /// A 64-character lowercase hex string.
    pub fn transaction_id_hex(&self) -> String {
        encode_hex(&self.transaction_id)
    }
}

/// A single input in a Hoosat transaction.
///
/// # Wire format
///
/// | Field             | Size              |
/// |-------------------|-------------------|
/// | transaction id    | 32 bytes          |
/// | output index      | 4 bytes (LE)      |
/// | signature script  | VarInt + bytes    |
/// | sequence          | 8 bytes (LE)      |
/// | sig-op count      | 1 byte            |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    /// The outpoint of the output being spent.
    pub previous_outpoint: Outpoint,

    /// The signature script proving authorization.  Empty until signed.
    pub signature_script: Vec<u8>,

    /// Sequence number.  Zero for finalized inputs.
    pub sequence: u64,

    /// Number of signature operations in the signature script.  Always 1
    /// for the standard single-signature inputs this system produces.
    pub sig_op_count: u8,
}

impl TransactionInput {
    /// Create an unsigned input spending the given outpoint.
    ///
    /// # Arguments
    /// * `previous_outpoint` - The output to spend.
    ///
    /// # Returns
    /// A `TransactionInput` with an empty signature script, default
    /// sequence, and a sig-op count of 1.
    pub fn new(previous_outpoint: Outpoint) -> Self {
        TransactionInput {
            previous_outpoint,
            signature_script: Vec::new(),
            sequence: DEFAULT_SEQUENCE,
            sig_op_count: DEFAULT_SIG_OP_COUNT,
        }
    }

    /// Deserialize a `TransactionInput` from an `HtnReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded input.
    ///
    /// # Returns
    /// `Ok(TransactionInput)` on success, or a `TransactionError` if the
    /// data is truncated.
    pub fn read_from(reader: &mut HtnReader) -> Result<Self, TransactionError> {
        let txid_bytes = reader.read_bytes(32).map_err(|e| {
            TransactionError::SerializationError(format!("reading outpoint id: {}", e))
        })?;
        let mut transaction_id = [0u8; 32];
        transaction_id.copy_from_slice(txid_bytes);

        let index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading outpoint index: {}", e))
        })?;

        let signature_script = reader
            .read_var_bytes()
            .map_err(|e| {
                TransactionError::SerializationError(format!("reading signature script: {}", e))
            })?
            .to_vec();

        let sequence = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence: {}", e))
        })?;

        let sig_op_count = reader.read_u8().map_err(|e| {
            TransactionError::SerializationError(format!("reading sig-op count: {}", e))
        })?;

        Ok(TransactionInput {
            previous_outpoint: Outpoint { transaction_id, index },
            signature_script,
            sequence,
            sig_op_count,
        })
    }

    /// Serialize this input into an `HtnWriter`.
    ///
    /// If `clear_signature` is set, the signature script is written as
    /// zero-length; the transaction-id hash uses this form so ids are
    /// stable across signing.
    ///
    /// # Arguments
    /// * `writer` - The writer to append serialized bytes to.
    /// * `clear_signature` - Omit the signature script when `true`.
    pub fn write_to(&self, writer: &mut HtnWriter, clear_signature: bool) {
        writer.write_bytes(&self.previous_outpoint.transaction_id);
        writer.write_u32_le(self.previous_outpoint.index);
        if clear_signature {
            writer.write_var_bytes(&[]);
        } else {
            writer.write_var_bytes(&self.signature_script);
        }
        writer.write_u64_le(self.sequence);
        writer.write_u8(self.sig_op_count);
    }
}
