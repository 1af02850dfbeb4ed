//! Transaction output with amount and versioned script public key.

use hoosat_primitives::util::{HtnReader, HtnWriter};

use crate::TransactionError;

/// A versioned script public key.
///
/// Hoosat script public keys carry a 16-bit version alongside the script
/// bytes; version 0 is the only version in use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptPublicKey {
    /// Script version.  Zero for all current scripts.
    pub version: u16,
    /// The raw script bytes.
    pub script: Vec<u8>,
}

impl ScriptPublicKey {
    /// Create a version-0 script public key from script bytes.
    ///
    /// # Arguments
    /// * `script` - The raw script bytes.
    ///
    /// # Returns
    /// A `ScriptPublicKey` with version 0.
    pub fn new(script: Vec<u8>) -> Self {
        ScriptPublicKey { version: 0, script }
    }
}

/// A single output in a Hoosat transaction.
///
/// # Wire format
///
/// | Field           | Size             |
/// |-----------------|------------------|
/// | amount          | 8 bytes (LE)     |
/// | script version  | 2 bytes (LE)     |
/// | script          | VarInt + bytes   |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOutput {
    /// The amount in sompi (1 HTN = 10^8 sompi) locked by this output.
    pub value: u64,

    /// The script public key defining spending conditions.
    pub script_public_key: ScriptPublicKey,
}

impl TransactionOutput {
    /// Create an output paying the given amount to the given script.
    ///
    /// # Arguments
    /// * `value` - The amount in sompi.
    /// * `script_public_key` - The destination script.
    ///
    /// # Returns
    /// The new `TransactionOutput`.
    pub fn new(value: u64, script_public_key: ScriptPublicKey) -> Self {
        TransactionOutput { value, script_public_key }
    }

    /// Deserialize a `TransactionOutput` from an `HtnReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded output.
    ///
    /// # Returns
    /// `Ok(TransactionOutput)` on success, or a `TransactionError` if the
    /// data is truncated.
    pub fn read_from(reader: &mut HtnReader) -> Result<Self, TransactionError> {
        let value = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading amount: {}", e))
        })?;

        let version = reader.read_u16_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading script version: {}", e))
        })?;

        let script = reader
            .read_var_bytes()
            .map_err(|e| {
                TransactionError::SerializationError(format!("reading script: {}", e))
            })?
            .to_vec();

        Ok(TransactionOutput {
            value,
            script_public_key: ScriptPublicKey { version, script },
        })
    }

    /// Serialize this output into an `HtnWriter`.
    ///
    /// # Arguments
    /// * `writer` - The writer to append serialized bytes to.
    pub fn write_to(&self, writer: &mut HtnWriter) {
        writer.write_u64_le(self.value);
        writer.write_u16_le(self.script_public_key.version);
        writer.write_var_bytes(&self.script_public_key.script);
    }

    /// Serialize this output to a byte vector.
    ///
    /// Used both for wire encoding and as the per-output contribution to
    /// the sighash outputs hash.
    ///
    /// # Returns
    /// The wire-format bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = HtnWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}
