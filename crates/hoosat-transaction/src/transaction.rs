//! Core transaction type for the Hoosat blockchain.
//!
//! Represents a complete transaction with version, inputs, outputs, lock
//! time, subnetwork id, gas, and payload.  Supports binary and hex
//! serialization and keyed-BLAKE3 transaction-id computation.

use hoosat_primitives::hash::{blake3_keyed, TRANSACTION_ID_DOMAIN};
use hoosat_primitives::util::{HtnReader, HtnWriter, VarInt};

use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::TransactionError;

/// The transaction format version in current use.
pub const TX_VERSION: u16 = 0;

/// The native subnetwork id (all zeros).
pub const SUBNETWORK_ID_NATIVE: [u8; 20] = [0u8; 20];

/// A Hoosat transaction.
///
/// The subnetwork id, gas, and payload fields exist on the wire but are
/// zero/empty for every transaction this system produces.
///
/// # Wire format
///
/// | Field         | Size                   |
/// |---------------|------------------------|
/// | version       | 2 bytes (LE)           |
/// | input count   | VarInt                 |
/// | inputs        | variable (per input)   |
/// | output count  | VarInt                 |
/// | outputs       | variable (per output)  |
/// | lock_time     | 8 bytes (LE)           |
/// | subnetwork_id | 20 bytes               |
/// | gas           | 8 bytes (LE)           |
/// | payload       | VarInt + bytes         |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction format version.
    pub version: u16,

    /// Ordered list of transaction inputs.
    pub inputs: Vec<TransactionInput>,

    /// Ordered list of transaction outputs.
    pub outputs: Vec<TransactionOutput>,

    /// Lock time.  Zero for immediately-valid transactions.
    pub lock_time: u64,

    /// Subnetwork id.  All zeros for native transactions.
    pub subnetwork_id: [u8; 20],

    /// Gas.  Zero outside gas-carrying subnetworks.
    pub gas: u64,

    /// Arbitrary payload.  Empty for native transactions.
    pub payload: Vec<u8>,
}

impl Transaction {
    /// Create a new empty native transaction.
    ///
    /// # Returns
    /// A `Transaction` with no inputs or outputs, zero lock time, the
    /// native subnetwork id, zero gas, and an empty payload.
    pub fn new() -> Self {
        Transaction {
            version: TX_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
            subnetwork_id: SUBNETWORK_ID_NATIVE,
            gas: 0,
            payload: Vec::new(),
        }
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize this transaction to raw wire-format bytes.
    ///
    /// # Returns
    /// A `Vec<u8>` containing the full encoding including signature
    /// scripts.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.serialize(false)
    }

    /// Serialize this transaction to a hex string.
    ///
    /// # Returns
    /// A lowercase hex-encoded string of the raw bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    fn serialize(&self, clear_signatures: bool) -> Vec<u8> {
        let mut writer = HtnWriter::with_capacity(256);
        writer.write_u16_le(self.version);

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(&mut writer, clear_signatures);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(&mut writer);
        }

        writer.write_u64_le(self.lock_time);
        writer.write_bytes(&self.subnetwork_id);
        writer.write_u64_le(self.gas);
        writer.write_var_bytes(&self.payload);
        writer.into_bytes()
    }

    /// Parse a transaction from raw bytes.
    ///
    /// The byte slice must contain exactly one complete transaction with
    /// no trailing data.
    ///
    /// # Arguments
    /// * `bytes` - The raw transaction bytes.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` if the data
    /// is truncated, malformed, or has trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = HtnReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize a transaction from an `HtnReader`.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of a serialized
    ///   transaction.
    ///
    /// # Returns
    /// `Ok(Transaction)` on success, or a `TransactionError` on format
    /// errors.
    pub fn read_from(reader: &mut HtnReader) -> Result<Self, TransactionError> {
        let version = reader.read_u16_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading version: {}", e))
        })?;

        let input_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading input count: {}", e))
        })?;
        let mut inputs = Vec::with_capacity(input_count.value() as usize);
        for _ in 0..input_count.value() {
            inputs.push(TransactionInput::read_from(reader)?);
        }

        let output_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading output count: {}", e))
        })?;
        let mut outputs = Vec::with_capacity(output_count.value() as usize);
        for _ in 0..output_count.value() {
            outputs.push(TransactionOutput::read_from(reader)?);
        }

        let lock_time = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading lock time: {}", e))
        })?;

        let subnetwork_bytes = reader.read_bytes(20).map_err(|e| {
            TransactionError::SerializationError(format!("reading subnetwork id: {}", e))
        })?;
        let mut subnetwork_id = [0u8; 20];
        subnetwork_id.copy_from_slice(subnetwork_bytes);

        let gas = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading gas: {}", e))
        })?;

        let payload = reader
            .read_var_bytes()
            .map_err(|e| TransactionError::SerializationError(format!("reading payload: {}", e)))?
            .to_vec();

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
            subnetwork_id,
            gas,
            payload,
        })
    }

    // -----------------------------------------------------------------
    // Transaction id
    // -----------------------------------------------------------------

    /// Compute the transaction id.
    ///
    /// Keyed BLAKE3 under the `TransactionID` domain over the encoding
    /// with signature scripts cleared, so the id does not change when
    /// signatures are attached.
    ///
    /// # Returns
    /// The 32-byte transaction id.
    pub fn transaction_id(&self) -> [u8; 32] {
        blake3_keyed(TRANSACTION_ID_DOMAIN, &self.serialize(true))
    }

    /// Compute the transaction id as a hex string.
    ///
    /// # Returns
    /// A 64-character lowercase hex string.
    pub fn transaction_id_hex(&self) -> String {
        hex::encode(self.transaction_id())
    }

    // -----------------------------------------------------------------
    // Inputs and outputs
    // -----------------------------------------------------------------

    /// Append a `TransactionInput` to this transaction.
    ///
    /// # Arguments
    /// * `input` - The input to add.
    pub fn add_input(&mut self, input: TransactionInput) {
        self.inputs.push(input);
    }

    /// Append a `TransactionOutput` to this transaction.
    ///
    /// # Arguments
    /// * `output` - The output to add.
    pub fn add_output(&mut self, output: TransactionOutput) {
        self.outputs.push(output);
    }

    /// Compute the sum of all output amounts.
    ///
    /// # Returns
    /// The total sompi across all outputs.
    pub fn total_output_value(&self) -> u64 {
        self.outputs.iter().map(|o| o.value).sum()
    }

    /// Return the size of this transaction in bytes.
    ///
    /// # Returns
    /// The byte length of the serialized transaction.
    pub fn size(&self) -> usize {
        self.to_bytes().len()
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Transaction {
    /// Display the transaction as its hex-encoded serialization.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
