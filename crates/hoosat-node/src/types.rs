//! Serde types for the node's JSON REST surface.
//!
//! The REST transaction form mirrors the wire encoding field-for-field,
//! with byte strings as hex and outpoint ids as big-endian hex.

use serde::{Deserialize, Serialize};

use hoosat_primitives::hexutil::decode_hex;
use hoosat_transaction::{
    Outpoint, ScriptPublicKey, Transaction, UtxoEntry,
};

use crate::NodeError;

/// An outpoint in REST form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcOutpoint {
    /// The transaction id as big-endian hex.
    pub transaction_id: String,
    /// The output index.
    pub index: u32,
}

/// A script public key in REST form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcScriptPublicKey {
    /// Script version.
    pub version: u16,
    /// The script bytes as hex.
    pub script_public_key: String,
}

/// A transaction input in REST form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransactionInput {
    /// The outpoint being spent.
    pub previous_outpoint: RpcOutpoint,
    /// The signature script as hex.
    pub signature_script: String,
    /// The sequence number.
    pub sequence: u64,
    /// The sig-op count.
    pub sig_op_count: u8,
}

/// A transaction output in REST form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransactionOutput {
    /// The amount in sompi.
    pub amount: u64,
    /// The destination script.
    pub script_public_key: RpcScriptPublicKey,
}

/// A full transaction in REST form, as submitted to `POST /transactions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    /// Transaction version.
    pub version: u16,
    /// The inputs.
    pub inputs: Vec<RpcTransactionInput>,
    /// The outputs.
    pub outputs: Vec<RpcTransactionOutput>,
    /// The lock time.
    pub lock_time: u64,
    /// The subnetwork id as hex (40 characters).
    pub subnetwork_id: String,
    /// Gas.
    pub gas: u64,
    /// The payload as hex.
    pub payload: String,
}

impl From<&Transaction> for RpcTransaction {
    fn from(tx: &Transaction) -> Self {
        RpcTransaction {
            version: tx.version,
            inputs: tx
                .inputs
                .iter()
                .map(|input| RpcTransactionInput {
                    previous_outpoint: RpcOutpoint {
                        transaction_id: input.previous_outpoint.transaction_id_hex(),
                        index: input.previous_outpoint.index,
                    },
                    signature_script: hex::encode(&input.signature_script),
                    sequence: input.sequence,
                    sig_op_count: input.sig_op_count,
                })
                .collect(),
            outputs: tx
                .outputs
                .iter()
                .map(|output| RpcTransactionOutput {
                    amount: output.value,
                    script_public_key: RpcScriptPublicKey {
                        version: output.script_public_key.version,
                        script_public_key: hex::encode(&output.script_public_key.script),
                    },
                })
                .collect(),
            lock_time: tx.lock_time,
            subnetwork_id: hex::encode(tx.subnetwork_id),
            gas: tx.gas,
            payload: hex::encode(&tx.payload),
        }
    }
}

/// Request body for `POST /transactions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTransactionRequest {
    /// The transaction to broadcast.
    pub transaction: RpcTransaction,
}

/// Response body of `POST /transactions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTransactionResponse {
    /// The accepted transaction's id.
    pub transaction_id: String,
}

/// One UTXO as reported by `GET /addresses/{address}/utxos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUtxo {
    /// The outpoint.
    pub outpoint: RpcOutpoint,
    /// The amount in sompi.
    pub amount: u64,
    /// The locking script.
    pub script_public_key: RpcScriptPublicKey,
    /// The owning address.
    #[serde(default)]
    pub address: Option<String>,
}

impl NodeUtxo {
    /// Convert the REST form into the typed `UtxoEntry`.
    ///
    /// # Returns
    /// The `UtxoEntry`, or `InvalidResponse` when a hex field is malformed.
    pub fn into_utxo_entry(self) -> Result<UtxoEntry, NodeError> {
        let outpoint = Outpoint::from_hex(&self.outpoint.transaction_id, self.outpoint.index)
            .map_err(|e| NodeError::InvalidResponse(format!("bad outpoint id: {}", e)))?;
        let script = decode_hex(&self.script_public_key.script_public_key)
            .map_err(|e| NodeError::InvalidResponse(format!("bad script hex: {}", e)))?;
        Ok(UtxoEntry {
            outpoint,
            amount: self.amount,
            script_public_key: ScriptPublicKey {
                version: self.script_public_key.version,
                script,
            },
            address: self.address,
        })
    }
}

/// Response of `GET /addresses/{address}/balance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeBalance {
    /// Confirmed sompi.
    pub confirmed: u64,
    /// Pending sompi.
    pub pending: u64,
}
