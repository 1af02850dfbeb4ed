//! HTTP client for the node's REST surface.

use tracing::debug;

use hoosat_transaction::{Balance, Transaction, UtxoEntry};

use crate::types::{
    NodeBalance, NodeUtxo, RpcTransaction, SubmitTransactionRequest, SubmitTransactionResponse,
};
use crate::NodeError;

/// HTTP client for a Hoosat node's REST API.
#[derive(Debug, Clone)]
pub struct NodeClient {
    /// Base URL of the API (e.g. `https://api.network.hoosat.fi`).
    base_url: String,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl NodeClient {
    /// Create a new client against the given API base URL.
    ///
    /// # Arguments
    /// * `base_url` - The API host URL, without a trailing slash.
    ///
    /// # Returns
    /// A `NodeClient`.
    pub fn new(base_url: impl Into<String>) -> Self {
        NodeClient {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the spendable UTXOs of an address.
    ///
    /// # Arguments
    /// * `address` - The address string.
    ///
    /// # Returns
    /// The typed UTXO entries, or a `NodeError`.
    pub async fn get_utxos(&self, address: &str) -> Result<Vec<UtxoEntry>, NodeError> {
        let url = format!("{}/addresses/{}/utxos", self.base_url, address);
        debug!(address, "fetching utxos");

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(NodeError::Rejected {
                status: resp.status().as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let utxos: Vec<NodeUtxo> = resp.json().await?;
        utxos.into_iter().map(NodeUtxo::into_utxo_entry).collect()
    }

    /// Fetch the confirmed and pending balance of an address.
    ///
    /// # Arguments
    /// * `address` - The address string.
    ///
    /// # Returns
    /// The `Balance`, or a `NodeError`.
    pub async fn get_balance(&self, address: &str) -> Result<Balance, NodeError> {
        let url = format!("{}/addresses/{}/balance", self.base_url, address);
        debug!(address, "fetching balance");

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(NodeError::Rejected {
                status: resp.status().as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let balance: NodeBalance = resp.json().await?;
        Ok(Balance { confirmed: balance.confirmed, pending: balance.pending })
    }

    /// Broadcast a signed transaction.
    ///
    /// # Arguments
    /// * `tx` - The signed transaction.
    ///
    /// # Returns
    /// The transaction id the node accepted, or a `NodeError`.
    pub async fn submit_transaction(&self, tx: &Transaction) -> Result<String, NodeError> {
        let url = format!("{}/transactions", self.base_url);
        let request = SubmitTransactionRequest { transaction: RpcTransaction::from(tx) };
        debug!(inputs = tx.inputs.len(), outputs = tx.outputs.len(), "submitting transaction");

        let resp = self.client.post(&url).json(&request).send().await?;
        if !resp.status().is_success() {
            return Err(NodeError::Rejected {
                status: resp.status().as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let response: SubmitTransactionResponse = resp.json().await?;
        debug!(transaction_id = %response.transaction_id, "transaction accepted");
        Ok(response.transaction_id)
    }
}
