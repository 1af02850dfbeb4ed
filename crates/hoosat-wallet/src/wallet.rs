//! The HRC-20 operation orchestrator.
//!
//! Each exported operation is an async task that yields at the node,
//! signer, and registry boundaries; between those points registry
//! mutation is serialized through a mutex.  Within one operation the
//! steps run in strict program order: payload → script → address →
//! funding → sign inputs in index order → broadcast.  Commit broadcast
//! failures leave no registry entry; reveal failures keep the entry so
//! the operation can be retried.  Callers invoking reveal after commit
//! must allow the chain-visibility delay (roughly ten seconds) before
//! the P2SH output appears in the node's index.

use tokio::sync::Mutex;
use tracing::{info, warn};

use hoosat_hrc20::envelope::extract_payload;
use hoosat_hrc20::fees::{
    estimate_fees, DEPLOY_COMMIT_FEE, DEPLOY_SINGLE_UTXO_AMOUNT, MIN_COMMIT_AMOUNT,
    RECOMMENDED_COMMIT_AMOUNT,
};
use hoosat_hrc20::{build_commit, build_reveal, hash_redeem_script, Hrc20Operation};
use hoosat_node::NodeClient;
use hoosat_script::standard::{extract_script_hash, p2sh_signature_script, signature_script};
use hoosat_script::Address;
use hoosat_signer::RemoteSigner;
use hoosat_transaction::sighash::{sighash_ecdsa, sighash_schnorr, ReusedValues, SIG_HASH_ALL};
use hoosat_transaction::{Balance, Transaction, TransactionInput, TransactionOutput};
use hoosat_transaction::{ScriptPublicKey, UtxoEntry};

use crate::config::WalletConfig;
use crate::registry::PendingReveals;
use crate::selection::{
    apply_fee_margin, estimate_transaction_fee, largest_utxo, MAX_SELECTION_INPUTS,
};
use crate::WalletError;

/// The wallet's own address and public key.
#[derive(Clone, Debug)]
pub struct AddressInfo {
    /// The wallet address string.
    pub address: String,
    /// The signer public key as hex.
    pub public_key: String,
}

/// The result of a broadcast commit.
#[derive(Clone, Debug)]
pub struct CommitResult {
    /// The commit transaction id.
    pub commit_tx_id: String,
    /// The redeem script as hex; retained in the registry until reveal.
    pub redeem_script_hex: String,
    /// The P2SH address the commit paid into.
    pub p2sh_address: String,
}

/// The result of a broadcast reveal.
#[derive(Clone, Debug)]
pub struct RevealResult {
    /// The reveal transaction id.
    pub reveal_tx_id: String,
}

/// The outcome of a deploy attempt.
///
/// A fragmented wallet cannot fund the deploy commit from a single UTXO;
/// in that case the wallet broadcasts a self-pay consolidation instead
/// and the caller retries once it confirms.
#[derive(Clone, Debug)]
pub enum DeployOutcome {
    /// The deploy commit was broadcast.
    Committed(CommitResult),
    /// A consolidation was broadcast; retry the deploy after it confirms.
    Consolidating {
        /// The consolidation transaction id.
        consolidation_tx_id: String,
    },
}

/// The HRC-20 wallet: node access, remote signing, and the
/// pending-reveal registry behind one operation surface.
pub struct Hrc20Wallet<S: RemoteSigner> {
    config: WalletConfig,
    node: NodeClient,
    signer: S,
    public_key: Vec<u8>,
    address: Address,
    pending_reveals: Mutex<PendingReveals>,
}

impl<S: RemoteSigner> Hrc20Wallet<S> {
    /// Create a wallet for the given signer public key.
    ///
    /// # Arguments
    /// * `config` - Boot-time constants (prefix, API URL, key name, curve).
    /// * `signer` - The remote signing service.
    /// * `public_key` - The signer's public key: 33 bytes when
    ///   `config.use_ecdsa`, 32 bytes otherwise.
    ///
    /// # Returns
    /// The wallet, or `InvalidPubkey` if the key length does not match
    /// the configured curve.
    pub fn new(config: WalletConfig, signer: S, public_key: Vec<u8>) -> Result<Self, WalletError> {
        let expected_len = if config.use_ecdsa { 33 } else { 32 };
        if public_key.len() != expected_len {
            return Err(WalletError::InvalidPubkey(format!(
                "expected {} bytes for the configured curve, got {}",
                expected_len,
                public_key.len()
            )));
        }

        let address = Address::from_public_key(config.prefix.clone(), &public_key)?;
        let node = NodeClient::new(config.api_url.clone());
        Ok(Hrc20Wallet {
            config,
            node,
            signer,
            public_key,
            address,
            pending_reveals: Mutex::new(PendingReveals::new()),
        })
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    /// Return the wallet's address and public key.
    ///
    /// # Returns
    /// The `AddressInfo`.
    pub fn get_address(&self) -> AddressInfo {
        AddressInfo {
            address: self.address.encode(),
            public_key: hex::encode(&self.public_key),
        }
    }

    /// Fetch the balance of an address.
    ///
    /// # Arguments
    /// * `address` - The address to query.
    ///
    /// # Returns
    /// The confirmed and pending balance.
    pub async fn get_balance(&self, address: &str) -> Result<Balance, WalletError> {
        Address::decode(address, None)?;
        Ok(self.node.get_balance(address).await?)
    }

    /// Estimate the protocol fee pair for a payload document.
    ///
    /// # Arguments
    /// * `payload_json` - The canonical payload document.
    ///
    /// # Returns
    /// `(commit_fee, reveal_fee)` in sompi; zero means network-rate only.
    pub fn estimate_fees(&self, payload_json: &str) -> (u64, u64) {
        estimate_fees(payload_json)
    }

    /// List pending reveals as `(commit_tx_id, redeem_script_length)`.
    ///
    /// # Returns
    /// One pair per registry entry, in insertion order.
    pub async fn get_pending_reveals(&self) -> Vec<(String, usize)> {
        self.pending_reveals
            .lock()
            .await
            .entries()
            .iter()
            .map(|e| (e.commit_tx_id.clone(), e.redeem_script.len()))
            .collect()
    }

    /// Look up the stored redeem script for a commit id.
    ///
    /// # Arguments
    /// * `commit_tx_id` - The commit transaction id.
    ///
    /// # Returns
    /// The redeem script as hex, if the reveal is still pending.
    pub async fn get_redeem_script(&self, commit_tx_id: &str) -> Option<String> {
        self.pending_reveals.lock().await.get(commit_tx_id).map(hex::encode)
    }

    /// Serialize the pending-reveal registry for persistence.
    ///
    /// The host calls this at the persistence boundary (and on graceful
    /// shutdown) and stores the bytes wherever it keeps state.
    ///
    /// # Returns
    /// The version-tagged snapshot bytes.
    pub async fn export_pending_reveals(&self) -> Vec<u8> {
        self.pending_reveals.lock().await.snapshot()
    }

    /// Replace the registry with a previously-exported snapshot.
    ///
    /// # Arguments
    /// * `bytes` - Snapshot bytes from `export_pending_reveals`.
    ///
    /// # Returns
    /// `Ok(())`, or `InvalidTransaction` for malformed snapshots.
    pub async fn import_pending_reveals(&self, bytes: &[u8]) -> Result<(), WalletError> {
        let restored = PendingReveals::restore(bytes)?;
        *self.pending_reveals.lock().await = restored;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Token operations
    // -----------------------------------------------------------------

    /// Deploy a new token.
    ///
    /// A deploy commit needs a single UTXO of at least
    /// `DEPLOY_SINGLE_UTXO_AMOUNT`; a fragmented wallet consolidates
    /// instead and reports `Consolidating`.
    ///
    /// # Arguments
    /// * `tick` - The token ticker.
    /// * `max` - Maximum supply (decimal string).
    /// * `lim` - Per-mint limit (decimal string).
    /// * `dec` - Optional decimal places.
    ///
    /// # Returns
    /// The deploy outcome, or an error.
    pub async fn deploy_token(
        &self,
        tick: &str,
        max: &str,
        lim: &str,
        dec: Option<u8>,
    ) -> Result<DeployOutcome, WalletError> {
        let operation = Hrc20Operation::Deploy {
            tick: tick.to_string(),
            max: max.to_string(),
            lim: lim.to_string(),
            to: None,
            dec,
            pre: None,
        };
        let payload = operation.to_payload();

        let utxos = self.node.get_utxos(&self.address.encode()).await?;
        let has_qualifying_utxo = utxos.iter().any(|u| u.amount >= DEPLOY_SINGLE_UTXO_AMOUNT);
        if !has_qualifying_utxo {
            if utxos.is_empty() {
                return Err(WalletError::InsufficientFunds {
                    required: DEPLOY_SINGLE_UTXO_AMOUNT,
                    available: 0,
                });
            }
            warn!(tick, "no single UTXO can fund the deploy, consolidating first");
            let consolidation_tx_id = self.consolidate(&utxos).await?;
            return Ok(DeployOutcome::Consolidating { consolidation_tx_id });
        }

        let commit_amount = DEPLOY_COMMIT_FEE + RECOMMENDED_COMMIT_AMOUNT;
        let result = self.commit_payload(&payload, commit_amount, &utxos).await?;
        Ok(DeployOutcome::Committed(result))
    }

    /// Mint tokens.
    ///
    /// # Arguments
    /// * `tick` - The token ticker.
    /// * `recipient` - Optional recipient address for the minted tokens.
    ///
    /// # Returns
    /// The commit result, or an error.
    pub async fn mint_token(
        &self,
        tick: &str,
        recipient: Option<&str>,
    ) -> Result<CommitResult, WalletError> {
        if let Some(to) = recipient {
            Address::decode(to, None)?;
        }
        let operation = Hrc20Operation::Mint {
            tick: tick.to_string(),
            to: recipient.map(str::to_string),
        };
        self.commit_operation(&operation).await
    }

    /// Transfer tokens to a recipient.
    ///
    /// # Arguments
    /// * `tick` - The token ticker.
    /// * `amt` - Amount (decimal string).
    /// * `to` - The recipient address.
    ///
    /// # Returns
    /// The commit result, or an error.
    pub async fn transfer_token(
        &self,
        tick: &str,
        amt: &str,
        to: &str,
    ) -> Result<CommitResult, WalletError> {
        Address::decode(to, None)?;
        let operation = Hrc20Operation::Transfer {
            tick: tick.to_string(),
            amt: amt.to_string(),
            to: to.to_string(),
        };
        self.commit_operation(&operation).await
    }

    /// Burn tokens.
    ///
    /// # Arguments
    /// * `tick` - The token ticker.
    /// * `amt` - Amount (decimal string).
    ///
    /// # Returns
    /// The commit result, or an error.
    pub async fn burn_token(&self, tick: &str, amt: &str) -> Result<CommitResult, WalletError> {
        let operation =
            Hrc20Operation::Burn { tick: tick.to_string(), amt: amt.to_string() };
        self.commit_operation(&operation).await
    }

    /// List tokens on the marketplace.
    ///
    /// # Arguments
    /// * `tick` - The token ticker (lowercased in the payload).
    /// * `amt` - Amount (decimal string).
    ///
    /// # Returns
    /// The commit result, or an error.
    pub async fn list_token(&self, tick: &str, amt: &str) -> Result<CommitResult, WalletError> {
        let operation =
            Hrc20Operation::List { tick: tick.to_string(), amt: amt.to_string() };
        self.commit_operation(&operation).await
    }

    /// Complete a marketplace send.
    ///
    /// # Arguments
    /// * `tick` - The token ticker (lowercased in the payload).
    ///
    /// # Returns
    /// The commit result, or an error.
    pub async fn send_token(&self, tick: &str) -> Result<CommitResult, WalletError> {
        let operation = Hrc20Operation::Send { tick: tick.to_string() };
        self.commit_operation(&operation).await
    }

    /// Reveal a previously-committed operation.
    ///
    /// Looks up the stored redeem script, fetches the P2SH output from
    /// the node, re-checks that the script still hashes to the output's
    /// script hash, and only then signs and broadcasts the reveal.  The
    /// registry entry is removed after a successful broadcast and kept
    /// on failure for retry.
    ///
    /// # Arguments
    /// * `commit_tx_id` - The commit transaction id.
    /// * `recipient` - The address receiving the unlocked funds.
    ///
    /// # Returns
    /// The reveal result, or an error.
    pub async fn reveal_operation(
        &self,
        commit_tx_id: &str,
        recipient: &str,
    ) -> Result<RevealResult, WalletError> {
        let recipient_address = Address::decode(recipient, Some(&self.config.prefix))?;

        let redeem_script = self
            .pending_reveals
            .lock()
            .await
            .get(commit_tx_id)
            .map(|s| s.to_vec())
            .ok_or_else(|| {
                WalletError::InvalidTransaction(format!(
                    "no pending reveal for commit {}",
                    commit_tx_id
                ))
            })?;

        let script_hash = hash_redeem_script(&redeem_script);
        let p2sh_address = Address::from_script_hash(self.config.prefix.clone(), script_hash);

        let utxos = self.node.get_utxos(&p2sh_address.encode()).await?;
        let p2sh_utxo = utxos
            .iter()
            .find(|u| u.outpoint.transaction_id_hex() == commit_tx_id)
            .ok_or_else(|| {
                WalletError::InvalidTransaction(format!(
                    "commit output {} not found at {} (wait for confirmation)",
                    commit_tx_id,
                    p2sh_address.encode()
                ))
            })?;

        // The stored script must still hash to what the commit output
        // commits to; anything else means the registry and chain have
        // diverged and signing would burn the funds.
        let bound_hash = extract_script_hash(&p2sh_utxo.script_public_key.script)
            .ok_or_else(|| {
                WalletError::InvalidTransaction(
                    "commit output is not a pay-to-script-hash output".to_string(),
                )
            })?;
        if bound_hash != script_hash {
            return Err(WalletError::InvalidTransaction(
                "stored redeem script does not match the commit output".to_string(),
            ));
        }

        let protocol_reveal_fee = extract_payload(&redeem_script)
            .and_then(|p| String::from_utf8(p).ok())
            .map(|payload| estimate_fees(&payload).1)
            .unwrap_or(0);
        let reveal_fee = if protocol_reveal_fee > 0 {
            protocol_reveal_fee
        } else {
            estimate_transaction_fee(1, 1, self.config.fee_rate)
        };

        let mut tx = build_reveal(p2sh_utxo, &recipient_address, reveal_fee)?;

        let digest_spk = &p2sh_utxo.script_public_key;
        let mut reused = ReusedValues::new();
        let signature = if self.config.use_ecdsa {
            let digest =
                sighash_ecdsa(&tx, 0, digest_spk, p2sh_utxo.amount, SIG_HASH_ALL, &mut reused)?;
            self.signer.sign_ecdsa(&self.config.key_name, digest).await?
        } else {
            let digest =
                sighash_schnorr(&tx, 0, digest_spk, p2sh_utxo.amount, SIG_HASH_ALL, &mut reused)?;
            self.signer.sign_schnorr(&self.config.key_name, digest).await?
        };
        let mut sig_with_hashtype = signature;
        sig_with_hashtype.push(SIG_HASH_ALL);
        tx.inputs[0].signature_script =
            p2sh_signature_script(&sig_with_hashtype, &redeem_script)?;

        let reveal_tx_id = self.node.submit_transaction(&tx).await?;
        self.pending_reveals.lock().await.remove(commit_tx_id);
        info!(commit_tx_id, %reveal_tx_id, "reveal broadcast");

        Ok(RevealResult { reveal_tx_id })
    }

    /// Consolidate fragmented UTXOs into one via a self-pay.
    ///
    /// Safe to invoke repeatedly; each call merges the ten largest UTXOs.
    ///
    /// # Returns
    /// The consolidation transaction id, or an error.
    pub async fn consolidate_utxos(&self) -> Result<String, WalletError> {
        let utxos = self.node.get_utxos(&self.address.encode()).await?;
        self.consolidate(&utxos).await
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    /// Commit an operation, deriving the lock amount from its protocol fee.
    async fn commit_operation(
        &self,
        operation: &Hrc20Operation,
    ) -> Result<CommitResult, WalletError> {
        let payload = operation.to_payload();
        let (protocol_commit_fee, _) = estimate_fees(&payload);
        let commit_amount = if protocol_commit_fee > 0 {
            protocol_commit_fee + RECOMMENDED_COMMIT_AMOUNT
        } else {
            RECOMMENDED_COMMIT_AMOUNT
        };

        let utxos = self.node.get_utxos(&self.address.encode()).await?;
        self.commit_payload(&payload, commit_amount, &utxos).await
    }

    /// Fund, sign, and broadcast a commit for an already-built payload.
    async fn commit_payload(
        &self,
        payload: &str,
        commit_amount: u64,
        utxos: &[UtxoEntry],
    ) -> Result<CommitResult, WalletError> {
        let network_fee = estimate_transaction_fee(1, 2, self.config.fee_rate);
        let required = commit_amount + apply_fee_margin(network_fee);

        // Commits spend exactly one UTXO: the largest qualifying one.
        let source = utxos
            .iter()
            .filter(|u| u.amount >= required)
            .max_by_key(|u| u.amount)
            .ok_or_else(|| WalletError::InsufficientFunds {
                required,
                available: largest_utxo(utxos).map(|u| u.amount).unwrap_or(0),
            })?;

        let pair = build_commit(
            &self.public_key,
            payload,
            source,
            commit_amount,
            network_fee,
            &self.address,
            self.config.use_ecdsa,
        )?;

        let mut tx = pair.transaction;
        self.sign_inputs(&mut tx, std::slice::from_ref(source)).await?;

        let commit_tx_id = self.node.submit_transaction(&tx).await?;
        self.pending_reveals
            .lock()
            .await
            .insert(commit_tx_id.clone(), pair.redeem_script.clone());
        info!(
            %commit_tx_id,
            p2sh_address = %pair.p2sh_address,
            commit_amount,
            "commit broadcast"
        );

        Ok(CommitResult {
            commit_tx_id,
            redeem_script_hex: hex::encode(&pair.redeem_script),
            p2sh_address: pair.p2sh_address.encode(),
        })
    }

    /// Build, sign, and broadcast a self-pay over the ten largest UTXOs.
    async fn consolidate(&self, utxos: &[UtxoEntry]) -> Result<String, WalletError> {
        let mut sorted: Vec<UtxoEntry> = utxos.to_vec();
        sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
        sorted.truncate(MAX_SELECTION_INPUTS);

        let total: u64 = sorted.iter().map(|u| u.amount).sum();
        let fee = estimate_transaction_fee(sorted.len(), 1, self.config.fee_rate);
        if total <= fee + MIN_COMMIT_AMOUNT {
            return Err(WalletError::InsufficientFunds {
                required: fee + MIN_COMMIT_AMOUNT,
                available: total,
            });
        }

        let mut tx = Transaction::new();
        for utxo in &sorted {
            tx.add_input(TransactionInput::new(utxo.outpoint));
        }
        tx.add_output(TransactionOutput::new(
            total - fee,
            ScriptPublicKey::new(self.address.script_public_key()),
        ));

        self.sign_inputs(&mut tx, &sorted).await?;
        let tx_id = self.node.submit_transaction(&tx).await?;
        info!(%tx_id, inputs = sorted.len(), total, "consolidation broadcast");
        Ok(tx_id)
    }

    /// Sign every input of a transaction in index order.
    ///
    /// `spent` carries the UTXO behind each input, index-aligned.
    async fn sign_inputs(
        &self,
        tx: &mut Transaction,
        spent: &[UtxoEntry],
    ) -> Result<(), WalletError> {
        debug_assert_eq!(tx.inputs.len(), spent.len());
        let mut reused = ReusedValues::new();

        for index in 0..tx.inputs.len() {
            let utxo = &spent[index];
            let signature = if self.config.use_ecdsa {
                let digest = sighash_ecdsa(
                    tx,
                    index,
                    &utxo.script_public_key,
                    utxo.amount,
                    SIG_HASH_ALL,
                    &mut reused,
                )?;
                self.signer.sign_ecdsa(&self.config.key_name, digest).await?
            } else {
                let digest = sighash_schnorr(
                    tx,
                    index,
                    &utxo.script_public_key,
                    utxo.amount,
                    SIG_HASH_ALL,
                    &mut reused,
                )?;
                self.signer.sign_schnorr(&self.config.key_name, digest).await?
            };

            let mut sig_with_hashtype = signature;
            sig_with_hashtype.push(SIG_HASH_ALL);
            tx.inputs[index].signature_script = signature_script(&sig_with_hashtype)?;
        }
        Ok(())
    }
}
