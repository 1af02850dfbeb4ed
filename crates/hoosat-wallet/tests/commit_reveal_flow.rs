//! End-to-end orchestrator tests against a mock node, with a local
//! in-test signer standing in for the threshold service.

use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{Signature, SigningKey};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use hoosat_hrc20::fees::{DEPLOY_COMMIT_FEE, MINT_COMMIT_FEE, RECOMMENDED_COMMIT_AMOUNT};
use hoosat_hrc20::{build_redeem_script, hash_redeem_script, Hrc20Operation};
use hoosat_script::standard::pay_to_script_hash_script;
use hoosat_script::{Address, Prefix};
use hoosat_signer::{RemoteSigner, SignerError};
use hoosat_wallet::{DeployOutcome, Hrc20Wallet, WalletConfig, WalletError};

// ---------------------------------------------------------------------------
// Local test signer
// ---------------------------------------------------------------------------

/// In-test ECDSA signer; production keys live in the remote threshold
/// service, so the curve only appears here.
struct LocalSigner {
    key: SigningKey,
}

impl LocalSigner {
    fn new() -> Self {
        let key_bytes = [0x07u8; 32];
        LocalSigner { key: SigningKey::from_slice(&key_bytes).expect("valid scalar") }
    }

    fn public_key(&self) -> Vec<u8> {
        self.key.verifying_key().to_sec1_bytes().to_vec()
    }
}

impl RemoteSigner for LocalSigner {
    async fn sign_ecdsa(&self, _key_name: &str, digest: [u8; 32]) -> Result<Vec<u8>, SignerError> {
        let signature: Signature = self
            .key
            .sign_prehash(&digest)
            .map_err(|e| SignerError::InvalidSignature(e.to_string()))?;
        Ok(signature.to_der().as_bytes().to_vec())
    }

    async fn sign_schnorr(
        &self,
        _key_name: &str,
        _digest: [u8; 32],
    ) -> Result<Vec<u8>, SignerError> {
        Err(SignerError::InvalidSignature("test signer is ECDSA-only".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const HTN: u64 = 100_000_000;

async fn test_wallet(server: &MockServer) -> (Hrc20Wallet<LocalSigner>, String, Vec<u8>) {
    let signer = LocalSigner::new();
    let public_key = signer.public_key();
    let config = WalletConfig {
        prefix: Prefix::Mainnet,
        api_url: server.uri(),
        key_name: "test-operator".to_string(),
        use_ecdsa: true,
        fee_rate: 1,
    };
    let wallet = Hrc20Wallet::new(config, signer, public_key.clone()).unwrap();
    let address = wallet.get_address().address;
    (wallet, address, public_key)
}

fn utxo_json(txid: &str, index: u32, amount: u64, script_hex: &str) -> serde_json::Value {
    serde_json::json!({
        "outpoint": { "transactionId": txid, "index": index },
        "amount": amount,
        "scriptPublicKey": { "version": 0, "scriptPublicKey": script_hex }
    })
}

async fn mount_utxos(server: &MockServer, address: &str, utxos: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/addresses/{}/utxos", address)))
        .respond_with(ResponseTemplate::new(200).set_body_json(utxos))
        .mount(server)
        .await;
}

fn submitted_transactions(requests: &[Request]) -> Vec<serde_json::Value> {
    requests
        .iter()
        .filter(|r| r.method.to_string().eq_ignore_ascii_case("POST"))
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["transaction"].clone()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Deploy: fragmented wallet consolidates first
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_fragmented_deploy_consolidates() {
    let server = MockServer::start().await;
    let (wallet, address, _) = test_wallet(&server).await;

    // Twenty 150-HTN UTXOs: none qualifies for the 2100-HTN deploy gate.
    let utxos: Vec<serde_json::Value> = (0..20)
        .map(|i| utxo_json(&"aa".repeat(32), i, 150 * HTN, "20abac"))
        .collect();
    mount_utxos(&server, &address, serde_json::Value::Array(utxos)).await;

    let consolidation_id = "c0".repeat(32);
    Mock::given(method("POST"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactionId": consolidation_id
        })))
        .mount(&server)
        .await;

    let outcome = wallet
        .deploy_token("HOOS", "2100000000000000", "100000000000", None)
        .await
        .unwrap();

    match outcome {
        DeployOutcome::Consolidating { consolidation_tx_id } => {
            assert_eq!(consolidation_tx_id, consolidation_id);
        }
        DeployOutcome::Committed(_) => panic!("expected consolidation, got commit"),
    }

    // The self-pay uses the ten largest inputs and one output back to the
    // wallet, paying the exact estimated fee.
    let submitted = submitted_transactions(&server.received_requests().await.unwrap());
    assert_eq!(submitted.len(), 1);
    let tx = &submitted[0];
    assert_eq!(tx["inputs"].as_array().unwrap().len(), 10);
    assert_eq!(tx["outputs"].as_array().unwrap().len(), 1);
    let fee = 150 * 10 + 35 + 10;
    assert_eq!(
        tx["outputs"][0]["amount"].as_u64().unwrap(),
        10 * 150 * HTN - fee
    );

    // No commit happened, so nothing is pending.
    assert!(wallet.get_pending_reveals().await.is_empty());
}

// ---------------------------------------------------------------------------
// Deploy: a qualifying UTXO commits directly
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_deploy_commits_with_qualifying_utxo() {
    let server = MockServer::start().await;
    let (wallet, address, _) = test_wallet(&server).await;

    mount_utxos(
        &server,
        &address,
        serde_json::json!([utxo_json(&"bb".repeat(32), 0, 3000 * HTN, "20abac")]),
    )
    .await;

    let commit_id = "cc".repeat(32);
    Mock::given(method("POST"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactionId": commit_id
        })))
        .mount(&server)
        .await;

    let outcome = wallet
        .deploy_token("HOOS", "2100000000000000", "100000000000", Some(8))
        .await
        .unwrap();

    let result = match outcome {
        DeployOutcome::Committed(result) => result,
        DeployOutcome::Consolidating { .. } => panic!("expected commit"),
    };
    assert_eq!(result.commit_tx_id, commit_id);
    assert!(result.p2sh_address.starts_with("hoosat:"));
    assert!(wallet.get_redeem_script(&commit_id).await.is_some());

    // Output 0 locks the deploy protocol fee plus the recommended amount;
    // input total minus output total is exactly the declared network fee.
    let submitted = submitted_transactions(&server.received_requests().await.unwrap());
    let tx = &submitted[0];
    assert_eq!(
        tx["outputs"][0]["amount"].as_u64().unwrap(),
        DEPLOY_COMMIT_FEE + RECOMMENDED_COMMIT_AMOUNT
    );
    let output_total: u64 = tx["outputs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["amount"].as_u64().unwrap())
        .sum();
    let network_fee = 150 + 2 * 35 + 10;
    assert_eq!(3000 * HTN - output_total, network_fee);
}

// ---------------------------------------------------------------------------
// Mint commit → reveal roundtrip
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_mint_commit_and_reveal() {
    let server = MockServer::start().await;
    let (wallet, address, public_key) = test_wallet(&server).await;

    // The P2SH address is deterministic from (pubkey, payload), so the
    // test can mount its UTXO endpoint up front.
    let payload = Hrc20Operation::Mint { tick: "HOOS".to_string(), to: None }.to_payload();
    let redeem_script = build_redeem_script(&public_key, payload.as_bytes(), true).unwrap();
    let script_hash = hash_redeem_script(&redeem_script);
    let p2sh_address = Address::from_script_hash(Prefix::Mainnet, script_hash).encode();
    let commit_amount = MINT_COMMIT_FEE + RECOMMENDED_COMMIT_AMOUNT;

    mount_utxos(
        &server,
        &address,
        serde_json::json!([utxo_json(&"11".repeat(32), 0, 150 * HTN, "20abac")]),
    )
    .await;

    let commit_id = "dd".repeat(32);
    let reveal_id = "ee".repeat(32);
    Mock::given(method("POST"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactionId": commit_id
        })))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactionId": reveal_id
        })))
        .with_priority(10)
        .mount(&server)
        .await;
    mount_utxos(
        &server,
        &p2sh_address,
        serde_json::json!([utxo_json(
            &commit_id,
            0,
            commit_amount,
            &hex::encode(pay_to_script_hash_script(&script_hash))
        )]),
    )
    .await;

    // Commit.
    let commit = wallet.mint_token("HOOS", None).await.unwrap();
    assert_eq!(commit.commit_tx_id, commit_id);
    assert_eq!(commit.p2sh_address, p2sh_address);
    assert_eq!(commit.redeem_script_hex, hex::encode(&redeem_script));
    assert_eq!(
        wallet.get_pending_reveals().await,
        vec![(commit_id.clone(), redeem_script.len())]
    );

    // Reveal back to the wallet's own address.
    let reveal = wallet.reveal_operation(&commit_id, &address).await.unwrap();
    assert_eq!(reveal.reveal_tx_id, reveal_id);
    assert!(wallet.get_pending_reveals().await.is_empty());
    assert!(wallet.get_redeem_script(&commit_id).await.is_none());

    // The reveal publishes the redeem script in its signature script and
    // pays the network fee out of the locked amount.
    let submitted = submitted_transactions(&server.received_requests().await.unwrap());
    let reveal_tx = submitted.last().unwrap();
    assert_eq!(reveal_tx["inputs"].as_array().unwrap().len(), 1);
    let sig_script = reveal_tx["inputs"][0]["signatureScript"].as_str().unwrap();
    assert!(sig_script.contains(&hex::encode(&redeem_script)));
    let network_fee = 150 + 35 + 10;
    assert_eq!(
        reveal_tx["outputs"][0]["amount"].as_u64().unwrap(),
        commit_amount - network_fee
    );
}

// ---------------------------------------------------------------------------
// Failure semantics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_commit_broadcast_failure_leaves_no_registry_entry() {
    let server = MockServer::start().await;
    let (wallet, address, _) = test_wallet(&server).await;

    mount_utxos(
        &server,
        &address,
        serde_json::json!([utxo_json(&"11".repeat(32), 0, 150 * HTN, "20abac")]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("node unavailable"))
        .mount(&server)
        .await;

    let err = wallet.mint_token("HOOS", None).await.unwrap_err();
    assert!(matches!(err, WalletError::NetworkError(_)));
    assert!(wallet.get_pending_reveals().await.is_empty());
}

#[tokio::test]
async fn test_reveal_failure_keeps_registry_entry() {
    let server = MockServer::start().await;
    let (wallet, address, public_key) = test_wallet(&server).await;

    let payload = Hrc20Operation::Mint { tick: "HOOS".to_string(), to: None }.to_payload();
    let redeem_script = build_redeem_script(&public_key, payload.as_bytes(), true).unwrap();
    let script_hash = hash_redeem_script(&redeem_script);
    let p2sh_address = Address::from_script_hash(Prefix::Mainnet, script_hash).encode();
    let commit_id = "dd".repeat(32);

    // Seed the registry through the snapshot contract.
    let snapshot = serde_json::json!({
        "version": 1,
        "entries": [{
            "commit_tx_id": commit_id,
            "redeem_script": hex::encode(&redeem_script)
        }]
    });
    wallet.import_pending_reveals(snapshot.to_string().as_bytes()).await.unwrap();

    mount_utxos(
        &server,
        &p2sh_address,
        serde_json::json!([utxo_json(
            &commit_id,
            0,
            2 * HTN,
            &hex::encode(pay_to_script_hash_script(&script_hash))
        )]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("node unavailable"))
        .mount(&server)
        .await;

    let err = wallet.reveal_operation(&commit_id, &address).await.unwrap_err();
    assert!(matches!(err, WalletError::NetworkError(_)));
    // The entry survives for retry.
    assert!(wallet.get_redeem_script(&commit_id).await.is_some());
}

#[tokio::test]
async fn test_reveal_without_pending_entry_is_invalid() {
    let server = MockServer::start().await;
    let (wallet, address, _) = test_wallet(&server).await;

    let err = wallet
        .reveal_operation(&"99".repeat(32), &address)
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InvalidTransaction(_)));
}

/// A registry entry whose script no longer matches the on-chain output
/// must refuse to sign.
#[tokio::test]
async fn test_reveal_binding_check_refuses_mismatched_script() {
    let server = MockServer::start().await;
    let (wallet, address, public_key) = test_wallet(&server).await;

    let payload = Hrc20Operation::Mint { tick: "HOOS".to_string(), to: None }.to_payload();
    let redeem_script = build_redeem_script(&public_key, payload.as_bytes(), true).unwrap();
    let script_hash = hash_redeem_script(&redeem_script);
    let p2sh_address = Address::from_script_hash(Prefix::Mainnet, script_hash).encode();
    let commit_id = "dd".repeat(32);

    let snapshot = serde_json::json!({
        "version": 1,
        "entries": [{
            "commit_tx_id": commit_id,
            "redeem_script": hex::encode(&redeem_script)
        }]
    });
    wallet.import_pending_reveals(snapshot.to_string().as_bytes()).await.unwrap();

    // The node reports an output committing to a different script hash.
    mount_utxos(
        &server,
        &p2sh_address,
        serde_json::json!([utxo_json(
            &commit_id,
            0,
            2 * HTN,
            &hex::encode(pay_to_script_hash_script(&[0x66; 32]))
        )]),
    )
    .await;

    let err = wallet.reveal_operation(&commit_id, &address).await.unwrap_err();
    assert!(matches!(err, WalletError::InvalidTransaction(_)));
    // Nothing was broadcast.
    assert!(submitted_transactions(&server.received_requests().await.unwrap()).is_empty());
}

// ---------------------------------------------------------------------------
// Registry persistence across restart
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_registry_survives_simulated_restart() {
    let server = MockServer::start().await;
    let (wallet, _, public_key) = test_wallet(&server).await;

    let payload = Hrc20Operation::Mint { tick: "HOOS".to_string(), to: None }.to_payload();
    let redeem_script = build_redeem_script(&public_key, payload.as_bytes(), true).unwrap();
    let commit_id = "ab".repeat(32);

    let snapshot = serde_json::json!({
        "version": 1,
        "entries": [{
            "commit_tx_id": commit_id,
            "redeem_script": hex::encode(&redeem_script)
        }]
    });
    wallet.import_pending_reveals(snapshot.to_string().as_bytes()).await.unwrap();

    // Simulated restart: a fresh wallet restored from the exported bytes.
    let exported = wallet.export_pending_reveals().await;
    let (restarted, _, _) = test_wallet(&server).await;
    restarted.import_pending_reveals(&exported).await.unwrap();

    assert_eq!(
        restarted.get_pending_reveals().await,
        wallet.get_pending_reveals().await
    );
    assert_eq!(
        restarted.get_redeem_script(&commit_id).await,
        Some(hex::encode(&redeem_script))
    );
}

// ---------------------------------------------------------------------------
// Insufficient funds without the deploy fallback
// ---------------------------------------------------------------------------

/// Only deploy converts InsufficientFunds into consolidation; a mint
/// with no qualifying UTXO surfaces the error.
#[tokio::test]
async fn test_mint_insufficient_funds_is_surfaced() {
    let server = MockServer::start().await;
    let (wallet, address, _) = test_wallet(&server).await;

    mount_utxos(
        &server,
        &address,
        serde_json::json!([utxo_json(&"11".repeat(32), 0, HTN / 2, "20abac")]),
    )
    .await;

    let err = wallet.mint_token("HOOS", None).await.unwrap_err();
    match err {
        WalletError::InsufficientFunds { available, .. } => assert_eq!(available, HTN / 2),
        other => panic!("expected InsufficientFunds, got {}", other),
    }
}
