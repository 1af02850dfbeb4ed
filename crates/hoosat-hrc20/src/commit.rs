//! Commit and reveal transaction factories.
//!
//! Every HRC-20 state change is a two-transaction pair: the commit locks
//! funds into a P2SH output whose redeem script carries the payload; the
//! reveal spends that output, publishing the script (and payload) for
//! indexers.  The builder produces the redeem script, its hash, and the
//! P2SH address in one atomic call, because funds sent to a mismatched
//! script hash are permanently lost.

use hoosat_script::standard::pay_to_script_hash_script;
use hoosat_script::Address;
use hoosat_transaction::{
    ScriptPublicKey, Transaction, TransactionInput, TransactionOutput, UtxoEntry,
};

use crate::envelope::{build_redeem_script, hash_redeem_script};
use crate::fees::MIN_COMMIT_AMOUNT;
use crate::Hrc20Error;

/// The product of building a commit transaction.
///
/// The transaction is unsigned at this stage.  The redeem script must be
/// retained until the reveal: it is the only way to spend the P2SH
/// output.
#[derive(Clone, Debug)]
pub struct CommitPair {
    /// The unsigned commit transaction.
    pub transaction: Transaction,
    /// The redeem script embedding the payload.
    pub redeem_script: Vec<u8>,
    /// Double SHA-256 of the redeem script; the P2SH address payload and
    /// the hash inside the commit's P2SH output are both this value.
    pub script_hash: [u8; 32],
    /// The derived P2SH address.
    pub p2sh_address: Address,
}

/// Build an unsigned commit transaction for an HRC-20 payload.
///
/// Output 0 pays `commit_amount` to the P2SH script; output 1 returns
/// `source_utxo.amount - commit_amount - operation_fee` to the change
/// address and is omitted when it would fall below the dust floor.  The
/// P2SH address uses the change address's prefix (the active network).
///
/// # Arguments
/// * `signer_pubkey` - The signer's public key (32 bytes Schnorr / 33 ECDSA).
/// * `payload_json` - The canonical payload document.
/// * `source_utxo` - The single UTXO funding the commit.
/// * `commit_amount` - Sompi to lock into the P2SH output.
/// * `operation_fee` - Network fee declared for the commit transaction.
/// * `change_address` - Where the remainder returns.
/// * `use_ecdsa` - Select the ECDSA redeem script variant.
///
/// # Returns
/// The `CommitPair`, or `InsufficientFunds` when the source cannot cover
/// `commit_amount + operation_fee`.
pub fn build_commit(
    signer_pubkey: &[u8],
    payload_json: &str,
    source_utxo: &UtxoEntry,
    commit_amount: u64,
    operation_fee: u64,
    change_address: &Address,
    use_ecdsa: bool,
) -> Result<CommitPair, Hrc20Error> {
    let required = commit_amount + operation_fee;
    if source_utxo.amount < required {
        return Err(Hrc20Error::InsufficientFunds {
            required,
            available: source_utxo.amount,
        });
    }

    let redeem_script = build_redeem_script(signer_pubkey, payload_json.as_bytes(), use_ecdsa)?;
    let script_hash = hash_redeem_script(&redeem_script);
    let p2sh_address = Address::from_script_hash(change_address.prefix.clone(), script_hash);

    let mut transaction = Transaction::new();
    transaction.add_input(TransactionInput::new(source_utxo.outpoint));
    transaction.add_output(TransactionOutput::new(
        commit_amount,
        ScriptPublicKey::new(pay_to_script_hash_script(&script_hash)),
    ));

    let change = source_utxo.amount - commit_amount - operation_fee;
    if change >= MIN_COMMIT_AMOUNT {
        transaction.add_output(TransactionOutput::new(
            change,
            ScriptPublicKey::new(change_address.script_public_key()),
        ));
    }

    Ok(CommitPair { transaction, redeem_script, script_hash, p2sh_address })
}

/// Build an unsigned reveal transaction spending a P2SH commit output.
///
/// Single input from the P2SH outpoint, single output paying
/// `p2sh_utxo.amount - reveal_fee` to the recipient.
///
/// # Arguments
/// * `p2sh_utxo` - The confirmed commit output.
/// * `recipient_address` - Where the remainder goes.
/// * `reveal_fee` - The fee (protocol fee plus/or network fee) the reveal pays.
///
/// # Returns
/// The unsigned transaction, or `InsufficientFunds` when the fee exceeds
/// the locked amount.
pub fn build_reveal(
    p2sh_utxo: &UtxoEntry,
    recipient_address: &Address,
    reveal_fee: u64,
) -> Result<Transaction, Hrc20Error> {
    if p2sh_utxo.amount <= reveal_fee {
        return Err(Hrc20Error::InsufficientFunds {
            required: reveal_fee,
            available: p2sh_utxo.amount,
        });
    }

    let mut transaction = Transaction::new();
    transaction.add_input(TransactionInput::new(p2sh_utxo.outpoint));
    transaction.add_output(TransactionOutput::new(
        p2sh_utxo.amount - reveal_fee,
        ScriptPublicKey::new(recipient_address.script_public_key()),
    ));
    Ok(transaction)
}
