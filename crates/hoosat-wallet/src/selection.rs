//! UTXO selection and network fee estimation.
//!
//! Selection is largest-first with a hard cap of ten inputs per
//! transaction.  The fee model is size-based:
//! `(150·inputs + 35·outputs + 10) · fee_rate`.  The orchestrator pads
//! the estimate by 20% when checking sufficiency, but declares the
//! unpadded value as the transaction fee so consensus max-fee limits are
//! not violated.

use hoosat_transaction::UtxoEntry;

use crate::WalletError;

/// Hard cap on inputs per transaction.
pub const MAX_SELECTION_INPUTS: usize = 10;

/// Estimated bytes contributed per input.
const BYTES_PER_INPUT: u64 = 150;

/// Estimated bytes contributed per output.
const BYTES_PER_OUTPUT: u64 = 35;

/// Estimated fixed transaction overhead in bytes.
const BYTES_OVERHEAD: u64 = 10;

/// Estimate the network fee for a transaction of the given shape.
///
/// # Arguments
/// * `inputs` - Number of inputs.
/// * `outputs` - Number of outputs.
/// * `fee_rate` - Fee rate in sompi per byte.
///
/// # Returns
/// The estimated fee in sompi.
pub fn estimate_transaction_fee(inputs: usize, outputs: usize, fee_rate: u64) -> u64 {
    (BYTES_PER_INPUT * inputs as u64 + BYTES_PER_OUTPUT * outputs as u64 + BYTES_OVERHEAD)
        * fee_rate
}

/// Pad a fee estimate by the 20% sufficiency margin.
///
/// # Arguments
/// * `fee` - The unpadded fee estimate.
///
/// # Returns
/// The padded upper bound.
pub fn apply_fee_margin(fee: u64) -> u64 {
    fee + fee / 5
}

/// Select UTXOs totalling at least `required` sompi.
///
/// Candidates are sorted descending by amount and included in that order
/// until the requirement is met, never using more than
/// `MAX_SELECTION_INPUTS`.  When the largest ten together cannot meet
/// the requirement, selection fails with their sum as the available
/// amount.
///
/// # Arguments
/// * `candidates` - The spendable UTXOs.
/// * `required` - The target amount in sompi.
///
/// # Returns
/// The selected UTXOs (largest first), or `InsufficientFunds`.
pub fn select_utxos(
    candidates: &[UtxoEntry],
    required: u64,
) -> Result<Vec<UtxoEntry>, WalletError> {
    let mut sorted: Vec<UtxoEntry> = candidates.to_vec();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount));

    let mut selected = Vec::new();
    let mut total: u64 = 0;
    for utxo in sorted.into_iter().take(MAX_SELECTION_INPUTS) {
        total += utxo.amount;
        selected.push(utxo);
        if total >= required {
            return Ok(selected);
        }
    }

    Err(WalletError::InsufficientFunds { required, available: total })
}

/// Return the largest candidate UTXO, if any.
///
/// # Arguments
/// * `candidates` - The spendable UTXOs.
///
/// # Returns
/// The entry with the highest amount.
pub fn largest_utxo(candidates: &[UtxoEntry]) -> Option<&UtxoEntry> {
    candidates.iter().max_by_key(|u| u.amount)
}
