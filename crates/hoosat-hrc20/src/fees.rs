//! HRC-20 protocol fee parameters.
//!
//! The protocol fees (deploy, mint) are indexer-enforced amounts burned
//! through the reveal transaction's fee; they are distinct from the
//! network fee paid per byte.  All values are named constants.

/// Sompi per HTN (1 HTN = 10^8 sompi).
pub const SOMPI_PER_HTN: u64 = 100_000_000;

/// Dust floor: the minimum output value a transaction may create.  Also
/// the floor under which commit change outputs are omitted.
pub const MIN_COMMIT_AMOUNT: u64 = 1000;

/// Default amount locked into the P2SH output for operations without a
/// protocol commit fee.
pub const RECOMMENDED_COMMIT_AMOUNT: u64 = SOMPI_PER_HTN;

/// Protocol fee locked at commit time for a deploy (1000 HTN).
pub const DEPLOY_COMMIT_FEE: u64 = 1000 * SOMPI_PER_HTN;

/// Protocol fee paid by the deploy reveal transaction (1000 HTN).
pub const DEPLOY_REVEAL_FEE: u64 = 1000 * SOMPI_PER_HTN;

/// Protocol fee locked at commit time for a mint (1 HTN).  The mint
/// reveal pays only the network fee.
pub const MINT_COMMIT_FEE: u64 = SOMPI_PER_HTN;

/// Minimum single-UTXO amount a deploy requires before committing
/// (2100 HTN); wallets below it consolidate first.
pub const DEPLOY_SINGLE_UTXO_AMOUNT: u64 = 2100 * SOMPI_PER_HTN;

/// Estimate the protocol fee pair for a payload document.
///
/// Parses the `"op"` field from the payload; a zero component means the
/// corresponding transaction pays only the network fee.  Unknown or
/// unparsable operations yield `(0, 0)`.
///
/// # Arguments
/// * `payload_json` - The canonical payload document.
///
/// # Returns
/// `(commit_fee, reveal_fee)` in sompi.
pub fn estimate_fees(payload_json: &str) -> (u64, u64) {
    let op = serde_json::from_str::<serde_json::Value>(payload_json)
        .ok()
        .and_then(|v| v.get("op").and_then(|o| o.as_str()).map(str::to_string));

    match op.as_deref() {
        Some("deploy") => (DEPLOY_COMMIT_FEE, DEPLOY_REVEAL_FEE),
        Some("mint") => (MINT_COMMIT_FEE, 0),
        Some("transfer") | Some("burn") | Some("list") | Some("send") => (0, 0),
        _ => (0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Hrc20Operation;

    #[test]
    fn test_deploy_fees() {
        let payload = Hrc20Operation::Deploy {
            tick: "HOOS".to_string(),
            max: "1000".to_string(),
            lim: "10".to_string(),
            to: None,
            dec: None,
            pre: None,
        }
        .to_payload();
        assert_eq!(estimate_fees(&payload), (100_000_000_000, 100_000_000_000));
    }

    /// Mint is commit-fee only; the reveal pays the network rate.
    #[test]
    fn test_mint_fees() {
        let payload =
            Hrc20Operation::Mint { tick: "HOOS".to_string(), to: None }.to_payload();
        assert_eq!(estimate_fees(&payload), (100_000_000, 0));
    }

    #[test]
    fn test_network_only_ops() {
        for payload in [
            Hrc20Operation::Transfer {
                tick: "A".to_string(),
                amt: "1".to_string(),
                to: "hoosat:q".to_string(),
            }
            .to_payload(),
            Hrc20Operation::Burn { tick: "A".to_string(), amt: "1".to_string() }.to_payload(),
            Hrc20Operation::List { tick: "A".to_string(), amt: "1".to_string() }.to_payload(),
            Hrc20Operation::Send { tick: "A".to_string() }.to_payload(),
        ] {
            assert_eq!(estimate_fees(&payload), (0, 0));
        }
    }

    /// Unknown ops and junk input yield (0, 0).
    #[test]
    fn test_unknown_op() {
        assert_eq!(estimate_fees(r#"{"p":"hrc-20","op":"frobnicate"}"#), (0, 0));
        assert_eq!(estimate_fees("not json"), (0, 0));
        assert_eq!(estimate_fees(r#"{"p":"hrc-20"}"#), (0, 0));
    }
}
