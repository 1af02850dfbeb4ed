//! Unspent transaction output and balance types.

use crate::input::Outpoint;
use crate::output::ScriptPublicKey;

/// An unspent transaction output as reported by the node.
///
/// Created by querying the node's address index; consumed by the next
/// spend that references its outpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UtxoEntry {
    /// The outpoint identifying this output.
    pub outpoint: Outpoint,
    /// The amount in sompi.
    pub amount: u64,
    /// The script public key locking the output.
    pub script_public_key: ScriptPublicKey,
    /// The originating address, when the node reports one.
    pub address: Option<String>,
}

/// An address balance as reported by the node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Balance {
    /// Confirmed amount in sompi.
    pub confirmed: u64,
    /// Pending (unconfirmed) amount in sompi.
    pub pending: u64,
}
