//! Wallet configuration.
//!
//! All three environment constants (network prefix, API host, signer key
//! name) are fixed at boot; loading them from the environment is the
//! host's concern, not the engine's.

use hoosat_script::Prefix;

/// Configuration for an [`Hrc20Wallet`](crate::Hrc20Wallet).
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// The network prefix used for every address the wallet emits.
    pub prefix: Prefix,
    /// Base URL of the node REST API.
    pub api_url: String,
    /// The remote signer's key name.
    pub key_name: String,
    /// Sign with ECDSA (threshold services are ECDSA today); `false`
    /// selects Schnorr.
    pub use_ecdsa: bool,
    /// Network fee rate in sompi per estimated byte.
    pub fee_rate: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            prefix: Prefix::Mainnet,
            api_url: "https://api.network.hoosat.fi".to_string(),
            key_name: "hrc20-operator".to_string(),
            use_ecdsa: true,
            fee_rate: 1,
        }
    }
}
