//! The pending-reveal registry.
//!
//! Between commit broadcast and reveal broadcast, the redeem script is
//! the only way to spend the committed funds, so the pair
//! `(commit_tx_id, redeem_script)` must survive process restarts.  The
//! registry is an append/filter-only collection with an explicit
//! version-tagged snapshot/restore contract; the host runtime decides
//! where the snapshot bytes live.

use serde::{Deserialize, Serialize};

use crate::WalletError;

/// Current snapshot format version.
const REGISTRY_VERSION: u32 = 1;

/// One pending reveal: a broadcast commit whose payload has not been
/// published yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingReveal {
    /// The commit transaction id as reported by the node.
    pub commit_tx_id: String,
    /// The redeem script locked by the commit's P2SH output.
    pub redeem_script: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
struct SnapshotEntry {
    commit_tx_id: String,
    redeem_script: String,
}

#[derive(Serialize, Deserialize)]
struct RegistrySnapshot {
    version: u32,
    entries: Vec<SnapshotEntry>,
}

/// The in-memory pending-reveal collection.
///
/// Insertion is append-only and idempotent per commit id; removal is by
/// key and a no-op when the key is absent.
#[derive(Debug, Default)]
pub struct PendingReveals {
    entries: Vec<PendingReveal>,
}

impl PendingReveals {
    /// Create an empty registry.
    ///
    /// # Returns
    /// A `PendingReveals` with no entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pending reveal unless the commit id is already present.
    ///
    /// # Arguments
    /// * `commit_tx_id` - The broadcast commit's transaction id.
    /// * `redeem_script` - The redeem script to retain.
    ///
    /// # Returns
    /// `true` if the entry was added, `false` if the id already existed.
    pub fn insert(&mut self, commit_tx_id: String, redeem_script: Vec<u8>) -> bool {
        if self.entries.iter().any(|e| e.commit_tx_id == commit_tx_id) {
            return false;
        }
        self.entries.push(PendingReveal { commit_tx_id, redeem_script });
        true
    }

    /// Remove the entry for a commit id.
    ///
    /// # Arguments
    /// * `commit_tx_id` - The commit id to remove.
    ///
    /// # Returns
    /// `true` if an entry was removed, `false` if none existed.
    pub fn remove(&mut self, commit_tx_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.commit_tx_id != commit_tx_id);
        self.entries.len() != before
    }

    /// Look up the redeem script for a commit id.
    ///
    /// # Arguments
    /// * `commit_tx_id` - The commit id.
    ///
    /// # Returns
    /// The redeem script bytes, if the entry exists.
    pub fn get(&self, commit_tx_id: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.commit_tx_id == commit_tx_id)
            .map(|e| e.redeem_script.as_slice())
    }

    /// Return all entries in insertion order.
    ///
    /// # Returns
    /// A slice of pending reveals.
    pub fn entries(&self) -> &[PendingReveal] {
        &self.entries
    }

    /// Return the number of pending reveals.
    ///
    /// # Returns
    /// The entry count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the registry is empty.
    ///
    /// # Returns
    /// `true` when no reveals are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the registry to its persistent snapshot form.
    ///
    /// # Returns
    /// The version-tagged snapshot bytes.
    pub fn snapshot(&self) -> Vec<u8> {
        let snapshot = RegistrySnapshot {
            version: REGISTRY_VERSION,
            entries: self
                .entries
                .iter()
                .map(|e| SnapshotEntry {
                    commit_tx_id: e.commit_tx_id.clone(),
                    redeem_script: hex::encode(&e.redeem_script),
                })
                .collect(),
        };
        serde_json::to_vec(&snapshot).expect("registry snapshot serialization cannot fail")
    }

    /// Rebuild a registry from snapshot bytes.
    ///
    /// # Arguments
    /// * `bytes` - Snapshot bytes produced by `snapshot`.
    ///
    /// # Returns
    /// The restored registry, or `InvalidTransaction` when the snapshot
    /// is malformed or from an unknown future version.
    pub fn restore(bytes: &[u8]) -> Result<Self, WalletError> {
        let snapshot: RegistrySnapshot = serde_json::from_slice(bytes)
            .map_err(|e| WalletError::InvalidTransaction(format!("bad registry snapshot: {}", e)))?;
        if snapshot.version > REGISTRY_VERSION {
            return Err(WalletError::InvalidTransaction(format!(
                "unsupported registry snapshot version {}",
                snapshot.version
            )));
        }

        let mut registry = PendingReveals::new();
        for entry in snapshot.entries {
            let redeem_script = hex::decode(&entry.redeem_script)
                .map_err(|e| WalletError::InvalidHex(e.to_string()))?;
            registry.insert(entry.commit_tx_id, redeem_script);
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent_per_key() {
        let mut registry = PendingReveals::new();
        assert!(registry.insert("aa".to_string(), vec![1, 2, 3]));
        assert!(!registry.insert("aa".to_string(), vec![4, 5, 6]));
        assert_eq!(registry.len(), 1);
        // The first script wins.
        assert_eq!(registry.get("aa"), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_remove_noops_when_absent() {
        let mut registry = PendingReveals::new();
        registry.insert("aa".to_string(), vec![1]);
        assert!(!registry.remove("bb"));
        assert_eq!(registry.len(), 1);
        assert!(registry.remove("aa"));
        assert!(registry.is_empty());
        assert!(!registry.remove("aa"));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut registry = PendingReveals::new();
        registry.insert("first".to_string(), vec![1]);
        registry.insert("second".to_string(), vec![2]);
        let ids: Vec<&str> =
            registry.entries().iter().map(|e| e.commit_tx_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    /// After a simulated restart the in-memory view equals the persisted
    /// state.
    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut registry = PendingReveals::new();
        registry.insert("aa".to_string(), vec![0x20, 0xAB, 0xAC]);
        registry.insert("bb".to_string(), vec![0xAA; 600]);

        let restored = PendingReveals::restore(&registry.snapshot()).unwrap();
        assert_eq!(restored.entries(), registry.entries());
    }

    #[test]
    fn test_restore_rejects_future_version() {
        let bytes = br#"{"version":99,"entries":[]}"#;
        assert!(PendingReveals::restore(bytes).is_err());
    }

    #[test]
    fn test_restore_rejects_garbage() {
        assert!(PendingReveals::restore(b"not json").is_err());
        assert!(
            PendingReveals::restore(br#"{"version":1,"entries":[{"commit_tx_id":"x","redeem_script":"zz"}]}"#)
                .is_err()
        );
    }

    #[test]
    fn test_empty_snapshot_roundtrip() {
        let registry = PendingReveals::new();
        let restored = PendingReveals::restore(&registry.snapshot()).unwrap();
        assert!(restored.is_empty());
    }
}
