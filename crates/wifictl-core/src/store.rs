//! Persisted network records and the priority store.
//!
//! The store owns every `KnownNetwork` for the process lifetime. Records are
//! created and bumped by `commit`; nothing here ever deletes one. Priority is
//! a total order updated lazily on explicit operator action: the most recently
//! committed network always ends up strictly above everything else, with no
//! need for timestamps.

use serde::{Deserialize, Serialize};

use crate::scan::UNTRACKED;

/// A persisted network record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownNetwork {
    /// SSID; unique within the store.
    pub ssid: String,
    /// Operator-assigned rank; higher is more preferred.
    #[serde(default)]
    pub priority: u32,
    /// Stored pre-shared key, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psk: Option<String>,
}

/// In-memory view of the tracked networks, in file order.
#[derive(Debug, Default, Clone)]
pub struct PriorityStore {
    networks: Vec<KnownNetwork>,
}

impl PriorityStore {
    /// Builds a store from loaded records, dropping duplicate identities.
    ///
    /// The first record per ssid wins; later duplicates are logged and
    /// discarded so the unique-identity invariant holds from startup.
    pub fn new(networks: Vec<KnownNetwork>) -> Self {
        let mut store = Self {
            networks: Vec::with_capacity(networks.len()),
        };
        for network in networks {
            if store.get(&network.ssid).is_some() {
                tracing::warn!(ssid = %network.ssid, "dropping duplicate network record");
                continue;
            }
            store.networks.push(network);
        }
        store
    }

    /// All tracked records, in insertion order.
    pub fn networks(&self) -> &[KnownNetwork] {
        &self.networks
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    fn get(&self, ssid: &str) -> Option<&KnownNetwork> {
        self.networks.iter().find(|n| n.ssid == ssid)
    }

    /// Resolved priority for an identity, or [`UNTRACKED`] (−1) when no
    /// record exists.
    pub fn priority_of(&self, ssid: &str) -> i32 {
        self.get(ssid).map_or(UNTRACKED, |n| n.priority as i32)
    }

    /// Stored credential for an identity, if any.
    pub fn psk_of(&self, ssid: &str) -> Option<&str> {
        self.get(ssid).and_then(|n| n.psk.as_deref())
    }

    /// Maximum priority over all tracked networks; 0 when none are tracked.
    pub fn highest_priority(&self) -> u32 {
        self.networks.iter().map(|n| n.priority).max().unwrap_or(0)
    }

    /// Commits an operator selection: resolves the identity to its existing
    /// record or a fresh one, bumps it to `highest_priority() + 1`, and
    /// replaces the stored credential when one is provided (an absent
    /// credential keeps whatever was stored before).
    ///
    /// Persisting the store afterwards is the caller's responsibility.
    pub fn commit(&mut self, ssid: &str, psk: Option<String>) -> &KnownNetwork {
        let next = self.highest_priority() + 1;
        let index = match self.networks.iter().position(|n| n.ssid == ssid) {
            Some(index) => index,
            None => {
                self.networks.push(KnownNetwork {
                    ssid: ssid.to_string(),
                    priority: 0,
                    psk: None,
                });
                self.networks.len() - 1
            }
        };

        let network = &mut self.networks[index];
        network.priority = next;
        if psk.is_some() {
            network.psk = psk;
        }
        tracing::debug!(ssid = %network.ssid, priority = network.priority, "committed network");
        &self.networks[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ssid: &str, priority: u32) -> KnownNetwork {
        KnownNetwork {
            ssid: ssid.to_string(),
            priority,
            psk: None,
        }
    }

    #[test]
    fn test_priority_of_unknown_is_sentinel() {
        let store = PriorityStore::default();
        assert_eq!(store.priority_of("nowhere"), UNTRACKED);
    }

    #[test]
    fn test_highest_priority_empty_store_is_zero() {
        let store = PriorityStore::default();
        assert_eq!(store.highest_priority(), 0);
    }

    #[test]
    fn test_commit_new_network_lands_above_everything() {
        let mut store = PriorityStore::new(vec![record("home", 3), record("office", 1)]);

        let committed = store.commit("cafe", Some("espresso".to_string()));

        assert_eq!(committed.priority, 4);
        assert_eq!(store.priority_of("cafe"), 4);
        assert_eq!(store.psk_of("cafe"), Some("espresso"));
    }

    /// After a commit, the committed identity sits strictly above every
    /// priority observed before the commit.
    #[test]
    fn test_commit_is_monotonic() {
        let mut store = PriorityStore::new(vec![record("a", 5), record("b", 2)]);
        let before: Vec<u32> = store.networks().iter().map(|n| n.priority).collect();

        store.commit("b", None);

        let bumped = store.priority_of("b");
        assert!(before.iter().all(|p| bumped > *p as i32));
    }

    /// Re-committing the current top network still bumps it (no-op promotion
    /// is preserved, not optimized away).
    #[test]
    fn test_recommit_top_network_still_bumps() {
        let mut store = PriorityStore::new(vec![record("home", 7)]);

        store.commit("home", None);

        assert_eq!(store.priority_of("home"), 8);
    }

    #[test]
    fn test_commit_without_credential_keeps_stored_psk() {
        let mut store = PriorityStore::default();
        store.commit("home", Some("hunter2".to_string()));

        store.commit("home", None);

        assert_eq!(store.psk_of("home"), Some("hunter2"));
    }

    #[test]
    fn test_duplicate_records_dropped_on_load() {
        let store = PriorityStore::new(vec![record("home", 3), record("home", 9)]);

        assert_eq!(store.networks().len(), 1);
        assert_eq!(store.priority_of("home"), 3);
    }

    #[test]
    fn test_commit_keeps_identities_unique() {
        let mut store = PriorityStore::new(vec![record("home", 1)]);

        store.commit("home", None);
        store.commit("home", None);

        assert_eq!(store.networks().len(), 1);
    }
}
