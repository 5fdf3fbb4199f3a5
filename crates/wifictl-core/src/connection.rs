//! Connection controller: decides when to issue a connect action.
//!
//! Two states: idle (no auto-connect attempted this epoch) and settled (a
//! connect was issued and stands until invalidated). An epoch ends when a
//! tracked network outranks the settled snapshot — typically because the
//! operator just bumped a different network's priority — or when a commit
//! explicitly resets the controller. No disconnect is ever issued; being
//! settled only gates further connect attempts.

use crate::scan::RankedNetwork;
use crate::selection;
use crate::store::PriorityStore;

/// A connect action for the radio collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    pub ssid: String,
    pub psk: Option<String>,
}

/// Snapshot of the network an auto-connect settled on.
#[derive(Debug, Clone)]
struct Settled {
    ssid: String,
    priority: i32,
}

#[derive(Debug, Default)]
pub struct ConnectionController {
    settled: Option<Settled>,
}

impl ConnectionController {
    /// Identity of the settled network, if any.
    pub fn settled_ssid(&self) -> Option<&str> {
        self.settled.as_ref().map(|s| s.ssid.as_str())
    }

    /// Explicit epoch reset; the next update re-evaluates from scratch.
    pub fn invalidate(&mut self) {
        self.settled = None;
    }

    /// Runs both state checks against a fresh ranked list, in order:
    /// invalidation first, then the at-most-once auto-connect.
    ///
    /// Invalidation fires when any observed network's tracked priority
    /// strictly exceeds the settled snapshot. Because the snapshot is
    /// compared (not the live record), re-promoting the settled network
    /// itself also starts a new epoch.
    pub fn on_update(
        &mut self,
        ranked: &[RankedNetwork],
        store: &PriorityStore,
    ) -> Option<ConnectRequest> {
        if let Some(settled) = &self.settled
            && ranked.iter().any(|n| n.priority > settled.priority)
        {
            tracing::debug!(ssid = %settled.ssid, "settled network outranked; re-evaluating");
            self.settled = None;
        }
        if self.settled.is_some() {
            return None;
        }

        let best = selection::best(ranked.iter().filter(|n| n.is_tracked()))?;
        self.settled = Some(Settled {
            ssid: best.scan.ssid.clone(),
            priority: best.priority,
        });
        tracing::info!(ssid = %best.scan.ssid, priority = best.priority, "auto-connecting");
        Some(ConnectRequest {
            ssid: best.scan.ssid.clone(),
            psk: store.psk_of(&best.scan.ssid).map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanResult;
    use crate::selection::group;
    use crate::store::KnownNetwork;

    fn scan(ssid: &str, frequency: u32, signal: i32) -> ScanResult {
        ScanResult {
            ssid: ssid.to_string(),
            frequency,
            signal,
            security: String::new(),
        }
    }

    fn store_with(entries: &[(&str, u32, Option<&str>)]) -> PriorityStore {
        PriorityStore::new(
            entries
                .iter()
                .map(|(ssid, priority, psk)| KnownNetwork {
                    ssid: (*ssid).to_string(),
                    priority: *priority,
                    psk: psk.map(str::to_string),
                })
                .collect(),
        )
    }

    #[test]
    fn test_no_tracked_candidates_no_action() {
        let store = PriorityStore::default();
        let ranked = group(&[scan("guest", 2412, -40)], &store);
        let mut controller = ConnectionController::default();

        assert!(controller.on_update(&ranked, &store).is_none());
        assert!(controller.settled_ssid().is_none());
    }

    #[test]
    fn test_connects_to_best_tracked_with_stored_psk() {
        let store = store_with(&[("home", 2, Some("hunter2")), ("office", 1, None)]);
        let ranked = group(
            &[scan("office", 2412, -30), scan("home", 5180, -60)],
            &store,
        );
        let mut controller = ConnectionController::default();

        let request = controller.on_update(&ranked, &store).unwrap();

        assert_eq!(request.ssid, "home");
        assert_eq!(request.psk.as_deref(), Some("hunter2"));
        assert_eq!(controller.settled_ssid(), Some("home"));
    }

    /// Identical updates with no priority change connect exactly once.
    #[test]
    fn test_connects_at_most_once_per_epoch() {
        let store = store_with(&[("home", 1, None)]);
        let ranked = group(&[scan("home", 2412, -40)], &store);
        let mut controller = ConnectionController::default();

        assert!(controller.on_update(&ranked, &store).is_some());
        for _ in 0..5 {
            assert!(controller.on_update(&ranked, &store).is_none());
        }
    }

    /// Settle on A (priority 1), bump B to 2: the next update clears the
    /// settled state and issues a connect for B.
    #[test]
    fn test_invalidate_and_reconnect_on_priority_bump() {
        let mut store = store_with(&[("a", 1, None), ("b", 0, None)]);
        let scans = [scan("a", 2412, -40), scan("b", 5180, -60)];
        let mut controller = ConnectionController::default();

        let first = controller
            .on_update(&group(&scans, &store), &store)
            .unwrap();
        assert_eq!(first.ssid, "a");

        store.commit("b", None); // b now outranks a
        let second = controller
            .on_update(&group(&scans, &store), &store)
            .unwrap();
        assert_eq!(second.ssid, "b");
        assert_eq!(controller.settled_ssid(), Some("b"));
    }

    /// Re-promoting the settled network itself starts a new epoch and
    /// reconnects to it (fresh credentials get applied).
    #[test]
    fn test_repromoting_settled_network_reconnects() {
        let mut store = store_with(&[("home", 1, None)]);
        let scans = [scan("home", 2412, -40)];
        let mut controller = ConnectionController::default();

        assert!(
            controller
                .on_update(&group(&scans, &store), &store)
                .is_some()
        );

        store.commit("home", Some("fresh".to_string()));
        let request = controller
            .on_update(&group(&scans, &store), &store)
            .unwrap();
        assert_eq!(request.ssid, "home");
        assert_eq!(request.psk.as_deref(), Some("fresh"));
    }

    /// The settled network dropping out of the scan list does not end the
    /// epoch by itself.
    #[test]
    fn test_settled_network_vanishing_keeps_epoch() {
        let store = store_with(&[("home", 1, None)]);
        let mut controller = ConnectionController::default();

        assert!(
            controller
                .on_update(&group(&[scan("home", 2412, -40)], &store), &store)
                .is_some()
        );

        let empty = group(&[scan("guest", 2412, -40)], &store);
        assert!(controller.on_update(&empty, &store).is_none());
        assert_eq!(controller.settled_ssid(), Some("home"));
    }

    #[test]
    fn test_explicit_invalidate_allows_reconnect() {
        let store = store_with(&[("home", 1, None)]);
        let ranked = group(&[scan("home", 2412, -40)], &store);
        let mut controller = ConnectionController::default();

        assert!(controller.on_update(&ranked, &store).is_some());
        controller.invalidate();
        assert!(controller.on_update(&ranked, &store).is_some());
    }
}
