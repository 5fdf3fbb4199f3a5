//! Scan data model.
//!
//! `ScanResult` is one observed access-point reading, replaced wholesale on
//! every scan cycle. `RankedNetwork` pairs a reading with its resolved
//! priority and is recomputed each cycle, never cached across cycles.

/// Priority sentinel for networks without a persisted record.
pub const UNTRACKED: i32 = -1;

/// One observed access point from a scan cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// SSID; the identity used for ranking and tracking.
    pub ssid: String,
    /// Operating frequency in MHz.
    pub frequency: u32,
    /// Signal strength in dB; higher is stronger.
    pub signal: i32,
    /// Security descriptor; empty when no key material is required.
    pub security: String,
}

impl ScanResult {
    /// Returns true when the network requires no key material.
    pub fn is_open(&self) -> bool {
        self.security.is_empty()
    }
}

/// A scan reading paired with its resolved priority.
///
/// `priority` equals the store's current priority for the identity, or
/// [`UNTRACKED`] when no record exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedNetwork {
    pub scan: ScanResult,
    pub priority: i32,
}

impl RankedNetwork {
    /// Returns true when a persisted record backs this network.
    pub fn is_tracked(&self) -> bool {
        self.priority >= 0
    }
}
