//! UI event types.
//!
//! Everything the reducer reacts to arrives as one of these. The runtime
//! collects them from the terminal, the radio channel, and its own timers.

use wifictl_core::radio::RadioEvent;

#[derive(Debug)]
pub enum UiEvent {
    /// Render cadence tick.
    Tick,
    /// Fixed-interval re-scan timer fired.
    ScanTimer,
    /// A terminal input event (keys, resize).
    Terminal(crossterm::event::Event),
    /// An event from the radio backend.
    Radio(RadioEvent),
    /// Persisting the store failed; message for the footer.
    PersistFailed(String),
}
