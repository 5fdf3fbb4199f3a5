//! Radio collaborator contract.
//!
//! The radio/driver control channel is an external service; this module only
//! defines the command/event surface and the channel pair the TUI and a
//! backend communicate over. Backends must suppress overlapping scan requests
//! themselves; the UI side simply refrains from requesting while password
//! entry is active.

use tokio::sync::mpsc;

use crate::scan::ScanResult;

/// Requests to the radio backend. Fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioCommand {
    /// Trigger a scan cycle; results arrive as an `Update` event.
    Scan,
    /// Associate with a network, using the stored credential when present.
    Connect { ssid: String, psk: Option<String> },
}

/// Events from the radio backend.
#[derive(Debug, Clone)]
pub enum RadioEvent {
    /// Fires once after the backend initialized.
    Ready,
    /// Fires whenever the scanned set or connection state changes.
    Update(RadioUpdate),
}

/// One snapshot of the radio's view of the world.
#[derive(Debug, Clone, Default)]
pub struct RadioUpdate {
    /// Raw scan readings; may contain several per identity.
    pub networks: Vec<ScanResult>,
    /// The currently associated network, if any.
    pub current: Option<ScanResult>,
    /// Free-text supplicant state (e.g. `COMPLETED`, `SCANNING`).
    pub state: String,
    /// Driver name, for display only.
    pub driver: String,
    /// Whether a scan cycle is in flight.
    pub scanning: bool,
}

/// The UI-facing end of a radio backend.
pub struct RadioHandle {
    pub commands: mpsc::UnboundedSender<RadioCommand>,
    pub events: mpsc::UnboundedReceiver<RadioEvent>,
}

/// The backend-facing end of the channel pair.
pub struct RadioEndpoints {
    pub commands: mpsc::UnboundedReceiver<RadioCommand>,
    pub events: mpsc::UnboundedSender<RadioEvent>,
}

impl RadioHandle {
    /// Creates the connected handle/endpoint pair.
    pub fn pair() -> (RadioHandle, RadioEndpoints) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (
            RadioHandle {
                commands: command_tx,
                events: event_rx,
            },
            RadioEndpoints {
                commands: command_rx,
                events: event_tx,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_connected_both_ways() {
        let (mut handle, mut endpoints) = RadioHandle::pair();

        handle.commands.send(RadioCommand::Scan).unwrap();
        assert_eq!(
            endpoints.commands.try_recv().unwrap(),
            RadioCommand::Scan
        );

        endpoints.events.send(RadioEvent::Ready).unwrap();
        assert!(matches!(handle.events.try_recv().unwrap(), RadioEvent::Ready));
    }
}
