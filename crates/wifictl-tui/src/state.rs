//! Application state.
//!
//! All of it lives in one flat struct: the reducer in `update` is the only
//! place that mutates it, and `render` only ever reads it. The interaction
//! mode and the connection controller are explicit state objects so both
//! state machines unit-test without the radio or a terminal.

use wifictl_core::connection::ConnectionController;
use wifictl_core::scan::{RankedNetwork, ScanResult};
use wifictl_core::store::PriorityStore;

use crate::input::PasswordInput;

/// Interaction mode of the network list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Browsing,
    EnteringPassword,
}

impl InteractionMode {
    pub fn is_entering(&self) -> bool {
        matches!(self, InteractionMode::EnteringPassword)
    }
}

/// Radio status line data, verbatim from the last update.
#[derive(Debug, Clone)]
pub struct LinkStatus {
    pub state: String,
    pub driver: String,
    pub scanning: bool,
}

impl Default for LinkStatus {
    fn default() -> Self {
        Self {
            state: "-".to_string(),
            driver: "-".to_string(),
            scanning: false,
        }
    }
}

/// TUI application state.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Tracked networks (priorities + credentials).
    pub store: PriorityStore,
    /// Connect decision state machine.
    pub connection: ConnectionController,
    /// Ranked, deduplicated view of the last scan.
    pub networks: Vec<RankedNetwork>,
    /// Currently associated network, if any.
    pub current: Option<ScanResult>,
    /// Supplicant state / driver / scanning flag for the header.
    pub link: LinkStatus,
    /// Cursor-selected identity.
    pub selected: Option<String>,
    /// Browsing vs. password entry.
    pub mode: InteractionMode,
    /// Password entry buffer.
    pub input: PasswordInput,
    /// Last persistence error, shown in the footer until the next commit.
    pub last_error: Option<String>,
}

impl AppState {
    pub fn new(store: PriorityStore) -> Self {
        Self {
            should_quit: false,
            store,
            connection: ConnectionController::default(),
            networks: Vec::new(),
            current: None,
            link: LinkStatus::default(),
            selected: None,
            mode: InteractionMode::default(),
            input: PasswordInput::default(),
            last_error: None,
        }
    }

    /// True when the selected identity is present in the current ranked list.
    pub fn selection_visible(&self) -> bool {
        self.selected
            .as_deref()
            .is_some_and(|ssid| self.networks.iter().any(|n| n.scan.ssid == ssid))
    }
}
