//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only; the reducer itself never touches the radio
//! channel or the filesystem, which keeps it a pure state transition.

use wifictl_core::connection::ConnectRequest;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Request a scan cycle from the radio backend.
    Scan,
    /// Issue a connect action.
    Connect(ConnectRequest),
    /// Write the full store to the config file.
    PersistStore,
    /// Quit the application.
    Quit,
}
