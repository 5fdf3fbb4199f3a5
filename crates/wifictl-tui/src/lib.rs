//! Full-screen TUI for wifictl.

pub mod effects;
pub mod events;
pub mod input;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};
use std::path::PathBuf;

use anyhow::Result;
pub use runtime::TuiRuntime;
use wifictl_core::config::Config;
use wifictl_core::radio::RadioHandle;

/// Runs the interactive network manager until the operator quits.
///
/// `config` carries the tracked networks loaded at startup; `config_path` is
/// where the store is rewritten on every commit.
pub async fn run_interactive(
    config: Config,
    config_path: PathBuf,
    radio: RadioHandle,
) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!("wifictl needs a terminal; run it from an interactive shell.");
    }

    let mut runtime = TuiRuntime::new(config, config_path, radio)?;
    runtime.run()
}
