//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use wifictl_core::config::{self, Config};
use wifictl_core::iface;

use crate::{logging, radio};

mod commands;

#[derive(Parser)]
#[command(name = "wifictl")]
#[command(version = "0.1")]
#[command(about = "Terminal wireless network manager")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Wireless interface to manage (default: config value, else auto-detected)
    #[arg(long, short = 'i')]
    interface: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List known networks and their priorities
    Networks,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize an empty config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config_path = config::paths::config_path();
    let mut config = Config::load_from(&config_path);

    // default to the interactive manager
    let Some(command) = cli.command else {
        let _log_guard = logging::init().context("init logging")?;

        // An auto-detected interface is remembered in the config on the next
        // commit; a --interface override stays session-only.
        let interface = match cli.interface {
            Some(interface) => interface,
            None => config.interface.clone().unwrap_or_else(|| {
                let detected = iface::detect();
                config.interface = Some(detected.clone());
                detected
            }),
        };
        tracing::info!(interface = %interface, "starting");

        let radio = radio::spawn(interface);
        return wifictl_tui::run_interactive(config, config_path, radio)
            .await
            .context("interactive session failed");
    };

    match command {
        Commands::Networks => {
            commands::networks::list(&config);
            Ok(())
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
