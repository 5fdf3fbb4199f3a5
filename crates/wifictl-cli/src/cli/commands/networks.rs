//! Known-network command handlers.

use wifictl_core::config::Config;

/// Prints the tracked networks, highest priority first.
pub fn list(config: &Config) {
    if config.networks.is_empty() {
        println!("No known networks.");
        return;
    }

    let mut networks: Vec<_> = config.networks.iter().collect();
    networks.sort_by(|a, b| b.priority.cmp(&a.priority));

    for network in networks {
        let credential = if network.psk.is_some() { "  (psk stored)" } else { "" };
        println!("{:<32} {:>4}{}", network.ssid, network.priority, credential);
    }
}
