//! wpa_cli radio backend.
//!
//! Drives an already-running wpa_supplicant through the `wpa_cli` binary and
//! translates its output into the radio event contract. Everything stays
//! behind `RadioHandle`; nothing above this module knows wpa_cli exists.
//!
//! Scan flow: `scan` is issued immediately and acknowledged with a
//! `scanning: true` snapshot; results are collected once the supplicant had
//! time to settle. A scan request arriving while one is settling is dropped
//! rather than overlapped.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use tokio::process::Command;
use wifictl_core::radio::{RadioCommand, RadioEndpoints, RadioEvent, RadioHandle, RadioUpdate};
use wifictl_core::scan::ScanResult;

/// Delay between issuing `scan` and collecting `scan_results`.
const SCAN_SETTLE: Duration = Duration::from_millis(2500);

/// Spawns the backend task and returns the UI-facing handle.
pub fn spawn(interface: String) -> RadioHandle {
    let (handle, endpoints) = RadioHandle::pair();
    tokio::spawn(run_backend(interface, endpoints));
    handle
}

async fn run_backend(interface: String, mut io: RadioEndpoints) {
    let driver = driver_name(&interface);
    let _ = io.events.send(RadioEvent::Ready);

    let mut networks: Vec<ScanResult> = Vec::new();
    let settle = tokio::time::sleep(SCAN_SETTLE);
    tokio::pin!(settle);
    let mut scan_pending = false;

    loop {
        tokio::select! {
            command = io.commands.recv() => match command {
                None => break,
                Some(RadioCommand::Scan) => {
                    if scan_pending {
                        continue;
                    }
                    match wpa_cli(&interface, &["scan"]).await {
                        Ok(_) => {
                            let status = supplicant_status(&interface).await.unwrap_or_default();
                            let _ = io.events.send(RadioEvent::Update(snapshot(
                                &networks, &status, &driver, true,
                            )));
                            scan_pending = true;
                            settle.as_mut().reset(tokio::time::Instant::now() + SCAN_SETTLE);
                        }
                        Err(err) => tracing::warn!(error = %err, "scan request failed"),
                    }
                }
                Some(RadioCommand::Connect { ssid, psk }) => {
                    if let Err(err) = connect(&interface, &ssid, psk.as_deref()).await {
                        tracing::error!(error = %err, ssid = %ssid, "connect failed");
                    }
                }
            },
            () = &mut settle, if scan_pending => {
                scan_pending = false;
                match wpa_cli(&interface, &["scan_results"]).await {
                    Ok(raw) => networks = parse_scan_results(&raw),
                    Err(err) => tracing::warn!(error = %err, "scan results unavailable"),
                }
                let status = supplicant_status(&interface).await.unwrap_or_default();
                let _ = io.events.send(RadioEvent::Update(snapshot(
                    &networks, &status, &driver, false,
                )));
            }
        }
    }
}

/// Registers and selects a network in the supplicant.
async fn connect(interface: &str, ssid: &str, psk: Option<&str>) -> Result<()> {
    let id = wpa_cli(interface, &["add_network"]).await?;
    let id = id.trim().to_string();

    wpa_cli(interface, &["set_network", &id, "ssid", &quoted(ssid)]).await?;
    match psk {
        Some(psk) => {
            wpa_cli(interface, &["set_network", &id, "psk", &quoted(psk)]).await?;
        }
        None => {
            wpa_cli(interface, &["set_network", &id, "key_mgmt", "NONE"]).await?;
        }
    }
    wpa_cli(interface, &["select_network", &id]).await?;
    Ok(())
}

async fn wpa_cli(interface: &str, args: &[&str]) -> Result<String> {
    let output = Command::new("wpa_cli")
        .arg("-i")
        .arg(interface)
        .args(args)
        .output()
        .await
        .context("spawn wpa_cli")?;
    if !output.status.success() {
        bail!("wpa_cli {} exited with {}", args.join(" "), output.status);
    }
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout == "FAIL" {
        bail!("wpa_cli {} returned FAIL", args.join(" "));
    }
    Ok(stdout)
}

async fn supplicant_status(interface: &str) -> Result<SupplicantStatus> {
    let raw = wpa_cli(interface, &["status"]).await?;
    Ok(parse_status(&raw))
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

/// Relevant fields of `wpa_cli status` output.
#[derive(Debug, Default)]
struct SupplicantStatus {
    state: String,
    ssid: Option<String>,
    frequency: Option<u32>,
}

fn snapshot(
    networks: &[ScanResult],
    status: &SupplicantStatus,
    driver: &str,
    scanning: bool,
) -> RadioUpdate {
    RadioUpdate {
        networks: networks.to_vec(),
        current: current_network(status, networks),
        state: if status.state.is_empty() {
            "UNKNOWN".to_string()
        } else {
            status.state.clone()
        },
        driver: driver.to_string(),
        scanning,
    }
}

/// The associated network, resolved against the latest scan when possible.
///
/// When the supplicant reports an association for an ssid the last scan did
/// not capture, a bare reading is synthesized from the status fields.
fn current_network(status: &SupplicantStatus, networks: &[ScanResult]) -> Option<ScanResult> {
    if !status.state.eq_ignore_ascii_case("COMPLETED") {
        return None;
    }
    let ssid = status.ssid.as_deref()?;
    networks.iter().find(|n| n.ssid == ssid).cloned().or_else(|| {
        Some(ScanResult {
            ssid: ssid.to_string(),
            frequency: status.frequency.unwrap_or(0),
            signal: 0,
            security: String::new(),
        })
    })
}

/// Parses `wpa_cli status` key=value lines.
fn parse_status(raw: &str) -> SupplicantStatus {
    let mut status = SupplicantStatus::default();
    for line in raw.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key {
            "wpa_state" => status.state = value.to_string(),
            "ssid" => status.ssid = Some(value.to_string()),
            "freq" => status.frequency = value.parse().ok(),
            _ => {}
        }
    }
    status
}

/// Parses the `scan_results` table.
///
/// Row format after the header line, tab separated:
/// `bssid  frequency  signal level  flags  ssid`
fn parse_scan_results(raw: &str) -> Vec<ScanResult> {
    raw.lines().skip(1).filter_map(parse_scan_row).collect()
}

fn parse_scan_row(line: &str) -> Option<ScanResult> {
    let mut fields = line.split('\t');
    let _bssid = fields.next()?;
    let frequency = fields.next()?.trim().parse().ok()?;
    let signal = fields.next()?.trim().parse().ok()?;
    let flags = fields.next()?.trim();
    let ssid = fields.next()?.trim();
    if ssid.is_empty() {
        // Hidden networks carry no identity to rank or track.
        return None;
    }
    Some(ScanResult {
        ssid: ssid.to_string(),
        frequency,
        signal,
        security: security_from_flags(flags),
    })
}

/// Maps supplicant capability flags to the security descriptor: the flags
/// string when key material is required, empty for open networks.
fn security_from_flags(flags: &str) -> String {
    const KEYED: [&str; 3] = ["WPA", "WEP", "EAP"];
    if KEYED.iter().any(|marker| flags.contains(marker)) {
        flags.to_string()
    } else {
        String::new()
    }
}

fn driver_name(interface: &str) -> String {
    let path = format!("/sys/class/net/{interface}/device/uevent");
    driver_from_uevent(&std::fs::read_to_string(path).unwrap_or_default())
}

fn driver_from_uevent(contents: &str) -> String {
    contents
        .lines()
        .find_map(|line| line.strip_prefix("DRIVER="))
        .unwrap_or("unknown")
        .to_string()
}
