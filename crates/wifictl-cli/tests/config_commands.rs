use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("wifictl")
        .env("WIFICTL_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("wifictl")
        .env("WIFICTL_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "# existing config").unwrap();

    cargo_bin_cmd!("wifictl")
        .env("WIFICTL_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_networks_lists_tracked_networks_by_priority() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        r#"interface = "wlan0"

[[networks]]
ssid = "cafe"
priority = 1

[[networks]]
ssid = "home"
priority = 3
psk = "hunter2"
"#,
    )
    .unwrap();

    cargo_bin_cmd!("wifictl")
        .env("WIFICTL_HOME", dir.path())
        .arg("networks")
        .assert()
        .success()
        .stdout(predicate::str::contains("home"))
        .stdout(predicate::str::contains("(psk stored)"))
        .stdout(predicate::str::is_match("(?s)home.*cafe").unwrap());
}

#[test]
fn test_networks_with_empty_config() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("wifictl")
        .env("WIFICTL_HOME", dir.path())
        .arg("networks")
        .assert()
        .success()
        .stdout(predicate::str::contains("No known networks."));
}
