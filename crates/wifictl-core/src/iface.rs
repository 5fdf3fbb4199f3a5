//! Wireless interface auto-detection.
//!
//! Picks the first `/sys/class/net` entry whose name starts with `w`
//! (wlan0, wlp3s0, wlx...), falling back to `wlan0` when nothing matches.

use std::fs;
use std::path::Path;

const FALLBACK: &str = "wlan0";

/// Returns the name of the wireless interface to manage.
pub fn detect() -> String {
    detect_in(Path::new("/sys/class/net"))
}

fn detect_in(dir: &Path) -> String {
    let Ok(entries) = fs::read_dir(dir) else {
        return FALLBACK.to_string();
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok()?.file_name().into_string().ok())
        .collect();
    names.sort();

    names
        .into_iter()
        .find(|name| name.starts_with('w'))
        .unwrap_or_else(|| FALLBACK.to_string())
}
