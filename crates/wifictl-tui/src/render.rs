//! Pure view functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! frame, and never mutate state or return effects. Line building is split
//! out so layout behavior (cursor marker, password row, overflow footer) is
//! testable without a terminal.

use ratatui::Frame;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use wifictl_core::scan::ScanResult;

use crate::state::AppState;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let lines = build_lines(app, area.height as usize);
    frame.render_widget(Paragraph::new(lines), area);
}

/// Builds the full screen as a list of lines bounded by `height` rows.
fn build_lines(app: &AppState, height: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(Line::from(format!(
        "State: {}, Driver: {}, Scanning: {}",
        app.link.state,
        app.link.driver,
        if app.link.scanning { "yes" } else { "no" }
    )));
    let current = app
        .current
        .as_ref()
        .map_or_else(|| "(none)".to_string(), format_network);
    lines.push(Line::from(format!("Current network: {current}")));
    lines.push(Line::default());

    let error_rows = usize::from(app.last_error.is_some());
    let budget = height.saturating_sub(lines.len() + error_rows);

    let mut used = 0;
    for (index, network) in app.networks.iter().enumerate() {
        let is_selected = app.selected.as_deref() == Some(network.scan.ssid.as_str());
        let entering_here = is_selected && app.mode.is_entering();
        let cost = 1 + usize::from(entering_here);
        let footer_reserve = usize::from(index + 1 < app.networks.len());

        if used + cost + footer_reserve > budget {
            lines.push(Line::from(format!(
                "... and {} more",
                app.networks.len() - index
            )));
            break;
        }

        let marker = if is_selected { "> " } else { "  " };
        let style = if is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::styled(
            format!("{marker}{}", format_network(&network.scan)),
            style,
        ));
        if entering_here {
            lines.push(Line::styled(
                format!("    Enter password: {}", app.input.line()),
                Style::default().fg(Color::Yellow),
            ));
        }
        used += cost;
    }

    if let Some(error) = &app.last_error {
        lines.push(Line::styled(
            format!("error: {error}"),
            Style::default().fg(Color::Red),
        ));
    }

    lines
}

fn format_network(scan: &ScanResult) -> String {
    let open = if scan.is_open() { " (open)" } else { "" };
    format!(
        "{}, {} MHz, {} dB{}",
        scan.ssid, scan.frequency, scan.signal, open
    )
}

#[cfg(test)]
mod tests {
    use wifictl_core::selection;
    use wifictl_core::store::PriorityStore;

    use super::*;
    use crate::state::InteractionMode;

    fn scan(ssid: &str, frequency: u32, signal: i32, security: &str) -> ScanResult {
        ScanResult {
            ssid: ssid.to_string(),
            frequency,
            signal,
            security: security.to_string(),
        }
    }

    fn app_with_scans(scans: &[ScanResult]) -> AppState {
        let mut app = AppState::new(PriorityStore::default());
        app.networks = selection::group(scans, &app.store);
        app
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_without_current_network() {
        let app = AppState::new(PriorityStore::default());
        let lines = build_lines(&app, 24);

        assert_eq!(text(&lines[0]), "State: -, Driver: -, Scanning: no");
        assert_eq!(text(&lines[1]), "Current network: (none)");
        assert_eq!(text(&lines[2]), "");
    }

    #[test]
    fn test_cursor_marker_and_open_suffix() {
        let mut app = app_with_scans(&[
            scan("home", 5180, -60, "[WPA2-PSK-CCMP][ESS]"),
            scan("cafe", 2412, -40, ""),
        ]);
        app.selected = Some("home".to_string());

        let lines = build_lines(&app, 24);

        assert_eq!(text(&lines[3]), "> home, 5180 MHz, -60 dB");
        assert_eq!(text(&lines[4]), "  cafe, 2412 MHz, -40 dB (open)");
    }

    #[test]
    fn test_password_row_under_selected_entry() {
        let mut app = app_with_scans(&[scan("home", 5180, -60, "x"), scan("cafe", 2412, -40, "")]);
        app.selected = Some("home".to_string());
        app.mode = InteractionMode::EnteringPassword;
        app.input.set("hunter2");

        let lines = build_lines(&app, 24);

        assert_eq!(text(&lines[4]), "    Enter password: hunter2");
        assert_eq!(text(&lines[5]), "  cafe, 2412 MHz, -40 dB (open)");
    }

    #[test]
    fn test_list_truncates_with_overflow_footer() {
        let scans: Vec<ScanResult> = (0..5)
            .map(|i| scan(&format!("net{i}"), 2412, -40 - i, ""))
            .collect();
        let app = app_with_scans(&scans);

        let lines = build_lines(&app, 6);

        assert_eq!(lines.len(), 6);
        assert_eq!(text(&lines[3]), "  net0, 2412 MHz, -40 dB (open)");
        assert_eq!(text(&lines[4]), "  net1, 2412 MHz, -41 dB (open)");
        assert_eq!(text(&lines[5]), "... and 3 more");
    }

    #[test]
    fn test_everything_fits_no_footer() {
        let app = app_with_scans(&[scan("a", 2412, -40, ""), scan("b", 2437, -50, "")]);

        let lines = build_lines(&app, 24);

        assert_eq!(lines.len(), 5);
        assert!(!text(&lines[4]).contains("more"));
    }

    #[test]
    fn test_persist_error_footer() {
        let mut app = app_with_scans(&[scan("a", 2412, -40, "")]);
        app.last_error = Some("disk full".to_string());

        let lines = build_lines(&app, 24);

        assert_eq!(text(lines.last().unwrap()), "error: disk full");
    }

    #[test]
    fn test_current_network_line() {
        let mut app = app_with_scans(&[scan("home", 5180, -60, "x")]);
        app.current = Some(scan("home", 5180, -60, "x"));

        let lines = build_lines(&app, 24);

        assert_eq!(text(&lines[1]), "Current network: home, 5180 MHz, -60 dB");
    }
}
