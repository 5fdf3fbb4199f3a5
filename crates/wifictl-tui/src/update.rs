//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. Keeping the reducer free of I/O is what
//! lets the browsing/password-entry machine and the connect machine be tested
//! without a terminal or a radio.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use wifictl_core::radio::{RadioEvent, RadioUpdate};
use wifictl_core::selection;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, InteractionMode, LinkStatus};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::ScanTimer => scan_request(app),
        UiEvent::Terminal(event) => handle_terminal_event(app, event),
        UiEvent::Radio(RadioEvent::Ready) => scan_request(app),
        UiEvent::Radio(RadioEvent::Update(update)) => handle_radio_update(app, update),
        UiEvent::PersistFailed(message) => {
            app.last_error = Some(message);
            vec![]
        }
    }
}

/// Periodic re-scan, suspended while the operator is typing a passphrase so
/// the list cannot shift mid-entry.
fn scan_request(app: &AppState) -> Vec<UiEffect> {
    if app.mode.is_entering() {
        vec![]
    } else {
        vec![UiEffect::Scan]
    }
}

// ============================================================================
// Radio updates
// ============================================================================

fn handle_radio_update(app: &mut AppState, update: RadioUpdate) -> Vec<UiEffect> {
    app.networks = selection::group(&update.networks, &app.store);
    app.current = update.current;
    app.link = LinkStatus {
        state: update.state,
        driver: update.driver,
        scanning: update.scanning,
    };

    // Initial cursor placement: the connected network when visible, else the
    // top of the list.
    if app.selected.is_none() && !app.networks.is_empty() {
        let ssid = app
            .current
            .as_ref()
            .map(|c| c.ssid.clone())
            .filter(|ssid| app.networks.iter().any(|n| &n.scan.ssid == ssid))
            .unwrap_or_else(|| app.networks[0].scan.ssid.clone());
        app.selected = Some(ssid);
    }

    // Entry mode cannot outlive its target dropping out of the list.
    if app.mode.is_entering() && !app.selection_visible() {
        app.mode = InteractionMode::Browsing;
    }

    match app.connection.on_update(&app.networks, &app.store) {
        Some(request) => vec![UiEffect::Connect(request)],
        None => vec![],
    }
}

// ============================================================================
// Terminal events
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        // Resize just re-renders on the next tick.
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    match key.code {
        KeyCode::Down => {
            move_cursor(app, 1);
            vec![]
        }
        KeyCode::Up => {
            move_cursor(app, -1);
            vec![]
        }
        KeyCode::Enter => confirm(app),
        KeyCode::Esc if app.mode.is_entering() => {
            app.mode = InteractionMode::Browsing;
            vec![]
        }
        KeyCode::Char(ch) if app.mode.is_entering() => {
            app.input.insert(ch);
            vec![]
        }
        KeyCode::Backspace if app.mode.is_entering() => {
            app.input.backspace();
            vec![]
        }
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => vec![],
    }
}

/// Moves the cursor through the ranked list, clamping at both ends.
///
/// Any navigation cancels an in-progress password entry without saving. When
/// nothing is selected yet, the first entry is selected and the increment is
/// swallowed.
fn move_cursor(app: &mut AppState, delta: isize) {
    app.mode = InteractionMode::Browsing;

    if app.networks.is_empty() {
        return;
    }
    let Some(selected) = app.selected.clone() else {
        app.selected = Some(app.networks[0].scan.ssid.clone());
        return;
    };

    let target = match app.networks.iter().position(|n| n.scan.ssid == selected) {
        Some(index) => index as isize + delta,
        // Selection scrolled out of the list entirely: land on the last row.
        None => app.networks.len() as isize - 1,
    };
    let clamped = target.clamp(0, app.networks.len() as isize - 1) as usize;
    app.selected = Some(app.networks[clamped].scan.ssid.clone());
}

/// Confirm: commits the typed credential when entry is active, otherwise
/// enters password mode (pre-filled with any stored credential).
fn confirm(app: &mut AppState) -> Vec<UiEffect> {
    if app.mode.is_entering()
        && let Some(ssid) = app.selected.clone()
    {
        let line = app.input.line().to_string();
        let psk = (!line.is_empty()).then_some(line);
        app.store.commit(&ssid, psk);
        // A fresh commit always re-evaluates the connect decision.
        app.connection.invalidate();
        app.mode = InteractionMode::Browsing;
        app.last_error = None;
        return vec![UiEffect::PersistStore];
    }

    app.mode = InteractionMode::EnteringPassword;
    let prefill = app
        .selected
        .as_deref()
        .and_then(|ssid| app.store.psk_of(ssid))
        .map(str::to_string);
    app.input.set(prefill.as_deref().unwrap_or(""));
    vec![]
}
