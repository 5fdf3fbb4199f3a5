//! TUI runtime - owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them —
//! sending radio commands, persisting the store, and quitting.

use std::io::Stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use wifictl_core::config::Config;
use wifictl_core::radio::{RadioCommand, RadioHandle};
use wifictl_core::store::PriorityStore;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Render cadence; also the upper bound on input latency while idle.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Fixed interval between re-scan requests.
pub const SCAN_INTERVAL: Duration = Duration::from_secs(5);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is guaranteed to be restored on drop, panic, or Ctrl+C.
pub struct TuiRuntime {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state.
    pub state: AppState,
    /// Radio backend channels.
    radio: RadioHandle,
    /// Where the store is persisted on commit.
    config_path: PathBuf,
    /// Interface name written back on every persist.
    interface: Option<String>,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
    /// Last time the re-scan timer fired.
    last_scan_timer: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime, taking over the terminal.
    pub fn new(config: Config, config_path: PathBuf, radio: RadioHandle) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let interface = config.interface.clone();
        let state = AppState::new(PriorityStore::new(config.networks));

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            radio,
            config_path,
            interface,
            last_tick: now,
            last_scan_timer: now,
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            for event in self.collect_events()? {
                // Only Tick triggers render - terminal and radio events
                // update state but batch renders to the next Tick.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from all sources (radio channel, timers, terminal).
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Drain radio events first so a scan update is always reduced before
        // the render that follows it.
        while let Ok(radio_event) = self.radio.events.try_recv() {
            events.push(UiEvent::Radio(radio_event));
        }

        if self.last_scan_timer.elapsed() >= SCAN_INTERVAL {
            events.push(UiEvent::ScanTimer);
            self.last_scan_timer = Instant::now();
        }

        // Poll terminal events:
        // - If we already have events to process, do a non-blocking poll
        // - Otherwise block until the next tick is due
        let poll_duration = if events.is_empty() {
            TICK_INTERVAL.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= TICK_INTERVAL {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::Scan => {
                let _ = self.radio.commands.send(RadioCommand::Scan);
            }
            UiEffect::Connect(request) => {
                let _ = self.radio.commands.send(RadioCommand::Connect {
                    ssid: request.ssid,
                    psk: request.psk,
                });
            }
            UiEffect::PersistStore => {
                let config = Config {
                    interface: self.interface.clone(),
                    networks: self.state.store.networks().to_vec(),
                };
                if let Err(err) = config.save_to(&self.config_path) {
                    tracing::error!(error = %err, path = %self.config_path.display(), "failed to persist networks");
                    self.dispatch_event(UiEvent::PersistFailed(format!("{err:#}")));
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
