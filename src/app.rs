//! Application state for the widget
//!
//! The widget has only two views: a loading screen while the pipeline runs
//! and the rendered summary. Keyboard input either quits or requests a
//! forced re-aggregation.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::data::Summary;

/// Current view of the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// The aggregation pipeline is running
    Loading,
    /// The snapshot is on screen
    Summary,
}

/// Widget state: current view, latest snapshot, and pending user requests
pub struct App {
    /// Current view
    pub state: AppState,
    /// Latest snapshot, once one has loaded
    pub summary: Option<Summary>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating the user asked for a forced refresh
    pub refresh_requested: bool,
    /// When the snapshot on screen was loaded
    pub last_refresh: Option<DateTime<Local>>,
}

impl App {
    /// Creates an App in the loading state
    pub fn new() -> Self {
        Self {
            state: AppState::Loading,
            summary: None,
            should_quit: false,
            refresh_requested: false,
            last_refresh: None,
        }
    }

    /// Installs a freshly aggregated snapshot and shows the summary view
    pub fn apply_summary(&mut self, summary: Summary) {
        self.summary = Some(summary);
        self.last_refresh = Some(Local::now());
        self.state = AppState::Summary;
    }

    /// Handles keyboard input
    ///
    /// # Key Bindings
    /// - `q` or `Esc`: quit
    /// - `r` (in Summary): request a forced refresh
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        match self.state {
            AppState::Loading => {
                // Only quit is allowed while loading
                if matches!(key_event.code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.should_quit = true;
                }
            }
            AppState::Summary => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                _ => {}
            },
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
