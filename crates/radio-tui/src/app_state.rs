//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this for station data, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use chrono::{DateTime, Local};
use radio_core::config::Config;
use radio_core::state::BrowserState;

use crate::widgets::status_bar::InputMode;

/// Where the one-shot directory fetch stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Loaded,
    /// The fetch failed.  Rendered exactly like an empty directory.
    Failed,
}

/// Transport state reported back by the playback delegate.
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    pub volume: f32,
    pub paused: bool,
    /// Set when the delegate confirms the stream was handed to mpv.
    pub started_at: Option<DateTime<Local>>,
}

/// The full shared state of the application.
/// Components read this; only the App event-loop writes to it.
pub struct AppState {
    pub browser: BrowserState,
    pub load_status: LoadStatus,
    pub fetched_at: Option<DateTime<Local>>,
    pub input_mode: InputMode,
    pub playback: PlaybackInfo,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            browser: BrowserState::new(config.trending.names.clone())
                .with_category_limit(config.ui.category_limit),
            load_status: LoadStatus::Loading,
            fetched_at: None,
            input_mode: InputMode::Normal,
            playback: PlaybackInfo {
                volume: config.player.default_volume.clamp(0.0, 1.0),
                paused: false,
                started_at: None,
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load_status == LoadStatus::Loading
    }
}
