//! Action enum — all user-initiated intents and internal events.

use radio_core::state::ViewMode;
use radio_core::station::Station;

/// Panes that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    StationGrid,
    SearchBar,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Playback ─────────────────────────────────────────────────────────────
    Play(Station),
    TogglePause,
    Volume(f32),

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── Filter criteria ──────────────────────────────────────────────────────
    SetMode(ViewMode),
    OpenSearch,
    CloseSearch,
    SearchChanged(String),
    OpenCategories,
    CloseCategories,
    /// Empty string selects "All Categories".
    SetCategory(String),

    // ── Favorites ────────────────────────────────────────────────────────────
    ToggleFavorite(Station),

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    CopyToClipboard(String), // text to copy

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
