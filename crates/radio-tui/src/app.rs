//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Playback goes out through a `PlaybackDelegate`; its results come back
//!   on a separate `PlayerEvent` channel.

use std::io;
use std::time::Duration;

use chrono::Local;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use radio_core::config::{Config, DirectoryConfig};
use radio_core::directory::{Directory, DirectoryClient};
use radio_core::state::ViewMode;

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, LoadStatus},
    component::Component,
    components::{
        category_picker::CategoryPicker, header::Header, help_overlay::HelpOverlay,
        now_playing::NowPlaying, search_bar::SearchBar, station_grid::StationGrid,
    },
    focus::FocusRing,
    player::{PlaybackDelegate, PlayerEvent},
    widgets::{
        status_bar::{self, InputMode},
        toast::{Severity, ToastManager},
    },
};

const VOLUME_STEP: f32 = 0.05;

// ── Internal event bus ────────────────────────────────────────────────────────

pub enum AppMessage {
    Event(Event),
    DirectoryLoaded(Directory),
    /// The fetch failed; already logged where it happened.
    DirectoryFailed,
    Player(PlayerEvent),
}

/// Last-drawn layout rects — used for mouse hit-testing.
#[derive(Debug, Clone, Default)]
struct PaneAreas {
    header: Rect,
    search_bar: Rect,
    station_grid: Rect,
    now_playing: Rect,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    config: Config,
    state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    header: Header,
    search_bar: SearchBar,
    station_grid: StationGrid,
    category_picker: CategoryPicker,
    now_playing: NowPlaying,
    help_overlay: HelpOverlay,

    focus: FocusRing,
    player: Box<dyn PlaybackDelegate + Send>,

    /// Whether to quit on next iteration.
    should_quit: bool,

    /// Last-drawn layout rects — used for mouse hit-testing.
    pane_areas: PaneAreas,

    /// Toast notification manager.
    toast: ToastManager,
}

impl App {
    pub fn new(config: Config, player: Box<dyn PlaybackDelegate + Send>) -> Self {
        let state = AppState::new(&config);
        Self {
            config,
            state,
            header: Header::new(),
            search_bar: SearchBar::new(),
            station_grid: StationGrid::new(),
            category_picker: CategoryPicker::new(),
            now_playing: NowPlaying::new(),
            help_overlay: HelpOverlay::new(),
            focus: FocusRing::new(vec![ComponentId::StationGrid, ComponentId::SearchBar]),
            player,
            should_quit: false,
            pane_areas: PaneAreas::default(),
            toast: ToastManager::new(),
        }
    }

    pub async fn run(
        mut self,
        mut player_events: mpsc::UnboundedReceiver<PlayerEvent>,
    ) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(1024);
        let cancel = CancellationToken::new();

        // ── Background task: keyboard/mouse events ────────────────────────────
        // Polls with a timeout so the task notices teardown.
        let event_tx = tx.clone();
        let input_cancel = cancel.clone();
        tokio::task::spawn_blocking(move || {
            while !input_cancel.is_cancelled() {
                match event::poll(Duration::from_millis(100)) {
                    Ok(true) => match event::read() {
                        Ok(ev) => {
                            if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    },
                    Ok(false) => {}
                    Err(_) => break,
                }
            }
        });

        // ── Background task: one-shot directory fetch ─────────────────────────
        self.toast.spinner("loading stations…");
        spawn_directory_fetch(self.config.directory.clone(), tx.clone(), cancel.child_token());

        // Toast expiry check + spinner animation: 100ms for smooth braille animation
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
                needs_redraw = false;
            }

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    let mut redraw = self.handle_message(msg);
                    while let Ok(next) = rx.try_recv() {
                        redraw |= self.handle_message(next);
                    }
                    needs_redraw = redraw;
                }

                Some(ev) = player_events.recv() => {
                    needs_redraw = self.handle_message(AppMessage::Player(ev));
                }

                _ = ui_tick.tick() => {
                    // Also repaints the elapsed-time counter.
                    self.toast.tick();
                    needs_redraw = true;
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        info!("shutting down");
        cancel.cancel();
        self.player.shutdown();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Apply one message.  Returns whether the screen needs a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return false;
                    }
                    let actions = self.handle_key(key);
                    for a in actions {
                        self.dispatch(a);
                    }
                }
                Event::Mouse(mouse) => {
                    let actions = self.handle_mouse(mouse);
                    for a in actions {
                        self.dispatch(a);
                    }
                }
                Event::Resize(..) => {}
                _ => return false,
            },

            AppMessage::DirectoryLoaded(directory) => {
                let count = directory.stations.len();
                info!(
                    "directory loaded: {} playable of {} records",
                    count, directory.raw_count
                );
                self.state.browser.load(directory.stations);
                self.state.load_status = LoadStatus::Loaded;
                self.state.fetched_at = Some(directory.fetched_at);
                self.toast.resolve_spinner(
                    Severity::Success,
                    format!("{} stations", count),
                    Duration::from_secs(2),
                );
            }

            AppMessage::DirectoryFailed => {
                // Shown exactly like an empty directory.
                self.state.load_status = LoadStatus::Failed;
                self.toast.dismiss_spinner();
            }

            AppMessage::Player(ev) => self.on_player_event(ev),
        }
        true
    }

    fn on_player_event(&mut self, ev: PlayerEvent) {
        match ev {
            PlayerEvent::Started(url) => {
                let current = self.state.browser.now_playing().map(|s| s.url.as_str());
                if current == Some(url.as_str()) {
                    self.state.playback.started_at = Some(Local::now());
                    self.state.playback.paused = false;
                } else {
                    debug!("player: stale start for {}", url);
                }
            }
            PlayerEvent::Paused(paused) => self.state.playback.paused = paused,
            PlayerEvent::Error(msg) => self.toast.error(msg),
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Action::Quit];
        }

        // Help overlay captures all keys when visible
        if self.help_overlay.visible {
            let actions = self.help_overlay.handle_key(key, &self.state);
            if !actions.is_empty() {
                return actions;
            }
            // Any other key closes the overlay
            return vec![Action::ToggleHelp];
        }

        match self.state.input_mode {
            InputMode::Categories => return self.category_picker.handle_key(key, &self.state),
            InputMode::Search => {
                return match key.code {
                    KeyCode::Tab | KeyCode::BackTab => vec![Action::CloseSearch],
                    _ => self.search_bar.handle_key(key, &self.state),
                };
            }
            InputMode::Normal => {}
        }

        let vol = self.state.playback.volume;
        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Char('/') => return vec![Action::OpenSearch],
            KeyCode::Char('c') => return vec![Action::OpenCategories],
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            KeyCode::Char('1') | KeyCode::Char('e') => return vec![Action::SetMode(ViewMode::Explore)],
            KeyCode::Char('2') | KeyCode::Char('f') => return vec![Action::SetMode(ViewMode::Favorites)],
            KeyCode::Char('3') | KeyCode::Char('t') => return vec![Action::SetMode(ViewMode::Trending)],
            KeyCode::Char(' ') => return vec![Action::TogglePause],
            KeyCode::Char('+') | KeyCode::Char('=') => return vec![Action::Volume(vol + VOLUME_STEP)],
            KeyCode::Char('-') => return vec![Action::Volume(vol - VOLUME_STEP)],
            _ => {}
        }

        // Dispatch to the focused component
        match self.focus.current() {
            Some(ComponentId::StationGrid) => self.station_grid.handle_key(key, &self.state),
            _ => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click {
            return vec![];
        }

        let col = event.column;
        let row = event.row;

        // Helper: check if (col, row) is inside a Rect
        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let s = &self.state;

        // Overlays first: they sit on top of everything else.
        if self.category_picker.visible {
            return self.category_picker.handle_mouse(event, Rect::default(), s);
        }
        if self.help_overlay.visible {
            return if matches!(event.kind, MouseEventKind::Down(_)) {
                vec![Action::ToggleHelp]
            } else {
                vec![]
            };
        }

        let areas = self.pane_areas.clone();
        if hit(areas.header, col, row) {
            return self.header.handle_mouse(event, areas.header, s);
        }
        if hit(areas.search_bar, col, row) {
            return self.search_bar.handle_mouse(event, areas.search_bar, s);
        }
        if hit(areas.station_grid, col, row) {
            let mut actions = self.station_grid.handle_mouse(event, areas.station_grid, s);
            if self.state.input_mode == InputMode::Search {
                actions.insert(0, Action::CloseSearch);
            }
            return actions;
        }
        if hit(areas.now_playing, col, row) {
            return self.now_playing.handle_mouse(event, areas.now_playing, s);
        }
        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // Handle the action at the app level first so components see the new state
        self.apply_action(action.clone());

        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.header.on_action(&action, s));
            out.extend(self.search_bar.on_action(&action, s));
            out.extend(self.station_grid.on_action(&action, s));
            out.extend(self.category_picker.on_action(&action, s));
            out.extend(self.now_playing.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        // Dispatch any secondary actions (depth-limited to 1 level)
        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        debug!("apply_action: {:?}", action);
        match action {
            // ── Playback ──────────────────────────────────────────────────────
            Action::Play(station) => {
                info!("play: {} ({})", station.name, station.url);
                self.player.play(&station.url);
                self.state.playback.started_at = None;
                self.state.playback.paused = false;
                self.state.browser.select(station);
            }
            Action::TogglePause => {
                if self.state.browser.now_playing().is_none() {
                    self.toast.warning("nothing playing");
                } else {
                    self.player.toggle_pause();
                }
            }
            Action::Volume(v) => {
                let v = v.clamp(0.0, 1.0);
                self.state.playback.volume = v;
                self.player.set_volume(v);
            }

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
                self.sync_input_mode();
            }
            Action::FocusPrev => {
                self.focus.prev();
                self.sync_input_mode();
            }
            Action::FocusPane(id) => {
                self.focus.set(id);
                self.sync_input_mode();
            }

            // ── Filter criteria ───────────────────────────────────────────────
            Action::SetMode(mode) => self.state.browser.set_mode(mode),
            Action::OpenSearch => {
                self.focus.set(ComponentId::SearchBar);
                self.state.input_mode = InputMode::Search;
            }
            Action::CloseSearch => {
                self.focus.set(ComponentId::StationGrid);
                self.state.input_mode = InputMode::Normal;
            }
            Action::SearchChanged(q) => self.state.browser.set_search_text(q),
            Action::OpenCategories => {
                if self.state.input_mode == InputMode::Search {
                    self.search_bar.on_action(&Action::CloseSearch, &self.state);
                    self.focus.set(ComponentId::StationGrid);
                }
                self.state.input_mode = InputMode::Categories;
            }
            Action::CloseCategories => self.state.input_mode = InputMode::Normal,
            Action::SetCategory(c) => self.state.browser.set_category(c),

            // ── Favorites ─────────────────────────────────────────────────────
            Action::ToggleFavorite(station) => {
                if self.state.browser.toggle_favorite(&station) {
                    self.toast.success(format!("♥ {}", station.name));
                } else {
                    self.toast.info(format!("removed {}", station.name));
                }
            }

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleHelp => {}
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        // Truncate for toast display
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text.clone()
                        };
                        self.toast.success(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => self.should_quit = true,
        }
    }

    /// Keep the search input and `input_mode` in step with keyboard focus.
    fn sync_input_mode(&mut self) {
        let want_search = self.focus.current() == Some(ComponentId::SearchBar);
        if want_search != self.search_bar.is_active() {
            let action = if want_search {
                Action::OpenSearch
            } else {
                Action::CloseSearch
            };
            self.search_bar.on_action(&action, &self.state);
        }
        self.state.input_mode = if want_search {
            InputMode::Search
        } else {
            InputMode::Normal
        };
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        // ── Outer layout: header | search | grid | sep | now playing | keys ──
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.pane_areas = PaneAreas {
            header: outer[0],
            search_bar: outer[1],
            station_grid: outer[2],
            now_playing: outer[4],
        };

        let normal = self.state.input_mode == InputMode::Normal;

        self.header.draw(frame, outer[0], false, &self.state);
        self.search_bar.draw(
            frame,
            outer[1],
            self.focus.is_focused(ComponentId::SearchBar),
            &self.state,
        );
        self.station_grid.draw(
            frame,
            outer[2],
            normal && self.focus.is_focused(ComponentId::StationGrid),
            &self.state,
        );
        status_bar::draw_separator(frame, outer[3]);
        self.now_playing.draw(frame, outer[4], false, &self.state);
        status_bar::draw_keys_bar(
            frame,
            outer[5],
            self.state.input_mode,
            self.state.browser.mode(),
        );

        // ── Overlays (on top of everything) ───────────────────────────────────
        self.category_picker.draw(frame, area, true, &self.state);
        self.help_overlay.draw(frame, area, false, &self.state);

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }
}

/// Fetch the directory once, unless `cancel` fires first.
///
/// Failures are logged here and reported as a bare `DirectoryFailed`: the
/// view shows an empty grid, nothing else.
fn spawn_directory_fetch(
    config: DirectoryConfig,
    tx: mpsc::Sender<AppMessage>,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        let client = match DirectoryClient::new(&config) {
            Ok(c) => c,
            Err(e) => {
                error!("directory: could not build client: {}", e);
                let _ = tx.send(AppMessage::DirectoryFailed).await;
                return;
            }
        };
        let msg = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("directory: fetch cancelled");
                return;
            }
            res = client.load() => match res {
                Ok(directory) => AppMessage::DirectoryLoaded(directory),
                Err(e) => {
                    error!("directory: load from {} failed: {}", client.endpoint(), e);
                    AppMessage::DirectoryFailed
                }
            },
        };
        let _ = tx.send(msg).await;
    });
}
