//! Header component — title, view-mode tabs and load badge.
//!
//! Row 1: app title | Explore / Favorites / Trending tabs | LOADING or counts.
//! Row 2: separator.
//!
//! Not focusable; clicking a tab switches the view mode.

use ratatui::crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use radio_core::state::ViewMode;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{
        C_ACCENT, C_BADGE_PENDING, C_MUTED, C_NUMBER_HINT, C_PRIMARY, C_SECONDARY,
        C_SELECTION_BG,
    },
    widgets::status_bar::draw_separator,
};

const TITLE: &str = " ◉ radiogrid ";

pub struct Header {
    /// Column span `[start, end)` of each tab from the last draw, for clicks.
    tab_hits: Vec<(u16, u16, ViewMode)>,
}

impl Header {
    pub fn new() -> Self {
        Self {
            tab_hits: Vec::new(),
        }
    }

    fn tab_at(&self, col: u16) -> Option<ViewMode> {
        self.tab_hits
            .iter()
            .find(|(start, end, _)| col >= *start && col < *end)
            .map(|(_, _, mode)| *mode)
    }
}

impl Component for Header {
    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        if event.row != area.y || !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return vec![];
        }
        match self.tab_at(event.column) {
            Some(mode) if mode != state.browser.mode() => vec![Action::SetMode(mode)],
            _ => vec![],
        }
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if area.height == 0 {
            return;
        }
        let row1 = Rect { height: 1, ..area };
        frame.render_widget(Clear, row1);

        let mut spans = vec![Span::styled(
            TITLE,
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        )];
        let mut x = area.x + TITLE.width() as u16;

        self.tab_hits.clear();
        for (i, mode) in ViewMode::ALL.iter().enumerate() {
            let active = *mode == state.browser.mode();
            let hint = format!(" {}", i + 1);
            let label = format!(" {} ", mode.label());
            let start = x;
            x += (hint.width() + label.width()) as u16;
            self.tab_hits.push((start, x, *mode));

            spans.push(Span::styled(hint, Style::default().fg(C_NUMBER_HINT)));
            spans.push(if active {
                Span::styled(
                    label,
                    Style::default()
                        .fg(C_PRIMARY)
                        .bg(C_SELECTION_BG)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(label, Style::default().fg(C_SECONDARY))
            });
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), row1);
        frame.render_widget(
            Paragraph::new(status_line(state)).right_aligned(),
            row1,
        );

        if area.height > 1 {
            draw_separator(
                frame,
                Rect {
                    y: area.y + 1,
                    height: 1,
                    ..area
                },
            );
        }
    }
}

/// Right-hand status: LOADING until the fetch settles, then counts.
fn status_line(state: &AppState) -> Line<'static> {
    if state.is_loading() {
        return Line::from(Span::styled(
            " LOADING ",
            Style::default()
                .fg(C_BADGE_PENDING)
                .add_modifier(Modifier::BOLD),
        ));
    }
    let browser = &state.browser;
    let mut text = format!(
        "{} stations · {} favorites",
        browser.all_stations().len(),
        browser.favorites().len()
    );
    if let Some(at) = state.fetched_at {
        text.push_str(&format!(" · {}", at.format("%H:%M")));
    }
    text.push(' ');
    Line::from(Span::styled(text, Style::default().fg(C_MUTED)))
}
