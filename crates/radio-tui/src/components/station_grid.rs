//! StationGrid component — the main pane: one card per station in the
//! current view.
//!
//! Each card shows the name, a heart (favorite) and a play marker on the
//! first line and the genre tags on the second.  Selection follows the
//! station id, so narrowing the view keeps the same card selected when it
//! is still present.

use std::time::Instant;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use radio_core::station::Station;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{
        style_focused_border, style_muted, style_playing, style_secondary, style_selected,
        style_selected_focused, style_unfocused_border, C_FAVORITE, C_MUTED, C_PLAYING,
        C_SECONDARY, C_SELECTION_BG, C_TAG,
    },
    widgets::{
        grid::GridCursor,
        pane_chrome::{pane_chrome, Badge},
    },
};

const CARD_MIN_W: u16 = 26;
const CARD_H: u16 = 4;
const DOUBLE_CLICK_MS: u128 = 400;

pub struct StationGrid {
    cursor: GridCursor,
    selected_id: Option<String>,
    visible_rows: usize,
    /// Card rects from the last draw with the view index each one shows.
    card_areas: Vec<(Rect, usize)>,
    last_click: Option<(usize, Instant)>,
}

impl StationGrid {
    pub fn new() -> Self {
        Self {
            cursor: GridCursor::new(),
            selected_id: None,
            visible_rows: 1,
            card_areas: Vec::new(),
            last_click: None,
        }
    }

    /// Re-anchor the cursor on the current view, following the selected id.
    fn resync(&mut self, view: &[Station]) {
        self.cursor.set_len(view.len());
        if let Some(id) = self.selected_id.as_deref() {
            let at_cursor = self
                .cursor
                .selected()
                .and_then(|i| view.get(i))
                .map(|s| s.id.as_str());
            if at_cursor != Some(id) {
                match view.iter().position(|s| s.id == id) {
                    Some(pos) => self.cursor.select(pos),
                    None => self.cursor.select_first(),
                }
            }
        }
        self.remember(view);
    }

    fn remember(&mut self, view: &[Station]) {
        self.selected_id = self
            .cursor
            .selected()
            .and_then(|i| view.get(i))
            .map(|s| s.id.clone());
    }

    pub fn selected_station<'a>(&self, state: &'a AppState) -> Option<&'a Station> {
        let view = state.browser.filtered_view();
        self.cursor.selected().and_then(|i| view.get(i))
    }

    fn card_at(&self, col: u16, row: u16) -> Option<(Rect, usize)> {
        self.card_areas
            .iter()
            .copied()
            .find(|(r, _)| col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height)
    }

    fn draw_card(&self, frame: &mut Frame, area: Rect, station: &Station, selected: bool, focused: bool, state: &AppState) {
        let playing = state.browser.is_now_playing(&station.id);
        let favorite = state.browser.is_favorite(&station.id);

        let border_style = if selected && focused {
            style_focused_border()
        } else if playing {
            style_playing()
        } else if selected {
            style_secondary()
        } else {
            style_unfocused_border()
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        if selected {
            block = block.style(Style::default().bg(C_SELECTION_BG));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width < 4 || inner.height == 0 {
            return;
        }

        let width = inner.width as usize;
        let mut first = Vec::new();
        let mut used = 2; // heart column plus its gap
        if playing {
            first.push(Span::styled("▶ ", style_playing()));
            used += 2;
        }
        let name_style = if playing {
            Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD)
        } else if selected && focused {
            style_selected_focused()
        } else if selected {
            style_selected()
        } else {
            Style::default().fg(C_SECONDARY)
        };
        first.push(Span::styled(
            truncate(&station.name, width.saturating_sub(used)),
            name_style,
        ));
        frame.render_widget(Paragraph::new(Line::from(first)), inner);

        let heart = if favorite {
            Span::styled("♥", Style::default().fg(C_FAVORITE))
        } else {
            Span::styled("♡", style_muted())
        };
        frame.render_widget(
            Paragraph::new(Line::from(heart)).right_aligned(),
            Rect { height: 1, ..inner },
        );

        if inner.height > 1 {
            let genre = station.genre_label();
            let style = if station.tags.trim().is_empty() {
                Style::default().fg(C_MUTED).add_modifier(Modifier::ITALIC)
            } else {
                Style::default().fg(C_TAG)
            };
            frame.render_widget(
                Paragraph::new(Span::styled(truncate(genre, width), style)),
                Rect {
                    y: inner.y + 1,
                    height: 1,
                    ..inner
                },
            );
        }
    }
}

/// Cut `text` to at most `max` display columns, ending in `…` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl Component for StationGrid {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let view = state.browser.filtered_view();
        self.resync(view);

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.cursor.select_left(),
            KeyCode::Right | KeyCode::Char('l') => self.cursor.select_right(),
            KeyCode::Up | KeyCode::Char('k') => self.cursor.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.select_down(1),
            KeyCode::PageUp => self.cursor.select_up(self.visible_rows.max(1)),
            KeyCode::PageDown => self.cursor.select_down(self.visible_rows.max(1)),
            KeyCode::Home | KeyCode::Char('g') => self.cursor.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.cursor.select_last(),

            KeyCode::Enter => {
                if let Some(st) = self.selected_station(state) {
                    return vec![Action::Play(st.clone())];
                }
            }
            KeyCode::Char('*') => {
                if let Some(st) = self.selected_station(state) {
                    return vec![Action::ToggleFavorite(st.clone())];
                }
            }
            KeyCode::Char('y') => {
                if let Some(st) = self.selected_station(state) {
                    return vec![Action::CopyToClipboard(st.url.clone())];
                }
            }
            KeyCode::Char('Y') => {
                if let Some(logo) = self.selected_station(state).and_then(|st| st.favicon.clone()) {
                    return vec![Action::CopyToClipboard(logo)];
                }
            }
            _ => {}
        }
        self.remember(view);
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let view = state.browser.filtered_view();
        self.resync(view);

        match event.kind {
            MouseEventKind::ScrollUp => self.cursor.select_up(1),
            MouseEventKind::ScrollDown => self.cursor.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let Some((card, idx)) = self.card_at(event.column, event.row) else {
                    return vec![];
                };
                let Some(station) = view.get(idx) else {
                    return vec![];
                };
                self.cursor.select(idx);
                self.remember(view);

                let heart_col = card.x + card.width.saturating_sub(2);
                if event.row == card.y + 1 && event.column + 1 >= heart_col && event.column <= heart_col {
                    self.last_click = None;
                    return vec![Action::ToggleFavorite(station.clone())];
                }

                let now = Instant::now();
                let is_double = self
                    .last_click
                    .map(|(i, t)| i == idx && t.elapsed().as_millis() < DOUBLE_CLICK_MS)
                    .unwrap_or(false);
                if is_double {
                    self.last_click = None;
                    return vec![Action::Play(station.clone())];
                }
                self.last_click = Some((idx, now));
                return vec![];
            }
            _ => {}
        }
        self.remember(view);
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        match action {
            Action::SetMode(_) | Action::SetCategory(_) => {
                // A new source set starts from the top.
                self.selected_id = None;
                self.cursor.select_first();
                self.resync(state.browser.filtered_view());
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let view = state.browser.filtered_view();
        self.resync(view);

        let title = state.browser.mode().label();
        let badge = (!state.is_loading()).then(|| Badge {
            text: format!("{} shown", view.len()),
            color: C_SECONDARY,
        });
        let block = pane_chrome(title, Some("1-3"), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.card_areas.clear();

        if view.is_empty() {
            let msg = if state.is_loading() {
                "  loading stations…"
            } else {
                "  no stations found"
            };
            frame.render_widget(Paragraph::new(Span::styled(msg, style_muted())), inner);
            return;
        }

        let columns = (inner.width / CARD_MIN_W).max(1);
        let card_w = inner.width / columns;
        self.cursor.set_columns(columns as usize);
        self.visible_rows = ((inner.height / CARD_H) as usize).max(1);
        self.cursor.ensure_visible(self.visible_rows);

        let selected = self.cursor.selected();
        let range = self.cursor.visible_range(self.visible_rows);
        let first = range.start;
        for idx in range {
            let offset = (idx - first) as u16;
            let col = offset % columns;
            let row = offset / columns;
            let card = Rect {
                x: inner.x + col * card_w,
                y: inner.y + row * CARD_H,
                width: card_w,
                height: CARD_H.min(inner.height.saturating_sub(row * CARD_H)),
            };
            if card.height < 3 {
                break;
            }
            self.draw_card(frame, card, &view[idx], selected == Some(idx), focused, state);
            self.card_areas.push((card, idx));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_core::config::Config;
    use ratatui::crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn station(id: &str, name: &str, tags: &str) -> Station {
        Station {
            id: id.to_string(),
            name: name.to_string(),
            tags: tags.to_string(),
            url: format!("http://stream.example/{}", id),
            ..Station::default()
        }
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::new(&Config::default());
        state.browser.load(vec![
            station("a", "Alpha Radio", "pop"),
            station("b", "Beta FM", "jazz"),
            station("c", "Gamma Radio", "pop,rock"),
            station("d", "Delta", ""),
        ]);
        state.load_status = crate::app_state::LoadStatus::Loaded;
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn render(grid: &mut StationGrid, state: &AppState, w: u16, h: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
        terminal
            .draw(|f| grid.draw(f, f.area(), true, state))
            .unwrap();
        terminal
    }

    #[test]
    fn test_truncate_respects_display_width() {
        assert_eq!(truncate("Radio", 10), "Radio");
        assert_eq!(truncate("Radio City", 6), "Radio…");
        assert_eq!(truncate("रेडियो सिटी", 0), "");
        assert!(truncate("ラジオ日本語放送", 7).width() <= 7);
    }

    #[test]
    fn test_enter_plays_selected_card() {
        let state = loaded_state();
        let mut grid = StationGrid::new();
        grid.handle_key(key(KeyCode::Right), &state);
        let actions = grid.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(actions.as_slice(), [Action::Play(s)] if s.id == "b"));

        let actions = grid.handle_key(key(KeyCode::Char('y')), &state);
        assert!(
            matches!(actions.as_slice(), [Action::CopyToClipboard(u)] if u == "http://stream.example/b")
        );
    }

    #[test]
    fn test_shift_y_copies_logo_url_when_present() {
        let mut state = AppState::new(&Config::default());
        let mut with_logo = station("a", "Alpha Radio", "pop");
        with_logo.favicon = Some("http://img.example/a.png".to_string());
        state.browser.load(vec![with_logo, station("b", "Beta FM", "jazz")]);
        let mut grid = StationGrid::new();

        let actions = grid.handle_key(key(KeyCode::Char('Y')), &state);
        assert!(
            matches!(actions.as_slice(), [Action::CopyToClipboard(u)] if u == "http://img.example/a.png")
        );

        grid.handle_key(key(KeyCode::Right), &state);
        assert!(grid.handle_key(key(KeyCode::Char('Y')), &state).is_empty());
    }

    #[test]
    fn test_selection_follows_station_when_view_narrows() {
        let mut state = loaded_state();
        let mut grid = StationGrid::new();
        grid.handle_key(key(KeyCode::End), &state); // Delta
        grid.handle_key(key(KeyCode::Left), &state); // Gamma Radio
        assert_eq!(grid.selected_station(&state).map(|s| s.id.as_str()), Some("c"));

        state.browser.set_search_text("radio");
        grid.resync(state.browser.filtered_view());
        assert_eq!(grid.selected_station(&state).map(|s| s.id.as_str()), Some("c"));

        state.browser.set_search_text("beta");
        grid.resync(state.browser.filtered_view());
        assert_eq!(grid.selected_station(&state).map(|s| s.id.as_str()), Some("b"));
    }

    #[test]
    fn test_empty_view_says_no_stations_found() {
        let mut state = loaded_state();
        state.browser.set_search_text("zzz");
        let mut grid = StationGrid::new();
        let terminal = render(&mut grid, &state, 60, 10);
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("no stations found"));
        assert!(grid.handle_key(key(KeyCode::Enter), &state).is_empty());
    }

    #[test]
    fn test_click_selects_double_click_plays_heart_toggles() {
        let state = loaded_state();
        let mut grid = StationGrid::new();
        render(&mut grid, &state, 60, 12); // 2 columns of 29, 2 rows
        assert_eq!(grid.card_areas.len(), 4);

        let (card, idx) = grid.card_areas[1];
        assert_eq!(idx, 1);
        let body = (card.x + 3, card.y + 2);
        assert!(grid.handle_mouse(click(body.0, body.1), card, &state).is_empty());
        assert_eq!(grid.selected_station(&state).map(|s| s.id.as_str()), Some("b"));

        let actions = grid.handle_mouse(click(body.0, body.1), card, &state);
        assert!(matches!(actions.as_slice(), [Action::Play(s)] if s.id == "b"));

        let heart = (card.x + card.width - 2, card.y + 1);
        let actions = grid.handle_mouse(click(heart.0, heart.1), card, &state);
        assert!(matches!(actions.as_slice(), [Action::ToggleFavorite(s)] if s.id == "b"));
    }

    #[test]
    fn test_mode_switch_resets_to_first_card() {
        let mut state = loaded_state();
        let mut grid = StationGrid::new();
        grid.handle_key(key(KeyCode::End), &state);
        state.browser.set_mode(radio_core::state::ViewMode::Explore);
        grid.on_action(&Action::SetMode(radio_core::state::ViewMode::Explore), &state);
        assert_eq!(grid.selected_station(&state).map(|s| s.id.as_str()), Some("a"));
    }
}
