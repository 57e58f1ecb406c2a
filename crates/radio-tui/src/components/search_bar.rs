//! SearchBar component — search input on the left, category chip on the right.

use ratatui::crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{C_FILTER_BG, C_MUTED, C_TAG},
    widgets::filter_input::{FilterAction, FilterInput},
};

pub const ALL_CATEGORIES: &str = "All Categories";

pub struct SearchBar {
    input: FilterInput,
    /// Column span of the category chip from the last draw.
    chip: (u16, u16),
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            input: FilterInput::new("/", "search stations by name…"),
            chip: (0, 0),
        }
    }

    pub fn is_active(&self) -> bool {
        self.input.is_active()
    }
}

fn chip_label(state: &AppState) -> String {
    let category = state.browser.selected_category();
    let name = if category.is_empty() {
        ALL_CATEGORIES
    } else {
        category
    };
    format!(" [c] {} ▾ ", name)
}

impl Component for SearchBar {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.input.is_active() {
            return vec![];
        }
        match self.input.handle_key(key) {
            FilterAction::Changed(q) => vec![Action::SearchChanged(q)],
            FilterAction::Confirmed | FilterAction::Cancelled => vec![Action::CloseSearch],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        if !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) || event.row != area.y {
            return vec![];
        }
        let (start, end) = self.chip;
        if event.column >= start && event.column < end {
            vec![Action::OpenCategories]
        } else if !self.input.is_active() {
            vec![Action::OpenSearch]
        } else {
            vec![]
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenSearch => self.input.activate(),
            Action::CloseSearch => self.input.deactivate(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let label = chip_label(state);
        let chip_w = (label.width() as u16).min(area.width / 2);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(chip_w)])
            .split(area);

        self.input.draw(frame, cols[0]);
        if !self.input.text().is_empty() {
            let found = format!("{} found ", state.browser.filtered_view().len());
            frame.render_widget(
                Paragraph::new(Span::styled(
                    found,
                    Style::default().fg(C_MUTED).bg(C_FILTER_BG),
                ))
                .right_aligned(),
                cols[0],
            );
        }
        self.chip = (cols[1].x, cols[1].x + cols[1].width);

        let mut chip_style = Style::default().fg(C_TAG).bg(C_FILTER_BG);
        if focused || !state.browser.selected_category().is_empty() {
            chip_style = chip_style.add_modifier(Modifier::BOLD);
        }
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(label, chip_style))),
            cols[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_core::config::Config;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keys_ignored_until_opened() {
        let state = AppState::new(&Config::default());
        let mut bar = SearchBar::new();
        assert!(bar.handle_key(key(KeyCode::Char('a')), &state).is_empty());

        bar.on_action(&Action::OpenSearch, &state);
        let actions = bar.handle_key(key(KeyCode::Char('a')), &state);
        assert!(matches!(actions.as_slice(), [Action::SearchChanged(q)] if q == "a"));

        let actions = bar.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(actions.as_slice(), [Action::CloseSearch]));
        bar.on_action(&Action::CloseSearch, &state);
        assert!(!bar.is_active());
    }

    #[test]
    fn test_chip_names_selected_category() {
        let mut state = AppState::new(&Config::default());
        assert!(chip_label(&state).contains(ALL_CATEGORIES));
        state.browser.set_category("Hindi");
        assert!(chip_label(&state).contains("Hindi"));
    }
}
