//! CategoryPicker component — popup list of "All Categories" plus the
//! first tags seen in the directory.
//!
//! Typing narrows the list; Enter applies the highlighted entry.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::{help_overlay::centered_rect, search_bar::ALL_CATEGORIES},
    theme::{
        style_focused_border, style_muted, style_selected_focused, C_FILTER_FG, C_OVERLAY_BG,
        C_SECONDARY, C_TAG,
    },
    widgets::scrollable_list::ScrollableList,
};

const POPUP_H: u16 = 18;

pub struct CategoryPicker {
    pub visible: bool,
    /// Entry 0 is always "All Categories" (empty value).
    list: ScrollableList<String>,
    /// Rect of the list rows from the last draw.
    rows_area: Rect,
    popup: Rect,
}

impl CategoryPicker {
    pub fn new() -> Self {
        Self {
            visible: false,
            list: ScrollableList::new(|c: &String, q: &str| {
                c.to_lowercase().contains(&q.to_lowercase())
            }),
            rows_area: Rect::default(),
            popup: Rect::default(),
        }
    }

    fn open(&mut self, state: &AppState) {
        let mut items = Vec::with_capacity(state.browser.categories().len() + 1);
        items.push(String::new());
        items.extend(state.browser.categories().iter().cloned());
        self.list.set_items(items);
        self.list.set_filter("");
        self.list.select_first();
        let current = state.browser.selected_category();
        if let Some(pos) = self.list.items.iter().position(|c| c == current) {
            self.list.set_selected_by_original(pos);
        }
        self.visible = true;
    }

    fn apply_selected(&self) -> Vec<Action> {
        match self.list.selected_item() {
            Some(c) => vec![Action::SetCategory(c.clone()), Action::CloseCategories],
            None => vec![],
        }
    }

    fn narrow(&mut self, query: String) {
        self.list.set_filter(&query);
    }
}

fn label(category: &str) -> &str {
    if category.is_empty() {
        ALL_CATEGORIES
    } else {
        category
    }
}

impl Component for CategoryPicker {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Esc => {
                if self.list.filter.is_empty() {
                    return vec![Action::CloseCategories];
                }
                self.narrow(String::new());
            }
            KeyCode::Enter => return self.apply_selected(),
            KeyCode::Up => self.list.select_up(1),
            KeyCode::Down => self.list.select_down(1),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home => self.list.select_first(),
            KeyCode::End => self.list.select_last(),
            KeyCode::Backspace => {
                let mut q = self.list.filter.clone();
                q.pop();
                self.narrow(q);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut q = self.list.filter.clone();
                q.push(c);
                self.narrow(q);
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if !self.visible {
            return vec![];
        }
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let p = self.popup;
                let inside = event.column >= p.x
                    && event.column < p.x + p.width
                    && event.row >= p.y
                    && event.row < p.y + p.height;
                if !inside {
                    return vec![Action::CloseCategories];
                }
                let r = self.rows_area;
                if event.row >= r.y
                    && event.row < r.y + r.height
                    && self.list.handle_click((event.row - r.y) as usize)
                {
                    return self.apply_selected();
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenCategories => self.open(state),
            Action::CloseCategories => self.visible = false,
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if !self.visible {
            return;
        }
        let popup = centered_rect(40, POPUP_H.min(area.height), area);
        self.popup = popup;
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style_focused_border())
            .title(Span::styled(
                format!(" category · {} ", self.list.len()),
                Style::default().fg(C_TAG).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(C_OVERLAY_BG));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        if inner.height < 2 {
            return;
        }

        let prompt = if self.list.filter.is_empty() {
            Line::from(Span::styled(" type to narrow…", style_muted()))
        } else {
            Line::from(vec![
                Span::styled(" › ", Style::default().fg(C_FILTER_FG)),
                Span::styled(self.list.filter.as_str(), Style::default().fg(C_FILTER_FG)),
            ])
        };
        frame.render_widget(Paragraph::new(prompt), Rect { height: 1, ..inner });

        let rows = Rect {
            y: inner.y + 1,
            height: inner.height - 1,
            ..inner
        };
        self.rows_area = rows;
        let height = rows.height as usize;
        self.list.ensure_visible(height);

        if self.list.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no matching category", style_muted())),
                rows,
            );
            return;
        }

        let current = state.browser.selected_category();
        let selected_pos = self.list.selected;
        let scroll = self.list.scroll_offset;
        let lines: Vec<Line> = self
            .list
            .visible_items(height)
            .into_iter()
            .enumerate()
            .map(|(i, (_, cat))| {
                let marker = if cat == current { "● " } else { "  " };
                let text = format!(" {}{}", marker, label(cat));
                if scroll + i == selected_pos {
                    Line::from(Span::styled(text, style_selected_focused()))
                } else {
                    Line::from(Span::styled(text, Style::default().fg(C_SECONDARY)))
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_core::config::Config;
    use radio_core::station::Station;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        let st = |id: &str, tags: &str| Station {
            id: id.to_string(),
            name: id.to_string(),
            tags: tags.to_string(),
            url: format!("http://{}", id),
            ..Station::default()
        };
        let mut state = AppState::new(&Config::default());
        state.browser.load(vec![
            st("a", "Hindi,Pop"),
            st("b", "Hindi"),
            st("c", "Jazz"),
        ]);
        state
    }

    #[test]
    fn test_enter_applies_highlighted_category() {
        let state = state();
        let mut picker = CategoryPicker::new();
        picker.on_action(&Action::OpenCategories, &state);
        assert!(picker.visible);
        assert_eq!(picker.list.selected_item().map(String::as_str), Some(""));

        picker.handle_key(key(KeyCode::Down), &state);
        let actions = picker.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(
            actions.as_slice(),
            [Action::SetCategory(c), Action::CloseCategories] if c == "Hindi"
        ));
    }

    #[test]
    fn test_typing_narrows_and_esc_clears_then_closes() {
        let state = state();
        let mut picker = CategoryPicker::new();
        picker.on_action(&Action::OpenCategories, &state);
        picker.handle_key(key(KeyCode::Char('j')), &state);
        picker.handle_key(key(KeyCode::Char('a')), &state);
        assert_eq!(picker.list.len(), 1);
        let actions = picker.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(actions.as_slice(), [Action::SetCategory(c), _] if c == "Jazz"));

        assert!(picker.handle_key(key(KeyCode::Esc), &state).is_empty());
        assert_eq!(picker.list.len(), 4);
        let actions = picker.handle_key(key(KeyCode::Esc), &state);
        assert!(matches!(actions.as_slice(), [Action::CloseCategories]));
    }

    #[test]
    fn test_reopening_highlights_current_category() {
        let mut state = state();
        state.browser.set_category("Jazz");
        let mut picker = CategoryPicker::new();
        picker.on_action(&Action::OpenCategories, &state);
        assert_eq!(picker.list.selected_item().map(String::as_str), Some("Jazz"));
    }
}
