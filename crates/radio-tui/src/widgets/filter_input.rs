//! FilterInput — wraps tui-input for the station search line.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_FILTER_BG, C_FILTER_FG, C_MUTED};

#[derive(Debug, PartialEq)]
pub enum FilterAction {
    Changed(String),
    Confirmed,
    Cancelled,
}

pub struct FilterInput {
    input: Input,
    active: bool,
    prompt: &'static str,
    placeholder: String,
}

impl FilterInput {
    pub fn new(prompt: &'static str, placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            prompt,
            placeholder: placeholder.into(),
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Handle a key event. Returns what happened.
    ///
    /// Esc behaviour:
    ///   - If the input has text: clear the text, emit `Changed("")`
    ///   - If the input is already empty: deactivate and emit `Cancelled`
    pub fn handle_key(&mut self, key: KeyEvent) -> FilterAction {
        match key.code {
            KeyCode::Esc => {
                if !self.input.value().is_empty() {
                    self.input = Input::default();
                    FilterAction::Changed(String::new())
                } else {
                    self.deactivate();
                    FilterAction::Cancelled
                }
            }
            KeyCode::Enter => {
                self.deactivate();
                FilterAction::Confirmed
            }
            _ => {
                self.input.handle_event(&Event::Key(key));
                FilterAction::Changed(self.input.value().to_string())
            }
        }
    }

    /// Render the input line into `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let prefix_w = self.prompt.chars().count() + 1;
        let scroll = self
            .input
            .visual_scroll((area.width as usize).saturating_sub(prefix_w + 1));
        let value = self.input.value();
        let display = if value.is_empty() {
            Span::styled(
                format!("{} {}", self.prompt, self.placeholder),
                Style::default().fg(C_MUTED),
            )
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(
                format!("{} {}", self.prompt, visible),
                Style::default().fg(C_FILTER_FG),
            )
        };

        let paragraph =
            Paragraph::new(Line::from(vec![display])).style(Style::default().bg(C_FILTER_BG));
        frame.render_widget(paragraph, area);

        if self.active && area.width > 0 {
            let cursor_x =
                area.x + (prefix_w + self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_reports_full_value() {
        let mut input = FilterInput::new("/", "search");
        input.activate();
        assert_eq!(
            input.handle_key(key(KeyCode::Char('r'))),
            FilterAction::Changed("r".into())
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Char('a'))),
            FilterAction::Changed("ra".into())
        );
        assert_eq!(input.text(), "ra");
    }

    #[test]
    fn test_esc_clears_then_cancels() {
        let mut input = FilterInput::new("/", "search");
        input.activate();
        input.handle_key(key(KeyCode::Char('x')));
        assert_eq!(
            input.handle_key(key(KeyCode::Esc)),
            FilterAction::Changed(String::new())
        );
        assert!(input.is_active());
        assert_eq!(input.handle_key(key(KeyCode::Esc)), FilterAction::Cancelled);
        assert!(!input.is_active());
    }

    #[test]
    fn test_enter_keeps_text() {
        let mut input = FilterInput::new("/", "search");
        input.activate();
        input.handle_key(key(KeyCode::Char('h')));
        assert_eq!(input.handle_key(key(KeyCode::Enter)), FilterAction::Confirmed);
        assert!(!input.is_active());
        assert_eq!(input.text(), "h");
    }
}
