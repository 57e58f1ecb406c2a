//! Status bar — bottom line with input mode, view mode, and keybindings.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use radio_core::state::ViewMode;

use crate::theme::{C_MODE_NORMAL, C_MODE_PICKER, C_MODE_SEARCH, C_MUTED, C_SEPARATOR};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    Categories,
}

impl InputMode {
    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Search => C_MODE_SEARCH,
            Self::Categories => C_MODE_PICKER,
        }
    }

    fn keys(self) -> &'static str {
        match self {
            Self::Normal => {
                " ←↑↓→/hjkl select  Enter play  Space pause  +/- vol  * favorite  e/f/t or 1-3 view  / search  c category  y copy url  ? help  q quit"
            }
            Self::Search => " type to search  Enter keep  Esc clear+close  Tab grid",
            Self::Categories => " type to narrow  ↑↓ move  Enter apply  Esc clear/close",
        }
    }
}

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
///
/// In normal mode the label is the active view (EXPLORE / FAVORITES /
/// TRENDING); otherwise it names the input being edited.
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, input: InputMode, view: ViewMode) {
    let label = match input {
        InputMode::Normal => view.label().to_uppercase(),
        InputMode::Search => "SEARCH".to_string(),
        InputMode::Categories => "CATEGORY".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(input.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(input.keys(), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
