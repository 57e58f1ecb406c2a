//! PaneChrome — standardized bordered pane with focus styling and badges.

use crate::theme::{style_focused_border, style_unfocused_border, C_MUTED, C_NUMBER_HINT, C_PRIMARY};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

/// A badge shown in the top-right of the pane header (e.g. "LOADING", "42/1200").
pub struct Badge {
    pub text: String,
    pub color: Color,
}

/// Renders a bordered pane with consistent focus styling and optional badge.
///
/// `hint` is shown before the title as `[hint]`, usually the key that opens
/// or focuses the pane.
pub fn pane_chrome<'a>(
    title: &'a str,
    hint: Option<&'a str>,
    focused: bool,
    badge: Option<Badge>,
) -> Block<'a> {
    let border_style = if focused {
        style_focused_border()
    } else {
        style_unfocused_border()
    };

    let title_style = if focused {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    };

    let mut title_spans = Vec::new();
    if let Some(key) = hint {
        title_spans.push(Span::styled(
            format!("[{}] ", key),
            Style::default().fg(C_NUMBER_HINT),
        ));
    }
    title_spans.push(Span::styled(title, title_style));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(title_spans));

    match badge {
        Some(b) => block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        ),
        None => block,
    }
}
