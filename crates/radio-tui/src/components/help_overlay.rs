//! HelpOverlay component — centered popup with keyboard shortcut reference.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_OVERLAY_BG, C_PANEL_BORDER, C_PRIMARY, C_SECONDARY},
};

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

impl Component for HelpOverlay {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => {
                self.hide();
                vec![Action::FocusPane(ComponentId::StationGrid)]
            }
            // Consume all keys while overlay is open
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleHelp = action {
            self.toggle();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        if !self.visible {
            return;
        }

        let popup = centered_rect(64, 30, area);

        let help_lines: Vec<Line> = vec![
            Line::from(Span::styled(
                " keyboard shortcuts",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            section(" playback"),
            help_row("enter / double-click", "play selected station"),
            help_row("space", "toggle pause/play"),
            help_row("- / +", "volume down / up"),
            Line::from(""),
            section(" browsing"),
            help_row("←↑↓→  or  hjkl", "move between cards"),
            help_row("pg up / pg dn", "jump a screen of rows"),
            help_row("home / end  or  g / G", "jump first / last"),
            help_row("1 2 3  or  e f t", "explore / favorites / trending"),
            help_row("/", "search by name (Esc clears + closes)"),
            help_row("c", "pick a category"),
            Line::from(""),
            section(" stations"),
            help_row("*  or  click ♥", "toggle favorite"),
            help_row("y", "copy stream url"),
            help_row("Y", "copy logo url"),
            Line::from(""),
            section(" app"),
            help_row("tab / shift-tab", "focus next / previous pane"),
            help_row("?", "toggle this help overlay"),
            help_row("q / Ctrl+C", "quit"),
            Line::from(""),
            Line::from(Span::styled(
                " favorites are kept for this session only",
                Style::default().fg(C_MUTED).add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                " press ? or esc to close",
                Style::default().fg(C_MUTED),
            )),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(help_lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(C_PANEL_BORDER))
                        .style(Style::default().bg(C_OVERLAY_BG)),
                )
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
    ))
}

fn help_row<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{:<22}", key),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, Style::default().fg(C_SECONDARY)),
    ])
}

pub(crate) fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
