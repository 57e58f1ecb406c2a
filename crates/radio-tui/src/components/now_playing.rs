//! NowPlaying component — one-line transport bar above the keys bar.
//!
//! Shows the selected station with its genre and stream details, the
//! pause state with elapsed time, and a volume meter.  Clicking the meter
//! sets the volume; clicking the play marker toggles pause.

use chrono::Local;
use ratatui::crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use radio_core::station::Station;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::station_grid::truncate,
    theme::{style_muted, style_playing, C_BADGE_PENDING, C_FAVORITE, C_MUTED, C_PRIMARY, C_SECONDARY, C_TAG},
    widgets::progress_bar::{fmt_elapsed, smooth_bar},
};

const VOL_BAR_W: u16 = 10;

pub struct NowPlaying {
    /// Column span of the volume bar cells from the last draw.
    vol_bar: (u16, u16),
    /// Column span of the play/pause marker.
    marker: (u16, u16),
}

impl NowPlaying {
    pub fn new() -> Self {
        Self {
            vol_bar: (0, 0),
            marker: (0, 0),
        }
    }
}

/// Codec, bitrate and country, whichever the directory supplied.
fn stream_details(station: &Station) -> String {
    let mut parts = Vec::new();
    if !station.codec.is_empty() {
        parts.push(station.codec.to_lowercase());
    }
    if station.bitrate > 0 {
        parts.push(format!("{}k", station.bitrate));
    }
    if !station.country.is_empty() {
        parts.push(station.country.clone());
    }
    parts.join(" ")
}

impl Component for NowPlaying {
    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        if event.row != area.y {
            return vec![];
        }
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (start, end) = self.vol_bar;
                if event.column >= start && event.column < end && end > start {
                    let cells = (end - start) as f32;
                    let v = (event.column - start + 1) as f32 / cells;
                    return vec![Action::Volume(v)];
                }
                let (start, end) = self.marker;
                if event.column >= start && event.column < end && state.browser.now_playing().is_some() {
                    return vec![Action::TogglePause];
                }
                vec![]
            }
            MouseEventKind::ScrollUp => vec![Action::Volume(state.playback.volume + 0.05)],
            MouseEventKind::ScrollDown => vec![Action::Volume(state.playback.volume - 0.05)],
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
        let row = Rect { height: 1, ..area };

        // Right side: volume meter.
        let pct = (state.playback.volume.clamp(0.0, 1.0) * 100.0).round() as u32;
        let vol_label = format!(" vol {:>3}% ", pct);
        let right_w = vol_label.width() as u16 + VOL_BAR_W + 2;
        let right = Line::from(vec![
            Span::styled(vol_label, Style::default().fg(C_SECONDARY)),
            Span::styled("▕", style_muted()),
            Span::styled(
                smooth_bar(state.playback.volume, VOL_BAR_W as usize),
                Style::default().fg(C_TAG),
            ),
            Span::styled("▏", style_muted()),
        ]);
        frame.render_widget(Paragraph::new(right).right_aligned(), row);
        let right_start = (row.x + row.width).saturating_sub(right_w);
        self.vol_bar = (right_start + right_w - VOL_BAR_W - 1, right_start + right_w - 1);

        let left_w = right_start.saturating_sub(row.x) as usize;
        let Some(station) = state.browser.now_playing() else {
            self.marker = (0, 0);
            let hint = " nothing playing · Enter or double-click a card to listen";
            frame.render_widget(
                Paragraph::new(Span::styled(truncate(hint, left_w), style_muted())),
                row,
            );
            return;
        };

        let (marker, marker_style) = if state.playback.paused {
            (" ⏸ ", Style::default().fg(C_BADGE_PENDING).add_modifier(Modifier::BOLD))
        } else {
            (" ▶ ", style_playing().add_modifier(Modifier::BOLD))
        };
        self.marker = (row.x, row.x + marker.width() as u16);

        let mut spans = vec![Span::styled(marker, marker_style)];
        let mut used = marker.width();

        if state.browser.is_favorite(&station.id) {
            spans.push(Span::styled("♥ ", Style::default().fg(C_FAVORITE)));
            used += 2;
        }

        let mut tail = format!(" · {}", station.genre_label());
        let details = stream_details(station);
        if !details.is_empty() {
            tail.push_str(&format!(" · {}", details));
        }
        match state.playback.started_at {
            Some(_) if state.playback.paused => tail.push_str(" · paused"),
            Some(at) => {
                let secs = (Local::now() - at).num_seconds();
                tail.push_str(&format!(" · {}", fmt_elapsed(secs)));
            }
            None => tail.push_str(" · connecting…"),
        }

        let budget = left_w.saturating_sub(used);
        let name_w = station.name.width().min(budget);
        spans.push(Span::styled(
            truncate(&station.name, name_w),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            truncate(&tail, budget.saturating_sub(name_w)),
            Style::default().fg(C_MUTED),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_core::config::Config;
    use ratatui::crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(bar: &mut NowPlaying, state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        terminal
            .draw(|f| bar.draw(f, f.area(), false, state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn click(column: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_shows_selected_station_and_details() {
        let mut state = AppState::new(&Config::default());
        let mut bar = NowPlaying::new();
        assert!(render(&mut bar, &state).contains("nothing playing"));

        state.browser.select(Station {
            id: "x".into(),
            name: "Radio City".into(),
            tags: "".into(),
            url: "http://x".into(),
            codec: "MP3".into(),
            bitrate: 128,
            ..Station::default()
        });
        let text = render(&mut bar, &state);
        assert!(text.contains("Radio City"));
        assert!(text.contains("Unknown Genre"));
        assert!(text.contains("mp3 128k"));
        assert!(text.contains("connecting"));
    }

    #[test]
    fn test_clicking_volume_bar_sets_level() {
        let mut state = AppState::new(&Config::default());
        state.playback.volume = 0.2;
        let mut bar = NowPlaying::new();
        render(&mut bar, &state);
        let area = Rect::new(0, 0, 100, 1);

        let (start, end) = bar.vol_bar;
        assert_eq!(end - start, VOL_BAR_W);
        let actions = bar.handle_mouse(click(end - 1), area, &state);
        assert!(matches!(actions.as_slice(), [Action::Volume(v)] if (*v - 1.0).abs() < 1e-6));

        // No station yet: the marker does nothing.
        assert!(bar.handle_mouse(click(1), area, &state).is_empty());
    }
}
