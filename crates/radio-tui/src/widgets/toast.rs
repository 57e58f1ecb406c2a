//! Toast notification system — transient status messages.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::theme::{C_TOAST_ERROR, C_TOAST_INFO, C_TOAST_SUCCESS, C_TOAST_WARNING};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    fn color(self) -> Color {
        match self {
            Severity::Info => C_TOAST_INFO,
            Severity::Success => C_TOAST_SUCCESS,
            Severity::Warning => C_TOAST_WARNING,
            Severity::Error => C_TOAST_ERROR,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Severity::Info => "·",
            Severity::Success => "✓",
            Severity::Warning => "!",
            Severity::Error => "✗",
        }
    }
}

struct Toast {
    message: String,
    severity: Severity,
    expires: Instant,
}

/// A persistent spinner toast that animates until resolved.
struct SpinnerToast {
    message: String,
    frame: usize,
}

const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub struct ToastManager {
    toasts: VecDeque<Toast>,
    spinner: Option<SpinnerToast>,
    max_visible: usize,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            spinner: None,
            max_visible: 4,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity, duration: Duration) {
        let msg = message.into();
        self.toasts.retain(|t| t.message != msg);
        self.toasts.push_back(Toast {
            message: msg,
            severity,
            expires: Instant::now() + duration,
        });
        while self.toasts.len() > self.max_visible * 2 {
            self.toasts.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Info, Duration::from_secs(3));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Success, Duration::from_secs(3));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Warning, Duration::from_secs(4));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Error, Duration::from_secs(5));
    }

    /// Start or replace the persistent spinner toast.  It animates on every
    /// `tick()` and stays until `resolve_spinner` or `dismiss_spinner`.
    pub fn spinner(&mut self, message: impl Into<String>) {
        self.spinner = Some(SpinnerToast {
            message: message.into(),
            frame: 0,
        });
    }

    /// Replace the spinner with a normal expiring toast.
    pub fn resolve_spinner(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        duration: Duration,
    ) {
        self.spinner = None;
        self.push(message, severity, duration);
    }

    pub fn dismiss_spinner(&mut self) {
        self.spinner = None;
    }

    /// Remove expired toasts and advance the spinner frame. Call each tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| t.expires > now);
        if let Some(ref mut s) = self.spinner {
            s.frame = (s.frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty() && self.spinner.is_none()
    }

    /// Messages currently queued, oldest first (spinner excluded).
    #[cfg(test)]
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.toasts.iter().map(|t| t.message.as_str())
    }

    /// Render toasts in the top-right corner of `area`, spinner first.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if self.is_empty() {
            return;
        }
        let max_width = (area.width / 2).min(60).max(30);
        let bottom = area.y + area.height;
        let mut y = area.y + 1;

        if let Some(ref s) = self.spinner {
            let icon = SPINNER_FRAMES[s.frame % SPINNER_FRAMES.len()];
            draw_line(frame, area, y, max_width, icon, &s.message, C_TOAST_INFO);
            y += 1;
        }

        for toast in self.toasts.iter().rev().take(self.max_visible) {
            if y >= bottom {
                break;
            }
            draw_line(
                frame,
                area,
                y,
                max_width,
                toast.severity.icon(),
                &toast.message,
                toast.severity.color(),
            );
            y += 1;
        }
    }
}

fn draw_line(
    frame: &mut Frame,
    area: Rect,
    y: u16,
    max_width: u16,
    icon: &str,
    message: &str,
    color: Color,
) {
    if y >= area.y + area.height {
        return;
    }
    let msg_len = message.chars().count() as u16;
    let w = (msg_len + 4).min(max_width).min(area.width);
    let x = area.x + area.width.saturating_sub(w + 1);
    let toast_area = Rect {
        x,
        y,
        width: w,
        height: 1,
    };
    frame.render_widget(Clear, toast_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {} {} ", icon, message),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))),
        toast_area,
    );
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}
