//! Transient status toasts, plus a single animated spinner for the
//! in-flight recommendation request.

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

const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const MAX_VISIBLE: usize = 4;

pub struct ToastManager {
    toasts: VecDeque<Toast>,
    /// Message and animation frame of the request spinner, if one is up.
    spinner: Option<(String, usize)>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            spinner: None,
        }
    }

    fn push(&mut self, message: String, severity: Severity, duration: Duration) {
        // A repeated message replaces its older copy instead of stacking.
        self.toasts.retain(|t| t.message != message);
        self.toasts.push_back(Toast {
            message,
            severity,
            expires: Instant::now() + duration,
        });
        while self.toasts.len() > MAX_VISIBLE * 2 {
            self.toasts.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message.into(), Severity::Info, Duration::from_secs(3));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message.into(), Severity::Success, Duration::from_secs(3));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message.into(), Severity::Error, Duration::from_secs(5));
    }

    /// Start (or replace) the request spinner. It animates on every `tick()`
    /// and stays up until `resolve_spinner` swaps it out.
    pub fn spinner(&mut self, message: impl Into<String>) {
        self.spinner = Some((message.into(), 0));
    }

    /// Swap the spinner for a normal expiring toast describing the outcome.
    pub fn resolve_spinner(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        duration: Duration,
    ) {
        self.spinner = None;
        self.push(message.into(), severity, duration);
    }

    /// Drop expired toasts and advance the spinner animation.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| t.expires > now);
        if let Some((_, frame)) = &mut self.spinner {
            *frame = (*frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Render into the top-right corner: spinner first, then newest toasts.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let max_width = (area.width / 2).min(60).max(30);

        let mut rows: Vec<(String, Color)> = Vec::new();
        if let Some((message, spin)) = &self.spinner {
            rows.push((
                format!(" {} {} ", SPINNER_FRAMES[*spin], message),
                C_TOAST_INFO,
            ));
        }
        for toast in self.toasts.iter().rev().take(MAX_VISIBLE) {
            rows.push((
                format!(" {} {} ", toast.severity.icon(), toast.message),
                toast.severity.color(),
            ));
        }

        for (i, (text, color)) in rows.iter().enumerate() {
            let y = area.y + 1 + i as u16;
            if y >= area.y + area.height {
                break;
            }
            let w = (text.chars().count() as u16).min(max_width);
            let row = Rect {
                x: area.x + area.width.saturating_sub(w + 1),
                y,
                width: w,
                height: 1,
            };
            frame.render_widget(Clear, row);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    text.clone(),
                    Style::default().fg(*color).add_modifier(Modifier::BOLD),
                ))),
                row,
            );
        }
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_message_replaces_older_copy() {
        let mut toasts = ToastManager::new();
        toasts.info("3 movies");
        toasts.info("3 movies");
        assert_eq!(toasts.toasts.len(), 1);
    }

    #[test]
    fn test_resolve_spinner_swaps_in_a_toast() {
        let mut toasts = ToastManager::new();
        toasts.spinner("searching: heist films");
        toasts.resolve_spinner(Severity::Success, "5 movies", Duration::from_secs(2));
        assert!(toasts.spinner.is_none());
        assert_eq!(toasts.toasts.len(), 1);
        assert_eq!(toasts.toasts[0].severity, Severity::Success);
    }
}
