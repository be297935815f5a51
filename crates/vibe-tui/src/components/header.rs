//! Header — one-row top bar: app name, current vibe, result count.
//!
//! Not focusable and never dispatched to, so it stays a plain widget
//! rather than a `Component`.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    app_state::AppState,
    theme::{C_ACCENT, C_BADGE_LOADING, C_MUTED, C_SECONDARY, C_TITLE},
};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = vec![
            Span::styled(
                " VIBEALCHEMY ",
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("· ", Style::default().fg(C_MUTED)),
            Span::styled(
                state.vibe_label().to_string(),
                Style::default().fg(C_TITLE),
            ),
        ];

        if !state.session.movies.is_empty() {
            spans.push(Span::styled(
                format!("  {} movies", state.session.movies.len()),
                Style::default().fg(C_SECONDARY),
            ));
        }

        if state.session.is_loading {
            spans.push(Span::styled(
                "  loading…",
                Style::default().fg(C_BADGE_LOADING),
            ));
        }

        if !state.tab_context_available {
            spans.push(Span::styled(
                "  [no tab context]",
                Style::default().fg(C_MUTED),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
