//! Status bar — bottom line with mode indicator and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::InputMode;
use crate::theme::{C_MODE_INSERT, C_MODE_NORMAL, C_MUTED, C_SECONDARY};

fn mode_color(mode: InputMode) -> ratatui::style::Color {
    match mode {
        InputMode::Normal => C_MODE_NORMAL,
        InputMode::Insert => C_MODE_INSERT,
    }
}

/// Draw the bottom keybinding bar.
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode) {
    let mut spans: Vec<Span> = vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default()
                .fg(mode_color(mode))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];

    let keys: &[(&str, &str)] = match mode {
        InputMode::Normal => &[
            ("/", "vibe"),
            ("s", "shuffle"),
            ("m", "more"),
            ("t", "match tab"),
            ("enter", "open"),
            ("y", "copy"),
            ("?", "help"),
            ("q", "quit"),
        ],
        InputMode::Insert => &[("enter", "search"), ("esc", "cancel")],
    };

    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(C_MUTED)));
        }
        spans.push(Span::styled(
            *key,
            Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(C_MUTED),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
