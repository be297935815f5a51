//! Color palette and style constants for the VibeAlchemy TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(16, 12, 24);
pub const C_ACCENT: Color = Color::Rgb(236, 100, 140);
pub const C_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MUTED: Color = Color::Rgb(80, 70, 100);
pub const C_SECONDARY: Color = Color::Rgb(130, 118, 155);
pub const C_PRIMARY: Color = Color::Rgb(222, 214, 235);
pub const C_SELECTION_BG: Color = Color::Rgb(36, 26, 52);
pub const C_PANEL_BORDER: Color = Color::Rgb(46, 38, 64);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(150, 95, 220); // vibrant purple — clear focus indicator
pub const C_NUMBER_HINT: Color = Color::Rgb(96, 86, 120);
pub const C_INPUT_BG: Color = Color::Rgb(24, 18, 36);
pub const C_INPUT_FG: Color = Color::Rgb(255, 205, 120);
pub const C_TITLE: Color = Color::Rgb(210, 150, 255);
pub const C_YEAR: Color = Color::Rgb(160, 120, 230);
pub const C_REASON: Color = Color::Rgb(140, 150, 170);
pub const C_POSTER: Color = Color::Rgb(95, 145, 200);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_BADGE_LOADING: Color = Color::Rgb(255, 184, 80);
pub const C_MODE_NORMAL: Color = Color::Rgb(130, 118, 155);
pub const C_MODE_INSERT: Color = Color::Rgb(255, 205, 120);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_error() -> Style {
    Style::default().fg(C_ERROR).add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
