//! HelpOverlay component — centered popup with keyboard shortcut reference.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_PANEL_BORDER, C_PRIMARY, C_SECONDARY},
};

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

impl Component for HelpOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::HelpOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if !self.visible {
            return vec![];
        }
        match key.code {
            // Don't flip `visible` here; the ToggleHelp broadcast comes back
            // through on_action and does the single toggle.
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => {
                return vec![Action::ToggleHelp];
            }
            _ => {}
        }
        // Consume all keys while overlay is open
        vec![]
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

        let popup = centered_rect(56, 18, area);

        let help_lines: Vec<Line> = vec![
            Line::from(Span::styled(
                " keyboard shortcuts",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                " search",
                Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
            )),
            help_row("/ or i", "type a vibe (enter submits, esc cancels)"),
            help_row("s", "shuffle — surprise me"),
            help_row("m", "load more for the current vibe"),
            help_row("t", "match the active tab's title"),
            Line::from(""),
            Line::from(Span::styled(
                " movies",
                Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
            )),
            help_row("j / k or ↑ / ↓", "move selection (Shift = 5 rows)"),
            help_row("enter", "open a web search for the movie"),
            help_row("y", "copy title to clipboard"),
            Line::from(""),
            help_row("tab", "cycle focus"),
            help_row("?", "toggle this help"),
            help_row("q / ctrl-c", "quit"),
        ];

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_PANEL_BORDER))
            .title(" help ");
        frame.render_widget(Paragraph::new(help_lines).block(block), popup);
    }
}

fn help_row(keys: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<18}", keys), Style::default().fg(C_SECONDARY)),
        Span::styled(desc.to_string(), Style::default().fg(C_MUTED)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn press(overlay: &mut HelpOverlay, code: KeyCode) -> Vec<Action> {
        let state = AppState::new(false);
        let actions = overlay.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &state);
        // The App broadcasts every dispatched action back through on_action;
        // replay that here so the toggle happens exactly once, as it does live.
        for a in &actions {
            overlay.on_action(a, &state);
        }
        actions
    }

    #[test]
    fn test_esc_and_q_close_the_overlay() {
        for code in [KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('?')] {
            let mut overlay = HelpOverlay::new();
            overlay.visible = true;
            press(&mut overlay, code);
            assert!(!overlay.visible, "{:?} should close the overlay", code);
        }
    }

    #[test]
    fn test_unhandled_keys_produce_no_actions() {
        // The App decides what an unhandled key does while the overlay is
        // open; the component itself must not toggle on them.
        let mut overlay = HelpOverlay::new();
        overlay.visible = true;
        let actions = press(&mut overlay, KeyCode::Char('j'));
        assert!(actions.is_empty());
        assert!(overlay.visible);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);
    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vert[1]);
    horiz[1]
}
