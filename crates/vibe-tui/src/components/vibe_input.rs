//! VibeInput component — the free-text vibe bar at the top of the screen.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, InputMode},
    component::Component,
    theme::{C_INPUT_BG, C_INPUT_FG, C_MUTED},
    widgets::pane_chrome::pane_chrome,
};

pub struct VibeInput {
    input: Input,
    placeholder: String,
}

impl VibeInput {
    pub fn new() -> Self {
        Self {
            input: Input::default(),
            placeholder: "describe a vibe… (empty = surprise me)".to_string(),
        }
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }
}

impl Component for VibeInput {
    fn id(&self) -> ComponentId {
        ComponentId::VibeInput
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if state.input_mode != InputMode::Insert {
            return vec![];
        }

        match key.code {
            KeyCode::Enter => {
                // Submit whatever is in the bar; an empty vibe is a valid
                // "surprise me" search.
                let vibe = self.input.value().to_string();
                vec![Action::CloseInput, Action::SubmitVibe(vibe)]
            }
            KeyCode::Esc => {
                if !self.input.value().is_empty() {
                    // First Esc clears the text, second one leaves the bar.
                    self.input = Input::default();
                    vec![]
                } else {
                    vec![Action::CloseInput]
                }
            }
            _ => {
                self.input
                    .handle_event(&ratatui::crossterm::event::Event::Key(key));
                vec![]
            }
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if matches!(event.kind, MouseEventKind::Down(_)) {
            return vec![Action::OpenInput];
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::SubmitVibe(_) = action {
            // The session owns the vibe now; start the bar fresh next time.
            self.clear();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("vibe", Some('1'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // One-cell left margin inside the pane.
        let text_area = Rect {
            x: inner.x.saturating_add(1),
            width: inner.width.saturating_sub(1),
            ..inner
        };

        let editing = state.input_mode == InputMode::Insert;
        // Keep one cell free so the cursor stays visible at the right edge.
        let scroll = self
            .input
            .visual_scroll(text_area.width.saturating_sub(1) as usize);
        let value = self.input.value();

        // visual_scroll counts display columns, not bytes, so the value is
        // never sliced here; the widget does the horizontal clipping.
        let paragraph = if value.is_empty() && !editing {
            Paragraph::new(Line::from(Span::styled(
                self.placeholder.as_str(),
                Style::default().fg(C_MUTED),
            )))
        } else {
            Paragraph::new(Line::from(Span::styled(
                value,
                Style::default().fg(C_INPUT_FG),
            )))
            .scroll((0, scroll as u16))
        };
        frame.render_widget(paragraph.style(Style::default().bg(C_INPUT_BG)), text_area);

        if editing {
            let cursor_x =
                text_area.x + self.input.visual_cursor().saturating_sub(scroll) as u16;
            frame.set_cursor_position((
                cursor_x.min(text_area.x + text_area.width.saturating_sub(1)),
                text_area.y,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn insert_state() -> AppState {
        let mut state = AppState::new(false);
        state.input_mode = InputMode::Insert;
        state
    }

    #[test]
    fn test_draw_survives_scrolled_multibyte_value() {
        // Long enough that visual_scroll > 0 in a narrow pane; every char is
        // two bytes, so any byte-offset slicing would land mid-codepoint.
        let mut bar = VibeInput::new();
        bar.input = Input::new("é".repeat(60));

        let state = insert_state();
        let backend = TestBackend::new(20, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| bar.draw(f, f.area(), true, &state))
            .unwrap();
    }

    #[test]
    fn test_enter_submits_and_submit_clears() {
        let mut bar = VibeInput::new();
        bar.input = Input::new("rainy neon city".to_string());
        let state = insert_state();

        let actions = bar.handle_key(
            KeyEvent::new(KeyCode::Enter, ratatui::crossterm::event::KeyModifiers::NONE),
            &state,
        );
        assert!(matches!(actions[0], Action::CloseInput));
        let Action::SubmitVibe(ref vibe) = actions[1] else {
            panic!("expected SubmitVibe, got {:?}", actions[1]);
        };
        assert_eq!(vibe, "rainy neon city");

        bar.on_action(&actions[1], &state);
        assert_eq!(bar.input.value(), "");
    }
}
