//! MovieGrid component — the accumulated recommendation list.
//!
//! Pure projection of the session: every row is a movie (title, year,
//! reason), the selected row gets a detail strip with the match reason and
//! poster URL. Emits session intents upward; never touches the session.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use vibe_proto::protocol::Movie;

use std::time::Instant;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        C_BADGE_LOADING, C_MUTED, C_POSTER, C_PRIMARY, C_REASON, C_SELECTION_BG, C_TITLE, C_YEAR,
        style_error, style_muted,
    },
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        select_list::SelectList,
    },
};

/// Rows of the detail strip under the list (reason + poster line).
const DETAIL_ROWS: u16 = 3;

pub struct MovieGrid {
    pub list: SelectList<Movie>,
    /// Track last click (row index, time) for double-click detection.
    last_click: Option<(usize, Instant)>,
}

impl MovieGrid {
    pub fn new() -> Self {
        Self {
            list: SelectList::new(),
            last_click: None,
        }
    }

    /// Mirror the session's accumulated list into the widget.
    ///
    /// A shrink (new search replaced the list) resets the cursor; an append
    /// (load-more) keeps it so the user doesn't lose their place.
    pub fn sync_movies(&mut self, state: &AppState) {
        let grew = state.session.movies.len() > self.list.len();
        self.list.set_items(state.session.movies.clone());
        if !grew {
            self.list.select_first();
        }
    }

    fn open_selected(&self) -> Vec<Action> {
        match self.list.selected_item() {
            Some(m) => vec![Action::OpenDetail(m.title.clone())],
            None => vec![],
        }
    }

    fn render_row(&self, movie: &Movie, is_selected: bool, width: usize) -> Line<'static> {
        let marker = if is_selected { "▸ " } else { "  " };
        let year = movie.year.to_string();

        let title_style = if is_selected {
            Style::default().fg(C_TITLE).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_PRIMARY)
        };

        let mut spans = vec![
            Span::styled(marker.to_string(), Style::default().fg(C_TITLE)),
            Span::styled(truncate(&movie.title, width.saturating_sub(10)), title_style),
        ];
        if !year.is_empty() {
            spans.push(Span::styled(
                format!("  {}", year),
                Style::default().fg(C_YEAR),
            ));
        }

        let line = Line::from(spans);
        if is_selected {
            line.style(Style::default().bg(C_SELECTION_BG))
        } else {
            line
        }
    }
}

/// Truncate to a display width, appending an ellipsis when cut.
fn truncate(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        if out.width() + 2 > max {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

impl Component for MovieGrid {
    fn id(&self) -> ComponentId {
        ComponentId::MovieGrid
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => {
                // Pushing past the last row asks for another page.
                if self.list.at_end() && !state.session.is_loading {
                    return vec![Action::LoadMore];
                }
                self.list.select_down(step);
            }
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),

            KeyCode::Enter => return self.open_selected(),

            KeyCode::Char('y') => {
                if let Some(m) = self.list.selected_item() {
                    return vec![Action::CopyToClipboard(m.title.clone())];
                }
            }

            _ => {}
        }

        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        let rel_row = event.row.saturating_sub(area.y + 1) as usize; // +1 for border
        match event.kind {
            MouseEventKind::ScrollUp => {
                self.list.select_up(1);
            }
            MouseEventKind::ScrollDown => {
                self.list.select_down(1);
            }
            MouseEventKind::Down(ratatui::crossterm::event::MouseButton::Left) => {
                let now = Instant::now();
                let is_double = self
                    .last_click
                    .map(|(row, t)| row == rel_row && t.elapsed().as_millis() < 400)
                    .unwrap_or(false);

                if self.list.handle_click(rel_row) && is_double {
                    // Double-click: open the movie's web search
                    self.last_click = None;
                    return self.open_selected();
                }
                self.last_click = Some((rel_row, now));
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let badge = if state.session.is_loading {
            Some(Badge {
                text: "LOADING",
                color: C_BADGE_LOADING,
            })
        } else {
            None
        };
        let title = if self.list.is_empty() {
            "movies".to_string()
        } else {
            format!("movies ({})", self.list.len())
        };
        let block = pane_chrome(&title, Some('2'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut list_area = inner;

        // Error strip at the top (connectivity / no-results messages).
        if let Some(err) = &state.session.error {
            let err_area = Rect { height: 1, ..list_area };
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {}", err), style_error())),
                err_area,
            );
            list_area.y += 1;
            list_area.height = list_area.height.saturating_sub(1);
        }

        if self.list.is_empty() {
            let msg = if state.session.is_loading {
                "  summoning vibes…"
            } else if state.session.error.is_some() {
                ""
            } else {
                "  no vibes yet — press / to search or s to shuffle"
            };
            if !msg.is_empty() {
                frame.render_widget(Paragraph::new(Span::styled(msg, style_muted())), list_area);
            }
            return;
        }

        // Detail strip for the selected movie at the bottom.
        let detail_h = DETAIL_ROWS.min(list_area.height.saturating_sub(1));
        let rows_h = list_area.height.saturating_sub(detail_h) as usize;

        self.list.ensure_visible(rows_h);
        let selected = self.list.selected;
        let width = list_area.width as usize;

        let lines: Vec<Line> = self
            .list
            .visible_items(rows_h)
            .into_iter()
            .map(|(idx, movie)| self.render_row(movie, idx == selected, width))
            .collect();
        let rows_area = Rect {
            height: rows_h as u16,
            ..list_area
        };
        frame.render_widget(Paragraph::new(lines), rows_area);

        if detail_h > 0 {
            if let Some(movie) = self.list.selected_item() {
                let detail_area = Rect {
                    y: list_area.y + rows_h as u16,
                    height: detail_h,
                    ..list_area
                };
                let poster_line = if movie.has_poster() {
                    Span::styled(
                        format!(" {}", truncate(&movie.poster, width.saturating_sub(2))),
                        Style::default().fg(C_POSTER),
                    )
                } else {
                    Span::styled(" no poster", Style::default().fg(C_MUTED))
                };
                let detail = vec![
                    Line::from(Span::styled(
                        format!(" {}", truncate(&movie.reason, width.saturating_sub(2))),
                        Style::default().fg(C_REASON),
                    )),
                    Line::from(poster_line),
                ];
                frame.render_widget(Paragraph::new(detail), detail_area);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str) -> Movie {
        serde_json::from_str(&format!(r#"{{"title": {:?}}}"#, title)).unwrap()
    }

    fn press_j(grid: &mut MovieGrid, state: &AppState) -> Vec<Action> {
        grid.handle_key(
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE),
            state,
        )
    }

    #[test]
    fn test_down_past_last_row_requests_more() {
        let mut grid = MovieGrid::new();
        grid.list.set_items(vec![movie("Heat"), movie("Ronin")]);
        let state = AppState::new(false);

        // Mid-list: j just moves the cursor.
        let actions = press_j(&mut grid, &state);
        assert!(actions.is_empty());
        assert_eq!(grid.list.selected, 1);

        // At the last row: j turns into a load-more intent.
        let actions = press_j(&mut grid, &state);
        assert!(matches!(actions.as_slice(), [Action::LoadMore]));
        assert_eq!(grid.list.selected, 1);
    }

    #[test]
    fn test_no_load_more_while_request_in_flight() {
        let mut grid = MovieGrid::new();
        grid.list.set_items(vec![movie("Heat")]);
        let mut state = AppState::new(false);
        state.session.begin_load_more();

        let actions = press_j(&mut grid, &state);
        assert!(actions.is_empty());
    }
}
