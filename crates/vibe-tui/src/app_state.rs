//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this for session state, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use crate::session::Session;

/// Which input mode the app is in. Insert routes keys to the vibe input bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Insert,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
        }
    }
}

/// The full shared state of the application.
/// Components read this; only the App event-loop writes to it.
pub struct AppState {
    /// The recommendation session — vibe, results, loading flag, error.
    pub session: Session,
    /// Whether the active-window-title capability is available.
    pub tab_context_available: bool,
    pub input_mode: InputMode,
}

impl AppState {
    pub fn new(tab_context_available: bool) -> Self {
        Self {
            session: Session::new(),
            tab_context_available,
            input_mode: InputMode::Normal,
        }
    }

    /// Label for the header: the vibe being shown, or the shuffle marker.
    pub fn vibe_label(&self) -> &str {
        if self.session.current_vibe.is_empty() {
            "surprise me"
        } else {
            &self.session.current_vibe
        }
    }
}
