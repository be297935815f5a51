//! Action enum — all user-initiated intents and internal events.

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    VibeInput,
    MovieGrid,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Session ──────────────────────────────────────────────────────────────
    /// New search with the given vibe (empty = surprise me).
    SubmitVibe(String),
    /// New search with an empty vibe.
    Shuffle,
    /// Append novel results for the current vibe.
    LoadMore,
    /// Derive a vibe from the active window title and run a new search.
    MatchTab,
    /// Open a web search for the given movie title. Never touches session state.
    OpenDetail(String),

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── Input mode ───────────────────────────────────────────────────────────
    OpenInput,
    CloseInput,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    CopyToClipboard(String),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
    Noop,
}
