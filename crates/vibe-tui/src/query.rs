//! Query sources — where a vibe string can come from.
//!
//! Three sources feed the session controller: direct text (passed through
//! verbatim), shuffle (always the empty string — the service reads that as
//! "no constraint"), and a context-derived query built from the title of the
//! host desktop's active window.

use std::process::Command;

use tracing::debug;

/// Streaming-service branding removed from window titles before building a
/// context query. Literal substrings, disjoint, order of removal irrelevant.
const TITLE_SUFFIXES: &[&str] = &[" - Netflix", " - IMDb", " - Prime Video", " | Disney+"];

/// Prefix for context-derived queries.
const CONTEXT_QUERY_PREFIX: &str = "Movies like ";

/// The shuffle / "surprise me" query.
pub fn shuffle_query() -> String {
    String::new()
}

/// Strip known branding suffixes from a raw window title.
pub fn clean_title(raw: &str) -> String {
    let mut title = raw.to_string();
    for suffix in TITLE_SUFFIXES {
        title = title.replace(suffix, "");
    }
    title.trim().to_string()
}

/// Build the context-derived vibe from a raw window title.
pub fn derive_query_from_title(raw: &str) -> String {
    format!("{}{}", CONTEXT_QUERY_PREFIX, clean_title(raw))
}

/// Source of the active window title. Selected once at construction from
/// config: either a command-backed reader or a permanently unavailable stub.
/// Callers get a uniform "maybe a title" answer and surface the capability
/// error themselves.
#[derive(Debug, Clone)]
pub enum TabTitleSource {
    /// Shell out to a user-configured command (e.g. `xdotool getactivewindow
    /// getwindowname`) and read the title from its stdout.
    Command(String),
    /// Host environment exposes no window title. Always unavailable.
    Unavailable,
}

impl TabTitleSource {
    pub fn from_config(title_command: Option<&str>) -> Self {
        match title_command {
            Some(cmd) if !cmd.trim().is_empty() => Self::Command(cmd.to_string()),
            _ => Self::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Command(_))
    }

    /// Title of the active window, or `None` when the capability is absent
    /// or the command produced nothing usable.
    pub fn active_title(&self) -> Option<String> {
        let cmd = match self {
            Self::Command(cmd) => cmd,
            Self::Unavailable => return None,
        };

        let mut parts = cmd.split_whitespace();
        let program = parts.next()?;
        let output = Command::new(program).args(parts).output().ok()?;
        if !output.status.success() {
            debug!("[query] title command exited with {}", output.status);
            return None;
        }

        let title = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_strips_netflix_suffix() {
        assert_eq!(
            derive_query_from_title("Stranger Things - Netflix"),
            "Movies like Stranger Things"
        );
    }

    #[test]
    fn test_derive_strips_each_known_suffix() {
        assert_eq!(clean_title("Heat - IMDb"), "Heat");
        assert_eq!(clean_title("Reacher - Prime Video"), "Reacher");
        assert_eq!(clean_title("Andor | Disney+"), "Andor");
    }

    #[test]
    fn test_unbranded_title_passes_through() {
        assert_eq!(
            derive_query_from_title("The Seventh Seal"),
            "Movies like The Seventh Seal"
        );
    }

    #[test]
    fn test_suffix_removal_is_order_independent() {
        // Multiple brandings in one title (tab title glued together) all go.
        assert_eq!(clean_title("Dark - Netflix - IMDb"), "Dark");
    }

    #[test]
    fn test_shuffle_is_empty() {
        assert_eq!(shuffle_query(), "");
    }

    #[test]
    fn test_source_selection_from_config() {
        assert!(TabTitleSource::from_config(Some("xdotool getactivewindow getwindowname")).is_available());
        assert!(!TabTitleSource::from_config(None).is_available());
        assert!(!TabTitleSource::from_config(Some("  ")).is_available());
    }

    #[test]
    fn test_unavailable_source_yields_no_title() {
        assert_eq!(TabTitleSource::Unavailable.active_title(), None);
    }

    #[test]
    fn test_command_source_reads_stdout() {
        let src = TabTitleSource::from_config(Some("echo Dark - Netflix"));
        assert_eq!(src.active_title().as_deref(), Some("Dark - Netflix"));
    }
}
