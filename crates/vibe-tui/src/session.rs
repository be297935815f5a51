//! Session — the recommendation session state machine.
//!
//! Owns everything a search/paginate cycle needs: the last
//! submitted vibe, the accumulated movie list, the loading flag, and the
//! user-facing error. Components read a `&Session` through `AppState` and
//! never mutate it; the App event-loop is the only writer.
//!
//! A request cycle is split in two synchronous halves so the network I/O can
//! run in a spawned task between them:
//!
//! ```text
//!  begin_new_search / begin_load_more  →  RequestTicket
//!      (task performs the fetch)
//!  settle(ticket, outcome)             →  merged state
//! ```
//!
//! Each `begin_*` bumps a sequence number; `settle` drops any outcome whose
//! ticket is no longer the latest. Together with the App aborting the
//! previous in-flight fetch task, a fast second search can never have its
//! results clobbered by a slow first one.

use vibe_proto::protocol::Movie;

use std::collections::HashSet;

/// Errors a request cycle can end in. All of them resolve locally into
/// `Session::error` as a human-readable message; nothing propagates further.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("could not reach the recommendation service at {url} — is it running?")]
    ServiceUnreachable { url: String },
    #[error("no movies matched that vibe — try a different one")]
    NoResults,
    #[error(
        "tab matching needs a desktop that exposes the active window title \
         (set context.title_command in config.toml)"
    )]
    CapabilityUnavailable,
}

/// Whether a request replaces the list or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    NewSearch,
    LoadMore,
}

/// Handle for one in-flight request. The query travels with it so the fetch
/// task never reads session state, and the sequence number identifies the
/// request when it settles.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    pub seq: u64,
    pub kind: RequestKind,
    pub query: String,
}

/// How a request settled: a movie list (possibly empty) or a transport
/// failure. A well-formed empty response is *not* a failure; the two are kept
/// distinct all the way from the wire.
pub type RequestOutcome = Result<Vec<Movie>, SessionError>;

#[derive(Debug, Default)]
pub struct Session {
    /// Last vibe submitted by a new search. Load-more reads it, never writes it.
    pub current_vibe: String,
    /// Accumulated results, arrival order. No two entries share a
    /// case-insensitive title.
    pub movies: Vec<Movie>,
    /// True exactly while a request is in flight.
    pub is_loading: bool,
    /// User-facing error from the last settled request, if any.
    pub error: Option<String>,

    /// Sequence number of the most recently issued request.
    seq: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search. Replaces the whole result set when it settles;
    /// the old list is cleared immediately so the UI shows a fresh slate
    /// while loading. An empty `vibe` means "surprise me".
    pub fn begin_new_search(&mut self, vibe: impl Into<String>) -> RequestTicket {
        let vibe = vibe.into();
        self.error = None;
        self.is_loading = true;
        self.movies.clear();
        self.current_vibe = vibe.clone();
        self.next_ticket(RequestKind::NewSearch, vibe)
    }

    /// Re-query the current vibe and append novel results.
    ///
    /// If no vibe was ever submitted this issues an unconstrained (empty)
    /// query and appends whatever comes back — same contract, just with no
    /// constraint on the service side.
    pub fn begin_load_more(&mut self) -> RequestTicket {
        self.error = None;
        self.is_loading = true;
        let query = self.current_vibe.clone();
        self.next_ticket(RequestKind::LoadMore, query)
    }

    /// A capability error short-circuits the cycle without any request being
    /// issued; loading state is untouched because it was never set.
    pub fn fail_without_request(&mut self, err: SessionError) {
        self.error = Some(err.to_string());
    }

    /// Apply a settled request. Returns `false` when the ticket was
    /// superseded by a newer request and the outcome was dropped.
    pub fn settle(&mut self, ticket: &RequestTicket, outcome: RequestOutcome) -> bool {
        if ticket.seq != self.seq {
            // A newer request owns the loading flag and the list now.
            return false;
        }
        self.is_loading = false;

        match outcome {
            Ok(incoming) => match ticket.kind {
                RequestKind::NewSearch => {
                    if incoming.is_empty() {
                        self.error = Some(SessionError::NoResults.to_string());
                    } else {
                        // List was cleared at begin; dedup only within the
                        // response itself (the service occasionally repeats).
                        self.movies = dedup_in_order(incoming, &HashSet::new());
                    }
                }
                RequestKind::LoadMore => {
                    // Pagination exhaustion is silent, never an error.
                    let seen: HashSet<String> =
                        self.movies.iter().map(|m| m.dedup_key()).collect();
                    self.movies.extend(dedup_in_order(incoming, &seen));
                }
            },
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
        true
    }

    fn next_ticket(&mut self, kind: RequestKind, query: String) -> RequestTicket {
        self.seq += 1;
        RequestTicket {
            seq: self.seq,
            kind,
            query,
        }
    }
}

/// Keep the first occurrence of each case-insensitive title, preserving
/// order, skipping anything already in `seen`.
fn dedup_in_order(incoming: Vec<Movie>, seen: &HashSet<String>) -> Vec<Movie> {
    let mut seen = seen.clone();
    incoming
        .into_iter()
        .filter(|m| seen.insert(m.dedup_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str) -> Movie {
        serde_json::from_str(&format!(r#"{{"title": {:?}}}"#, title)).unwrap()
    }

    fn titles(session: &Session) -> Vec<&str> {
        session.movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn test_new_search_replaces_results() {
        let mut s = Session::new();
        s.movies = vec![movie("Old Boy")];

        let t = s.begin_new_search("neon loneliness");
        assert!(s.is_loading);
        assert!(s.movies.is_empty());
        assert_eq!(s.current_vibe, "neon loneliness");

        assert!(s.settle(&t, Ok(vec![movie("Her"), movie("Drive")])));
        assert!(!s.is_loading);
        assert_eq!(titles(&s), ["Her", "Drive"]);
        assert!(s.error.is_none());
    }

    #[test]
    fn test_empty_new_search_sets_no_results_error() {
        let mut s = Session::new();
        let t = s.begin_new_search("obscure vibe");
        assert!(s.settle(&t, Ok(vec![])));
        assert!(s.movies.is_empty());
        assert!(s.error.as_deref().unwrap().contains("no movies"));
        assert!(!s.is_loading);
    }

    #[test]
    fn test_load_more_appends_only_novel_titles() {
        let mut s = Session::new();
        let t = s.begin_new_search("heist");
        s.settle(&t, Ok(vec![movie("Heat"), movie("Ronin")]));

        let t = s.begin_load_more();
        assert_eq!(t.query, "heist");
        // "RONIN" matches case-insensitively and must be dropped.
        s.settle(&t, Ok(vec![movie("RONIN"), movie("Thief")]));
        assert_eq!(titles(&s), ["Heat", "Ronin", "Thief"]);
    }

    #[test]
    fn test_empty_load_more_is_silent_no_op() {
        let mut s = Session::new();
        let t = s.begin_new_search("western");
        s.settle(&t, Ok(vec![movie("Unforgiven")]));

        let t = s.begin_load_more();
        assert!(s.settle(&t, Ok(vec![])));
        assert_eq!(titles(&s), ["Unforgiven"]);
        assert!(s.error.is_none());
        assert!(!s.is_loading);
    }

    #[test]
    fn test_load_more_with_all_duplicates_is_silent_no_op() {
        let mut s = Session::new();
        let t = s.begin_new_search("western");
        s.settle(&t, Ok(vec![movie("Unforgiven"), movie("Shane")]));

        let t = s.begin_load_more();
        s.settle(&t, Ok(vec![movie("shane"), movie("UNFORGIVEN")]));
        assert_eq!(titles(&s), ["Unforgiven", "Shane"]);
        assert!(s.error.is_none());
    }

    #[test]
    fn test_transport_failure_keeps_results_on_load_more() {
        let mut s = Session::new();
        let t = s.begin_new_search("noir");
        s.settle(&t, Ok(vec![movie("Chinatown")]));

        let t = s.begin_load_more();
        let err = SessionError::ServiceUnreachable {
            url: "http://127.0.0.1:5000".into(),
        };
        assert!(s.settle(&t, Err(err)));
        assert_eq!(titles(&s), ["Chinatown"]);
        assert!(s.error.as_deref().unwrap().contains("127.0.0.1:5000"));
        assert!(!s.is_loading);
    }

    #[test]
    fn test_loading_resolves_on_every_settle_path() {
        let mut s = Session::new();
        for outcome in [
            Ok(vec![movie("Alien")]),
            Ok(vec![]),
            Err(SessionError::ServiceUnreachable {
                url: "http://127.0.0.1:5000".into(),
            }),
        ] {
            let t = s.begin_new_search("space");
            assert!(s.is_loading);
            s.settle(&t, outcome);
            assert!(!s.is_loading);
        }
    }

    #[test]
    fn test_dedup_invariant_over_load_more_sequences() {
        let mut s = Session::new();
        let t = s.begin_new_search("anything");
        s.settle(&t, Ok(vec![movie("A"), movie("B")]));

        for batch in [
            vec![movie("b"), movie("C")],
            vec![movie("c"), movie("D"), movie("a")],
            vec![movie("D"), movie("d")],
        ] {
            let t = s.begin_load_more();
            s.settle(&t, Ok(batch));
        }

        let keys: Vec<String> = s.movies.iter().map(|m| m.dedup_key()).collect();
        let unique: HashSet<&String> = keys.iter().collect();
        assert_eq!(keys.len(), unique.len());
        assert_eq!(titles(&s), ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_new_search_response_with_internal_duplicates() {
        let mut s = Session::new();
        let t = s.begin_new_search("double");
        s.settle(&t, Ok(vec![movie("Vertigo"), movie("VERTIGO"), movie("Rope")]));
        assert_eq!(titles(&s), ["Vertigo", "Rope"]);
    }

    #[test]
    fn test_stale_settle_is_dropped() {
        let mut s = Session::new();
        let stale = s.begin_new_search("first");
        let fresh = s.begin_new_search("second");

        // The slow first response settles after being superseded: dropped,
        // loading stays owned by the second request.
        assert!(!s.settle(&stale, Ok(vec![movie("Wrong")])));
        assert!(s.is_loading);
        assert!(s.movies.is_empty());

        assert!(s.settle(&fresh, Ok(vec![movie("Right")])));
        assert_eq!(titles(&s), ["Right"]);
        assert_eq!(s.current_vibe, "second");
    }

    #[test]
    fn test_load_more_without_prior_vibe_queries_empty_and_appends() {
        let mut s = Session::new();
        let t = s.begin_load_more();
        assert_eq!(t.query, "");
        s.settle(&t, Ok(vec![movie("Stalker")]));
        assert_eq!(titles(&s), ["Stalker"]);
        assert!(s.error.is_none());
    }

    #[test]
    fn test_capability_error_does_not_touch_loading() {
        let mut s = Session::new();
        s.fail_without_request(SessionError::CapabilityUnavailable);
        assert!(!s.is_loading);
        assert!(s.error.as_deref().unwrap().contains("title_command"));
    }

    #[test]
    fn test_new_search_error_clears_on_next_request() {
        let mut s = Session::new();
        let t = s.begin_new_search("nothing");
        s.settle(&t, Ok(vec![]));
        assert!(s.error.is_some());

        let _t = s.begin_new_search("something");
        assert!(s.error.is_none());
    }
}
