use serde::{Deserialize, Serialize};

/// One recommended movie as returned by the recommendation service.
///
/// The service is LLM-backed and loose about field types: `year` arrives as
/// either a string or a number, and `poster`/`reason` may be missing
/// entirely. Everything except `title` is display-only; `title` is the
/// deduplication key across paginated fetches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub title: String,
    #[serde(default)]
    pub year: Year,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub reason: String,
}

impl Movie {
    /// Case-insensitive identity across a session's accumulated list.
    pub fn dedup_key(&self) -> String {
        self.title.to_lowercase()
    }

    pub fn has_poster(&self) -> bool {
        !self.poster.trim().is_empty()
    }
}

/// Release year — the service sends `"1994"` or `1994` interchangeably.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(untagged)]
pub enum Year {
    Text(String),
    Number(i64),
    #[default]
    #[serde(skip_serializing)]
    Unknown,
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Year::Text(s) => write!(f, "{}", s),
            Year::Number(n) => write!(f, "{}", n),
            Year::Unknown => Ok(()),
        }
    }
}

/// Request body for `POST /recommend`. An empty vibe means "no constraint" —
/// the service picks freely ("surprise me").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub vibe: String,
}

/// Response body for `POST /recommend`. `movies` may be absent; callers must
/// treat absent and empty identically (a well-formed empty result, distinct
/// from a transport failure).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RecommendResponse {
    #[serde(default)]
    pub movies: Option<Vec<Movie>>,
}

impl RecommendResponse {
    /// Flatten absent-vs-empty into one list.
    pub fn into_movies(self) -> Vec<Movie> {
        self.movies.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_accepts_string_or_number() {
        let m: Movie =
            serde_json::from_str(r#"{"title": "Heat", "year": "1995"}"#).unwrap();
        assert_eq!(m.year, Year::Text("1995".into()));

        let m: Movie = serde_json::from_str(r#"{"title": "Heat", "year": 1995}"#).unwrap();
        assert_eq!(m.year, Year::Number(1995));
        assert_eq!(m.year.to_string(), "1995");
    }

    #[test]
    fn test_movie_tolerates_missing_fields() {
        let m: Movie = serde_json::from_str(r#"{"title": "Stalker"}"#).unwrap();
        assert_eq!(m.title, "Stalker");
        assert_eq!(m.year, Year::Unknown);
        assert!(!m.has_poster());
        assert!(m.reason.is_empty());
    }

    #[test]
    fn test_dedup_key_is_case_insensitive() {
        let a: Movie = serde_json::from_str(r#"{"title": "Blade Runner"}"#).unwrap();
        let b: Movie = serde_json::from_str(r#"{"title": "BLADE RUNNER"}"#).unwrap();
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_absent_movies_field_is_empty() {
        let r: RecommendResponse = serde_json::from_str("{}").unwrap();
        assert!(r.into_movies().is_empty());

        let r: RecommendResponse = serde_json::from_str(r#"{"movies": []}"#).unwrap();
        assert!(r.into_movies().is_empty());
    }
}
