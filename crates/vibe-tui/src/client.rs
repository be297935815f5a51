//! HTTP client for the recommendation service.
//!
//! One endpoint: `POST /recommend` with `{"vibe": "..."}`, answered with
//! `{"movies": [...]}`. The caller needs transport failures kept apart from
//! well-formed empty responses, so this returns `Ok(vec![])` for the latter
//! and `Err` only when the service could not be reached or answered garbage.

use anyhow::{Context, Result};
use tracing::debug;

use vibe_proto::protocol::{Movie, RecommendRequest, RecommendResponse};

#[derive(Debug, Clone)]
pub struct RecommendClient {
    base_url: String,
    http: reqwest::Client,
}

impl RecommendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn recommend_url(&self) -> String {
        format!("{}/recommend", self.base_url)
    }

    /// Fetch ranked recommendations for a vibe (empty = unconstrained).
    ///
    /// `Ok(vec![])` is a well-formed "nothing matched" answer; any transport
    /// problem, non-2xx status, or unparseable body is an `Err`.
    pub async fn recommend(&self, vibe: &str) -> Result<Vec<Movie>> {
        let url = self.recommend_url();
        debug!("[client] POST {} vibe={:?}", url, vibe);

        let response = self
            .http
            .post(&url)
            .json(&RecommendRequest {
                vibe: vibe.to_string(),
            })
            .send()
            .await
            .context("failed to reach recommendation service")?;

        if !response.status().is_success() {
            anyhow::bail!("recommendation service returned status {}", response.status());
        }

        let body: RecommendResponse = response
            .json()
            .await
            .context("failed to parse recommendation response")?;

        let movies = body.into_movies();
        debug!("[client] {} movies for vibe={:?}", movies.len(), vibe);
        Ok(movies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_normalised() {
        let c = RecommendClient::new("http://127.0.0.1:5000/");
        assert_eq!(c.base_url(), "http://127.0.0.1:5000");
        assert_eq!(c.recommend_url(), "http://127.0.0.1:5000/recommend");
    }
}
