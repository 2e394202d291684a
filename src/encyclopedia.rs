//! Encyclopedia lookup collaborator.
//!
//! The assistant only ever wants one sentence about a topic. The default
//! implementation asks the Wikipedia REST summary endpoint; a term with no
//! matching page is a lookup error that propagates to the caller; there is
//! no retry and no disambiguation.

use crate::error::{AssistantError, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// One-sentence summary lookup seam.
#[async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Return a single-sentence summary for `term`.
    ///
    /// # Errors
    ///
    /// Returns a lookup error when no page matches the term.
    async fn summary(&self, term: &str) -> Result<String>;
}

#[derive(Deserialize)]
struct PageSummary {
    extract: String,
}

/// [`Encyclopedia`] backed by the Wikipedia REST API.
pub struct WikipediaClient {
    client: reqwest::Client,
    base_url: String,
}

impl WikipediaClient {
    /// Create a client against the given Wikipedia base URL
    /// (e.g. `https://en.wikipedia.org`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn summary_url(&self, term: &str) -> String {
        // The REST endpoint takes the page title as a path segment with
        // spaces as underscores.
        let title = term.trim().replace(' ', "_");
        format!(
            "{}/api/rest_v1/page/summary/{title}",
            self.base_url.trim_end_matches('/')
        )
    }
}

/// Cut an extract down to its first sentence.
///
/// The split point is the first period followed by whitespace (or ending
/// the text). An extract with no period is returned whole.
fn first_sentence(extract: &str) -> &str {
    let bytes = extract.as_bytes();
    for (idx, &b) in bytes.iter().enumerate() {
        if b == b'.' {
            match bytes.get(idx + 1) {
                None => return extract,
                Some(next) if next.is_ascii_whitespace() => return &extract[..=idx],
                _ => {}
            }
        }
    }
    extract
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    async fn summary(&self, term: &str) -> Result<String> {
        let response = self
            .client
            .get(self.summary_url(term))
            .send()
            .await
            .map_err(|e| AssistantError::Lookup(format!("request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AssistantError::Lookup(format!("no page for '{}'", term.trim())));
        }
        if !response.status().is_success() {
            return Err(AssistantError::Lookup(format!(
                "encyclopedia returned {}",
                response.status()
            )));
        }

        let page: PageSummary = response
            .json()
            .await
            .map_err(|e| AssistantError::Lookup(format!("bad summary payload: {e}")))?;
        Ok(first_sentence(&page.extract).to_owned())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn first_sentence_stops_at_period_before_space() {
        assert_eq!(
            first_sentence("Nikola Tesla was an inventor. He was born in 1856."),
            "Nikola Tesla was an inventor."
        );
    }

    #[test]
    fn first_sentence_keeps_interior_periods() {
        // Abbreviation periods are not sentence boundaries.
        assert_eq!(
            first_sentence("J.R.R. Tolkien wrote fantasy. He taught at Oxford."),
            "J.R.R. Tolkien wrote fantasy."
        );
    }

    #[test]
    fn first_sentence_returns_whole_text_without_period() {
        assert_eq!(first_sentence("a fragment"), "a fragment");
    }

    #[test]
    fn first_sentence_handles_trailing_period() {
        assert_eq!(first_sentence("One sentence."), "One sentence.");
    }

    #[test]
    fn summary_url_uses_underscored_title() {
        let client = WikipediaClient::new("https://en.wikipedia.org");
        assert_eq!(
            client.summary_url(" nikola tesla "),
            "https://en.wikipedia.org/api/rest_v1/page/summary/nikola_tesla"
        );
    }
}
