//! Fallback search trait and result types

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A single result from the external search capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    pub content: String,
}

impl SearchHit {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }
}

/// Client for the remote search tool, used only when local retrieval is
/// judged insufficient. Treated as untrusted and unreliable: callers must
/// handle errors without aborting the pipeline.
#[async_trait]
pub trait FallbackSearch: Send + Sync + Debug {
    /// Run an external search for the query
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, DomainError>;

    /// Get the client name
    fn client_name(&self) -> &'static str;
}


#[cfg(test)]
mod tests {
    use super::mock::MockFallbackSearch;
    use super::*;

    #[tokio::test]
    async fn test_mock_search_hits_and_count() {
        let search = MockFallbackSearch::new()
            .with_hits(vec![SearchHit::new("https://example.org", "Derivatives.")]);

        let hits = search.search("derivative").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "https://example.org");
        assert_eq!(search.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_search_error() {
        let search = MockFallbackSearch::new().with_error("connection refused");
        assert!(search.search("q").await.is_err());
        assert_eq!(search.call_count(), 1);
    }
}
