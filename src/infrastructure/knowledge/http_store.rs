//! HTTP client for the vector knowledge store service

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::DomainError;
use crate::domain::knowledge::{KnowledgeStore, ScoredDocument};
use crate::infrastructure::llm::HttpClientTrait;

/// Knowledge store reached over HTTP. The service owns the embeddings and
/// the index; this client only sends query text and reads back
/// distance-scored documents, best match first.
#[derive(Debug)]
pub struct HttpKnowledgeStore<C: HttpClientTrait> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> HttpKnowledgeStore<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn query_url(&self) -> String {
        format!("{}/query", self.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    content: String,
    score: f32,
}

#[async_trait]
impl<C: HttpClientTrait> KnowledgeStore for HttpKnowledgeStore<C> {
    async fn similarity_search(
        &self,
        query: &str,
        top_k: u32,
    ) -> Result<Vec<ScoredDocument>, DomainError> {
        let body = serde_json::json!({
            "query": query,
            "top_k": top_k,
        });

        let json = self
            .client
            .post_json(&self.query_url(), Vec::new(), &body)
            .await
            .map_err(|e| DomainError::knowledge_store(e.to_string()))?;

        let response: QueryResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::knowledge_store(format!("Failed to parse query response: {}", e))
        })?;

        Ok(response
            .results
            .into_iter()
            .map(|r| ScoredDocument::new(r.content, r.score))
            .collect())
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        match self.client.get_json(&self.health_url(), Vec::new()).await {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    }

    fn store_type(&self) -> &'static str {
        "http"
    }
}
