//! Client for the remote search tool server

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::DomainError;
use crate::domain::search::{FallbackSearch, SearchHit};
use crate::infrastructure::llm::HttpClientTrait;

/// Invokes the external search capability exposed by a decoupled tool
/// server. The server is untrusted and unreliable; transport and protocol
/// failures surface as errors for the caller to absorb.
#[derive(Debug)]
pub struct ToolServerSearch<C: HttpClientTrait> {
    client: C,
    endpoint: String,
}

impl<C: HttpClientTrait> ToolServerSearch<C> {
    pub fn new(client: C, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ToolServerResponse {
    result: Vec<ToolServerHit>,
}

#[derive(Debug, Deserialize)]
struct ToolServerHit {
    url: String,
    content: String,
}

#[async_trait]
impl<C: HttpClientTrait> FallbackSearch for ToolServerSearch<C> {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, DomainError> {
        let body = serde_json::json!({ "query": query });

        let json = self
            .client
            .post_json(&self.endpoint, Vec::new(), &body)
            .await
            .map_err(|e| DomainError::provider("tool-server", e.to_string()))?;

        let response: ToolServerResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("tool-server", format!("Failed to parse response: {}", e))
        })?;

        Ok(response
            .result
            .into_iter()
            .map(|hit| SearchHit::new(hit.url, hit.content))
            .collect())
    }

    fn client_name(&self) -> &'static str {
        "tool-server"
    }
}
