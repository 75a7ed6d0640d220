//! Knowledge store trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::ScoredDocument;
use crate::domain::DomainError;

/// Read-only client for the vector knowledge store.
///
/// The store's ranking and the embedding model behind it are opaque: text
/// goes in, distance-scored documents come out, best match first.
#[async_trait]
pub trait KnowledgeStore: Send + Sync + Debug {
    /// Return the `top_k` most similar stored documents for the query
    async fn similarity_search(
        &self,
        query: &str,
        top_k: u32,
    ) -> Result<Vec<ScoredDocument>, DomainError>;

    /// Check that the store is reachable
    async fn health_check(&self) -> Result<bool, DomainError>;

    /// Get the store type name
    fn store_type(&self) -> &'static str;
}
