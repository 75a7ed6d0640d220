//! Feedback log trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::FeedbackRecord;
use crate::domain::DomainError;

/// Durable append-only log of feedback records. Records are never mutated
/// or deleted by this system.
#[async_trait]
pub trait FeedbackLog: Send + Sync + Debug {
    /// Append one record; concurrent appenders must not lose writes
    async fn append(&self, record: &FeedbackRecord) -> Result<(), DomainError>;
}
