//! Retrieved document types

use serde::{Deserialize, Serialize};

/// A document returned by the knowledge store together with its distance
/// score. Scores are a distance metric: lower means more similar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// Content text
    pub content: String,
    /// Distance between the query and the document (lower = more similar)
    pub score: f32,
}

impl ScoredDocument {
    pub fn new(content: impl Into<String>, score: f32) -> Self {
        Self {
            content: content.into(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scored_document_creation() {
        let doc = ScoredDocument::new("Question: derivative of x^2", 0.2);
        assert_eq!(doc.content, "Question: derivative of x^2");
        assert_eq!(doc.score, 0.2);
    }

    #[test]
    fn test_serialization_round_trip() {
        let doc = ScoredDocument::new("content", 0.42);
        let json = serde_json::to_string(&doc).unwrap();
        let back: ScoredDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back.content, "content");
        assert_eq!(back.score, 0.42);
    }
}
