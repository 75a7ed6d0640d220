//! Feedback records persisted per reviewer judgment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reviewer judgment on an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    /// Answer accepted, nothing to regenerate
    Correct,
    /// Answer judged wrong, re-derive from first principles
    Incorrect,
    /// Answer judged unclear, rewrite in simpler terms
    Clarify,
}

impl std::fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Correct => write!(f, "correct"),
            Self::Incorrect => write!(f, "incorrect"),
            Self::Clarify => write!(f, "clarify"),
        }
    }
}

/// Append-only audit record of one feedback submission. The session id is
/// an opaque correlation id: the original request's workflow state is not
/// retained, so the question and answer travel with the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub question: String,
    pub answer: String,
    pub feedback: FeedbackKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regenerated_answer: Option<String>,
}

impl FeedbackRecord {
    pub fn new(
        session_id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        feedback: FeedbackKind,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id: session_id.into(),
            question: question.into(),
            answer: answer.into(),
            feedback,
            regenerated_answer: None,
        }
    }

    pub fn with_regenerated_answer(mut self, answer: impl Into<String>) -> Self {
        self.regenerated_answer = Some(answer.into());
        self
    }
}
