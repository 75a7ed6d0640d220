//! Human-in-the-loop refinement of answered questions

use std::sync::Arc;

use tracing::info;

use super::entity::{FeedbackKind, FeedbackRecord};
use super::log::FeedbackLog;
use crate::domain::DomainError;
use crate::domain::agent::prompts;
use crate::domain::llm::{LlmProvider, LlmRequest};

/// Result of processing one feedback submission
#[derive(Debug, Clone)]
pub struct RefinementOutcome {
    /// The record as it was appended to the log
    pub record: FeedbackRecord,
    /// Present for `incorrect` and `clarify` judgments
    pub regenerated_answer: Option<String>,
}

/// Runs outside the workflow graph, keyed by the session id of a prior
/// request. A reviewer judgment of `incorrect` triggers a re-derivation
/// pass, `clarify` a simplification pass, `correct` no regeneration; every
/// submission is audited in the feedback log.
#[derive(Debug)]
pub struct FeedbackRefiner {
    llm: Arc<dyn LlmProvider>,
    log: Arc<dyn FeedbackLog>,
    model: String,
}

impl FeedbackRefiner {
    pub fn new(llm: Arc<dyn LlmProvider>, log: Arc<dyn FeedbackLog>, model: impl Into<String>) -> Self {
        Self {
            llm,
            log,
            model: model.into(),
        }
    }

    pub async fn refine(
        &self,
        session_id: &str,
        question: &str,
        answer: &str,
        feedback: FeedbackKind,
    ) -> Result<RefinementOutcome, DomainError> {
        info!(session_id, %feedback, "processing feedback");

        let regenerated_answer = match feedback {
            FeedbackKind::Correct => None,
            FeedbackKind::Incorrect => {
                Some(self.regenerate(prompts::rederive_prompt(question)).await?)
            }
            FeedbackKind::Clarify => {
                Some(
                    self.regenerate(prompts::simplify_prompt(question, answer))
                        .await?,
                )
            }
        };

        let mut record = FeedbackRecord::new(session_id, question, answer, feedback);
        if let Some(ref regenerated) = regenerated_answer {
            record = record.with_regenerated_answer(regenerated.clone());
        }

        self.log.append(&record).await?;

        Ok(RefinementOutcome {
            record,
            regenerated_answer,
        })
    }

    async fn regenerate(&self, prompt: String) -> Result<String, DomainError> {
        let request = LlmRequest::builder()
            .user(prompt)
            .temperature(0.0)
            .build();
        let response = self.llm.chat(&self.model, request).await?;
        Ok(response.content().to_string())
    }
}
