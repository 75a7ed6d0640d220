//! Workflow state threaded through the agent graph

use serde::{Deserialize, Serialize};

use crate::domain::knowledge::ScoredDocument;

/// Routing tag produced by decision nodes and consumed immediately by the
/// engine to pick the next node. Not meaningful after routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    Continue,
    End,
    WebSearch,
    Generate,
}

/// Mutable state threaded through the graph, fields populated incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    question: String,
    /// Retrieved documents with distance scores, best match first
    pub documents: Vec<ScoredDocument>,
    /// Context assembled from retrieval or fallback search, never both
    pub context: Option<String>,
    /// The answer surfaced to the caller; non-empty by the terminal node
    pub generation: Option<String>,
    pub route_decision: Option<RouteDecision>,
}

impl WorkflowState {
    /// Create the entry state for a question. The question is immutable for
    /// the rest of the invocation.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            documents: Vec::new(),
            context: None,
            generation: None,
            route_decision: None,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// Merge a partial update, shallow and last-write-wins per field
    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(documents) = update.documents {
            self.documents = documents;
        }
        if let Some(context) = update.context {
            self.context = Some(context);
        }
        if let Some(generation) = update.generation {
            self.generation = Some(generation);
        }
        if let Some(route_decision) = update.route_decision {
            self.route_decision = Some(route_decision);
        }
    }
}

/// Partial state update returned by a node
#[derive(Debug, Clone, Default)]
pub struct StateUpdate {
    pub documents: Option<Vec<ScoredDocument>>,
    pub context: Option<String>,
    pub generation: Option<String>,
    pub route_decision: Option<RouteDecision>,
}

impl StateUpdate {
    pub fn documents(documents: Vec<ScoredDocument>) -> Self {
        Self {
            documents: Some(documents),
            ..Self::default()
        }
    }

    pub fn context(context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..Self::default()
        }
    }

    pub fn generation(generation: impl Into<String>) -> Self {
        Self {
            generation: Some(generation.into()),
            ..Self::default()
        }
    }

    pub fn route(route: RouteDecision) -> Self {
        Self {
            route_decision: Some(route),
            ..Self::default()
        }
    }

    pub fn with_route(mut self, route: RouteDecision) -> Self {
        self.route_decision = Some(route);
        self
    }

    pub fn with_generation(mut self, generation: impl Into<String>) -> Self {
        self.generation = Some(generation.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = WorkflowState::new("What is 2+2?");
        assert_eq!(state.question(), "What is 2+2?");
        assert!(state.documents.is_empty());
        assert!(state.context.is_none());
        assert!(state.generation.is_none());
        assert!(state.route_decision.is_none());
    }

    #[test]
    fn test_apply_merges_set_fields_only() {
        let mut state = WorkflowState::new("q");
        state.apply(StateUpdate::context("some context"));

        assert_eq!(state.context.as_deref(), Some("some context"));
        assert!(state.generation.is_none());
    }

    #[test]
    fn test_apply_last_write_wins() {
        let mut state = WorkflowState::new("q");
        state.apply(StateUpdate::route(RouteDecision::Continue));
        state.apply(StateUpdate::route(RouteDecision::Generate));

        assert_eq!(state.route_decision, Some(RouteDecision::Generate));
    }

    #[test]
    fn test_apply_combined_update() {
        let mut state = WorkflowState::new("q");
        state.apply(
            StateUpdate::generation("refusal").with_route(RouteDecision::End),
        );

        assert_eq!(state.generation.as_deref(), Some("refusal"));
        assert_eq!(state.route_decision, Some(RouteDecision::End));
    }

    #[test]
    fn test_route_decision_serialization() {
        assert_eq!(
            serde_json::to_string(&RouteDecision::WebSearch).unwrap(),
            "\"web_search\""
        );
        assert_eq!(
            serde_json::to_string(&RouteDecision::Continue).unwrap(),
            "\"continue\""
        );
    }
}
