//! Self-correcting RAG agent: state model, graph executor and nodes

mod graph;
mod nodes;
pub mod prompts;
mod state;

pub use graph::{Next, NodeId, TransitionTable, WorkflowEngine};
pub use nodes::AgentNodes;
pub use state::{RouteDecision, StateUpdate, WorkflowState};

use serde::{Deserialize, Serialize};

/// Policy constants for the agent pipeline.
///
/// The threshold is a distance: documents score *below* it are considered
/// relevant. The comparison direction is fixed even though the value is
/// configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model used for the yes/no input classification
    #[serde(default = "default_guardrail_model")]
    pub guardrail_model: String,
    /// Model used for answer synthesis and feedback regeneration
    #[serde(default = "default_generation_model")]
    pub generation_model: String,
    /// Distance threshold below which retrieval is considered relevant
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: f32,
    /// Number of documents requested from the knowledge store
    #[serde(default = "default_retrieval_top_k")]
    pub retrieval_top_k: u32,
}

fn default_guardrail_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_generation_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_relevance_threshold() -> f32 {
    0.5
}

fn default_retrieval_top_k() -> u32 {
    1
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            guardrail_model: default_guardrail_model(),
            generation_model: default_generation_model(),
            relevance_threshold: default_relevance_threshold(),
            retrieval_top_k: default_retrieval_top_k(),
        }
    }
}

impl AgentConfig {
    pub fn with_relevance_threshold(mut self, threshold: f32) -> Self {
        self.relevance_threshold = threshold;
        self
    }

    pub fn with_retrieval_top_k(mut self, top_k: u32) -> Self {
        self.retrieval_top_k = top_k;
        self
    }
}
