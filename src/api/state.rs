//! Application state shared by request handlers

use std::sync::Arc;

use crate::domain::agent::WorkflowEngine;
use crate::domain::feedback::FeedbackRefiner;
use crate::domain::knowledge::KnowledgeStore;

/// Shared handles to the agent core. Everything is constructed once at
/// startup and injected here; handlers never reach for ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<WorkflowEngine>,
    pub refiner: Arc<FeedbackRefiner>,
    pub knowledge_store: Arc<dyn KnowledgeStore>,
}

impl AppState {
    pub fn new(
        engine: Arc<WorkflowEngine>,
        refiner: Arc<FeedbackRefiner>,
        knowledge_store: Arc<dyn KnowledgeStore>,
    ) -> Self {
        Self {
            engine,
            refiner,
            knowledge_store,
        }
    }
}
