//! Directed graph executor for the agent workflow

use std::collections::{HashMap, HashSet};

use tracing::info;

use super::nodes::AgentNodes;
use super::state::{RouteDecision, StateUpdate, WorkflowState};
use crate::domain::DomainError;

/// Named nodes of the agent graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    InputGuardrail,
    Retrieve,
    GradeDocuments,
    WebSearch,
    Generate,
    OutputGuardrail,
}

impl NodeId {
    /// Routing tags this node can emit, if it is a decision node
    fn emitted_tags(self) -> Option<&'static [RouteDecision]> {
        match self {
            Self::InputGuardrail => Some(&[RouteDecision::Continue, RouteDecision::End]),
            Self::GradeDocuments => Some(&[RouteDecision::Generate, RouteDecision::WebSearch]),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::InputGuardrail => "input_guardrail",
            Self::Retrieve => "retrieve",
            Self::GradeDocuments => "grade_documents",
            Self::WebSearch => "web_search",
            Self::Generate => "generate",
            Self::OutputGuardrail => "output_guardrail",
        }
    }
}

/// Successor of a node: another node or the terminal marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    Node(NodeId),
    End,
}

/// Outgoing edge of a node
#[derive(Debug, Clone)]
enum Edge {
    /// Single unconditional successor
    Direct(Next),
    /// Successor selected by the node's route decision
    Conditional(HashMap<RouteDecision, Next>),
}

/// Explicit transition table over the graph nodes, validated at
/// construction: every node has an edge, every tag a decision node can emit
/// has a mapped successor, and every successor exists in the table.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    entry: NodeId,
    edges: HashMap<NodeId, Edge>,
}

impl TransitionTable {
    fn new(entry: NodeId, edges: HashMap<NodeId, Edge>) -> Result<Self, DomainError> {
        let table = Self { entry, edges };
        table.validate()?;
        Ok(table)
    }

    /// The fixed agent topology:
    ///
    /// ```text
    /// input_guardrail --[continue]--> retrieve --> grade_documents
    /// input_guardrail --[end]-------> END
    /// grade_documents --[generate]----> generate
    /// grade_documents --[web_search]--> web_search --> generate
    /// generate --> output_guardrail --> END
    /// ```
    pub fn standard() -> Result<Self, DomainError> {
        let mut edges = HashMap::new();
        edges.insert(
            NodeId::InputGuardrail,
            Edge::Conditional(HashMap::from([
                (RouteDecision::Continue, Next::Node(NodeId::Retrieve)),
                (RouteDecision::End, Next::End),
            ])),
        );
        edges.insert(
            NodeId::Retrieve,
            Edge::Direct(Next::Node(NodeId::GradeDocuments)),
        );
        edges.insert(
            NodeId::GradeDocuments,
            Edge::Conditional(HashMap::from([
                (RouteDecision::Generate, Next::Node(NodeId::Generate)),
                (RouteDecision::WebSearch, Next::Node(NodeId::WebSearch)),
            ])),
        );
        edges.insert(
            NodeId::WebSearch,
            Edge::Direct(Next::Node(NodeId::Generate)),
        );
        edges.insert(
            NodeId::Generate,
            Edge::Direct(Next::Node(NodeId::OutputGuardrail)),
        );
        edges.insert(NodeId::OutputGuardrail, Edge::Direct(Next::End));

        Self::new(NodeId::InputGuardrail, edges)
    }

    pub fn entry(&self) -> NodeId {
        self.entry
    }

    fn validate(&self) -> Result<(), DomainError> {
        if !self.edges.contains_key(&self.entry) {
            return Err(DomainError::configuration(format!(
                "entry node '{}' has no edge",
                self.entry.as_str()
            )));
        }

        for (node, edge) in &self.edges {
            let successors: Vec<Next> = match edge {
                Edge::Direct(next) => vec![*next],
                Edge::Conditional(map) => {
                    let tags = node.emitted_tags().ok_or_else(|| {
                        DomainError::configuration(format!(
                            "node '{}' has conditional edges but emits no route decision",
                            node.as_str()
                        ))
                    })?;
                    for tag in tags {
                        if !map.contains_key(tag) {
                            return Err(DomainError::configuration(format!(
                                "node '{}' can emit tag {:?} with no mapped successor",
                                node.as_str(),
                                tag
                            )));
                        }
                    }
                    map.values().copied().collect()
                }
            };

            for next in successors {
                if let Next::Node(successor) = next {
                    if !self.edges.contains_key(&successor) {
                        return Err(DomainError::configuration(format!(
                            "node '{}' routes to unknown node '{}'",
                            node.as_str(),
                            successor.as_str()
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Resolve the successor of `node` given the current state
    fn next(&self, node: NodeId, state: &WorkflowState) -> Result<Next, DomainError> {
        let edge = self.edges.get(&node).ok_or_else(|| {
            DomainError::internal(format!("node '{}' has no edge", node.as_str()))
        })?;

        match edge {
            Edge::Direct(next) => Ok(*next),
            Edge::Conditional(map) => {
                let decision = state.route_decision.ok_or_else(|| {
                    DomainError::internal(format!(
                        "decision node '{}' set no route decision",
                        node.as_str()
                    ))
                })?;
                map.get(&decision).copied().ok_or_else(|| {
                    DomainError::internal(format!(
                        "no successor mapped for tag {:?} at node '{}'",
                        decision,
                        node.as_str()
                    ))
                })
            }
        }
    }
}

/// Finite-state machine executor threading a [`WorkflowState`] through the
/// transition table. Synchronous per invocation: nodes run strictly in the
/// order the table dictates, and no node runs more than once.
#[derive(Debug)]
pub struct WorkflowEngine {
    nodes: AgentNodes,
    table: TransitionTable,
}

impl WorkflowEngine {
    pub fn new(nodes: AgentNodes, table: TransitionTable) -> Self {
        Self { nodes, table }
    }

    /// Run the graph to its terminal marker and return the final state.
    /// By the terminal node `generation` is non-empty: either the
    /// guardrail's refusal or a model-produced answer.
    pub async fn execute(&self, mut state: WorkflowState) -> Result<WorkflowState, DomainError> {
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut current = self.table.entry();

        loop {
            if !visited.insert(current) {
                return Err(DomainError::internal(format!(
                    "node '{}' scheduled twice in one invocation",
                    current.as_str()
                )));
            }

            let update = self.run_node(current, &state).await?;
            state.apply(update);

            match self.table.next(current, &state)? {
                Next::End => break,
                Next::Node(next) => current = next,
            }
        }

        match state.generation.as_deref() {
            Some(generation) if !generation.is_empty() => {
                info!("workflow complete");
                Ok(state)
            }
            _ => Err(DomainError::internal(
                "workflow reached its terminal node without a generation",
            )),
        }
    }

    async fn run_node(
        &self,
        node: NodeId,
        state: &WorkflowState,
    ) -> Result<StateUpdate, DomainError> {
        match node {
            NodeId::InputGuardrail => self.nodes.input_guardrail(state).await,
            NodeId::Retrieve => self.nodes.retrieve(state).await,
            NodeId::GradeDocuments => self.nodes.grade_documents(state),
            NodeId::WebSearch => self.nodes.web_search(state).await,
            NodeId::Generate => self.nodes.generate(state).await,
            NodeId::OutputGuardrail => self.nodes.output_guardrail(state),
        }
    }
}
