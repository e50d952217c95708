//! The pipeline graph model.
//!
//! A [`PipelineGraph`] is an ordered list of nodes and an ordered list of
//! directed edges. Order is insertion order and matters: the first trigger
//! node wins and jobs are emitted in node order. Nothing here enforces that
//! edges reference existing nodes, that the graph is acyclic, or that labels
//! normalize to distinct identifiers.

use crate::block::{Block, JobBlock, JobKind, JobOptions, TriggerBlock, TriggerConfig};
use crate::error::Error;
use crate::ident::normalize;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque node identifier assigned by the editor
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Whether a node is a trigger or a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Decides when the pipeline runs
    Trigger,
    /// Compiled into a CI job
    Job,
}

/// A placed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NodeDocument", into = "NodeDocument")]
pub struct Node {
    /// Editor-assigned identity
    pub id: NodeId,
    /// Display label; also the source of the emitted job key
    pub label: String,
    /// Block type and its typed configuration
    pub block: Block,
}

impl Node {
    /// Create a node
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, block: Block) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            block,
        }
    }

    /// Create a trigger node
    pub fn trigger(id: impl Into<NodeId>, label: impl Into<String>, trigger: TriggerBlock) -> Self {
        Self::new(id, label, Block::Trigger(trigger))
    }

    /// Create a job node
    pub fn job(id: impl Into<NodeId>, label: impl Into<String>, job: JobBlock) -> Self {
        Self::new(id, label, Block::Job(job))
    }

    /// The node's role
    #[must_use]
    pub const fn role(&self) -> Role {
        match self.block {
            Block::Trigger(_) => Role::Trigger,
            Block::Job(_) => Role::Job,
        }
    }

    /// The block-type tag
    #[must_use]
    pub fn block_type(&self) -> &str {
        self.block.block_type()
    }

    /// The normalized identifier used as the emitted job key
    #[must_use]
    pub fn job_id(&self) -> String {
        normalize(&self.label)
    }

    /// The job block, if this is a job node
    #[must_use]
    pub const fn as_job(&self) -> Option<&JobBlock> {
        match &self.block {
            Block::Job(job) => Some(job),
            Block::Trigger(_) => None,
        }
    }

    /// The trigger block, if this is a trigger node
    #[must_use]
    pub const fn as_trigger(&self) -> Option<&TriggerBlock> {
        match &self.block {
            Block::Trigger(trigger) => Some(trigger),
            Block::Job(_) => None,
        }
    }
}

/// Wire shape of a node, matching the editor's input contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeDocument {
    id: NodeId,
    role: Role,
    block_type: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    configuration: Map<String, Value>,
}

impl TryFrom<NodeDocument> for Node {
    type Error = Error;

    fn try_from(doc: NodeDocument) -> Result<Self, Self::Error> {
        let configuration = Value::Object(doc.configuration);
        let invalid = |e: serde_json::Error| {
            Error::configuration(doc.id.as_str(), &doc.block_type, e.to_string())
        };

        let block = match doc.role {
            Role::Trigger => {
                let config: TriggerConfig =
                    serde_json::from_value(configuration).map_err(invalid)?;
                Block::Trigger(TriggerBlock::new(doc.block_type.clone(), config))
            }
            Role::Job => {
                let kind = JobKind::parse(&doc.block_type, &configuration).map_err(invalid)?;
                let options: JobOptions =
                    serde_json::from_value(configuration).map_err(invalid)?;
                Block::Job(JobBlock::new(kind, options))
            }
        };

        Ok(Self {
            id: doc.id,
            label: doc.label,
            block,
        })
    }
}

impl From<Node> for NodeDocument {
    fn from(node: Node) -> Self {
        Self {
            role: node.role(),
            block_type: node.block_type().to_string(),
            configuration: node.block.configuration(),
            id: node.id,
            label: node.label,
        }
    }
}

/// A directed edge between two node identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Upstream node
    pub source: NodeId,
    /// Downstream node
    pub target: NodeId,
}

impl Edge {
    /// Create an edge
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A snapshot of the editor's graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineGraph {
    /// Nodes in insertion order
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Edges in insertion order
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl PipelineGraph {
    /// Create a graph from nodes and edges
    #[must_use]
    pub const fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Append a node
    #[must_use]
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Append an edge
    #[must_use]
    pub fn with_edge(mut self, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        self.edges.push(Edge::new(source, target));
        self
    }

    /// Whether the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node with the given identifier
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// The pipeline trigger: the first trigger node in sequence order.
    ///
    /// Later trigger nodes are ignored by the emitters.
    #[must_use]
    pub fn trigger(&self) -> Option<(&Node, &TriggerBlock)> {
        self.triggers().next()
    }

    /// All trigger nodes in sequence order
    pub fn triggers(&self) -> impl Iterator<Item = (&Node, &TriggerBlock)> {
        self.nodes
            .iter()
            .filter_map(|n| n.as_trigger().map(|t| (n, t)))
    }

    /// All job nodes in sequence order
    pub fn jobs(&self) -> impl Iterator<Item = (&Node, &JobBlock)> {
        self.nodes.iter().filter_map(|n| n.as_job().map(|j| (n, j)))
    }

    /// Edges pointing at the given node, in edge order
    pub fn incoming<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| &e.target == id)
    }
}
