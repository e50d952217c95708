//! Job dependency resolution.

use pipeforge_core::{Node, PipelineGraph, Role};

/// Normalized identifiers of the jobs a node depends on.
///
/// Walks the edge list in order and keeps every edge ending at `node` whose
/// source is a job node. Edges from trigger nodes, and edges from identifiers
/// that match no node, contribute nothing. Cycles and self-edges pass through
/// verbatim.
#[must_use]
pub fn dependencies(graph: &PipelineGraph, node: &Node) -> Vec<String> {
    graph
        .incoming(&node.id)
        .filter_map(|edge| graph.node(&edge.source))
        .filter(|source| source.role() == Role::Job)
        .map(Node::job_id)
        .collect()
}
