//! Graph diagnostics.
//!
//! The emitters are permissive: cycles, colliding job identifiers, extra
//! triggers and dangling edges are all passed through into the output. This
//! module reports those conditions so callers can warn about them, without
//! changing what gets emitted.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use pipeforge_core::{NodeId, PipelineGraph, Role};
use std::collections::HashMap;
use thiserror::Error;

/// A condition the emitters tolerate but the user probably did not intend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphWarning {
    /// More than one trigger node; only the first is honored
    #[error("Multiple trigger nodes: '{honored}' is used, ignoring {}", ignored.join(", "))]
    MultipleTriggers {
        /// Trigger node that decides when the pipeline runs
        honored: String,
        /// Later trigger nodes
        ignored: Vec<String>,
    },

    /// Several job nodes normalize to the same key
    #[error("Job id '{job_id}' is emitted more than once (nodes {})", nodes.join(", "))]
    DuplicateJobId {
        /// The colliding key
        job_id: String,
        /// Nodes that produce it
        nodes: Vec<String>,
    },

    /// An edge endpoint matches no node
    #[error("Edge '{from}' -> '{to}' references unknown node '{missing}'")]
    DanglingEdge {
        /// Edge source
        from: String,
        /// Edge target
        to: String,
        /// The endpoint with no node
        missing: String,
    },

    /// Jobs whose `needs` form a cycle
    #[error("Jobs depend on each other in a cycle: {}", jobs.join(" -> "))]
    DependencyCycle {
        /// Job ids in the cycle
        jobs: Vec<String>,
    },

    /// A job block type outside the catalog
    #[error("Node '{node}' has unknown block type '{block_type}'; only a checkout step is emitted")]
    UnknownBlockType {
        /// Node id
        node: String,
        /// Unrecognised block type
        block_type: String,
    },
}

/// Inspect a graph for conditions the emitters pass through silently.
///
/// Warnings come out grouped by kind, each group in graph order.
#[must_use]
pub fn diagnose(graph: &PipelineGraph) -> Vec<GraphWarning> {
    let mut warnings = Vec::new();
    check_triggers(graph, &mut warnings);
    check_block_types(graph, &mut warnings);
    check_job_ids(graph, &mut warnings);
    check_edges(graph, &mut warnings);
    check_cycles(graph, &mut warnings);
    warnings
}

fn check_triggers(graph: &PipelineGraph, warnings: &mut Vec<GraphWarning>) {
    let mut triggers = graph.triggers().map(|(node, _)| node.id.to_string());
    if let Some(honored) = triggers.next() {
        let ignored: Vec<String> = triggers.collect();
        if !ignored.is_empty() {
            warnings.push(GraphWarning::MultipleTriggers { honored, ignored });
        }
    }
}

fn check_block_types(graph: &PipelineGraph, warnings: &mut Vec<GraphWarning>) {
    for (node, job) in graph.jobs() {
        if !job.kind.is_known() {
            warnings.push(GraphWarning::UnknownBlockType {
                node: node.id.to_string(),
                block_type: job.kind.block_type().to_string(),
            });
        }
    }
}

fn check_job_ids(graph: &PipelineGraph, warnings: &mut Vec<GraphWarning>) {
    let mut seen: Vec<(String, Vec<String>)> = Vec::new();
    for (node, _) in graph.jobs() {
        let job_id = node.job_id();
        match seen.iter_mut().find(|(id, _)| *id == job_id) {
            Some((_, nodes)) => nodes.push(node.id.to_string()),
            None => seen.push((job_id, vec![node.id.to_string()])),
        }
    }
    warnings.extend(
        seen.into_iter()
            .filter(|(_, nodes)| nodes.len() > 1)
            .map(|(job_id, nodes)| GraphWarning::DuplicateJobId { job_id, nodes }),
    );
}

fn check_edges(graph: &PipelineGraph, warnings: &mut Vec<GraphWarning>) {
    for edge in &graph.edges {
        let missing = [&edge.source, &edge.target]
            .into_iter()
            .find(|id| graph.node(id).is_none());
        if let Some(missing) = missing {
            warnings.push(GraphWarning::DanglingEdge {
                from: edge.source.to_string(),
                to: edge.target.to_string(),
                missing: missing.to_string(),
            });
        }
    }
}

fn check_cycles(graph: &PipelineGraph, warnings: &mut Vec<GraphWarning>) {
    let mut dag: DiGraph<String, ()> = DiGraph::new();
    let mut index: HashMap<&NodeId, NodeIndex> = HashMap::new();

    for (node, _) in graph.jobs() {
        if !index.contains_key(&node.id) {
            index.insert(&node.id, dag.add_node(node.job_id()));
        }
    }

    for edge in &graph.edges {
        let is_job = |id: &NodeId| graph.node(id).is_some_and(|n| n.role() == Role::Job);
        if !is_job(&edge.source) || !is_job(&edge.target) {
            continue;
        }
        if let (Some(&from), Some(&to)) = (index.get(&edge.source), index.get(&edge.target)) {
            dag.add_edge(from, to, ());
        }
    }

    let mut cycles: Vec<Vec<NodeIndex>> = tarjan_scc(&dag)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || dag.contains_edge(component[0], component[0])
        })
        .map(|mut component| {
            component.sort_unstable();
            component
        })
        .collect();
    cycles.sort_unstable_by_key(|component| component[0]);

    warnings.extend(cycles.into_iter().map(|component| GraphWarning::DependencyCycle {
        jobs: component.into_iter().map(|i| dag[i].clone()).collect(),
    }));
}
