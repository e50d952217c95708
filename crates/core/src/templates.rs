//! Starter pipelines.
//!
//! Each template is a trigger followed by a small chain of jobs, built from
//! catalog defaults so templates and freshly placed blocks never drift apart.

use crate::catalog;
use crate::graph::{Node, PipelineGraph};

/// A named starter pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Lookup key
    pub name: &'static str,
    /// Display title
    pub title: &'static str,
    blocks: &'static [(&'static str, &'static str)],
    edges: &'static [(&'static str, &'static str)],
}

impl Template {
    /// Build the template's graph
    #[must_use]
    pub fn graph(&self) -> PipelineGraph {
        let nodes: Vec<Node> = self
            .blocks
            .iter()
            .filter_map(|(id, block_type)| catalog::instantiate(block_type, *id))
            .collect();
        self.edges
            .iter()
            .fold(PipelineGraph::new(nodes, Vec::new()), |graph, (source, target)| {
                graph.with_edge(*source, *target)
            })
    }
}

static TEMPLATES: [Template; 4] = [
    Template {
        name: "nodejs",
        title: "Node.js App",
        blocks: &[
            ("t1", "trigger_push"),
            ("j1", "lint"),
            ("j2", "node_test"),
            ("j3", "node_build"),
            ("j4", "deploy_vercel"),
        ],
        edges: &[("t1", "j1"), ("t1", "j2"), ("j1", "j3"), ("j2", "j3"), ("j3", "j4")],
    },
    Template {
        name: "python",
        title: "Python App",
        blocks: &[
            ("t1", "trigger_push"),
            ("j1", "security_scan"),
            ("j2", "python_test"),
            ("j3", "python_build"),
            ("j4", "deploy_aws"),
        ],
        edges: &[("t1", "j1"), ("t1", "j2"), ("j1", "j3"), ("j2", "j3"), ("j3", "j4")],
    },
    Template {
        name: "docker",
        title: "Docker",
        blocks: &[
            ("t1", "trigger_push"),
            ("j1", "security_scan"),
            ("j2", "docker_build"),
            ("j3", "deploy_gcp"),
        ],
        edges: &[("t1", "j1"), ("j1", "j2"), ("j2", "j3")],
    },
    Template {
        name: "fullstack",
        title: "Full Stack",
        blocks: &[
            ("t1", "trigger_pr"),
            ("j1", "lint"),
            ("j2", "node_test"),
            ("j3", "security_scan"),
            ("j4", "node_build"),
            ("j5", "deploy_vercel"),
            ("j6", "notify_slack"),
        ],
        edges: &[
            ("t1", "j1"),
            ("t1", "j2"),
            ("t1", "j3"),
            ("j1", "j4"),
            ("j2", "j4"),
            ("j3", "j4"),
            ("j4", "j5"),
            ("j4", "j6"),
        ],
    },
];

/// All templates
#[must_use]
pub fn templates() -> &'static [Template] {
    &TEMPLATES
}

/// Build a template's graph by name
#[must_use]
pub fn template(name: &str) -> Option<PipelineGraph> {
    TEMPLATES.iter().find(|t| t.name == name).map(Template::graph)
}
