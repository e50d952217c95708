//! Stage classification for stage-based dialects.

use pipeforge_core::PipelineGraph;
use serde::Serialize;
use std::fmt;

/// Semantic execution bucket of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Tests, linters, scanners and anything unclassified
    Test,
    /// Builds and caches
    Build,
    /// Deployments
    Deploy,
}

impl Stage {
    /// Stage name as written in CI configuration
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Build => "build",
            Self::Deploy => "deploy",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a block type.
///
/// Precedence: `deploy*` is deploy; anything containing `build`, plus
/// `cache`, is build; everything else, including unknown types, is test.
#[must_use]
pub fn classify(block_type: &str) -> Stage {
    if block_type.starts_with("deploy") {
        Stage::Deploy
    } else if block_type.contains("build") || block_type == "cache" {
        Stage::Build
    } else {
        Stage::Test
    }
}

/// Distinct stages of all job nodes in first-seen order.
///
/// The order is not forced into test, build, deploy.
#[must_use]
pub fn stage_order(graph: &PipelineGraph) -> Vec<Stage> {
    graph
        .jobs()
        .map(|(node, _)| classify(node.block_type()))
        .fold(Vec::new(), |mut stages, stage| {
            if !stages.contains(&stage) {
                stages.push(stage);
            }
            stages
        })
}
