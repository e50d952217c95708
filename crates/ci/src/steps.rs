//! Step synthesis.
//!
//! Produces the ordered, dialect-neutral plan of steps for one job. Each
//! emitter then renders the plan with its own [`crate::StepRenderer`]; a
//! dialect without an equivalent for a step renders it as nothing.

use pipeforge_core::{JobBlock, JobKind, Node};

/// A language or tool environment a job sets up before running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toolchain {
    /// Node.js at the given version
    Node(String),
    /// Python at the given version
    Python(String),
    /// Go at the given version
    Go(String),
    /// Docker with Buildx, building the given image name
    Docker(String),
}

impl Toolchain {
    /// The toolchain a job kind needs, if any
    #[must_use]
    pub fn for_kind(kind: &JobKind) -> Option<Self> {
        match kind {
            JobKind::NodeTest(s) | JobKind::NodeBuild(s) => Some(Self::Node(s.version().to_string())),
            JobKind::PythonTest(s) | JobKind::PythonBuild(s) => {
                Some(Self::Python(s.version().to_string()))
            }
            JobKind::GoBuild(s) => Some(Self::Go(s.version().to_string())),
            JobKind::DockerBuild(s) => Some(Self::Docker(s.image().to_string())),
            _ => None,
        }
    }

    /// Whether a package install follows the setup
    #[must_use]
    pub const fn installs_dependencies(&self) -> bool {
        matches!(self, Self::Node(_) | Self::Python(_))
    }
}

/// One planned step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Check out the repository
    Checkout,
    /// Install a toolchain
    Setup(Toolchain),
    /// Install the project's dependencies with the toolchain's package manager
    InstallDependencies(Toolchain),
    /// Restore the dependency cache
    CacheDependencies,
    /// A user-supplied command, labelled with the node's label
    Command {
        /// Step label
        label: String,
        /// Literal command line
        command: String,
    },
    /// The block type's built-in steps
    Builtin(JobKind),
}

/// Plan the steps of a job node.
///
/// 1. checkout, unless the configuration says `checkout: false`
/// 2. toolchain setup (and dependency install) for environment-bearing kinds
/// 3. dependency cache for `cache`
/// 4. either the custom command or the block's built-in steps, never both
///
/// Unknown block types get only the checkout.
#[must_use]
pub fn synthesize(node: &Node, job: &JobBlock) -> Vec<Step> {
    let mut steps = Vec::new();

    if job.options.checkout() {
        steps.push(Step::Checkout);
    }

    if !job.kind.is_known() {
        return steps;
    }

    if let Some(toolchain) = Toolchain::for_kind(&job.kind) {
        let installs = toolchain.installs_dependencies();
        steps.push(Step::Setup(toolchain.clone()));
        if installs {
            steps.push(Step::InstallDependencies(toolchain));
        }
    }

    if job.kind == JobKind::Cache {
        steps.push(Step::CacheDependencies);
    }

    steps.push(match job.options.command() {
        Some(command) => Step::Command {
            label: node.label.clone(),
            command: command.to_string(),
        },
        None => Step::Builtin(job.kind.clone()),
    });

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeforge_core::catalog::instantiate;
    use pipeforge_core::{JobOptions, PipelineGraph};

    fn plan(node: &Node) -> Vec<Step> {
        synthesize(node, node.as_job().unwrap())
    }

    #[test]
    fn test_node_test_plan() {
        let node = instantiate("node_test", "j1").unwrap();
        assert_eq!(
            plan(&node),
            vec![
                Step::Checkout,
                Step::Setup(Toolchain::Node("20".to_string())),
                Step::InstallDependencies(Toolchain::Node("20".to_string())),
                Step::Builtin(node.as_job().unwrap().kind.clone()),
            ]
        );
    }

    #[test]
    fn test_custom_command_replaces_builtin() {
        let mut node = instantiate("node_test", "j1").unwrap();
        if let pipeforge_core::Block::Job(job) = &mut node.block {
            job.options = job.options.clone().with_command("make ci");
        }
        let steps = plan(&node);
        assert!(!steps.iter().any(|s| matches!(s, Step::Builtin(_))));
        assert_eq!(
            steps.last(),
            Some(&Step::Command {
                label: "Node.js Tests".to_string(),
                command: "make ci".to_string(),
            })
        );
    }

    #[test]
    fn test_checkout_disabled() {
        let node = instantiate("notify_slack", "j1").unwrap();
        assert_eq!(plan(&node), vec![Step::Builtin(JobKind::NotifySlack)]);
    }

    #[test]
    fn test_cache_plan() {
        let node = instantiate("cache", "j1").unwrap();
        assert_eq!(
            plan(&node),
            vec![Step::CacheDependencies, Step::Builtin(JobKind::Cache)]
        );
    }

    #[test]
    fn test_go_has_no_install_step() {
        let node = instantiate("go_build", "j1").unwrap();
        let steps = plan(&node);
        assert!(steps.contains(&Step::Setup(Toolchain::Go("1.21".to_string()))));
        assert!(!steps.iter().any(|s| matches!(s, Step::InstallDependencies(_))));
    }

    #[test]
    fn test_docker_sets_up_buildx() {
        let node = instantiate("docker_build", "j1").unwrap();
        assert_eq!(plan(&node)[1], Step::Setup(Toolchain::Docker("my-app".to_string())));
    }

    #[test]
    fn test_unknown_block_only_checks_out() {
        let node = Node::job(
            "x1",
            "Terraform",
            JobBlock::new(
                JobKind::Unknown("terraform_apply".to_string()),
                JobOptions::default().with_command("terraform apply"),
            ),
        );
        assert_eq!(plan(&node), vec![Step::Checkout]);
    }

    #[test]
    fn test_synthesis_reads_graph_snapshot_only() {
        let graph = PipelineGraph::default().with_node(instantiate("lint", "j1").unwrap());
        let before = graph.clone();
        let (node, job) = graph.jobs().next().unwrap();
        let _ = synthesize(node, job);
        assert_eq!(graph, before);
    }
}
