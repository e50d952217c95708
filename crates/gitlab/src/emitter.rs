//! GitLab CI Pipeline Emitter
//!
//! Transforms a pipeline graph into `.gitlab-ci.yml`.

use crate::schema::{Cache, Job, Pipeline, Rule};
use pipeforge_ci::emitter::{EMPTY_CANVAS_PLACEHOLDER, Emitter, Format};
use pipeforge_ci::render::StepRenderer;
use pipeforge_ci::steps::{Step, Toolchain};
use pipeforge_ci::{classify, dependencies, stage_order, synthesize};
use pipeforge_core::block::DEFAULT_BRANCH;
use pipeforge_core::{JobKind, PipelineGraph};
use tracing::debug;

/// Image for jobs without a toolchain
pub const DEFAULT_IMAGE: &str = "ubuntu:latest";

/// GitLab CI pipeline emitter
///
/// # Graph to GitLab CI Mapping
///
/// | Graph | GitLab CI |
/// |-------|-----------|
/// | normalized job label | Job key |
/// | block type | `stage:` and `image:` |
/// | incoming edges from jobs | `needs:` |
/// | synthesized step plan | `script:` |
/// | first trigger `branch` | `rules: - if: $CI_COMMIT_BRANCH == ...` |
#[derive(Debug, Clone)]
pub struct GitLabCiEmitter {
    /// Image under `default:`
    pub default_image: String,
}

impl Default for GitLabCiEmitter {
    fn default() -> Self {
        Self {
            default_image: DEFAULT_IMAGE.to_string(),
        }
    }
}

impl GitLabCiEmitter {
    /// Create a new GitLab CI emitter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default image
    #[must_use]
    pub fn with_default_image(mut self, image: impl Into<String>) -> Self {
        self.default_image = image.into();
        self
    }

    /// Build the pipeline for a non-empty graph
    #[must_use]
    pub fn build_pipeline(&self, graph: &PipelineGraph) -> Pipeline {
        let branch = graph
            .trigger()
            .map_or(DEFAULT_BRANCH, |(_, trigger)| trigger.branch());

        let jobs: Vec<(String, Job)> = graph
            .jobs()
            .map(|(node, job)| {
                let plan = synthesize(node, job);
                let toolchain = Toolchain::for_kind(&job.kind);
                let rendered = Job {
                    stage: classify(node.block_type()),
                    image: toolchain.as_ref().map(image_for),
                    services: match toolchain {
                        Some(Toolchain::Docker(_)) => vec!["docker:dind".to_string()],
                        _ => Vec::new(),
                    },
                    needs: dependencies(graph, node),
                    cache: plan
                        .contains(&Step::CacheDependencies)
                        .then(npm_cache),
                    script: self.render_steps(&plan),
                    rules: vec![Rule::on_branch(branch)],
                };
                (node.job_id(), rendered)
            })
            .collect();

        let stages = stage_order(graph);
        debug!(stages = stages.len(), jobs = jobs.len(), branch, "Built GitLab CI pipeline");

        Pipeline {
            default_image: self.default_image.clone(),
            stages,
            jobs,
        }
    }

    fn render_builtin(kind: &JobKind) -> Vec<String> {
        let lines: &[&str] = match kind {
            JobKind::NodeTest(_) => &["npm ci", "npm test"],
            JobKind::NodeBuild(_) => &["npm ci", "npm run build"],
            JobKind::PythonTest(_) => &["pip install -r requirements.txt", "pytest"],
            JobKind::PythonBuild(_) => &["pip install build", "python -m build"],
            JobKind::GoBuild(_) => &["go build ./...", "go test ./..."],
            JobKind::Lint => &["npm ci", "npm run lint"],
            JobKind::SecurityScan => &["npm audit --audit-level=high"],
            JobKind::DockerBuild(settings) => {
                return vec![format!("docker build -t {}:latest .", settings.image())];
            }
            JobKind::DeployVercel => &["npx vercel --token=$VERCEL_TOKEN --prod"],
            JobKind::DeployAws => &["aws s3 sync ./build s3://my-bucket"],
            JobKind::DeployGcp => &["gcloud run deploy my-service --region us-central1 --source ."],
            JobKind::NotifySlack => &[
                r#"'curl -X POST -H "Content-type: application/json" --data "{\"text\":\"Pipeline complete\"}" $SLACK_WEBHOOK_URL'"#,
            ],
            JobKind::Cache => &["npm ci --cache .npm --prefer-offline"],
            JobKind::Unknown(_) => &[],
        };
        lines.iter().map(ToString::to_string).collect()
    }
}

fn image_for(toolchain: &Toolchain) -> String {
    match toolchain {
        Toolchain::Node(version) => format!("node:{version}-alpine"),
        Toolchain::Python(version) => format!("python:{version}-slim"),
        Toolchain::Go(version) => format!("golang:{version}"),
        Toolchain::Docker(_) => "docker:latest".to_string(),
    }
}

fn npm_cache() -> Cache {
    Cache {
        key: "${CI_COMMIT_REF_SLUG}".to_string(),
        paths: vec![".npm/".to_string()],
    }
}

impl StepRenderer for GitLabCiEmitter {
    type Output = String;

    // The image provides the toolchain, the default scripts install
    // dependencies themselves and the cache step only adds the job's `cache:`
    // section, so only commands render.
    fn render_step(&self, step: &Step) -> Vec<String> {
        match step {
            Step::Checkout
            | Step::Setup(_)
            | Step::InstallDependencies(_)
            | Step::CacheDependencies => Vec::new(),
            Step::Command { command, .. } => vec![command.clone()],
            Step::Builtin(kind) => Self::render_builtin(kind),
        }
    }
}

impl Emitter for GitLabCiEmitter {
    fn emit(&self, graph: &PipelineGraph) -> String {
        if graph.is_empty() {
            return EMPTY_CANVAS_PLACEHOLDER.to_string();
        }
        self.build_pipeline(graph).to_string()
    }

    fn format(&self) -> Format {
        Format::Gitlab
    }

    fn description(&self) -> &'static str {
        "GitLab CI pipeline emitter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeforge_core::catalog::instantiate;
    use pipeforge_core::{Block, JobBlock, JobOptions, Node, TriggerBlock, TriggerConfig};

    fn emit(graph: &PipelineGraph) -> String {
        GitLabCiEmitter::new().emit(graph)
    }

    fn with_command(mut node: Node, command: &str) -> Node {
        if let Block::Job(job) = &mut node.block {
            job.options = JobOptions::default().with_command(command);
        }
        node
    }

    #[test]
    fn test_empty_graph() {
        assert_eq!(emit(&PipelineGraph::default()), EMPTY_CANVAS_PLACEHOLDER);
    }

    #[test]
    fn test_trigger_only() {
        let graph = PipelineGraph::default().with_node(instantiate("trigger_push", "t1").unwrap());
        assert_eq!(
            emit(&graph),
            "# GitLab CI Pipeline\n# Generated by PipeForge\n\ndefault:\n  image: ubuntu:latest\n\nstages:\n\n\n"
        );
    }

    #[test]
    fn test_node_test_job() {
        let graph = PipelineGraph::default()
            .with_node(instantiate("trigger_push", "t1").unwrap())
            .with_node(instantiate("node_test", "j1").unwrap())
            .with_edge("t1", "j1");

        assert!(emit(&graph).ends_with(
            "stages:\n  - test\n\n\
             node_js_tests:\n  stage: test\n  image: node:20-alpine\n  script:\n    - npm ci\n    - npm test\n  rules:\n    - if: $CI_COMMIT_BRANCH == \"main\"\n\n"
        ));
    }

    #[test]
    fn test_branch_from_trigger() {
        let trigger = TriggerBlock::new(
            "trigger_push",
            TriggerConfig {
                trigger: Some("push".to_string()),
                branch: Some("release".to_string()),
                cron: None,
            },
        );
        let graph = PipelineGraph::default()
            .with_node(Node::trigger("t1", "Release", trigger))
            .with_node(instantiate("lint", "j1").unwrap());
        assert!(emit(&graph).contains("    - if: $CI_COMMIT_BRANCH == \"release\"\n"));
    }

    #[test]
    fn test_docker_job() {
        let graph = PipelineGraph::default().with_node(instantiate("docker_build", "j1").unwrap());
        assert!(emit(&graph).contains(
            "docker_build:\n  stage: build\n  image: docker:latest\n  services:\n    - docker:dind\n  script:\n    - docker build -t my-app:latest .\n"
        ));
    }

    #[test]
    fn test_custom_command_replaces_script() {
        let node = with_command(instantiate("docker_build", "j1").unwrap(), "make image");
        let output = emit(&PipelineGraph::default().with_node(node));
        assert!(output.contains("  script:\n    - make image\n  rules:\n"));
        assert!(!output.contains("docker build"));
    }

    #[test]
    fn test_needs_are_quoted() {
        let graph = pipeforge_core::templates::template("docker").unwrap();
        assert!(emit(&graph).contains("deploy_gcp:\n  stage: deploy\n  needs: [\"docker_build\"]\n"));
    }

    #[test]
    fn test_stages_first_seen() {
        let graph = PipelineGraph::default()
            .with_node(instantiate("deploy_aws", "j1").unwrap())
            .with_node(instantiate("node_build", "j2").unwrap())
            .with_node(instantiate("lint", "j3").unwrap());
        assert!(emit(&graph).contains("stages:\n  - deploy\n  - build\n  - test\n\n"));
    }

    #[test]
    fn test_cache_job() {
        let graph = PipelineGraph::default().with_node(instantiate("cache", "j1").unwrap());
        assert!(emit(&graph).contains(
            "cache_deps:\n  stage: build\n  cache:\n    key: ${CI_COMMIT_REF_SLUG}\n    paths:\n      - .npm/\n  script:\n    - npm ci --cache .npm --prefer-offline\n"
        ));
    }

    #[test]
    fn test_deploy_gcp_script() {
        let graph = PipelineGraph::default().with_node(instantiate("deploy_gcp", "j1").unwrap());
        assert!(emit(&graph).contains(
            "  script:\n    - gcloud run deploy my-service --region us-central1 --source .\n"
        ));
    }

    #[test]
    fn test_unknown_block() {
        let node = Node::job(
            "x1",
            "Terraform",
            JobBlock::new(
                JobKind::Unknown("terraform_apply".to_string()),
                JobOptions::default(),
            ),
        );
        let output = emit(&PipelineGraph::default().with_node(node));
        assert!(output.contains("terraform:\n  stage: test\n  script:\n  rules:\n"));
    }

    #[test]
    fn test_default_image_override() {
        let graph = PipelineGraph::default().with_node(instantiate("lint", "j1").unwrap());
        let output = GitLabCiEmitter::new()
            .with_default_image("alpine:3.20")
            .emit(&graph);
        assert!(output.contains("default:\n  image: alpine:3.20\n\n"));
    }
}
