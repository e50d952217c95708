//! GitHub Actions Workflow Emitter
//!
//! Transforms a pipeline graph into a GitHub Actions workflow file.

use crate::workflow::schema::{Job, Step, Workflow, WorkflowTrigger};
use pipeforge_ci::emitter::{EMPTY_CANVAS_PLACEHOLDER, Emitter, Format};
use pipeforge_ci::render::StepRenderer;
use pipeforge_ci::steps::{self, Toolchain};
use pipeforge_ci::{dependencies, synthesize};
use pipeforge_core::{JobKind, PipelineGraph, TriggerBlock, TriggerEvent};
use tracing::debug;

/// Workflow name used when there is no trigger node or its label is empty
pub const DEFAULT_WORKFLOW_NAME: &str = "My Pipeline";

/// Runner used when a job does not configure one
pub const DEFAULT_RUNNER: &str = "ubuntu-latest";

/// GitHub Actions workflow emitter
///
/// # Graph to GitHub Actions Mapping
///
/// | Graph | GitHub Actions |
/// |-------|----------------|
/// | first trigger label | Workflow `name:` |
/// | trigger `trigger` / `branch` / `cron` | `on:` |
/// | normalized job label | Job key |
/// | job `runsOn` | `runs-on:` |
/// | incoming edges from jobs | `needs:` |
/// | synthesized step plan | `steps:` |
#[derive(Debug, Clone)]
pub struct GitHubActionsEmitter {
    /// Default runner for jobs
    pub runner: String,
}

impl Default for GitHubActionsEmitter {
    fn default() -> Self {
        Self {
            runner: DEFAULT_RUNNER.to_string(),
        }
    }
}

impl GitHubActionsEmitter {
    /// Create a new GitHub Actions emitter with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default runner for jobs
    #[must_use]
    pub fn with_runner(mut self, runner: impl Into<String>) -> Self {
        self.runner = runner.into();
        self
    }

    /// Build the workflow for a non-empty graph
    #[must_use]
    pub fn build_workflow(&self, graph: &PipelineGraph) -> Workflow {
        let trigger = graph.trigger();

        let name = trigger
            .map(|(node, _)| node.label.as_str())
            .filter(|label| !label.is_empty())
            .unwrap_or(DEFAULT_WORKFLOW_NAME)
            .to_string();

        let jobs = self.build_jobs(graph);
        debug!(workflow = %name, jobs = jobs.len(), "Built GitHub Actions workflow");

        Workflow {
            name,
            on: Self::build_trigger(trigger.map(|(_, t)| t)),
            jobs,
        }
    }

    fn build_trigger(trigger: Option<&TriggerBlock>) -> WorkflowTrigger {
        let Some(trigger) = trigger else {
            return WorkflowTrigger::Branch {
                event: "push".to_string(),
                branch: pipeforge_core::block::DEFAULT_BRANCH.to_string(),
            };
        };

        match trigger.event() {
            TriggerEvent::Push => WorkflowTrigger::Branch {
                event: "push".to_string(),
                branch: trigger.branch().to_string(),
            },
            TriggerEvent::PullRequest => WorkflowTrigger::Branch {
                event: "pull_request".to_string(),
                branch: trigger.branch().to_string(),
            },
            TriggerEvent::Schedule => WorkflowTrigger::Schedule {
                cron: trigger.cron().to_string(),
            },
            TriggerEvent::Other(event) => WorkflowTrigger::Event(event),
        }
    }

    fn build_jobs(&self, graph: &PipelineGraph) -> Vec<(String, Job)> {
        graph
            .jobs()
            .map(|(node, job)| {
                let plan = synthesize(node, job);
                let rendered = Job {
                    runs_on: job.options.runs_on().unwrap_or(&self.runner).to_string(),
                    needs: dependencies(graph, node),
                    steps: self.render_steps(&plan),
                };
                (node.job_id(), rendered)
            })
            .collect()
    }

    fn render_builtin(kind: &JobKind) -> Vec<Step> {
        match kind {
            JobKind::NodeTest(_) => vec![Step::run("Run tests", "npm test")],
            JobKind::NodeBuild(_) => vec![Step::run("Build application", "npm run build")],
            JobKind::PythonTest(_) => vec![Step::run("Run tests", "pytest")],
            JobKind::PythonBuild(_) => vec![Step::run("Build package", "python -m build")],
            JobKind::GoBuild(_) => vec![
                Step::run("Build", "go build ./..."),
                Step::run("Test", "go test ./..."),
            ],
            JobKind::Lint => vec![Step::run("Run linter", "npm run lint")],
            JobKind::SecurityScan => vec![
                Step::uses("Security scan", "snyk/actions/node@master")
                    .with_env("SNYK_TOKEN", "${{ secrets.SNYK_TOKEN }}"),
            ],
            JobKind::DeployVercel => vec![
                Step::uses("Deploy to Vercel", "amondnet/vercel-action@v25")
                    .with_input("vercel-token", "${{ secrets.VERCEL_TOKEN }}")
                    .with_input("vercel-org-id", "${{ secrets.ORG_ID }}")
                    .with_input("vercel-project-id", "${{ secrets.PROJECT_ID }}"),
            ],
            JobKind::DeployAws => vec![
                Step::uses("Deploy to AWS", "aws-actions/configure-aws-credentials@v4")
                    .with_input("aws-access-key-id", "${{ secrets.AWS_ACCESS_KEY_ID }}")
                    .with_input("aws-secret-access-key", "${{ secrets.AWS_SECRET_ACCESS_KEY }}")
                    .with_input("aws-region", "us-east-1"),
            ],
            JobKind::DeployGcp => vec![
                Step::uses("Deploy to GCP", "google-github-actions/deploy-cloudrun@v1")
                    .with_input("service", "my-service")
                    .with_input("region", "us-central1")
                    .with_input("credentials", "${{ secrets.GCP_CREDENTIALS }}"),
            ],
            JobKind::NotifySlack => vec![
                Step::uses("Notify Slack", "slackapi/slack-github-action@v1.26.0")
                    .with_input(
                        "payload",
                        r#"'{"text":"Pipeline completed for ${{ github.repository }}"}'"#,
                    )
                    .with_env("SLACK_WEBHOOK_URL", "${{ secrets.SLACK_WEBHOOK_URL }}"),
            ],
            // docker build runs with the Buildx setup; the cache action is its own step
            JobKind::DockerBuild(_) | JobKind::Cache | JobKind::Unknown(_) => Vec::new(),
        }
    }
}

impl StepRenderer for GitHubActionsEmitter {
    type Output = Step;

    fn render_step(&self, step: &steps::Step) -> Vec<Step> {
        match step {
            steps::Step::Checkout => vec![Step::uses("Checkout code", "actions/checkout@v4")],
            steps::Step::Setup(Toolchain::Node(version)) => vec![
                Step::uses("Setup Node.js", "actions/setup-node@v4")
                    .with_input("node-version", format!("\"{version}\"")),
            ],
            steps::Step::Setup(Toolchain::Python(version)) => vec![
                Step::uses("Setup Python", "actions/setup-python@v4")
                    .with_input("python-version", format!("\"{version}\"")),
            ],
            steps::Step::Setup(Toolchain::Go(version)) => vec![
                Step::uses("Setup Go", "actions/setup-go@v4")
                    .with_input("go-version", format!("\"{version}\"")),
            ],
            steps::Step::Setup(Toolchain::Docker(image)) => vec![
                Step::uses("Set up Docker Buildx", "docker/setup-buildx-action@v3"),
                Step::run("Build Docker image", format!("docker build -t {image}:latest .")),
            ],
            steps::Step::InstallDependencies(Toolchain::Node(_)) => {
                vec![Step::run("Install dependencies", "npm ci")]
            }
            steps::Step::InstallDependencies(Toolchain::Python(_)) => {
                vec![Step::run("Install dependencies", "pip install -r requirements.txt")]
            }
            steps::Step::InstallDependencies(_) => Vec::new(),
            steps::Step::CacheDependencies => vec![
                Step::uses("Cache dependencies", "actions/cache@v3")
                    .with_input("path", "~/.npm")
                    .with_input(
                        "key",
                        "${{ runner.os }}-node-${{ hashFiles('**/package-lock.json') }}",
                    ),
            ],
            steps::Step::Command { label, command } => vec![Step::run(label, command)],
            steps::Step::Builtin(kind) => Self::render_builtin(kind),
        }
    }
}

impl Emitter for GitHubActionsEmitter {
    fn emit(&self, graph: &PipelineGraph) -> String {
        if graph.is_empty() {
            return EMPTY_CANVAS_PLACEHOLDER.to_string();
        }
        self.build_workflow(graph).to_string()
    }

    fn format(&self) -> Format {
        Format::Github
    }

    fn description(&self) -> &'static str {
        "GitHub Actions workflow emitter"
    }
}
