//! Typed block configuration.
//!
//! The editor hands over configuration as an open string-keyed map. Here it is
//! parsed once into a tagged union with one variant per block type, so the
//! step synthesizer can match exhaustively instead of probing keys.

use crate::lenient;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Default branch used when a trigger does not name one
pub const DEFAULT_BRANCH: &str = "main";

/// Default cron expression for scheduled triggers
pub const DEFAULT_CRON: &str = "0 0 * * *";

/// Default trigger event when a trigger node does not name one
pub const DEFAULT_TRIGGER_EVENT: &str = "push";

/// A node's block: either a trigger or a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Decides when the pipeline runs
    Trigger(TriggerBlock),
    /// Compiled into a CI job
    Job(JobBlock),
}

impl Block {
    /// The block-type tag as written in graph documents
    #[must_use]
    pub fn block_type(&self) -> &str {
        match self {
            Self::Trigger(trigger) => &trigger.block_type,
            Self::Job(job) => job.kind.block_type(),
        }
    }

    /// Configuration as the flat map used by graph documents
    #[must_use]
    pub fn configuration(&self) -> Map<String, Value> {
        let mut map = Map::new();
        match self {
            Self::Trigger(trigger) => {
                put_text(&mut map, "trigger", trigger.config.trigger.as_deref());
                put_text(&mut map, "branch", trigger.config.branch.as_deref());
                put_text(&mut map, "cron", trigger.config.cron.as_deref());
            }
            Self::Job(job) => {
                match &job.kind {
                    JobKind::NodeTest(s) | JobKind::NodeBuild(s) => {
                        put_text(&mut map, "nodeVersion", s.node_version.as_deref());
                    }
                    JobKind::PythonTest(s) | JobKind::PythonBuild(s) => {
                        put_text(&mut map, "pythonVersion", s.python_version.as_deref());
                    }
                    JobKind::GoBuild(s) => {
                        put_text(&mut map, "goVersion", s.go_version.as_deref());
                    }
                    JobKind::DockerBuild(s) => {
                        put_text(&mut map, "imageName", s.image_name.as_deref());
                    }
                    _ => {}
                }
                if let Some(checkout) = job.options.checkout {
                    map.insert("checkout".to_string(), Value::Bool(checkout));
                }
                put_text(&mut map, "runsOn", job.options.runs_on.as_deref());
                put_text(&mut map, "command", job.options.command.as_deref());
            }
        }
        map
    }
}

fn put_text(map: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        map.insert(key.to_string(), Value::String(value.to_string()));
    }
}

/// A trigger block and its configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerBlock {
    /// Catalog block type (`trigger_push`, `trigger_pr`, ...)
    pub block_type: String,
    /// Trigger settings
    pub config: TriggerConfig,
}

impl TriggerBlock {
    /// Create a trigger block
    pub fn new(block_type: impl Into<String>, config: TriggerConfig) -> Self {
        Self {
            block_type: block_type.into(),
            config,
        }
    }

    /// The event that starts the pipeline, `push` when unset
    #[must_use]
    pub fn event(&self) -> TriggerEvent {
        TriggerEvent::parse(
            self.config
                .trigger
                .as_deref()
                .unwrap_or(DEFAULT_TRIGGER_EVENT),
        )
    }

    /// Branch filter, `main` when unset
    #[must_use]
    pub fn branch(&self) -> &str {
        self.config.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }

    /// Cron expression, daily at midnight when unset
    #[must_use]
    pub fn cron(&self) -> &str {
        self.config.cron.as_deref().unwrap_or(DEFAULT_CRON)
    }
}

/// Trigger configuration as supplied by the editor
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TriggerConfig {
    /// Event name (`push`, `pull_request`, `schedule` or any literal event)
    #[serde(default, deserialize_with = "lenient::text")]
    pub trigger: Option<String>,
    /// Branch to filter on
    #[serde(default, deserialize_with = "lenient::text")]
    pub branch: Option<String>,
    /// Cron expression for scheduled triggers
    #[serde(default, deserialize_with = "lenient::text")]
    pub cron: Option<String>,
}

/// The event a trigger listens for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Branch push
    Push,
    /// Pull request against a branch
    PullRequest,
    /// Cron schedule
    Schedule,
    /// Any other event name, passed through untouched
    Other(String),
}

impl TriggerEvent {
    /// Parse an event name
    #[must_use]
    pub fn parse(event: &str) -> Self {
        match event {
            "push" => Self::Push,
            "pull_request" => Self::PullRequest,
            "schedule" => Self::Schedule,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A job block: what it does plus options shared by every job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobBlock {
    /// Block-specific behaviour and settings
    pub kind: JobKind,
    /// Options every job carries
    pub options: JobOptions,
}

impl JobBlock {
    /// Create a job block
    #[must_use]
    pub const fn new(kind: JobKind, options: JobOptions) -> Self {
        Self { kind, options }
    }
}

/// Options shared by every job block
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOptions {
    /// Whether to check out sources first; only an explicit `false` disables it
    #[serde(default, deserialize_with = "lenient::flag")]
    pub checkout: Option<bool>,
    /// Runner label
    #[serde(default, deserialize_with = "lenient::text")]
    pub runs_on: Option<String>,
    /// Custom command replacing the block's default steps
    #[serde(default, deserialize_with = "lenient::text")]
    pub command: Option<String>,
}

impl JobOptions {
    /// Whether a checkout step is emitted
    #[must_use]
    pub fn checkout(&self) -> bool {
        self.checkout != Some(false)
    }

    /// Configured runner, if any
    #[must_use]
    pub fn runs_on(&self) -> Option<&str> {
        self.runs_on.as_deref()
    }

    /// Custom command, if any
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// Enable or disable checkout
    #[must_use]
    pub const fn with_checkout(mut self, checkout: bool) -> Self {
        self.checkout = Some(checkout);
        self
    }

    /// Set the custom command
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set the runner label
    #[must_use]
    pub fn with_runs_on(mut self, runner: impl Into<String>) -> Self {
        self.runs_on = Some(runner.into());
        self
    }
}

/// Node.js toolchain settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSettings {
    /// Node.js version
    #[serde(default, deserialize_with = "lenient::text")]
    pub node_version: Option<String>,
}

impl NodeSettings {
    /// Default Node.js version
    pub const DEFAULT_VERSION: &'static str = "20";

    /// Configured version or the default
    #[must_use]
    pub fn version(&self) -> &str {
        self.node_version.as_deref().unwrap_or(Self::DEFAULT_VERSION)
    }
}

/// Python toolchain settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PythonSettings {
    /// Python version
    #[serde(default, deserialize_with = "lenient::text")]
    pub python_version: Option<String>,
}

impl PythonSettings {
    /// Default Python version
    pub const DEFAULT_VERSION: &'static str = "3.11";

    /// Configured version or the default
    #[must_use]
    pub fn version(&self) -> &str {
        self.python_version
            .as_deref()
            .unwrap_or(Self::DEFAULT_VERSION)
    }
}

/// Go toolchain settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoSettings {
    /// Go version
    #[serde(default, deserialize_with = "lenient::text")]
    pub go_version: Option<String>,
}

impl GoSettings {
    /// Default Go version
    pub const DEFAULT_VERSION: &'static str = "1.21";

    /// Configured version or the default
    #[must_use]
    pub fn version(&self) -> &str {
        self.go_version.as_deref().unwrap_or(Self::DEFAULT_VERSION)
    }
}

/// Docker image settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerSettings {
    /// Image name to build and tag
    #[serde(default, deserialize_with = "lenient::text")]
    pub image_name: Option<String>,
}

impl DockerSettings {
    /// Default image name
    pub const DEFAULT_IMAGE: &'static str = "my-app";

    /// Configured image name or the default
    #[must_use]
    pub fn image(&self) -> &str {
        self.image_name.as_deref().unwrap_or(Self::DEFAULT_IMAGE)
    }
}

/// Every recognised job block type, each with its own settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKind {
    /// `node_test`
    NodeTest(NodeSettings),
    /// `node_build`
    NodeBuild(NodeSettings),
    /// `python_test`
    PythonTest(PythonSettings),
    /// `python_build`
    PythonBuild(PythonSettings),
    /// `go_build`
    GoBuild(GoSettings),
    /// `docker_build`
    DockerBuild(DockerSettings),
    /// `lint`
    Lint,
    /// `security_scan`
    SecurityScan,
    /// `cache`
    Cache,
    /// `deploy_vercel`
    DeployVercel,
    /// `deploy_aws`
    DeployAws,
    /// `deploy_gcp`
    DeployGcp,
    /// `notify_slack`
    NotifySlack,
    /// Any block type the catalog does not know
    Unknown(String),
}

impl JobKind {
    /// The block-type tag
    #[must_use]
    pub fn block_type(&self) -> &str {
        match self {
            Self::NodeTest(_) => "node_test",
            Self::NodeBuild(_) => "node_build",
            Self::PythonTest(_) => "python_test",
            Self::PythonBuild(_) => "python_build",
            Self::GoBuild(_) => "go_build",
            Self::DockerBuild(_) => "docker_build",
            Self::Lint => "lint",
            Self::SecurityScan => "security_scan",
            Self::Cache => "cache",
            Self::DeployVercel => "deploy_vercel",
            Self::DeployAws => "deploy_aws",
            Self::DeployGcp => "deploy_gcp",
            Self::NotifySlack => "notify_slack",
            Self::Unknown(block_type) => block_type,
        }
    }

    /// Whether the catalog recognises this block type
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Parse the block-specific part of a configuration map
    ///
    /// # Errors
    ///
    /// Returns the serde error when a field has the wrong shape.
    pub fn parse(block_type: &str, configuration: &Value) -> serde_json::Result<Self> {
        Ok(match block_type {
            "node_test" => Self::NodeTest(serde_json::from_value(configuration.clone())?),
            "node_build" => Self::NodeBuild(serde_json::from_value(configuration.clone())?),
            "python_test" => Self::PythonTest(serde_json::from_value(configuration.clone())?),
            "python_build" => Self::PythonBuild(serde_json::from_value(configuration.clone())?),
            "go_build" => Self::GoBuild(serde_json::from_value(configuration.clone())?),
            "docker_build" => Self::DockerBuild(serde_json::from_value(configuration.clone())?),
            "lint" => Self::Lint,
            "security_scan" => Self::SecurityScan,
            "cache" => Self::Cache,
            "deploy_vercel" => Self::DeployVercel,
            "deploy_aws" => Self::DeployAws,
            "deploy_gcp" => Self::DeployGcp,
            "notify_slack" => Self::NotifySlack,
            other => Self::Unknown(other.to_string()),
        })
    }
}
