//! The static block catalog.
//!
//! Each entry describes one block kind and the configuration a freshly placed
//! block starts with. The editor copies those defaults into the node and then
//! overrides them option by option.

use crate::block::{
    Block, DockerSettings, GoSettings, JobBlock, JobKind, JobOptions, NodeSettings,
    PythonSettings, TriggerBlock, TriggerConfig,
};
use crate::graph::{Node, NodeId, Role};
use serde::Serialize;
use std::fmt;

/// Palette grouping for catalog entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Pipeline triggers
    Triggers,
    /// Tests, linters and scanners
    TestAndQuality,
    /// Builds and caching
    Build,
    /// Deployments and notifications
    Deploy,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Triggers => "Triggers",
            Self::TestAndQuality => "Test & Quality",
            Self::Build => "Build",
            Self::Deploy => "Deploy",
        })
    }
}

/// Metadata for one block kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Block-type tag
    pub block_type: &'static str,
    /// Trigger or job
    pub role: Role,
    /// Default label for placed blocks
    pub label: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Palette grouping
    pub category: Category,
}

impl CatalogEntry {
    /// The block with this entry's default configuration
    #[must_use]
    pub fn default_block(&self) -> Block {
        let checkout = JobOptions::default().with_checkout(true);
        let no_checkout = JobOptions::default().with_checkout(false);
        let trigger = |event: &str, branch: Option<&str>, cron: Option<&str>| {
            Block::Trigger(TriggerBlock::new(
                self.block_type,
                TriggerConfig {
                    trigger: Some(event.to_string()),
                    branch: branch.map(str::to_string),
                    cron: cron.map(str::to_string),
                },
            ))
        };
        let node = || NodeSettings {
            node_version: Some(NodeSettings::DEFAULT_VERSION.to_string()),
        };
        let python = || PythonSettings {
            python_version: Some(PythonSettings::DEFAULT_VERSION.to_string()),
        };

        let (kind, options) = match self.block_type {
            "trigger_push" => return trigger("push", Some("main"), None),
            "trigger_pr" => return trigger("pull_request", Some("main"), None),
            "trigger_schedule" => return trigger("schedule", None, Some("0 0 * * *")),
            "node_test" => (JobKind::NodeTest(node()), checkout),
            "python_test" => (JobKind::PythonTest(python()), checkout),
            "go_build" => (
                JobKind::GoBuild(GoSettings {
                    go_version: Some(GoSettings::DEFAULT_VERSION.to_string()),
                }),
                checkout,
            ),
            "lint" => (JobKind::Lint, checkout),
            "security_scan" => (JobKind::SecurityScan, checkout),
            "node_build" => (JobKind::NodeBuild(node()), checkout),
            "python_build" => (JobKind::PythonBuild(python()), checkout),
            "docker_build" => (
                JobKind::DockerBuild(DockerSettings {
                    image_name: Some(DockerSettings::DEFAULT_IMAGE.to_string()),
                }),
                checkout,
            ),
            "cache" => (JobKind::Cache, no_checkout),
            "deploy_vercel" => (JobKind::DeployVercel, checkout),
            "deploy_aws" => (JobKind::DeployAws, checkout),
            "deploy_gcp" => (JobKind::DeployGcp, checkout),
            "notify_slack" => (JobKind::NotifySlack, no_checkout),
            other => (JobKind::Unknown(other.to_string()), JobOptions::default()),
        };
        Block::Job(JobBlock::new(kind, options))
    }

    /// Place a new node of this kind with default configuration
    pub fn instantiate(&self, id: impl Into<NodeId>) -> Node {
        Node::new(id, self.label, self.default_block())
    }
}

const fn entry(
    block_type: &'static str,
    role: Role,
    label: &'static str,
    description: &'static str,
    category: Category,
) -> CatalogEntry {
    CatalogEntry {
        block_type,
        role,
        label,
        description,
        category,
    }
}

static CATALOG: [CatalogEntry; 16] = [
    entry("trigger_push", Role::Trigger, "Push Trigger", "Runs on git push", Category::Triggers),
    entry("trigger_pr", Role::Trigger, "Pull Request", "Runs on PR open/sync", Category::Triggers),
    entry("trigger_schedule", Role::Trigger, "Scheduled", "Runs on a cron schedule", Category::Triggers),
    entry("node_test", Role::Job, "Node.js Tests", "npm ci + npm test", Category::TestAndQuality),
    entry("python_test", Role::Job, "Python Tests", "pip install + pytest", Category::TestAndQuality),
    entry("go_build", Role::Job, "Go Build & Test", "go build + go test", Category::TestAndQuality),
    entry("lint", Role::Job, "Lint Code", "Run ESLint/Prettier", Category::TestAndQuality),
    entry("security_scan", Role::Job, "Security Scan", "Snyk vulnerability scan", Category::TestAndQuality),
    entry("node_build", Role::Job, "Node.js Build", "npm ci + npm run build", Category::Build),
    entry("python_build", Role::Job, "Python Build", "python -m build", Category::Build),
    entry("docker_build", Role::Job, "Docker Build", "Build & tag Docker image", Category::Build),
    entry("cache", Role::Job, "Cache Deps", "Cache node_modules/pip", Category::Build),
    entry("deploy_vercel", Role::Job, "Deploy Vercel", "Deploy to Vercel", Category::Deploy),
    entry("deploy_aws", Role::Job, "Deploy AWS", "Deploy to AWS", Category::Deploy),
    entry("deploy_gcp", Role::Job, "Deploy GCP", "Deploy to Google Cloud", Category::Deploy),
    entry("notify_slack", Role::Job, "Slack Notify", "Send Slack notification", Category::Deploy),
];

/// All catalog entries in palette order
#[must_use]
pub fn catalog() -> &'static [CatalogEntry] {
    &CATALOG
}

/// Look up a block type
#[must_use]
pub fn lookup(block_type: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.block_type == block_type)
}

/// Place a new node of the given block type with its default configuration
#[must_use]
pub fn instantiate(block_type: &str, id: impl Into<NodeId>) -> Option<Node> {
    lookup(block_type).map(|entry| entry.instantiate(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_round_trips_its_block_type() {
        for entry in catalog() {
            let block = entry.default_block();
            assert_eq!(block.block_type(), entry.block_type);
            let is_trigger = matches!(block, Block::Trigger(_));
            assert_eq!(is_trigger, entry.role == Role::Trigger, "{}", entry.block_type);
        }
    }

    #[test]
    fn test_checkout_defaults() {
        let cache = instantiate("cache", "c1").unwrap();
        assert!(!cache.as_job().unwrap().options.checkout());

        let slack = instantiate("notify_slack", "s1").unwrap();
        assert!(!slack.as_job().unwrap().options.checkout());

        let lint = instantiate("lint", "l1").unwrap();
        assert!(lint.as_job().unwrap().options.checkout());
    }

    #[test]
    fn test_instantiate_uses_catalog_label() {
        let node = instantiate("go_build", "g1").unwrap();
        assert_eq!(node.label, "Go Build & Test");
        assert_eq!(node.id.as_str(), "g1");
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup("terraform_apply").is_none());
        assert!(instantiate("terraform_apply", "x").is_none());
    }

    #[test]
    fn test_schedule_defaults() {
        let node = instantiate("trigger_schedule", "t1").unwrap();
        let trigger = node.as_trigger().unwrap();
        assert_eq!(trigger.cron(), "0 0 * * *");
        assert_eq!(trigger.branch(), "main");
    }
}
