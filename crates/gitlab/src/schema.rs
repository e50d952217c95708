//! GitLab CI Pipeline Schema Types
//!
//! Defines the subset of `.gitlab-ci.yml` pipeforge emits, rendered through
//! [`fmt::Display`] in the exact layout of the generated file.
//! See: <https://docs.gitlab.com/ee/ci/yaml/>

use pipeforge_ci::Stage;
use std::fmt;

/// Comment header at the top of every pipeline
pub const HEADER: &str = "# GitLab CI Pipeline\n# Generated by PipeForge\n";

/// A GitLab CI pipeline definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    /// Image for jobs that do not declare one
    pub default_image: String,

    /// Stage order
    pub stages: Vec<Stage>,

    /// Jobs in emission order; keys are not deduplicated
    pub jobs: Vec<(String, Job)>,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        write!(f, "default:\n  image: {}\n\n", self.default_image)?;

        let stages: Vec<String> = self.stages.iter().map(|s| format!("  - {s}")).collect();
        write!(f, "stages:\n{}\n\n", stages.join("\n"))?;

        for (key, job) in &self.jobs {
            write!(f, "{key}:\n{job}")?;
        }
        Ok(())
    }
}

/// A job in a GitLab CI pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Stage the job runs in
    pub stage: Stage,

    /// Container image
    pub image: Option<String>,

    /// Service containers
    pub services: Vec<String>,

    /// Jobs that must finish first
    pub needs: Vec<String>,

    /// Dependency cache
    pub cache: Option<Cache>,

    /// Shell commands
    pub script: Vec<String>,

    /// Execution rules
    pub rules: Vec<Rule>,
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  stage: {}", self.stage)?;
        if let Some(image) = &self.image {
            writeln!(f, "  image: {image}")?;
        }
        if !self.services.is_empty() {
            f.write_str("  services:\n")?;
            for service in &self.services {
                writeln!(f, "    - {service}")?;
            }
        }
        if !self.needs.is_empty() {
            let needs: Vec<String> = self.needs.iter().map(|n| format!("\"{n}\"")).collect();
            writeln!(f, "  needs: [{}]", needs.join(", "))?;
        }
        if let Some(cache) = &self.cache {
            write!(f, "{cache}")?;
        }
        f.write_str("  script:\n")?;
        for line in &self.script {
            writeln!(f, "    - {line}")?;
        }
        if !self.rules.is_empty() {
            f.write_str("  rules:\n")?;
            for rule in &self.rules {
                writeln!(f, "    - if: {}", rule.condition)?;
            }
        }
        f.write_str("\n")
    }
}

/// Job cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cache {
    /// Cache key expression
    pub key: String,
    /// Cached paths
    pub paths: Vec<String>,
}

impl fmt::Display for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  cache:\n    key: {}\n    paths:\n", self.key)?;
        for path in &self.paths {
            writeln!(f, "      - {path}")?;
        }
        Ok(())
    }
}

/// A `rules:` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// `if:` expression
    pub condition: String,
}

impl Rule {
    /// Run only when the pipeline is for `branch`
    #[must_use]
    pub fn on_branch(branch: &str) -> Self {
        Self {
            condition: format!("$CI_COMMIT_BRANCH == \"{branch}\""),
        }
    }
}
