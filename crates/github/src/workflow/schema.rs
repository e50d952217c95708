//! GitHub Actions Workflow Schema Types
//!
//! Defines the subset of the workflow syntax pipeforge emits. Each type
//! renders itself through [`fmt::Display`] in the exact layout of the
//! generated file: flow-style `branches` and `needs` lists, and a blank line
//! after every step.
//! See: <https://docs.github.com/en/actions/using-workflows/workflow-syntax-for-github-actions>

use std::fmt;

/// Comment written in place of the `jobs` section when there are no jobs
pub const NO_JOBS_PLACEHOLDER: &str = "# Add job blocks to define your pipeline steps";

/// A GitHub Actions workflow definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
    /// Workflow name displayed in GitHub UI
    pub name: String,

    /// Trigger configuration
    pub on: WorkflowTrigger,

    /// Job definitions in emission order.
    ///
    /// Keys are not deduplicated: two nodes normalizing to the same key
    /// both appear.
    pub jobs: Vec<(String, Job)>,
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name: {}\n\n{}", self.name, self.on)?;
        if self.jobs.is_empty() {
            return f.write_str(NO_JOBS_PLACEHOLDER);
        }
        f.write_str("jobs:\n")?;
        for (key, job) in &self.jobs {
            write!(f, "\n  {key}:\n{job}")?;
        }
        Ok(())
    }
}

/// Workflow trigger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowTrigger {
    /// `push` or `pull_request` filtered to one branch
    Branch {
        /// Event name
        event: String,
        /// Branch filter
        branch: String,
    },
    /// Cron schedule
    Schedule {
        /// Cron expression
        cron: String,
    },
    /// Any other event, written as a flow list
    Event(String),
}

impl fmt::Display for WorkflowTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Branch { event, branch } => {
                write!(f, "on:\n  {event}:\n    branches: [\"{branch}\"]\n\n")
            }
            Self::Schedule { cron } => write!(f, "on:\n  schedule:\n    - cron: \"{cron}\"\n\n"),
            Self::Event(event) => write!(f, "on: [{event}]\n\n"),
        }
    }
}

/// A job in a GitHub Actions workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Runner label
    pub runs_on: String,

    /// Job dependencies (these jobs must complete first)
    pub needs: Vec<String>,

    /// Job steps (executed sequentially)
    pub steps: Vec<Step>,
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    runs-on: {}", self.runs_on)?;
        if !self.needs.is_empty() {
            writeln!(f, "    needs: [{}]", self.needs.join(", "))?;
        }
        f.write_str("    steps:\n")?;
        for step in &self.steps {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// A step in a job.
///
/// Steps either `uses` an action or `run` a shell command. Input and
/// environment values are written verbatim, so callers quote them when YAML
/// needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    /// Step display name
    pub name: String,

    /// Action to use (e.g., "actions/checkout@v4")
    pub uses: Option<String>,

    /// Shell command to run
    pub run: Option<String>,

    /// Action inputs in insertion order
    pub with_inputs: Vec<(String, String)>,

    /// Step environment variables in insertion order
    pub env: Vec<(String, String)>,
}

impl Step {
    /// Create a step that uses an action
    pub fn uses(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uses: Some(action.into()),
            ..Default::default()
        }
    }

    /// Create a step that runs a shell command
    pub fn run(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            run: Some(command.into()),
            ..Default::default()
        }
    }

    /// Add a with input
    #[must_use]
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_inputs.push((key.into(), value.into()));
        self
    }

    /// Add an environment variable
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "      - name: {}", self.name)?;
        if let Some(uses) = &self.uses {
            writeln!(f, "        uses: {uses}")?;
        }
        if let Some(run) = &self.run {
            writeln!(f, "        run: {run}")?;
        }
        write_map(f, "with", &self.with_inputs)?;
        write_map(f, "env", &self.env)?;
        f.write_str("\n")
    }
}

fn write_map(f: &mut fmt::Formatter<'_>, key: &str, entries: &[(String, String)]) -> fmt::Result {
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(f, "        {key}:")?;
    for (k, v) in entries {
        writeln!(f, "          {k}: {v}")?;
    }
    Ok(())
}
