//! Command-line interface definition and error reporting.

use crate::logging::{LogLevel, TracingFormat};
use clap::{Parser, Subcommand};
use miette::{Diagnostic, Report};
use pipeforge_ci::{Format, PublishError};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// `check --strict` found warnings
pub const EXIT_DIAGNOSTICS: i32 = 1;
/// CLI or configuration error exit code
pub const EXIT_CLI: i32 = 2;
/// Publishing error exit code
pub const EXIT_PUBLISH: i32 = 3;

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// CLI or configuration error (exit code 2)
    #[error("CLI/configuration error: {message}")]
    #[diagnostic(code(pipeforge::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Strict check found warnings (exit code 1)
    #[error("Graph check failed with {count} warning(s)")]
    #[diagnostic(
        code(pipeforge::cli::diagnostics),
        help("Run without --strict to generate anyway")
    )]
    Diagnostics {
        /// Number of warnings found
        count: usize,
    },
    /// Publishing error (exit code 3)
    #[error("Publish error: {message}")]
    #[diagnostic(code(pipeforge::cli::publish))]
    Publish {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new configuration error with help text
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new publish error with help text
    #[must_use]
    pub fn publish_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Publish {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<pipeforge_core::Error> for CliError {
    fn from(err: pipeforge_core::Error) -> Self {
        match err {
            pipeforge_core::Error::Configuration { .. } | pipeforge_core::Error::Document { .. } => {
                Self::config_with_help(
                    err.to_string(),
                    "Graph documents are JSON (or YAML for .yml/.yaml) with `nodes` and `edges`",
                )
            }
            pipeforge_core::Error::Io { .. } => Self::config_with_help(
                err.to_string(),
                "Check file permissions and ensure the path exists",
            ),
            pipeforge_core::Error::Serialization(_) => Self::config(err.to_string()),
        }
    }
}

impl From<PublishError> for CliError {
    fn from(err: PublishError) -> Self {
        let help = match &err {
            PublishError::InvalidRepository(_) => {
                return Self::config_with_help(
                    err.to_string(),
                    "Pass the repository as --repo owner/name",
                );
            }
            PublishError::Authentication(_) => {
                "Set GITHUB_TOKEN (or the variable named by [publish] token_env)"
            }
            PublishError::Remote { .. } => {
                "Check that the token can write repository contents"
            }
        };
        Self::publish_with_help(err.to_string(), help)
    }
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Diagnostics { .. } => EXIT_DIAGNOSTICS,
        CliError::Config { .. } => EXIT_CLI,
        CliError::Publish { .. } => EXIT_PUBLISH,
    }
}

/// Render an error to stderr with miette
#[allow(clippy::print_stderr)]
pub fn render_error(err: &CliError) {
    let report = Report::new(err.clone());
    eprintln!("{report:?}");
    let _ = io::stderr().flush();
}

/// Compile visual pipeline graphs into CI configuration.
#[derive(Parser, Debug)]
#[command(name = "pipeforge")]
#[command(about = "Compile pipeline graphs into GitHub Actions and GitLab CI configuration")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level.
    #[arg(short = 'L', long, global = true, help = "Set logging level", value_enum)]
    pub level: Option<LogLevel>,

    /// Log output format.
    #[arg(long, global = true, help = "Set log output format", value_enum)]
    pub log_format: Option<TracingFormat>,

    /// Settings file.
    #[arg(
        long,
        global = true,
        env = "PIPEFORGE_CONFIG",
        help = "Path to pipeforge.toml (default: ./pipeforge.toml if present)"
    )]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Emit CI configuration for a graph document.
    #[command(about = "Generate CI configuration from a graph document")]
    Generate {
        /// Graph document (JSON, or YAML for .yml/.yaml)
        #[arg(value_name = "GRAPH")]
        graph: PathBuf,

        /// Target CI system
        #[arg(long, short = 'f', default_value = "github", help = "Target format (github, gitlab)")]
        format: Format,

        /// Output file
        #[arg(long, short = 'o', conflicts_with = "write", help = "Write to FILE instead of stdout")]
        output: Option<PathBuf>,

        /// Write to the conventional path
        #[arg(long, help = "Write to the format's conventional path (or the [output] override)")]
        write: bool,
    },

    /// Report graph problems the emitters pass through.
    #[command(about = "Check a graph document for likely mistakes")]
    Check {
        /// Graph document
        #[arg(value_name = "GRAPH")]
        graph: PathBuf,

        /// Fail when any warning is found
        #[arg(long, help = "Exit with status 1 when any warning is found")]
        strict: bool,
    },

    /// List the block catalog.
    #[command(about = "List available blocks")]
    Blocks {
        /// Emit JSON
        #[arg(long, help = "Print the catalog as JSON")]
        json: bool,
    },

    /// Print a starter template.
    #[command(about = "Print a starter template as a graph document")]
    Template {
        /// Template name
        #[arg(value_name = "NAME", help = "nodejs, python, docker or fullstack")]
        name: String,

        /// Emit configuration instead of the graph
        #[arg(long, short = 'f', help = "Emit CI configuration for the template instead")]
        format: Option<Format>,
    },

    /// List registered output formats.
    #[command(about = "List supported output formats")]
    Formats,

    /// Commit generated configuration to a GitHub repository.
    #[command(about = "Push generated configuration to a GitHub repository")]
    Push {
        /// Graph document
        #[arg(value_name = "GRAPH")]
        graph: PathBuf,

        /// Target repository
        #[arg(long, env = "PIPEFORGE_REPOSITORY", help = "Repository as owner/name")]
        repo: Option<String>,

        /// Target CI system
        #[arg(long, short = 'f', default_value = "github", help = "Target format (github, gitlab)")]
        format: Format,

        /// Path override
        #[arg(long, help = "Path inside the repository (default: the format's conventional path)")]
        path: Option<String>,

        /// Skip the network call
        #[arg(long, help = "Show what would be pushed without contacting GitHub")]
        dry_run: bool,
    },
}

impl Commands {
    /// Whether the command needs an async runtime
    #[must_use]
    pub const fn is_async(&self) -> bool {
        matches!(self, Self::Push { .. })
    }
}

/// Parse command line arguments
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
