//! CI Configuration Emitter Trait
//!
//! Defines the interface for turning a [`PipelineGraph`] snapshot into the
//! configuration text of one CI system. Emission is a pure function of the
//! snapshot: no I/O, no retained state, and no failure path. Every gap in the
//! graph (no trigger, no jobs, unknown block types) has a fallback.
//!
//! ## Emitter Registry
//!
//! The [`EmitterRegistry`] provides a central registry for all available emitters,
//! enabling dynamic lookup by format name.

mod registry;

pub use registry::{EmitterInfo, EmitterRegistry, EmitterRegistryBuilder};

use pipeforge_core::PipelineGraph;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Output for a graph without any nodes, identical for every format
pub const EMPTY_CANVAS_PLACEHOLDER: &str =
    "# Drag blocks onto the canvas to start building your pipeline";

/// Error types for emitter lookup
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmitterError {
    /// No emitter is registered under the requested name
    #[error("Unknown format '{format}'. Available: {available}")]
    UnknownFormat {
        /// Requested format name
        format: String,
        /// Comma-separated list of registered formats
        available: String,
    },
}

/// Result type for emitter operations
pub type EmitterResult<T> = std::result::Result<T, EmitterError>;

/// Target CI dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// GitHub Actions workflow
    Github,
    /// GitLab CI pipeline
    Gitlab,
}

impl Format {
    /// All formats
    pub const ALL: [Self; 2] = [Self::Github, Self::Gitlab];

    /// Format name as used on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Gitlab => "gitlab",
        }
    }

    /// Conventional repository path of the generated file
    #[must_use]
    pub const fn output_path(self) -> &'static str {
        match self {
            Self::Github => ".github/workflows/ci.yml",
            Self::Gitlab => ".gitlab-ci.yml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = EmitterError;

    fn from_str(s: &str) -> EmitterResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| EmitterError::UnknownFormat {
                format: s.to_string(),
                available: Self::ALL.map(Self::as_str).join(", "),
            })
    }
}

/// Trait for CI configuration emitters
///
/// # Example
///
/// ```ignore
/// use pipeforge_ci::emitter::{Emitter, Format};
///
/// struct MyEmitter;
///
/// impl Emitter for MyEmitter {
///     fn emit(&self, graph: &PipelineGraph) -> String {
///         format!("# {} nodes", graph.nodes.len())
///     }
///
///     fn format(&self) -> Format {
///         Format::Github
///     }
/// }
/// ```
pub trait Emitter: Send + Sync {
    /// Emit configuration text for a graph snapshot.
    ///
    /// Always succeeds; an empty graph yields [`EMPTY_CANVAS_PLACEHOLDER`].
    fn emit(&self, graph: &PipelineGraph) -> String;

    /// The dialect this emitter writes
    fn format(&self) -> Format;

    /// Format identifier used for lookup (e.g., "github", "gitlab")
    fn format_name(&self) -> &'static str {
        self.format().as_str()
    }

    /// Conventional path the output is committed to
    fn output_path(&self) -> &'static str {
        self.format().output_path()
    }

    /// Get a human-readable description of this emitter
    fn description(&self) -> &'static str {
        "CI configuration emitter"
    }
}
