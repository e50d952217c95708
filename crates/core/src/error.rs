//! Error types for graph loading.
//!
//! Emission itself never fails; these errors only surface while turning
//! external documents into a [`crate::PipelineGraph`].

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for pipeforge core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A node's configuration does not match its block type's schema
    #[error("Invalid configuration for node '{node}' ({block_type}): {message}")]
    Configuration {
        /// Identifier of the offending node
        node: String,
        /// Block type the configuration was parsed against
        block_type: String,
        /// Underlying parse failure
        message: String,
    },

    /// A graph document could not be parsed
    #[error("Failed to parse pipeline graph from {origin}: {message}")]
    Document {
        /// Where the document came from (a path or `<input>`)
        origin: String,
        /// Underlying parse failure
        message: String,
    },

    /// A graph could not be serialized
    #[error("Failed to serialize pipeline graph: {0}")]
    Serialization(String),

    /// A document file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a configuration error for a node
    pub fn configuration(
        node: impl Into<String>,
        block_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            node: node.into(),
            block_type: block_type.into(),
            message: message.into(),
        }
    }

    /// Create a document parse error
    pub fn document(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Document {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Create an IO error for `path`
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type alias for pipeforge core operations
pub type Result<T> = std::result::Result<T, Error>;
