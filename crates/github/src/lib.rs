//! GitHub provider implementations for pipeforge.
//!
//! This crate provides GitHub-specific implementations of:
//! - [`workflow::GitHubActionsEmitter`] for workflow file generation (feature: `workflow`)
//! - [`publish::GitHubContentPublisher`] for committing generated files (feature: `publish`)
//!
//! # Features
//!
//! - `workflow` (default): GitHub Actions workflow generation from a pipeline graph
//! - `publish` (default): create or update files through the contents API

#![warn(missing_docs)]

#[cfg(feature = "workflow")]
pub mod workflow;

#[cfg(feature = "publish")]
pub mod publish;

#[cfg(feature = "workflow")]
pub use workflow::GitHubActionsEmitter;

#[cfg(feature = "publish")]
pub use publish::{GitHubContentPublisher, GitHubPublishConfig};
