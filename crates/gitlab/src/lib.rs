//! GitLab provider implementations for pipeforge.
//!
//! This crate provides the [`GitLabCiEmitter`], which writes a
//! `.gitlab-ci.yml` pipeline from a pipeline graph. Jobs are bucketed into
//! stages and gated on the trigger's branch.

#![warn(missing_docs)]

pub mod emitter;
pub mod schema;

pub use emitter::GitLabCiEmitter;
