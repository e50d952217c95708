//! GitHub Actions Workflow Generator
//!
//! Generates a static GitHub Actions workflow, conventionally committed to
//! `.github/workflows/ci.yml`.
//!
//! # Example
//!
//! ```ignore
//! use pipeforge_github::workflow::GitHubActionsEmitter;
//! use pipeforge_ci::emitter::Emitter;
//!
//! let emitter = GitHubActionsEmitter::new().with_runner("ubuntu-22.04");
//! let yaml = emitter.emit(&graph);
//! std::fs::write(emitter.output_path(), yaml)?;
//! ```

pub mod emitter;
pub mod schema;

pub use emitter::GitHubActionsEmitter;
pub use schema::*;
