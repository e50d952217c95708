//! PipeForge command-line library.
//!
//! Wires the pipeline graph model, the shared compiler passes and the two
//! dialect emitters behind a small CLI. The binary in `main.rs` only parses
//! arguments, sets up tracing and dispatches into [`commands`].

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;

pub use pipeforge_ci::{Emitter, EmitterRegistry, Format, GraphWarning, diagnose};
pub use pipeforge_core::PipelineGraph;
pub use pipeforge_github::GitHubActionsEmitter;
pub use pipeforge_gitlab::GitLabCiEmitter;

use pipeforge_ci::emitter::EmitterRegistryBuilder;

/// Registry holding every built-in emitter
#[must_use]
pub fn default_registry() -> EmitterRegistry {
    EmitterRegistryBuilder::new()
        .with_emitter(GitHubActionsEmitter::new())
        .with_emitter(GitLabCiEmitter::new())
        .build()
}

/// Emit configuration text for `graph` in `format`
#[must_use]
pub fn generate(graph: &PipelineGraph, format: Format) -> String {
    match format {
        Format::Github => GitHubActionsEmitter::new().emit(graph),
        Format::Gitlab => GitLabCiEmitter::new().emit(graph),
    }
}
