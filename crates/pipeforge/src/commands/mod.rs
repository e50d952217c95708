//! Command implementations.
//!
//! Every command returns the text destined for stdout. The binary prints it,
//! so commands stay testable without capturing process output.

pub mod blocks;
pub mod check;
pub mod formats;
pub mod generate;
pub mod push;
pub mod template;

use crate::cli::{CliError, Commands};
use crate::settings::Settings;
use pipeforge_ci::{GraphWarning, diagnose};
use pipeforge_core::PipelineGraph;
use std::path::Path;
use tracing::{debug, warn};

/// Run a command that needs no async runtime.
///
/// # Errors
/// Returns an error if the command fails, or if it is `push`, which must go
/// through [`push::execute`].
pub fn execute_sync(command: Commands, settings: &Settings) -> Result<String, CliError> {
    match command {
        Commands::Generate {
            graph,
            format,
            output,
            write,
        } => generate::execute(&graph, format, output.as_deref(), write, settings),
        Commands::Check { graph, strict } => check::execute(&graph, strict),
        Commands::Blocks { json } => blocks::execute(json),
        Commands::Template { name, format } => template::execute(&name, format),
        Commands::Formats => Ok(formats::execute()),
        Commands::Push { .. } => Err(CliError::config("push requires the async runtime")),
    }
}

/// Run any command, including those that need the async runtime.
///
/// # Errors
/// Returns an error if the command fails.
pub async fn execute_async(command: Commands, settings: &Settings) -> Result<String, CliError> {
    match command {
        Commands::Push {
            graph,
            repo,
            format,
            path,
            dry_run,
        } => {
            let args = push::PushArgs {
                graph: &graph,
                repo: repo.as_deref(),
                format,
                path: path.as_deref(),
                dry_run,
            };
            push::execute(args, settings).await
        }
        other => execute_sync(other, settings),
    }
}

/// Load a graph document
pub(crate) fn load_graph(path: &Path) -> Result<PipelineGraph, CliError> {
    let graph = pipeforge_core::document::load_graph(path)?;
    debug!(
        path = %path.display(),
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Loaded graph document"
    );
    Ok(graph)
}

/// Log every diagnostic as a warning and hand them back
pub(crate) fn report_warnings(graph: &PipelineGraph) -> Vec<GraphWarning> {
    let warnings = diagnose(graph);
    for warning in &warnings {
        warn!("{warning}");
    }
    warnings
}
