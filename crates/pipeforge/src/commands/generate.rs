//! `pipeforge generate`

use super::{load_graph, report_warnings};
use crate::cli::CliError;
use crate::settings::Settings;
use pipeforge_ci::Format;
use std::path::{Path, PathBuf};
use tracing::info;

/// Emit configuration for the graph at `graph_path`.
///
/// Without `output` or `write` the configuration itself is returned.
/// Otherwise it is written to disk and a one-line confirmation is returned.
///
/// # Errors
/// Returns an error if the graph cannot be loaded or the file cannot be written.
pub fn execute(
    graph_path: &Path,
    format: Format,
    output: Option<&Path>,
    write: bool,
    settings: &Settings,
) -> Result<String, CliError> {
    let graph = load_graph(graph_path)?;
    report_warnings(&graph);
    let text = crate::generate(&graph, format);

    let target = output
        .map(Path::to_path_buf)
        .or_else(|| write.then(|| PathBuf::from(settings.output.path(format))));

    let Some(target) = target else {
        return Ok(with_trailing_newline(text));
    };

    write_file(&target, &text)?;
    info!(path = %target.display(), %format, "Wrote pipeline configuration");
    Ok(format!("Wrote {}\n", target.display()))
}

fn with_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            CliError::config(format!("Failed to create {}: {e}", parent.display()))
        })?;
    }
    std::fs::write(path, contents)
        .map_err(|e| CliError::config(format!("Failed to write {}: {e}", path.display())))
}
