//! `pipeforge check`

use super::{load_graph, report_warnings};
use crate::cli::CliError;
use std::fmt::Write;
use std::path::Path;

/// Report conditions the emitters would pass through.
///
/// # Errors
/// Returns [`CliError::Diagnostics`] when `strict` is set and anything was
/// found, or a configuration error if the graph cannot be loaded.
pub fn execute(graph_path: &Path, strict: bool) -> Result<String, CliError> {
    let graph = load_graph(graph_path)?;
    let warnings = report_warnings(&graph);

    if warnings.is_empty() {
        return Ok(format!("{}: no problems found\n", graph_path.display()));
    }

    if strict {
        return Err(CliError::Diagnostics {
            count: warnings.len(),
        });
    }

    let mut out = String::new();
    for warning in &warnings {
        let _ = writeln!(out, "warning: {warning}");
    }
    let _ = writeln!(
        out,
        "{}: {} warning(s)",
        graph_path.display(),
        warnings.len()
    );
    Ok(out)
}
