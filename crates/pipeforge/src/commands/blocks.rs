//! `pipeforge blocks`

use crate::cli::CliError;
use pipeforge_core::catalog::catalog;
use std::fmt::Write;

/// List the block catalog, grouped by category, or as JSON.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<String, CliError> {
    if json {
        let mut text = serde_json::to_string_pretty(catalog())
            .map_err(|e| CliError::config(format!("Failed to serialize catalog: {e}")))?;
        text.push('\n');
        return Ok(text);
    }
    Ok(table())
}

fn table() -> String {
    let width = catalog()
        .iter()
        .map(|entry| entry.block_type.len())
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    let mut current = None;
    for entry in catalog() {
        if current != Some(entry.category) {
            if current.is_some() {
                out.push('\n');
            }
            let _ = writeln!(out, "{}", entry.category);
            current = Some(entry.category);
        }
        let _ = writeln!(
            out,
            "  {:<width$}  {}: {}",
            entry.block_type, entry.label, entry.description
        );
    }
    out
}
