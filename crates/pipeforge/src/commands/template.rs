//! `pipeforge template`

use crate::cli::CliError;
use pipeforge_ci::Format;
use pipeforge_core::templates::templates;

/// Print a starter template as a graph document, or its emitted
/// configuration when `format` is given.
///
/// # Errors
/// Returns a configuration error for an unknown template name.
pub fn execute(name: &str, format: Option<Format>) -> Result<String, CliError> {
    let Some(template) = templates().iter().find(|t| t.name == name) else {
        let names: Vec<&str> = templates().iter().map(|t| t.name).collect();
        return Err(CliError::config_with_help(
            format!("Unknown template '{name}'"),
            format!("Available templates: {}", names.join(", ")),
        ));
    };

    let graph = template.graph();
    let mut text = match format {
        Some(format) => crate::generate(&graph, format),
        None => pipeforge_core::document::to_json(&graph)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeforge_core::document::{DocumentFormat, parse_graph};

    #[test]
    fn test_template_document_reloads() {
        let text = execute("python", None).unwrap();
        let graph = parse_graph(&text, DocumentFormat::Json, "<template>").unwrap();
        assert_eq!(graph, pipeforge_core::templates::template("python").unwrap());
    }

    #[test]
    fn test_template_as_gitlab() {
        let text = execute("docker", Some(Format::Gitlab)).unwrap();
        assert!(text.starts_with("# GitLab CI Pipeline\n"));
    }

    #[test]
    fn test_unknown_template() {
        let err = execute("rust", None).unwrap_err();
        match err {
            CliError::Config { help, .. } => {
                assert!(help.unwrap().contains("nodejs, python, docker, fullstack"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
