//! Reading and writing graph documents.

use crate::error::{Error, Result};
use crate::graph::PipelineGraph;
use std::path::Path;
use tracing::debug;

/// Serialization format of a graph document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// JSON, as exported by the editor
    #[default]
    Json,
    /// YAML
    Yaml,
}

impl DocumentFormat {
    /// Pick a format from a file extension; anything but `.yml`/`.yaml` is JSON
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml" | "yaml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse a graph document
///
/// # Errors
///
/// Returns [`Error::Document`] when the text is not a valid graph document.
pub fn parse_graph(text: &str, format: DocumentFormat, origin: &str) -> Result<PipelineGraph> {
    let graph: PipelineGraph = match format {
        DocumentFormat::Json => {
            serde_json::from_str(text).map_err(|e| Error::document(origin, e.to_string()))?
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|e| Error::document(origin, e.to_string()))?
        }
    };
    debug!(
        origin,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Parsed pipeline graph"
    );
    Ok(graph)
}

/// Load a graph document from disk, choosing the format by extension
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed.
pub fn load_graph(path: &Path) -> Result<PipelineGraph> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_graph(
        &text,
        DocumentFormat::from_path(path),
        &path.display().to_string(),
    )
}

/// Serialize a graph as pretty-printed JSON
///
/// # Errors
///
/// Returns [`Error::Serialization`] if serialization fails.
pub fn to_json(graph: &PipelineGraph) -> Result<String> {
    serde_json::to_string_pretty(graph).map_err(|e| Error::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Role;

    const GRAPH_JSON: &str = r#"{
        "nodes": [
            {"id": "t1", "role": "trigger", "blockType": "trigger_push", "label": "Push Trigger",
             "configuration": {"trigger": "push", "branch": "main"}},
            {"id": "j1", "role": "job", "blockType": "node_test", "label": "Node.js Tests",
             "configuration": {"nodeVersion": "20", "checkout": true}}
        ],
        "edges": [{"source": "t1", "target": "j1"}]
    }"#;

    const GRAPH_YAML: &str = r"
nodes:
  - id: t1
    role: trigger
    blockType: trigger_schedule
    label: Nightly
    configuration:
      trigger: schedule
      cron: '0 3 * * *'
  - id: j1
    role: job
    blockType: go_build
    label: Go
    configuration:
      goVersion: 1.22
edges: []
";

    #[test]
    fn test_parse_json() {
        let graph = parse_graph(GRAPH_JSON, DocumentFormat::Json, "<input>").unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].role(), Role::Trigger);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_parse_yaml_with_numeric_version() {
        let graph = parse_graph(GRAPH_YAML, DocumentFormat::Yaml, "<input>").unwrap();
        let (_, trigger) = graph.trigger().unwrap();
        assert_eq!(trigger.cron(), "0 3 * * *");
        let config = graph.nodes[1].block.configuration();
        assert_eq!(config.get("goVersion").and_then(|v| v.as_str()), Some("1.22"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let graph = parse_graph("{}", DocumentFormat::Json, "<input>").unwrap();
        assert!(graph.is_empty());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_parse_error_carries_origin() {
        let err = parse_graph("{\"nodes\": 3}", DocumentFormat::Json, "graph.json").unwrap_err();
        assert!(err.to_string().contains("graph.json"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("pipeline.yaml")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("pipeline.json")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("pipeline")),
            DocumentFormat::Json
        );
    }

    #[test]
    fn test_json_round_trip() {
        let graph = parse_graph(GRAPH_JSON, DocumentFormat::Json, "<input>").unwrap();
        let text = to_json(&graph).unwrap();
        let again = parse_graph(&text, DocumentFormat::Json, "<input>").unwrap();
        assert_eq!(graph, again);
    }

    #[test]
    fn test_load_graph_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.yml");
        std::fs::write(&path, GRAPH_YAML).unwrap();
        let graph = load_graph(&path).unwrap();
        assert_eq!(graph.nodes.len(), 2);
    }
}
