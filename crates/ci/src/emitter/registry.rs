//! Emitter Registry
//!
//! Provides a registry for CI configuration emitters, allowing dynamic
//! lookup and discovery of available formats.

use std::collections::HashMap;
use std::sync::Arc;

use super::{Emitter, EmitterError, EmitterResult};
use pipeforge_core::PipelineGraph;
use tracing::debug;

/// Registry for CI configuration emitters.
///
/// # Example
///
/// ```ignore
/// use pipeforge_ci::emitter::EmitterRegistry;
///
/// let mut registry = EmitterRegistry::new();
/// registry.register(GitHubActionsEmitter::new());
///
/// let output = registry.emit("github", &graph)?;
/// ```
#[derive(Default)]
pub struct EmitterRegistry {
    emitters: HashMap<&'static str, Arc<dyn Emitter>>,
}

impl EmitterRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            emitters: HashMap::new(),
        }
    }

    /// Register an emitter.
    ///
    /// The emitter's `format_name()` is used as the key.
    /// If an emitter with the same name already exists, it is replaced.
    pub fn register(&mut self, emitter: impl Emitter + 'static) {
        let name = emitter.format_name();
        self.emitters.insert(name, Arc::new(emitter));
    }

    /// Get an emitter by format name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Emitter>> {
        self.emitters.get(name).cloned()
    }

    /// Get all registered format names.
    #[must_use]
    pub fn formats(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.emitters.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Emit using a specific format.
    ///
    /// # Errors
    /// Returns error if no emitter is registered under `format`.
    pub fn emit(&self, format: &str, graph: &PipelineGraph) -> EmitterResult<String> {
        let emitter = self.get(format).ok_or_else(|| EmitterError::UnknownFormat {
            format: format.to_string(),
            available: self.formats().join(", "),
        })?;

        debug!(
            format,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "Emitting pipeline configuration"
        );
        Ok(emitter.emit(graph))
    }

    /// Get information about all registered emitters.
    #[must_use]
    pub fn info(&self) -> Vec<EmitterInfo> {
        let mut infos: Vec<_> = self
            .emitters
            .values()
            .map(|e| EmitterInfo::from_emitter(e.as_ref()))
            .collect();
        infos.sort_by_key(|i| i.format);
        infos
    }
}

/// Information about a registered emitter.
#[derive(Debug, Clone)]
pub struct EmitterInfo {
    /// Format name (CLI flag value).
    pub format: &'static str,
    /// Conventional output path.
    pub output_path: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

impl EmitterInfo {
    /// Create emitter info from an emitter.
    #[must_use]
    pub fn from_emitter(emitter: &dyn Emitter) -> Self {
        Self {
            format: emitter.format_name(),
            output_path: emitter.output_path(),
            description: emitter.description(),
        }
    }
}

/// Builder for creating an emitter registry.
#[derive(Default)]
pub struct EmitterRegistryBuilder {
    registry: EmitterRegistry,
}

impl EmitterRegistryBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an emitter.
    #[must_use]
    pub fn with_emitter(mut self, emitter: impl Emitter + 'static) -> Self {
        self.registry.register(emitter);
        self
    }

    /// Build the registry.
    #[must_use]
    pub fn build(self) -> EmitterRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::Format;

    struct TestEmitter {
        format: Format,
    }

    impl Emitter for TestEmitter {
        fn emit(&self, graph: &PipelineGraph) -> String {
            format!("# {} - {} nodes", self.format, graph.nodes.len())
        }

        fn format(&self) -> Format {
            self.format
        }

        fn description(&self) -> &'static str {
            "Test emitter"
        }
    }

    #[test]
    fn test_registry_new() {
        let registry = EmitterRegistry::new();
        assert!(registry.formats().is_empty());
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = EmitterRegistry::new();
        registry.register(TestEmitter {
            format: Format::Github,
        });

        assert_eq!(registry.get("github").unwrap().format_name(), "github");
        assert!(registry.get(Format::Gitlab.as_str()).is_none());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_registry_formats_sorted() {
        let registry = EmitterRegistryBuilder::new()
            .with_emitter(TestEmitter {
                format: Format::Gitlab,
            })
            .with_emitter(TestEmitter {
                format: Format::Github,
            })
            .build();

        assert_eq!(registry.formats(), vec!["github", "gitlab"]);
    }

    #[test]
    fn test_registry_emit() {
        let registry = EmitterRegistryBuilder::new()
            .with_emitter(TestEmitter {
                format: Format::Gitlab,
            })
            .build();

        let output = registry.emit("gitlab", &PipelineGraph::default()).unwrap();
        assert_eq!(output, "# gitlab - 0 nodes");
    }

    #[test]
    fn test_registry_emit_unknown_format() {
        let registry = EmitterRegistryBuilder::new()
            .with_emitter(TestEmitter {
                format: Format::Github,
            })
            .build();

        let err = registry
            .emit("buildkite", &PipelineGraph::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown format 'buildkite'. Available: github"
        );
    }

    #[test]
    fn test_registry_info() {
        let mut registry = EmitterRegistry::new();
        registry.register(TestEmitter {
            format: Format::Github,
        });

        let infos = registry.info();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].format, "github");
        assert_eq!(infos[0].output_path, ".github/workflows/ci.yml");
        assert_eq!(infos[0].description, "Test emitter");
    }

    #[test]
    fn test_registry_register_replaces() {
        let mut registry = EmitterRegistry::new();
        registry.register(TestEmitter {
            format: Format::Github,
        });
        registry.register(TestEmitter {
            format: Format::Github,
        });

        assert_eq!(registry.formats(), vec!["github"]);
    }
}
