//! Core types for pipeforge.
//!
//! This crate owns the in-memory pipeline graph that the editor builds and the
//! emitters read:
//! - [`PipelineGraph`], [`Node`] and [`Edge`] in [`graph`]
//! - typed per-block configuration in [`block`]
//! - the static [`catalog`] of block kinds and the starter [`templates`]
//! - [`document`] loading for JSON and YAML graph files

pub mod block;
pub mod catalog;
pub mod document;
pub mod error;
pub mod graph;
pub mod ident;
pub mod templates;

mod lenient;

pub use block::{
    Block, DockerSettings, GoSettings, JobBlock, JobKind, JobOptions, NodeSettings,
    PythonSettings, TriggerBlock, TriggerConfig, TriggerEvent,
};
pub use catalog::{CatalogEntry, Category};
pub use error::{Error, Result};
pub use graph::{Edge, Node, NodeId, PipelineGraph, Role};
pub use ident::normalize;
