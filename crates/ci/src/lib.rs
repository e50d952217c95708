//! Compiler passes shared by every pipeforge emitter.
//!
//! The emitters for GitHub Actions and GitLab CI differ only in syntax,
//! default images and stage bucketing. Everything that depends on graph
//! semantics lives here:
//! - [`resolver`]: which jobs a job depends on
//! - [`stage`]: the GitLab stage bucket of a block type
//! - [`steps`]: the dialect-neutral step plan for a job
//! - [`render`]: the trait emitters implement to turn that plan into steps
//! - [`emitter`]: the emitter trait and registry
//! - [`diagnostics`]: warnings for graphs the emitters pass through untouched
//! - [`publish`]: the interface for committing generated files to a repository

pub mod diagnostics;
pub mod emitter;
pub mod publish;
pub mod render;
pub mod resolver;
pub mod stage;
pub mod steps;

pub use diagnostics::{GraphWarning, diagnose};
pub use emitter::{EMPTY_CANVAS_PLACEHOLDER, Emitter, EmitterError, EmitterRegistry, Format};
pub use publish::{
    PublishError, PublishOutcome, PublishRequest, PublishResult, PublishStatus, RepositoryPublisher,
    RepositoryRef,
};
pub use render::StepRenderer;
pub use resolver::dependencies;
pub use stage::{Stage, classify, stage_order};
pub use steps::{Step, Toolchain, synthesize};
