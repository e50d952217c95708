//! Step rendering traits for dialect-specific CI step generation.
//!
//! The synthesizer plans steps once; each emitter implements
//! [`StepRenderer`] to turn the plan into its native representation. A step
//! may render to several native entries (a built-in block is often more than
//! one command) or to none at all.
//!
//! ## Example
//!
//! ```rust,ignore
//! impl StepRenderer for ScriptRenderer {
//!     type Output = String;
//!
//!     fn render_step(&self, step: &Step) -> Vec<String> {
//!         match step {
//!             Step::Command { command, .. } => vec![command.clone()],
//!             _ => Vec::new(),
//!         }
//!     }
//! }
//! ```

use crate::steps::Step;

/// Trait for rendering planned steps to dialect-native steps.
pub trait StepRenderer {
    /// The native step type for this dialect
    type Output;

    /// Render a single planned step
    fn render_step(&self, step: &Step) -> Vec<Self::Output>;

    /// Render a whole plan, preserving order
    fn render_steps(&self, steps: &[Step]) -> Vec<Self::Output> {
        steps.iter().flat_map(|s| self.render_step(s)).collect()
    }
}
