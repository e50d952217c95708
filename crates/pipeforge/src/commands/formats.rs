//! `pipeforge formats`

use std::fmt::Write;

/// List every registered emitter with its conventional output path
#[must_use]
pub fn execute() -> String {
    let mut out = String::new();
    for info in crate::default_registry().info() {
        let _ = writeln!(
            out,
            "{:<8}{:<28}{}",
            info.format, info.output_path, info.description
        );
    }
    out
}
