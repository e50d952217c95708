//! Job identifier derivation.

/// Normalize a node label into the key used for emitted jobs and `needs`
/// references.
///
/// The label is lowercased and every UTF-16 code unit outside `[a-z0-9]`
/// becomes `_`, so a character outside the basic multilingual plane turns
/// into two underscores. Distinct labels may collide (`"Unit Tests"` and `"unit-tests"` both
/// map to `unit_tests`); collisions are reported by diagnostics, never fixed
/// here.
///
/// ```
/// assert_eq!(pipeforge_core::normalize("Node.js Tests"), "node_js_tests");
/// ```
#[must_use]
pub fn normalize(label: &str) -> String {
    label
        .to_lowercase()
        .encode_utf16()
        .map(|unit| match u8::try_from(unit) {
            Ok(byte) if byte.is_ascii_lowercase() || byte.is_ascii_digit() => char::from(byte),
            _ => '_',
        })
        .collect()
}
