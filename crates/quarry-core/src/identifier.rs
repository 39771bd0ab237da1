//! Table identifier derivation and sanitization.
//!
//! Identifiers derived from file names must be safe to splice into SQL as
//! bare names: only `[A-Za-z0-9_]`, never digit-led, never empty.

use std::path::Path;

/// Sanitize a candidate table identifier.
///
/// Replaces every character outside `[A-Za-z0-9_]` with an underscore, then
/// prefixes `table_` if the result is empty or starts with a digit. The
/// function is idempotent: applying it to its own output is a no-op.
pub fn sanitize_table_identifier(candidate: &str) -> String {
    let mut identifier: String = candidate
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if identifier.is_empty() || identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier = format!("table_{}", identifier);
    }

    identifier
}

/// Derive the table identifier for a file from its base name (without
/// extension), sanitized.
pub fn table_identifier_for_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    sanitize_table_identifier(&stem)
}
