//! Path normalization shared by every stage that keys a graph by path.
//!
//! The catalog, the dependency graph, the tracer, and the membership table
//! all compare paths. They must normalize identically: a mismatch between
//! any two of them causes silent lookup misses instead of errors.

use std::collections::BTreeSet;

/// Maximum rendered length for remote-URL paths.
const MAX_URL_LEN: usize = 60;

/// Normalizes a bundle path for display and graph keys.
///
/// Strips everything before a `/src/` segment (keeping `src/...`) and
/// truncates very long remote URLs to their tail.
pub fn display_path(path: &str) -> String {
    if let Some(idx) = path.find("/src/") {
        return path[idx + 1..].to_string();
    }
    if path.starts_with("https://") && path.len() > MAX_URL_LEN {
        let start = path.len() - (MAX_URL_LEN - 3);
        if path.is_char_boundary(start) {
            return format!("...{}", &path[start..]);
        }
    }
    path.to_string()
}

/// Matches a bundle path against the membership table's relative format.
///
/// The cycle tool emits paths relative to the project source root, so a
/// leading `src/` may or may not be present. Tries the display form first,
/// then the `src/`-stripped form, and falls back to the display form.
pub fn membership_key(path: &str, membership: &BTreeSet<String>) -> String {
    let simplified = display_path(path);
    if membership.contains(&simplified) {
        return simplified;
    }
    if let Some(stripped) = simplified.strip_prefix("src/") {
        if membership.contains(stripped) {
            return stripped.to_string();
        }
    }
    simplified
}
