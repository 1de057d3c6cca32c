//! Mapping tree-relative source paths to build target identifiers.

use std::fmt;

/// Source-tree prefix rewritten to its build-hierarchy equivalent.
const SOURCE_PREFIX: &str = "closure/goog";
/// Build-hierarchy replacement for [`SOURCE_PREFIX`].
const BUILD_PREFIX: &str = "closure/library";

/// A build target label of the form `//<directory>:<name>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(String);

impl TargetId {
    /// The label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves the target that builds the file at tree-relative `path`.
///
/// Pure string rewriting; the filesystem is never consulted.
#[must_use]
pub fn resolve(path: &str) -> TargetId {
    let normalized = path.replace(SOURCE_PREFIX, BUILD_PREFIX);
    let (directory, base) = normalized.rsplit_once('/').unwrap_or(("", &normalized));
    let name = match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => base,
    };
    TargetId(format!("//{directory}:{name}"))
}
