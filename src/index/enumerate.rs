//! Locating the tree root and listing the files below the scan roots.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Error;
use crate::ports::FileSystem;

/// A directory, relative to the tree root, whose files are scanned.
#[derive(Debug, Clone, Copy)]
pub struct ScanRoot {
    /// Tree-relative directory, `/`-separated.
    pub path: &'static str,
    /// Whether a missing directory aborts the run.
    pub required: bool,
}

/// Scan roots in precedence order.
pub const SCAN_ROOTS: &[ScanRoot] = &[
    ScanRoot { path: "closure/goog", required: true },
    ScanRoot { path: "third_party/closure/goog", required: false },
];

/// Derives the tree root from the anchor file `closure/goog/base.js`.
///
/// # Errors
///
/// The root is `<anchor directory>/../..`, kept as literal `..` steps so
/// relative anchors and anchors that already contain `..` resolve the way
/// the operating system resolves them.
///
/// # Errors
///
/// Returns [`Error::AnchorNotFound`] if the anchor does not exist.
pub fn locate_tree_root(fs: &dyn FileSystem, anchor: &Path) -> Result<PathBuf, Error> {
    if !fs.exists(anchor) {
        return Err(Error::AnchorNotFound(anchor.to_path_buf()));
    }
    anchor
        .parent()
        .map(|dir| dir.join("../.."))
        .ok_or_else(|| Error::AnchorNotFound(anchor.to_path_buf()))
}

/// Lists every file below `roots`, as sorted tree-relative paths.
///
/// A file reachable from more than one root appears once.
///
/// # Errors
///
/// Returns [`Error::MissingRoot`] for an absent required root and
/// [`Error::Io`] if a directory cannot be walked.
pub fn enumerate(
    fs: &dyn FileSystem,
    tree_root: &Path,
    roots: &[ScanRoot],
) -> Result<Vec<String>, Error> {
    let mut files = Vec::new();
    for root in roots {
        let dir = tree_root.join(root.path);
        if !fs.exists(&dir) {
            if root.required {
                return Err(Error::MissingRoot(dir));
            }
            debug!(root = root.path, "optional scan root absent");
            continue;
        }
        let found = fs.walk_files(&dir).map_err(|e| Error::io("walk", &dir, e))?;
        debug!(root = root.path, files = found.len(), "walked scan root");
        files.extend(found.into_iter().map(|f| format!("{}/{f}", root.path)));
    }
    files.sort();
    files.dedup();
    Ok(files)
}
