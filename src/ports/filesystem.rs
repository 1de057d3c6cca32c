//! Filesystem port for tree walking and file I/O.

use std::path::Path;

use crate::error::PortError;

/// Provides filesystem access for scanning a source tree and writing output.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Writes `contents` to `path` so that readers never observe a partial
    /// file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write or the final rename fails.
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Recursively lists every regular file below `root`.
    ///
    /// Paths are relative to `root`, use `/` as the separator, and are
    /// sorted lexicographically.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory entry cannot be read.
    fn walk_files(&self, root: &Path) -> Result<Vec<String>, PortError>;
}
