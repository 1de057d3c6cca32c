//! Provide/require index: scan a source tree, classify each file, and build
//! the symbol table that maps every provided symbol to its build target.
//!
//! The pipeline is a single synchronous pass:
//! [`enumerate`] → [`classify`] → [`table`] → [`target`] → [`emit`].

pub mod classify;
pub mod emit;
pub mod enumerate;
pub mod manifest;
pub mod table;
pub mod target;

use std::path::Path;

use crate::error::Error;
use crate::ports::FileSystem;

/// How a scanned file participates in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    /// Matched the ignore patterns; never read.
    Ignored,
    /// A test-only file that is itself a unit test; excluded entirely.
    UnitTest,
    /// A non-JavaScript file; never read.
    Asset,
    /// A library without any provide or module declaration.
    Raw,
    /// A library declaring at least one symbol.
    Library {
        /// Declared symbols, in file order.
        provides: Vec<String>,
        /// Required symbols, sorted and de-duplicated.
        requires: Vec<String>,
        /// Whether the symbols are meant for test code only.
        test_only: bool,
    },
}

/// Classification of a single file, keyed by its tree-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path relative to the tree root, `/`-separated.
    pub path: String,
    /// How the file participates.
    pub kind: FileKind,
}

impl FileRecord {
    /// Symbols declared by this file (empty unless it is a library).
    #[must_use]
    pub fn provides(&self) -> &[String] {
        match &self.kind {
            FileKind::Library { provides, .. } => provides,
            _ => &[],
        }
    }

    /// Symbols required by this file (empty unless it is a library).
    #[must_use]
    pub fn requires(&self) -> &[String] {
        match &self.kind {
            FileKind::Library { requires, .. } => requires,
            _ => &[],
        }
    }

    /// Whether the file was skipped by path.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.kind == FileKind::Ignored
    }

    /// Whether the file is a library with no provide declaration.
    #[must_use]
    pub fn is_raw_library(&self) -> bool {
        self.kind == FileKind::Raw
    }

    /// Whether the file is a test-only library.
    #[must_use]
    pub fn is_test_only(&self) -> bool {
        matches!(self.kind, FileKind::Library { test_only: true, .. })
    }

    /// Whether the file is part of the library list (raw or providing).
    #[must_use]
    pub fn is_library(&self) -> bool {
        matches!(self.kind, FileKind::Raw | FileKind::Library { .. })
    }
}

/// Enumerates and classifies every file below the scan roots of `tree_root`.
///
/// Records come back in enumeration order, which later stages rely on.
///
/// # Errors
///
/// Returns an error if a required scan root is missing or any file cannot
/// be listed or read.
pub fn scan(fs: &dyn FileSystem, tree_root: &Path) -> Result<Vec<FileRecord>, Error> {
    let paths = enumerate::enumerate(fs, tree_root, enumerate::SCAN_ROOTS)?;
    paths.into_iter().map(|path| classify::classify(fs, tree_root, path)).collect()
}
