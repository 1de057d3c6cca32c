//! YAML manifest of every library, for consumers of the dependency graph.

use serde::{Deserialize, Serialize};

use super::target;
use super::FileRecord;
use crate::error::Error;

/// All libraries found in the tree, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// One entry per raw or providing library.
    pub libraries: Vec<LibraryEntry>,
}

/// A library source file and its declared relationships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    /// Tree-relative source path.
    pub path: String,
    /// Build target producing the file.
    pub target: String,
    /// Declared symbols, in file order.
    pub provides: Vec<String>,
    /// Required symbols, sorted.
    pub requires: Vec<String>,
    /// Whether the library is for test code only.
    pub test_only: bool,
    /// Whether the library has no provide declaration.
    pub raw: bool,
}

impl Manifest {
    /// Collects the libraries among `records`.
    #[must_use]
    pub fn from_records(records: &[FileRecord]) -> Self {
        let libraries = records
            .iter()
            .filter(|r| r.is_library())
            .map(|r| LibraryEntry {
                path: r.path.clone(),
                target: target::resolve(&r.path).to_string(),
                provides: r.provides().to_vec(),
                requires: r.requires().to_vec(),
                test_only: r.is_test_only(),
                raw: r.is_raw_library(),
            })
            .collect();
        Self { libraries }
    }

    /// Serializes the manifest as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Manifest`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}
