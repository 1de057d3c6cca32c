//! Folding file records into the symbol table.

use std::collections::BTreeMap;

use tracing::warn;

use super::target::{self, TargetId};
use super::FileRecord;

/// Maps each provided symbol to the file that owns it, and each library to
/// its required symbols.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    owners: BTreeMap<String, String>,
    requires: BTreeMap<String, Vec<String>>,
}

impl SymbolTable {
    /// Folds `records` in order. A symbol provided by several files belongs
    /// to the last one.
    #[must_use]
    pub fn build(records: &[FileRecord]) -> Self {
        let mut table = Self::default();
        for record in records.iter().filter(|r| r.is_library()) {
            for provide in record.provides() {
                if let Some(previous) = table.owners.insert(provide.clone(), record.path.clone()) {
                    warn!(
                        symbol = %provide,
                        previous = %previous,
                        owner = %record.path,
                        "symbol provided by more than one file; keeping the later one"
                    );
                }
            }
            table.requires.insert(record.path.clone(), record.requires().to_vec());
        }
        table
    }

    /// Number of distinct symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Whether no symbol is provided.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// The file that owns `symbol`.
    #[must_use]
    pub fn owner(&self, symbol: &str) -> Option<&str> {
        self.owners.get(symbol).map(String::as_str)
    }

    /// The symbols required by the library at `path`.
    #[must_use]
    pub fn requires_of(&self, path: &str) -> Option<&[String]> {
        self.requires.get(path).map(Vec::as_slice)
    }

    /// `(symbol, target)` pairs sorted by symbol.
    pub fn targets(&self) -> impl Iterator<Item = (&str, TargetId)> + '_ {
        self.owners.iter().map(|(symbol, path)| (symbol.as_str(), target::resolve(path)))
    }
}
