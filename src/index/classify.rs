//! Per-file classification and provide/require extraction.
//!
//! Matching is purely textual. A declaration this module does not recognize
//! is simply not extracted; that is never an error.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{FileKind, FileRecord};
use crate::error::Error;
use crate::ports::FileSystem;

static PROVIDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^goog\.(?:provide|module)\(['"]([^'"]+)"#).expect("provide pattern")
});

static REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^(?:(?:const|var) .* = )?goog\.require\(['"]([^'"]+)"#)
        .expect("require pattern")
});

static TEST_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^goog\.setTestOnly\(").expect("test-only pattern"));

// Test-only files that forgot to call goog.setTestOnly().
static TEST_ONLY_PATHS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^closure/goog/labs/testing/|^closure/goog/testing/net/mockiframeio\.js$",
    )
    .expect("test-only paths pattern")
});

static UNIT_TEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)goog\.require\(.goog\.testing\.testSuite|^function (?:setUp|tearDown)\b",
    )
    .expect("unit-test pattern")
});

static IGNORE_PATHS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        &[
            r"_perf",
            r"_test",
            r"/demos/",
            r"/testdata/",
            r"^closure/goog/base\.js$",
            r"^closure/goog/deps\.js$",
            r"^closure/goog/transitionalforwarddeclarations\.js$",
            r"^closure/goog/transpile\.js$",
            r"^closure/goog/debug_loader_integration_tests/",
            r"^third_party/closure/goog/osapi",
        ]
        .join("|"),
    )
    .expect("ignore pattern")
});

/// Returns `true` if `path` is excluded from the index without being read.
#[must_use]
pub fn is_ignored(path: &str) -> bool {
    IGNORE_PATHS.is_match(path)
}

/// Symbols declared via `goog.provide` or `goog.module`, in file order.
#[must_use]
pub fn extract_provides(content: &str) -> Vec<String> {
    PROVIDE.captures_iter(content).map(|c| c[1].to_string()).collect()
}

/// Symbols pulled in via `goog.require`, sorted and de-duplicated.
#[must_use]
pub fn extract_requires(content: &str) -> Vec<String> {
    let mut requires: Vec<String> =
        REQUIRE.captures_iter(content).map(|c| c[1].to_string()).collect();
    requires.sort();
    requires.dedup();
    requires
}

fn is_test_only(path: &str, content: &str) -> bool {
    TEST_ONLY_PATHS.is_match(path) || TEST_ONLY.is_match(content)
}

/// Classifies a source file from its path and contents.
#[must_use]
pub fn classify_source(path: &str, content: &str) -> FileKind {
    let provides = extract_provides(content);
    if provides.is_empty() {
        return FileKind::Raw;
    }
    let test_only = is_test_only(path, content);
    if test_only && UNIT_TEST.is_match(content) {
        return FileKind::UnitTest;
    }
    FileKind::Library { provides, requires: extract_requires(content), test_only }
}

/// Classifies the file at tree-relative `path`, reading it only when needed.
///
/// # Errors
///
/// Returns [`Error::Io`] if a JavaScript file cannot be read.
pub fn classify(fs: &dyn FileSystem, tree_root: &Path, path: String) -> Result<FileRecord, Error> {
    let kind = if is_ignored(&path) {
        FileKind::Ignored
    } else if !path.ends_with(".js") {
        FileKind::Asset
    } else {
        let full = tree_root.join(&path);
        let content = fs.read_to_string(&full).map_err(|e| Error::io("read", &full, e))?;
        classify_source(&path, &content)
    };
    debug!(path = %path, kind = ?kind, "classified");
    Ok(FileRecord { path, kind })
}
