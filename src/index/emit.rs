//! Rendering the symbol table as generated Go source and canonicalizing it.

use std::fmt::Write as _;
use std::path::Path;

use tracing::{info, warn};

use super::table::SymbolTable;
use crate::context::ServiceContext;
use crate::error::Error;

const HEADER: &str = "// DO NOT EDIT -- bazel run //language/js/closure_library:regenerate -- $PWD/closure_library.go\n\n";
const PACKAGE: &str = "package closure_library\n\n";
const MAP_OPEN: &str = "var PROVIDE_TO_TARGET = map[string]string{\n";
const MAP_CLOSE: &str = "}\n";

/// Default canonicalizer command line.
pub const DEFAULT_FORMATTER: &str = "go fmt";

/// Renders the generated source for `table`, one entry per symbol in
/// ascending order.
#[must_use]
pub fn render(table: &SymbolTable) -> String {
    let mut out = String::from(HEADER);
    out.push_str(PACKAGE);
    out.push_str(MAP_OPEN);
    for (symbol, target) in table.targets() {
        let _ = writeln!(out, "\t\"{symbol}\": \"{target}\",");
    }
    out.push_str(MAP_CLOSE);
    out
}

/// An external program that rewrites a source file in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonicalizer {
    program: String,
    args: Vec<String>,
}

impl Canonicalizer {
    /// Parses a whitespace-separated command line. Returns `None` when the
    /// command is blank.
    #[must_use]
    pub fn parse(command: &str) -> Option<Self> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Self { program, args: words.collect() })
    }

    /// Runs the canonicalizer over `path` and returns its exit code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Canonicalize`] if the process cannot be started.
    pub fn run(&self, ctx: &ServiceContext, path: &Path) -> Result<i32, Error> {
        let mut args = self.args.clone();
        args.push(path.display().to_string());
        let output = ctx.shell.run(&self.program, &args).map_err(|source| Error::Canonicalize {
            command: self.to_string(),
            source,
        })?;
        if !output.success() {
            warn!(
                command = %self,
                exit_code = output.exit_code,
                stderr = %output.stderr.trim_end(),
                "canonicalizer failed"
            );
        }
        Ok(output.exit_code)
    }
}

impl std::fmt::Display for Canonicalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Writes the rendered table to `output`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub fn write_table(ctx: &ServiceContext, table: &SymbolTable, output: &Path) -> Result<(), Error> {
    ctx.fs.write_atomic(output, &render(table)).map_err(|e| Error::io("write", output, e))?;
    info!(path = %output.display(), entries = table.len(), "wrote provide table");
    Ok(())
}
