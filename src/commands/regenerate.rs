//! The regeneration run: scan, build the table, emit, canonicalize.

use std::path::PathBuf;

use tracing::info;

use crate::cli::Cli;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::index::emit::{self, Canonicalizer};
use crate::index::enumerate;
use crate::index::manifest::Manifest;
use crate::index::table::SymbolTable;

/// Inputs for one regeneration run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Anchor file inside the source tree.
    pub anchor: PathBuf,
    /// Absolute output path for the generated table.
    pub output: PathBuf,
    /// Canonicalizer to run after writing, if any.
    pub canonicalizer: Option<Canonicalizer>,
    /// Optional manifest output path.
    pub manifest: Option<PathBuf>,
}

impl Options {
    /// Builds options from parsed CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let canonicalizer =
            if cli.skip_format { None } else { Canonicalizer::parse(&cli.formatter) };
        Self {
            anchor: cli.anchor.clone(),
            output: cli.output.clone(),
            canonicalizer,
            manifest: cli.manifest.clone(),
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Files enumerated below the scan roots.
    pub files: usize,
    /// Raw and providing libraries.
    pub libraries: usize,
    /// Distinct symbols in the table.
    pub symbols: usize,
    /// Canonicalizer exit code (0 when skipped).
    pub canonicalizer_exit: i32,
}

impl Report {
    /// Process exit status: the canonicalizer's, clamped to `1..=255` when
    /// it failed.
    #[must_use]
    pub fn exit_status(&self) -> u8 {
        match self.canonicalizer_exit {
            0 => 0,
            code => u8::try_from(code).unwrap_or(1),
        }
    }
}

/// Runs a full regeneration using the ports in `ctx`.
///
/// # Errors
///
/// Returns an error if the output path is relative, the tree cannot be
/// scanned, an output cannot be written, or the canonicalizer cannot start.
pub fn run_with_context(ctx: &ServiceContext, options: &Options) -> Result<Report, Error> {
    if !options.output.is_absolute() {
        return Err(Error::OutputNotAbsolute(options.output.clone()));
    }
    let tree_root = enumerate::locate_tree_root(ctx.fs.as_ref(), &options.anchor)?;
    let records = crate::index::scan(ctx.fs.as_ref(), &tree_root)?;
    let table = SymbolTable::build(&records);

    let libraries = records.iter().filter(|r| r.is_library()).count();
    info!(
        root = %tree_root.display(),
        files = records.len(),
        libraries,
        symbols = table.len(),
        "scanned source tree"
    );

    // Nothing is written until every output has rendered, and the manifest
    // only lands once the table has.
    let manifest = match &options.manifest {
        Some(path) => Some((path, Manifest::from_records(&records).to_yaml()?)),
        None => None,
    };
    emit::write_table(ctx, &table, &options.output)?;
    if let Some((path, yaml)) = manifest {
        ctx.fs.write_atomic(path, &yaml).map_err(|e| Error::io("write", path, e))?;
    }
    let canonicalizer_exit = match &options.canonicalizer {
        Some(canonicalizer) => canonicalizer.run(ctx, &options.output)?,
        None => 0,
    };

    Ok(Report { files: records.len(), libraries, symbols: table.len(), canonicalizer_exit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn fs(seq: u64, method: &str, path: &str, output: serde_json::Value) -> Interaction {
        Interaction {
            seq,
            port: "fs".into(),
            method: method.into(),
            input: json!({"path": path}),
            output,
        }
    }

    /// A tree with two libraries, one ignored test and no third_party dir.
    fn make_cassette(formatter_exit: i32) -> Cassette {
        Cassette {
            name: "regenerate".into(),
            recorded_at: Utc::now(),
            interactions: vec![
                fs(0, "exists", "/tree/closure/goog/base.js", json!(true)),
                fs(1, "exists", "/tree/closure/goog", json!(true)),
                fs(2, "walk_files", "/tree/closure/goog", json!({"ok": ["b.js", "a.js", "a_test.js"]})),
                fs(3, "exists", "/tree/third_party/closure/goog", json!(false)),
                fs(4, "read_to_string", "/tree/closure/goog/a.js", json!({"ok": "goog.provide('pkg.A');\n"})),
                fs(
                    5,
                    "read_to_string",
                    "/tree/closure/goog/b.js",
                    json!({"ok": "goog.provide('pkg.B');\ngoog.require('pkg.A');\n"}),
                ),
                fs(6, "write_atomic", "/out/table.go", json!(null)),
                Interaction {
                    seq: 7,
                    port: "shell".into(),
                    method: "run".into(),
                    input: json!({"program": "go", "args": ["fmt", "/out/table.go"]}),
                    output: json!({"ok": {"exit_code": formatter_exit, "stdout": "", "stderr": ""}}),
                },
            ],
        }
    }

    fn options() -> Options {
        Options {
            anchor: PathBuf::from("/tree/closure/goog/base.js"),
            output: PathBuf::from("/out/table.go"),
            canonicalizer: Canonicalizer::parse("go fmt"),
            manifest: None,
        }
    }

    #[test]
    fn regenerates_from_cassette() {
        let ctx = ServiceContext::replaying_cassette(&make_cassette(0));
        let report = run_with_context(&ctx, &options()).unwrap();

        assert_eq!(
            report,
            Report { files: 3, libraries: 2, symbols: 2, canonicalizer_exit: 0 }
        );
        assert_eq!(report.exit_status(), 0);
    }

    #[test]
    fn canonicalizer_failure_becomes_exit_status() {
        let ctx = ServiceContext::replaying_cassette(&make_cassette(2));
        let report = run_with_context(&ctx, &options()).unwrap();
        assert_eq!(report.exit_status(), 2);
    }

    #[test]
    fn relative_output_is_rejected_before_scanning() {
        let ctx = ServiceContext::replaying_cassette(&make_cassette(0));
        let mut opts = options();
        opts.output = PathBuf::from("table.go");
        let err = run_with_context(&ctx, &opts).unwrap_err();
        assert!(matches!(err, Error::OutputNotAbsolute(_)));
    }

    #[test]
    fn unreadable_source_aborts_before_writing() {
        let mut cassette = make_cassette(0);
        cassette.interactions[4].output = json!({"err": "permission denied"});
        cassette.interactions.truncate(5);
        let ctx = ServiceContext::replaying_cassette(&cassette);

        let err = run_with_context(&ctx, &options()).unwrap_err();
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn failed_table_write_leaves_no_manifest_behind() {
        // Only one write is recorded; a manifest written first would take it.
        let mut cassette = make_cassette(0);
        cassette.interactions[6].output = json!({"err": "Is a directory"});
        cassette.interactions.truncate(7);
        let ctx = ServiceContext::replaying_cassette(&cassette);
        let mut opts = options();
        opts.manifest = Some(PathBuf::from("/out/libs.yaml"));

        let err = run_with_context(&ctx, &opts).unwrap_err();
        assert!(err.to_string().contains("/out/table.go"), "{err}");
    }

    #[test]
    fn exit_status_clamps_out_of_range_codes() {
        let report = |code| Report { files: 0, libraries: 0, symbols: 0, canonicalizer_exit: code };
        assert_eq!(report(-1).exit_status(), 1);
        assert_eq!(report(256).exit_status(), 1);
        assert_eq!(report(7).exit_status(), 7);
    }
}
