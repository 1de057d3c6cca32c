//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::index::emit::DEFAULT_FORMATTER;

/// Top-level CLI parser for `provmap`.
#[derive(Debug, Parser)]
#[command(
    name = "provmap",
    version,
    about = "Generate the provide-to-target table for a Closure Library checkout"
)]
pub struct Cli {
    /// Path to `closure/goog/base.js` inside the source tree.
    pub anchor: PathBuf,
    /// Absolute path of the generated Go source file.
    pub output: PathBuf,
    /// Command run over the output file after it is written.
    #[arg(long, env = "PROVMAP_FORMATTER", default_value = DEFAULT_FORMATTER)]
    pub formatter: String,
    /// Leave the output file exactly as rendered.
    #[arg(long)]
    pub skip_format: bool,
    /// Also write a YAML manifest of every library and its requires.
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,
}
