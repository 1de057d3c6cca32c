//! Core library entry for the `provmap` CLI.
//!
//! `provmap` scans a Closure Library checkout, extracts every
//! `goog.provide`/`goog.module` and `goog.require` declaration, and writes a
//! Go source file mapping each provided symbol to the Bazel target that
//! builds it.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod index;
pub mod ports;

pub use error::Error;

use clap::Parser;

/// Run the CLI with the provided arguments and return the exit status.
///
/// `--help` and `--version` print to stdout and return 0.
///
/// # Errors
///
/// Returns an error when argument parsing fails or the run aborts.
pub fn run<I, T>(args: I) -> Result<u8, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(0);
        }
        Err(err) => return Err(err.into()),
    };
    commands::dispatch(&cli)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_prints_version() {
        assert_eq!(run(["provmap", "--version"]).unwrap(), 0);
    }

    #[test]
    fn run_errors_on_missing_arguments() {
        let err = run(["provmap"]).unwrap_err();
        assert!(matches!(err, super::Error::Usage(_)));
    }

    #[test]
    fn run_errors_on_missing_anchor() {
        let dir = tempfile::tempdir().unwrap();
        let anchor = dir.path().join("closure/goog/base.js");
        let output = dir.path().join("out.go");
        let err = run([std::ffi::OsStr::new("provmap"), anchor.as_os_str(), output.as_os_str()])
            .unwrap_err();
        assert!(matches!(err, super::Error::AnchorNotFound(_)));
    }
}
