//! Command dispatch and handlers.

pub mod regenerate;

use crate::cli::Cli;
use crate::context::ServiceContext;
use crate::error::Error;

/// Run a parsed invocation against the live filesystem and processes.
///
/// Returns the process exit status.
///
/// # Errors
///
/// Returns an error if scanning or writing fails.
pub fn dispatch(cli: &Cli) -> Result<u8, Error> {
    let ctx = ServiceContext::live();
    let options = regenerate::Options::from_cli(cli);
    let report = regenerate::run_with_context(&ctx, &options)?;
    println!(
        "Scanned {} files: {} libraries, {} symbols written to {}",
        report.files,
        report.libraries,
        report.symbols,
        options.output.display(),
    );
    Ok(report.exit_status())
}
