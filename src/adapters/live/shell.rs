//! Live process executor using `std::process::Command`.

use std::process::Command;

use crate::error::PortError;
use crate::ports::shell::{ShellExecutor, ShellOutput};

/// Live executor that spawns real processes.
pub struct LiveShellExecutor;

impl ShellExecutor for LiveShellExecutor {
    fn run(&self, program: &str, args: &[String]) -> Result<ShellOutput, PortError> {
        let output = Command::new(program).args(args).output()?;
        Ok(ShellOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
