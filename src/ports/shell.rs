//! Process port for running the external canonicalizer.

/// The output of a finished process.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    /// The exit code of the process, or `-1` if it was killed by a signal.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

impl ShellOutput {
    /// Returns `true` when the process exited with status 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes external programs.
///
/// Abstracting process execution allows deterministic replay by recording
/// and replaying command outputs during cassette playback.
pub trait ShellExecutor: Send + Sync {
    /// Runs `program` with `args`, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run(&self, program: &str, args: &[String]) -> Result<ShellOutput, crate::error::PortError>;
}
