//! Error type shared by every stage of a regeneration run.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by the port traits.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort a regeneration run.
#[derive(Debug, Error)]
pub enum Error {
    /// Command-line arguments could not be parsed.
    #[error("{0}")]
    Usage(#[from] clap::Error),

    /// The output path must be absolute.
    #[error("output path must be absolute: {}", .0.display())]
    OutputNotAbsolute(PathBuf),

    /// The anchor file used to locate the tree root does not exist.
    #[error("anchor file not found: {}", .0.display())]
    AnchorNotFound(PathBuf),

    /// A required scan root is missing from the source tree.
    #[error("scan root not found: {}", .0.display())]
    MissingRoot(PathBuf),

    /// A filesystem operation failed.
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        /// What was being attempted (e.g. "read", "write").
        action: &'static str,
        /// The path involved.
        path: PathBuf,
        /// The underlying port error.
        source: PortError,
    },

    /// The canonicalizer process could not be started.
    #[error("failed to run canonicalizer `{command}`: {source}")]
    Canonicalize {
        /// The command line that was attempted.
        command: String,
        /// The underlying port error.
        source: PortError,
    },

    /// The library manifest could not be serialized.
    #[error("failed to serialize manifest: {0}")]
    Manifest(#[from] serde_yaml::Error),
}

impl Error {
    /// Builds an [`Error::Io`] for the given action and path.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: PortError) -> Self {
        Self::Io { action, path: path.into(), source }
    }
}
