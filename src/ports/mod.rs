//! Port traits defining external boundaries.
//!
//! The scanner touches the outside world in exactly two places: the source
//! tree on disk and the canonicalizer process run over the generated file.
//! Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod shell;

pub use filesystem::FileSystem;
pub use shell::{ShellExecutor, ShellOutput};
