//! Service context bundling the port trait objects.

use std::path::Path;

use crate::adapters::live::{LiveFileSystem, LiveShellExecutor};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingShellExecutor};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;
use crate::ports::shell::ShellExecutor;

/// Bundles the port trait objects a regeneration run needs.
///
/// Constructors wire up different adapter implementations (live or
/// replaying).
pub struct ServiceContext {
    /// Filesystem for tree walking and file I/O.
    pub fs: Box<dyn FileSystem>,
    /// Process executor for the canonicalizer.
    pub shell: Box<dyn ShellExecutor>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, shell: Box<dyn ShellExecutor>) -> Self {
        Self { fs, shell }
    }

    /// Creates a live context backed by the real disk and real processes.
    #[must_use]
    pub fn live() -> Self {
        Self::new(Box::new(LiveFileSystem), Box::new(LiveShellExecutor))
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// Each port gets its own replayer over the same cassette so the
    /// per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette = Cassette::from_yaml(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::replaying_cassette(&cassette))
    }

    /// Creates a replaying context from an already loaded cassette.
    #[must_use]
    pub fn replaying_cassette(cassette: &Cassette) -> Self {
        Self::new(
            Box::new(ReplayingFileSystem::new(CassetteReplayer::new(cassette))),
            Box::new(ReplayingShellExecutor::new(CassetteReplayer::new(cassette))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn replaying_context_serves_both_ports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ctx.cassette.yaml");
        let cassette = Cassette {
            name: "ctx".into(),
            recorded_at: Utc::now(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: "fs".into(),
                    method: "exists".into(),
                    input: json!({"path": "/tree/closure/goog/base.js"}),
                    output: json!(true),
                },
                Interaction {
                    seq: 1,
                    port: "shell".into(),
                    method: "run".into(),
                    input: json!({"program": "go"}),
                    output: json!({"ok": {"exit_code": 3}}),
                },
            ],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert!(ctx.fs.exists(Path::new("/tree/closure/goog/base.js")));
        assert_eq!(ctx.shell.run("go", &[]).unwrap().exit_code, 3);
    }

    #[test]
    fn replaying_reports_unreadable_cassette() {
        let err = ServiceContext::replaying(Path::new("/nonexistent/x.cassette.yaml"))
            .err()
            .unwrap();
        assert!(err.contains("Failed to read cassette file"));
    }
}
