//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use crate::cassette::format::Interaction;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::PortError;
use crate::ports::filesystem::FileSystem;

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next(&self, method: &str) -> Interaction {
        let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
        replayer.next_interaction("fs", method)
    }

    fn next_output(&self, method: &str) -> serde_json::Value {
        self.next(method).output
    }
}

/// Extracts a Result from a cassette output JSON value.
///
/// Expects `{"ok": <value>}` or `{"err": "message"}`.
fn extract_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, PortError> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        extract_result(&self.next_output("read_to_string"), "fs::read_to_string")
    }

    /// When the recording carries `input.contents`, the written text must
    /// match it byte for byte.
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let interaction = self.next("write_atomic");
        if let Some(err) = interaction.output.get("err") {
            let msg = err.as_str().unwrap_or("unknown error").to_string();
            return Err(msg.into());
        }
        if let Some(expected) = interaction.input.get("contents").and_then(serde_json::Value::as_str) {
            if expected != contents {
                return Err(format!(
                    "fs::write_atomic: contents written to {} differ from the recording \
                     (seq={})",
                    path.display(),
                    interaction.seq
                )
                .into());
            }
        }
        Ok(())
    }

    fn exists(&self, _path: &Path) -> bool {
        self.next_output("exists").as_bool().expect("fs::exists: expected boolean output")
    }

    fn walk_files(&self, _root: &Path) -> Result<Vec<String>, PortError> {
        extract_result(&self.next_output("walk_files"), "fs::walk_files")
    }
}
