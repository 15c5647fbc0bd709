use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Write-only request telemetry: one JSON file per logged id.
///
/// The storage root is created lazily on the first write and logging the
/// same id twice overwrites the earlier file, so each entry is a "last
/// known state" snapshot rather than an append log. Write failures are
/// reported as warnings and swallowed; a lookup must never fail because
/// its log could not be written.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    root: PathBuf,
}

impl RequestLogger {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The file a given id is persisted at
    pub fn path_for(&self, id: impl Display) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }

    /// Serialize `object` and persist it against `id`, best-effort
    pub fn log(&self, id: impl Display, object: &impl Serialize) {
        let path = self.path_for(id);
        if let Err(err) = write_entry(&self.root, &path, object) {
            warn!("Failed to write request log {}: {}", path.display(), err);
        }
    }
}

fn write_entry(root: &Path, path: &Path, object: &impl Serialize) -> std::io::Result<()> {
    fs::create_dir_all(root)?;
    let payload = serde_json::to_vec(object)?;
    fs::write(path, payload)
}
