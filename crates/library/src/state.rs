//! Play state persistence.
//!
//! Records when each game was last launched, keyed by the canonical path of
//! its executable so the value survives catalog rebuilds (record ids do not).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::error::LibraryError;

/// Stores last-played timestamps.
pub trait PlayStateStore: Send + Sync {
    fn last_played(&self, executable: &Path) -> Option<DateTime<Utc>>;

    fn record_played(&self, executable: &Path, at: DateTime<Utc>) -> Result<(), LibraryError>;
}

/// Play state kept in a JSON object `{ "<canonical path>": "<RFC 3339>" }`.
#[derive(Debug, Default)]
pub struct JsonPlayStateStore {
    path: Option<PathBuf>,
    entries: RwLock<BTreeMap<String, DateTime<Utc>>>,
}

impl JsonPlayStateStore {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads the store at `path`. A missing file starts empty; a corrupt one
    /// is logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(data) => match serde_json::from_slice(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt play state file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: Some(path),
            entries: RwLock::new(entries),
        })
    }

    /// Returns the backing file, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn save(&self, entries: &BTreeMap<String, DateTime<Utc>>) -> Result<(), LibraryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(entries)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

impl PlayStateStore for JsonPlayStateStore {
    fn last_played(&self, executable: &Path) -> Option<DateTime<Utc>> {
        self.entries
            .read()
            .unwrap()
            .get(&state_key(executable))
            .copied()
    }

    fn record_played(&self, executable: &Path, at: DateTime<Utc>) -> Result<(), LibraryError> {
        let mut entries = self.entries.write().unwrap();
        entries.insert(state_key(executable), at);
        self.save(&entries)
    }
}

/// Canonical form of `path`, or `path` itself when it cannot be resolved.
fn state_key(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn in_memory_round() {
        let store = JsonPlayStateStore::in_memory();
        let exe = Path::new("/games/Foo/foo");
        assert!(store.last_played(exe).is_none());

        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        store.record_played(exe, at).unwrap();
        assert_eq!(store.last_played(exe), Some(at));
    }

    #[test]
    fn persisted_across_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("state").join("play_state.json");
        let exe = tmp.path().join("game.x86_64");
        std::fs::write(&exe, b"").unwrap();

        let at = Utc.with_ymd_and_hms(2026, 5, 9, 8, 30, 0).unwrap();
        JsonPlayStateStore::open(&file)
            .unwrap()
            .record_played(&exe, at)
            .unwrap();

        let reopened = JsonPlayStateStore::open(&file).unwrap();
        assert_eq!(reopened.last_played(&exe), Some(at));
    }

    #[cfg(unix)]
    #[test]
    fn keyed_by_canonical_path() {
        let tmp = tempfile::tempdir().unwrap();
        let real = tmp.path().join("real");
        std::fs::create_dir(&real).unwrap();
        std::fs::write(real.join("game"), b"").unwrap();
        std::os::unix::fs::symlink(&real, tmp.path().join("link")).unwrap();

        let store = JsonPlayStateStore::in_memory();
        let at = Utc::now();
        store.record_played(&tmp.path().join("link/game"), at).unwrap();
        assert_eq!(store.last_played(&real.join("game")), Some(at));
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("play_state.json");
        std::fs::write(&file, b"[1, 2").unwrap();

        let store = JsonPlayStateStore::open(&file).unwrap();
        assert!(store.last_played(Path::new("/x")).is_none());
        assert_eq!(store.file_path(), Some(file.as_path()));
    }
}
