//! Name-keyed cache for artwork lookups.
//!
//! Entries live in memory and, optionally, as JSON files under
//! `~/.config/gameshelf/cache/artwork/` named by the SHA-256 hash of the
//! normalized game name. A cached `None` records a lookup that found nothing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::ArtworkMatch;

/// Errors from cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache directory not available")]
    NoCacheDir,
}

/// On-disk entry.
#[derive(Debug, Serialize, Deserialize)]
struct CachedLookup {
    name: String,
    #[serde(default)]
    artwork: Option<ArtworkMatch>,
}

/// Lookup results keyed by game name.
///
/// Reads are shared; concurrent writers for the same name both succeed and
/// the last one wins.
#[derive(Debug, Default)]
pub struct ArtworkCache {
    entries: RwLock<HashMap<String, Option<ArtworkMatch>>>,
    dir: Option<PathBuf>,
}

impl ArtworkCache {
    /// A cache that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A cache persisted as JSON files in `dir`.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn persistent(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            entries: RwLock::new(HashMap::new()),
            dir: Some(dir),
        })
    }

    /// A persistent cache in the default location.
    pub fn open_default() -> Result<Self, CacheError> {
        let base = config_dir().ok_or(CacheError::NoCacheDir)?;
        Self::persistent(artwork_cache_dir_in(&base))
    }

    /// Returns the cached result for `name`, if any.
    ///
    /// The outer `None` means "never looked up"; `Some(None)` means the
    /// lookup ran and found nothing.
    pub fn get(&self, name: &str) -> Option<Option<ArtworkMatch>> {
        let key = cache_key(name);
        if let Some(hit) = self.entries.read().unwrap().get(&key) {
            return Some(hit.clone());
        }

        let dir = self.dir.as_ref()?;
        let path = dir.join(format!("{}.json", hash_key(&key)));
        let data = std::fs::read(&path).ok()?;
        let entry: CachedLookup = match serde_json::from_slice(&data) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "discarding corrupt artwork cache entry");
                let _ = std::fs::remove_file(&path);
                return None;
            }
        };

        self.entries
            .write()
            .unwrap()
            .insert(key, entry.artwork.clone());
        Some(entry.artwork)
    }

    /// Stores the lookup result for `name`.
    ///
    /// Disk write failures are logged; the in-memory entry is kept either way.
    pub fn insert(&self, name: &str, artwork: Option<ArtworkMatch>) {
        let key = cache_key(name);

        if let Some(dir) = &self.dir {
            let path = dir.join(format!("{}.json", hash_key(&key)));
            let entry = CachedLookup {
                name: name.to_string(),
                artwork: artwork.clone(),
            };
            let written = serde_json::to_vec_pretty(&entry)
                .map_err(std::io::Error::other)
                .and_then(|data| std::fs::write(&path, data));
            if let Err(e) = written {
                tracing::warn!(path = %path.display(), error = %e, "failed to persist artwork cache entry");
            }
        }

        self.entries.write().unwrap().insert(key, artwork);
    }

    /// Number of entries loaded in memory.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry, including persisted ones.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.entries.write().unwrap().clear();

        let Some(dir) = &self.dir else {
            return Ok(());
        };
        for entry in std::fs::read_dir(dir)?.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let _ = std::fs::remove_file(&path);
            }
        }
        Ok(())
    }
}

fn artwork_cache_dir_in(config_base: &Path) -> PathBuf {
    config_base.join("gameshelf").join("cache").join("artwork")
}

/// Names differing only in case or surrounding whitespace share an entry.
fn cache_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Creates a deterministic filename hash from a cache key.
///
/// Uses first 16 bytes of SHA-256 (32 hex characters).
pub fn hash_key(key: &str) -> String {
    let hash = Sha256::digest(key.as_bytes());
    hex::encode(&hash[..16])
}

/// Returns the platform-specific config directory.
fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config"))
            })
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(PathBuf::from)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join(".config"))
    }
}
