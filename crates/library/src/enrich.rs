//! Metadata enrichment: sidecar descriptions, local cover art and remote
//! artwork lookup.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use gameshelf_scanner::GameRecord;
use gameshelf_steamgriddb::{ArtworkCache, ArtworkMatch};
use tracing::{debug, warn};

use crate::error::LibraryError;

/// Sidecar files checked for a description, in priority order.
pub const DESCRIPTION_FILES: &[&str] = &["description.txt", "about.txt", "readme.txt"];

/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// File stems recognized as local cover art, in priority order.
pub const COVER_STEMS: &[&str] = &["cover", "icon", "logo"];

/// Image extensions accepted for local cover art.
pub const COVER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Default per-lookup deadline.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves a game name to a display name and cover image.
pub trait ArtworkLookup: Send + Sync {
    fn lookup<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ArtworkMatch>, LibraryError>> + Send + 'a>>;
}

impl ArtworkLookup for gameshelf_steamgriddb::Client {
    fn lookup<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ArtworkMatch>, LibraryError>> + Send + 'a>> {
        Box::pin(async move { Ok(gameshelf_steamgriddb::Client::lookup(self, name).await?) })
    }
}

/// Augments freshly scanned records.
///
/// Local metadata (sidecar description, cover files) always applies. A
/// remote lookup, when configured, may replace the display name and supply
/// a cover when no local one exists. Any failure leaves the record as it was.
#[derive(Clone)]
pub struct MetadataEnricher {
    lookup: Option<Arc<dyn ArtworkLookup>>,
    cache: Arc<ArtworkCache>,
    timeout: Duration,
}

impl Default for MetadataEnricher {
    fn default() -> Self {
        Self::local_only()
    }
}

impl MetadataEnricher {
    /// An enricher that only reads files next to the game.
    pub fn local_only() -> Self {
        Self {
            lookup: None,
            cache: Arc::new(ArtworkCache::in_memory()),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Adds a remote artwork lookup.
    pub fn with_lookup(mut self, lookup: impl ArtworkLookup + 'static) -> Self {
        self.lookup = Some(Arc::new(lookup));
        self
    }

    /// Uses `cache` for lookup results.
    pub fn with_cache(mut self, cache: ArtworkCache) -> Self {
        self.cache = Arc::new(cache);
        self
    }

    /// Sets the per-lookup deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache(&self) -> &ArtworkCache {
        &self.cache
    }

    /// Enriches all records concurrently, preserving order.
    ///
    /// Each record is processed in its own task; if that task fails the
    /// record is returned unchanged.
    pub async fn enrich_all(&self, records: Vec<GameRecord>) -> Vec<GameRecord> {
        let handles: Vec<_> = records
            .iter()
            .cloned()
            .map(|record| {
                let enricher = self.clone();
                tokio::spawn(async move { enricher.enrich(record).await })
            })
            .collect();

        join_all(handles)
            .await
            .into_iter()
            .zip(records)
            .map(|(joined, original)| match joined {
                Ok(enriched) => enriched,
                Err(e) => {
                    warn!(id = %original.id, error = %e, "enrichment task failed, keeping defaults");
                    original
                }
            })
            .collect()
    }

    /// Enriches one record.
    pub async fn enrich(&self, mut record: GameRecord) -> GameRecord {
        if let Some(dir) = record.game_dir().map(Path::to_path_buf) {
            if record.description.is_none() {
                record.description = read_description(&dir).await;
            }
            if record.icon_ref.is_none() {
                record.icon_ref = find_local_cover(&dir)
                    .await
                    .map(|p| p.to_string_lossy().into_owned());
            }
        }

        if let Some(artwork) = self.remote_artwork(&record.name).await {
            debug!(id = %record.id, display_name = %artwork.display_name, "applying remote artwork");
            if !artwork.display_name.trim().is_empty() {
                record.name = artwork.display_name;
            }
            if record.icon_ref.is_none() {
                record.icon_ref = artwork.image_ref;
            }
        }

        record
    }

    /// Returns cached or freshly looked-up artwork. Timeouts and errors are
    /// not cached so a later build can retry.
    async fn remote_artwork(&self, name: &str) -> Option<ArtworkMatch> {
        let lookup = self.lookup.as_ref()?;

        if let Some(cached) = self.cache.get(name) {
            debug!(name, hit = cached.is_some(), "artwork cache hit");
            return cached;
        }

        match tokio::time::timeout(self.timeout, lookup.lookup(name)).await {
            Ok(Ok(found)) => {
                self.cache.insert(name, found.clone());
                found
            }
            Ok(Err(e)) => {
                warn!(name, error = %e, "artwork lookup failed");
                None
            }
            Err(_) => {
                warn!(name, timeout_ms = self.timeout.as_millis() as u64, "artwork lookup timed out");
                None
            }
        }
    }
}

/// Reads the first non-empty sidecar description in `dir`.
pub async fn read_description(dir: &Path) -> Option<String> {
    for file in DESCRIPTION_FILES {
        let Ok(text) = tokio::fs::read_to_string(dir.join(file)).await else {
            continue;
        };
        let text = text.trim();
        if !text.is_empty() {
            return Some(truncate_description(text));
        }
    }
    None
}

/// Truncates to [`MAX_DESCRIPTION_CHARS`], ending with `...` when cut.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() <= MAX_DESCRIPTION_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_DESCRIPTION_CHARS - 3).collect();
    out.truncate(out.trim_end().len());
    out.push_str("...");
    out
}

/// Finds a cover image next to the game executable.
pub async fn find_local_cover(dir: &Path) -> Option<PathBuf> {
    let mut entries = tokio::fs::read_dir(dir).await.ok()?;
    let mut found: Vec<(usize, String, PathBuf)> = Vec::new();

    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        if let Some(rank) = cover_rank(&path) {
            let name = entry.file_name().to_string_lossy().into_owned();
            found.push((rank, name, path));
        }
    }

    found.sort();
    found.into_iter().next().map(|(_, _, path)| path)
}

/// Priority of a cover file by stem, or `None` if it is not cover art.
fn cover_rank(path: &Path) -> Option<usize> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if !COVER_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?.to_ascii_lowercase();
    COVER_STEMS.iter().position(|s| *s == stem)
}
