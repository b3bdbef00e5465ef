//! The catalog facade: builds the game list and launches games.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use futures_util::future::join_all;
use gameshelf_launch::{LaunchDispatcher, LaunchResult};
use gameshelf_scanner::{
    CandidateOutcome, CandidateReport, DirectoryScanner, GameRecord, RootStatus, ScanReport,
    Validation,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::enrich::MetadataEnricher;
use crate::state::{JsonPlayStateStore, PlayStateStore};

/// Per-root outcome of a catalog build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootReport {
    pub root: PathBuf,
    #[serde(flatten)]
    pub status: RootStatus,
    pub candidates: Vec<CandidateReport>,
}

/// Result of [`Library::list_games`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogReport {
    /// Games from every root, in root order.
    pub games: Vec<GameRecord>,
    /// One entry per requested root, in request order.
    pub roots: Vec<RootReport>,
}

/// Game catalog and launcher.
pub struct Library {
    dispatcher: Arc<LaunchDispatcher>,
    enricher: MetadataEnricher,
    play_state: Arc<dyn PlayStateStore>,
}

impl Library {
    /// Creates a library with local-only enrichment and in-memory play state.
    pub fn new(dispatcher: LaunchDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            enricher: MetadataEnricher::local_only(),
            play_state: Arc::new(JsonPlayStateStore::in_memory()),
        }
    }

    pub fn with_enricher(mut self, enricher: MetadataEnricher) -> Self {
        self.enricher = enricher;
        self
    }

    pub fn with_play_state(mut self, store: impl PlayStateStore + 'static) -> Self {
        self.play_state = Arc::new(store);
        self
    }

    /// Scans every root concurrently and returns the combined catalog.
    ///
    /// Roots are scanned independently; results keep `roots` order. Ids are
    /// made unique across the whole build, stored play state is applied and
    /// each record is enriched.
    pub async fn list_games(&self, roots: &[PathBuf]) -> CatalogReport {
        let scanner = DirectoryScanner::new(Utc::now());

        let tasks = roots.iter().cloned().map(|root| {
            tokio::task::spawn_blocking(move || scanner.scan(&root))
        });
        let scanned = join_all(tasks).await;

        let mut games = Vec::new();
        let mut reports = Vec::with_capacity(roots.len());
        let mut ids = IdAllocator::default();

        for (root, joined) in roots.iter().zip(scanned) {
            let report = match joined {
                Ok(report) => report,
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "scan task failed");
                    ScanReport {
                        root: root.clone(),
                        status: RootStatus::Unreadable {
                            error: e.to_string(),
                        },
                        games: Vec::new(),
                        candidates: Vec::new(),
                    }
                }
            };

            let (root_games, report) = ids.assign(report);
            games.extend(root_games);
            reports.push(report);
        }

        self.apply_play_state(&mut games).await;

        let games = self.enricher.enrich_all(games).await;

        info!(
            roots = reports.len(),
            games = games.len(),
            "catalog built"
        );

        CatalogReport {
            games,
            roots: reports,
        }
    }

    /// Launches `target` and records the play time on success.
    pub async fn launch(&self, target: &Path) -> LaunchResult {
        let dispatcher = Arc::clone(&self.dispatcher);
        let path = target.to_path_buf();

        let result = match tokio::task::spawn_blocking(move || dispatcher.launch(&path)).await {
            Ok(result) => result,
            Err(e) => {
                warn!(path = %target.display(), error = %e, "launch task failed");
                return LaunchResult::failed(None, e.to_string());
            }
        };

        if result.success {
            let store = Arc::clone(&self.play_state);
            let path = target.to_path_buf();
            let recorded =
                tokio::task::spawn_blocking(move || store.record_played(&path, Utc::now())).await;
            match recorded {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(path = %target.display(), error = %e, "failed to record play state");
                }
                Err(e) => {
                    warn!(path = %target.display(), error = %e, "play state task failed");
                }
            }
        }

        result
    }

    /// Fills `last_played` from the store. Lookups canonicalize paths, so
    /// they run on the blocking pool.
    async fn apply_play_state(&self, games: &mut [GameRecord]) {
        let store = Arc::clone(&self.play_state);
        let paths: Vec<PathBuf> = games.iter().map(|g| g.path.clone()).collect();

        let lookup = tokio::task::spawn_blocking(move || {
            paths
                .iter()
                .map(|path| store.last_played(path))
                .collect::<Vec<_>>()
        });

        match lookup.await {
            Ok(played) => {
                for (game, last_played) in games.iter_mut().zip(played) {
                    game.last_played = last_played;
                }
            }
            Err(e) => warn!(error = %e, "play state lookup failed"),
        }
    }

    /// Checks whether `path` can be used as a scan root.
    pub fn validate_directory(&self, path: &str) -> Validation {
        gameshelf_scanner::validate(path)
    }
}

/// Hands out ids that are unique within one catalog build by suffixing
/// repeats with `-2`, `-3`, ...
#[derive(Debug, Default)]
struct IdAllocator {
    taken: HashSet<String>,
}

impl IdAllocator {
    fn unique(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Rewrites the ids of one root's games and the matching candidate
    /// outcomes. Games appear in the same order as their candidates.
    fn assign(&mut self, report: ScanReport) -> (Vec<GameRecord>, RootReport) {
        let ScanReport {
            root,
            status,
            mut games,
            mut candidates,
        } = report;

        let mut next_game = games.iter_mut();
        for candidate in &mut candidates {
            if let CandidateOutcome::Game { id } = &mut candidate.outcome {
                let unique = self.unique(id);
                if let Some(game) = next_game.next() {
                    game.id = unique.clone();
                }
                *id = unique;
            }
        }

        (
            games,
            RootReport {
                root,
                status,
                candidates,
            },
        )
    }
}
