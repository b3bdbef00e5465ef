//! One-level-deep scan of a game root.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::classify::looks_executable;
use crate::error::ScanError;
use crate::naming::{format_game_name, game_id, has_name_affinity};
use crate::types::{CandidateOutcome, CandidateReport, GameRecord, RootStatus, ScanReport};
use crate::validate::validate_path;

/// Scans game roots. All records produced by one scanner share its build
/// timestamp.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryScanner {
    build_time: DateTime<Utc>,
}

impl DirectoryScanner {
    pub fn new(build_time: DateTime<Utc>) -> Self {
        Self { build_time }
    }

    /// Scans one root and reports every candidate's outcome.
    ///
    /// Never fails: an invalid or unreadable root yields a report with no
    /// games, and an unreadable candidate only skips that candidate.
    pub fn scan(&self, root: &Path) -> ScanReport {
        let validation = validate_path(root);
        if let Some(reason) = validation.reason {
            let err = ScanError::InvalidRoot {
                path: root.to_path_buf(),
                reason,
            };
            tracing::warn!(error = %err, "skipping scan root");
            return ScanReport::new(root, RootStatus::Invalid { reason });
        }

        let candidates = match list_candidates(root) {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!(error = %err, "skipping scan root");
                return ScanReport::new(
                    root,
                    RootStatus::Unreadable {
                        error: err.to_string(),
                    },
                );
            }
        };

        let mut report = ScanReport::new(root, RootStatus::Scanned);

        for (dir, dir_name) in candidates {
            let outcome = match self.scan_candidate(&dir, &dir_name) {
                Ok(Some(record)) => {
                    let id = record.id.clone();
                    tracing::debug!(id = %id, path = %record.path.display(), "game found");
                    report.games.push(record);
                    CandidateOutcome::Game { id }
                }
                Ok(None) => {
                    tracing::debug!(dir = %dir.display(), "no executable, not a game");
                    CandidateOutcome::NoExecutable
                }
                Err(err) => {
                    tracing::warn!(error = %err, "skipping game candidate");
                    CandidateOutcome::Unreadable {
                        error: err.to_string(),
                    }
                }
            };
            report.candidates.push(CandidateReport {
                directory: dir,
                outcome,
            });
        }

        tracing::info!(
            root = %root.display(),
            games = report.games.len(),
            candidates = report.candidates.len(),
            "scan root finished"
        );
        report
    }

    fn scan_candidate(&self, dir: &Path, dir_name: &str) -> Result<Option<GameRecord>, ScanError> {
        let files = list_files(dir)?;

        let Some(exe) = select_main_executable(&files, dir_name) else {
            return Ok(None);
        };

        Ok(Some(GameRecord {
            id: game_id(dir_name, self.build_time),
            name: format_game_name(dir_name),
            path: dir.join(exe),
            icon_ref: None,
            description: None,
            last_played: None,
            added_at: self.build_time,
            source_directory_name: dir_name.to_string(),
        }))
    }
}

/// Scans one root with a fresh build timestamp and returns only the games.
pub fn scan(root: &Path) -> Vec<GameRecord> {
    DirectoryScanner::new(Utc::now()).scan(root).games
}

/// Picks the main executable among a candidate's files.
///
/// Files whose stem matches the directory name win over incidental
/// executables (installers, redistributables); otherwise the first
/// executable-looking file is used. Ties are broken by lexical file name.
pub fn select_main_executable<'a>(files: &'a [String], dir_name: &str) -> Option<&'a str> {
    let mut executables: Vec<&str> = files
        .iter()
        .map(String::as_str)
        .filter(|name| looks_executable(name))
        .collect();
    executables.sort_unstable();

    executables
        .iter()
        .find(|name| has_name_affinity(file_stem(name), dir_name))
        .or_else(|| executables.first())
        .copied()
}

fn file_stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
}

/// Lists the root's visible subdirectories, sorted by name.
fn list_candidates(root: &Path) -> Result<Vec<(PathBuf, String)>, ScanError> {
    let entries = fs::read_dir(root).map_err(|e| ScanError::read(root, e))?;

    let mut candidates: Vec<(PathBuf, String)> = entries
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            if !path.is_dir() {
                return None;
            }
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(name) => {
                    tracing::debug!(name = ?name, "skipping non UTF-8 directory name");
                    return None;
                }
            };
            // Skip hidden directories.
            if name.starts_with('.') {
                return None;
            }
            Some((path, name))
        })
        .collect();

    candidates.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(candidates)
}

/// Lists the names of a candidate's immediate files.
fn list_files(dir: &Path) -> Result<Vec<String>, ScanError> {
    let entries = fs::read_dir(dir).map_err(|e| ScanError::read(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScanError::read(dir, e))?;
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => files.push(name),
            Err(name) => {
                tracing::debug!(name = ?name, "skipping non UTF-8 file name");
            }
        }
    }
    Ok(files)
}
