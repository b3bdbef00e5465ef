//! Scanner result types.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::InvalidReason;

/// A discovered game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Unique within one catalog build; not stable across builds.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Absolute path to the main executable.
    pub path: PathBuf,
    /// Cover image: a local file path or a remote URL.
    #[serde(default)]
    pub icon_ref: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub last_played: Option<DateTime<Utc>>,
    pub added_at: DateTime<Utc>,
    /// Name of the scan root's subdirectory this game was found in.
    pub source_directory_name: String,
}

impl GameRecord {
    /// Returns the game's directory (the executable's parent).
    pub fn game_dir(&self) -> Option<&Path> {
        self.path.parent()
    }
}

/// What happened to a scan root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum RootStatus {
    Scanned,
    Invalid { reason: InvalidReason },
    Unreadable { error: String },
}

/// What happened to one candidate directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum CandidateOutcome {
    /// A game was recorded with this id.
    Game { id: String },
    /// No file looked executable.
    NoExecutable,
    /// The directory could not be listed.
    Unreadable { error: String },
}

/// Outcome for one candidate directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateReport {
    pub directory: PathBuf,
    #[serde(flatten)]
    pub outcome: CandidateOutcome,
}

/// Full result of scanning one root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub root: PathBuf,
    pub status: RootStatus,
    pub games: Vec<GameRecord>,
    pub candidates: Vec<CandidateReport>,
}

impl ScanReport {
    pub(crate) fn new(root: &Path, status: RootStatus) -> Self {
        Self {
            root: root.to_path_buf(),
            status,
            games: Vec::new(),
            candidates: Vec::new(),
        }
    }
}
