//! Game directory scanning.
//!
//! Turns a scan root (a directory whose immediate subdirectories are
//! installed games) into [`GameRecord`]s.
//!
//! # Pipeline
//!
//! 1. **Validate**: the root must be an absolute, readable directory
//! 2. **List**: every immediate subdirectory is a candidate
//! 3. **Select**: pick the candidate's main executable by name affinity
//! 4. **Record**: derive id and display name from the directory name

pub mod classify;
pub mod error;
pub mod naming;
pub mod scanner;
pub mod types;
pub mod validate;

// Re-export primary types for convenience.
pub use classify::{BinaryKind, is_desktop_entry, looks_executable, sniff};
pub use error::ScanError;
pub use naming::{format_game_name, game_id, slug};
pub use scanner::{DirectoryScanner, scan, select_main_executable};
pub use types::{CandidateOutcome, CandidateReport, GameRecord, RootStatus, ScanReport};
pub use validate::{InvalidReason, Validation, validate, validate_path};
