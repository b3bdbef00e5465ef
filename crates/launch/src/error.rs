//! Launch error types.

use std::path::PathBuf;

use crate::types::LaunchStrategy;

/// Errors produced during a launch attempt.
///
/// The dispatcher turns every one of these into a failed
/// [`LaunchResult`](crate::LaunchResult).
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("launch target must be an absolute path: {}", .0.display())]
    NotAbsolute(PathBuf),

    #[error("cannot access {}: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to grant execute permission on {}: {source}", path.display())]
    Repair {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no compatibility layer configured for Windows executables")]
    NoCompatLayer,

    #[error("failed to start {program} ({strategy}): {source}")]
    Spawn {
        strategy: LaunchStrategy,
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    /// Returns the strategy that was being attempted, if one was chosen.
    pub fn strategy(&self) -> Option<LaunchStrategy> {
        match self {
            LaunchError::Spawn { strategy, .. } => Some(*strategy),
            LaunchError::NoCompatLayer => Some(LaunchStrategy::CompatibilityLayer),
            _ => None,
        }
    }
}
