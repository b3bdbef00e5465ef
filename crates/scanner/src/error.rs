//! Scan error types.

use std::path::PathBuf;

use crate::validate::InvalidReason;

/// Errors produced while scanning a root.
///
/// None of these abort a catalog build; they are reported per root or per
/// candidate in a [`ScanReport`](crate::ScanReport).
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("invalid scan root {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: InvalidReason },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
