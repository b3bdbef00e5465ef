//! Error types for catalog operations.

/// Errors produced by the catalog layer.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("artwork lookup failed: {0}")]
    Artwork(String),
}

impl From<gameshelf_steamgriddb::Error> for LibraryError {
    fn from(e: gameshelf_steamgriddb::Error) -> Self {
        LibraryError::Artwork(e.to_string())
    }
}
