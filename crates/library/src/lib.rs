//! Game catalog: the async boundary over scanning, enrichment and launch.
//!
//! # Operations
//!
//! - **List**: scan every root on its own blocking worker, make ids unique,
//!   apply stored play state and enrich each record concurrently
//! - **Launch**: dispatch on a blocking worker, record the play time on success
//! - **Validate**: check a candidate scan root

pub mod catalog;
pub mod enrich;
pub mod error;
pub mod state;

// Re-export primary types for convenience.
pub use catalog::{CatalogReport, Library, RootReport};
pub use enrich::{ArtworkLookup, MetadataEnricher};
pub use error::LibraryError;
pub use state::{JsonPlayStateStore, PlayStateStore};
