//! SteamGridDB artwork lookup.
//!
//! Provides an async client for the [SteamGridDB](https://www.steamgriddb.com)
//! API v2 that resolves a game name to a display name and a grid image URL,
//! plus a name-keyed cache for lookup results.

pub mod cache;
pub mod client;
pub mod types;

pub use cache::{ArtworkCache, CacheError};
pub use client::{Client, Error};
pub use types::{ArtworkMatch, ImageData, ImageFilters, SearchResult};
