//! Steam integration for GameShelf.
//!
//! Finds Steam library folders on the host, reads the `appmanifest_*.acf`
//! files inside them and maps arbitrary filesystem paths back to the Steam
//! app that owns them.

pub mod libraries;
pub mod manifest;
pub mod ownership;
pub mod paths;
#[cfg(target_os = "linux")]
pub mod paths_linux;
#[cfg(target_os = "windows")]
pub mod paths_windows;
pub mod vdf;

// Re-export primary types.
pub use libraries::LibraryLocator;
pub use manifest::{AppManifest, manifests_in, parse_manifest};
pub use ownership::OwnershipResolver;
pub use paths::LibraryPaths;

/// URL scheme handled by the Steam client.
pub const PROTOCOL_SCHEME: &str = "steam://";

/// Returns the protocol URL that asks the Steam client to launch an app.
pub fn run_game_url(app_id: u32) -> String {
    format!("{PROTOCOL_SCHEME}rungameid/{app_id}")
}

/// Errors for Steam operations.
#[derive(Debug, thiserror::Error)]
pub enum SteamError {
    #[error("steam installation not found")]
    NotFound,

    #[error("manifest is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("invalid app id '{0}'")]
    InvalidAppId(String),

    #[error("install directory '{0}' is not a plain directory name")]
    InvalidInstallDir(String),
}
