use std::path::{Path, PathBuf};

/// Name of the manifest directory inside every Steam library.
pub const STEAMAPPS_DIR: &str = "steamapps";

/// Name of the shared install area inside `steamapps`.
pub const COMMON_DIR: &str = "common";

/// Library folder index written by the Steam client.
pub const LIBRARY_FOLDERS_FILE: &str = "libraryfolders.vdf";

/// Provides access to the directory layout of one Steam library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPaths {
    base_dir: PathBuf,
}

impl LibraryPaths {
    /// Creates a new `LibraryPaths` rooted at the given library directory.
    pub fn with_base(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Returns the library root.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the `steamapps` directory holding the app manifests.
    pub fn steamapps_dir(&self) -> PathBuf {
        self.base_dir.join(STEAMAPPS_DIR)
    }

    /// Returns the `steamapps/common` directory where games are installed.
    pub fn common_dir(&self) -> PathBuf {
        self.steamapps_dir().join(COMMON_DIR)
    }

    /// Returns the install path for a manifest's `installdir` value.
    pub fn install_path(&self, install_dir: &str) -> PathBuf {
        self.common_dir().join(install_dir)
    }

    /// Returns the manifest path for an app id.
    pub fn manifest_path(&self, app_id: u32) -> PathBuf {
        self.steamapps_dir()
            .join(format!("appmanifest_{app_id}.acf"))
    }

    /// Returns the path to `libraryfolders.vdf`.
    pub fn library_folders_path(&self) -> PathBuf {
        self.steamapps_dir().join(LIBRARY_FOLDERS_FILE)
    }
}

/// Returns the conventional Steam install locations for this platform,
/// in probing order. Locations are not checked for existence here.
pub fn install_candidates() -> Vec<PathBuf> {
    platform_candidates()
}

#[cfg(target_os = "linux")]
fn platform_candidates() -> Vec<PathBuf> {
    crate::paths_linux::install_candidates()
}

#[cfg(target_os = "windows")]
fn platform_candidates() -> Vec<PathBuf> {
    crate::paths_windows::install_candidates()
}

#[cfg(target_os = "macos")]
fn platform_candidates() -> Vec<PathBuf> {
    std::env::var_os("HOME")
        .map(|home| {
            vec![
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join("Steam"),
            ]
        })
        .unwrap_or_default()
}

#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
fn platform_candidates() -> Vec<PathBuf> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_layout() {
        let paths = LibraryPaths::with_base("/steam");
        assert_eq!(paths.base_dir(), Path::new("/steam"));
        assert_eq!(paths.steamapps_dir(), PathBuf::from("/steam/steamapps"));
        assert_eq!(paths.common_dir(), PathBuf::from("/steam/steamapps/common"));
        assert_eq!(
            paths.library_folders_path(),
            PathBuf::from("/steam/steamapps/libraryfolders.vdf")
        );
    }

    #[test]
    fn install_and_manifest_paths() {
        let paths = LibraryPaths::with_base("/mnt/games/SteamLibrary");
        assert_eq!(
            paths.install_path("Half-Life 2"),
            PathBuf::from("/mnt/games/SteamLibrary/steamapps/common/Half-Life 2")
        );
        assert_eq!(
            paths.manifest_path(220),
            PathBuf::from("/mnt/games/SteamLibrary/steamapps/appmanifest_220.acf")
        );
    }
}
