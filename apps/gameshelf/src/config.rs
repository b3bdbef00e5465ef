//! GameShelf configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `$XDG_CONFIG_HOME/gameshelf/config.toml` (`~/.config/...`)
//! - Windows: `%APPDATA%/gameshelf/config.toml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use gameshelf_launch::LaunchConfig;
use serde::{Deserialize, Serialize};

/// GameShelf configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directories whose subdirectories are games.
    #[serde(default = "default_scan_roots")]
    pub scan_roots: Vec<PathBuf>,

    /// Steam library folders to check in addition to the discovered ones.
    #[serde(default)]
    pub extra_steam_libraries: Vec<PathBuf>,

    #[serde(default)]
    pub launch: LaunchConfig,

    #[serde(default)]
    pub artwork: ArtworkConfig,
}

/// Remote artwork settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkConfig {
    /// SteamGridDB API key. Empty disables remote lookups.
    #[serde(default)]
    pub steamgriddb_api_key: String,

    /// Deadline for one lookup, in seconds.
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_secs: u64,

    /// Persist lookup results between runs.
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

fn default_scan_roots() -> Vec<PathBuf> {
    std::env::var("HOME")
        .map(|home| vec![PathBuf::from(home).join("Games")])
        .unwrap_or_default()
}

fn default_lookup_timeout() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            steamgriddb_api_key: String::new(),
            lookup_timeout_secs: default_lookup_timeout(),
            cache_enabled: default_true(),
        }
    }
}

impl ArtworkConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn remote_enabled(&self) -> bool {
        !self.steamgriddb_api_key.trim().is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan_roots: default_scan_roots(),
            extra_steam_libraries: Vec::new(),
            launch: LaunchConfig::default(),
            artwork: ArtworkConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or creates a default there if not found.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::debug!(path = %path.display(), "configuration loaded");
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        // The file may hold an API key.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

/// Returns the platform-specific GameShelf directory.
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata).join("gameshelf")
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
                PathBuf::from(home).join(".config")
            })
            .join("gameshelf")
    }
}

/// Returns the default configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the play state file path.
pub fn play_state_path() -> PathBuf {
    config_dir().join("play_state.json")
}
