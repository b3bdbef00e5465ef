//! Launch request configuration and outcome types.

use serde::{Deserialize, Serialize};

/// How a target was (or was going to be) started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaunchStrategy {
    Delegated,
    Native,
    CompatibilityLayer,
    DesktopEntry,
    BestEffort,
}

impl std::fmt::Display for LaunchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaunchStrategy::Delegated => write!(f, "delegated"),
            LaunchStrategy::Native => write!(f, "native"),
            LaunchStrategy::CompatibilityLayer => write!(f, "compatibility-layer"),
            LaunchStrategy::DesktopEntry => write!(f, "desktop-entry"),
            LaunchStrategy::BestEffort => write!(f, "best-effort"),
        }
    }
}

/// A Steam app that owns a launch target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedApp {
    pub app_id: u32,
    pub name: String,
}

/// Outcome of one launch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchResult {
    pub success: bool,
    /// `None` when the attempt failed before a strategy was chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<LaunchStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl LaunchResult {
    pub fn launched(strategy: LaunchStrategy) -> Self {
        Self {
            success: true,
            strategy: Some(strategy),
            error: None,
            app_id: None,
            name: None,
        }
    }

    pub fn delegated(app: OwnedApp) -> Self {
        Self {
            success: true,
            strategy: Some(LaunchStrategy::Delegated),
            error: None,
            app_id: Some(app.app_id),
            name: Some(app.name),
        }
    }

    pub fn failed(strategy: Option<LaunchStrategy>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            strategy,
            error: Some(error.into()),
            app_id: None,
            name: None,
        }
    }
}

/// Launch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Command used to run Windows executables, e.g. `["wine"]` or
    /// `["umu-run"]`. The target path is appended.
    #[serde(default = "default_compat_layer")]
    pub compat_layer: Vec<String>,

    /// Command used to open URLs and desktop entries. Empty selects the
    /// platform default (`xdg-open`, `open`, `cmd /C start`).
    #[serde(default)]
    pub opener: Vec<String>,
}

fn default_compat_layer() -> Vec<String> {
    vec!["wine".into()]
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            compat_layer: default_compat_layer(),
            opener: Vec::new(),
        }
    }
}
