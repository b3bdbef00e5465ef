use std::path::PathBuf;

/// Returns the conventional Steam install locations on Linux.
///
/// Order: `~/.steam/steam`, `~/.local/share/Steam`, Flatpak, Snap.
pub(crate) fn install_candidates() -> Vec<PathBuf> {
    match home_dir() {
        Some(home) => candidates_in(&home),
        None => Vec::new(),
    }
}

fn candidates_in(home: &std::path::Path) -> Vec<PathBuf> {
    vec![
        // Primary location (usually a symlink to the next one).
        home.join(".steam").join("steam"),
        home.join(".local").join("share").join("Steam"),
        // Flatpak location
        home.join(".var")
            .join("app")
            .join("com.valvesoftware.Steam")
            .join(".steam")
            .join("steam"),
        home.join(".var")
            .join("app")
            .join("com.valvesoftware.Steam")
            .join(".local")
            .join("share")
            .join("Steam"),
        // Snap location
        home.join("snap")
            .join("steam")
            .join("common")
            .join(".local")
            .join("share")
            .join("Steam"),
    ]
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
