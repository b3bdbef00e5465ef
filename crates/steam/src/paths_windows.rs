use std::path::PathBuf;

use crate::SteamError;

/// Returns the conventional Steam install locations on Windows.
///
/// The registry `InstallPath` comes first, then the Program Files defaults.
pub(crate) fn install_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Try 64-bit registry first
    if let Ok(path) = read_steam_registry(r"SOFTWARE\Wow6432Node\Valve\Steam") {
        candidates.push(path);
    } else if let Ok(path) = read_steam_registry(r"SOFTWARE\Valve\Steam") {
        candidates.push(path);
    }

    for var in ["ProgramFiles(x86)", "ProgramFiles"] {
        if let Some(dir) = std::env::var_os(var) {
            candidates.push(PathBuf::from(dir).join("Steam"));
        }
    }

    candidates
}

fn read_steam_registry(subkey: &str) -> Result<PathBuf, SteamError> {
    use winreg::RegKey;
    use winreg::enums::HKEY_LOCAL_MACHINE;

    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    let key = hklm.open_subkey(subkey).map_err(|_| SteamError::NotFound)?;
    let install_path: String = key
        .get_value("InstallPath")
        .map_err(|_| SteamError::NotFound)?;
    Ok(PathBuf::from(install_path))
}
