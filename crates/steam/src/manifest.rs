//! `appmanifest_<id>.acf` discovery and parsing.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::SteamError;
use crate::paths::LibraryPaths;
use crate::vdf;

/// An installed Steam app, as described by its manifest file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppManifest {
    pub app_id: u32,
    pub name: String,
    /// The `installdir` value (a directory name under `steamapps/common`).
    pub install_dir_name: String,
    pub manifest_path: PathBuf,
    /// `<library>/steamapps/common/<installdir>`.
    pub install_path: PathBuf,
}

/// Lists the manifest files of a library, sorted by file name.
///
/// Returns an empty list if the `steamapps` directory cannot be read.
pub fn manifests_in(library: &Path) -> Vec<PathBuf> {
    let steamapps = LibraryPaths::with_base(library).steamapps_dir();

    let entries = match fs::read_dir(&steamapps) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %steamapps.display(), error = %e, "no readable steamapps directory");
            return Vec::new();
        }
    };

    let mut manifests: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .filter(|entry| is_manifest_file_name(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect();

    manifests.sort();
    manifests
}

/// Reads and parses one manifest.
///
/// Unreadable or incomplete manifests are logged and discarded.
pub fn parse_manifest(manifest_path: &Path, library: &Path) -> Option<AppManifest> {
    let text = match fs::read_to_string(manifest_path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %manifest_path.display(), error = %e, "failed to read app manifest");
            return None;
        }
    };

    match parse_manifest_text(&text, manifest_path, library) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            tracing::warn!(path = %manifest_path.display(), error = %e, "discarding app manifest");
            None
        }
    }
}

/// Parses manifest text. `appid`, `name` and `installdir` are required.
pub fn parse_manifest_text(
    text: &str,
    manifest_path: &Path,
    library: &Path,
) -> Result<AppManifest, SteamError> {
    let pairs = vdf::key_values(text);

    let app_id = vdf::first_value(&pairs, "appid").ok_or(SteamError::MissingField("appid"))?;
    let name = vdf::first_value(&pairs, "name").ok_or(SteamError::MissingField("name"))?;
    let install_dir =
        vdf::first_value(&pairs, "installdir").ok_or(SteamError::MissingField("installdir"))?;

    let app_id = app_id
        .trim()
        .parse::<u32>()
        .map_err(|_| SteamError::InvalidAppId(app_id.to_string()))?;

    if install_dir.is_empty() {
        return Err(SteamError::MissingField("installdir"));
    }
    if !is_single_component(install_dir) {
        return Err(SteamError::InvalidInstallDir(install_dir.to_string()));
    }

    Ok(AppManifest {
        app_id,
        name: name.to_string(),
        install_dir_name: install_dir.to_string(),
        manifest_path: manifest_path.to_path_buf(),
        install_path: LibraryPaths::with_base(library).install_path(install_dir),
    })
}

/// `installdir` must name one directory directly under `steamapps/common`.
fn is_single_component(install_dir: &str) -> bool {
    if install_dir.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(install_dir).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Matches `appmanifest_<digits>.acf`.
fn is_manifest_file_name(name: &str) -> bool {
    name.strip_prefix("appmanifest_")
        .and_then(|rest| rest.strip_suffix(".acf"))
        .is_some_and(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_text(app_id: &str, name: &str, install_dir: &str) -> String {
        format!(
            "\"AppState\"\n{{\n\t\"appid\"\t\t\"{app_id}\"\n\t\"name\"\t\t\"{name}\"\n\t\"installdir\"\t\t\"{install_dir}\"\n}}\n"
        )
    }

    #[test]
    fn manifest_file_names() {
        assert!(is_manifest_file_name("appmanifest_100.acf"));
        assert!(is_manifest_file_name("appmanifest_1245620.acf"));
        assert!(!is_manifest_file_name("appmanifest_.acf"));
        assert!(!is_manifest_file_name("appmanifest_12a.acf"));
        assert!(!is_manifest_file_name("appmanifest_100.acf.bak"));
        assert!(!is_manifest_file_name("libraryfolders.vdf"));
    }

    #[test]
    fn parse_complete_manifest() {
        let text = manifest_text("100", "Foo", "Foo");
        let m = parse_manifest_text(
            &text,
            Path::new("/lib/steamapps/appmanifest_100.acf"),
            Path::new("/lib"),
        )
        .unwrap();

        assert_eq!(m.app_id, 100);
        assert_eq!(m.name, "Foo");
        assert_eq!(m.install_dir_name, "Foo");
        assert_eq!(m.install_path, PathBuf::from("/lib/steamapps/common/Foo"));
        assert_eq!(
            m.manifest_path,
            PathBuf::from("/lib/steamapps/appmanifest_100.acf")
        );
    }

    #[test]
    fn parse_missing_field() {
        let text = "\"AppState\"\n{\n\t\"appid\"\t\"100\"\n\t\"name\"\t\"Foo\"\n}\n";
        let err = parse_manifest_text(text, Path::new("m.acf"), Path::new("/lib")).unwrap_err();
        assert!(matches!(err, SteamError::MissingField("installdir")));
    }

    #[test]
    fn parse_invalid_app_id() {
        let text = manifest_text("abc", "Foo", "Foo");
        let err = parse_manifest_text(&text, Path::new("m.acf"), Path::new("/lib")).unwrap_err();
        assert!(matches!(err, SteamError::InvalidAppId(_)));
    }

    #[test]
    fn install_dir_must_stay_in_common() {
        for bad in ["..", "../..", "Foo/../../Bar", "Foo/Bar", "Foo\\Bar", "/etc", "."] {
            let text = manifest_text("100", "Foo", bad);
            let err = parse_manifest_text(&text, Path::new("m.acf"), Path::new("/lib"))
                .unwrap_err();
            assert!(
                matches!(err, SteamError::InvalidInstallDir(_)),
                "{bad:?} should be rejected, got {err:?}"
            );
        }

        let text = manifest_text("100", "Foo", "Foo..Bar");
        assert!(parse_manifest_text(&text, Path::new("m.acf"), Path::new("/lib")).is_ok());
    }

    #[test]
    fn manifests_in_filters_and_sorts() {
        let tmp = tempfile::tempdir().unwrap();
        let steamapps = tmp.path().join("steamapps");
        fs::create_dir_all(steamapps.join("common")).unwrap();
        fs::write(steamapps.join("appmanifest_200.acf"), "").unwrap();
        fs::write(steamapps.join("appmanifest_100.acf"), "").unwrap();
        fs::write(steamapps.join("libraryfolders.vdf"), "").unwrap();
        fs::write(steamapps.join("appmanifest_x.acf"), "").unwrap();

        let manifests = manifests_in(tmp.path());
        let names: Vec<String> = manifests
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["appmanifest_100.acf", "appmanifest_200.acf"]);
    }

    #[test]
    fn manifests_in_missing_library() {
        assert!(manifests_in(Path::new("/definitely/not/a/steam/library")).is_empty());
    }

    #[test]
    fn parse_manifest_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("appmanifest_620.acf");
        fs::write(&path, manifest_text("620", "Portal 2", "Portal 2")).unwrap();

        let m = parse_manifest(&path, tmp.path()).unwrap();
        assert_eq!(m.app_id, 620);
        assert_eq!(m.install_path, tmp.path().join("steamapps/common/Portal 2"));

        assert!(parse_manifest(&tmp.path().join("missing.acf"), tmp.path()).is_none());
    }

    #[test]
    fn manifest_json_field_names() {
        let m = parse_manifest_text(
            &manifest_text("1", "A", "A"),
            Path::new("m.acf"),
            Path::new("/lib"),
        )
        .unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"appId\":1"));
        assert!(json.contains("\"installDirName\""));
    }
}
