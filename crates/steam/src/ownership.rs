//! Maps filesystem paths back to the Steam app that installed them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::libraries::LibraryLocator;
use crate::manifest::{self, AppManifest};

/// Resolves which Steam app, if any, owns a filesystem path.
#[derive(Debug, Clone, Default)]
pub struct OwnershipResolver {
    locator: LibraryLocator,
}

impl OwnershipResolver {
    /// Creates a resolver backed by the given library locator.
    pub fn new(locator: LibraryLocator) -> Self {
        Self { locator }
    }

    /// Returns the manifest of the app whose install directory contains
    /// `candidate`, or `None`.
    ///
    /// Every failure along the way (unreadable library, broken manifest,
    /// path that cannot be canonicalized) counts as "no match".
    pub fn resolve(&self, candidate: &Path) -> Option<AppManifest> {
        resolve_in(&self.locator.locate(), candidate)
    }
}

/// Resolves ownership against an explicit list of libraries.
///
/// Libraries and their manifests are scanned in order; the first match wins.
pub fn resolve_in(libraries: &[PathBuf], candidate: &Path) -> Option<AppManifest> {
    let candidate = match fs::canonicalize(candidate) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(path = %candidate.display(), error = %e, "cannot canonicalize launch target");
            return None;
        }
    };

    for library in libraries {
        for manifest_path in manifest::manifests_in(library) {
            let Some(app) = manifest::parse_manifest(&manifest_path, library) else {
                continue;
            };
            if is_within(&app.install_path, &candidate) {
                tracing::debug!(
                    app_id = app.app_id,
                    name = %app.name,
                    path = %candidate.display(),
                    "path is owned by steam app"
                );
                return Some(app);
            }
        }
    }

    None
}

/// Returns true if `candidate` (already canonical) lies inside
/// `install_path`, comparing whole path components.
fn is_within(install_path: &Path, candidate: &Path) -> bool {
    match fs::canonicalize(install_path) {
        Ok(install) => candidate.starts_with(&install),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_manifest(library: &Path, app_id: u32, name: &str, install_dir: &str) {
        let steamapps = library.join("steamapps");
        fs::create_dir_all(steamapps.join("common").join(install_dir)).unwrap();
        fs::write(
            steamapps.join(format!("appmanifest_{app_id}.acf")),
            format!(
                "\"AppState\"\n{{\n\t\"appid\"\t\t\"{app_id}\"\n\t\"name\"\t\t\"{name}\"\n\t\"installdir\"\t\t\"{install_dir}\"\n}}\n"
            ),
        )
        .unwrap();
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"bin").unwrap();
    }

    #[test]
    fn resolves_owned_path() {
        let tmp = tempfile::tempdir().unwrap();
        let lib_a = tmp.path().join("A");
        let lib_b = tmp.path().join("B");
        write_manifest(&lib_a, 100, "Foo", "Foo");
        write_manifest(&lib_b, 200, "Bar", "Bar");

        let exe = lib_a.join("steamapps/common/Foo/foo.exe");
        touch(&exe);

        let app = resolve_in(&[lib_a.clone(), lib_b], &exe).unwrap();
        assert_eq!(app.app_id, 100);
        assert_eq!(app.name, "Foo");
    }

    #[test]
    fn respects_path_segment_boundary() {
        let tmp = tempfile::tempdir().unwrap();
        let lib_a = tmp.path().join("A");
        write_manifest(&lib_a, 100, "Foo", "Foo");

        let exe = lib_a.join("steamapps/common/Foo2/foo2.exe");
        touch(&exe);

        assert!(resolve_in(&[lib_a], &exe).is_none());
    }

    #[test]
    fn nested_paths_match() {
        let tmp = tempfile::tempdir().unwrap();
        let lib = tmp.path().join("lib");
        write_manifest(&lib, 300, "Deep", "Deep Game");

        let exe = lib.join("steamapps/common/Deep Game/bin/linux64/deep");
        touch(&exe);

        assert_eq!(resolve_in(&[lib], &exe).unwrap().app_id, 300);
    }

    #[test]
    fn unrelated_and_missing_paths_do_not_match() {
        let tmp = tempfile::tempdir().unwrap();
        let lib = tmp.path().join("lib");
        write_manifest(&lib, 100, "Foo", "Foo");

        let other = tmp.path().join("Games/Foo/foo.exe");
        touch(&other);
        assert!(resolve_in(&[lib.clone()], &other).is_none());

        let missing = lib.join("steamapps/common/Foo/not-there.exe");
        assert!(resolve_in(&[lib], &missing).is_none());
    }

    #[test]
    fn broken_manifests_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let lib = tmp.path().join("lib");
        write_manifest(&lib, 100, "Foo", "Foo");
        fs::write(
            lib.join("steamapps/appmanifest_050.acf"),
            "\"AppState\"\n{\n\t\"appid\"\t\"50\"\n}\n",
        )
        .unwrap();

        let exe = lib.join("steamapps/common/Foo/foo");
        touch(&exe);
        assert_eq!(resolve_in(&[lib], &exe).unwrap().app_id, 100);
    }

    #[test]
    fn escaping_install_dir_claims_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let lib = tmp.path().join("lib");
        write_manifest(&lib, 100, "Escape", "../../..");

        let other = tmp.path().join("Games/Foo/foo.sh");
        touch(&other);
        assert!(resolve_in(&[lib.clone()], &other).is_none());

        let own = lib.join("steamapps/common/Foo/foo.sh");
        touch(&own);
        assert!(resolve_in(&[lib], &own).is_none());
    }

    #[test]
    fn resolver_uses_locator() {
        let tmp = tempfile::tempdir().unwrap();
        let lib = tmp.path().join("Steam");
        write_manifest(&lib, 100, "Foo", "Foo");
        let exe = lib.join("steamapps/common/Foo/foo.sh");
        touch(&exe);

        let resolver = OwnershipResolver::new(LibraryLocator::with_candidates(vec![lib]));
        assert_eq!(resolver.resolve(&exe).unwrap().app_id, 100);
    }
}
