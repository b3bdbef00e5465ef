//! Steam library discovery.
//!
//! A library is any directory the Steam client installs games into. The
//! client's own install directory is one; further libraries are declared in
//! its `steamapps/libraryfolders.vdf`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::{self, LibraryPaths};
use crate::vdf;

/// Finds Steam library roots on the host.
#[derive(Debug, Clone, Default)]
pub struct LibraryLocator {
    candidates: Vec<PathBuf>,
    extra: Vec<PathBuf>,
}

impl LibraryLocator {
    /// Creates a locator probing the platform's conventional install
    /// locations.
    pub fn new() -> Self {
        Self::with_candidates(paths::install_candidates())
    }

    /// Creates a locator probing only the given client install locations.
    pub fn with_candidates(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            extra: Vec::new(),
        }
    }

    /// Adds library roots that are always considered (if they exist).
    pub fn with_extra_libraries(mut self, extra: Vec<PathBuf>) -> Self {
        self.extra = extra;
        self
    }

    /// Returns every accessible library root, without duplicates.
    ///
    /// Order: each client install location followed by the libraries it
    /// declares, then the extra libraries. Missing locations are skipped.
    pub fn locate(&self) -> Vec<PathBuf> {
        let mut libraries: Vec<PathBuf> = Vec::new();

        for candidate in &self.candidates {
            let Some(root) = accessible_dir(candidate) else {
                tracing::trace!(path = %candidate.display(), "steam location not present");
                continue;
            };
            push_unique(&mut libraries, root.clone());

            for declared in declared_libraries(&root) {
                if let Some(dir) = accessible_dir(&declared) {
                    push_unique(&mut libraries, dir);
                }
            }
        }

        for extra in &self.extra {
            if let Some(dir) = accessible_dir(extra) {
                push_unique(&mut libraries, dir);
            }
        }

        tracing::debug!(count = libraries.len(), "steam libraries located");
        libraries
    }
}

/// Reads the library folders declared by a client install.
fn declared_libraries(root: &Path) -> Vec<PathBuf> {
    let path = LibraryPaths::with_base(root).library_folders_path();
    match fs::read_to_string(&path) {
        Ok(text) => vdf::library_folder_paths(&text),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no library folders index");
            Vec::new()
        }
    }
}

/// Returns the canonical path if it is a directory we can list.
fn accessible_dir(path: &Path) -> Option<PathBuf> {
    let canonical = fs::canonicalize(path).ok()?;
    if !canonical.is_dir() {
        return None;
    }
    fs::read_dir(&canonical).ok()?;
    Some(canonical)
}

fn push_unique(libraries: &mut Vec<PathBuf>, path: PathBuf) {
    if !libraries.contains(&path) {
        libraries.push(path);
    }
}
