//! Scan root validation.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Why a path cannot be used as a scan root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidReason {
    NotAbsolute,
    NotFound,
    NotADirectory,
    PermissionDenied,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::NotAbsolute => write!(f, "not-absolute"),
            InvalidReason::NotFound => write!(f, "not-found"),
            InvalidReason::NotADirectory => write!(f, "not-a-directory"),
            InvalidReason::PermissionDenied => write!(f, "permission-denied"),
        }
    }
}

/// Result of validating a scan root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<InvalidReason>,
}

impl Validation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn invalid(reason: InvalidReason) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }
}

/// Validates a user-supplied path string. Never panics.
pub fn validate(path: &str) -> Validation {
    validate_path(Path::new(path))
}

/// Checks that `path` is absolute, exists, is a directory and can be
/// listed and traversed by this process.
pub fn validate_path(path: &Path) -> Validation {
    if !path.is_absolute() {
        return Validation::invalid(InvalidReason::NotAbsolute);
    }

    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Validation::invalid(InvalidReason::PermissionDenied);
        }
        Err(_) => return Validation::invalid(InvalidReason::NotFound),
    };

    if !metadata.is_dir() {
        return Validation::invalid(InvalidReason::NotADirectory);
    }

    if !can_read_and_traverse(path) {
        return Validation::invalid(InvalidReason::PermissionDenied);
    }

    Validation::ok()
}

#[cfg(unix)]
fn can_read_and_traverse(path: &Path) -> bool {
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = std::ffi::CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `c_path` is a valid NUL-terminated string for the duration
    // of the call.
    unsafe { libc::access(c_path.as_ptr(), libc::R_OK | libc::X_OK) == 0 }
}

#[cfg(not(unix))]
fn can_read_and_traverse(path: &Path) -> bool {
    std::fs::read_dir(path).is_ok()
}
