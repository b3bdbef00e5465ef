//! Execute permission checks and repair.

use std::path::Path;

/// Why a target is not executable.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The file exists but the current user may not execute it.
    #[error("execute permission denied")]
    NotExecutable,

    /// Any other failure (missing file, I/O error).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Checks and grants execute permission.
pub trait ExecPermissions: Send + Sync {
    /// Returns `Ok` if the current user may execute `path`.
    fn check(&self, path: &Path) -> Result<(), AccessError>;

    /// Adds the owner, group and other execute bits to `path`.
    fn grant_execute(&self, path: &Path) -> std::io::Result<()>;
}

/// Real filesystem permissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPermissions;

#[cfg(unix)]
impl ExecPermissions for FsPermissions {
    fn check(&self, path: &Path) -> Result<(), AccessError> {
        use std::os::unix::ffi::OsStrExt;

        let c_path = std::ffi::CString::new(path.as_os_str().as_bytes())
            .map_err(|e| AccessError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, e)))?;

        // SAFETY: `c_path` is a valid NUL-terminated string for the duration
        // of the call.
        if unsafe { libc::access(c_path.as_ptr(), libc::X_OK) } == 0 {
            return Ok(());
        }

        let err = std::io::Error::last_os_error();
        match err.raw_os_error() {
            Some(libc::EACCES) | Some(libc::EPERM) => Err(AccessError::NotExecutable),
            _ => Err(AccessError::Io(err)),
        }
    }

    fn grant_execute(&self, path: &Path) -> std::io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let mode = std::fs::metadata(path)?.permissions().mode();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode | 0o111))?;
        tracing::info!(path = %path.display(), mode = %format!("{:o}", mode | 0o111), "execute permission granted");
        Ok(())
    }
}

#[cfg(not(unix))]
impl ExecPermissions for FsPermissions {
    fn check(&self, path: &Path) -> Result<(), AccessError> {
        std::fs::metadata(path)?;
        Ok(())
    }

    fn grant_execute(&self, _path: &Path) -> std::io::Result<()> {
        Ok(())
    }
}
