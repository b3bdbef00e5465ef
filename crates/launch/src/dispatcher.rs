//! Launch strategy selection and execution.

use std::ffi::OsStr;
use std::path::Path;

use gameshelf_scanner::{BinaryKind, is_desktop_entry};
use gameshelf_steam::OwnershipResolver;

use crate::error::LaunchError;
use crate::permissions::{AccessError, ExecPermissions, FsPermissions};
use crate::spawn::{DetachedSpawner, LaunchCommand, ProcessSpawner};
use crate::types::{LaunchConfig, LaunchResult, LaunchStrategy, OwnedApp};

/// Answers whether a path belongs to a distribution-client managed app.
pub trait OwnershipLookup: Send + Sync {
    fn owner_of(&self, path: &Path) -> Option<OwnedApp>;
}

impl OwnershipLookup for OwnershipResolver {
    fn owner_of(&self, path: &Path) -> Option<OwnedApp> {
        self.resolve(path).map(|app| OwnedApp {
            app_id: app.app_id,
            name: app.name,
        })
    }
}

/// Detects a file's binary format.
pub trait BinarySniffer: Send + Sync {
    fn sniff(&self, path: &Path) -> BinaryKind;
}

/// Sniffs magic bytes from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentSniffer;

impl BinarySniffer for ContentSniffer {
    fn sniff(&self, path: &Path) -> BinaryKind {
        gameshelf_scanner::sniff(path)
    }
}

/// Starts games.
///
/// Steam ownership always takes precedence over the file itself: a target
/// inside a Steam install directory is delegated even if it is a perfectly
/// runnable native binary.
pub struct LaunchDispatcher {
    config: LaunchConfig,
    ownership: Box<dyn OwnershipLookup>,
    sniffer: Box<dyn BinarySniffer>,
    permissions: Box<dyn ExecPermissions>,
    spawner: Box<dyn ProcessSpawner>,
}

impl LaunchDispatcher {
    /// Creates a dispatcher using the real filesystem and detached spawning.
    pub fn new(config: LaunchConfig, ownership: impl OwnershipLookup + 'static) -> Self {
        Self {
            config,
            ownership: Box::new(ownership),
            sniffer: Box::new(ContentSniffer),
            permissions: Box::new(FsPermissions),
            spawner: Box::new(DetachedSpawner),
        }
    }

    pub fn with_sniffer(mut self, sniffer: impl BinarySniffer + 'static) -> Self {
        self.sniffer = Box::new(sniffer);
        self
    }

    pub fn with_permissions(mut self, permissions: impl ExecPermissions + 'static) -> Self {
        self.permissions = Box::new(permissions);
        self
    }

    pub fn with_spawner(mut self, spawner: impl ProcessSpawner + 'static) -> Self {
        self.spawner = Box::new(spawner);
        self
    }

    /// Launches `target`. Never panics and never returns an error: every
    /// failure is described by the returned result.
    pub fn launch(&self, target: &Path) -> LaunchResult {
        match self.try_launch(target) {
            Ok(result) => {
                tracing::info!(
                    path = %target.display(),
                    strategy = ?result.strategy,
                    app_id = ?result.app_id,
                    "game launched"
                );
                result
            }
            Err(err) => {
                tracing::warn!(path = %target.display(), error = %err, "launch failed");
                LaunchResult::failed(err.strategy(), err.to_string())
            }
        }
    }

    fn try_launch(&self, target: &Path) -> Result<LaunchResult, LaunchError> {
        if !target.is_absolute() {
            return Err(LaunchError::NotAbsolute(target.to_path_buf()));
        }

        if let Some(app) = self.ownership.owner_of(target) {
            let url = gameshelf_steam::run_game_url(app.app_id);
            let command = self.opener_command(&url);
            self.spawn(LaunchStrategy::Delegated, &command)?;
            return Ok(LaunchResult::delegated(app));
        }

        self.ensure_executable(target)?;

        let (strategy, command) = if is_desktop_entry(target) {
            (LaunchStrategy::DesktopEntry, self.opener_command(target))
        } else {
            match self.sniffer.sniff(target) {
                BinaryKind::Elf => (
                    LaunchStrategy::Native,
                    LaunchCommand::new(target).in_parent_of(target),
                ),
                BinaryKind::Pe => (
                    LaunchStrategy::CompatibilityLayer,
                    self.compat_command(target)?,
                ),
                BinaryKind::Unknown => (
                    LaunchStrategy::BestEffort,
                    LaunchCommand::new(target).in_parent_of(target),
                ),
            }
        };

        self.spawn(strategy, &command)?;
        Ok(LaunchResult::launched(strategy))
    }

    /// Grants execute permission once if it is missing. Any failure other
    /// than a plain permission denial is terminal.
    fn ensure_executable(&self, target: &Path) -> Result<(), LaunchError> {
        match self.permissions.check(target) {
            Ok(()) => Ok(()),
            Err(AccessError::NotExecutable) => {
                tracing::info!(path = %target.display(), "target not executable, repairing permissions");
                self.permissions
                    .grant_execute(target)
                    .map_err(|source| LaunchError::Repair {
                        path: target.to_path_buf(),
                        source,
                    })
            }
            Err(AccessError::Io(source)) => Err(LaunchError::Access {
                path: target.to_path_buf(),
                source,
            }),
        }
    }

    fn compat_command(&self, target: &Path) -> Result<LaunchCommand, LaunchError> {
        let (program, args) = self
            .config
            .compat_layer
            .split_first()
            .ok_or(LaunchError::NoCompatLayer)?;

        Ok(LaunchCommand::new(program)
            .args(args)
            .arg(target)
            .in_parent_of(target))
    }

    fn opener_command(&self, arg: impl AsRef<OsStr>) -> LaunchCommand {
        match self.config.opener.split_first() {
            Some((program, args)) => LaunchCommand::new(program).args(args).arg(arg),
            None => platform_opener().arg(arg),
        }
    }

    fn spawn(&self, strategy: LaunchStrategy, command: &LaunchCommand) -> Result<(), LaunchError> {
        self.spawner
            .spawn(command)
            .map_err(|source| LaunchError::Spawn {
                strategy,
                program: command.program_display(),
                source,
            })
    }
}

/// The platform's "open with default handler" command.
fn platform_opener() -> LaunchCommand {
    #[cfg(target_os = "windows")]
    {
        // The empty argument is the window title expected by `start`.
        LaunchCommand::new("cmd").args(["/C", "start", ""])
    }

    #[cfg(target_os = "macos")]
    {
        LaunchCommand::new("open")
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        LaunchCommand::new("xdg-open")
    }
}
