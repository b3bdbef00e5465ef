//! Detached process spawning.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// A fully resolved command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub current_dir: Option<PathBuf>,
}

impl LaunchCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Runs the command from the directory containing `path`.
    pub fn in_parent_of(mut self, path: &Path) -> Self {
        self.current_dir = path.parent().map(Path::to_path_buf);
        self
    }

    /// Returns the program name for messages.
    pub fn program_display(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

/// Starts processes without waiting for them.
pub trait ProcessSpawner: Send + Sync {
    /// Requests the process start. Returns once the OS accepted it.
    fn spawn(&self, command: &LaunchCommand) -> std::io::Result<()>;
}

/// Spawns children with null stdio in their own process group and drops
/// the handle immediately.
///
/// Inside a tokio runtime the runtime reaps the child when it exits.
/// Without one a short-lived thread waits on it instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedSpawner;

impl ProcessSpawner for DetachedSpawner {
    fn spawn(&self, command: &LaunchCommand) -> std::io::Result<()> {
        let pid = if tokio::runtime::Handle::try_current().is_ok() {
            spawn_in_runtime(command)?
        } else {
            spawn_with_reaper(command)?
        };

        tracing::debug!(
            program = %command.program_display(),
            pid = ?pid,
            "process spawned"
        );
        Ok(())
    }
}

fn spawn_in_runtime(command: &LaunchCommand) -> std::io::Result<Option<u32>> {
    let mut cmd = tokio::process::Command::new(&command.program);
    cmd.args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(false);

    if let Some(dir) = &command.current_dir {
        cmd.current_dir(dir);
    }

    // Keep the game alive when the launcher's terminal goes away.
    #[cfg(unix)]
    cmd.process_group(0);

    Ok(cmd.spawn()?.id())
}

fn spawn_with_reaper(command: &LaunchCommand) -> std::io::Result<Option<u32>> {
    let mut cmd = std::process::Command::new(&command.program);
    cmd.args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    if let Some(dir) = &command.current_dir {
        cmd.current_dir(dir);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let mut child = cmd.spawn()?;
    let pid = child.id();
    std::thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(Some(pid))
}
