//! Launch dispatcher.
//!
//! Decides how a game executable is started and starts it:
//!
//! 1. **Delegated**: paths inside a Steam app's install directory are
//!    handed to the Steam client through its `steam://` protocol handler
//! 2. **Repair**: a file missing its execute bits gets them granted once
//! 3. **Sniff**: the binary format is read from the file's magic bytes
//! 4. **Start**: desktop entries open through the platform opener, ELF
//!    binaries run natively, PE binaries run through a compatibility layer
//!    and anything else is executed directly as a best effort
//!
//! Launches are fire-and-forget: the child is detached and never awaited.

pub mod dispatcher;
pub mod error;
pub mod permissions;
pub mod spawn;
pub mod types;

// Re-export primary types for convenience.
pub use dispatcher::{BinarySniffer, ContentSniffer, LaunchDispatcher, OwnershipLookup};
pub use error::LaunchError;
pub use permissions::{AccessError, ExecPermissions, FsPermissions};
pub use spawn::{DetachedSpawner, LaunchCommand, ProcessSpawner};
pub use types::{LaunchConfig, LaunchResult, LaunchStrategy, OwnedApp};
