//! GameShelf: discover and launch locally installed games.
//!
//! # Commands
//!
//! - `gameshelf list [ROOT...]` - scan roots (configured ones by default) and print the catalog
//! - `gameshelf launch <PATH>` - launch a game executable
//! - `gameshelf validate <PATH>` - check whether a directory can be a scan root
//! - `gameshelf libraries` - print detected Steam libraries and their apps
//!
//! All commands print JSON to stdout; logs go to stderr.

mod app;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Discover and launch locally installed games
#[derive(Parser)]
#[command(name = "gameshelf")]
#[command(about = "Discover and launch locally installed games")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan game roots and print the catalog
    List {
        /// Roots to scan instead of the configured ones
        roots: Vec<PathBuf>,

        /// Print per-root and per-directory outcomes as well as the games
        #[arg(long)]
        report: bool,
    },

    /// Launch a game executable
    Launch {
        /// Absolute path to the executable
        path: PathBuf,
    },

    /// Check whether a directory can be used as a scan root
    Validate {
        path: String,
    },

    /// Print detected Steam libraries and installed apps
    Libraries,
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(config::config_path);
    let config = config::Config::load_from(&config_path)?;
    tracing::debug!(
        path = %config_path.display(),
        roots = config.scan_roots.len(),
        "configuration loaded"
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(config, cli.command))
}
