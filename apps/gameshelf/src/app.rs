//! Command execution.

use std::path::PathBuf;
use std::process::ExitCode;

use gameshelf_launch::LaunchDispatcher;
use gameshelf_library::{JsonPlayStateStore, Library, MetadataEnricher};
use gameshelf_steam::{AppManifest, LibraryLocator, OwnershipResolver};
use gameshelf_steamgriddb::ArtworkCache;
use serde::Serialize;

use crate::Commands;
use crate::config::{self, Config};

/// A Steam library folder and the apps installed in it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SteamLibrary {
    path: PathBuf,
    apps: Vec<AppManifest>,
}

/// Runs one command to completion.
pub async fn run(config: Config, command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::List { roots, report } => {
            let library = build_library(&config)?;
            let roots = if roots.is_empty() {
                config.scan_roots.clone()
            } else {
                roots
            };

            let catalog = library.list_games(&roots).await;
            if report {
                print_json(&catalog)?;
            } else {
                print_json(&catalog.games)?;
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Launch { path } => {
            let library = build_library(&config)?;
            let result = library.launch(&path).await;
            print_json(&result)?;
            Ok(if result.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Validate { path } => {
            let validation = gameshelf_scanner::validate(&path);
            print_json(&validation)?;
            Ok(if validation.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Libraries => {
            let libraries: Vec<SteamLibrary> = steam_locator(&config)
                .locate()
                .into_iter()
                .map(|path| {
                    let apps = gameshelf_steam::manifests_in(&path)
                        .iter()
                        .filter_map(|manifest| gameshelf_steam::parse_manifest(manifest, &path))
                        .collect();
                    SteamLibrary { path, apps }
                })
                .collect();
            print_json(&libraries)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn steam_locator(config: &Config) -> LibraryLocator {
    LibraryLocator::new().with_extra_libraries(config.extra_steam_libraries.clone())
}

/// Wires the catalog from configuration.
fn build_library(config: &Config) -> anyhow::Result<Library> {
    let resolver = OwnershipResolver::new(steam_locator(config));
    let dispatcher = LaunchDispatcher::new(config.launch.clone(), resolver);

    let mut enricher =
        MetadataEnricher::local_only().with_timeout(config.artwork.lookup_timeout());

    if config.artwork.remote_enabled() {
        let client = gameshelf_steamgriddb::Client::new(&config.artwork.steamgriddb_api_key)?;
        enricher = enricher.with_lookup(client);

        if config.artwork.cache_enabled {
            match ArtworkCache::open_default() {
                Ok(cache) => enricher = enricher.with_cache(cache),
                Err(e) => {
                    tracing::warn!(error = %e, "artwork cache unavailable, using memory only");
                }
            }
        }
    }

    let play_state = JsonPlayStateStore::open(config::play_state_path())?;

    Ok(Library::new(dispatcher)
        .with_enricher(enricher)
        .with_play_state(play_state))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
