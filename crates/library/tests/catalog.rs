//! End-to-end catalog tests over real directory trees.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use gameshelf_launch::{
    LaunchCommand, LaunchConfig, LaunchDispatcher, LaunchStrategy, ProcessSpawner,
};
use gameshelf_library::{JsonPlayStateStore, Library, PlayStateStore};
use gameshelf_scanner::{CandidateOutcome, InvalidReason, RootStatus};
use gameshelf_steam::{LibraryLocator, OwnershipResolver};

#[derive(Clone, Default)]
struct RecordingSpawner {
    commands: Arc<Mutex<Vec<LaunchCommand>>>,
}

impl ProcessSpawner for RecordingSpawner {
    fn spawn(&self, command: &LaunchCommand) -> io::Result<()> {
        self.commands.lock().unwrap().push(command.clone());
        Ok(())
    }
}

fn write_game(root: &Path, dir: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let game_dir = root.join(dir);
    std::fs::create_dir_all(&game_dir).unwrap();
    for (name, content) in files {
        let path = game_dir.join(name);
        std::fs::write(&path, content).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
    }
    game_dir
}

fn steam_library(base: &Path) -> PathBuf {
    let lib = base.join("SteamLibrary");
    let steamapps = lib.join("steamapps");
    std::fs::create_dir_all(steamapps.join("common").join("Foo")).unwrap();
    std::fs::write(
        steamapps.join("appmanifest_100.acf"),
        "\"AppState\"\n{\n\t\"appid\"\t\t\"100\"\n\t\"name\"\t\t\"Foo\"\n\t\"installdir\"\t\t\"Foo\"\n}\n",
    )
    .unwrap();
    lib
}

fn library_with(steam_libs: Vec<PathBuf>) -> (Library, Arc<Mutex<Vec<LaunchCommand>>>) {
    let spawner = RecordingSpawner::default();
    let commands = spawner.commands.clone();
    let resolver = OwnershipResolver::new(LibraryLocator::with_candidates(steam_libs));
    let dispatcher =
        LaunchDispatcher::new(LaunchConfig::default(), resolver).with_spawner(spawner);
    (Library::new(dispatcher), commands)
}

#[tokio::test]
async fn lists_games_across_roots_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let first = tmp.path().join("first");
    let second = tmp.path().join("second");

    write_game(
        &first,
        "My_Cool-Game",
        &[("my_cool_game.x86_64", b"\x7fELF"), ("setup.exe", b"MZ")],
    );
    write_game(&first, "Docs", &[("manual.pdf", b"%PDF")]);
    write_game(&second, "Celeste", &[("Celeste", b"\x7fELF"), ("Celeste.sh", b"#!/bin/sh")]);
    std::fs::write(
        second.join("Celeste").join("description.txt"),
        "  Help Madeline survive her inner demons.  \n",
    )
    .unwrap();

    let (library, _) = library_with(vec![]);
    let catalog = library.list_games(&[first.clone(), second.clone()]).await;

    let names: Vec<&str> = catalog.games.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["My Cool Game", "Celeste"]);

    let cool = &catalog.games[0];
    assert_eq!(cool.path, first.join("My_Cool-Game").join("my_cool_game.x86_64"));
    assert_eq!(cool.source_directory_name, "My_Cool-Game");
    assert!(cool.id.starts_with("my-cool-game-"));

    let celeste = &catalog.games[1];
    assert_eq!(celeste.path, second.join("Celeste").join("Celeste.sh"));
    assert_eq!(
        celeste.description.as_deref(),
        Some("Help Madeline survive her inner demons.")
    );

    assert_eq!(catalog.roots.len(), 2);
    assert_eq!(catalog.roots[0].status, RootStatus::Scanned);
    assert!(
        catalog.roots[0]
            .candidates
            .iter()
            .any(|c| c.outcome == CandidateOutcome::NoExecutable)
    );
}

#[tokio::test]
async fn duplicate_directory_names_get_unique_ids() {
    let tmp = tempfile::tempdir().unwrap();
    let a = tmp.path().join("a");
    let b = tmp.path().join("b");
    write_game(&a, "Foo", &[("foo.sh", b"#!/bin/sh")]);
    write_game(&b, "Foo", &[("foo.sh", b"#!/bin/sh")]);

    let (library, _) = library_with(vec![]);
    let catalog = library.list_games(&[a, b]).await;

    assert_eq!(catalog.games.len(), 2);
    let first = &catalog.games[0].id;
    let second = &catalog.games[1].id;
    assert_eq!(second, &format!("{first}-2"));

    let reported: Vec<String> = catalog
        .roots
        .iter()
        .flat_map(|r| &r.candidates)
        .filter_map(|c| match &c.outcome {
            CandidateOutcome::Game { id } => Some(id.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(reported, vec![first.clone(), second.clone()]);
}

#[tokio::test]
async fn invalid_roots_are_reported_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let good = tmp.path().join("good");
    write_game(&good, "Foo", &[("foo.sh", b"#!/bin/sh")]);

    let (library, _) = library_with(vec![]);
    let catalog = library
        .list_games(&[
            PathBuf::from("relative/games"),
            tmp.path().join("missing"),
            good,
        ])
        .await;

    assert_eq!(catalog.games.len(), 1);
    assert_eq!(
        catalog.roots[0].status,
        RootStatus::Invalid {
            reason: InvalidReason::NotAbsolute
        }
    );
    assert_eq!(
        catalog.roots[1].status,
        RootStatus::Invalid {
            reason: InvalidReason::NotFound
        }
    );
}

#[tokio::test]
async fn rescans_are_stable() {
    let tmp = tempfile::tempdir().unwrap();
    write_game(tmp.path(), "Hades", &[("Hades.exe", b"MZ"), ("unins000.exe", b"MZ")]);

    let (library, _) = library_with(vec![]);
    let roots = [tmp.path().to_path_buf()];
    let first = library.list_games(&roots).await;
    let second = library.list_games(&roots).await;

    assert_eq!(first.games.len(), 1);
    assert_eq!(first.games[0].name, second.games[0].name);
    assert_eq!(first.games[0].path, second.games[0].path);
    assert_eq!(
        first.games[0].source_directory_name,
        second.games[0].source_directory_name
    );
}

#[tokio::test]
async fn launch_records_play_state() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("games");
    write_game(&root, "Foo", &[("foo.sh", b"#!/bin/sh\n")]);
    let state_file = tmp.path().join("play_state.json");

    let (library, commands) = library_with(vec![]);
    let library = library.with_play_state(JsonPlayStateStore::open(&state_file).unwrap());

    let catalog = library.list_games(&[root.clone()]).await;
    assert!(catalog.games[0].last_played.is_none());

    let result = library.launch(&catalog.games[0].path).await;
    assert!(result.success, "{result:?}");
    assert_eq!(result.strategy, Some(LaunchStrategy::BestEffort));
    assert_eq!(commands.lock().unwrap().len(), 1);

    let catalog = library.list_games(&[root]).await;
    assert!(catalog.games[0].last_played.is_some());

    let reopened = JsonPlayStateStore::open(&state_file).unwrap();
    assert!(reopened.last_played(&catalog.games[0].path).is_some());
}

#[tokio::test]
async fn steam_owned_game_is_delegated() {
    let tmp = tempfile::tempdir().unwrap();
    let lib = steam_library(tmp.path());
    let exe = lib.join("steamapps/common/Foo/foo.exe");
    std::fs::write(&exe, b"MZ").unwrap();
    let sibling = lib.join("steamapps/common/Foo2");
    std::fs::create_dir_all(&sibling).unwrap();
    std::fs::write(sibling.join("foo2.sh"), b"#!/bin/sh\n").unwrap();

    let (library, commands) = library_with(vec![lib]);

    let result = library.launch(&exe).await;
    assert!(result.success);
    assert_eq!(result.strategy, Some(LaunchStrategy::Delegated));
    assert_eq!(result.app_id, Some(100));
    assert_eq!(result.name.as_deref(), Some("Foo"));
    {
        let commands = commands.lock().unwrap();
        assert_eq!(
            commands[0].args.last().map(|a| a.to_string_lossy().into_owned()),
            Some("steam://rungameid/100".to_string())
        );
    }

    let result = library.launch(&sibling.join("foo2.sh")).await;
    assert_ne!(result.strategy, Some(LaunchStrategy::Delegated));
    assert!(result.app_id.is_none());
}

#[tokio::test]
async fn failed_launch_does_not_record_play_state() {
    let tmp = tempfile::tempdir().unwrap();
    let (library, commands) = library_with(vec![]);

    let missing = tmp.path().join("nothing/here.sh");
    let result = library.launch(&missing).await;

    assert!(!result.success);
    assert!(result.error.is_some());
    assert!(commands.lock().unwrap().is_empty());
}

#[test]
fn validate_directory_reasons() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("file.txt");
    std::fs::write(&file, b"").unwrap();

    let (library, _) = library_with(vec![]);
    assert!(library.validate_directory(tmp.path().to_str().unwrap()).valid);
    assert_eq!(
        library.validate_directory("games").reason,
        Some(InvalidReason::NotAbsolute)
    );
    assert_eq!(
        library.validate_directory(file.to_str().unwrap()).reason,
        Some(InvalidReason::NotADirectory)
    );
    assert_eq!(
        library.validate_directory("").reason,
        Some(InvalidReason::NotAbsolute)
    );
}
