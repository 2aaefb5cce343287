//! Saving and restoring games through the file-backed store.

use std::fs;
use std::sync::Arc;

use country_guesser::engine::models::{Difficulty, GamePhase, GameSettings, DEFAULT_SETTINGS};
use country_guesser::session::{Command, Session};
use country_guesser::storage::{BlobStore, FileStore, GameStorage, STORAGE_KEY};

fn file_storage(dir: &std::path::Path) -> Arc<GameStorage<FileStore>> {
    Arc::new(GameStorage::new(FileStore::new(dir)))
}

#[test]
fn test_game_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let settings = GameSettings {
        strikes_enabled: true,
        max_strikes: 2,
        difficulty: Difficulty::Easy,
        ..DEFAULT_SETTINGS
    };

    let before = {
        let (mut session, _rx) = Session::new(file_storage(dir.path()), settings);
        session.handle(Command::Start {
            names: vec!["Ann".into(), "Bo".into()],
        });
        session.handle(Command::Guess("Kenya".into()));
        session.handle(Command::Guess("Kenia".into()));
        session.state().clone()
    };
    assert!(dir.path().join(format!("{}.json", STORAGE_KEY)).exists());

    let (mut session, rx) = Session::new(file_storage(dir.path()), DEFAULT_SETTINGS);
    assert!(session.restore());
    assert_eq!(*session.state(), before);
    assert_eq!(*session.settings(), settings);
    assert_eq!(rx.borrow().state.players[1].strikes, 1);
    assert_eq!(session.state().phase, GamePhase::Active);
}

#[test]
fn test_corrupted_save_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.set(STORAGE_KEY, r#"{"gameState":{"phase":"paused"}}"#).unwrap();

    let storage = file_storage(dir.path());
    assert!(storage.load().is_none());
    let (mut session, _rx) = Session::new(storage, DEFAULT_SETTINGS);
    assert!(!session.restore());
    assert_eq!(session.state().phase, GamePhase::Setup);
}

#[test]
fn test_truncated_save_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(dir.path());
    let (mut session, _rx) = Session::new(Arc::clone(&storage), DEFAULT_SETTINGS);
    session.handle(Command::Start {
        names: vec!["Ann".into()],
    });
    let path = dir.path().join(format!("{}.json", STORAGE_KEY));
    let raw = fs::read_to_string(&path).unwrap();
    fs::write(&path, &raw[..raw.len() / 2]).unwrap();
    assert!(storage.load().is_none());
}

#[test]
fn test_quit_removes_save_file() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, _rx) = Session::new(file_storage(dir.path()), DEFAULT_SETTINGS);
    session.handle(Command::Start {
        names: vec!["Ann".into(), "Bo".into()],
    });
    let path = dir.path().join(format!("{}.json", STORAGE_KEY));
    assert!(path.exists());
    session.handle(Command::Quit);
    assert!(!path.exists());
}

#[test]
fn test_unwritable_directory_does_not_block_play() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    let storage = file_storage(&blocker);
    let (mut session, _rx) = Session::new(Arc::clone(&storage), DEFAULT_SETTINGS);
    session.handle(Command::Start {
        names: vec!["Ann".into(), "Bo".into()],
    });
    session.handle(Command::Guess("Chile".into()));
    assert_eq!(session.state().guessed_countries.len(), 1);
    assert!(storage.load().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_background_saves_keep_last_state() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(dir.path());
    let (mut session, _rx) = Session::new(Arc::clone(&storage), DEFAULT_SETTINGS);
    session.handle(Command::Start {
        names: vec!["Ann".into(), "Bo".into()],
    });
    for guess in ["Peru", "Chile", "Kenya", "Japan", "Spain", "Egypt", "Mali", "Cuba"] {
        session.handle(Command::Guess(guess.into()));
    }
    session.flush().await;

    let saved = storage.load().expect("saved game");
    assert_eq!(saved.game_state, *session.state());
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().map_or(true, |ext| ext != "json"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {:?}", leftovers);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_quit_with_saves_in_flight_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(dir.path());
    let (mut session, _rx) = Session::new(Arc::clone(&storage), DEFAULT_SETTINGS);
    session.handle(Command::Start {
        names: vec!["Ann".into(), "Bo".into()],
    });
    session.handle(Command::Guess("Nepal".into()));
    session.handle(Command::Quit);
    session.flush().await;

    assert!(!dir.path().join(format!("{}.json", STORAGE_KEY)).exists());
    let (mut next, _rx) = Session::new(storage, DEFAULT_SETTINGS);
    assert!(!next.restore());
}
