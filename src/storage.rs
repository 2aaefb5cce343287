//! Persistence boundary: saves and restores `{gameState, settings}` in a
//! key-value blob store.
//!
//! Nothing here ever fails towards the caller. Write faults are logged and
//! dropped; read faults and malformed blobs both come back as "no saved game".

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::engine::models::{GameSettings, GameState};

pub const STORAGE_KEY: &str = "country-guesser-game";

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "storage I/O error: {}", e),
            StoreError::Unavailable(why) => write!(f, "storage unavailable: {}", why),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Unavailable(_) => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// A string-valued key-value store with get/set/remove semantics.
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a directory. Writes land in a
/// uniquely named temp file that is then renamed over the target.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(self.path_for(key)).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// The persisted record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedGame {
    pub game_state: GameState,
    pub settings: GameSettings,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedGameRef<'a> {
    game_state: &'a GameState,
    settings: &'a GameSettings,
}

/// Serialize a state/settings pair into the persisted JSON form.
pub fn encode(state: &GameState, settings: &GameSettings) -> Result<String, serde_json::Error> {
    serde_json::to_string(&PersistedGameRef {
        game_state: state,
        settings,
    })
}

/// Parse and validate a persisted blob. Rejects, never coerces.
pub fn decode(raw: &str) -> Result<PersistedGame, String> {
    let persisted: PersistedGame =
        serde_json::from_str(raw).map_err(|e| format!("malformed saved game: {}", e))?;
    validate_persisted(&persisted)?;
    Ok(persisted)
}

/// Cross-field checks that typed deserialization cannot express.
pub fn validate_persisted(persisted: &PersistedGame) -> Result<(), String> {
    let state = &persisted.game_state;
    if !state.players.is_empty() && state.current_player_index >= state.players.len() {
        return Err(format!(
            "currentPlayerIndex {} out of range for {} players",
            state.current_player_index,
            state.players.len()
        ));
    }
    let mut ids = std::collections::HashSet::new();
    if let Some(dup) = state.players.iter().find(|p| !ids.insert(p.id.as_str())) {
        return Err(format!("duplicate player id {:?}", dup.id));
    }
    if let Some((key, entry)) = state
        .guessed_countries
        .iter()
        .find(|(key, entry)| **key != entry.iso_code)
    {
        return Err(format!("guessed entry {} carries code {}", key, entry.iso_code));
    }
    Ok(())
}

/// Save/load/clear over a blob store, swallowing every fault.
#[derive(Debug)]
pub struct GameStorage<S: BlobStore> {
    store: S,
    key: String,
}

impl<S: BlobStore> GameStorage<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn save(&self, state: &GameState, settings: &GameSettings) {
        match encode(state, settings) {
            Ok(raw) => self.write_encoded(&raw),
            Err(e) => tracing::warn!(error = %e, "failed to encode game for saving"),
        }
    }

    /// Write an already-encoded record. Used by the driver to keep
    /// serialization on its own task and the write off it.
    pub fn write_encoded(&self, raw: &str) {
        if let Err(e) = self.store.set(&self.key, raw) {
            tracing::warn!(key = %self.key, error = %e, "failed to save game");
        }
    }

    pub fn load(&self) -> Option<PersistedGame> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read saved game");
                return None;
            }
        };
        match decode(&raw) {
            Ok(persisted) => Some(persisted),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "ignoring saved game");
                None
            }
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to clear saved game");
        }
    }
}
