//! Runtime configuration: default game settings and where saves live.
//! Loaded from TOML; every field is optional and falls back to built-ins.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::engine::models::{Difficulty, GameSettings, DEFAULT_SETTINGS};
use crate::storage::STORAGE_KEY;

pub const CONFIG_FILE_NAME: &str = "country_guesser.toml";

/// `[settings]` table. Unset fields come from `DEFAULT_SETTINGS`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettingsSection {
    pub timer_enabled: Option<bool>,
    pub timer_seconds: Option<u32>,
    pub strikes_enabled: Option<bool>,
    pub max_strikes: Option<u32>,
    /// "easy", "medium" or "hard".
    pub difficulty: Option<String>,
}

/// `[storage]` table.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageSection {
    pub dir: Option<PathBuf>,
    pub key: Option<String>,
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: SettingsSection,
    #[serde(default)]
    pub storage: StorageSection,
}

impl SettingsSection {
    /// Resolve to concrete settings, clamped into legal ranges.
    pub fn to_game_settings(&self) -> Result<GameSettings, String> {
        let d = DEFAULT_SETTINGS;
        let difficulty = match self.difficulty.as_deref() {
            Some(s) => Difficulty::parse(s).ok_or_else(|| format!("unknown difficulty {:?}", s))?,
            None => d.difficulty,
        };
        Ok(GameSettings {
            timer_enabled: self.timer_enabled.unwrap_or(d.timer_enabled),
            timer_seconds: self.timer_seconds.unwrap_or(d.timer_seconds),
            strikes_enabled: self.strikes_enabled.unwrap_or(d.strikes_enabled),
            max_strikes: self.max_strikes.unwrap_or(d.max_strikes),
            difficulty,
        }
        .sanitized())
    }
}

impl StorageSection {
    pub fn effective_key(&self) -> &str {
        self.key.as_deref().unwrap_or(STORAGE_KEY)
    }

    /// Save directory: configured, else `$HOME/.country-guesser`, else `./.country-guesser`.
    pub fn effective_dir(&self) -> PathBuf {
        if let Some(dir) = &self.dir {
            return dir.clone();
        }
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".country-guesser")
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, String> {
    let config: AppConfig = toml::from_str(content).map_err(|e| e.to_string())?;
    config.settings.to_game_settings()?;
    Ok(config)
}

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &Path) -> Result<AppConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    parse_config(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Try well-known paths, returning built-in defaults if none is usable.
pub fn load_default_config() -> AppConfig {
    let candidates = [
        PathBuf::from(CONFIG_FILE_NAME),
        PathBuf::from("..").join(CONFIG_FILE_NAME),
        PathBuf::from("/etc/country-guesser").join(CONFIG_FILE_NAME),
    ];
    for p in &candidates {
        if p.exists() {
            match load_config(p) {
                Ok(config) => {
                    tracing::info!(path = %p.display(), "loaded config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load config");
                }
            }
        }
    }
    tracing::info!("no {} found, using built-in defaults", CONFIG_FILE_NAME);
    AppConfig::default()
}
