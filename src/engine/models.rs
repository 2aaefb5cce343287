//! Core game data types. Field names serialize in camelCase, which is also
//! the persisted format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type PlayerId = String;

pub const MIN_TIMER_SECONDS: u32 = 5;
pub const MAX_TIMER_SECONDS: u32 = 300;
pub const MIN_MAX_STRIKES: u32 = 1;
pub const MAX_MAX_STRIKES: u32 = 10;

/// Strike threshold used when a state carries no explicit `maxStrikes`.
pub const FALLBACK_MAX_STRIKES: u32 = 3;

pub const DEFAULT_SETTINGS: GameSettings = GameSettings {
    timer_enabled: false,
    timer_seconds: 60,
    strikes_enabled: false,
    max_strikes: FALLBACK_MAX_STRIKES,
    difficulty: Difficulty::Medium,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub strikes: u32,
    pub eliminated: bool,
}

impl Player {
    /// A fresh roster entry with no id yet; `START_GAME` assigns one.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            strikes: 0,
            eliminated: false,
        }
    }

    pub fn with_id(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::named(name)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Whether country borders are drawn before anything is guessed.
    pub fn shows_borders(self) -> bool {
        self == Difficulty::Easy
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub timer_enabled: bool,
    pub timer_seconds: u32,
    pub strikes_enabled: bool,
    pub max_strikes: u32,
    pub difficulty: Difficulty,
}

impl Default for GameSettings {
    fn default() -> Self {
        DEFAULT_SETTINGS
    }
}

impl GameSettings {
    /// Clamp numeric fields into their legal ranges.
    pub fn sanitized(self) -> Self {
        Self {
            timer_seconds: self.timer_seconds.clamp(MIN_TIMER_SECONDS, MAX_TIMER_SECONDS),
            max_strikes: self.max_strikes.clamp(MIN_MAX_STRIKES, MAX_MAX_STRIKES),
            ..self
        }
    }

    /// Strike rules actually in force: hard mode forces single-strike
    /// elimination whatever the user picked.
    pub fn effective_strikes(&self) -> (bool, u32) {
        if self.difficulty == Difficulty::Hard {
            (true, 1)
        } else {
            (self.strikes_enabled, self.sanitized().max_strikes)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Setup,
    Active,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessedCountry {
    pub iso_code: String,
    pub display_name: String,
    pub guessed_by_player_id: PlayerId,
    /// Milliseconds since the Unix epoch, supplied by the caller.
    pub timestamp: i64,
}

/// The aggregate root. Round-scoped fields (`timer_*`, `strikes_enabled`,
/// `max_strikes`) are only meaningful while a round exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub phase: GamePhase,
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub guessed_countries: BTreeMap<String, GuessedCountry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_guessed_country_iso: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_remaining: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikes_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_strikes: Option<u32>,
}

impl GameState {
    /// Fresh setup-phase state with no players.
    pub fn initial() -> Self {
        Self {
            phase: GamePhase::Setup,
            players: Vec::new(),
            current_player_index: 0,
            guessed_countries: BTreeMap::new(),
            last_guessed_country_iso: None,
            timer_remaining: None,
            timer_seconds: None,
            strikes_enabled: None,
            max_strikes: None,
        }
    }

    pub fn strikes_on(&self) -> bool {
        self.strikes_enabled.unwrap_or(false)
    }

    pub fn strike_limit(&self) -> u32 {
        self.max_strikes.unwrap_or(FALLBACK_MAX_STRIKES)
    }

    pub fn timer_configured(&self) -> bool {
        self.timer_seconds.is_some()
    }

    /// Install the round-scoped fields derived from `settings`.
    pub(crate) fn apply_round_settings(&mut self, settings: &GameSettings) {
        let settings = settings.sanitized();
        let (strikes_enabled, max_strikes) = settings.effective_strikes();
        self.strikes_enabled = Some(strikes_enabled);
        self.max_strikes = Some(max_strikes);
        if settings.timer_enabled {
            self.timer_seconds = Some(settings.timer_seconds);
            self.timer_remaining = Some(settings.timer_seconds);
        } else {
            self.timer_seconds = None;
            self.timer_remaining = None;
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_mode_forces_single_strike() {
        let settings = GameSettings {
            strikes_enabled: false,
            max_strikes: 5,
            difficulty: Difficulty::Hard,
            ..DEFAULT_SETTINGS
        };
        assert_eq!(settings.effective_strikes(), (true, 1));

        let medium = GameSettings {
            strikes_enabled: true,
            max_strikes: 5,
            ..DEFAULT_SETTINGS
        };
        assert_eq!(medium.effective_strikes(), (true, 5));
    }

    #[test]
    fn test_sanitized_clamps_ranges() {
        let s = GameSettings {
            timer_seconds: 1,
            max_strikes: 40,
            ..DEFAULT_SETTINGS
        }
        .sanitized();
        assert_eq!(s.timer_seconds, MIN_TIMER_SECONDS);
        assert_eq!(s.max_strikes, MAX_MAX_STRIKES);
    }

    #[test]
    fn test_state_serializes_camel_case() {
        let mut state = GameState::initial();
        state.players.push(Player::with_id("p0", "Ann"));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["phase"], "setup");
        assert_eq!(json["currentPlayerIndex"], 0);
        assert!(json.get("timerRemaining").is_none());
        assert_eq!(json["players"][0]["eliminated"], false);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse(" HARD "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("nightmare"), None);
        assert!(Difficulty::Easy.shows_borders());
        assert!(!Difficulty::Medium.shows_borders());
    }
}
