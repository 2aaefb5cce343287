//! The event set accepted by the reducer.
//!
//! Serialized as `{"type": "SUBMIT_GUESS", "payload": {...}}` so event logs
//! read the same as the transition table.

use serde::{Deserialize, Serialize};

use crate::engine::models::{GameSettings, GameState, Player, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum GameEvent {
    StartGame {
        settings: GameSettings,
        players: Vec<Player>,
    },
    SubmitGuess {
        raw_guess: String,
        timestamp: i64,
    },
    ApplyStrike {
        #[serde(default)]
        player_id: Option<PlayerId>,
    },
    Eliminate {
        player_id: PlayerId,
    },
    AdvanceTurn,
    TimerTick,
    TimerTimeout,
    Reset,
    NewGame {
        #[serde(default)]
        settings: Option<GameSettings>,
    },
    Rehydrate {
        state: Box<GameState>,
    },
}

impl GameEvent {
    /// Wire name of the event, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::StartGame { .. } => "START_GAME",
            GameEvent::SubmitGuess { .. } => "SUBMIT_GUESS",
            GameEvent::ApplyStrike { .. } => "APPLY_STRIKE",
            GameEvent::Eliminate { .. } => "ELIMINATE",
            GameEvent::AdvanceTurn => "ADVANCE_TURN",
            GameEvent::TimerTick => "TIMER_TICK",
            GameEvent::TimerTimeout => "TIMER_TIMEOUT",
            GameEvent::Reset => "RESET",
            GameEvent::NewGame { .. } => "NEW_GAME",
            GameEvent::Rehydrate { .. } => "REHYDRATE",
        }
    }

    pub fn submit_guess(raw_guess: impl Into<String>, timestamp: i64) -> Self {
        GameEvent::SubmitGuess {
            raw_guess: raw_guess.into(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_value(GameEvent::submit_guess("France", 42)).unwrap();
        assert_eq!(json["type"], "SUBMIT_GUESS");
        assert_eq!(json["payload"]["rawGuess"], "France");
        assert_eq!(json["payload"]["timestamp"], 42);

        let tick: GameEvent = serde_json::from_str(r#"{"type":"TIMER_TICK"}"#).unwrap();
        assert_eq!(tick, GameEvent::TimerTick);

        let strike: GameEvent =
            serde_json::from_str(r#"{"type":"APPLY_STRIKE","payload":{"playerId":"p1"}}"#).unwrap();
        assert_eq!(
            strike,
            GameEvent::ApplyStrike {
                player_id: Some("p1".into())
            }
        );
    }

    #[test]
    fn test_event_names() {
        assert_eq!(GameEvent::Reset.name(), "RESET");
        assert_eq!(GameEvent::NewGame { settings: None }.name(), "NEW_GAME");
    }
}
