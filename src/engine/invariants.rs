//! Game invariants: sanity checks that detect reducer bugs.
//!
//! These should never fire for a state produced by `reduce` from
//! `GameState::initial()`. The arena runs them after every transition.

use std::collections::HashSet;

use crate::engine::events::GameEvent;
use crate::engine::models::{GamePhase, GameState};
use crate::engine::turns::count_remaining_players;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Check the invariants of a single state. Empty when all hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if !state.players.is_empty() && state.current_player_index >= state.players.len() {
        violations.push(violation(format!(
            "current player index {} out of range for {} players",
            state.current_player_index,
            state.players.len()
        )));
    }

    let mut ids = HashSet::new();
    for p in &state.players {
        if p.id.is_empty() {
            violations.push(violation(format!("player {:?} has an empty id", p.name)));
        }
        if !ids.insert(p.id.as_str()) {
            violations.push(violation(format!("duplicate player id {:?}", p.id)));
        }
    }

    for (key, guessed) in &state.guessed_countries {
        if *key != guessed.iso_code {
            violations.push(violation(format!(
                "guessed entry keyed {} carries code {}",
                key, guessed.iso_code
            )));
        }
        if !ids.contains(guessed.guessed_by_player_id.as_str()) {
            violations.push(violation(format!(
                "{} attributed to unknown player {:?}",
                key, guessed.guessed_by_player_id
            )));
        }
    }

    if state.phase == GamePhase::Active && state.strikes_on() {
        for p in &state.players {
            if !p.eliminated && p.strikes >= state.strike_limit() {
                violations.push(violation(format!(
                    "player {} has {} strikes but is not eliminated",
                    p.id, p.strikes
                )));
            }
        }
    }

    if state.phase == GamePhase::Active && state.players.is_empty() {
        violations.push(violation("active game with no players".into()));
    }

    if let (Some(remaining), Some(allotment)) = (state.timer_remaining, state.timer_seconds) {
        if remaining > allotment {
            violations.push(violation(format!(
                "timer remaining {} exceeds allotment {}",
                remaining, allotment
            )));
        }
    }

    violations
}

/// Check what must hold across one transition. Events that replace the
/// round (start, new game, reset, rehydrate) only get the state checks.
#[must_use]
pub fn check_transition(prev: &GameState, event: &GameEvent, next: &GameState) -> Vec<InvariantViolation> {
    let mut violations = check_invariants(next);

    let replaces_round = matches!(
        event,
        GameEvent::StartGame { .. } | GameEvent::NewGame { .. } | GameEvent::Reset | GameEvent::Rehydrate { .. }
    );
    if replaces_round || prev.phase == GamePhase::Setup {
        return violations;
    }
    if prev.players.len() != next.players.len() {
        violations.push(violation("player count changed mid-round".into()));
        return violations;
    }

    for (key, before) in &prev.guessed_countries {
        match next.guessed_countries.get(key) {
            Some(after) if after == before => {}
            Some(_) => violations.push(violation(format!("guessed entry {} was overwritten", key))),
            None => violations.push(violation(format!("guessed entry {} disappeared", key))),
        }
    }

    for (before, after) in prev.players.iter().zip(&next.players) {
        if after.strikes < before.strikes {
            violations.push(violation(format!("strikes of {} decreased", after.id)));
        }
        if before.eliminated && after.strikes != before.strikes {
            violations.push(violation(format!("strikes of eliminated {} changed", after.id)));
        }
        if before.eliminated && !after.eliminated {
            violations.push(violation(format!("{} came back after elimination", after.id)));
        }
    }

    if prev.phase == GamePhase::Active
        && next.phase == GamePhase::Finished
        && count_remaining_players(&next.players) > 1
    {
        violations.push(violation("game finished with more than one player left".into()));
    }

    violations
}
