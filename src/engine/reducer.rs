//! The pure transition function: `(state, event) -> state`.
//!
//! No transition fails. Events that do not apply to the current state return
//! it unchanged; the caller cannot tell an ignored event from a no-op one and
//! does not need to.

use std::collections::BTreeMap;

use crate::countries;
use crate::engine::events::GameEvent;
use crate::engine::models::*;
use crate::engine::turns::{count_remaining_players, ensure_player_ids, next_player_index};

/// Apply one event to `state`, returning the next state.
pub fn reduce(state: &GameState, event: &GameEvent) -> GameState {
    match event {
        GameEvent::StartGame { settings, players } => start_game(state, settings, players),
        GameEvent::SubmitGuess {
            raw_guess,
            timestamp,
        } => submit_guess(state, raw_guess, *timestamp),
        GameEvent::ApplyStrike { player_id } => apply_strike(state, player_id.as_deref()),
        GameEvent::Eliminate { player_id } => eliminate(state, player_id),
        GameEvent::AdvanceTurn => advance_turn(state),
        GameEvent::TimerTick => timer_tick(state),
        GameEvent::TimerTimeout => timer_timeout(state),
        GameEvent::Reset => GameState::initial(),
        GameEvent::NewGame { settings } => new_game(state, settings.as_ref()),
        GameEvent::Rehydrate { state: restored } => restored.as_ref().clone(),
    }
}

fn start_game(state: &GameState, settings: &GameSettings, players: &[Player]) -> GameState {
    let roster: Vec<Player> = players
        .iter()
        .filter(|p| !p.name.trim().is_empty())
        .map(|p| Player {
            id: p.id.clone(),
            name: p.name.trim().to_string(),
            strikes: 0,
            eliminated: false,
        })
        .collect();
    if roster.is_empty() {
        tracing::debug!("START_GAME ignored: no named players");
        return state.clone();
    }

    let mut next = GameState {
        phase: GamePhase::Active,
        players: ensure_player_ids(roster),
        ..GameState::initial()
    };
    next.apply_round_settings(settings);
    tracing::debug!(
        players = next.players.len(),
        strikes_enabled = next.strikes_on(),
        max_strikes = next.strike_limit(),
        timer_seconds = ?next.timer_seconds,
        "game started"
    );
    next
}

fn submit_guess(state: &GameState, raw_guess: &str, timestamp: i64) -> GameState {
    if state.phase != GamePhase::Active {
        return state.clone();
    }
    let Some(current) = state.players.get(state.current_player_index) else {
        return state.clone();
    };

    let mut next = state.clone();
    match countries::resolve(raw_guess) {
        Some(found) if !state.guessed_countries.contains_key(found.iso_code) => {
            tracing::debug!(player_id = %current.id, iso = found.iso_code, "country revealed");
            next.guessed_countries.insert(
                found.iso_code.to_string(),
                GuessedCountry {
                    iso_code: found.iso_code.to_string(),
                    display_name: found.display_name.to_string(),
                    guessed_by_player_id: current.id.clone(),
                    timestamp,
                },
            );
            next.last_guessed_country_iso = Some(found.iso_code.to_string());
        }
        miss => {
            tracing::debug!(
                player_id = %current.id,
                duplicate = miss.is_some(),
                "guess missed"
            );
            if next.strikes_on() {
                strike_player(&mut next, state.current_player_index);
            }
        }
    }
    advance_in_place(&mut next);
    next
}

fn apply_strike(state: &GameState, player_id: Option<&str>) -> GameState {
    if state.phase != GamePhase::Active {
        return state.clone();
    }
    let target = match player_id {
        Some(id) => state.players.iter().position(|p| p.id == id),
        None => (state.current_player_index < state.players.len())
            .then_some(state.current_player_index),
    };
    let Some(index) = target else {
        return state.clone();
    };
    let mut next = state.clone();
    strike_player(&mut next, index);
    next
}

fn eliminate(state: &GameState, player_id: &str) -> GameState {
    let Some(index) = state.players.iter().position(|p| p.id == player_id) else {
        return state.clone();
    };
    if state.players[index].eliminated {
        return state.clone();
    }
    let mut next = state.clone();
    next.players[index].eliminated = true;
    tracing::debug!(player_id, "player eliminated");
    finish_if_decided(&mut next);
    advance_in_place(&mut next);
    next
}

fn advance_turn(state: &GameState) -> GameState {
    let mut next = state.clone();
    advance_in_place(&mut next);
    next
}

fn timer_tick(state: &GameState) -> GameState {
    if state.phase != GamePhase::Active {
        return state.clone();
    }
    let Some(remaining) = state.timer_remaining else {
        return state.clone();
    };
    GameState {
        timer_remaining: Some(remaining.saturating_sub(1)),
        ..state.clone()
    }
}

fn timer_timeout(state: &GameState) -> GameState {
    if state.phase != GamePhase::Active || state.current_player_index >= state.players.len() {
        return state.clone();
    }
    let mut next = state.clone();
    if next.strikes_on() {
        strike_player(&mut next, state.current_player_index);
    } else {
        tracing::debug!("timeout without strikes, turn passes");
    }
    advance_in_place(&mut next);
    next
}

fn new_game(state: &GameState, settings: Option<&GameSettings>) -> GameState {
    if state.players.is_empty() {
        return state.clone();
    }
    let mut next = GameState {
        phase: GamePhase::Active,
        players: state
            .players
            .iter()
            .map(|p| Player {
                strikes: 0,
                eliminated: false,
                ..p.clone()
            })
            .collect(),
        current_player_index: 0,
        guessed_countries: BTreeMap::new(),
        last_guessed_country_iso: None,
        timer_remaining: state.timer_seconds,
        ..state.clone()
    };
    if let Some(settings) = settings {
        next.apply_round_settings(settings);
    }
    next
}

/// Add a strike to `players[index]`, eliminating at the threshold and
/// finishing the game when at most one player is left. Strikes freeze once
/// a player is out.
fn strike_player(state: &mut GameState, index: usize) {
    let strikes_on = state.strikes_on();
    let limit = state.strike_limit();
    let Some(player) = state.players.get_mut(index) else {
        return;
    };
    if player.eliminated {
        return;
    }
    player.strikes += 1;
    tracing::debug!(player_id = %player.id, strikes = player.strikes, "strike");
    if strikes_on && player.strikes >= limit {
        player.eliminated = true;
        tracing::debug!(player_id = %player.id, "player struck out");
        finish_if_decided(state);
    }
}

fn finish_if_decided(state: &mut GameState) {
    if state.phase == GamePhase::Active && count_remaining_players(&state.players) <= 1 {
        state.phase = GamePhase::Finished;
        tracing::debug!("game finished");
    }
}

fn advance_in_place(state: &mut GameState) {
    if state.phase != GamePhase::Active {
        return;
    }
    if let Some(index) = next_player_index(state) {
        state.current_player_index = index;
    }
    if state.timer_seconds.is_some() {
        state.timer_remaining = state.timer_seconds;
    }
}
