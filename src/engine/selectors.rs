//! Read-only queries over `GameState` used by renderers and the driver.

use crate::engine::models::{GamePhase, GameState, GuessedCountry, Player};
use crate::engine::turns::count_remaining_players;

/// The player whose turn it is. `None` unless the game is active.
pub fn current_player(state: &GameState) -> Option<&Player> {
    if state.phase != GamePhase::Active {
        return None;
    }
    state.players.get(state.current_player_index)
}

pub fn active_players(state: &GameState) -> Vec<&Player> {
    state.players.iter().filter(|p| !p.eliminated).collect()
}

pub fn eliminated_players(state: &GameState) -> Vec<&Player> {
    state.players.iter().filter(|p| p.eliminated).collect()
}

/// Game-over as a renderer sees it: finished, or an active game that has
/// run out of contenders.
pub fn is_game_over(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Finished => true,
        GamePhase::Active => count_remaining_players(&state.players) <= 1 && state.players.len() > 1,
        GamePhase::Setup => false,
    }
}

/// Guessed countries in key order.
pub fn guessed_countries_list(state: &GameState) -> Vec<&GuessedCountry> {
    state.guessed_countries.values().collect()
}

pub fn guessed_count(state: &GameState) -> usize {
    state.guessed_countries.len()
}

/// Number of countries revealed by `player_id`.
pub fn countries_guessed_by(state: &GameState, player_id: &str) -> usize {
    state
        .guessed_countries
        .values()
        .filter(|g| g.guessed_by_player_id == player_id)
        .count()
}

/// Whether the map should highlight `iso_code`.
pub fn is_revealed(state: &GameState, iso_code: &str) -> bool {
    state.guessed_countries.contains_key(iso_code)
}

/// Every player with their country count, best first. Ties keep turn order.
pub fn standings(state: &GameState) -> Vec<(&Player, usize)> {
    let mut rows: Vec<(&Player, usize)> = state
        .players
        .iter()
        .map(|p| (p, countries_guessed_by(state, &p.id)))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

/// The last player standing of a finished multi-player game.
pub fn winner(state: &GameState) -> Option<&Player> {
    if state.phase != GamePhase::Finished || state.players.len() < 2 {
        return None;
    }
    let mut remaining = state.players.iter().filter(|p| !p.eliminated);
    match (remaining.next(), remaining.next()) {
        (Some(p), None) => Some(p),
        _ => None,
    }
}
