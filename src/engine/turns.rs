//! Turn rotation and roster bookkeeping.

use std::collections::HashSet;

use crate::engine::models::{GameState, Player};

/// Number of players that are not eliminated.
pub fn count_remaining_players(players: &[Player]) -> usize {
    players.iter().filter(|p| !p.eliminated).count()
}

/// Index of the next non-eliminated player after the current one, wrapping.
///
/// Returns `None` for an empty roster. With one or zero players left the
/// current index is returned unchanged.
pub fn next_player_index(state: &GameState) -> Option<usize> {
    let players = &state.players;
    if players.is_empty() {
        return None;
    }
    let current = state.current_player_index;
    if count_remaining_players(players) <= 1 {
        return Some(current);
    }

    let len = players.len();
    (1..=len)
        .map(|step| (current + step) % len)
        .find(|&i| !players[i].eliminated)
        .or(Some(current))
}

/// Give every player a non-empty, unique id. Missing or duplicate ids become
/// `player-{index}`.
pub fn ensure_player_ids(players: Vec<Player>) -> Vec<Player> {
    let mut taken: HashSet<String> = HashSet::with_capacity(players.len());
    players
        .into_iter()
        .enumerate()
        .map(|(i, mut p)| {
            let trimmed = p.id.trim();
            let mut id = if trimmed.is_empty() || taken.contains(trimmed) {
                format!("player-{}", i)
            } else {
                trimmed.to_string()
            };
            let mut suffix = 1;
            while taken.contains(&id) {
                id = format!("player-{}-{}", i, suffix);
                suffix += 1;
            }
            taken.insert(id.clone());
            p.id = id;
            p
        })
        .collect()
}

/// At least one player has a non-blank name.
pub fn can_start_game(players: &[Player]) -> bool {
    players.iter().any(|p| !p.name.trim().is_empty())
}
