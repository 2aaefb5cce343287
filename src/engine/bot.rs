//! Scripted guessers for simulated games.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::countries::{aliases_for, country_iso_codes, display_name};
use crate::engine::models::GameState;

/// What a simulated player does on its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotMove {
    Guess(String),
    Skip,
    /// Let the clock run out.
    Timeout,
}

/// A bot strategy picks a move for the current player.
pub trait GuessStrategy: Send + Sync {
    fn name(&self) -> &str;
    fn choose_move(&self, state: &GameState, rng: &mut StdRng) -> BotMove;
}

/// Knows the map with probability `accuracy`; otherwise repeats a revealed
/// country or mistypes one. Lets the clock expire with `timeout_rate`.
#[derive(Debug, Clone)]
pub struct RandomGuesser {
    pub label: String,
    pub accuracy: f64,
    pub timeout_rate: f64,
    pub alias_rate: f64,
}

impl RandomGuesser {
    pub fn new(label: impl Into<String>, accuracy: f64) -> Self {
        Self {
            label: label.into(),
            accuracy,
            timeout_rate: 0.0,
            alias_rate: 0.3,
        }
    }

    fn correct_guess(&self, state: &GameState, rng: &mut StdRng) -> Option<String> {
        let unguessed: Vec<&str> = country_iso_codes()
            .into_iter()
            .filter(|iso| !state.guessed_countries.contains_key(*iso))
            .collect();
        let iso = *unguessed.choose(rng)?;
        if rng.gen_bool(probability(self.alias_rate)) {
            let aliases: Vec<&str> = aliases_for(iso).collect();
            if let Some(alias) = aliases.choose(rng) {
                return Some(alias.to_string());
            }
        }
        display_name(iso).map(str::to_string)
    }

    fn wrong_guess(&self, state: &GameState, rng: &mut StdRng) -> String {
        let revealed: Vec<&String> = state
            .guessed_countries
            .values()
            .map(|g| &g.display_name)
            .collect();
        if rng.gen_bool(0.5) {
            if let Some(name) = revealed.choose(rng) {
                return name.to_string();
            }
        }
        let codes = country_iso_codes();
        let name = codes
            .choose(rng)
            .and_then(|iso| display_name(iso))
            .unwrap_or("Atlantis");
        mistype(name, rng)
    }
}

/// A usable probability: clamped into `[0, 1]`, with NaN counted as never.
fn probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Drop a letter and end with `?`, which normalization keeps, so the
/// result never matches.
fn mistype(name: &str, rng: &mut StdRng) -> String {
    let chars: Vec<char> = name.chars().collect();
    let drop = rng.gen_range(0..chars.len().max(1));
    let mut typo: String = chars
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != drop)
        .map(|(_, c)| *c)
        .collect();
    typo.push('?');
    typo
}

impl GuessStrategy for RandomGuesser {
    fn name(&self) -> &str {
        &self.label
    }

    fn choose_move(&self, state: &GameState, rng: &mut StdRng) -> BotMove {
        if rng.gen_bool(probability(self.timeout_rate)) {
            return BotMove::Timeout;
        }
        if rng.gen_bool(probability(self.accuracy)) {
            if let Some(guess) = self.correct_guess(state, rng) {
                return BotMove::Guess(guess);
            }
        }
        BotMove::Guess(self.wrong_guess(state, rng))
    }
}

/// Always passes its turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passer;

impl GuessStrategy for Passer {
    fn name(&self) -> &str {
        "passer"
    }

    fn choose_move(&self, _state: &GameState, _rng: &mut StdRng) -> BotMove {
        BotMove::Skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::resolve;
    use rand::SeedableRng;

    #[test]
    fn test_perfect_guesser_always_resolves_novel_country() {
        let bot = RandomGuesser::new("perfect", 1.0);
        let mut rng = StdRng::seed_from_u64(7);
        let state = GameState::initial();
        for _ in 0..50 {
            match bot.choose_move(&state, &mut rng) {
                BotMove::Guess(g) => assert!(resolve(&g).is_some(), "{} did not resolve", g),
                other => panic!("unexpected move {:?}", other),
            }
        }
    }

    #[test]
    fn test_nan_rates_do_not_panic() {
        let bot = RandomGuesser {
            label: "broken".into(),
            accuracy: f64::NAN,
            timeout_rate: f64::NAN,
            alias_rate: f64::INFINITY,
        };
        let mut rng = StdRng::seed_from_u64(3);
        let state = GameState::initial();
        for _ in 0..20 {
            match bot.choose_move(&state, &mut rng) {
                BotMove::Guess(g) => assert!(resolve(&g).is_none(), "{} resolved", g),
                other => panic!("unexpected move {:?}", other),
            }
        }
        assert_eq!(probability(-2.0), 0.0);
        assert_eq!(probability(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_hopeless_guesser_never_reveals() {
        let bot = RandomGuesser::new("hopeless", 0.0);
        let mut rng = StdRng::seed_from_u64(11);
        let state = GameState::initial();
        for _ in 0..50 {
            match bot.choose_move(&state, &mut rng) {
                BotMove::Guess(g) => assert!(resolve(&g).is_none(), "{} resolved", g),
                other => panic!("unexpected move {:?}", other),
            }
        }
    }
}
