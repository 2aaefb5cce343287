//! Bot-vs-bot arena runner.
//!
//! Plays many seeded games through the reducer, checking invariants after
//! every transition. Games are independent, so they run on the rayon pool.

use std::collections::HashMap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::engine::bot::{BotMove, GuessStrategy};
use crate::engine::events::GameEvent;
use crate::engine::invariants::check_transition;
use crate::engine::models::{GamePhase, GameSettings, GameState, Player, DEFAULT_SETTINGS};
use crate::engine::reducer::reduce;
use crate::engine::selectors::{guessed_count, winner};

#[derive(Debug, Clone)]
pub struct ArenaParams {
    pub num_games: usize,
    pub base_seed: u64,
    pub settings: GameSettings,
    /// Turns after which an undecided game is abandoned.
    pub max_turns: usize,
    /// Rotate the seat order between games.
    pub alternate_seats: bool,
}

impl Default for ArenaParams {
    fn default() -> Self {
        Self {
            num_games: 100,
            base_seed: 42,
            settings: GameSettings {
                strikes_enabled: true,
                ..DEFAULT_SETTINGS
            },
            max_turns: 1000,
            alternate_seats: true,
        }
    }
}

/// Outcome of a single simulated game.
#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub seed: u64,
    pub winner: Option<String>,
    pub countries: usize,
    pub turns: usize,
    pub stalled: bool,
    pub violations: Vec<String>,
}

/// Aggregated results from an arena run.
#[derive(Debug, Clone, Default)]
pub struct ArenaResult {
    pub num_games: usize,
    pub wins: HashMap<String, usize>,
    pub no_winner: usize,
    pub stalls: usize,
    pub countries: Vec<usize>,
    pub turns: Vec<usize>,
    pub violations: Vec<String>,
    pub elapsed_ms: f64,
}

fn mean(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<usize>() as f64 / values.len() as f64
}

impl ArenaResult {
    pub fn win_rate(&self, name: &str) -> f64 {
        *self.wins.get(name).unwrap_or(&0) as f64 / self.num_games.max(1) as f64
    }

    pub fn avg_countries(&self) -> f64 {
        mean(&self.countries)
    }

    pub fn avg_turns(&self) -> f64 {
        mean(&self.turns)
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Arena Results ({} games)", self.num_games)];
        lines.push("=".repeat(60));
        let mut names: Vec<&String> = self.wins.keys().collect();
        names.sort();
        for name in names {
            lines.push(format!(
                "  {:>12}: {:3} wins ({:5.1}%)",
                name,
                self.wins[name],
                self.win_rate(name) * 100.0
            ));
        }
        lines.push(format!("  {:>12}: {}", "No winner", self.no_winner));
        lines.push(format!("  {:>12}: {}", "Stalled", self.stalls));
        lines.push(format!(
            "  Avg countries: {:.1}  |  Avg turns: {:.1}",
            self.avg_countries(),
            self.avg_turns()
        ));
        lines.push(format!("  Total: {:.1}s", self.elapsed_ms / 1000.0));
        if !self.violations.is_empty() {
            lines.push(format!("  INVARIANT VIOLATIONS: {}", self.violations.len()));
            for v in self.violations.iter().take(10) {
                lines.push(format!("    {}", v));
            }
        }
        lines.join("\n")
    }

    fn record(&mut self, outcome: GameOutcome) {
        match &outcome.winner {
            Some(name) => *self.wins.entry(name.clone()).or_insert(0) += 1,
            None => self.no_winner += 1,
        }
        if outcome.stalled {
            self.stalls += 1;
        }
        self.countries.push(outcome.countries);
        self.turns.push(outcome.turns);
        self.violations.extend(
            outcome
                .violations
                .into_iter()
                .map(|v| format!("seed {}: {}", outcome.seed, v)),
        );
    }
}

/// Run `params.num_games` games with one seat per strategy.
///
/// Wins are credited to the strategy's name, so give each strategy a
/// distinct one.
pub fn run_arena(params: &ArenaParams, strategies: &[Box<dyn GuessStrategy>]) -> ArenaResult {
    let t0 = Instant::now();
    let mut result = ArenaResult {
        num_games: params.num_games,
        wins: strategies.iter().map(|s| (s.name().to_string(), 0)).collect(),
        ..ArenaResult::default()
    };
    if strategies.is_empty() {
        return result;
    }

    let outcomes: Vec<GameOutcome> = (0..params.num_games)
        .into_par_iter()
        .map(|game_idx| {
            let n = strategies.len();
            let rotation = if params.alternate_seats { game_idx % n } else { 0 };
            let seats: Vec<&dyn GuessStrategy> = (0..n)
                .map(|i| strategies[(i + rotation) % n].as_ref())
                .collect();
            play_one_game(params, &seats, params.base_seed + game_idx as u64)
        })
        .collect();

    for outcome in outcomes {
        result.record(outcome);
    }
    result.elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
    tracing::debug!(
        games = result.num_games,
        stalls = result.stalls,
        violations = result.violations.len(),
        "arena run finished"
    );
    result
}

fn step(state: &GameState, event: &GameEvent, violations: &mut Vec<String>) -> GameState {
    let next = reduce(state, event);
    violations.extend(
        check_transition(state, event, &next)
            .into_iter()
            .map(|v| format!("after {}: {}", event.name(), v)),
    );
    next
}

/// Play one game to completion or to the turn cap.
pub fn play_one_game(params: &ArenaParams, seats: &[&dyn GuessStrategy], seed: u64) -> GameOutcome {
    let mut rng = StdRng::seed_from_u64(seed);
    let players: Vec<Player> = seats
        .iter()
        .enumerate()
        .map(|(i, s)| Player::with_id(format!("seat-{}", i), s.name()))
        .collect();

    let mut violations = Vec::new();
    let mut state = step(
        &GameState::initial(),
        &GameEvent::StartGame {
            settings: params.settings,
            players,
        },
        &mut violations,
    );

    let mut turns = 0;
    while state.phase == GamePhase::Active && turns < params.max_turns {
        let Some(seat) = seats.get(state.current_player_index) else {
            break;
        };
        match seat.choose_move(&state, &mut rng) {
            BotMove::Guess(raw) => {
                let event = GameEvent::submit_guess(raw, turns as i64 * 1000);
                state = step(&state, &event, &mut violations);
            }
            BotMove::Skip => {
                state = step(&state, &GameEvent::AdvanceTurn, &mut violations);
            }
            BotMove::Timeout => {
                while state.timer_remaining.is_some_and(|r| r > 0) {
                    state = step(&state, &GameEvent::TimerTick, &mut violations);
                }
                state = step(&state, &GameEvent::TimerTimeout, &mut violations);
            }
        }
        turns += 1;
    }

    GameOutcome {
        seed,
        winner: winner(&state).map(|p| p.name.clone()),
        countries: guessed_count(&state),
        turns,
        stalled: state.phase == GamePhase::Active,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bot::{Passer, RandomGuesser};

    fn field() -> Vec<Box<dyn GuessStrategy>> {
        vec![
            Box::new(RandomGuesser::new("sharp", 0.9)),
            Box::new(RandomGuesser::new("shaky", 0.4)),
        ]
    }

    #[test]
    fn test_arena_runs_clean() {
        let params = ArenaParams {
            num_games: 20,
            ..ArenaParams::default()
        };
        let result = run_arena(&params, &field());
        assert!(result.violations.is_empty(), "{:?}", result.violations);
        assert_eq!(result.countries.len(), 20);
        let decided: usize = result.wins.values().sum();
        assert_eq!(decided + result.no_winner, 20);
        assert_eq!(result.stalls, 0);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let params = ArenaParams::default();
        let a = RandomGuesser::new("a", 0.6);
        let b = RandomGuesser::new("b", 0.6);
        let seats: Vec<&dyn GuessStrategy> = vec![&a, &b];
        let first = play_one_game(&params, &seats, 1234);
        let second = play_one_game(&params, &seats, 1234);
        assert_eq!(first.winner, second.winner);
        assert_eq!(first.countries, second.countries);
        assert_eq!(first.turns, second.turns);
    }

    #[test]
    fn test_strikes_off_stalls_at_cap() {
        let params = ArenaParams {
            num_games: 3,
            max_turns: 25,
            settings: GameSettings {
                strikes_enabled: false,
                ..DEFAULT_SETTINGS
            },
            ..ArenaParams::default()
        };
        let strategies: Vec<Box<dyn GuessStrategy>> = vec![Box::new(Passer), Box::new(Passer)];
        let result = run_arena(&params, &strategies);
        assert_eq!(result.stalls, 3);
        assert_eq!(result.no_winner, 3);
        assert!(result.turns.iter().all(|&t| t == 25));
    }

    #[test]
    fn test_timeouts_drive_eliminations() {
        let mut slow = RandomGuesser::new("slow", 0.0);
        slow.timeout_rate = 1.0;
        let params = ArenaParams {
            num_games: 4,
            settings: GameSettings {
                timer_enabled: true,
                timer_seconds: 5,
                strikes_enabled: true,
                max_strikes: 2,
                ..DEFAULT_SETTINGS
            },
            ..ArenaParams::default()
        };
        let strategies: Vec<Box<dyn GuessStrategy>> = vec![
            Box::new(slow),
            Box::new(RandomGuesser::new("quick", 1.0)),
        ];
        let result = run_arena(&params, &strategies);
        assert!(result.violations.is_empty(), "{:?}", result.violations);
        assert_eq!(result.wins["quick"], 4);
    }
}
