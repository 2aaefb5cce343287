//! Whole-game scenarios driven through the public reducer API.
//!
//! Run with:
//!     cargo test --test game_flow

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use country_guesser::countries::{country_iso_codes, display_name, normalize, resolve};
use country_guesser::engine::events::GameEvent;
use country_guesser::engine::invariants::{check_invariants, check_transition};
use country_guesser::engine::models::{
    Difficulty, GamePhase, GameSettings, GameState, Player, DEFAULT_SETTINGS,
};
use country_guesser::engine::reducer::reduce;
use country_guesser::engine::selectors::{current_player, is_game_over, winner};
use country_guesser::engine::store::GameStore;

fn start(names: &[&str], settings: GameSettings) -> GameStore {
    let mut store = GameStore::new();
    store.dispatch(&GameEvent::StartGame {
        settings,
        players: names.iter().map(|n| Player::named(*n)).collect(),
    });
    store
}

fn strikes(max_strikes: u32) -> GameSettings {
    GameSettings {
        strikes_enabled: true,
        max_strikes,
        ..DEFAULT_SETTINGS
    }
}

#[test]
fn test_two_player_elimination_scenario() {
    let mut store = start(&["Ann", "Bo"], strikes(2));
    let ann = store.state().players[0].id.clone();

    store.dispatch(&GameEvent::submit_guess("France", 1));
    assert_eq!(store.state().guessed_countries.len(), 1);
    assert_eq!(current_player(store.state()).map(|p| p.name.as_str()), Some("Bo"));

    store.dispatch(&GameEvent::submit_guess("Frabce", 2));
    assert_eq!(store.state().players[1].strikes, 1);
    assert_eq!(store.state().current_player_index, 0);

    store.dispatch(&GameEvent::submit_guess("France", 3));
    assert_eq!(store.state().players[0].strikes, 1);
    assert_eq!(store.state().current_player_index, 1);
    let france = &store.state().guessed_countries["FR"];
    assert_eq!(france.guessed_by_player_id, ann);
    assert_eq!(france.timestamp, 1);

    store.dispatch(&GameEvent::submit_guess("zzzz", 4));
    let state = store.state();
    assert_eq!(state.players[1].strikes, 2);
    assert!(state.players[1].eliminated);
    assert_eq!(state.phase, GamePhase::Finished);
    assert!(is_game_over(state));
    assert_eq!(winner(state).map(|p| p.name.as_str()), Some("Ann"));

    // Stale input after game over changes nothing.
    let frozen = state.clone();
    assert!(!store.dispatch(&GameEvent::submit_guess("Spain", 5)));
    assert!(!store.dispatch(&GameEvent::TimerTick));
    assert_eq!(*store.state(), frozen);
}

#[test]
fn test_resolver_examples() {
    for guess in ["USA", "usa", "U.S.A.", "United States"] {
        let hit = resolve(guess).unwrap_or_else(|| panic!("{} unresolved", guess));
        assert_eq!(hit.iso_code, "US");
        assert_eq!(hit.display_name, "United States of America");
    }
    assert!(resolve("").is_none());
    assert!(resolve("Not a country").is_none());
}

#[test]
fn test_shouted_and_padded_names_resolve() {
    for iso in country_iso_codes() {
        let name = display_name(iso).unwrap();
        let shouted = format!("  {}  ", name.to_uppercase());
        let hit = resolve(&shouted).unwrap_or_else(|| panic!("{:?} unresolved", shouted));
        assert_eq!(hit.iso_code, iso);
        assert_eq!(normalize(&normalize(&shouted)), normalize(&shouted));
    }
}

#[test]
fn test_rotation_skips_eliminated_player() {
    let mut store = start(&["A", "B", "C"], strikes(3));
    let b = store.state().players[1].id.clone();
    store.dispatch(&GameEvent::Eliminate { player_id: b });
    assert_eq!(store.state().phase, GamePhase::Active);
    store.dispatch(&GameEvent::AdvanceTurn);
    assert_eq!(store.state().current_player_index, 2);
    store.dispatch(&GameEvent::AdvanceTurn);
    assert_eq!(store.state().current_player_index, 0);
}

#[test]
fn test_single_strike_ends_two_player_game() {
    let mut store = start(&["A", "B"], strikes(1));
    store.dispatch(&GameEvent::submit_guess("Narnia", 1));
    assert!(store.state().players[0].eliminated);
    assert_eq!(store.state().phase, GamePhase::Finished);
}

#[test]
fn test_hard_mode_overrides_strike_settings() {
    let store = start(
        &["A", "B"],
        GameSettings {
            difficulty: Difficulty::Hard,
            strikes_enabled: false,
            max_strikes: 5,
            ..DEFAULT_SETTINGS
        },
    );
    assert_eq!(store.state().phase, GamePhase::Active);
    assert_eq!(store.state().strikes_enabled, Some(true));
    assert_eq!(store.state().max_strikes, Some(1));
}

#[test]
fn test_timeout_without_strikes_advances() {
    let mut store = start(
        &["A", "B"],
        GameSettings {
            timer_enabled: true,
            timer_seconds: 10,
            ..DEFAULT_SETTINGS
        },
    );
    store.dispatch(&GameEvent::TimerTimeout);
    assert!(store.state().players.iter().all(|p| p.strikes == 0));
    assert_eq!(store.state().current_player_index, 1);
    assert_eq!(store.state().timer_remaining, Some(10));
}

fn random_event(state: &GameState, rng: &mut StdRng) -> GameEvent {
    const GUESSES: &[&str] = &["France", "france", "Peru", "Chile", "usa", "Frabce", "", "Japan", "UK"];
    match rng.gen_range(0..12) {
        0..=5 => GameEvent::submit_guess(*GUESSES.choose(rng).unwrap_or(&"x"), rng.gen()),
        6 => GameEvent::AdvanceTurn,
        7 => GameEvent::TimerTick,
        8 => GameEvent::TimerTimeout,
        9 => GameEvent::ApplyStrike { player_id: None },
        10 => match state.players.choose(rng) {
            Some(p) => GameEvent::Eliminate {
                player_id: p.id.clone(),
            },
            None => GameEvent::AdvanceTurn,
        },
        _ => GameEvent::NewGame { settings: None },
    }
}

#[test]
fn test_random_sequences_keep_invariants_and_reset_clears() {
    for seed in 0..40u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let settings = GameSettings {
            timer_enabled: rng.gen_bool(0.5),
            timer_seconds: 5,
            strikes_enabled: rng.gen_bool(0.7),
            max_strikes: rng.gen_range(1..=4),
            difficulty: Difficulty::Medium,
        };
        let names = ["A", "B", "C", "D"];
        let count = rng.gen_range(1..=names.len());
        let mut state = reduce(
            &GameState::initial(),
            &GameEvent::StartGame {
                settings,
                players: names[..count].iter().map(|n| Player::named(*n)).collect(),
            },
        );
        assert!(check_invariants(&state).is_empty());

        for _ in 0..60 {
            let event = random_event(&state, &mut rng);
            let next = reduce(&state, &event);
            let violations = check_transition(&state, &event, &next);
            assert!(violations.is_empty(), "seed {} {}: {:?}", seed, event.name(), violations);
            if !matches!(event, GameEvent::NewGame { .. }) {
                assert!(next.guessed_countries.len() >= state.guessed_countries.len());
                for (iso, entry) in &state.guessed_countries {
                    assert_eq!(next.guessed_countries.get(iso), Some(entry));
                }
            }
            state = next;
        }

        assert_eq!(reduce(&state, &GameEvent::Reset), GameState::initial());
    }
}
