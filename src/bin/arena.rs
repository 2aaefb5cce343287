//! Arena CLI: run simulated games from the command line.
//!
//! Usage:
//!   cargo run --release --bin arena -- --games 500 --p1-accuracy 0.9 --p2-accuracy 0.6
//!   cargo run --release --bin arena -- --games 200 --timer 10 --strikes 2 --p2-timeout-rate 0.2

use clap::Parser;
use tracing_subscriber::EnvFilter;

use country_guesser::engine::arena::{run_arena, ArenaParams};
use country_guesser::engine::bot::{GuessStrategy, RandomGuesser};
use country_guesser::engine::models::{Difficulty, GameSettings, DEFAULT_SETTINGS};

#[derive(Parser)]
#[command(name = "arena", about = "Run simulated country-guessing games between bots")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    games: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Alternate seat positions between games
    #[arg(long, default_value = "true")]
    alternate_seats: bool,

    /// Turns before an undecided game is abandoned
    #[arg(long, default_value = "1000")]
    max_turns: usize,

    /// Turn timer in seconds (enables the timer)
    #[arg(long)]
    timer: Option<u32>,

    /// Strikes before elimination
    #[arg(long, default_value = "3")]
    strikes: u32,

    /// easy, medium or hard
    #[arg(long, default_value = "medium")]
    difficulty: String,

    // --- Player 1 ---
    /// P1 display name
    #[arg(long, default_value = "p1")]
    p1_name: String,

    /// P1 chance of knowing a new country
    #[arg(long, default_value = "0.8", value_parser = parse_rate)]
    p1_accuracy: f64,

    /// P1 chance of letting the clock run out
    #[arg(long, default_value = "0.0", value_parser = parse_rate)]
    p1_timeout_rate: f64,

    // --- Player 2 ---
    /// P2 display name
    #[arg(long, default_value = "p2")]
    p2_name: String,

    /// P2 chance of knowing a new country
    #[arg(long, default_value = "0.8", value_parser = parse_rate)]
    p2_accuracy: f64,

    /// P2 chance of letting the clock run out
    #[arg(long, default_value = "0.0", value_parser = parse_rate)]
    p2_timeout_rate: f64,
}

/// A probability flag: a finite number in `[0, 1]`.
fn parse_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e| format!("{}: {}", s, e))?;
    if rate.is_finite() && (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("{} is not a probability between 0 and 1", s))
    }
}

fn build_strategy(name: &str, accuracy: f64, timeout_rate: f64) -> Box<dyn GuessStrategy> {
    let mut bot = RandomGuesser::new(name, accuracy);
    bot.timeout_rate = timeout_rate;
    eprintln!("  {}: accuracy={:.2}, timeout_rate={:.2}", name, accuracy, timeout_rate);
    Box::new(bot)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let difficulty = Difficulty::parse(&cli.difficulty).unwrap_or_else(|| {
        eprintln!("Error: unknown difficulty '{}'", cli.difficulty);
        std::process::exit(1);
    });
    if cli.p1_name == cli.p2_name {
        eprintln!("Error: players need distinct names");
        std::process::exit(1);
    }

    let settings = GameSettings {
        timer_enabled: cli.timer.is_some(),
        timer_seconds: cli.timer.unwrap_or(DEFAULT_SETTINGS.timer_seconds),
        strikes_enabled: true,
        max_strikes: cli.strikes,
        difficulty,
    }
    .sanitized();

    let params = ArenaParams {
        num_games: cli.games,
        base_seed: cli.seed,
        settings,
        max_turns: cli.max_turns,
        alternate_seats: cli.alternate_seats,
    };

    eprintln!("Arena: {} games, seed={}, alternate_seats={}", cli.games, cli.seed, cli.alternate_seats);
    let strategies = vec![
        build_strategy(&cli.p1_name, cli.p1_accuracy, cli.p1_timeout_rate),
        build_strategy(&cli.p2_name, cli.p2_accuracy, cli.p2_timeout_rate),
    ];
    eprintln!();

    let result = run_arena(&params, &strategies);
    println!("{}", result.summary());
    if !result.violations.is_empty() {
        std::process::exit(2);
    }
}
