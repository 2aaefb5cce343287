use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;

use country_guesser::config::{load_config, load_default_config};
use country_guesser::engine::models::{Difficulty, GamePhase, GameSettings};
use country_guesser::session::{Command, Session, Snapshot};
use country_guesser::storage::{BlobStore, FileStore, GameStorage, MemoryStore};
use country_guesser::ui::{parse_input, render_transition, settings_line, Input, HELP};

#[derive(Parser)]
#[command(name = "country-guesser", about = "Pass-and-play country guessing game for the terminal")]
struct Cli {
    /// Path to country_guesser.toml (default: auto-discover)
    #[arg(long, env = "COUNTRY_GUESSER_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the saved game
    #[arg(long, env = "COUNTRY_GUESSER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Players, comma separated; starts a game right away
    #[arg(long, value_delimiter = ',')]
    players: Vec<String>,

    /// Turn timer in seconds (enables the timer)
    #[arg(long)]
    timer: Option<u32>,

    /// Strikes before elimination (enables strikes)
    #[arg(long)]
    strikes: Option<u32>,

    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<String>,

    /// Discard any saved game
    #[arg(long)]
    fresh: bool,

    /// Keep the game in memory only
    #[arg(long)]
    no_save: bool,
}

impl Cli {
    fn overlay(&self, mut settings: GameSettings) -> Result<GameSettings, String> {
        if let Some(seconds) = self.timer {
            settings.timer_enabled = true;
            settings.timer_seconds = seconds;
        }
        if let Some(n) = self.strikes {
            settings.strikes_enabled = true;
            settings.max_strikes = n;
        }
        if let Some(d) = &self.difficulty {
            settings.difficulty = Difficulty::parse(d).ok_or_else(|| format!("unknown difficulty {:?}", d))?;
        }
        Ok(settings.sanitized())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_default_config(),
    };
    let settings = cli.overlay(config.settings.to_game_settings()?)?;
    let key = config.storage.effective_key().to_string();

    if cli.no_save {
        play(GameStorage::with_key(MemoryStore::new(), key), settings, &cli).await
    } else {
        let dir = cli.data_dir.clone().unwrap_or_else(|| config.storage.effective_dir());
        tracing::info!(dir = %dir.display(), "saving games to disk");
        play(GameStorage::with_key(FileStore::new(dir), key), settings, &cli).await
    }
}

async fn play<S: BlobStore + 'static>(
    storage: GameStorage<S>,
    settings: GameSettings,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    if cli.fresh {
        storage.clear();
    }
    let (mut session, snapshots) = Session::new(Arc::new(storage), settings);
    let shown = snapshots.borrow().clone();

    println!("Country Guesser. Type /help for commands.");
    if session.restore() {
        println!("Resumed your saved game.");
    }
    if session.state().phase == GamePhase::Setup {
        if cli.players.is_empty() {
            println!("{}", settings_line(session.settings()));
            println!("Enter player names separated by commas.");
        } else {
            session.handle(Command::Start {
                names: cli.players.clone(),
            });
        }
    }

    let (commands, command_rx) = mpsc::channel(32);
    let renderer = tokio::spawn(render_loop(snapshots.clone(), shown));
    std::thread::spawn(move || read_loop(snapshots, commands));

    let final_state = session.run(command_rx).await;
    renderer.abort();
    tracing::debug!(phase = ?final_state.phase, "exiting");
    println!("Bye!");
    Ok(())
}

async fn render_loop(mut snapshots: watch::Receiver<Snapshot>, mut shown: Snapshot) {
    while snapshots.changed().await.is_ok() {
        let next = snapshots.borrow_and_update().clone();
        for line in render_transition(&shown, &next) {
            println!("{}", line);
        }
        shown = next;
    }
}

/// Stdin is read on a plain thread: a blocked read must not hold up
/// runtime shutdown.
fn read_loop(snapshots: watch::Receiver<Snapshot>, commands: mpsc::Sender<Command>) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read input");
                break;
            }
        };
        let input = parse_input(&line, &snapshots.borrow());
        match input {
            Input::Command(command) => {
                if commands.blocking_send(command).is_err() {
                    break;
                }
            }
            Input::Help => println!("{}", HELP),
            Input::Invalid(why) => println!("{}", why),
            Input::Nothing => {}
        }
    }
}
