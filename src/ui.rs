//! Plain-text rendering for the terminal front end.

use crate::engine::models::{Difficulty, GamePhase, GameSettings, GameState};
use crate::engine::selectors::{
    countries_guessed_by, current_player, guessed_count, is_game_over, standings, winner,
};
use crate::session::{Command, Snapshot};

pub const HELP: &str = "\
Commands:
  <names, comma separated>   start a game (setup)
  <country>                  guess (in game)
  /skip                      pass the turn
  /new                       rematch with the same players
  /timer <seconds>|off       set the turn timer
  /strikes <n>|off           set strikes before elimination
  /difficulty easy|medium|hard
  /quit                      abandon the game and return to setup
  /exit                      leave (the game is saved)";

/// One line of user input, interpreted against the current phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(Command),
    Help,
    Invalid(String),
    Nothing,
}

/// `m:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Strike pips, e.g. `xx-` for 2 of 3.
fn strike_bar(strikes: u32, max: u32) -> String {
    (0..max).map(|i| if i < strikes { 'x' } else { '-' }).collect()
}

/// The header shown above the prompt.
pub fn status_line(state: &GameState, settings: &GameSettings) -> String {
    let mut parts = vec![format!("Guessed: {}", guessed_count(state))];
    if let Some(remaining) = state.timer_remaining {
        parts.push(format!("Time: {}", format_time(remaining)));
    }
    if let Some(player) = current_player(state).filter(|_| !is_game_over(state)) {
        let mut turn = format!("Turn: {}", player.name);
        if state.strikes_on() {
            turn.push_str(&format!(
                " [{}] {}/{} strikes",
                strike_bar(player.strikes, state.strike_limit()),
                player.strikes,
                state.strike_limit()
            ));
        }
        parts.push(turn);
    }
    parts.push(format!("Difficulty: {}", settings.difficulty.as_str()));
    parts.join("  |  ")
}

/// One line per player in turn order.
pub fn roster_lines(state: &GameState) -> Vec<String> {
    let game_over = is_game_over(state);
    state
        .players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let marker = if !game_over && state.phase == GamePhase::Active && i == state.current_player_index {
                '>'
            } else {
                ' '
            };
            let tail = if p.eliminated {
                "OUT".to_string()
            } else if state.strikes_on() {
                "x".repeat(p.strikes as usize)
            } else {
                String::new()
            };
            format!(
                "{} {}. {:<16} {:>3}  {}",
                marker,
                i + 1,
                p.name,
                countries_guessed_by(state, &p.id),
                tail
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

/// Final summary, e.g. `Total countries found: 7` then `Ann: 4 · Bo: 3`.
pub fn game_over_summary(state: &GameState) -> Vec<String> {
    let mut lines = vec!["Game Over!".to_string()];
    if let Some(w) = winner(state) {
        lines.push(format!("Winner: {}", w.name));
    }
    lines.push(format!("Total countries found: {}", guessed_count(state)));
    lines.push(
        standings(state)
            .into_iter()
            .map(|(p, n)| format!("{}: {}", p.name, n))
            .collect::<Vec<_>>()
            .join(" · "),
    );
    lines
}

/// The settings the next round will use.
pub fn settings_line(settings: &GameSettings) -> String {
    let timer = if settings.timer_enabled {
        format!("{}s", settings.timer_seconds)
    } else {
        "off".to_string()
    };
    let strikes = match settings.effective_strikes() {
        (true, n) => n.to_string(),
        (false, _) => "off".to_string(),
    };
    format!(
        "Timer: {}  |  Strikes: {}  |  Difficulty: {}",
        timer,
        strikes,
        settings.difficulty.as_str()
    )
}

fn parse_setting(cmd: &str, arg: &str, settings: &GameSettings) -> Result<GameSettings, String> {
    let mut next = *settings;
    let off = arg.eq_ignore_ascii_case("off");
    match cmd {
        "/timer" if off => next.timer_enabled = false,
        "/timer" => {
            next.timer_seconds = arg
                .parse()
                .map_err(|_| format!("not a number of seconds: {:?}", arg))?;
            next.timer_enabled = true;
        }
        "/strikes" if off => next.strikes_enabled = false,
        "/strikes" => {
            next.max_strikes = arg
                .parse()
                .map_err(|_| format!("not a strike count: {:?}", arg))?;
            next.strikes_enabled = true;
        }
        "/difficulty" => {
            next.difficulty = Difficulty::parse(arg).ok_or_else(|| format!("unknown difficulty {:?}", arg))?;
        }
        _ => return Err(format!("unknown command {}", cmd)),
    }
    Ok(next.sanitized())
}

/// Map a line typed at the prompt to a session command.
pub fn parse_input(line: &str, snapshot: &Snapshot) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Nothing;
    }
    let phase = snapshot.state.phase;

    if line.starts_with('/') {
        let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));
        let cmd = cmd.to_ascii_lowercase();
        let arg = arg.trim();
        return match cmd.as_str() {
            "/help" | "/?" => Input::Help,
            "/exit" => Input::Command(Command::Exit),
            "/quit" => Input::Command(Command::Quit),
            "/skip" if phase == GamePhase::Active => Input::Command(Command::Skip),
            "/skip" => Input::Invalid("no game in progress".into()),
            "/new" if !snapshot.state.players.is_empty() => Input::Command(Command::PlayAgain),
            "/new" => Input::Invalid("enter player names first".into()),
            "/timer" | "/strikes" | "/difficulty" if arg.is_empty() => {
                Input::Invalid(format!("usage: {} <value>", cmd))
            }
            _ => match parse_setting(&cmd, arg, &snapshot.settings) {
                Ok(settings) => Input::Command(Command::UpdateSettings(settings)),
                Err(e) => Input::Invalid(e),
            },
        };
    }

    match phase {
        GamePhase::Setup => {
            let names: Vec<String> = line
                .split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect();
            if names.is_empty() {
                Input::Invalid("enter at least one player name".into())
            } else {
                Input::Command(Command::Start { names })
            }
        }
        GamePhase::Active => Input::Command(Command::Guess(line.to_string())),
        GamePhase::Finished => Input::Invalid("the game is over; /new for a rematch".into()),
    }
}

/// Lines to print when the published snapshot moves from `prev` to `next`.
pub fn render_transition(prev: &Snapshot, next: &Snapshot) -> Vec<String> {
    let (before, after) = (&prev.state, &next.state);
    let mut lines = Vec::new();

    if prev.settings != next.settings {
        lines.push(settings_line(&next.settings));
    }

    match (before.phase, after.phase) {
        (_, GamePhase::Setup) if before.phase != GamePhase::Setup => {
            lines.push("Back to setup. Enter player names separated by commas.".into());
        }
        (GamePhase::Active, GamePhase::Active) => {
            let mut ticked_only = before.clone();
            ticked_only.timer_remaining = after.timer_remaining;
            if ticked_only == *after {
                if let Some(left) = after.timer_remaining.filter(|r| matches!(r, 10 | 5 | 3 | 2 | 1)) {
                    lines.push(format!("{}s left", left));
                }
                return lines;
            }
            if let Some(feedback) = guess_feedback(before, after) {
                if before.timer_remaining == Some(0) && after.guessed_countries.len() == before.guessed_countries.len() {
                    lines.push(feedback.replacen("Wrong.", "Time's up.", 1));
                } else {
                    lines.push(feedback);
                }
            }
            lines.push(status_line(after, &next.settings));
        }
        (_, GamePhase::Active) => {
            lines.push("Game on!".into());
            lines.extend(roster_lines(after));
            lines.push(status_line(after, &next.settings));
        }
        (_, GamePhase::Finished) if before.phase != GamePhase::Finished => {
            if before.phase == GamePhase::Active {
                lines.extend(guess_feedback(before, after));
            }
            lines.extend(game_over_summary(after));
            lines.push("Type /new for a rematch, /quit for setup or /exit to leave.".into());
        }
        _ => {}
    }
    lines
}

/// Feedback after a guess, from the states before and after it.
pub fn guess_feedback(before: &GameState, after: &GameState) -> Option<String> {
    if after.guessed_countries.len() > before.guessed_countries.len() {
        let iso = after.last_guessed_country_iso.as_deref()?;
        let name = &after.guessed_countries.get(iso)?.display_name;
        return Some(format!("Correct! {} revealed.", name));
    }
    if before.phase != GamePhase::Active {
        return None;
    }
    let player = before.players.get(before.current_player_index)?;
    let now = after.players.iter().find(|p| p.id == player.id)?;
    if now.eliminated && !player.eliminated {
        Some(format!("Wrong. {} is out!", player.name))
    } else if now.strikes > player.strikes {
        Some(format!("Wrong. Strike {} for {}.", now.strikes, player.name))
    } else {
        Some("Wrong. Turn passes.".to_string())
    }
}
