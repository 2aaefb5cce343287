//! Session driver: the only place with time, I/O and concurrency.
//!
//! Commands from the user and ticks from a one-second interval are consumed
//! by a single task, so events reach the reducer strictly one at a time.
//! Every accepted transition is published to watchers and handed to storage
//! without waiting for the write. Saves and clears go through one queue,
//! drained in order by a single blocking writer.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::engine::events::GameEvent;
use crate::engine::models::{GamePhase, GameSettings, GameState, Player};
use crate::engine::store::GameStore;
use crate::storage::{encode, BlobStore, GameStorage};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// User intents, already separated from their UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start { names: Vec<String> },
    Guess(String),
    Skip,
    PlayAgain,
    UpdateSettings(GameSettings),
    /// Forget the saved game and go back to setup.
    Quit,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// What renderers see after each transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub state: GameState,
    pub settings: GameSettings,
}

enum SaveOp {
    Write(String),
    Clear,
    /// Signals once every earlier op has been applied.
    Flush(oneshot::Sender<()>),
}

fn apply_save<S: BlobStore>(storage: &GameStorage<S>, op: SaveOp) {
    match op {
        SaveOp::Write(raw) => storage.write_encoded(&raw),
        SaveOp::Clear => storage.clear(),
        SaveOp::Flush(done) => {
            let _ = done.send(());
        }
    }
}

/// Single ordered writer in front of the storage. Inside a tokio runtime
/// ops run on one blocking task; without one they run inline.
struct SaveQueue<S: BlobStore + 'static> {
    storage: Arc<GameStorage<S>>,
    ops: Option<mpsc::UnboundedSender<SaveOp>>,
}

impl<S: BlobStore + 'static> SaveQueue<S> {
    fn start(storage: Arc<GameStorage<S>>) -> Self {
        let ops = tokio::runtime::Handle::try_current().ok().map(|handle| {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let writer = Arc::clone(&storage);
            handle.spawn_blocking(move || {
                while let Some(op) = rx.blocking_recv() {
                    apply_save(&writer, op);
                }
                tracing::debug!("save queue closed");
            });
            tx
        });
        Self { storage, ops }
    }

    fn submit(&self, op: SaveOp) {
        let op = match &self.ops {
            Some(tx) => match tx.send(op) {
                Ok(()) => return,
                Err(mpsc::error::SendError(op)) => {
                    tracing::warn!("save writer gone, writing inline");
                    op
                }
            },
            None => op,
        };
        apply_save(&self.storage, op);
    }
}

pub struct Session<S: BlobStore + 'static> {
    store: GameStore,
    settings: GameSettings,
    saves: SaveQueue<S>,
    timeout_dispatched: bool,
    snapshots: watch::Sender<Snapshot>,
}

pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

impl<S: BlobStore + 'static> Session<S> {
    pub fn new(storage: Arc<GameStorage<S>>, settings: GameSettings) -> (Self, watch::Receiver<Snapshot>) {
        let store = GameStore::new();
        let settings = settings.sanitized();
        let (snapshots, rx) = watch::channel(Snapshot {
            state: store.state().clone(),
            settings,
        });
        let session = Self {
            store,
            settings,
            saves: SaveQueue::start(storage),
            timeout_dispatched: false,
            snapshots,
        };
        (session, rx)
    }

    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Replace the fresh state with a saved game, if a valid one exists.
    /// Call once, before the first frame is rendered and before any command.
    pub fn restore(&mut self) -> bool {
        let Some(saved) = self.saves.storage.load() else {
            return false;
        };
        tracing::info!(
            phase = ?saved.game_state.phase,
            players = saved.game_state.players.len(),
            "restored saved game"
        );
        self.store.dispatch(&GameEvent::Rehydrate {
            state: Box::new(saved.game_state),
        });
        self.settings = saved.settings;
        self.publish();
        true
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Start { names } => {
                let players = names.into_iter().map(Player::named).collect();
                self.apply(GameEvent::StartGame {
                    settings: self.settings,
                    players,
                });
            }
            Command::Guess(raw) => {
                if !raw.trim().is_empty() {
                    self.apply(GameEvent::submit_guess(raw, now_millis()));
                }
            }
            Command::Skip => self.apply(GameEvent::AdvanceTurn),
            Command::PlayAgain => self.apply(GameEvent::NewGame {
                settings: Some(self.settings),
            }),
            Command::UpdateSettings(settings) => {
                self.settings = settings.sanitized();
                self.persist();
                self.publish();
            }
            Command::Quit => {
                self.store.dispatch(&GameEvent::Reset);
                self.saves.submit(SaveOp::Clear);
                self.publish();
            }
            Command::Exit => return Flow::Exit,
        }
        Flow::Continue
    }

    /// One second of wall-clock time has passed.
    pub fn on_tick(&mut self) {
        let state = self.store.state();
        if state.phase != GamePhase::Active {
            return;
        }
        let Some(remaining) = state.timer_remaining else {
            return;
        };
        if remaining > 0 {
            self.timeout_dispatched = false;
            self.apply(GameEvent::TimerTick);
        }
        if self.store.state().timer_remaining == Some(0) && !self.timeout_dispatched {
            self.timeout_dispatched = true;
            self.apply(GameEvent::TimerTimeout);
        }
    }

    /// Consume commands until `Exit` or the channel closes, ticking the
    /// timer in between. Returns the final state.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) -> GameState {
        let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.on_tick(),
                command = commands.recv() => match command {
                    Some(command) => {
                        if self.handle(command) == Flow::Exit {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
        self.flush().await;
        tracing::debug!("session loop ended");
        self.store.into_state()
    }

    /// Wait until every save and clear issued so far has reached storage.
    pub async fn flush(&self) {
        let (done, applied) = oneshot::channel();
        self.saves.submit(SaveOp::Flush(done));
        let _ = applied.await;
    }

    fn apply(&mut self, event: GameEvent) {
        if self.store.dispatch(&event) {
            self.persist();
            self.publish();
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(Snapshot {
            state: self.store.state().clone(),
            settings: self.settings,
        });
    }

    fn persist(&self) {
        let raw = match encode(self.store.state(), &self.settings) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode game for saving");
                return;
            }
        };
        self.saves.submit(SaveOp::Write(raw));
    }
}
