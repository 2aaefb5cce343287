//! `GameStore`: the single current state, replaced whole by the reducer.

use crate::engine::events::GameEvent;
use crate::engine::models::GameState;
use crate::engine::reducer::reduce;

/// Holds the current state. Readers get a shared reference; the only way to
/// change it is `dispatch`.
#[derive(Debug, Clone, Default)]
pub struct GameStore {
    state: GameState,
}

impl GameStore {
    pub fn new() -> Self {
        Self::with_state(GameState::initial())
    }

    pub fn with_state(state: GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply `event`. Returns whether the state changed.
    pub fn dispatch(&mut self, event: &GameEvent) -> bool {
        let next = reduce(&self.state, event);
        if next == self.state {
            tracing::trace!(event = event.name(), "event had no effect");
            return false;
        }
        tracing::debug!(event = event.name(), phase = ?next.phase, "state updated");
        self.state = next;
        true
    }

    pub fn into_state(self) -> GameState {
        self.state
    }
}
