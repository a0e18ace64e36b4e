//! Observer notification for player-visible transitions.
//!
//! The engine pushes a small serializable snapshot to each registered
//! observer after every player-visible transition. Unknown player ids
//! in a broadcast are silently skipped; observers for players absent
//! from the broadcast are not called.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

use super::TurnState;

/// A per-player view of the game, pushed after each transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// The player this snapshot is addressed to.
    pub player: PlayerId,
    /// Current turn counter.
    pub turn_number: u32,
    /// Current state of the turn machine.
    pub state: TurnState,
    /// Whose action is expected next.
    pub on_turn: PlayerId,
    /// Cards placed per player, in player order.
    pub card_counts: Vec<(PlayerId, usize)>,
}

/// Receives per-player snapshots.
pub trait Observer {
    fn notify(&mut self, snapshot: &GameSnapshot);
}

/// Broadcast registry mapping players to their observers.
#[derive(Default)]
pub struct GameObserver {
    observers: FxHashMap<PlayerId, Box<dyn Observer>>,
}

impl GameObserver {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for a player, replacing any previous one.
    pub fn register(&mut self, player: PlayerId, observer: Box<dyn Observer>) {
        self.observers.insert(player, observer);
    }

    /// Forward each snapshot to the matching observer.
    pub fn notify_all(&mut self, snapshots: &FxHashMap<PlayerId, GameSnapshot>) {
        for (player, snapshot) in snapshots {
            if let Some(observer) = self.observers.get_mut(player) {
                observer.notify(snapshot);
            }
        }
    }
}

impl std::fmt::Debug for GameObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameObserver")
            .field("observers", &self.observers.len())
            .finish()
    }
}
