//! # terra-futura
//!
//! Rules engine for a turn-based, two-or-more-player tile/card
//! placement board game. Players place cards into a personal 3×3
//! territory, chain activations across rows and columns, convert
//! resources through card-bound effects under a per-card pollution
//! budget, draw from rotating shop-window decks, and finally score
//! their territory against a chosen scoring method.
//!
//! ## Architecture
//!
//! The engine is a tree of exclusively owned state with the `Game`
//! state machine as the sole mutator:
//!
//! - `core`: resources, coordinates, player ids, the error taxonomy
//! - `effects`: polymorphic resource-conversion contracts
//! - `cards`: the card's resource/pollution state machine
//! - `grid`: territories with row/column activation propagation
//! - `pile`: rotating decks with a 4-slot visible window
//! - `scoring`: one-shot cached end-of-game valuation
//! - `rewards`: the "pick one resource" micro state machine
//! - `game`: the per-turn state machine, activation policies and
//!   observer broadcast
//!
//! There is no concurrency: exactly one player's action is legal at
//! any moment, enforced by the state machine rather than by locking.
//! Illegal operations fail atomically with a [`core::GameError`] and
//! leave all state unchanged.

pub mod cards;
pub mod core;
pub mod effects;
pub mod game;
pub mod grid;
pub mod pile;
pub mod rewards;
pub mod scoring;

// Re-export commonly used types
pub use crate::cards::Card;
pub use crate::core::{
    CardSource, Deck, GameError, GridPosition, PlayerId, PlayerMap, Points, Resource,
    ResourceList,
};
pub use crate::effects::{Effect, EffectSlot};
pub use crate::game::{
    ActionProcessor, ActivationOutcome, ActivationRequest, AssistanceProcessor,
    AssistedProcessor, Game, GameBuilder, GameObserver, GameSnapshot, Observer, Player,
    ResourceMover, StandardMover, StandardProcessor, TurnState,
};
pub use crate::grid::{ActivationPattern, Grid};
pub use crate::pile::{Pile, RandomShuffler, Shuffler};
pub use crate::rewards::{RewardState, SelectReward};
pub use crate::scoring::ScoringMethod;
