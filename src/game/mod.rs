//! The game: players, piles, turn sequencing and activation policies.

mod actions;
#[allow(clippy::module_inception)]
mod game;
mod observer;
mod player;

pub use actions::{
    ActionProcessor, ActivationOutcome, ActivationRequest, AssistanceProcessor,
    AssistedProcessor, ResourceMover, StandardMover, StandardProcessor,
};
pub use game::{Game, GameBuilder, TurnState};
pub use observer::{GameObserver, GameSnapshot, Observer};
pub use player::Player;
