//! Core value types: resources, coordinates, players, errors.
//!
//! This module contains the fundamental building blocks shared by every
//! component of the engine.

pub mod error;
pub mod player;
pub mod types;

pub use error::GameError;
pub use player::{PlayerId, PlayerMap};
pub use types::{
    is_submultiset, remove_multiset, resource_counts, same_multiset, CardSource, Deck,
    GridPosition, Points, Resource, ResourceList,
};
