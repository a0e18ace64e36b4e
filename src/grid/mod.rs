//! Territories: sparse card placement with activation propagation.
//!
//! One `Grid` per player, bounded to a 3×3 footprint. Placing a card
//! makes every card sharing its row or column eligible for activation
//! for the rest of the turn.

mod pattern;
mod territory;

pub use pattern::ActivationPattern;
pub use territory::Grid;
