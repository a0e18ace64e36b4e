//! Rotating decks with a fixed-size visible "shop" window.

mod rotation;
mod shuffler;

pub use rotation::Pile;
pub use shuffler::{RandomShuffler, Shuffler};
