//! Polymorphic resource-conversion contracts.
//!
//! An `Effect` describes the legal `(input, output, pollution)` triples
//! for a card. Cards host up to two of them (upper and lower slot) and
//! delegate the final legality decision here.

mod effect;

pub use effect::{Effect, EffectSlot};
