//! Fundamental value types: resources, points, grid coordinates, decks.
//!
//! Everything in this module is a small copyable value. The multiset
//! helpers live here too, since cards, effects and scoring all reason
//! about resource lists as unordered bags.

use std::fmt;
use std::ops::Add;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A resource cube or product token.
///
/// `Red`, `Green` and `Yellow` are the basic cubes; the remaining kinds
/// are refined products created by transformations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Red,
    Green,
    Yellow,
    Money,
    Food,
    Goods,
    Construction,
}

impl Resource {
    /// All resource kinds, in declaration order.
    pub const ALL: [Resource; 7] = [
        Resource::Red,
        Resource::Green,
        Resource::Yellow,
        Resource::Money,
        Resource::Food,
        Resource::Goods,
        Resource::Construction,
    ];

    /// Check whether this is one of the three basic cubes.
    #[must_use]
    pub const fn is_basic(self) -> bool {
        matches!(self, Resource::Red | Resource::Green | Resource::Yellow)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Inline storage for the short resource lists carried by effects.
///
/// Effect inputs and outputs rarely exceed a handful of entries, so the
/// common case stays on the stack.
pub type ResourceList = SmallVec<[Resource; 4]>;

/// Base point value of a scoring method.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Points(pub i64);

/// A coordinate in a player's territory.
///
/// Positions are unbounded integers; the 3×3 territory constraint is a
/// property of the occupied bounding box, not of the coordinate space.
/// Addition is used to translate a local activation pattern onto the
/// territory's actual footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for GridPosition {
    type Output = GridPosition;

    fn add(self, rhs: GridPosition) -> GridPosition {
        GridPosition::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Deck tiers supplying cards during the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Deck {
    LevelI,
    LevelII,
}

impl Deck {
    /// All deck tiers.
    pub const ALL: [Deck; 2] = [Deck::LevelI, Deck::LevelII];
}

/// Names a pile slot for `Game::take_card`.
///
/// `index` follows pile addressing: `1..=4` are the visible window
/// slots, `0` draws blind from the top of the hidden stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSource {
    pub deck: Deck,
    pub index: usize,
}

impl CardSource {
    /// Create a new card source.
    #[must_use]
    pub const fn new(deck: Deck, index: usize) -> Self {
        Self { deck, index }
    }
}

/// Count each resource kind in a list.
#[must_use]
pub fn resource_counts(resources: &[Resource]) -> FxHashMap<Resource, usize> {
    let mut counts = FxHashMap::default();
    for resource in resources {
        *counts.entry(*resource).or_insert(0) += 1;
    }
    counts
}

/// Check whether `wanted` is contained in `have`, as multisets.
#[must_use]
pub fn is_submultiset(wanted: &[Resource], have: &[Resource]) -> bool {
    let available = resource_counts(have);
    resource_counts(wanted)
        .into_iter()
        .all(|(resource, count)| available.get(&resource).copied().unwrap_or(0) >= count)
}

/// Check whether two lists describe the same multiset.
#[must_use]
pub fn same_multiset(a: &[Resource], b: &[Resource]) -> bool {
    a.len() == b.len() && resource_counts(a) == resource_counts(b)
}

/// Remove `wanted` from `have` multiset-exactly.
///
/// Removes the first occurrences of each requested kind; the remaining
/// resources keep their relative order, which keeps removal
/// deterministic. Returns `None` when `wanted` is not contained in
/// `have`.
#[must_use]
pub fn remove_multiset(have: &[Resource], wanted: &[Resource]) -> Option<Vec<Resource>> {
    if !is_submultiset(wanted, have) {
        return None;
    }

    let mut to_remove = resource_counts(wanted);
    let mut remaining = Vec::with_capacity(have.len() - wanted.len());
    for resource in have {
        match to_remove.get_mut(resource) {
            Some(count) if *count > 0 => *count -= 1,
            _ => remaining.push(*resource),
        }
    }
    Some(remaining)
}
