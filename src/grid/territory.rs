//! A player's territory: sparse card placement plus activation
//! bookkeeping.
//!
//! The territory is a sparse mapping from positions to cards whose
//! occupied bounding box never exceeds 3×3. Placement has a side
//! effect: every already-placed card sharing the new card's row or
//! column becomes eligible for activation this turn. Eligibility is
//! consumed by activation and lapses at end of turn.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::cards::Card;
use crate::core::{GameError, GridPosition};

/// Maximum side length of the occupied bounding box.
const MAX_SPAN: i32 = 3;

/// A full territory holds this many cards.
const FULL_SIZE: usize = 9;

/// Sparse 2-D placement of cards under the 3×3 constraint.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    cells: FxHashMap<GridPosition, Card>,
    pending_activations: FxHashSet<GridPosition>,
    activation_pattern: Option<Vec<GridPosition>>,
}

impl Grid {
    /// Create an empty territory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the card at a position.
    #[must_use]
    pub fn get_card(&self, position: GridPosition) -> Option<&Card> {
        self.cells.get(&position)
    }

    /// Look up the card at a position, mutably.
    pub fn get_card_mut(&mut self, position: GridPosition) -> Option<&mut Card> {
        self.cells.get_mut(&position)
    }

    /// Number of cards placed so far.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cells.len()
    }

    /// A territory is full at 9 cards.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.len() == FULL_SIZE
    }

    /// Iterate over the occupied positions and their cards.
    pub fn iter(&self) -> impl Iterator<Item = (GridPosition, &Card)> {
        self.cells.iter().map(|(position, card)| (*position, card))
    }

    /// Check whether a card may be placed at `position`.
    ///
    /// Occupied cells are rejected. The first card can go anywhere;
    /// afterwards the x-range and y-range over all occupied positions
    /// plus the candidate must both stay within span 3.
    #[must_use]
    pub fn can_put_card(&self, position: GridPosition) -> bool {
        if self.cells.contains_key(&position) {
            return false;
        }
        if self.cells.is_empty() {
            return true;
        }

        let occupied = self.cells.keys().chain(std::iter::once(&position));
        let (mut min_x, mut max_x) = (i32::MAX, i32::MIN);
        let (mut min_y, mut max_y) = (i32::MAX, i32::MIN);
        for p in occupied {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        max_x - min_x + 1 <= MAX_SPAN && max_y - min_y + 1 <= MAX_SPAN
    }

    /// Place a card.
    ///
    /// Placement re-energizes the neighbourhood: the pending set is
    /// reset to exactly the already-occupied positions sharing the new
    /// position's row or column. The new position itself is not
    /// eligible.
    pub fn put_card(&mut self, position: GridPosition, card: Card) -> Result<(), GameError> {
        if !self.can_put_card(position) {
            return Err(GameError::InvalidPlacement(position));
        }

        self.pending_activations.clear();
        for occupied in self.cells.keys() {
            if occupied.x == position.x || occupied.y == position.y {
                self.pending_activations.insert(*occupied);
            }
        }
        self.cells.insert(position, card);
        Ok(())
    }

    /// Check whether a position is currently eligible for activation.
    #[must_use]
    pub fn can_be_activated(&self, position: GridPosition) -> bool {
        self.pending_activations.contains(&position)
    }

    /// Consume a position's activation eligibility for this turn.
    pub fn set_activated(&mut self, position: GridPosition) -> Result<(), GameError> {
        if !self.pending_activations.remove(&position) {
            return Err(GameError::InvalidActivation(position));
        }
        Ok(())
    }

    /// Store the once-per-game activation order.
    ///
    /// The local pattern is translated by the territory's minimum
    /// occupied coordinates, so a 3×3 template designed around the
    /// origin lands on wherever the territory was actually built.
    pub fn set_activation_pattern(
        &mut self,
        local_pattern: &[GridPosition],
    ) -> Result<(), GameError> {
        if !self.is_full() {
            return Err(GameError::GridNotFull);
        }

        let min_x = self.cells.keys().map(|p| p.x).min().expect("grid is full");
        let min_y = self.cells.keys().map(|p| p.y).min().expect("grid is full");
        let offset = GridPosition::new(min_x, min_y);

        self.activation_pattern = Some(local_pattern.iter().map(|p| *p + offset).collect());
        Ok(())
    }

    /// The stored absolute activation order, once chosen.
    #[must_use]
    pub fn activation_pattern(&self) -> Option<&[GridPosition]> {
        self.activation_pattern.as_deref()
    }

    /// End the turn: unconsumed eligibility lapses.
    ///
    /// Placed cards and the stored activation pattern are untouched.
    pub fn end_turn(&mut self) {
        self.pending_activations.clear();
    }
}
