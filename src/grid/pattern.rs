//! Activation pattern templates.

use serde::{Deserialize, Serialize};

use crate::core::GridPosition;

/// A grid-relative activation template a player may choose at game end.
///
/// Positions are local to a 3×3 template anchored at the origin; the
/// grid translates them onto the territory's actual footprint when the
/// pattern is applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationPattern {
    positions: Vec<GridPosition>,
}

impl ActivationPattern {
    /// Create a pattern from local positions.
    #[must_use]
    pub fn new(positions: Vec<GridPosition>) -> Self {
        Self { positions }
    }

    /// The local positions, in activation order.
    #[must_use]
    pub fn positions(&self) -> &[GridPosition] {
        &self.positions
    }
}
