//! Players: one territory plus the end-game options they may pick.

use crate::core::{GameError, PlayerId};
use crate::grid::{ActivationPattern, Grid};
use crate::scoring::ScoringMethod;

/// A participant in the game.
///
/// Each player owns exactly one territory, a set of activation pattern
/// templates and a set of candidate scoring methods. The options are
/// fixed once the game starts; the game only reads them.
#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    grid: Grid,
    activation_patterns: Vec<ActivationPattern>,
    scoring_methods: Vec<ScoringMethod>,
}

impl Player {
    /// Create a player.
    #[must_use]
    pub fn new(
        id: PlayerId,
        grid: Grid,
        activation_patterns: Vec<ActivationPattern>,
        scoring_methods: Vec<ScoringMethod>,
    ) -> Self {
        Self {
            id,
            grid,
            activation_patterns,
            scoring_methods,
        }
    }

    /// The player's id.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// The player's territory.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The player's territory, mutably.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// The player's activation pattern options.
    #[must_use]
    pub fn activation_patterns(&self) -> &[ActivationPattern] {
        &self.activation_patterns
    }

    /// The player's scoring method candidates.
    #[must_use]
    pub fn scoring_methods(&self) -> &[ScoringMethod] {
        &self.scoring_methods
    }

    /// Look up an activation pattern option.
    pub fn activation_pattern(&self, index: usize) -> Result<&ActivationPattern, GameError> {
        self.activation_patterns
            .get(index)
            .ok_or(GameError::InvalidIndex(index))
    }

    /// Select and compute the scoring method at `index` over the
    /// player's own territory.
    pub fn calculate_scoring(&mut self, index: usize) -> Result<i64, GameError> {
        let method = self
            .scoring_methods
            .get_mut(index)
            .ok_or(GameError::InvalidIndex(index))?;
        method.select_this_method_and_calculate(&self.grid)
    }
}
