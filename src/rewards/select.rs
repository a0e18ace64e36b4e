//! The reward-selection micro state machine.
//!
//! Certain effects leave a player owing a one-of-many resource choice.
//! `SelectReward` isolates that interaction from the main turn flow:
//! the game suspends while a reward is `Pending` and resumes once the
//! player locks a choice.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{GameError, GridPosition, PlayerId, Resource};
use crate::grid::Grid;

/// Coordinate range scanned when verifying card ownership.
///
/// Territories are anchored near the origin and span at most 3×3, so
/// every placed card lies within ±2 on both axes.
const SCAN_RANGE: std::ops::RangeInclusive<i32> = -2..=2;

/// Lifecycle of a reward offer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardState {
    /// No pending reward.
    #[default]
    Idle,
    /// Offered, awaiting the player's choice.
    Pending,
    /// One option locked in.
    Selected,
}

/// Tracks which player may choose a reward and from which options.
#[derive(Clone, Debug, Default)]
pub struct SelectReward {
    player: Option<PlayerId>,
    selection: Vec<Resource>,
    state: RewardState,
}

impl SelectReward {
    /// Create an idle reward tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a reward to `player` for an effect on `card`.
    ///
    /// The card must be placed somewhere in the player's territory
    /// (matched by state equality); otherwise fails with
    /// `CardNotOwned`. On success the options are copied and the state
    /// moves to `Pending`.
    pub fn set_reward(
        &mut self,
        player: PlayerId,
        grid: &Grid,
        card: &Card,
        options: &[Resource],
    ) -> Result<(), GameError> {
        let owned = SCAN_RANGE.flat_map(|y| SCAN_RANGE.map(move |x| GridPosition::new(x, y)))
            .any(|position| grid.get_card(position) == Some(card));
        if !owned {
            return Err(GameError::CardNotOwned);
        }

        self.player = Some(player);
        self.selection = options.to_vec();
        self.state = RewardState::Pending;
        Ok(())
    }

    /// Check whether `resource` can currently be selected.
    #[must_use]
    pub fn can_select_reward(&self, resource: Resource) -> bool {
        self.state == RewardState::Pending && self.selection.contains(&resource)
    }

    /// Lock in one of the offered options.
    pub fn select_reward(&mut self, resource: Resource) -> Result<(), GameError> {
        if !self.can_select_reward(resource) {
            return Err(GameError::InvalidSelection);
        }
        self.selection = vec![resource];
        self.state = RewardState::Selected;
        Ok(())
    }

    /// Current state of the reward offer.
    #[must_use]
    pub fn state(&self) -> RewardState {
        self.state
    }

    /// The player holding the pending (or locked) choice.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        self.player
    }

    /// The currently offered options, or the locked choice.
    #[must_use]
    pub fn selection(&self) -> &[Resource] {
        &self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Effect;

    fn grid_with(card: &Card, position: GridPosition) -> Grid {
        let mut grid = Grid::new();
        grid.put_card(position, card.clone()).unwrap();
        grid
    }

    #[test]
    fn test_initial_state_is_idle_and_empty() {
        let reward = SelectReward::new();
        assert_eq!(reward.state(), RewardState::Idle);
        assert_eq!(reward.player(), None);
        assert!(reward.selection().is_empty());
    }

    #[test]
    fn test_set_reward_rejects_cards_outside_the_territory() {
        let mut reward = SelectReward::new();
        let card = Card::new(1);
        let grid = Grid::new();

        assert_eq!(
            reward.set_reward(PlayerId::new(0), &grid, &card, &[Resource::Red]),
            Err(GameError::CardNotOwned)
        );
        assert_eq!(reward.state(), RewardState::Idle);
    }

    #[test]
    fn test_set_reward_stores_options_and_goes_pending() {
        let mut reward = SelectReward::new();
        let card = Card::new(1).with_upper(Effect::production([Resource::Red], 0));
        let grid = grid_with(&card, GridPosition::new(-1, 2));

        reward
            .set_reward(
                PlayerId::new(1),
                &grid,
                &card,
                &[Resource::Yellow, Resource::Red],
            )
            .unwrap();

        assert_eq!(reward.state(), RewardState::Pending);
        assert_eq!(reward.player(), Some(PlayerId::new(1)));
        assert_eq!(reward.selection(), &[Resource::Yellow, Resource::Red]);
    }

    #[test]
    fn test_selection_gates() {
        let mut reward = SelectReward::new();
        assert!(!reward.can_select_reward(Resource::Red));

        let card = Card::new(1);
        let grid = grid_with(&card, GridPosition::new(0, 0));
        reward
            .set_reward(
                PlayerId::new(0),
                &grid,
                &card,
                &[Resource::Yellow, Resource::Red],
            )
            .unwrap();

        assert!(reward.can_select_reward(Resource::Red));
        assert!(!reward.can_select_reward(Resource::Money));
    }

    #[test]
    fn test_select_reward_locks_the_choice() {
        let mut reward = SelectReward::new();
        let card = Card::new(1);
        let grid = grid_with(&card, GridPosition::new(0, 0));
        reward
            .set_reward(
                PlayerId::new(0),
                &grid,
                &card,
                &[Resource::Yellow, Resource::Red],
            )
            .unwrap();

        reward.select_reward(Resource::Red).unwrap();
        assert_eq!(reward.state(), RewardState::Selected);
        assert_eq!(reward.selection(), &[Resource::Red]);

        // Terminal for this reward instance.
        assert_eq!(
            reward.select_reward(Resource::Red),
            Err(GameError::InvalidSelection)
        );
    }
}
