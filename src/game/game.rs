//! The top-level per-turn state machine.
//!
//! `Game` is the sole mutator sequencing every other component: it
//! pulls cards from piles, places them into territories, drives
//! activations through the injected policies, suspends on pending
//! rewards, and walks the end-game selection of activation patterns
//! and scoring methods. Exactly one player's action is legal at any
//! moment; everything else fails atomically.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CardSource, Deck, GameError, GridPosition, PlayerId, PlayerMap, Resource};
use crate::pile::Pile;
use crate::rewards::{RewardState, SelectReward};

use super::actions::{
    ActionProcessor, ActivationRequest, AssistanceProcessor, AssistedProcessor, ResourceMover,
    StandardMover, StandardProcessor,
};
use super::observer::{GameObserver, GameSnapshot, Observer};
use super::player::Player;

/// States of the turn machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for the current player to take a card; they may still
    /// discard one first.
    TakeCardNoCardDiscarded,
    /// One discard spent; only taking a card remains.
    TakeCardCardDiscarded,
    /// A card was placed; the player may chain activations.
    ActivateCard,
    /// Every territory is full; players choose activation patterns.
    SelectActivationPattern,
    /// Patterns chosen; players choose scoring methods.
    SelectScoringMethod,
    /// Game over.
    Finish,
}

/// Builder assembling a game from players, piles and policies.
///
/// Player ids must be dense and 0-based, matching their seating order.
pub struct GameBuilder {
    players: Vec<Player>,
    piles: FxHashMap<Deck, Pile>,
    mover: Box<dyn ResourceMover>,
    processor: Box<dyn ActionProcessor>,
    assistance: Box<dyn AssistanceProcessor>,
    observer: GameObserver,
}

impl GameBuilder {
    /// Start a new builder with the standard policies.
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            piles: FxHashMap::default(),
            mover: Box::new(StandardMover),
            processor: Box::new(StandardProcessor),
            assistance: Box::new(AssistedProcessor),
            observer: GameObserver::new(),
        }
    }

    /// Add a player. Seating order follows insertion order.
    #[must_use]
    pub fn player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    /// Register the pile for a deck tier.
    #[must_use]
    pub fn pile(mut self, deck: Deck, pile: Pile) -> Self {
        self.piles.insert(deck, pile);
        self
    }

    /// Register an observer for a player.
    #[must_use]
    pub fn observer(mut self, player: PlayerId, observer: Box<dyn Observer>) -> Self {
        self.observer.register(player, observer);
        self
    }

    /// Replace the resource mover policy.
    #[must_use]
    pub fn mover(mut self, mover: Box<dyn ResourceMover>) -> Self {
        self.mover = mover;
        self
    }

    /// Replace the unassisted activation policy.
    #[must_use]
    pub fn processor(mut self, processor: Box<dyn ActionProcessor>) -> Self {
        self.processor = processor;
        self
    }

    /// Replace the assisted activation policy.
    #[must_use]
    pub fn assistance(mut self, assistance: Box<dyn AssistanceProcessor>) -> Self {
        self.assistance = assistance;
        self
    }

    /// Build the game.
    ///
    /// Panics on an unplayable configuration: fewer than two players,
    /// non-dense player ids, or a missing pile.
    #[must_use]
    pub fn build(self) -> Game {
        assert!(self.players.len() >= 2, "Must have at least 2 players");
        for (index, player) in self.players.iter().enumerate() {
            assert_eq!(
                player.id().index(),
                index,
                "Player ids must be dense and follow seating order"
            );
        }
        for deck in Deck::ALL {
            assert!(self.piles.contains_key(&deck), "Missing pile for {deck:?}");
        }

        let player_count = self.players.len();
        Game {
            players: self.players,
            piles: self.piles,
            state: TurnState::TakeCardNoCardDiscarded,
            current: 0,
            turn_number: 1,
            rewards: SelectReward::new(),
            reward_position: None,
            patterns_chosen: PlayerMap::with_value(player_count, false),
            scorings_chosen: PlayerMap::with_value(player_count, false),
            mover: self.mover,
            processor: self.processor,
            assistance: self.assistance,
            observer: self.observer,
        }
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The running game.
pub struct Game {
    players: Vec<Player>,
    piles: FxHashMap<Deck, Pile>,
    state: TurnState,
    current: usize,
    turn_number: u32,
    rewards: SelectReward,
    reward_position: Option<GridPosition>,
    patterns_chosen: PlayerMap<bool>,
    scorings_chosen: PlayerMap<bool>,
    mover: Box<dyn ResourceMover>,
    processor: Box<dyn ActionProcessor>,
    assistance: Box<dyn AssistanceProcessor>,
    observer: GameObserver,
}

impl Game {
    /// Start building a game.
    #[must_use]
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    /// Whose action is currently expected.
    #[must_use]
    pub fn on_turn(&self) -> PlayerId {
        self.players[self.current].id()
    }

    /// Current state of the turn machine.
    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Current turn counter, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id() == id)
    }

    /// Look up a pile.
    #[must_use]
    pub fn pile(&self, deck: Deck) -> &Pile {
        &self.piles[&deck]
    }

    /// The reward tracker.
    #[must_use]
    pub fn rewards(&self) -> &SelectReward {
        &self.rewards
    }

    /// Take a card from a pile and place it into the current player's
    /// territory.
    ///
    /// Placement legality is checked before the pile is touched, so a
    /// rejected destination consumes nothing. Success moves the game
    /// to `ActivateCard`.
    pub fn take_card(
        &mut self,
        player: PlayerId,
        source: CardSource,
        destination: GridPosition,
    ) -> Result<(), GameError> {
        self.require_state(
            &[
                TurnState::TakeCardNoCardDiscarded,
                TurnState::TakeCardCardDiscarded,
            ],
            "take_card",
        )?;
        let index = self.require_current(player)?;

        if !self.players[index].grid().can_put_card(destination) {
            return Err(GameError::InvalidPlacement(destination));
        }

        let pile = self
            .piles
            .get_mut(&source.deck)
            .expect("a pile exists for every deck");
        let card = pile.take_card(source.index)?;

        self.players[index]
            .grid_mut()
            .put_card(destination, card)?;
        self.state = TurnState::ActivateCard;

        debug!(%player, deck = ?source.deck, slot = source.index, %destination, "card taken");
        self.broadcast();
        Ok(())
    }

    /// Rotate the oldest visible card of a pile into its discard
    /// stack. Permitted once per turn, before taking a card.
    pub fn discard_last_card_from_deck(
        &mut self,
        player: PlayerId,
        deck: Deck,
    ) -> Result<(), GameError> {
        self.require_state(
            &[TurnState::TakeCardNoCardDiscarded],
            "discard_last_card_from_deck",
        )?;
        self.require_current(player)?;

        self.piles
            .get_mut(&deck)
            .expect("a pile exists for every deck")
            .remove_last_card()?;
        self.state = TurnState::TakeCardCardDiscarded;

        debug!(%player, ?deck, "last visible card discarded");
        self.broadcast();
        Ok(())
    }

    /// Activate an eligible card.
    ///
    /// Requires the position to be pending from this turn's placement.
    /// The request is resolved by the unassisted policy when every
    /// payment and pollution cube stays on the activated card, and by
    /// the assisted policy otherwise. May be chained until the player
    /// ends the turn; an assisted activation may leave a reward
    /// pending.
    pub fn activate_card(
        &mut self,
        player: PlayerId,
        position: GridPosition,
        request: &ActivationRequest,
    ) -> Result<(), GameError> {
        self.require_state(&[TurnState::ActivateCard], "activate_card")?;
        let index = self.require_current(player)?;
        if self.rewards.state() == RewardState::Pending {
            return Err(GameError::IllegalStateTransition("activate_card"));
        }
        if !self.players[index].grid().can_be_activated(position) {
            return Err(GameError::InvalidActivation(position));
        }

        let outcome = if request.is_assisted(position) {
            self.assistance.process(
                self.players[index].grid_mut(),
                position,
                request,
                self.mover.as_ref(),
            )?
        } else {
            self.processor.process(
                self.players[index].grid_mut(),
                position,
                request,
                self.mover.as_ref(),
            )?;
            Default::default()
        };
        self.players[index].grid_mut().set_activated(position)?;

        if let Some(options) = outcome.reward {
            let grid = self.players[index].grid();
            let card = grid.get_card(position).expect("activated card exists");
            self.rewards.set_reward(player, grid, card, &options)?;
            self.reward_position = Some(position);
            debug!(%player, %position, ?options, "reward offered");
        }

        debug!(%player, %position, "card activated");
        self.broadcast();
        Ok(())
    }

    /// Resolve a pending reward.
    ///
    /// The chosen resource is delivered to the card the reward was
    /// raised on; if that card has since gone inactive the reward is
    /// forfeit.
    pub fn select_reward(&mut self, player: PlayerId, resource: Resource) -> Result<(), GameError> {
        if self.rewards.player() != Some(player) {
            return Err(GameError::WrongPlayer(player));
        }
        self.rewards.select_reward(resource)?;

        if let Some(position) = self.reward_position.take() {
            let index = self.index_of(player)?;
            let card = self.players[index]
                .grid_mut()
                .get_card_mut(position)
                .expect("rewarded card exists");
            if card.is_active() {
                card.put_resources(&[resource])?;
            }
        }

        debug!(%player, %resource, "reward selected");
        self.broadcast();
        Ok(())
    }

    /// End the current player's turn.
    ///
    /// Rejected while a reward is pending. Clears the territory's
    /// per-turn eligibility, advances to the next player and bumps the
    /// turn counter on wrap-around. Once every territory holds 9
    /// cards the game moves to activation pattern selection instead of
    /// the next take-card phase.
    pub fn turn_finished(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.require_state(&[TurnState::ActivateCard], "turn_finished")?;
        let index = self.require_current(player)?;
        if self.rewards.state() == RewardState::Pending {
            return Err(GameError::IllegalStateTransition("turn_finished"));
        }

        self.players[index].grid_mut().end_turn();
        self.advance_current();
        if self.current == 0 {
            self.turn_number += 1;
        }

        if self.players.iter().all(|p| p.grid().is_full()) {
            self.state = TurnState::SelectActivationPattern;
        } else {
            self.state = TurnState::TakeCardNoCardDiscarded;
        }

        debug!(%player, turn = self.turn_number, state = ?self.state, "turn finished");
        self.broadcast();
        Ok(())
    }

    /// Apply the current player's chosen activation pattern.
    ///
    /// When the last player has chosen, the game moves on to scoring
    /// method selection.
    pub fn select_activation_pattern(
        &mut self,
        player: PlayerId,
        pattern_index: usize,
    ) -> Result<(), GameError> {
        self.require_state(
            &[TurnState::SelectActivationPattern],
            "select_activation_pattern",
        )?;
        let index = self.require_current(player)?;

        let pattern = self.players[index]
            .activation_pattern(pattern_index)?
            .clone();
        self.players[index]
            .grid_mut()
            .set_activation_pattern(pattern.positions())?;
        self.patterns_chosen[player] = true;
        self.advance_current();

        if self.patterns_chosen.iter().all(|(_, chosen)| *chosen) {
            self.state = TurnState::SelectScoringMethod;
        }

        debug!(%player, pattern = pattern_index, state = ?self.state, "activation pattern chosen");
        self.broadcast();
        Ok(())
    }

    /// Compute the current player's chosen scoring method.
    ///
    /// When the last player has chosen, the game is finished.
    pub fn select_scoring(
        &mut self,
        player: PlayerId,
        method_index: usize,
    ) -> Result<(), GameError> {
        self.require_state(&[TurnState::SelectScoringMethod], "select_scoring")?;
        let index = self.require_current(player)?;

        let total = self.players[index].calculate_scoring(method_index)?;
        self.scorings_chosen[player] = true;
        self.advance_current();

        if self.scorings_chosen.iter().all(|(_, chosen)| *chosen) {
            self.state = TurnState::Finish;
        }

        debug!(%player, method = method_index, total, state = ?self.state, "scoring method chosen");
        self.broadcast();
        Ok(())
    }

    fn require_state(
        &self,
        expected: &[TurnState],
        operation: &'static str,
    ) -> Result<(), GameError> {
        if expected.contains(&self.state) {
            Ok(())
        } else {
            Err(GameError::IllegalStateTransition(operation))
        }
    }

    fn require_current(&self, player: PlayerId) -> Result<usize, GameError> {
        if self.on_turn() == player {
            Ok(self.current)
        } else {
            Err(GameError::WrongPlayer(player))
        }
    }

    fn index_of(&self, player: PlayerId) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| p.id() == player)
            .ok_or(GameError::WrongPlayer(player))
    }

    fn advance_current(&mut self) {
        self.current = (self.current + 1) % self.players.len();
    }

    fn broadcast(&mut self) {
        let card_counts: Vec<(PlayerId, usize)> = self
            .players
            .iter()
            .map(|player| (player.id(), player.grid().card_count()))
            .collect();

        let mut snapshots = FxHashMap::default();
        for player in &self.players {
            snapshots.insert(
                player.id(),
                GameSnapshot {
                    player: player.id(),
                    turn_number: self.turn_number,
                    state: self.state,
                    on_turn: self.players[self.current].id(),
                    card_counts: card_counts.clone(),
                },
            );
        }
        self.observer.notify_all(&snapshots);
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("turn_number", &self.turn_number)
            .field("on_turn", &self.on_turn())
            .field("players", &self.players.len())
            .finish()
    }
}
