//! Rule-violation errors.
//!
//! Every failure in the engine is a local, synchronous, non-retryable
//! rule violation: the failing operation leaves the game in its prior
//! state and reports the specific condition. The caller is expected to
//! re-prompt for a corrected action; there is no recovery logic here.

use thiserror::Error;

use super::player::PlayerId;
use super::types::GridPosition;

/// The full error taxonomy of the rules engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Placing a card would break the 3×3 territory or hit an occupied
    /// cell.
    #[error("cannot place a card at {0}")]
    InvalidPlacement(GridPosition),

    /// Activating a position that is not currently eligible, or twice
    /// in the same turn.
    #[error("position {0} is not eligible for activation")]
    InvalidActivation(GridPosition),

    /// An activation pattern was set before the territory held 9 cards.
    #[error("the activation pattern requires a full territory")]
    GridNotFull,

    /// Pollution placement exceeding a card's remaining capacity.
    #[error("pollution exceeds the card's capacity")]
    PollutionOverflow,

    /// A card cannot pay the requested resources.
    #[error("the card cannot pay the requested resources")]
    InsufficientResources,

    /// Resource mutation attempted on a polluted-out card.
    #[error("the card is inactive")]
    InactiveCard,

    /// The card's effect refuses the proposed activation triple.
    #[error("the effect rejects the proposed activation")]
    EffectRejected,

    /// Pile or option access outside the valid range.
    #[error("no card slot at index {0}")]
    InvalidIndex(usize),

    /// Both the hidden and the discard stack of a pile are empty.
    #[error("the deck is exhausted")]
    DeckExhausted,

    /// A scoring method may be calculated at most once.
    #[error("the scoring method was already calculated")]
    AlreadyCalculated,

    /// A reward was offered on a card outside the player's territory.
    #[error("the card does not belong to the player's territory")]
    CardNotOwned,

    /// Selecting a reward that is not currently offered.
    #[error("the reward selection is not available")]
    InvalidSelection,

    /// An operation invoked in a game state that does not permit it.
    #[error("{0} is not legal in the current game state")]
    IllegalStateTransition(&'static str),

    /// An operation invoked by a player who is not on turn.
    #[error("it is not {0}'s turn")]
    WrongPlayer(PlayerId),
}
