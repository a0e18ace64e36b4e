//! The rotating deck: a 4-slot shop window over hidden and discard
//! stacks.
//!
//! Cards leave the window by being taken or discarded; the window
//! refills from the top of the hidden stack, and the discard stack is
//! reshuffled into the hidden stack the moment the latter runs dry.
//! As long as supply remains, the shop is never starved.

use std::fmt;

use crate::cards::Card;
use crate::core::GameError;

use super::shuffler::Shuffler;

/// Number of visible slots.
const WINDOW: usize = 4;

/// A rotating deck with a fixed-size visible window.
///
/// Freshly refilled cards enter at the front of the window; the card
/// in the last slot is therefore always the oldest one on display,
/// which is the one `remove_last_card` rotates out.
pub struct Pile {
    visible: Vec<Card>,
    hidden: Vec<Card>,
    discarded: Vec<Card>,
    shuffler: Box<dyn Shuffler>,
}

impl Pile {
    /// Build a pile from an initial card pool.
    ///
    /// The window is topped up to 4 immediately; fails with
    /// `DeckExhausted` when the total supply cannot reach 4 cards.
    pub fn new(
        visible: Vec<Card>,
        hidden: Vec<Card>,
        shuffler: Box<dyn Shuffler>,
    ) -> Result<Self, GameError> {
        let mut pile = Self {
            visible,
            hidden,
            discarded: Vec::new(),
            shuffler,
        };
        pile.fill_visible()?;
        Ok(pile)
    }

    /// Peek at a visible slot without removing the card.
    ///
    /// Valid slots are `1..=4`; anything else returns `None`.
    #[must_use]
    pub fn get_card(&self, index: usize) -> Option<&Card> {
        if (1..=WINDOW).contains(&index) {
            self.visible.get(index - 1)
        } else {
            None
        }
    }

    /// Take a card out of the pile.
    ///
    /// Index `0` draws blind from the top of the hidden stack, leaving
    /// the window untouched. Indices `1..=4` remove the card at that
    /// visible slot and refill the window. Any other index fails with
    /// `InvalidIndex`. A failed take leaves the pile unchanged.
    pub fn take_card(&mut self, index: usize) -> Result<Card, GameError> {
        if index == 0 {
            self.fill_visible()?;
            return self.pop_hidden();
        }
        if !(1..=WINDOW).contains(&index) {
            return Err(GameError::InvalidIndex(index));
        }

        self.fill_visible()?;
        if self.hidden.is_empty() && self.discarded.is_empty() {
            // Removing a window card could not be refilled.
            return Err(GameError::DeckExhausted);
        }
        let card = self.visible.remove(index - 1);
        self.fill_visible()?;
        Ok(card)
    }

    /// Rotate the oldest visible card into the discard stack.
    pub fn remove_last_card(&mut self) -> Result<(), GameError> {
        self.fill_visible()?;
        let card = self.visible.pop().expect("window is full after refill");
        self.discarded.push(card);
        self.fill_visible()
    }

    /// The visible window, front (newest) to back (oldest).
    #[must_use]
    pub fn visible_cards(&self) -> &[Card] {
        &self.visible
    }

    /// Number of cards in the hidden stack.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    /// Number of cards in the discard stack.
    #[must_use]
    pub fn discarded_count(&self) -> usize {
        self.discarded.len()
    }

    /// Pop the top of the hidden stack, reshuffling the discard stack
    /// into it first when it has run dry.
    fn pop_hidden(&mut self) -> Result<Card, GameError> {
        if self.hidden.is_empty() {
            if self.discarded.is_empty() {
                return Err(GameError::DeckExhausted);
            }
            let discarded = std::mem::take(&mut self.discarded);
            self.hidden.extend(self.shuffler.shuffle(discarded));
        }
        Ok(self.hidden.pop().expect("hidden stack was restored"))
    }

    /// Top the window up to 4 cards, newest first.
    fn fill_visible(&mut self) -> Result<(), GameError> {
        while self.visible.len() < WINDOW {
            let card = self.pop_hidden()?;
            self.visible.insert(0, card);
        }
        Ok(())
    }
}

impl fmt::Debug for Pile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pile")
            .field("visible", &self.visible.len())
            .field("hidden", &self.hidden.len())
            .field("discarded", &self.discarded.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pile::RandomShuffler;

    /// Identity shuffler: keeps discard order, so refill order is
    /// fully predictable.
    struct NoShuffle;

    impl Shuffler for NoShuffle {
        fn shuffle(&mut self, cards: Vec<Card>) -> Vec<Card> {
            cards
        }
    }

    /// Cards are told apart by capacity in these tests.
    fn card(label: u32) -> Card {
        Card::new(label)
    }

    fn labels(cards: &[Card]) -> Vec<u32> {
        cards.iter().map(Card::pollution_capacity).collect()
    }

    #[test]
    fn test_construction_tops_up_the_window_from_hidden() {
        // visible [v1, v2], hidden [h1, h2, h3] with h3 on top.
        let pile = Pile::new(
            vec![card(11), card(12)],
            vec![card(21), card(22), card(23)],
            Box::new(NoShuffle),
        )
        .unwrap();

        // h3 then h2 are popped and inserted at the front.
        assert_eq!(labels(pile.visible_cards()), vec![22, 23, 11, 12]);
        assert_eq!(pile.hidden_count(), 1);
        assert_eq!(pile.discarded_count(), 0);
    }

    #[test]
    fn test_construction_fails_without_four_cards() {
        let result = Pile::new(vec![card(1)], vec![card(2), card(3)], Box::new(NoShuffle));
        assert!(matches!(result, Err(GameError::DeckExhausted)));
    }

    #[test]
    fn test_get_card_peeks_only_valid_slots() {
        let pile = Pile::new(
            vec![card(1), card(2), card(3), card(4)],
            vec![card(5)],
            Box::new(NoShuffle),
        )
        .unwrap();

        assert_eq!(pile.get_card(1).unwrap().pollution_capacity(), 1);
        assert_eq!(pile.get_card(4).unwrap().pollution_capacity(), 4);
        assert!(pile.get_card(0).is_none());
        assert!(pile.get_card(5).is_none());
    }

    #[test]
    fn test_take_card_removes_slot_and_refills_from_hidden() {
        let mut pile = Pile::new(
            vec![card(1), card(2), card(3), card(4)],
            vec![card(5), card(6)],
            Box::new(NoShuffle),
        )
        .unwrap();

        let taken = pile.take_card(2).unwrap();
        assert_eq!(taken.pollution_capacity(), 2);

        // Slot 2 is gone, the hidden top (6) entered at the front.
        assert_eq!(labels(pile.visible_cards()), vec![6, 1, 3, 4]);
        assert_eq!(pile.hidden_count(), 1);
        assert_eq!(pile.discarded_count(), 0);
    }

    #[test]
    fn test_take_card_zero_draws_blind_from_hidden() {
        let mut pile = Pile::new(
            vec![card(1), card(2), card(3), card(4)],
            vec![card(5), card(6)],
            Box::new(NoShuffle),
        )
        .unwrap();

        let taken = pile.take_card(0).unwrap();
        assert_eq!(taken.pollution_capacity(), 6);
        assert_eq!(labels(pile.visible_cards()), vec![1, 2, 3, 4]);
        assert_eq!(pile.hidden_count(), 1);
    }

    #[test]
    fn test_take_card_rejects_out_of_range_index() {
        let mut pile = Pile::new(
            vec![card(1), card(2), card(3), card(4)],
            vec![card(5)],
            Box::new(NoShuffle),
        )
        .unwrap();

        assert_eq!(pile.take_card(5), Err(GameError::InvalidIndex(5)));
        assert_eq!(labels(pile.visible_cards()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_take_card_fails_atomically_when_supply_cannot_sustain_window() {
        let mut pile = Pile::new(
            vec![card(1), card(2), card(3), card(4)],
            vec![],
            Box::new(NoShuffle),
        )
        .unwrap();

        assert_eq!(pile.take_card(1), Err(GameError::DeckExhausted));
        assert_eq!(labels(pile.visible_cards()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_remove_last_card_discards_the_oldest() {
        let mut pile = Pile::new(
            vec![card(1), card(2), card(3), card(4)],
            vec![card(5), card(6)],
            Box::new(NoShuffle),
        )
        .unwrap();

        pile.remove_last_card().unwrap();
        assert_eq!(labels(pile.visible_cards()), vec![6, 1, 2, 3]);
        assert_eq!(pile.discarded_count(), 1);
        assert_eq!(pile.hidden_count(), 1);
    }

    #[test]
    fn test_reshuffle_receives_discards_in_discard_order() {
        /// Records every deck handed to it.
        struct Recorder(std::rc::Rc<std::cell::RefCell<Vec<Vec<u32>>>>);

        impl Shuffler for Recorder {
            fn shuffle(&mut self, cards: Vec<Card>) -> Vec<Card> {
                self.0.borrow_mut().push(labels(&cards));
                cards
            }
        }

        let calls = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut pile = Pile::new(
            vec![card(1), card(2), card(3), card(4)],
            vec![card(5)],
            Box::new(Recorder(calls.clone())),
        )
        .unwrap();

        // First removal refills from hidden; no reshuffle yet.
        pile.remove_last_card().unwrap();
        assert!(calls.borrow().is_empty());
        assert_eq!(labels(pile.visible_cards()), vec![5, 1, 2, 3]);

        // Second removal drains hidden; the discard stack [4, 3] is
        // reshuffled wholesale, in discard order.
        pile.remove_last_card().unwrap();
        assert_eq!(*calls.borrow(), vec![vec![4, 3]]);
        assert_eq!(pile.discarded_count(), 0);
        assert_eq!(labels(pile.visible_cards()), vec![3, 5, 1, 2]);
        assert_eq!(pile.hidden_count(), 1);
    }

    #[test]
    fn test_window_always_has_four_cards_while_supply_remains() {
        let deck: Vec<Card> = (0..12).map(card).collect();
        let mut pile = Pile::new(
            deck[..4].to_vec(),
            deck[4..].to_vec(),
            Box::new(RandomShuffler::new(42)),
        )
        .unwrap();

        for turn in 0..6 {
            if turn % 2 == 0 {
                pile.take_card(1).unwrap();
            } else {
                pile.remove_last_card().unwrap();
            }
            assert_eq!(pile.visible_cards().len(), 4);
        }
    }
}
