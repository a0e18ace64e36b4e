//! Card state: resources, pollution, hosted effects.
//!
//! A card is active while its pollution is strictly below its capacity.
//! Everything else is gated on activity: resources may only be added or
//! removed while the card is active, and an inactive card refuses every
//! effect activation. Once pollution reaches capacity the card is dead
//! for the rest of the game.

use serde::{Deserialize, Serialize};

use crate::core::{is_submultiset, remove_multiset, GameError, Resource};
use crate::effects::{Effect, EffectSlot};

/// A placed or drawable game card.
///
/// Cards have no identity beyond their state; two cards with the same
/// capacity, pollution, resources and effects compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pollution_capacity: u32,
    pollution: u32,
    resources: Vec<Resource>,
    upper_effect: Option<Effect>,
    lower_effect: Option<Effect>,
}

impl Card {
    /// Create a card with the given pollution capacity and no effects.
    #[must_use]
    pub fn new(pollution_capacity: u32) -> Self {
        Self {
            pollution_capacity,
            pollution: 0,
            resources: Vec::new(),
            upper_effect: None,
            lower_effect: None,
        }
    }

    /// Attach the upper effect.
    #[must_use]
    pub fn with_upper(mut self, effect: Effect) -> Self {
        self.upper_effect = Some(effect);
        self
    }

    /// Attach the lower effect.
    #[must_use]
    pub fn with_lower(mut self, effect: Effect) -> Self {
        self.lower_effect = Some(effect);
        self
    }

    /// Pollution currently on the card.
    #[must_use]
    pub fn pollution(&self) -> u32 {
        self.pollution
    }

    /// Maximum pollution the card can absorb before going inactive.
    #[must_use]
    pub fn pollution_capacity(&self) -> u32 {
        self.pollution_capacity
    }

    /// Resources currently stored on the card.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Get the effect in a slot, if any.
    #[must_use]
    pub fn effect(&self, slot: EffectSlot) -> Option<&Effect> {
        match slot {
            EffectSlot::Upper => self.upper_effect.as_ref(),
            EffectSlot::Lower => self.lower_effect.as_ref(),
        }
    }

    /// A card is active while pollution is strictly below capacity.
    ///
    /// A card with zero capacity is never active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.pollution < self.pollution_capacity
    }

    /// Check whether `amount` pollution fits on the card.
    #[must_use]
    pub fn can_place_pollution(&self, amount: u32) -> bool {
        self.is_active() && amount <= self.pollution_capacity - self.pollution
    }

    /// Place pollution on the card.
    ///
    /// A zero amount is a no-op, even on an inactive card.
    pub fn place_pollution(&mut self, amount: u32) -> Result<(), GameError> {
        if amount == 0 {
            return Ok(());
        }
        if !self.can_place_pollution(amount) {
            return Err(GameError::PollutionOverflow);
        }
        self.pollution += amount;
        Ok(())
    }

    /// Check whether resources may be added.
    #[must_use]
    pub fn can_put_resources(&self, _resources: &[Resource]) -> bool {
        self.is_active()
    }

    /// Add resources to the card.
    pub fn put_resources(&mut self, resources: &[Resource]) -> Result<(), GameError> {
        if !self.can_put_resources(resources) {
            return Err(GameError::InactiveCard);
        }
        self.resources.extend_from_slice(resources);
        Ok(())
    }

    /// Check whether the card can pay `resources` from its own stock.
    #[must_use]
    pub fn can_get_resources(&self, resources: &[Resource]) -> bool {
        self.is_active() && is_submultiset(resources, &self.resources)
    }

    /// Remove resources from the card, multiset-exactly.
    ///
    /// The remaining resources keep their relative order.
    pub fn get_resources(&mut self, resources: &[Resource]) -> Result<(), GameError> {
        if !self.can_get_resources(resources) {
            return Err(GameError::InsufficientResources);
        }
        self.resources = remove_multiset(&self.resources, resources)
            .ok_or(GameError::InsufficientResources)?;
        Ok(())
    }

    /// Check an activation triple against the upper effect.
    ///
    /// False when the card is inactive, the slot is empty, the card
    /// cannot pay the input from its own resources, or the pollution
    /// would not fit; otherwise the effect has the final word.
    #[must_use]
    pub fn check(&self, input: &[Resource], output: &[Resource], pollution: u32) -> bool {
        self.check_slot(EffectSlot::Upper, input, output, pollution)
    }

    /// Check an activation triple against the lower effect.
    #[must_use]
    pub fn check_lower(&self, input: &[Resource], output: &[Resource], pollution: u32) -> bool {
        self.check_slot(EffectSlot::Lower, input, output, pollution)
    }

    /// Check an activation triple against the effect in `slot`.
    #[must_use]
    pub fn check_slot(
        &self,
        slot: EffectSlot,
        input: &[Resource],
        output: &[Resource],
        pollution: u32,
    ) -> bool {
        if !self.is_active() {
            return false;
        }
        let Some(effect) = self.effect(slot) else {
            return false;
        };
        if !self.can_get_resources(input) {
            return false;
        }
        if !self.can_place_pollution(pollution) {
            return false;
        }
        effect.check(input, output, pollution)
    }

    /// Check whether either hosted effect supports assisted payment.
    #[must_use]
    pub fn has_assistance(&self) -> bool {
        self.upper_effect
            .as_ref()
            .map_or(false, Effect::has_assistance)
            || self
                .lower_effect
                .as_ref()
                .map_or(false, Effect::has_assistance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn producer() -> Card {
        Card::new(1).with_upper(Effect::production([Resource::Red], 0))
    }

    #[test]
    fn test_activity_follows_pollution() {
        let mut card = Card::new(2);
        assert!(card.is_active());

        card.place_pollution(1).unwrap();
        assert!(card.is_active());

        card.place_pollution(1).unwrap();
        assert!(!card.is_active());
    }

    #[test]
    fn test_zero_capacity_card_is_never_active() {
        let card = Card::new(0);
        assert!(!card.is_active());
        assert!(!card.can_place_pollution(1));
        assert!(!card.can_put_resources(&[Resource::Red]));
    }

    #[test]
    fn test_pollution_never_exceeds_capacity() {
        let mut card = Card::new(2);
        assert!(!card.can_place_pollution(3));
        assert_eq!(card.place_pollution(3), Err(GameError::PollutionOverflow));
        assert_eq!(card.pollution(), 0);

        card.place_pollution(2).unwrap();
        assert_eq!(card.pollution(), 2);
        assert_eq!(card.place_pollution(1), Err(GameError::PollutionOverflow));
    }

    #[test]
    fn test_zero_pollution_is_a_noop_even_when_inactive() {
        let mut card = Card::new(1);
        card.place_pollution(1).unwrap();
        assert!(!card.is_active());
        assert_eq!(card.place_pollution(0), Ok(()));
        assert_eq!(card.pollution(), 1);
    }

    #[test]
    fn test_inactive_card_refuses_resources() {
        let mut card = Card::new(1);
        card.put_resources(&[Resource::Red]).unwrap();
        card.place_pollution(1).unwrap();

        assert_eq!(
            card.put_resources(&[Resource::Green]),
            Err(GameError::InactiveCard)
        );
        assert!(!card.can_get_resources(&[Resource::Red]));
        assert_eq!(
            card.get_resources(&[Resource::Red]),
            Err(GameError::InsufficientResources)
        );
    }

    #[test]
    fn test_get_resources_is_multiset_exact() {
        let mut card = Card::new(1);
        card.put_resources(&[
            Resource::Red,
            Resource::Green,
            Resource::Red,
            Resource::Money,
        ])
        .unwrap();

        card.get_resources(&[Resource::Red]).unwrap();
        assert_eq!(
            card.resources(),
            &[Resource::Green, Resource::Red, Resource::Money]
        );

        assert_eq!(
            card.get_resources(&[Resource::Red, Resource::Red]),
            Err(GameError::InsufficientResources)
        );
        assert_eq!(
            card.resources(),
            &[Resource::Green, Resource::Red, Resource::Money]
        );
    }

    #[test]
    fn test_check_requires_effect_presence() {
        let card = producer();
        assert!(card.check(&[], &[Resource::Red], 0));
        assert!(!card.check_lower(&[], &[Resource::Red], 0));
    }

    #[test]
    fn test_check_requires_payable_input() {
        let mut card =
            Card::new(2).with_upper(Effect::transformation([Resource::Red], [Resource::Money], 0));
        assert!(!card.check(&[Resource::Red], &[Resource::Money], 0));

        card.put_resources(&[Resource::Red]).unwrap();
        assert!(card.check(&[Resource::Red], &[Resource::Money], 0));
    }

    #[test]
    fn test_check_requires_absorbable_pollution() {
        let mut card = Card::new(1).with_upper(Effect::production([Resource::Goods], 1));
        assert!(card.check(&[], &[Resource::Goods], 1));

        card.place_pollution(1).unwrap();
        assert!(!card.check(&[], &[Resource::Goods], 1));
    }

    #[test]
    fn test_inactive_card_fails_every_check() {
        let mut card = producer();
        card.place_pollution(1).unwrap();
        assert!(!card.check(&[], &[Resource::Red], 0));
    }

    #[test]
    fn test_has_assistance_combines_both_slots() {
        let card = producer();
        assert!(!card.has_assistance());

        let card = producer()
            .with_lower(Effect::transformation([Resource::Red], [Resource::Goods], 1));
        assert!(card.has_assistance());
    }
}
