//! Effect definitions.
//!
//! Effects are immutable rule objects attached to cards at creation.
//! An effect never mutates anything itself: it is a pure predicate over
//! a proposed `(input, output, pollution)` triple. The card decides
//! whether it can pay; the effect decides whether the exchange is one
//! it offers.

use serde::{Deserialize, Serialize};

use crate::core::{same_multiset, Resource, ResourceList};

/// Which of a card's two effect slots an activation addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectSlot {
    Upper,
    Lower,
}

/// A resource-conversion contract.
///
/// ## Variants
///
/// - `Production`: output from nothing, at a fixed pollution price.
/// - `Transformation`: a fixed input multiset converted into a fixed
///   output multiset, at a fixed pollution price.
/// - `Alternative`: a choice between two sub-effects; a triple is legal
///   if either branch accepts it.
///
/// New effect shapes slot in as further variants without touching
/// `Card` or `Grid`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Unconditional output. `check` requires an empty input.
    Production {
        output: ResourceList,
        pollution: u32,
    },

    /// Fixed input converted into fixed output.
    Transformation {
        input: ResourceList,
        output: ResourceList,
        pollution: u32,
    },

    /// Either of two sub-effects.
    Alternative(Box<Effect>, Box<Effect>),
}

impl Effect {
    /// Create a production effect.
    #[must_use]
    pub fn production(output: impl IntoIterator<Item = Resource>, pollution: u32) -> Self {
        Effect::Production {
            output: output.into_iter().collect(),
            pollution,
        }
    }

    /// Create a transformation effect.
    #[must_use]
    pub fn transformation(
        input: impl IntoIterator<Item = Resource>,
        output: impl IntoIterator<Item = Resource>,
        pollution: u32,
    ) -> Self {
        Effect::Transformation {
            input: input.into_iter().collect(),
            output: output.into_iter().collect(),
            pollution,
        }
    }

    /// Create an alternative between two effects.
    #[must_use]
    pub fn alternative(first: Effect, second: Effect) -> Self {
        Effect::Alternative(Box::new(first), Box::new(second))
    }

    /// Check whether this effect offers the proposed exchange.
    ///
    /// Input and output are compared as multisets and must match the
    /// declared lists exactly; the pollution price must match exactly.
    #[must_use]
    pub fn check(&self, input: &[Resource], output: &[Resource], pollution: u32) -> bool {
        match self {
            Effect::Production {
                output: declared,
                pollution: price,
            } => input.is_empty() && same_multiset(output, declared) && pollution == *price,
            Effect::Transformation {
                input: wanted,
                output: declared,
                pollution: price,
            } => {
                same_multiset(input, wanted)
                    && same_multiset(output, declared)
                    && pollution == *price
            }
            Effect::Alternative(first, second) => {
                first.check(input, output, pollution) || second.check(input, output, pollution)
            }
        }
    }

    /// Check whether the effect can be satisfied with assisted
    /// resources, i.e. inputs paid by cards other than its host.
    ///
    /// Productions take no input, so there is nothing to assist with;
    /// transformations accept external payment for their input.
    #[must_use]
    pub fn has_assistance(&self) -> bool {
        match self {
            Effect::Production { .. } => false,
            Effect::Transformation { input, .. } => !input.is_empty(),
            Effect::Alternative(first, second) => first.has_assistance() || second.has_assistance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_requires_empty_input() {
        let effect = Effect::production([Resource::Red, Resource::Red], 0);

        assert!(effect.check(&[], &[Resource::Red, Resource::Red], 0));
        assert!(!effect.check(&[Resource::Money], &[Resource::Red, Resource::Red], 0));
    }

    #[test]
    fn test_production_matches_output_and_pollution_exactly() {
        let effect = Effect::production([Resource::Goods], 1);

        assert!(effect.check(&[], &[Resource::Goods], 1));
        assert!(!effect.check(&[], &[Resource::Goods], 0));
        assert!(!effect.check(&[], &[Resource::Goods, Resource::Goods], 1));
        assert!(!effect.check(&[], &[], 1));
    }

    #[test]
    fn test_transformation_matches_both_multisets() {
        let effect =
            Effect::transformation([Resource::Red, Resource::Green], [Resource::Goods], 1);

        // Input order is irrelevant, the multiset is what counts.
        assert!(effect.check(&[Resource::Green, Resource::Red], &[Resource::Goods], 1));
        assert!(!effect.check(&[Resource::Red], &[Resource::Goods], 1));
        assert!(!effect.check(&[Resource::Red, Resource::Green], &[Resource::Food], 1));
        assert!(!effect.check(&[Resource::Red, Resource::Green], &[Resource::Goods], 2));
    }

    #[test]
    fn test_alternative_accepts_either_branch() {
        let effect = Effect::alternative(
            Effect::production([Resource::Red], 0),
            Effect::transformation([Resource::Red], [Resource::Money], 1),
        );

        assert!(effect.check(&[], &[Resource::Red], 0));
        assert!(effect.check(&[Resource::Red], &[Resource::Money], 1));
        assert!(!effect.check(&[Resource::Red], &[Resource::Money], 0));
    }

    #[test]
    fn test_assistance_capability() {
        assert!(!Effect::production([Resource::Red], 0).has_assistance());
        assert!(Effect::transformation([Resource::Red], [Resource::Money], 0).has_assistance());

        let alternative = Effect::alternative(
            Effect::production([Resource::Red], 0),
            Effect::transformation([Resource::Red], [Resource::Money], 1),
        );
        assert!(alternative.has_assistance());

        let productions = Effect::alternative(
            Effect::production([Resource::Red], 0),
            Effect::production([Resource::Green], 0),
        );
        assert!(!productions.has_assistance());
    }

    #[test]
    fn test_serialization_round_trip() {
        let effect = Effect::alternative(
            Effect::production([Resource::Yellow], 0),
            Effect::transformation([Resource::Yellow; 3], [Resource::Construction], 2),
        );
        let json = serde_json::to_string(&effect).unwrap();
        let back: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, back);
    }
}
