//! End-of-game scoring.
//!
//! A scoring method values the resources pooled across a territory and
//! pays a bonus for every complete set of its required resources. The
//! computation runs at most once; the result is cached and frozen.

use serde::{Deserialize, Serialize};

use crate::core::{resource_counts, GameError, Points, Resource};
use crate::grid::Grid;

/// Point value of a single pooled resource.
///
/// Basic cubes are worth 2, refined products 1.
fn resource_value(resource: Resource) -> i64 {
    if resource.is_basic() {
        2
    } else {
        1
    }
}

/// A one-shot scoring computation over a territory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringMethod {
    required: Vec<Resource>,
    base: Points,
    result: Option<i64>,
}

impl ScoringMethod {
    /// Create a scoring method.
    #[must_use]
    pub fn new(required: Vec<Resource>, base: Points) -> Self {
        Self {
            required,
            base,
            result: None,
        }
    }

    /// The cached result, once computed.
    #[must_use]
    pub fn result(&self) -> Option<i64> {
        self.result
    }

    /// Select this method and compute its score over `grid`.
    ///
    /// Pools the resources of every active card in the territory;
    /// inactive cards score nothing, which is how pollution hurts.
    /// Each pooled resource scores its point value, then every
    /// complete set of the required resources pays the base value once.
    /// Fails with `AlreadyCalculated` on a second call.
    pub fn select_this_method_and_calculate(&mut self, grid: &Grid) -> Result<i64, GameError> {
        if self.result.is_some() {
            return Err(GameError::AlreadyCalculated);
        }

        let mut pool: Vec<Resource> = Vec::new();
        for (_, card) in grid.iter() {
            if card.is_active() {
                pool.extend_from_slice(card.resources());
            }
        }

        let mut total: i64 = pool.iter().copied().map(resource_value).sum();

        if !self.required.is_empty() {
            let pooled = resource_counts(&pool);
            let sets = resource_counts(&self.required)
                .into_iter()
                .map(|(resource, needed)| {
                    pooled.get(&resource).copied().unwrap_or(0) / needed
                })
                .min()
                .unwrap_or(0);
            total += sets as i64 * self.base.0;
        }

        self.result = Some(total);
        Ok(total)
    }

    /// Human-readable state of the method.
    #[must_use]
    pub fn state(&self) -> String {
        match self.result {
            Some(total) => total.to_string(),
            None => "Scoring method wasn't calculated".to_string(),
        }
    }
}
