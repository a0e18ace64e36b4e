//! Activation requests and the injected resolution policies.
//!
//! The game itself only sequences turns; what an activation *does* is
//! decided by three capability objects injected at construction:
//!
//! - `ResourceMover` delivers produced resources onto cards,
//! - `ActionProcessor` resolves an unassisted activation,
//! - `AssistanceProcessor` resolves an activation paid with resources
//!   pooled from other cards.
//!
//! Standard implementations are provided and used by default; tests
//! substitute their own to exercise the state machine in isolation.
//!
//! Every policy validates the complete request before mutating
//! anything, so a rejected activation leaves the territory untouched.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{GameError, GridPosition, Resource};
use crate::effects::EffectSlot;
use crate::grid::Grid;

/// A player's proposal for activating a card.
///
/// Inputs name the card each payment comes from, outputs name the card
/// each product lands on, and pollution placements name where the
/// effect's pollution cubes go.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationRequest {
    pub slot: EffectSlot,
    pub inputs: Vec<(Resource, GridPosition)>,
    pub outputs: Vec<(Resource, GridPosition)>,
    pub pollution: Vec<(GridPosition, u32)>,
}

impl ActivationRequest {
    /// A request addressing the upper effect.
    #[must_use]
    pub fn upper() -> Self {
        Self::for_slot(EffectSlot::Upper)
    }

    /// A request addressing the lower effect.
    #[must_use]
    pub fn lower() -> Self {
        Self::for_slot(EffectSlot::Lower)
    }

    fn for_slot(slot: EffectSlot) -> Self {
        Self {
            slot,
            inputs: Vec::new(),
            outputs: Vec::new(),
            pollution: Vec::new(),
        }
    }

    /// Add an input payment drawn from the card at `source`.
    #[must_use]
    pub fn paying(mut self, resource: Resource, source: GridPosition) -> Self {
        self.inputs.push((resource, source));
        self
    }

    /// Add an output delivered to the card at `target`.
    #[must_use]
    pub fn producing(mut self, resource: Resource, target: GridPosition) -> Self {
        self.outputs.push((resource, target));
        self
    }

    /// Add a pollution placement on the card at `target`.
    #[must_use]
    pub fn polluting(mut self, target: GridPosition, amount: u32) -> Self {
        self.pollution.push((target, amount));
        self
    }

    /// The input resources, irrespective of source.
    #[must_use]
    pub fn input_resources(&self) -> Vec<Resource> {
        self.inputs.iter().map(|(resource, _)| *resource).collect()
    }

    /// The output resources, irrespective of target.
    #[must_use]
    pub fn output_resources(&self) -> Vec<Resource> {
        self.outputs.iter().map(|(resource, _)| *resource).collect()
    }

    /// Total pollution across all placements.
    #[must_use]
    pub fn pollution_total(&self) -> u32 {
        self.pollution.iter().map(|(_, amount)| *amount).sum()
    }

    /// A request is assisted when any payment or pollution cube
    /// touches a card other than the activated one.
    #[must_use]
    pub fn is_assisted(&self, activated: GridPosition) -> bool {
        self.inputs.iter().any(|(_, source)| *source != activated)
            || self.pollution.iter().any(|(target, _)| *target != activated)
    }
}

/// Delivers produced resources onto cards.
pub trait ResourceMover {
    /// Check that every output target exists and accepts resources.
    fn can_deliver(
        &self,
        grid: &Grid,
        outputs: &[(Resource, GridPosition)],
    ) -> Result<(), GameError>;

    /// Deliver the outputs. Callers validate with `can_deliver` first.
    fn deliver(
        &self,
        grid: &mut Grid,
        outputs: &[(Resource, GridPosition)],
    ) -> Result<(), GameError>;
}

/// Resolves an unassisted activation.
pub trait ActionProcessor {
    fn process(
        &self,
        grid: &mut Grid,
        position: GridPosition,
        request: &ActivationRequest,
        mover: &dyn ResourceMover,
    ) -> Result<(), GameError>;
}

/// Outcome of an assisted activation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivationOutcome {
    /// Resource options to offer the player as a reward, if any.
    pub reward: Option<Vec<Resource>>,
}

/// Resolves an activation paid with pooled resources.
pub trait AssistanceProcessor {
    fn process(
        &self,
        grid: &mut Grid,
        position: GridPosition,
        request: &ActivationRequest,
        mover: &dyn ResourceMover,
    ) -> Result<ActivationOutcome, GameError>;
}

/// Default mover: outputs land on named active cards.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardMover;

impl ResourceMover for StandardMover {
    fn can_deliver(
        &self,
        grid: &Grid,
        outputs: &[(Resource, GridPosition)],
    ) -> Result<(), GameError> {
        for (resource, target) in outputs {
            let card = grid
                .get_card(*target)
                .ok_or(GameError::InvalidPlacement(*target))?;
            if !card.can_put_resources(&[*resource]) {
                return Err(GameError::InactiveCard);
            }
        }
        Ok(())
    }

    fn deliver(
        &self,
        grid: &mut Grid,
        outputs: &[(Resource, GridPosition)],
    ) -> Result<(), GameError> {
        for (resource, target) in outputs {
            grid.get_card_mut(*target)
                .ok_or(GameError::InvalidPlacement(*target))?
                .put_resources(&[*resource])?;
        }
        Ok(())
    }
}

/// Default unassisted processor.
///
/// Every payment comes from the activated card and every pollution
/// cube lands on it; legality is the card's own `check`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardProcessor;

impl ActionProcessor for StandardProcessor {
    fn process(
        &self,
        grid: &mut Grid,
        position: GridPosition,
        request: &ActivationRequest,
        mover: &dyn ResourceMover,
    ) -> Result<(), GameError> {
        if request.is_assisted(position) {
            return Err(GameError::EffectRejected);
        }

        let inputs = request.input_resources();
        let outputs = request.output_resources();
        let pollution = request.pollution_total();

        let card = grid
            .get_card(position)
            .ok_or(GameError::InvalidActivation(position))?;
        if !card.check_slot(request.slot, &inputs, &outputs, pollution) {
            return Err(GameError::EffectRejected);
        }
        mover.can_deliver(grid, &request.outputs)?;

        // Validated above; pay, deliver, then pollute. Outputs are
        // delivered before pollution so a capacity-filling activation
        // still completes its production.
        grid.get_card_mut(position)
            .expect("activated card exists")
            .get_resources(&inputs)?;
        mover.deliver(grid, &request.outputs)?;
        grid.get_card_mut(position)
            .expect("activated card exists")
            .place_pollution(pollution)
    }
}

/// Default assisted processor.
///
/// Payments may be pooled from any active cards of the territory and
/// pollution distributed across named cards; legality falls to the
/// effect itself since the activated card need not pay alone. The
/// externally paid resource kinds come back as a reward offer.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssistedProcessor;

impl AssistanceProcessor for AssistedProcessor {
    fn process(
        &self,
        grid: &mut Grid,
        position: GridPosition,
        request: &ActivationRequest,
        mover: &dyn ResourceMover,
    ) -> Result<ActivationOutcome, GameError> {
        let card = grid
            .get_card(position)
            .ok_or(GameError::InvalidActivation(position))?;
        if !card.is_active() {
            return Err(GameError::InactiveCard);
        }
        if !card.has_assistance() {
            return Err(GameError::EffectRejected);
        }
        let effect = card.effect(request.slot).ok_or(GameError::EffectRejected)?;

        let inputs = request.input_resources();
        let outputs = request.output_resources();
        let pollution_total = request.pollution_total();
        if !effect.check(&inputs, &outputs, pollution_total) {
            return Err(GameError::EffectRejected);
        }

        // Group payments by source and pollution by target so that
        // split placements on one card are validated as a whole.
        let mut payments: FxHashMap<GridPosition, Vec<Resource>> = FxHashMap::default();
        for (resource, source) in &request.inputs {
            payments.entry(*source).or_default().push(*resource);
        }
        let mut cubes: FxHashMap<GridPosition, u32> = FxHashMap::default();
        for (target, amount) in &request.pollution {
            *cubes.entry(*target).or_insert(0) += amount;
        }

        for (source, share) in &payments {
            let payer = grid
                .get_card(*source)
                .ok_or(GameError::InsufficientResources)?;
            if !payer.can_get_resources(share) {
                return Err(GameError::InsufficientResources);
            }
        }
        for (target, amount) in &cubes {
            let host = grid
                .get_card(*target)
                .ok_or(GameError::PollutionOverflow)?;
            if *amount > 0 && !host.can_place_pollution(*amount) {
                return Err(GameError::PollutionOverflow);
            }
        }
        mover.can_deliver(grid, &request.outputs)?;

        for (source, share) in &payments {
            grid.get_card_mut(*source)
                .expect("payer was validated")
                .get_resources(share)?;
        }
        mover.deliver(grid, &request.outputs)?;
        for (target, amount) in &cubes {
            grid.get_card_mut(*target)
                .expect("pollution host was validated")
                .place_pollution(*amount)?;
        }

        let mut offered: Vec<Resource> = Vec::new();
        for (resource, source) in &request.inputs {
            if *source != position && !offered.contains(resource) {
                offered.push(*resource);
            }
        }
        Ok(ActivationOutcome {
            reward: (!offered.is_empty()).then_some(offered),
        })
    }
}
