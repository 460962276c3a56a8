//! The fruit plant entity.
//!
//! [`FruitPlant`] ties the tick gate, the growth/drop policy and the harvest
//! transaction to one entity's state and random source. Handlers never apply
//! their own effects: the host applies them and hands `SetResource` back via
//! [`FruitPlant::commit`].

use grove_common::EntityId;
use tracing::{debug, trace};

use crate::config::PlantConfig;
use crate::effects::{Effect, EffectQueue, Outcome};
use crate::harvest::{self, NarrationStyle};
use crate::policy;
use crate::random::RandomSource;
use crate::state::PlantState;
use crate::ticks::{TickEvent, TickGate, TickSchedule};

/// A renewable-resource-bearing world entity.
#[derive(Debug, Clone)]
pub struct FruitPlant<R = fastrand::Rng> {
    id: EntityId,
    state: PlantState,
    schedule: TickSchedule,
    narration: NarrationStyle,
    rng: R,
}

impl FruitPlant<fastrand::Rng> {
    /// Create a plant with a seeded random source.
    #[must_use]
    pub fn seeded(id: EntityId, config: &PlantConfig, created_at: f64, seed: u64) -> Self {
        Self::new(id, config, created_at, fastrand::Rng::with_seed(seed))
    }
}

impl<R: RandomSource> FruitPlant<R> {
    /// Create a plant and arm its tick schedule at `created_at`.
    pub fn new(id: EntityId, config: &PlantConfig, created_at: f64, mut rng: R) -> Self {
        let schedule = TickSchedule::fruit_plant(created_at, &mut rng);
        Self {
            id,
            state: config.to_state(),
            schedule,
            narration: config.narration,
            rng,
        }
    }

    /// Handle a tick event.
    ///
    /// Returns an ignored outcome when the gate rejects the event; otherwise
    /// runs the drop and growth steps against the current state.
    pub fn tick(&mut self, event: &TickEvent) -> Outcome {
        if self.schedule.evaluate(event, &mut self.rng) == TickGate::NotDue {
            trace!(plant = %self.id, time = event.time, "tick not due");
            return Outcome::ignored();
        }

        let mut effects = EffectQueue::new();
        policy::evaluate(&self.state, &mut self.rng, &mut effects);
        debug!(
            plant = %self.id,
            time = event.time,
            next_due = self.schedule.next_due(),
            fruits = self.state.fruit_count,
            effects = effects.len(),
            "tick"
        );
        Outcome::blocked(effects)
    }

    /// Handle a harvest request from `requester`.
    pub fn harvest(&self, requester: EntityId) -> Outcome {
        harvest::harvest(&self.state, requester, self.narration)
    }

    /// Apply an effect the host has committed.
    ///
    /// Only `SetResource` changes the plant; returns whether it did.
    pub fn commit(&mut self, effect: &Effect) -> bool {
        match effect {
            Effect::SetResource { count } => {
                let stored = self.state.set_fruit_count(*count);
                trace!(plant = %self.id, requested = count, stored, "fruit count committed");
                true
            },
            Effect::SpawnEntity { .. } | Effect::Narrate { .. } => false,
        }
    }

    /// Entity ID of this plant.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Current resource state.
    #[must_use]
    pub fn state(&self) -> &PlantState {
        &self.state
    }

    /// Tick schedule; `next_due` tells the host when to deliver the next tick.
    #[must_use]
    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    /// Random source, e.g. to inspect a scripted source after a run.
    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }
}
