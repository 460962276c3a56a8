//! Per-tick growth and drop decisions.
//!
//! Both steps read the same pre-tick snapshot of [`PlantState`]; neither sees
//! the other's `SetResource`. Random draws happen in a fixed order so a
//! seeded source replays identical effects:
//!
//! 1. drop chance, then the x and z spawn offsets if the drop fires
//! 2. growth chance
//!
//! A step whose preconditions fail takes no draws.

use glam::DVec3;
use tracing::{trace, warn};

use crate::effects::{Effect, EffectQueue, SpawnSite};
use crate::random::RandomSource;
use crate::state::PlantState;

/// Percent chance per tick that a fruit falls off.
pub const DROP_CHANCE_PERCENT: f64 = 5.0;

/// Run the drop step, then the growth step, appending to `queue`.
pub fn evaluate<R: RandomSource>(state: &PlantState, rng: &mut R, queue: &mut EffectQueue) {
    drop_step(state, rng, queue);
    growth_step(state, rng, queue);
}

/// Maybe shed one fruit into the world around the plant.
///
/// Emits a spawn followed by the decremented count, or nothing.
/// Returns whether a fruit was dropped.
pub fn drop_step<R: RandomSource>(state: &PlantState, rng: &mut R, queue: &mut EffectQueue) -> bool {
    if !state.has_fruit() {
        return false;
    }
    let Some((fruit_name, _)) = state.fruiting() else {
        return false;
    };

    if rng.uniform(0.0, 100.0) >= DROP_CHANCE_PERCENT {
        return false;
    }

    let position = scatter(state.position, state.spawn_height, rng);
    trace!(fruit = fruit_name, ?position, "dropping fruit");
    queue.push(Effect::SpawnEntity {
        kind: fruit_name.to_string(),
        site: SpawnSite::World {
            position,
            velocity: DVec3::ZERO,
        },
    });
    queue.push(Effect::SetResource {
        count: state.fruit_count - 1,
    });
    true
}

/// Maybe roll for growth while the plant is under its cap.
///
/// The emitted count is `fruit_count - 1`, saturating at zero; a successful
/// growth roll never raises the count.
/// Returns whether a growth effect was emitted.
pub fn growth_step<R: RandomSource>(
    state: &PlantState,
    rng: &mut R,
    queue: &mut EffectQueue,
) -> bool {
    let Some(fruit_max) = state.fruit_max else {
        warn!("fruit plant has no fruits_max; skipping growth");
        return false;
    };
    if fruit_max == 0 || !state.can_grow() || !state.has_room() {
        return false;
    }
    let Some((_, fruit_chance)) = state.fruiting() else {
        return false;
    };

    if rng.uniform(0.0, 100.0) >= fruit_chance {
        return false;
    }

    queue.push(Effect::SetResource {
        count: state.fruit_count.saturating_sub(1),
    });
    true
}

/// Random point within `radius` of `origin` on the horizontal plane.
fn scatter<R: RandomSource>(origin: DVec3, radius: f64, rng: &mut R) -> DVec3 {
    let radius = radius.abs();
    let dx = rng.uniform(-radius, radius);
    let dz = rng.uniform(-radius, radius);
    origin + DVec3::new(dx, 0.0, dz)
}
