//! Jittered tick gate.
//!
//! The host loop delivers tick events without guaranteeing exact periodicity:
//! ticks can arrive late, be skipped, or be duplicated. A [`TickSchedule`]
//! decides whether an incoming event is a valid boundary for its entity and,
//! when it is, re-arms itself `interval ± jitter` after the accepted time.
//! The jitter keeps many plants from ticking in phase.

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// Nominal time between accepted ticks.
pub const TICK_INTERVAL: f64 = 60.0;

/// Maximum deviation from [`TICK_INTERVAL`] in either direction.
pub const TICK_JITTER: f64 = 20.0;

/// Tag carried by ticks addressed to the fruit plant schedule.
pub const FRUIT_PLANT_TICK: &str = "fruit_plant";

/// A tick delivered by the host simulation loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickEvent {
    /// Simulation time at which the tick fires.
    pub time: f64,
    /// Schedule the tick belongs to.
    pub tag: String,
}

impl TickEvent {
    /// A fruit plant tick at `time`.
    #[must_use]
    pub fn new(time: f64) -> Self {
        Self::tagged(time, FRUIT_PLANT_TICK)
    }

    /// A tick at `time` for an arbitrary schedule.
    #[must_use]
    pub fn tagged(time: f64, tag: impl Into<String>) -> Self {
        Self {
            time,
            tag: tag.into(),
        }
    }
}

/// Result of gating a tick event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickGate {
    /// The event is a valid boundary; the schedule has been re-armed.
    Due,
    /// The event is early, stale, or for another schedule. Nothing changed.
    NotDue,
}

/// Per-entity tick schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSchedule {
    interval: f64,
    jitter: f64,
    last_tick: f64,
    next_due: f64,
    tag: String,
}

impl TickSchedule {
    /// Arm a schedule at `now`; the first boundary is `now + interval ± jitter`.
    pub fn new<R: RandomSource>(interval: f64, jitter: f64, now: f64, rng: &mut R) -> Self {
        let interval = interval.max(0.0);
        let jitter = jitter.clamp(0.0, interval);
        let mut schedule = Self {
            interval,
            jitter,
            last_tick: now,
            next_due: now,
            tag: FRUIT_PLANT_TICK.to_string(),
        };
        schedule.next_due = schedule.boundary_after(now, rng);
        schedule
    }

    /// Arm a schedule with the fruit plant constants (60 ± 20).
    pub fn fruit_plant<R: RandomSource>(now: f64, rng: &mut R) -> Self {
        Self::new(TICK_INTERVAL, TICK_JITTER, now, rng)
    }

    /// Answer to ticks carrying `tag` instead of [`FRUIT_PLANT_TICK`].
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Gate an incoming event.
    ///
    /// On [`TickGate::Due`] the accepted time becomes `last_tick` and the next
    /// boundary is committed. One jitter draw is taken only in that case.
    pub fn evaluate<R: RandomSource>(&mut self, event: &TickEvent, rng: &mut R) -> TickGate {
        if !self.is_due(event) {
            return TickGate::NotDue;
        }
        self.last_tick = event.time;
        self.next_due = self.boundary_after(event.time, rng);
        TickGate::Due
    }

    /// Whether `event` would be accepted, without committing anything.
    #[must_use]
    pub fn is_due(&self, event: &TickEvent) -> bool {
        event.tag == self.tag && event.time >= self.next_due
    }

    fn boundary_after<R: RandomSource>(&self, time: f64, rng: &mut R) -> f64 {
        time + self.interval + rng.uniform(-self.jitter, self.jitter)
    }

    /// Time of the last accepted tick (or of construction).
    #[must_use]
    pub fn last_tick(&self) -> f64 {
        self.last_tick
    }

    /// Earliest time the next tick will be accepted.
    #[must_use]
    pub fn next_due(&self) -> f64 {
        self.next_due
    }

    /// Nominal interval.
    #[must_use]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Jitter window half-width.
    #[must_use]
    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    /// Tag this schedule answers to.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}
