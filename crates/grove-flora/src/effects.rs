//! Effects emitted by plant handlers and applied later by the host.

use glam::DVec3;
use grove_common::EntityId;
use serde::{Deserialize, Serialize};

/// Where a spawned entity is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpawnSite {
    /// Loose in the world.
    World {
        /// Spawn position.
        position: DVec3,
        /// Initial velocity.
        velocity: DVec3,
    },
    /// Inside another entity (e.g. the inventory of a harvester).
    Held {
        /// Entity that receives the new entity.
        holder: EntityId,
    },
}

/// A declarative world mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Instantiate a new entity.
    SpawnEntity {
        /// Entity type to create.
        kind: String,
        /// Where to create it.
        site: SpawnSite,
    },
    /// Persist a new fruit count on the emitting plant.
    SetResource {
        /// New count.
        count: u32,
    },
    /// Deliver a message to an actor.
    Narrate {
        /// Message text.
        text: String,
        /// Actor receiving the message.
        target: EntityId,
    },
}

impl Effect {
    /// Short name of the effect kind, for logs.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::SpawnEntity { .. } => "spawn_entity",
            Self::SetResource { .. } => "set_resource",
            Self::Narrate { .. } => "narrate",
        }
    }
}

/// Ordered, append-only list of effects.
///
/// Effects keep the order they were pushed in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectQueue {
    effects: Vec<Effect>,
}

impl EffectQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an effect.
    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Number of queued effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether nothing was queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Iterate in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Effect> {
        self.effects.iter()
    }

    /// View the queued effects.
    #[must_use]
    pub fn as_slice(&self) -> &[Effect] {
        &self.effects
    }

    /// Consume the queue.
    #[must_use]
    pub fn into_vec(self) -> Vec<Effect> {
        self.effects
    }
}

impl IntoIterator for EffectQueue {
    type Item = Effect;
    type IntoIter = std::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.effects.into_iter()
    }
}

impl<'a> IntoIterator for &'a EffectQueue {
    type Item = &'a Effect;
    type IntoIter = std::slice::Iter<'a, Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.effects.iter()
    }
}

/// How a handler disposed of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerStatus {
    /// Not for this entity right now; nothing happened.
    Ignored,
    /// Handled; the host should skip its default processing.
    Blocked,
}

/// Status plus the effects a handler produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Disposition of the event.
    pub status: HandlerStatus,
    /// Effects for the host to apply, in order.
    pub effects: EffectQueue,
}

impl Outcome {
    /// The event was not handled.
    #[must_use]
    pub fn ignored() -> Self {
        Self {
            status: HandlerStatus::Ignored,
            effects: EffectQueue::new(),
        }
    }

    /// The event was handled and produced `effects` (possibly none).
    #[must_use]
    pub fn blocked(effects: EffectQueue) -> Self {
        Self {
            status: HandlerStatus::Blocked,
            effects,
        }
    }

    /// Whether the event was ignored.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.status == HandlerStatus::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_preserves_order() {
        let mut queue = EffectQueue::new();
        queue.push(Effect::SetResource { count: 3 });
        queue.push(Effect::Narrate {
            text: "hello".to_string(),
            target: EntityId::from_raw(5),
        });
        queue.push(Effect::SetResource { count: 1 });

        let kinds: Vec<_> = queue.iter().map(Effect::kind_name).collect();
        assert_eq!(kinds, ["set_resource", "narrate", "set_resource"]);
        assert_eq!(queue.as_slice()[2], Effect::SetResource { count: 1 });
    }

    #[test]
    fn test_handled_without_effects_differs_from_ignored() {
        let handled = Outcome::blocked(EffectQueue::new());
        let ignored = Outcome::ignored();
        assert!(handled.effects.is_empty());
        assert!(!handled.is_ignored());
        assert!(ignored.is_ignored());
        assert_ne!(handled, ignored);
    }

    #[test]
    fn test_effect_serializes_for_host() {
        let effect = Effect::SpawnEntity {
            kind: "acorn".to_string(),
            site: SpawnSite::Held {
                holder: EntityId::from_raw(9),
            },
        };
        let json = serde_json::to_string(&effect).expect("serialize");
        let back: Effect = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, effect);
    }
}
