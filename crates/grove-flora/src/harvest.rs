//! Harvest transaction.
//!
//! An actor asks to pick one fruit. The handler reads the fruit count once and
//! answers with either the full success bundle (spawn into the requester, the
//! decremented count, a confirmation) or a single rejection message.

use grove_common::EntityId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::effects::{Effect, EffectQueue, Outcome, SpawnSite};
use crate::state::PlantState;

/// Message sent on a successful harvest with [`NarrationStyle::Plain`].
pub const HARVEST_SUCCESS_TEXT: &str = "You harvest a fruit.";

/// Message sent when nothing can be harvested with [`NarrationStyle::Plain`].
pub const HARVEST_EMPTY_TEXT: &str = "There is nothing to harvest.";

/// How harvest messages are worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationStyle {
    /// Fixed generic messages.
    #[default]
    Plain,
    /// Messages that name the fruit ("You harvest an acorn.").
    Named,
}

impl NarrationStyle {
    /// Confirmation for a successful harvest.
    #[must_use]
    pub fn success(self, fruit_name: &str) -> String {
        match self {
            Self::Plain => HARVEST_SUCCESS_TEXT.to_string(),
            Self::Named => format!("You harvest {} {fruit_name}.", article(fruit_name)),
        }
    }

    /// Rejection when there is no fruit.
    #[must_use]
    pub fn empty(self, fruit_name: Option<&str>) -> String {
        match (self, fruit_name) {
            (Self::Named, Some(name)) => format!("There aren't any {name}s here."),
            _ => HARVEST_EMPTY_TEXT.to_string(),
        }
    }
}

fn article(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Handle a harvest request from `requester`.
///
/// Always returns [`HandlerStatus::Blocked`](crate::effects::HandlerStatus::Blocked).
pub fn harvest(state: &PlantState, requester: EntityId, style: NarrationStyle) -> Outcome {
    let mut effects = EffectQueue::new();
    let fruit_count = state.fruit_count;

    match state.fruit_kind() {
        Some(fruit_name) if fruit_count > 0 => {
            debug!(%requester, fruit = fruit_name, remaining = fruit_count - 1, "harvested");
            effects.push(Effect::SpawnEntity {
                kind: fruit_name.to_string(),
                site: SpawnSite::Held { holder: requester },
            });
            effects.push(Effect::SetResource {
                count: fruit_count - 1,
            });
            effects.push(Effect::Narrate {
                text: style.success(fruit_name),
                target: requester,
            });
        },
        fruit_name => {
            debug!(%requester, "nothing to harvest");
            effects.push(Effect::Narrate {
                text: style.empty(fruit_name),
                target: requester,
            });
        },
    }

    Outcome::blocked(effects)
}
