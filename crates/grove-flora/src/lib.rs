//! # Grove Flora
//!
//! Fruit-bearing plant entities for a host simulation.
//!
//! A plant periodically tries to drop fruit into the world and to grow more,
//! and answers harvest requests from other actors. Every handler is a pure
//! computation over the plant's current state that returns an ordered list
//! of effects; the host applies them.
//!
//! - Jittered tick gate ([`ticks`])
//! - Resource state and growth eligibility ([`state`])
//! - Growth/drop policy ([`policy`])
//! - Harvest transaction ([`harvest`])
//! - Effect queue ([`effects`])
//! - Injected randomness ([`random`])
//! - Property-bag configuration ([`config`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod effects;
pub mod harvest;
pub mod plant;
pub mod policy;
pub mod random;
pub mod state;
pub mod ticks;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::effects::*;
    pub use crate::harvest::{NarrationStyle, HARVEST_EMPTY_TEXT, HARVEST_SUCCESS_TEXT};
    pub use crate::plant::*;
    pub use crate::random::*;
    pub use crate::state::*;
    pub use crate::ticks::*;
}

pub use prelude::*;
