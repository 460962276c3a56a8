//! # Grove Tools
//!
//! Development tooling for Grove plants:
//! - Reference simulation host that delivers late, lost and duplicated ticks
//! - Host configuration loaded from TOML

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod host;

pub use config::SimConfig;
pub use host::{NarrationRecord, SimHost, SimReport, SpawnRecord};
