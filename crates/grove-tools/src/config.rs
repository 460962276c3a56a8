//! Simulation host configuration.
//!
//! Controls how faithfully the host delivers ticks (lateness, drops,
//! duplicates) and how often actors come to harvest.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Host simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Random seed (None = random)
    pub seed: Option<u64>,
    /// Simulated time to run for
    pub duration: f64,
    /// Maximum lateness added to each tick delivery
    pub max_lateness: f64,
    /// Chance (0.0 - 1.0) that a delivery is lost and retried one interval later
    pub skip_chance: f64,
    /// Chance (0.0 - 1.0) that a stale duplicate of the last tick is delivered first
    pub duplicate_chance: f64,
    /// Time between harvest requests (0 = no harvesting)
    pub harvest_every: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            duration: 3600.0,
            max_lateness: 5.0,
            skip_chance: 0.1,
            duplicate_chance: 0.05,
            harvest_every: 300.0,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Sim config not found, using defaults");
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read sim config: {e}");
                return Self::default();
            },
        };

        match toml::from_str::<Self>(&contents) {
            Ok(mut config) => {
                info!("Loaded sim config from {}", path.display());
                config.validate();
                config
            },
            Err(e) => {
                warn!("Failed to parse sim config: {e}");
                Self::default()
            },
        }
    }

    /// Clamp values to sensible ranges.
    pub fn validate(&mut self) {
        self.duration = self.duration.max(0.0);
        self.max_lateness = self.max_lateness.max(0.0);
        self.skip_chance = self.skip_chance.clamp(0.0, 0.95);
        self.duplicate_chance = self.duplicate_chance.clamp(0.0, 1.0);
        self.harvest_every = self.harvest_every.max(0.0);
    }
}
