//! # grove-sim
//!
//! Runs one fruit plant under the reference host and prints the run report.
//!
//! Usage: `grove-sim [plant.toml|plant.ron] [sim.toml]`
//!
//! Without a plant config the oak preset is used.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::{Context, Result};
use grove_flora::PlantConfig;
use grove_tools::{SimConfig, SimHost};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("grove=info".parse()?))
        .init();

    info!("grove-sim {}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let plant_config = match args.next() {
        Some(path) => PlantConfig::load_from(&path)
            .with_context(|| format!("loading plant config {path}"))?,
        None => {
            info!("No plant config given, using the oak preset");
            PlantConfig::oak()
        },
    };
    let sim_config = args
        .next()
        .map_or_else(SimConfig::default, SimConfig::load_from);

    let mut host = SimHost::new(&plant_config, sim_config);
    let report = host.run().context("simulation aborted")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
