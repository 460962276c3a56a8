//! Plant configuration.
//!
//! The host's entity property store is modeled as a fixed set of optional
//! fields. Missing fields fall back to the defaults documented on each
//! field; a missing `fruits_max`, `fruit_name` or `fruit_chance` disables the
//! step that needs it rather than failing. An empty `fruit_name` or a zero
//! `fruit_chance` counts as missing.
//!
//! Configuration can be read from TOML or RON files.

use std::fs;
use std::path::Path;

use glam::DVec3;
use grove_common::{GroveError, GroveResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::harvest::NarrationStyle;
use crate::state::PlantState;

/// Properties of a fruit-bearing plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConfig {
    /// Starting fruit count (absent = 0).
    pub fruits: Option<u32>,
    /// Inventory cap (absent = growth disabled, logged every tick).
    pub fruits_max: Option<u32>,
    /// Entity type spawned for each fruit.
    pub fruit_name: Option<String>,
    /// Percent chance per tick of growth, clamped to [0, 100].
    pub fruit_chance: Option<f64>,
    /// Size descriptor (absent = 1.0).
    pub scale: Option<Vec<f64>>,
    /// Size the plant must exceed before it fruits.
    pub fruiting_min_scale: f64,
    /// Bounding-box height, used as the drop radius.
    pub spawn_height: f64,
    /// Plant position.
    pub position: DVec3,
    /// Plant velocity.
    pub velocity: DVec3,
    /// Wording of harvest messages.
    pub narration: NarrationStyle,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            fruits: None,
            fruits_max: None,
            fruit_name: None,
            fruit_chance: None,
            scale: None,
            fruiting_min_scale: 0.0,
            spawn_height: 1.0,
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            narration: NarrationStyle::Plain,
        }
    }
}

impl PlantConfig {
    /// An oak dropping acorns.
    #[must_use]
    pub fn oak() -> Self {
        Self {
            fruits: Some(3),
            fruits_max: Some(5),
            fruit_name: Some("acorn".to_string()),
            fruit_chance: Some(10.0),
            scale: Some(vec![1.0, 3.0]),
            fruiting_min_scale: 2.0,
            spawn_height: 4.0,
            narration: NarrationStyle::Named,
            ..Self::default()
        }
    }

    /// A small apple tree that only fruits once it has grown.
    #[must_use]
    pub fn apple_sapling() -> Self {
        Self {
            fruits: Some(0),
            fruits_max: Some(8),
            fruit_name: Some("apple".to_string()),
            fruit_chance: Some(25.0),
            scale: Some(vec![0.8]),
            fruiting_min_scale: 1.5,
            spawn_height: 2.0,
            ..Self::default()
        }
    }

    /// Load configuration from a `.toml` or `.ron` file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> GroveResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let parse_error = |message: String| GroveError::Parse {
            path: path.to_path_buf(),
            message,
        };
        let mut config: Self = match extension.as_str() {
            "toml" => toml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?,
            "ron" => ron::from_str(&contents).map_err(|e| parse_error(e.to_string()))?,
            other => return Err(GroveError::UnsupportedFormat(other.to_string())),
        };
        config.validate();

        info!("Loaded plant config from {}", path.display());
        Ok(config)
    }

    /// Clamp values to their valid ranges.
    pub fn validate(&mut self) {
        if let Some(chance) = self.fruit_chance {
            let clamped = chance.clamp(0.0, 100.0);
            if (clamped - chance).abs() > f64::EPSILON || chance.is_nan() {
                warn!("fruit_chance {chance} outside [0, 100], clamping");
            }
            self.fruit_chance = Some(if chance.is_nan() { 0.0 } else { clamped });
        }

        if let (Some(fruits), Some(max)) = (self.fruits, self.fruits_max) {
            if fruits > max {
                warn!("fruits {fruits} exceeds fruits_max {max}, clamping");
                self.fruits = Some(max);
            }
        }

        self.spawn_height = self.spawn_height.abs();
    }

    /// Build the runtime state for a plant.
    #[must_use]
    pub fn to_state(&self) -> PlantState {
        let mut config = self.clone();
        config.validate();
        PlantState {
            fruit_count: config.fruits.unwrap_or(0),
            fruit_max: config.fruits_max,
            scale: config.scale,
            fruiting_min_scale: config.fruiting_min_scale,
            fruit_chance: config.fruit_chance,
            fruit_name: config.fruit_name,
            spawn_height: config.spawn_height,
            position: config.position,
            velocity: config.velocity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn test_defaults_leave_features_unconfigured() {
        let state = PlantConfig::default().to_state();
        assert_eq!(state.fruit_count, 0);
        assert!(state.fruit_max.is_none());
        assert!(state.fruit_name.is_none());
        assert!(state.fruit_chance.is_none());
        assert!((state.scale_of() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_oak_preset() {
        let state = PlantConfig::oak().to_state();
        assert_eq!(state.fruit_count, 3);
        assert_eq!(state.fruit_max, Some(5));
        assert!(state.can_grow());
    }

    #[test]
    fn test_sapling_cannot_grow_yet() {
        assert!(!PlantConfig::apple_sapling().to_state().can_grow());
    }

    #[test]
    fn test_validate_clamps() {
        let mut config = PlantConfig {
            fruits: Some(9),
            fruits_max: Some(4),
            fruit_chance: Some(150.0),
            spawn_height: -3.0,
            ..PlantConfig::default()
        };
        config.validate();
        assert_eq!(config.fruits, Some(4));
        assert_eq!(config.fruit_chance, Some(100.0));
        assert!((config.spawn_height - 3.0).abs() < f64::EPSILON);
        assert!(config.to_state().within_bounds());
    }

    #[test]
    fn test_load_toml() {
        let file = write_temp(
            ".toml",
            r#"
                fruits = 2
                fruits_max = 6
                fruit_name = "plum"
                fruit_chance = 12.5
                scale = [1.0, 2.5]
                fruiting_min_scale = 2.0
                position = [1.0, 0.0, 2.0]
                narration = "named"
            "#,
        );
        let config = PlantConfig::load_from(file.path()).expect("load toml");
        assert_eq!(config.fruits, Some(2));
        assert_eq!(config.fruit_name.as_deref(), Some("plum"));
        assert_eq!(config.position, DVec3::new(1.0, 0.0, 2.0));
        assert_eq!(config.narration, NarrationStyle::Named);
        // Unset fields keep their defaults
        assert!((config.spawn_height - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_ron() {
        let file = write_temp(
            ".ron",
            r#"(
                fruits: Some(1),
                fruits_max: Some(3),
                fruit_name: Some("cherry"),
                fruit_chance: Some(40.0),
            )"#,
        );
        let config = PlantConfig::load_from(file.path()).expect("load ron");
        assert_eq!(config.fruits_max, Some(3));
        assert_eq!(config.fruit_chance, Some(40.0));
        assert!(config.scale.is_none());
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let file = write_temp(".yaml", "fruits: 1");
        let result = PlantConfig::load_from(file.path());
        assert!(matches!(result, Err(GroveError::UnsupportedFormat(ext)) if ext == "yaml"));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let file = write_temp(".toml", "fruits = \"many\"");
        let result = PlantConfig::load_from(file.path());
        assert!(matches!(result, Err(GroveError::Parse { .. })));
    }

    #[test]
    fn test_shipped_configs_parse() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../configs");

        let oak = PlantConfig::load_from(dir.join("oak.toml")).expect("oak.toml");
        assert_eq!(oak.fruit_name.as_deref(), Some("acorn"));
        assert!(oak.to_state().can_grow());

        let cherry = PlantConfig::load_from(dir.join("cherry.ron")).expect("cherry.ron");
        assert_eq!(cherry.fruits_max, Some(6));
        assert!((cherry.to_state().scale_of() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let result = PlantConfig::load_from("/nonexistent/grove/plant.toml");
        assert!(matches!(result, Err(GroveError::Io(_))));
    }
}
