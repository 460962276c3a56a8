//! Plant resource state and the growth-eligibility predicate.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Scale assumed when the entity carries no scale property.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Fruit inventory and the properties the policy reads from it.
///
/// Owned by a single plant. Only `fruit_count` ever changes after
/// construction, and only when the host hands a `SetResource` effect back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantState {
    /// Harvestable fruit currently on the plant.
    pub fruit_count: u32,
    /// Inventory cap. `None` is a configuration error for the growth step.
    pub fruit_max: Option<u32>,
    /// Size descriptor; one component is the size itself, two or more are (width, height, ...).
    pub scale: Option<Vec<f64>>,
    /// The plant only fruits once its size exceeds this.
    pub fruiting_min_scale: f64,
    /// Percent chance per tick of a growth attempt succeeding.
    pub fruit_chance: Option<f64>,
    /// Entity type spawned for each fruit.
    pub fruit_name: Option<String>,
    /// Bounding-box height; dropped fruit lands within this horizontal radius.
    pub spawn_height: f64,
    /// Position of the plant.
    pub position: DVec3,
    /// Velocity of the plant. Spawned fruit never inherits it.
    pub velocity: DVec3,
}

impl Default for PlantState {
    fn default() -> Self {
        Self {
            fruit_count: 0,
            fruit_max: None,
            scale: None,
            fruiting_min_scale: 0.0,
            fruit_chance: None,
            fruit_name: None,
            spawn_height: 1.0,
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
        }
    }
}

impl PlantState {
    /// Effective size used for the fruiting threshold.
    ///
    /// Reads the height component when two or more are present, the sole
    /// component when there is one, and [`DEFAULT_SCALE`] otherwise.
    #[must_use]
    pub fn scale_of(&self) -> f64 {
        match self.scale.as_deref() {
            Some([only]) => *only,
            Some([_, height, ..]) => *height,
            Some([]) | None => DEFAULT_SCALE,
        }
    }

    /// Whether the plant is large enough to grow fruit.
    #[must_use]
    pub fn can_grow(&self) -> bool {
        self.scale_of() > self.fruiting_min_scale
    }

    /// Whether another fruit fits under the cap.
    ///
    /// Always false when the cap is missing.
    #[must_use]
    pub fn has_room(&self) -> bool {
        self.fruit_max.is_some_and(|max| self.fruit_count < max)
    }

    /// The fruit entity type, if one is named.
    ///
    /// An empty name counts as unset.
    #[must_use]
    pub fn fruit_kind(&self) -> Option<&str> {
        self.fruit_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Fruit type and chance when both are configured.
    ///
    /// A zero chance counts as unset, so the step that needs it takes no draw.
    #[must_use]
    pub fn fruiting(&self) -> Option<(&str, f64)> {
        let chance = self.fruit_chance.filter(|chance| *chance > 0.0)?;
        Some((self.fruit_kind()?, chance))
    }

    /// Whether there is fruit to drop or harvest.
    #[must_use]
    pub fn has_fruit(&self) -> bool {
        self.fruit_count > 0
    }

    /// Store a committed count, never exceeding the cap.
    ///
    /// Returns the count actually stored.
    pub fn set_fruit_count(&mut self, count: u32) -> u32 {
        self.fruit_count = match self.fruit_max {
            Some(max) => count.min(max),
            None => count,
        };
        self.fruit_count
    }

    /// Whether `0 <= fruit_count <= fruit_max` holds.
    #[must_use]
    pub fn within_bounds(&self) -> bool {
        self.fruit_max.map_or(true, |max| self.fruit_count <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_scale(scale: Option<Vec<f64>>, min: f64) -> PlantState {
        PlantState {
            scale,
            fruiting_min_scale: min,
            ..PlantState::default()
        }
    }

    #[test]
    fn test_scale_defaults_to_one() {
        let state = with_scale(None, 0.5);
        assert!((state.scale_of() - 1.0).abs() < f64::EPSILON);
        assert!(state.can_grow());

        let state = with_scale(Some(Vec::new()), 0.5);
        assert!((state.scale_of() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scale_reads_height() {
        let state = with_scale(Some(vec![1.0, 3.0]), 2.0);
        assert!((state.scale_of() - 3.0).abs() < f64::EPSILON);
        assert!(state.can_grow());

        let state = with_scale(Some(vec![5.0, 1.5, 5.0]), 2.0);
        assert!(!state.can_grow());
    }

    #[test]
    fn test_single_component_scale() {
        let state = with_scale(Some(vec![2.5]), 2.0);
        assert!((state.scale_of() - 2.5).abs() < f64::EPSILON);
        assert!(state.can_grow());
    }

    #[test]
    fn test_threshold_is_strict() {
        let state = with_scale(Some(vec![2.0]), 2.0);
        assert!(!state.can_grow());
    }

    #[test]
    fn test_room_requires_cap() {
        let mut state = PlantState {
            fruit_count: 2,
            ..PlantState::default()
        };
        assert!(!state.has_room());
        state.fruit_max = Some(3);
        assert!(state.has_room());
        state.fruit_count = 3;
        assert!(!state.has_room());
    }

    #[test]
    fn test_empty_name_or_zero_chance_is_unconfigured() {
        let mut state = PlantState {
            fruit_name: Some("acorn".to_string()),
            fruit_chance: Some(10.0),
            ..PlantState::default()
        };
        assert_eq!(state.fruiting(), Some(("acorn", 10.0)));

        state.fruit_chance = Some(0.0);
        assert_eq!(state.fruiting(), None);
        assert_eq!(state.fruit_kind(), Some("acorn"));

        state.fruit_chance = Some(10.0);
        state.fruit_name = Some(String::new());
        assert_eq!(state.fruiting(), None);
        assert_eq!(state.fruit_kind(), None);
    }

    #[test]
    fn test_set_fruit_count_respects_cap() {
        let mut state = PlantState {
            fruit_max: Some(4),
            ..PlantState::default()
        };
        assert_eq!(state.set_fruit_count(9), 4);
        assert!(state.within_bounds());
        assert_eq!(state.set_fruit_count(1), 1);
    }
}
