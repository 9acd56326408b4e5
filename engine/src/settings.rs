use serde::{Deserialize, Serialize};

use super::config::Validate;

/// All round tunables. Validated before a kernel is built; the runner
/// loads these from a YAML file and falls back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub field_width: usize,
    pub field_height: usize,

    /// Move interval of a fresh snake, in milliseconds.
    pub initial_interval_ms: u64,
    /// Hard floor for every interval computation.
    pub min_interval_ms: u64,
    /// Hard ceiling, reached only under the Slow effect.
    pub max_interval_ms: u64,
    /// Base interval shortens by this much for every food eaten.
    pub speedup_per_food_ms: u64,

    /// Rolled once per food-consumption event while no powerup is up.
    pub powerup_spawn_probability: f32,
    pub freeze_duration_ticks: u32,
    pub speed_duration_ticks: u32,
    pub slow_duration_ticks: u32,
    pub ghost_duration_ticks: u32,

    /// Shrink never truncates below this many segments.
    pub min_snake_length: usize,
    /// Score awarded for eating a frozen chaser.
    pub chaser_catch_bonus: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            field_width: 24,
            field_height: 18,
            initial_interval_ms: 160,
            min_interval_ms: 60,
            max_interval_ms: 400,
            speedup_per_food_ms: 4,
            powerup_spawn_probability: 0.35,
            freeze_duration_ticks: 24,
            speed_duration_ticks: 40,
            slow_duration_ticks: 40,
            ghost_duration_ticks: 30,
            min_snake_length: 3,
            chaser_catch_bonus: 5,
        }
    }
}

impl Validate for EngineSettings {
    fn validate(&self) -> Result<(), String> {
        if self.field_width < 8 || self.field_width > 100 {
            return Err("field_width must be between 8 and 100".to_string());
        }
        if self.field_height < 8 || self.field_height > 100 {
            return Err("field_height must be between 8 and 100".to_string());
        }
        if self.min_interval_ms < 10 {
            return Err("min_interval_ms must be at least 10".to_string());
        }
        if self.max_interval_ms > 5000 {
            return Err("max_interval_ms must not exceed 5000".to_string());
        }
        if self.initial_interval_ms < self.min_interval_ms
            || self.initial_interval_ms > self.max_interval_ms
        {
            return Err(
                "initial_interval_ms must lie between min_interval_ms and max_interval_ms"
                    .to_string(),
            );
        }
        if !(0.0..=1.0).contains(&self.powerup_spawn_probability) {
            return Err("powerup_spawn_probability must be between 0.0 and 1.0".to_string());
        }
        if self.min_snake_length < 2 {
            return Err("min_snake_length must be at least 2".to_string());
        }
        if self.min_snake_length * 4 > self.field_width * self.field_height {
            return Err("min_snake_length is too large for the field".to_string());
        }
        Ok(())
    }
}
