//! Simulation configuration.
//!
//! Every field has a default, so a config file only needs to list what it
//! overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::GridSize;

/// Behavior tuning for the per-tick AI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Chance an actor acts at all on a given tick
    pub move_chance: f64,
    /// Chance a hostile with no target picks a random adjacent cell
    pub hostile_wander_chance: f64,
    /// Chance a survivor picks a random adjacent cell
    pub survivor_wander_chance: f64,
    /// Targets must be strictly closer than this (Euclidean, in cells)
    pub detection_radius: f64,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            move_chance: 0.5,
            hostile_wander_chance: 0.2,
            survivor_wander_chance: 0.1,
            detection_radius: 8.0,
        }
    }
}

/// World and timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub grid: GridSize,
    /// Biome whose spawn rules populate the world
    pub biome: String,
    /// Seed for spawn rolls and placement
    pub seed: u64,
    /// Player-category survivors spawned regardless of biome
    pub initial_survivors: u32,
    /// Random cells tried per spawn before giving up
    pub placement_attempts: u32,
    /// Wall-clock milliseconds per tick
    pub tick_rate_ms: u64,
    /// A narrative event is requested every this many ticks
    pub event_interval: u64,
    pub event_log_capacity: usize,
    pub ai: AiTuning,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            biome: "wasteland".to_string(),
            seed: 1001,
            initial_survivors: 5,
            placement_attempts: 200,
            tick_rate_ms: 500,
            event_interval: 150,
            event_log_capacity: 10,
            ai: AiTuning::default(),
        }
    }
}

/// Errors that can occur while loading a config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a probability in [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },
    #[error("detection_radius must be a finite, non-negative distance, got {0}")]
    DetectionRadius(f64),
}

impl AiTuning {
    /// Reject chances outside `[0, 1]` and a NaN, infinite or negative radius
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.detection_radius.is_finite() || self.detection_radius < 0.0 {
            return Err(ConfigError::DetectionRadius(self.detection_radius));
        }
        let chances = [
            ("move_chance", self.move_chance),
            ("hostile_wander_chance", self.hostile_wander_chance),
            ("survivor_wander_chance", self.survivor_wander_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { field, value });
            }
        }
        Ok(())
    }
}

impl WorldConfig {
    /// Checked on load and again when an engine is built from this config
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ai.validate()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
