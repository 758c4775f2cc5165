//! Game settings and rules
//!
//! Loaded from an optional JSON file; every missing field falls back to the
//! defaults in `crate::consts`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Play-field rectangle (origin at top-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// Tick rate and spawn timer periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Simulation ticks per second
    pub tick_rate: u32,
    pub enemy_spawn_ms: u64,
    pub player_fire_ms: u64,
    pub enemy_fire_ms: u64,
    pub pickup_spawn_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            enemy_spawn_ms: ENEMY_SPAWN_MS,
            player_fire_ms: PLAYER_FIRE_MS,
            enemy_fire_ms: ENEMY_FIRE_MS,
            pickup_spawn_ms: PICKUP_SPAWN_MS,
        }
    }
}

impl TimingSettings {
    /// Duration of a single tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }
}

/// Gameplay rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    pub player_lives: i32,
    pub enemy_hit_points: i32,
    /// Seconds an enemy craft waits between its own shots
    pub enemy_fire_interval: f64,
    /// Animation frames advanced per tick
    pub animation_step: f32,
    /// Units/tick per unit of input direction
    pub move_speed: i32,
    /// Score awarded per enemy destroyed by player projectiles
    pub enemy_score: u64,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            player_lives: PLAYER_LIVES,
            enemy_hit_points: ENEMY_HIT_POINTS,
            enemy_fire_interval: ENEMY_FIRE_INTERVAL,
            animation_step: ANIMATION_STEP,
            move_speed: MOVE_SPEED,
            enemy_score: ENEMY_SCORE,
        }
    }
}

/// Complete settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub field: FieldSettings,
    pub timing: TimingSettings,
    pub rules: RuleSettings,
    /// Seed for spawn placement and motion randomization
    pub seed: u64,
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        let settings = Self::from_json(&json).map_err(|e| match e {
            ConfigError::Parse { details, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                details,
            },
            other => other,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            details: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that would break simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let FieldSettings { width, height } = self.field;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidField { width, height });
        }

        let timing = &self.timing;
        if timing.tick_rate == 0 {
            return Err(ConfigError::InvalidPeriod { timer: "tick_rate" });
        }
        for (timer, period) in [
            ("enemy_spawn_ms", timing.enemy_spawn_ms),
            ("player_fire_ms", timing.player_fire_ms),
            ("enemy_fire_ms", timing.enemy_fire_ms),
            ("pickup_spawn_ms", timing.pickup_spawn_ms),
        ] {
            if period == 0 {
                return Err(ConfigError::InvalidPeriod { timer });
            }
        }

        let rules = &self.rules;
        if rules.player_lives <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "player_lives",
                reason: format!("must be positive, got {}", rules.player_lives),
            });
        }
        if rules.enemy_hit_points <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "enemy_hit_points",
                reason: format!("must be positive, got {}", rules.enemy_hit_points),
            });
        }
        if !(rules.enemy_fire_interval.is_finite() && rules.enemy_fire_interval >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "enemy_fire_interval",
                reason: format!("must be a non-negative number, got {}", rules.enemy_fire_interval),
            });
        }
        if !(rules.animation_step.is_finite() && rules.animation_step > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "animation_step",
                reason: format!("must be positive, got {}", rules.animation_step),
            });
        }
        Ok(())
    }
}
