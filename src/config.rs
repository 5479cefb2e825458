//! Game configuration
//!
//! Balance knobs live in
//! [`GameConfig`], which is handed to each [`Episode`](crate::Episode) at
//! construction. Configs can be persisted as JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// How the spawner decides that an obstacle is due
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Accumulate elapsed wall-clock milliseconds; each check draws a fresh
    /// threshold from `thresholds_ms`
    Elapsed { thresholds_ms: Vec<u32> },
    /// Count ticks; spawn every `every` ticks
    Ticks { every: u32 },
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        SpawnPolicy::Ticks {
            every: SPAWN_EVERY_TICKS,
        }
    }
}

/// What happens to the rest of the obstacle scan after a non-terminal hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionResolution {
    /// Keep scanning; several obstacles may hit in the same tick
    Continue,
    /// End the tick at the first hit; later obstacles do not advance this tick
    #[default]
    StopAtFirst,
}

/// Per-tick reward shaping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Granted for every tick survived
    pub survival: f32,
    /// Subtracted for a jump or crouch intent, effective or not
    pub action_cost: f32,
    /// Replaces the whole tick reward when any obstacle hits
    pub collision_penalty: f32,
    /// Added per obstacle that scrolls past the left edge
    pub pass_bonus: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            survival: 0.1,
            action_cost: 0.05,
            collision_penalty: -1.0,
            pass_bonus: 1.0,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Player ===
    /// Standing box side length (crouching halves the height)
    pub player_size: f32,
    pub player_start_x: f32,
    pub lives: u32,

    // === Motion ===
    pub gravity: f32,
    pub jump_velocity: f32,
    pub crouch_fall_boost: f32,
    pub obstacle_speed: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_min_height: u32,
    pub obstacle_max_height: u32,
    pub elevated_min_height: u32,
    pub elevated_max_height: u32,
    /// Uniformly sampled; a non-zero lift makes an elevated obstacle
    pub lift_choices: Vec<u32>,

    // === Episode policy ===
    pub spawn: SpawnPolicy,
    pub collision: CollisionResolution,
    pub rewards: RewardConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::training()
    }
}

impl GameConfig {
    /// Preset for the human-playable loop: wall-clock spawning, several hits per tick
    pub fn interactive() -> Self {
        Self {
            lives: INTERACTIVE_LIVES,
            spawn: SpawnPolicy::Elapsed {
                thresholds_ms: SPAWN_THRESHOLDS_MS.to_vec(),
            },
            collision: CollisionResolution::Continue,
            ..Self::training()
        }
    }

    /// Preset for the RL environment: tick-counted spawning, one hit per tick
    pub fn training() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            player_size: PLAYER_SIZE,
            player_start_x: PLAYER_START_X,
            lives: TRAINING_LIVES,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            crouch_fall_boost: CROUCH_FALL_BOOST,
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
            obstacle_max_height: OBSTACLE_MAX_HEIGHT,
            elevated_min_height: ELEVATED_MIN_HEIGHT,
            elevated_max_height: ELEVATED_MAX_HEIGHT,
            lift_choices: LIFT_CHOICES.to_vec(),
            spawn: SpawnPolicy::default(),
            collision: CollisionResolution::StopAtFirst,
            rewards: RewardConfig::default(),
        }
    }

    /// y coordinate of a grounded player's top edge
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.screen_height - self.player_size
    }

    /// Rightmost x the player may occupy
    #[inline]
    pub fn max_player_x(&self) -> f32 {
        self.screen_width - self.player_size
    }

    /// Check that the config describes a playable world
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if !positive(self.screen_width) || !positive(self.screen_height) {
            return invalid("screen dimensions must be positive");
        }
        if !positive(self.player_size) {
            return invalid("player_size must be positive");
        }
        if self.player_size > self.screen_width || self.player_size > self.screen_height {
            return invalid("player does not fit on screen");
        }
        if !(0.0..=self.max_player_x()).contains(&self.player_start_x) {
            return invalid("player_start_x is off screen");
        }
        if self.lives == 0 {
            return invalid("lives must be at least 1");
        }
        if !positive(self.obstacle_width) {
            return invalid("obstacle_width must be positive");
        }
        if self.obstacle_speed.is_nan() || self.obstacle_speed < 0.0 {
            return invalid("obstacle_speed must not be negative");
        }
        if self.obstacle_min_height > self.obstacle_max_height {
            return invalid("obstacle height range is empty");
        }
        if self.elevated_min_height > self.elevated_max_height {
            return invalid("elevated obstacle height range is empty");
        }
        if self.lift_choices.is_empty() {
            return invalid("lift_choices must not be empty");
        }
        match &self.spawn {
            SpawnPolicy::Elapsed { thresholds_ms } if thresholds_ms.is_empty() => {
                return invalid("spawn thresholds_ms must not be empty");
            }
            SpawnPolicy::Ticks { every: 0 } => {
                return invalid("spawn interval must be at least one tick");
            }
            _ => {}
        }
        Ok(())
    }

    /// Parse and validate a JSON config on top of the training preset
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::from_json_onto(json, &Self::default())
    }

    /// Parse a JSON config whose top-level keys replace those of `base`
    pub fn from_json_onto(json: &str, base: &Self) -> Result<Self, ConfigError> {
        let serde_json::Value::Object(overrides) = serde_json::from_str(json)? else {
            return Err(ConfigError::Invalid("config root must be a JSON object".to_string()));
        };
        let mut merged = serde_json::to_value(base)?;
        if let Some(fields) = merged.as_object_mut() {
            fields.extend(overrides);
        }
        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file on top of the training preset
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_onto(path, &Self::default())
    }

    /// Load a JSON file whose keys override `base` (usually a mode preset)
    pub fn load_onto(path: impl AsRef<Path>, base: &Self) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_onto(&json, base)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }
}

/// NaN is not positive
fn positive(value: f32) -> bool {
    value > 0.0
}
