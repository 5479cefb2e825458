//! Dash Runner - an endless runner with a shared deterministic core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, spawning, collisions, episodes)
//! - `env`: Reinforcement-learning environment over the same simulation
//! - `game`: Real-time interactive driver
//! - `input`: Key events to per-tick intents
//! - `config`: Data-driven game balance and mode selection

pub mod autopilot;
pub mod config;
pub mod env;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod sim;

pub use config::{CollisionResolution, GameConfig, RewardConfig, SpawnPolicy};
pub use env::{Env, Observation, RunnerEnv, Transition};
pub use error::{ConfigError, InvalidAction};
pub use game::Game;
pub use sim::{Episode, EpisodePhase, Intent, StepOutcome, TickInput};

/// Default game balance
pub mod consts {
    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player box is square when standing; crouching halves its height
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_START_X: f32 = 100.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_MIN_HEIGHT: u32 = PLAYER_SIZE as u32;
    pub const OBSTACLE_MAX_HEIGHT: u32 = 150;
    /// Height range for lifted ("floating") obstacles
    pub const ELEVATED_MIN_HEIGHT: u32 = 150;
    pub const ELEVATED_MAX_HEIGHT: u32 = 300;
    /// Lift multiset: 3/5 ground level, 2/5 elevated
    pub const LIFT_CHOICES: [u32; 5] = [0, 0, 0, 35, 60];
    /// Horizontal scroll per tick
    pub const OBSTACLE_SPEED: f32 = 5.0;

    /// Vertical motion (y grows downward)
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_VELOCITY: f32 = -15.0;
    /// Extra fall displacement applied on ticks spent crouching
    pub const CROUCH_FALL_BOOST: f32 = 5.0;

    /// Lives per episode
    pub const INTERACTIVE_LIVES: u32 = 5;
    pub const TRAINING_LIVES: u32 = 10;

    /// Spawner timing
    pub const SPAWN_THRESHOLDS_MS: [u32; 3] = [50, 55, 60];
    pub const SPAWN_EVERY_TICKS: u32 = 50;

    /// Processing time per interactive frame reported to the spawner (excludes pacing sleep)
    pub const FRAME_WORK_MS: u32 = 2;
    /// Largest elapsed time fed into a single frame (prevents spawn bursts after a stall)
    pub const MAX_FRAME_MS: u32 = 100;
}
