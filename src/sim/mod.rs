//! Deterministic simulation module
//!
//! All gameplay logic lives here, shared by the interactive loop and the RL
//! environment. This module must be pure and deterministic:
//! - One discrete tick per call
//! - Injected, seedable RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod intent;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::collides;
pub use intent::Intent;
pub use physics::step_player;
pub use spawn::{Spawner, spawn_obstacle};
pub use state::{Episode, EpisodePhase, Frame, Obstacle, ObstacleKind, ObstacleView, Player, Rect};
pub use tick::{StepOutcome, TickInput};
