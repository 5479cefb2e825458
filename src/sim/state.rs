//! Entity state and the episode container
//!
//! Everything a tick reads or writes lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::Spawner;
use crate::config::GameConfig;

/// Axis-aligned box, `min` is the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }
}

/// Current phase of an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodePhase {
    /// Ticks advance the simulation
    Running,
    /// Lives exhausted; ticks are ignored until reset
    Terminated,
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left of the standing box; crouching does not move it
    pub pos: Vec2,
    /// Vertical speed, positive is downward
    pub y_velocity: f32,
    pub is_crouching: bool,
    /// Set on a grounded crouch-to-stand transition, consumed by the same step
    pub just_stood_up: bool,
    pub lives: u32,
}

impl Player {
    /// Player standing on the ground at the configured start position
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.player_start_x, config.ground_y()),
            y_velocity: 0.0,
            is_crouching: false,
            just_stood_up: false,
            lives: config.lives,
        }
    }

    /// Bottom edge exactly on the floor line
    #[inline]
    pub fn is_grounded(&self, config: &GameConfig) -> bool {
        self.pos.y + config.player_size == config.screen_height
    }

    /// Effective collision/draw box; crouching keeps the bottom edge and halves the height
    pub fn hitbox(&self, config: &GameConfig) -> Rect {
        let full = config.player_size;
        if self.is_crouching {
            let half = full / 2.0;
            Rect::new(self.pos.x, self.pos.y + half, full, half)
        } else {
            Rect::new(self.pos.x, self.pos.y, full, full)
        }
    }
}

/// Obstacle variants, distinguished by lift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Rests on the floor; must be jumped
    Ground,
    /// Lifted off the floor; can be ducked under (or passed under, when high enough)
    Elevated,
}

/// A scrolling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub height: u32,
    pub lift: u32,
}

impl Obstacle {
    /// Obstacle entering at the right screen edge, bottom raised by `lift`
    pub fn new(id: u32, height: u32, lift: u32, config: &GameConfig) -> Self {
        Self {
            id,
            x: config.screen_width,
            y: config.screen_height - height as f32 - lift as f32,
            height,
            lift,
        }
    }

    pub fn kind(&self) -> ObstacleKind {
        if self.lift == 0 {
            ObstacleKind::Ground
        } else {
            ObstacleKind::Elevated
        }
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::new(self.x, self.y, config.obstacle_width, self.height as f32)
    }

    /// Scrolled fully past the left edge
    #[inline]
    pub fn is_offscreen(&self, config: &GameConfig) -> bool {
        self.x + config.obstacle_width < 0.0
    }
}

/// Read-only view of an obstacle for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub rect: Rect,
    pub kind: ObstacleKind,
}

/// Snapshot handed to a presentation layer once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub player: Rect,
    pub obstacles: Vec<ObstacleView>,
    pub lives: u32,
    pub score: u64,
    pub phase: EpisodePhase,
}

/// One playthrough: the player, the obstacles it owns, and the random source
#[derive(Debug, Clone)]
pub struct Episode<R = Pcg32> {
    pub(crate) config: GameConfig,
    pub(crate) rng: R,
    pub(crate) player: Player,
    /// Spawn order; used by the "next obstacle" observation queries
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) spawner: Spawner,
    pub(crate) phase: EpisodePhase,
    /// Obstacles cleared this episode
    pub(crate) score: u64,
    /// Ticks simulated this episode
    pub(crate) ticks: u64,
    next_id: u32,
}

impl Episode<Pcg32> {
    /// Create an episode with a seeded PCG random source
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Episode<R> {
    /// Create an episode drawing spawn decisions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let player = Player::new(&config);
        log::info!(
            "Episode start: {} lives, spawn {:?}, collisions {:?}",
            config.lives,
            config.spawn,
            config.collision
        );
        Self {
            player,
            obstacles: Vec::new(),
            spawner: Spawner::default(),
            phase: EpisodePhase::Running,
            score: 0,
            ticks: 0,
            next_id: 1,
            config,
            rng,
        }
    }

    /// Start a fresh playthrough; the random stream continues
    pub fn reset(&mut self) {
        log::debug!(
            "Episode reset after {} ticks, score {}",
            self.ticks,
            self.score
        );
        self.player = Player::new(&self.config);
        self.obstacles.clear();
        self.spawner = Spawner::default();
        self.phase = EpisodePhase::Running;
        self.score = 0;
        self.ticks = 0;
        self.next_id = 1;
    }

    /// Allocate a new obstacle ID
    pub(crate) fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Live obstacles in spawn order
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == EpisodePhase::Terminated
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Snapshot for drawing
    pub fn frame(&self) -> Frame {
        Frame {
            player: self.player.hitbox(&self.config),
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    rect: o.rect(&self.config),
                    kind: o.kind(),
                })
                .collect(),
            lives: self.player.lives,
            score: self.score,
            phase: self.phase,
        }
    }

    /// Mutable access for scripted scenarios
    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Place an obstacle directly, bypassing the spawner
    #[cfg(test)]
    pub(crate) fn push_obstacle(&mut self, x: f32, height: u32, lift: u32) -> u32 {
        let id = self.next_obstacle_id();
        let mut obstacle = Obstacle::new(id, height, lift, &self.config);
        obstacle.x = x;
        self.obstacles.push(obstacle);
        id
    }
}
