//! Reinforcement-learning environment
//!
//! Wraps an [`Episode`] in the classic reset/step interface. Each step takes one
//! of three discrete intents and returns an observation vector, a reward and a
//! termination flag.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::InvalidAction;
use crate::sim::{Episode, Intent, Obstacle, ObstacleKind, StepOutcome, TickInput};

/// Number of observation components
pub const OBSERVATION_SIZE: usize = 6;

/// Observation used when there is nothing to look at or the numbers degenerate
pub const FALLBACK_OBSERVATION: [f32; OBSERVATION_SIZE] = [0.0, 0.0, 1.0, 1.0, 1.0, 0.0];

/// Environment interface a policy drives
pub trait Env {
    /// Reset to a fresh episode and return the first observation
    fn reset(&mut self) -> Observation;

    /// Advance by one intent
    fn step(&mut self, intent: Intent) -> Transition;

    /// Advance by a raw action code, rejecting codes outside the action set
    fn step_action(&mut self, action: i64) -> Result<Transition, InvalidAction> {
        let intent = Intent::try_from(action)?;
        Ok(self.step(intent))
    }

    fn observation_size(&self) -> usize {
        OBSERVATION_SIZE
    }

    fn action_count(&self) -> usize {
        Intent::ALL.len()
    }
}

/// Normalized observation vector:
/// `[player_height_ratio, is_crouching, next_obstacle_distance,
///   next_obstacle_height, gap_to_following, obstacle_type]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation(pub [f32; OBSERVATION_SIZE]);

impl Observation {
    pub fn fallback() -> Self {
        Observation(FALLBACK_OBSERVATION)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Build the observation for the current episode state
    pub fn from_episode<R: Rng>(episode: &Episode<R>) -> Self {
        let config = episode.config();
        let player = episode.player();
        let (width, height) = (config.screen_width, config.screen_height);

        let Some((next, following)) = nearest_two(episode.obstacles()) else {
            return Self::fallback();
        };

        let gap = match following {
            Some(following) => following.x - next.x - config.obstacle_width,
            None => width - (next.x + config.obstacle_width),
        };
        let type_code = match next.kind() {
            ObstacleKind::Ground => 0.0,
            ObstacleKind::Elevated => 1.0,
        };

        let raw: [f32; 6] = [
            player.pos.y / height,
            if player.is_crouching { 1.0 } else { 0.0 },
            (next.x - player.pos.x - config.player_size) / width,
            (next.y - next.height as f32) / height,
            gap / width,
            type_code,
        ];

        let observation = Observation(normalize(raw));
        if observation.is_finite() {
            observation
        } else {
            Self::fallback()
        }
    }
}

/// Scale to unit Euclidean length; a zero vector becomes NaN and is caught by the caller
fn normalize(mut v: [f32; OBSERVATION_SIZE]) -> [f32; OBSERVATION_SIZE] {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    for x in &mut v {
        *x /= norm;
    }
    v
}

/// Leftmost obstacle and the one after it; ties keep spawn order
fn nearest_two(obstacles: &[Obstacle]) -> Option<(&Obstacle, Option<&Obstacle>)> {
    let mut next: Option<&Obstacle> = None;
    let mut following: Option<&Obstacle> = None;
    for obstacle in obstacles {
        match next {
            Some(n) if obstacle.x >= n.x => {
                if following.is_none_or(|f| obstacle.x < f.x) {
                    following = Some(obstacle);
                }
            }
            _ => {
                following = next;
                next = Some(obstacle);
            }
        }
    }
    next.map(|n| (n, following))
}

/// Result of one environment step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
    pub info: StepOutcome,
}

/// The runner game as an RL environment
#[derive(Debug, Clone)]
pub struct RunnerEnv<R = Pcg32> {
    episode: Episode<R>,
    /// Steps across all episodes
    total_steps: u64,
    episodes_finished: u64,
}

impl RunnerEnv<Pcg32> {
    /// Training preset environment with a seeded random source
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig::training(), seed)
    }

    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        Self::from_episode(Episode::new(config, seed))
    }
}

impl<R: Rng> RunnerEnv<R> {
    pub fn from_episode(episode: Episode<R>) -> Self {
        Self {
            episode,
            total_steps: 0,
            episodes_finished: 0,
        }
    }

    pub fn episode(&self) -> &Episode<R> {
        &self.episode
    }

    pub fn observation(&self) -> Observation {
        Observation::from_episode(&self.episode)
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn episodes_finished(&self) -> u64 {
        self.episodes_finished
    }
}

impl<R: Rng> Env for RunnerEnv<R> {
    fn reset(&mut self) -> Observation {
        self.episode.reset();
        self.observation()
    }

    fn step(&mut self, intent: Intent) -> Transition {
        let was_running = !self.episode.is_terminated();
        let outcome = self.episode.tick(&TickInput::intent(intent));
        self.total_steps += 1;
        if was_running && outcome.terminated {
            self.episodes_finished += 1;
        }

        // A collision tick reports the fallback observation
        let observation = if outcome.collisions > 0 {
            Observation::fallback()
        } else {
            self.observation()
        };

        Transition {
            observation,
            reward: outcome.reward,
            done: outcome.terminated,
            info: outcome,
        }
    }
}
