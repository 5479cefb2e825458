//! Episode tick
//!
//! One call advances the whole simulation: player physics, spawning, obstacle
//! motion and collisions, then pass-through cleanup and reward.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::collides;
use super::intent::Intent;
use super::physics::step_player;
use super::spawn::spawn_obstacle;
use super::state::{Episode, EpisodePhase};
use crate::config::CollisionResolution;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub intent: Intent,
    /// Horizontal movement; only the interactive loop sets this
    pub dx: f32,
    /// Milliseconds reported to an elapsed-time spawner
    pub elapsed_ms: u32,
}

impl TickInput {
    /// Input for a discrete environment step
    pub fn intent(intent: Intent) -> Self {
        Self {
            intent,
            ..Default::default()
        }
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub reward: f32,
    /// Lives ran out this tick (or earlier)
    pub terminated: bool,
    /// Obstacles that hit the player this tick
    pub collisions: u32,
    /// Obstacles that scrolled off the left edge this tick
    pub passed: u32,
    pub spawned: bool,
}

impl<R: Rng> Episode<R> {
    /// Advance the episode by one tick
    pub fn tick(&mut self, input: &TickInput) -> StepOutcome {
        if self.phase == EpisodePhase::Terminated {
            log::warn!("tick on a terminated episode ignored");
            return StepOutcome {
                reward: 0.0,
                terminated: true,
                collisions: 0,
                passed: 0,
                spawned: false,
            };
        }
        self.ticks += 1;

        // (a) player
        step_player(&mut self.player, input.intent, input.dx, &self.config);

        // (b) spawner
        let spawned = self
            .spawner
            .check(&self.config.spawn, input.elapsed_ms, &mut self.rng);
        if spawned {
            let id = self.next_obstacle_id();
            let obstacle = spawn_obstacle(id, &self.config, &mut self.rng);
            log::debug!(
                "tick {}: spawned obstacle {} (height {}, lift {})",
                self.ticks,
                obstacle.id,
                obstacle.height,
                obstacle.lift
            );
            self.obstacles.push(obstacle);
        }

        // (c) advance and test each obstacle; removals are deferred to (d)
        let mut hits: Vec<usize> = Vec::new();
        let mut passed: Vec<usize> = Vec::new();
        for (index, obstacle) in self.obstacles.iter_mut().enumerate() {
            obstacle.x -= self.config.obstacle_speed;

            if collides(&self.player, obstacle, &self.config) {
                self.player.lives = self.player.lives.saturating_sub(1);
                log::debug!(
                    "tick {}: hit by obstacle {}, {} lives left",
                    self.ticks,
                    obstacle.id,
                    self.player.lives
                );
                if self.player.lives == 0 {
                    self.phase = EpisodePhase::Terminated;
                    hits.push(index);
                    break;
                }
                hits.push(index);
                if self.config.collision == CollisionResolution::StopAtFirst {
                    break;
                }
                continue;
            }

            if obstacle.is_offscreen(&self.config) {
                passed.push(index);
            }
        }

        // (d) remove hit and cleared obstacles; a terminal hit stays on screen
        let terminal_hit = (self.phase == EpisodePhase::Terminated)
            .then(|| hits.last().copied())
            .flatten();
        let mut removals: Vec<usize> = hits
            .iter()
            .copied()
            .filter(|&i| Some(i) != terminal_hit)
            .chain(passed.iter().copied())
            .collect();
        removals.sort_unstable();
        for &index in removals.iter().rev() {
            self.obstacles.remove(index);
        }
        self.score += passed.len() as u64;

        let outcome = StepOutcome {
            reward: self.reward(input.intent, hits.len(), passed.len()),
            terminated: self.phase == EpisodePhase::Terminated,
            collisions: hits.len() as u32,
            passed: passed.len() as u32,
            spawned,
        };
        if outcome.terminated {
            log::info!(
                "Episode over after {} ticks, score {}",
                self.ticks,
                self.score
            );
        }
        outcome
    }

    /// Survival reward minus action cost, plus pass bonuses; any hit overrides it all
    fn reward(&self, intent: Intent, hits: usize, passed: usize) -> f32 {
        let rewards = &self.config.rewards;
        if hits > 0 {
            return rewards.collision_penalty;
        }
        let mut reward = rewards.survival;
        if intent.is_action() {
            reward -= rewards.action_cost;
        }
        reward + rewards.pass_bonus * passed as f32
    }
}
