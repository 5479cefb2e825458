//! Obstacle spawning
//!
//! The timer is policy-driven ([`SpawnPolicy`]); obstacle geometry is drawn from
//! the episode's injected random source.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::config::{GameConfig, SpawnPolicy};

/// Spawn timer state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawner {
    /// Milliseconds (elapsed policy) or ticks (tick policy) since the last spawn
    pub accumulator: u32,
}

impl Spawner {
    /// Advance the timer; returns true when one obstacle is due.
    ///
    /// At most one spawn per check, and the accumulator restarts from zero
    /// (any surplus is dropped).
    pub fn check<R: Rng>(&mut self, policy: &SpawnPolicy, elapsed_ms: u32, rng: &mut R) -> bool {
        let (advance, threshold) = match policy {
            SpawnPolicy::Elapsed { thresholds_ms } => {
                // Fresh threshold every check
                let threshold = thresholds_ms.choose(rng).copied().unwrap_or(u32::MAX);
                (elapsed_ms, threshold)
            }
            SpawnPolicy::Ticks { every } => (1, *every),
        };

        self.accumulator = self.accumulator.saturating_add(advance);
        if self.accumulator >= threshold {
            self.accumulator = 0;
            true
        } else {
            false
        }
    }
}

/// Draw lift and height, then build an obstacle at the right screen edge
pub fn spawn_obstacle<R: Rng>(id: u32, config: &GameConfig, rng: &mut R) -> Obstacle {
    let lift = config.lift_choices.choose(rng).copied().unwrap_or(0);
    let height = if lift > 0 {
        draw_height(rng, config.elevated_min_height, config.elevated_max_height)
    } else {
        draw_height(rng, config.obstacle_min_height, config.obstacle_max_height)
    };
    Obstacle::new(id, height, lift, config)
}

/// Uniform height between the bounds, in whichever order they were given
fn draw_height<R: Rng>(rng: &mut R, a: u32, b: u32) -> u32 {
    rng.random_range(a.min(b)..=a.max(b))
}
