//! Demo/idle player
//!
//! Picks intents by looking ahead: it replays the nearest obstacle against
//! candidate trajectories (stand, crouch, jump now) using the real physics and
//! collision code, and takes the first one that clears. Used by the headless
//! CLI and as a smarter-than-idle baseline in tests.

use rand::Rng;

use crate::config::GameConfig;
use crate::input::{Key, KeyEvent};
use crate::sim::{Episode, Intent, Obstacle, Player, collides, step_player};

/// Longest trajectory replayed per candidate
const LOOKAHEAD_TICKS: usize = 256;

#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    /// Intent for the next tick of `episode`
    pub fn choose<R: Rng>(&self, episode: &Episode<R>) -> Intent {
        let config = episode.config();
        let player = episode.player();

        // Nothing useful to do mid-air
        if !player.is_grounded(config) {
            return Intent::None;
        }

        let Some(threat) = nearest_ahead(player, episode.obstacles(), config) else {
            return Intent::None;
        };

        if clears(player, threat, config, |_| Intent::None) {
            Intent::None
        } else if clears(player, threat, config, |_| Intent::Crouch) {
            Intent::Crouch
        } else if clears(player, threat, config, |tick| {
            if tick == 0 { Intent::Jump } else { Intent::None }
        }) {
            Intent::Jump
        } else {
            // Too early to jump; wait for the window
            Intent::None
        }
    }

    /// Key edges that make an [`InputState`](crate::input::InputState) produce `intent`
    pub fn key_events(intent: Intent, crouch_held: bool) -> Vec<KeyEvent> {
        match intent {
            Intent::Jump => {
                let mut events = vec![
                    KeyEvent::Pressed(Key::Up),
                    KeyEvent::Released(Key::Up),
                ];
                if crouch_held {
                    events.push(KeyEvent::Released(Key::Down));
                }
                events
            }
            Intent::Crouch if !crouch_held => vec![KeyEvent::Pressed(Key::Down)],
            Intent::None if crouch_held => vec![KeyEvent::Released(Key::Down)],
            _ => Vec::new(),
        }
    }
}

/// Closest obstacle the player has not yet fully passed
fn nearest_ahead<'a>(
    player: &Player,
    obstacles: &'a [Obstacle],
    config: &GameConfig,
) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .filter(|o| o.x + config.obstacle_width > player.pos.x)
        .min_by(|a, b| a.x.total_cmp(&b.x))
}

/// Replay `plan` against one obstacle; true if it scrolls past the player
/// without a hit. A jump must still be airborne when that happens.
fn clears(
    player: &Player,
    obstacle: &Obstacle,
    config: &GameConfig,
    plan: impl Fn(usize) -> Intent,
) -> bool {
    let mut player = player.clone();
    let mut obstacle = obstacle.clone();
    let airborne = plan(0) == Intent::Jump;

    for tick in 0..LOOKAHEAD_TICKS {
        step_player(&mut player, plan(tick), 0.0, config);
        obstacle.x -= config.obstacle_speed;
        if collides(&player, &obstacle, config) {
            return false;
        }
        if obstacle.x + config.obstacle_width <= player.pos.x {
            return true;
        }
        // Landed before the obstacle went by: jumped too early
        if airborne && player.is_grounded(config) {
            return false;
        }
    }
    false
}
