//! Real-time interactive driver
//!
//! Owns an [`Episode`] in the interactive preset and turns key events plus
//! per-frame elapsed time into ticks. Window, drawing and frame pacing belong
//! to whatever embeds this; it reads [`Game::frame_snapshot`] once per frame.

use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::consts::MAX_FRAME_MS;
use crate::input::{InputState, KeyEvent};
use crate::sim::{Episode, Frame, StepOutcome};

/// Game instance holding all interactive state
#[derive(Debug, Clone)]
pub struct Game {
    episode: Episode<Pcg32>,
    input: InputState,
    frames: u64,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig::interactive(), seed)
    }

    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        Self {
            episode: Episode::new(config, seed),
            input: InputState::new(),
            frames: 0,
        }
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        self.input.handle(event);
    }

    /// Horizontal movement per frame (not bound to any key by default)
    pub fn set_horizontal(&mut self, dx: f32) {
        self.input.dx = dx;
    }

    /// Run one frame's tick; `elapsed_ms` feeds the spawner and is capped so a
    /// stalled frame cannot flood the screen
    pub fn update(&mut self, elapsed_ms: u32) -> Option<StepOutcome> {
        if self.episode.is_terminated() {
            return None;
        }
        let input = self.input.next_tick_input(elapsed_ms.min(MAX_FRAME_MS));
        self.frames += 1;
        Some(self.episode.tick(&input))
    }

    pub fn frame_snapshot(&self) -> Frame {
        self.episode.frame()
    }

    pub fn is_over(&self) -> bool {
        self.episode.is_terminated()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn episode(&self) -> &Episode<Pcg32> {
        &self.episode
    }

    /// Start over with the same configuration
    pub fn restart(&mut self) {
        log::info!("Restarting after {} frames", self.frames);
        self.episode.reset();
        self.input = InputState::new();
        self.frames = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::sim::{EpisodePhase, Intent};

    #[test]
    fn test_jump_key_lifts_player() {
        let mut game = Game::new(1);
        game.handle_key(KeyEvent::Pressed(Key::Up));
        game.update(2);
        assert!(game.frame_snapshot().player.top() < 550.0);
    }

    #[test]
    fn test_crouch_key_shrinks_box_until_released() {
        let mut game = Game::new(1);
        game.handle_key(KeyEvent::Pressed(Key::Down));
        game.update(2);
        game.update(2);
        assert_eq!(game.frame_snapshot().player.size.y, 25.0);

        game.handle_key(KeyEvent::Released(Key::Down));
        game.update(2);
        let player = game.frame_snapshot().player;
        assert_eq!(player.size.y, 50.0);
        assert_eq!(player.top(), 550.0);
    }

    #[test]
    fn test_elapsed_time_is_capped() {
        let mut game = Game::new(1);
        // A single huge frame spawns at most one obstacle
        let outcome = game.update(10_000).unwrap();
        assert!(outcome.spawned);
        assert_eq!(game.frame_snapshot().obstacles.len(), 1);
    }

    #[test]
    fn test_game_over_stops_updates_until_restart() {
        let config = GameConfig {
            lives: 1,
            ..GameConfig::interactive()
        };
        let mut game = Game::with_config(config, 5);
        let mut frames = 0;
        while !game.is_over() {
            game.update(3);
            frames += 1;
            assert!(frames < 100_000, "game never ended");
        }
        assert_eq!(game.frame_snapshot().phase, EpisodePhase::Terminated);
        assert!(game.update(3).is_none());

        game.restart();
        assert!(!game.is_over());
        assert_eq!(game.frames(), 0);
        assert_eq!(game.frame_snapshot().lives, 1);
        assert_eq!(game.input.next_intent(), Intent::None);
    }

    #[test]
    fn test_horizontal_movement_is_clamped() {
        let mut game = Game::new(1);
        game.set_horizontal(-40.0);
        for _ in 0..5 {
            game.update(0);
        }
        assert_eq!(game.frame_snapshot().player.left(), 0.0);
    }
}
