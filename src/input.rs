//! Keyboard events to per-tick intents
//!
//! The simulation wants exactly one [`Intent`] per tick, while a keyboard
//! delivers press/release edges. Up is edge-triggered (one jump per press),
//! Down is level-triggered (crouch while held).

use serde::{Deserialize, Serialize};

use crate::sim::{Intent, TickInput};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

/// Accumulated keyboard state between ticks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    jump_pending: bool,
    crouch_held: bool,
    /// Horizontal delta per tick; no key drives it yet
    pub dx: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Pressed(Key::Up) => self.jump_pending = true,
            KeyEvent::Pressed(Key::Down) => self.crouch_held = true,
            KeyEvent::Released(Key::Down) => self.crouch_held = false,
            KeyEvent::Released(Key::Up) => {}
        }
    }

    pub fn crouch_held(&self) -> bool {
        self.crouch_held
    }

    /// Intent for the next tick; a pending jump is consumed and wins over crouch
    pub fn next_intent(&mut self) -> Intent {
        if std::mem::take(&mut self.jump_pending) {
            Intent::Jump
        } else if self.crouch_held {
            Intent::Crouch
        } else {
            Intent::None
        }
    }

    /// Full tick input for the interactive loop
    pub fn next_tick_input(&mut self, elapsed_ms: u32) -> TickInput {
        TickInput {
            intent: self.next_intent(),
            dx: self.dx,
            elapsed_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_is_edge_triggered() {
        let mut input = InputState::new();
        input.handle(KeyEvent::Pressed(Key::Up));
        assert_eq!(input.next_intent(), Intent::Jump);
        // Holding Up does not repeat
        assert_eq!(input.next_intent(), Intent::None);
        input.handle(KeyEvent::Released(Key::Up));
        assert_eq!(input.next_intent(), Intent::None);
    }

    #[test]
    fn test_crouch_is_held() {
        let mut input = InputState::new();
        input.handle(KeyEvent::Pressed(Key::Down));
        for _ in 0..5 {
            assert_eq!(input.next_intent(), Intent::Crouch);
        }
        input.handle(KeyEvent::Released(Key::Down));
        assert_eq!(input.next_intent(), Intent::None);
    }

    #[test]
    fn test_jump_while_crouching_then_crouch_resumes() {
        let mut input = InputState::new();
        input.handle(KeyEvent::Pressed(Key::Down));
        input.handle(KeyEvent::Pressed(Key::Up));
        assert_eq!(input.next_intent(), Intent::Jump);
        assert_eq!(input.next_intent(), Intent::Crouch);
    }

    #[test]
    fn test_tick_input_carries_dx_and_time() {
        let mut input = InputState::new();
        input.dx = -3.0;
        let tick = input.next_tick_input(16);
        assert_eq!(tick.dx, -3.0);
        assert_eq!(tick.elapsed_ms, 16);
        assert_eq!(tick.intent, Intent::None);
    }
}
