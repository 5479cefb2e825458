//! Player motion for one tick
//!
//! Crouching only changes the collision box (see [`Player::hitbox`]); `y` is
//! moved by gravity alone.

use super::intent::Intent;
use super::state::Player;
use crate::config::GameConfig;

/// Advance the player by one tick: intent, gravity, ground clamp, stand re-snap,
/// then horizontal movement (`dx` is always zero outside the interactive loop)
pub fn step_player(player: &mut Player, intent: Intent, dx: f32, config: &GameConfig) {
    apply_intent(player, intent, config);
    apply_gravity(player, config);
    settle_stand(player, config);
    move_horizontal(player, dx, config);
}

/// Crouch/stand bookkeeping and jump gating
pub fn apply_intent(player: &mut Player, intent: Intent, config: &GameConfig) {
    if intent == Intent::Crouch {
        player.is_crouching = true;
    } else {
        if player.is_crouching && player.is_grounded(config) {
            player.just_stood_up = true;
        }
        player.is_crouching = false;
    }

    // No air jumps
    if intent == Intent::Jump && player.is_grounded(config) {
        player.y_velocity = config.jump_velocity;
    }
}

/// Integrate gravity and clamp to the floor
pub fn apply_gravity(player: &mut Player, config: &GameConfig) {
    player.y_velocity += config.gravity;

    // Crouching drops faster, but the boost is not kept in the velocity
    let fall = if player.is_crouching {
        player.y_velocity + config.crouch_fall_boost
    } else {
        player.y_velocity
    };
    player.pos.y += fall;

    if player.pos.y + config.player_size > config.screen_height {
        player.pos.y = config.ground_y();
        player.y_velocity = 0.0;
    }
}

/// Re-snap a player that just stood up to full height on the floor
pub fn settle_stand(player: &mut Player, config: &GameConfig) {
    if player.just_stood_up {
        player.pos.y = config.ground_y();
        player.just_stood_up = false;
    }
}

/// Horizontal movement, clamped to the screen
pub fn move_horizontal(player: &mut Player, dx: f32, config: &GameConfig) {
    player.pos.x = (player.pos.x + dx).clamp(0.0, config.max_player_x());
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grounded() -> (Player, GameConfig) {
        let config = GameConfig::training();
        (Player::new(&config), config)
    }

    #[test]
    fn test_jump_from_ground() {
        let (mut player, config) = grounded();
        apply_intent(&mut player, Intent::Jump, &config);
        assert_eq!(player.y_velocity, -15.0);

        apply_gravity(&mut player, &config);
        assert_eq!(player.y_velocity, -14.5);
        assert_eq!(player.pos.y, 535.5);
    }

    #[test]
    fn test_jump_mid_air_is_ignored() {
        let (mut player, config) = grounded();
        player.pos.y = 400.0;
        player.y_velocity = -3.0;
        apply_intent(&mut player, Intent::Jump, &config);
        assert_eq!(player.y_velocity, -3.0);
    }

    #[test]
    fn test_full_jump_returns_to_ground() {
        let (mut player, config) = grounded();
        step_player(&mut player, Intent::Jump, 0.0, &config);
        let mut peak = player.pos.y;
        let mut ticks = 1;
        while !player.is_grounded(&config) {
            step_player(&mut player, Intent::None, 0.0, &config);
            peak = peak.min(player.pos.y);
            ticks += 1;
            assert!(ticks < 200, "player never landed");
        }
        // Sum of 14.5 + 14.0 + ... + 0.5 above the floor
        assert_eq!(peak, 550.0 - 217.5);
        assert_eq!(ticks, 59);
        // Lands exactly on the floor line, so the clamp has not fired yet
        assert_eq!(player.y_velocity, 14.5);

        step_player(&mut player, Intent::None, 0.0, &config);
        assert_eq!(player.pos.y, 550.0);
        assert_eq!(player.y_velocity, 0.0);
    }

    #[test]
    fn test_crouch_boost_not_persisted() {
        let (mut player, config) = grounded();
        player.pos.y = 300.0;
        player.y_velocity = 1.0;
        step_player(&mut player, Intent::Crouch, 0.0, &config);
        assert!(player.is_crouching);
        assert_eq!(player.y_velocity, 1.5);
        assert_eq!(player.pos.y, 306.5);
    }

    #[test]
    fn test_crouch_does_not_move_player() {
        let (mut player, config) = grounded();
        step_player(&mut player, Intent::Crouch, 0.0, &config);
        assert!(player.is_crouching);
        assert_eq!(player.pos.y, 550.0);
        assert_eq!(player.y_velocity, 0.0);
    }

    #[test]
    fn test_stand_up_on_ground_resnaps() {
        let (mut player, config) = grounded();
        step_player(&mut player, Intent::Crouch, 0.0, &config);

        apply_intent(&mut player, Intent::None, &config);
        assert!(!player.is_crouching);
        assert!(player.just_stood_up);

        apply_gravity(&mut player, &config);
        settle_stand(&mut player, &config);
        assert!(!player.just_stood_up);
        assert_eq!(player.pos.y, 550.0);
    }

    #[test]
    fn test_stand_up_mid_air_sets_no_flag() {
        let (mut player, config) = grounded();
        player.pos.y = 200.0;
        player.is_crouching = true;
        apply_intent(&mut player, Intent::None, &config);
        assert!(!player.is_crouching);
        assert!(!player.just_stood_up);
    }

    #[test]
    fn test_standing_player_never_flags() {
        let (mut player, config) = grounded();
        apply_intent(&mut player, Intent::None, &config);
        assert!(!player.just_stood_up);
    }

    #[test]
    fn test_horizontal_clamp() {
        let (mut player, config) = grounded();
        move_horizontal(&mut player, -500.0, &config);
        assert_eq!(player.pos.x, 0.0);
        move_horizontal(&mut player, 10_000.0, &config);
        assert_eq!(player.pos.x, 750.0);
        move_horizontal(&mut player, -25.0, &config);
        assert_eq!(player.pos.x, 725.0);
    }

    proptest! {
        #[test]
        fn prop_ground_clamp(
            y in -1000.0f32..550.0,
            vy in 0.0f32..400.0,
            crouching in any::<bool>()
        ) {
            let config = GameConfig::training();
            let mut player = Player::new(&config);
            player.pos.y = y;
            player.y_velocity = vy;
            player.is_crouching = crouching;

            let velocity = vy + config.gravity;
            let fall = if crouching { velocity + config.crouch_fall_boost } else { velocity };
            let raw = y + fall;
            apply_gravity(&mut player, &config);

            prop_assert!(player.pos.y + config.player_size <= config.screen_height);
            if raw + config.player_size > config.screen_height {
                prop_assert_eq!(player.y_velocity, 0.0);
                prop_assert_eq!(player.pos.y, config.ground_y());
            } else {
                prop_assert_eq!(player.y_velocity, velocity);
                prop_assert_eq!(player.pos.y, raw);
            }
        }

        #[test]
        fn prop_x_stays_on_screen(dxs in proptest::collection::vec(-900.0f32..900.0, 1..20)) {
            let config = GameConfig::interactive();
            let mut player = Player::new(&config);
            for dx in dxs {
                step_player(&mut player, Intent::None, dx, &config);
                prop_assert!(player.pos.x >= 0.0);
                prop_assert!(player.pos.x <= config.max_player_x());
            }
        }
    }
}
