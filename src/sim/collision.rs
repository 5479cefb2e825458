//! Axis-aligned collision between the player and obstacles
//!
//! Overlap is strict: boxes that only share an edge do not collide.

use super::state::{Obstacle, Player, Rect};
use crate::config::GameConfig;

impl Rect {
    /// Strict AABB overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Whether the player's effective box (halved when crouching) overlaps the obstacle
pub fn collides(player: &Player, obstacle: &Obstacle, config: &GameConfig) -> bool {
    player.hitbox(config).overlaps(&obstacle.rect(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn setup() -> (Player, GameConfig) {
        let config = GameConfig::training();
        (Player::new(&config), config)
    }

    fn obstacle_at(x: f32, height: u32, lift: u32, config: &GameConfig) -> Obstacle {
        let mut obstacle = Obstacle::new(1, height, lift, config);
        obstacle.x = x;
        obstacle
    }

    #[test]
    fn test_ground_obstacle_hits_standing_player() {
        let (player, config) = setup();
        let obstacle = obstacle_at(120.0, 100, 0, &config);
        assert!(collides(&player, &obstacle, &config));
    }

    #[test]
    fn test_edge_touch_is_not_collision() {
        let (player, config) = setup();
        // Obstacle's left edge on the player's right edge
        let obstacle = obstacle_at(150.0, 100, 0, &config);
        assert!(!collides(&player, &obstacle, &config));
        // Obstacle's right edge on the player's left edge
        let obstacle = obstacle_at(50.0, 100, 0, &config);
        assert!(!collides(&player, &obstacle, &config));
        // One unit inside overlaps
        let obstacle = obstacle_at(149.0, 100, 0, &config);
        assert!(collides(&player, &obstacle, &config));
    }

    #[test]
    fn test_vertical_edge_touch_is_not_collision() {
        let (mut player, config) = setup();
        // Obstacle bottom at 540, player top at 540
        player.pos.y = 540.0;
        let obstacle = obstacle_at(100.0, 200, 60, &config);
        assert!(!collides(&player, &obstacle, &config));
        player.pos.y = 539.0;
        assert!(collides(&player, &obstacle, &config));
    }

    #[test]
    fn test_crouch_ducks_under_lifted_obstacle() {
        let (mut player, config) = setup();
        // Bottom edge at 565: overlaps the standing box (550..600) only in its upper half
        let obstacle = obstacle_at(110.0, 200, 35, &config);
        assert!(collides(&player, &obstacle, &config));

        player.is_crouching = true;
        assert!(!collides(&player, &obstacle, &config));
    }

    #[test]
    fn test_crouch_does_not_dodge_ground_obstacle() {
        let (mut player, config) = setup();
        player.is_crouching = true;
        let obstacle = obstacle_at(110.0, 50, 0, &config);
        assert!(collides(&player, &obstacle, &config));
    }

    #[test]
    fn test_high_lift_clears_standing_player() {
        let (player, config) = setup();
        // Bottom edge at 540, above the standing box
        let obstacle = obstacle_at(110.0, 300, 60, &config);
        assert!(!collides(&player, &obstacle, &config));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -100.0f32..900.0, ay in -100.0f32..700.0,
            aw in 1.0f32..300.0, ah in 1.0f32..300.0,
            bx in -100.0f32..900.0, by in -100.0f32..700.0,
            bw in 1.0f32..300.0, bh in 1.0f32..300.0
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_adjacent_boxes_never_collide(
            y in 200.0f32..550.0,
            height in 50u32..300,
            lift in 0u32..80
        ) {
            let (mut player, config) = setup();
            player.pos.y = y;
            let right_neighbour = obstacle_at(player.pos.x + config.player_size, height, lift, &config);
            let left_neighbour = obstacle_at(player.pos.x - config.obstacle_width, height, lift, &config);
            prop_assert!(!collides(&player, &right_neighbour, &config));
            prop_assert!(!collides(&player, &left_neighbour, &config));
        }
    }
}
