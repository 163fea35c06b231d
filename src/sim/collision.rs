//! Axis-aligned box overlap tests
//!
//! Everything in the runner is a rectangle: the rocket, the obstacles and the
//! pickups. Boxes that only touch along an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Player, PowerUp};

/// Axis-aligned bounding box, screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// True if the boxes share any area
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        a_max.x > other.min.x
            && self.min.x < b_max.x
            && a_max.y > other.min.y
            && self.min.y < b_max.y
    }
}

/// Player against an obstacle
#[inline]
pub fn hits_obstacle(player: &Player, obstacle: &Obstacle) -> bool {
    player.bounds().overlaps(&obstacle.bounds())
}

/// Player against a pickup box
#[inline]
pub fn touches_powerup(player: &Player, powerup: &PowerUp) -> bool {
    player.bounds().overlaps(&powerup.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ObstacleKind, PowerUpKind};
    use crate::tuning::Tuning;

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap_and_edges() {
        let a = boxed(100.0, 400.0, 50.0, 50.0);
        assert!(a.overlaps(&boxed(149.0, 449.0, 50.0, 50.0)));
        assert!(a.overlaps(&boxed(120.0, 410.0, 5.0, 5.0)));
        // Touching edges only
        assert!(!a.overlaps(&boxed(150.0, 400.0, 50.0, 50.0)));
        assert!(!a.overlaps(&boxed(100.0, 350.0, 50.0, 50.0)));
        // Symmetric
        let b = boxed(60.0, 380.0, 50.0, 50.0);
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn test_player_vs_obstacle() {
        let tuning = Tuning::default();
        let player = Player { y: 400.0, vel_y: 0.0 };
        let mut obstacle = Obstacle::new(1, ObstacleKind::Regular, 120.0, &tuning);
        assert!(hits_obstacle(&player, &obstacle));

        obstacle.pos.x = 150.0;
        assert!(!hits_obstacle(&player, &obstacle));

        // Jumped clear of a ground obstacle
        let airborne = Player { y: 340.0, vel_y: -3.0 };
        obstacle.pos.x = 120.0;
        assert!(!hits_obstacle(&airborne, &obstacle));
    }

    #[test]
    fn test_player_vs_pickup() {
        let player = Player { y: 300.0, vel_y: 0.0 };
        let pickup = PowerUp {
            id: 1,
            kind: PowerUpKind::Invincible,
            pos: Vec2::new(130.0, 330.0),
        };
        assert!(touches_powerup(&player, &pickup));

        let far = PowerUp {
            pos: Vec2::new(130.0, 350.0),
            ..pickup
        };
        assert!(!touches_powerup(&player, &far));
    }
}
