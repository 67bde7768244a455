//! Axis-aligned hitbox collision
//!
//! World space is y-up with the ground at y = 0. Hitboxes are a configured
//! sub-region of each entity's visual bounds, never the full sprite.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Player};
use crate::tuning::{HitboxInset, Tuning};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box with its bottom-left corner at (`x`, `y`)
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Shrink each edge inward by the inset
    pub fn inset(&self, inset: &HitboxInset) -> Self {
        Self {
            min: Vec2::new(self.min.x + inset.left, self.min.y + inset.bottom),
            max: Vec2::new(self.max.x - inset.right, self.max.y - inset.top),
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    pub fn top(&self) -> f32 {
        self.max.y
    }

    /// Boxes intersect unless one lies entirely to one side of the other.
    /// Shared edges count as contact.
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }
}

/// Symmetric collision test between two hitboxes
#[inline]
pub fn is_colliding(a: &Aabb, b: &Aabb) -> bool {
    a.intersects(b)
}

/// Player hitbox at its current height
pub fn player_hitbox(player: &Player, tuning: &Tuning) -> Aabb {
    let geometry = &tuning.player;
    Aabb::from_rect(tuning.player_x, player.y, geometry.width, geometry.height)
        .inset(&geometry.hitbox)
}

/// Obstacle hitbox at its current position
pub fn obstacle_hitbox(obstacle: &Obstacle, tuning: &Tuning) -> Aabb {
    let geometry = tuning.geometry(obstacle.kind);
    Aabb::from_rect(obstacle.x, obstacle.elevation, geometry.width, geometry.height)
        .inset(&geometry.hitbox)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;
    use proptest::prelude::*;

    fn obstacle_at(x: f32) -> Obstacle {
        Obstacle {
            id: 1,
            kind: ObstacleKind::Crystal,
            x,
            elevation: 0.0,
            created_at: 0.0,
        }
    }

    #[test]
    fn test_overlap_and_separation() {
        let a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Aabb::from_rect(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Aabb::from_rect(11.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Aabb::from_rect(0.0, 10.5, 10.0, 10.0)));
        // Touching edges are contact
        assert!(a.intersects(&Aabb::from_rect(10.0, 0.0, 10.0, 10.0)));
        // Containment
        assert!(a.intersects(&Aabb::from_rect(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_inset_shrinks_box() {
        let inset = HitboxInset {
            left: 1.0,
            right: 2.0,
            top: 3.0,
            bottom: 4.0,
        };
        let b = Aabb::from_rect(0.0, 0.0, 10.0, 20.0).inset(&inset);
        assert_eq!(b.left(), 1.0);
        assert_eq!(b.right(), 8.0);
        assert_eq!(b.bottom(), 4.0);
        assert_eq!(b.top(), 17.0);
    }

    #[test]
    fn test_grounded_player_hits_obstacle_in_front() {
        let tuning = Tuning::default();
        let player = Player::default();
        let pbox = player_hitbox(&player, &tuning);
        let near = obstacle_hitbox(&obstacle_at(tuning.player_x + 40.0), &tuning);
        let far = obstacle_hitbox(&obstacle_at(tuning.player_x + 200.0), &tuning);
        assert!(is_colliding(&pbox, &near));
        assert!(!is_colliding(&pbox, &far));
    }

    #[test]
    fn test_visual_overlap_without_hitbox_overlap() {
        let tuning = Tuning::default();
        let player = Player::default();
        // Sprites overlap by a few pixels but hitbox insets keep them apart
        let x = tuning.player_x + tuning.player.width - 5.0;
        let pbox = player_hitbox(&player, &tuning);
        assert!(!is_colliding(&pbox, &obstacle_hitbox(&obstacle_at(x), &tuning)));
    }

    #[test]
    fn test_high_jump_clears_obstacle() {
        let tuning = Tuning::default();
        let player = Player {
            y: 80.0,
            ..Player::default()
        };
        let pbox = player_hitbox(&player, &tuning);
        let obstacle = obstacle_hitbox(&obstacle_at(tuning.player_x + 30.0), &tuning);
        assert!(!is_colliding(&pbox, &obstacle));
    }

    fn arb_box() -> impl Strategy<Value = Aabb> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Aabb::from_rect(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(is_colliding(&a, &b), is_colliding(&b, &a));
        }

        #[test]
        fn prop_box_collides_with_itself(a in arb_box()) {
            prop_assert!(is_colliding(&a, &a));
        }
    }
}
