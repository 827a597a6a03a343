//! Collision detection and response for axis-aligned boxes
//!
//! Every object is a box around its center. A contact reports the axis of
//! least overlap as its normal, which is what the ball bounces off.

use glam::Vec2;

use super::world::GameObject;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal, pointing from the struck box toward the mover
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between box `a` (the mover) and box `b`
///
/// Boxes that only touch along an edge do not collide.
pub fn aabb_collision(a_center: Vec2, a_size: Vec2, b_center: Vec2, b_size: Vec2) -> CollisionResult {
    let delta = a_center - b_center;
    let overlap = (a_size + b_size) / 2.0 - delta.abs();
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return CollisionResult::miss();
    }

    if overlap.x < overlap.y {
        CollisionResult {
            hit: true,
            normal: Vec2::new(delta.x.signum(), 0.0),
            penetration: overlap.x,
        }
    } else {
        CollisionResult {
            hit: true,
            normal: Vec2::new(0.0, delta.y.signum()),
            penetration: overlap.y,
        }
    }
}

/// Check overlap between two game objects
#[inline]
pub fn object_collision(mover: &GameObject, other: &GameObject) -> CollisionResult {
    aabb_collision(mover.center, mover.size, other.center, other.size)
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Bounce a mover off a contact: reflect if it is heading into the surface
/// and push it back out
pub fn bounce(object: &mut GameObject, contact: &CollisionResult) {
    if object.velocity.dot(contact.normal) < 0.0 {
        object.velocity = reflect_velocity(object.velocity, contact.normal);
    }
    object.center += contact.normal * contact.penetration;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::world::{ObjectId, Tag};

    #[test]
    fn test_aabb_collision_from_below() {
        // Ball just under a brick, overlapping by 2 px vertically
        let result = aabb_collision(
            Vec2::new(60.0, 45.0),
            Vec2::splat(20.0),
            Vec2::new(60.0, 30.0),
            Vec2::new(80.0, 15.0),
        );
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::new(0.0, 1.0));
        assert!((result.penetration - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_aabb_collision_from_side() {
        let result = aabb_collision(
            Vec2::new(5.0, 100.0),
            Vec2::splat(20.0),
            Vec2::new(-500.0, 250.0),
            Vec2::new(1000.0, 500.0),
        );
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::new(1.0, 0.0));
        assert!((result.penetration - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_touching_edges_miss() {
        let result = aabb_collision(
            Vec2::new(0.0, 20.0),
            Vec2::splat(20.0),
            Vec2::new(0.0, 0.0),
            Vec2::splat(20.0),
        );
        assert!(!result.hit);
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_bounce_only_reflects_when_approaching() {
        let mut ball = GameObject::new(ObjectId(1), Tag::MainBall, Vec2::new(60.0, 45.0), Vec2::splat(20.0))
            .with_velocity(Vec2::new(200.0, -200.0));
        let contact = CollisionResult {
            hit: true,
            normal: Vec2::new(0.0, 1.0),
            penetration: 2.5,
        };

        bounce(&mut ball, &contact);
        assert_eq!(ball.velocity, Vec2::new(200.0, 200.0));
        assert_eq!(ball.center, Vec2::new(60.0, 47.5));

        // Already leaving: pushed out but not flipped back
        bounce(&mut ball, &contact);
        assert_eq!(ball.velocity, Vec2::new(200.0, 200.0));
    }
}
