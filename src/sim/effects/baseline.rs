//! Remove the struck brick and count it

use super::{EffectHandler, EffectKind};
use crate::sim::counter::Counter;
use crate::sim::world::{GameObject, Layer, SharedCollection, Tag};

/// Innermost handler of every chain
pub struct BaselineRemoveEffect {
    objects: SharedCollection,
    bricks: Counter,
}

impl BaselineRemoveEffect {
    pub fn new(objects: SharedCollection, bricks: Counter) -> Self {
        Self { objects, bricks }
    }
}

impl EffectHandler for BaselineRemoveEffect {
    fn on_collision(&self, this: &GameObject, _other: &GameObject) {
        let mut objects = self.objects.borrow_mut();
        // Only a brick that was actually present counts
        if objects.remove(this.id, Layer::StaticObjects) {
            self.bricks.decrement();
        }
        // Hearts reuse this handler to remove themselves; they never count
        if this.tag == Tag::Heart {
            objects.remove(this.id, Layer::Default);
        }
    }

    fn kind(&self) -> EffectKind {
        EffectKind::Baseline
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::effects::fixtures::Fixture;
    use crate::sim::world::ObjectCollection;

    #[test]
    fn test_struck_brick_removed_and_counted() {
        let fx = Fixture::new(8);
        let brick = fx.add_brick(Vec2::new(60.0, 30.0));
        let ball = fx.main_ball();
        let effect = BaselineRemoveEffect::new(fx.objects(), fx.bricks.clone());

        effect.on_collision(&brick, &ball);

        assert_eq!(fx.bricks.value(), 7);
        assert!(!fx.contains(brick.id));
    }

    #[test]
    fn test_second_hit_is_not_counted() {
        let fx = Fixture::new(8);
        let brick = fx.add_brick(Vec2::new(60.0, 30.0));
        let ball = fx.main_ball();
        let effect = BaselineRemoveEffect::new(fx.objects(), fx.bricks.clone());

        effect.on_collision(&brick, &ball);
        effect.on_collision(&brick, &ball);

        assert_eq!(fx.bricks.value(), 7);
    }

    #[test]
    fn test_heart_removed_without_counting() {
        let fx = Fixture::new(8);
        let heart = {
            let mut world = fx.world.borrow_mut();
            let id = world.next_id();
            let heart = GameObject::new(id, Tag::Heart, Vec2::new(100.0, 100.0), Vec2::splat(20.0));
            world.insert(heart.clone(), Layer::Default);
            heart
        };
        let paddle = fx.paddle();
        let effect = BaselineRemoveEffect::new(fx.objects(), fx.bricks.clone());

        effect.on_collision(&heart, &paddle);

        assert!(!fx.contains(heart.id));
        assert_eq!(fx.bricks.value(), 8);
    }

    #[test]
    fn test_non_brick_in_default_layer_left_alone() {
        let fx = Fixture::new(8);
        let paddle = fx.paddle();
        fx.world.borrow_mut().insert(paddle.clone(), Layer::Default);
        let ball = fx.main_ball();
        let effect = BaselineRemoveEffect::new(fx.objects(), fx.bricks.clone());

        effect.on_collision(&paddle, &ball);

        assert!(fx.contains(paddle.id));
        assert_eq!(fx.bricks.value(), 8);
    }
}
