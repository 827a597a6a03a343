//! Falling heart that grants a life when caught

use std::rc::Rc;

use glam::Vec2;

use super::{BaselineRemoveEffect, EffectHandler, EffectKind, SharedHandler};
use crate::assets::ImageHandle;
use crate::sim::counter::{BoundedCounter, Counter};
use crate::sim::world::{GameObject, Layer, SharedCollection, Tag};

/// Drops a fresh heart from the broken brick
pub struct SpawnLifeEffect {
    inner: SharedHandler,
    objects: SharedCollection,
    lives: BoundedCounter,
    bricks: Counter,
    heart_size: Vec2,
    heart_image: Option<ImageHandle>,
    fall_speed: f32,
}

impl SpawnLifeEffect {
    pub fn new(
        inner: SharedHandler,
        objects: SharedCollection,
        lives: BoundedCounter,
        bricks: Counter,
        heart_size: Vec2,
        heart_image: Option<ImageHandle>,
        fall_speed: f32,
    ) -> Self {
        Self {
            inner,
            objects,
            lives,
            bricks,
            heart_size,
            heart_image,
            fall_speed,
        }
    }
}

impl EffectHandler for SpawnLifeEffect {
    fn on_collision(&self, this: &GameObject, other: &GameObject) {
        self.inner.on_collision(this, other);

        let remove: SharedHandler = Rc::new(BaselineRemoveEffect::new(
            self.objects.clone(),
            self.bricks.clone(),
        ));
        let catch: SharedHandler = Rc::new(HeartCatchEffect::new(remove, self.lives.clone()));

        let mut objects = self.objects.borrow_mut();
        let id = objects.next_id();
        let mut heart = GameObject::new(id, Tag::Heart, this.center, self.heart_size)
            .with_velocity(Vec2::new(0.0, self.fall_speed))
            .with_handler(catch);
        heart.image = self.heart_image;
        objects.insert(heart, Layer::Default);
        log::debug!("Heart {:?} dropped", id);
    }

    fn kind(&self) -> EffectKind {
        EffectKind::Life
    }

    fn inner(&self) -> Option<&SharedHandler> {
        Some(&self.inner)
    }
}

/// Handler carried by a heart: caught by the main paddle, it adds a life
pub struct HeartCatchEffect {
    inner: SharedHandler,
    lives: BoundedCounter,
}

impl HeartCatchEffect {
    pub fn new(inner: SharedHandler, lives: BoundedCounter) -> Self {
        Self { inner, lives }
    }
}

impl EffectHandler for HeartCatchEffect {
    fn on_collision(&self, this: &GameObject, other: &GameObject) {
        if other.tag != Tag::Paddle {
            return;
        }
        self.inner.on_collision(this, other);
        self.lives.increment();
        log::debug!("Heart caught, lives {}", self.lives.value());
    }

    fn kind(&self) -> EffectKind {
        EffectKind::HeartCatch
    }

    fn inner(&self) -> Option<&SharedHandler> {
        Some(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::fixtures::Fixture;
    use crate::sim::world::ObjectCollection;

    fn spawn_effect(fx: &Fixture, lives: &BoundedCounter) -> SpawnLifeEffect {
        let base: SharedHandler = Rc::new(BaselineRemoveEffect::new(fx.objects(), fx.bricks.clone()));
        SpawnLifeEffect::new(
            base,
            fx.objects(),
            lives.clone(),
            fx.bricks.clone(),
            Vec2::splat(20.0),
            None,
            100.0,
        )
    }

    fn only_heart(fx: &Fixture) -> GameObject {
        let world = fx.world.borrow();
        let ids = world.ids_with_tag(Tag::Heart);
        assert_eq!(ids.len(), 1);
        world.get(ids[0]).cloned().expect("heart present")
    }

    #[test]
    fn test_heart_falls_from_brick_center() {
        let fx = Fixture::new(8);
        let lives = BoundedCounter::new(3, 4);
        let effect = spawn_effect(&fx, &lives);
        let brick = fx.add_brick(Vec2::new(60.0, 30.0));

        effect.on_collision(&brick, &fx.main_ball());

        let heart = only_heart(&fx);
        assert_eq!(heart.center, Vec2::new(60.0, 30.0));
        assert_eq!(heart.velocity, Vec2::new(0.0, 100.0));
        assert_eq!(fx.world.borrow().layer_of(heart.id), Some(Layer::Default));
        assert_eq!(fx.bricks.value(), 7);
        assert_eq!(lives.value(), 3);
    }

    #[test]
    fn test_each_trigger_drops_a_new_heart() {
        let fx = Fixture::new(8);
        let lives = BoundedCounter::new(3, 4);
        let effect = spawn_effect(&fx, &lives);
        let ball = fx.main_ball();

        effect.on_collision(&fx.add_brick(Vec2::new(60.0, 30.0)), &ball);
        effect.on_collision(&fx.add_brick(Vec2::new(160.0, 30.0)), &ball);

        assert_eq!(fx.count(Tag::Heart), 2);
    }

    #[test]
    fn test_caught_heart_adds_life_and_disappears() {
        let fx = Fixture::new(8);
        let lives = BoundedCounter::new(2, 4);
        let effect = spawn_effect(&fx, &lives);
        effect.on_collision(&fx.add_brick(Vec2::new(60.0, 30.0)), &fx.main_ball());
        let heart = only_heart(&fx);
        let handler = heart.handler.clone().expect("heart carries a handler");

        handler.on_collision(&heart, &fx.paddle());

        assert_eq!(lives.value(), 3);
        assert!(!fx.contains(heart.id));
        assert_eq!(fx.bricks.value(), 7);
    }

    #[test]
    fn test_heart_at_full_lives_is_clamped() {
        let fx = Fixture::new(8);
        let lives = BoundedCounter::new(4, 4);
        let effect = spawn_effect(&fx, &lives);
        effect.on_collision(&fx.add_brick(Vec2::new(60.0, 30.0)), &fx.main_ball());
        let heart = only_heart(&fx);
        let handler = heart.handler.clone().expect("heart carries a handler");

        handler.on_collision(&heart, &fx.paddle());

        assert_eq!(lives.value(), 4);
        assert_eq!(fx.count(Tag::Heart), 0);
    }

    #[test]
    fn test_heart_ignores_everything_but_main_paddle() {
        let fx = Fixture::new(8);
        let lives = BoundedCounter::new(2, 4);
        let effect = spawn_effect(&fx, &lives);
        effect.on_collision(&fx.add_brick(Vec2::new(60.0, 30.0)), &fx.main_ball());
        let heart = only_heart(&fx);
        let handler = heart.handler.clone().expect("heart carries a handler");

        let mut extra = fx.paddle();
        extra.tag = Tag::ExtraPaddle;
        handler.on_collision(&heart, &extra);
        handler.on_collision(&heart, &fx.main_ball());

        assert_eq!(lives.value(), 2);
        assert!(fx.contains(heart.id));
        assert_eq!(handler.chain(), vec![EffectKind::Baseline, EffectKind::HeartCatch]);
    }
}
