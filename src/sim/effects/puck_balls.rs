//! Extra balls released from a broken brick

use std::rc::Rc;

use glam::Vec2;

use super::{EffectHandler, EffectKind, SharedHandler};
use crate::assets::{ImageHandle, SoundHandle};
use crate::diagonal_velocity;
use crate::sim::random::SharedRandom;
use crate::sim::world::{GameObject, Layer, ObjectCollection, ObjectId, SharedCollection, Tag};

/// Fixed set of puck balls reused by every trigger in a session
#[derive(Debug, Clone)]
pub struct PuckBallPool {
    ids: Rc<[ObjectId]>,
    size: Vec2,
    image: Option<ImageHandle>,
    sound: Option<SoundHandle>,
}

impl PuckBallPool {
    pub fn allocate(
        objects: &mut dyn ObjectCollection,
        count: usize,
        radius: f32,
        image: Option<ImageHandle>,
        sound: Option<SoundHandle>,
    ) -> Self {
        let ids: Rc<[ObjectId]> = (0..count).map(|_| objects.next_id()).collect();
        Self {
            ids,
            size: Vec2::splat(radius),
            image,
            sound,
        }
    }

    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.ids.contains(&id)
    }

    fn ball(&self, id: ObjectId, center: Vec2, velocity: Vec2) -> GameObject {
        let mut ball = GameObject::new(id, Tag::PuckBall, center, self.size).with_velocity(velocity);
        ball.image = self.image;
        ball.sound = self.sound;
        ball
    }
}

/// Sends every pooled puck ball out of the brick in a random diagonal
pub struct SpawnBallsEffect {
    inner: SharedHandler,
    objects: SharedCollection,
    pool: PuckBallPool,
    speed: f32,
    random: SharedRandom,
}

impl SpawnBallsEffect {
    pub fn new(
        inner: SharedHandler,
        objects: SharedCollection,
        pool: PuckBallPool,
        speed: f32,
        random: SharedRandom,
    ) -> Self {
        Self {
            inner,
            objects,
            pool,
            speed,
            random,
        }
    }
}

impl EffectHandler for SpawnBallsEffect {
    fn on_collision(&self, this: &GameObject, other: &GameObject) {
        self.inner.on_collision(this, other);

        let center = this.center;
        for &id in self.pool.ids() {
            let velocity = {
                let mut random = self.random.borrow_mut();
                let flip_x = random.next_bool();
                let flip_y = random.next_bool();
                diagonal_velocity(self.speed, flip_x, flip_y)
            };

            let mut objects = self.objects.borrow_mut();
            match objects.get_mut(id) {
                Some(ball) => {
                    ball.center = center;
                    ball.velocity = velocity;
                }
                None => {
                    objects.insert(self.pool.ball(id, center, velocity), Layer::Default);
                }
            }
        }
        log::debug!("Puck balls released at ({:.0}, {:.0})", center.x, center.y);
    }

    fn kind(&self) -> EffectKind {
        EffectKind::PuckBalls
    }

    fn inner(&self) -> Option<&SharedHandler> {
        Some(&self.inner)
    }
}
