//! Second paddle that lasts for a fixed number of ball hits

use glam::Vec2;

use super::{EffectHandler, EffectKind, SharedHandler};
use crate::assets::ImageHandle;
use crate::sim::counter::LeaseCounter;
use crate::sim::world::{GameObject, Layer, ObjectCollection, ObjectId, SharedCollection, Tag};

/// The single extra paddle of a session
///
/// Allocated once and toggled in and out of the collection. Clones share the
/// lease.
#[derive(Debug, Clone)]
pub struct ExtraPaddle {
    pub id: ObjectId,
    pub size: Vec2,
    pub image: Option<ImageHandle>,
    pub lease: LeaseCounter,
}

impl ExtraPaddle {
    pub fn allocate(objects: &mut dyn ObjectCollection, size: Vec2, image: Option<ImageHandle>) -> Self {
        Self {
            id: objects.next_id(),
            size,
            image,
            lease: LeaseCounter::new(),
        }
    }

    /// The paddle as a placeable object
    pub fn object(&self, center: Vec2) -> GameObject {
        let mut paddle = GameObject::new(self.id, Tag::ExtraPaddle, center, self.size);
        paddle.image = self.image;
        paddle
    }
}

/// Brings in the extra paddle if it is not already live
pub struct ExtraPaddleEffect {
    inner: SharedHandler,
    objects: SharedCollection,
    paddle: ExtraPaddle,
    initial_position: Vec2,
    lease_bound: i32,
}

impl ExtraPaddleEffect {
    pub fn new(
        inner: SharedHandler,
        objects: SharedCollection,
        paddle: ExtraPaddle,
        initial_position: Vec2,
        lease_bound: i32,
    ) -> Self {
        Self {
            inner,
            objects,
            paddle,
            initial_position,
            lease_bound,
        }
    }
}

impl EffectHandler for ExtraPaddleEffect {
    fn on_collision(&self, this: &GameObject, other: &GameObject) {
        self.inner.on_collision(this, other);

        if self.paddle.lease.remaining() != 0 {
            return;
        }
        let inserted = self
            .objects
            .borrow_mut()
            .insert(self.paddle.object(self.initial_position), Layer::Default);
        self.paddle.lease.renew(self.lease_bound);
        log::debug!(
            "Extra paddle {} (lease {})",
            if inserted { "spawned" } else { "renewed" },
            self.lease_bound
        );
    }

    fn kind(&self) -> EffectKind {
        EffectKind::ExtraPaddle
    }

    fn inner(&self) -> Option<&SharedHandler> {
        Some(&self.inner)
    }
}
