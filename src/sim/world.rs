//! Active-object collection
//!
//! Objects are identified by [`ObjectId`]; membership is by identity, so
//! inserting an object that is already present changes nothing. Each object
//! lives in exactly one [`Layer`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::counter::Counter;
use super::effects::SharedHandler;
use crate::assets::{ImageHandle, SoundHandle};

/// Stable object identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Rendering layer an object is registered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    Background,
    /// Bricks
    StaticObjects,
    /// Balls, paddles, pickups, borders
    Default,
    Ui,
}

/// What an object is, for collision filtering and effect checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    MainBall,
    PuckBall,
    Paddle,
    ExtraPaddle,
    Brick,
    /// Falling life pickup
    Heart,
    Border,
}

impl Tag {
    #[inline]
    pub fn is_ball(self) -> bool {
        matches!(self, Tag::MainBall | Tag::PuckBall)
    }

    /// Whether two tags take part in collisions with each other
    pub fn collides_with(self, other: Tag) -> bool {
        match (self, other) {
            // Hearts only ever touch the main paddle
            (Tag::Heart, t) | (t, Tag::Heart) => t == Tag::Paddle,
            (a, b) if a.is_ball() => {
                matches!(b, Tag::Paddle | Tag::ExtraPaddle | Tag::Brick | Tag::Border)
            }
            (a, b) if b.is_ball() => {
                matches!(a, Tag::Paddle | Tag::ExtraPaddle | Tag::Brick | Tag::Border)
            }
            _ => false,
        }
    }
}

/// An entity in the play field
#[derive(Clone)]
pub struct GameObject {
    pub id: ObjectId,
    pub tag: Tag,
    pub center: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub image: Option<ImageHandle>,
    /// Played by the presentation layer on every bounce
    pub sound: Option<SoundHandle>,
    /// Collisions this object has taken part in (shared with observers)
    pub hits: Counter,
    /// Runs when this object is struck by something it collides with
    pub handler: Option<SharedHandler>,
}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("center", &self.center)
            .field("size", &self.size)
            .field("velocity", &self.velocity)
            .field("hits", &self.hits.value())
            .field("handler", &self.handler.as_ref().map(|h| h.chain()))
            .finish()
    }
}

impl GameObject {
    pub fn new(id: ObjectId, tag: Tag, center: Vec2, size: Vec2) -> Self {
        Self {
            id,
            tag,
            center,
            size,
            velocity: Vec2::ZERO,
            image: None,
            sound: None,
            hits: Counter::new(0),
            handler: None,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_image(mut self, image: ImageHandle) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_sound(mut self, sound: SoundHandle) -> Self {
        self.sound = Some(sound);
        self
    }

    pub fn with_hits(mut self, hits: Counter) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_handler(mut self, handler: SharedHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.center - self.size / 2.0
    }

    #[inline]
    pub fn bottom_right(&self) -> Vec2 {
        self.center + self.size / 2.0
    }

    pub fn set_top_left_x(&mut self, x: f32) {
        self.center.x = x + self.size.x / 2.0;
    }
}

/// Insert/remove-by-identity object collection
///
/// Effects see the play field only through this trait.
pub trait ObjectCollection {
    /// Allocate a fresh identity
    fn next_id(&mut self) -> ObjectId;
    /// Add an object to `layer`; false (and no change) if the id is already present
    fn insert(&mut self, object: GameObject, layer: Layer) -> bool;
    /// Remove an object from `layer`; true iff it was present in that layer
    fn remove(&mut self, id: ObjectId, layer: Layer) -> bool;
    fn contains(&self, id: ObjectId) -> bool;
    fn get(&self, id: ObjectId) -> Option<&GameObject>;
    fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject>;
}

/// Collection handle shared by effects
pub type SharedCollection = Rc<RefCell<dyn ObjectCollection>>;

#[derive(Debug, Clone)]
struct Entry {
    layer: Layer,
    object: GameObject,
}

/// In-memory collection, iterated in id order
#[derive(Debug, Default)]
pub struct World {
    objects: BTreeMap<ObjectId, Entry>,
    next_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> Rc<RefCell<World>> {
        Rc::new(RefCell::new(self))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn layer_of(&self, id: ObjectId) -> Option<Layer> {
        self.objects.get(&id).map(|e| e.layer)
    }

    pub fn objects(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.values().map(|e| &e.object)
    }

    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.objects.values_mut().map(|e| &mut e.object)
    }

    pub fn count_tag(&self, tag: Tag) -> usize {
        self.objects().filter(|o| o.tag == tag).count()
    }

    pub fn ids_with_tag(&self, tag: Tag) -> Vec<ObjectId> {
        self.objects()
            .filter(|o| o.tag == tag)
            .map(|o| o.id)
            .collect()
    }

    /// Advance every object by its velocity
    pub fn integrate(&mut self, dt: f32) {
        for object in self.objects_mut() {
            object.center += object.velocity * dt;
        }
    }

    /// Remove every object whose top-left corner left the play field
    ///
    /// Anything below the window bottom is gone; the other three sides allow
    /// `margin` of slack so off-screen borders survive.
    pub fn sweep_out_of_bounds(&mut self, window: Vec2, margin: f32) -> Vec<ObjectId> {
        let gone: Vec<ObjectId> = self
            .objects()
            .filter(|o| is_out_of_bounds(o, window, margin))
            .map(|o| o.id)
            .collect();
        for id in &gone {
            self.objects.remove(id);
        }
        if !gone.is_empty() {
            log::debug!("Swept {} object(s) out of bounds", gone.len());
        }
        gone
    }
}

/// True once an object's top-left corner is outside the play field
pub fn is_out_of_bounds(object: &GameObject, window: Vec2, margin: f32) -> bool {
    let top_left = object.top_left();
    top_left.y > window.y
        || top_left.y + margin < 0.0
        || top_left.x - margin > window.x
        || top_left.x + margin < 0.0
}

impl ObjectCollection for World {
    fn next_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, object: GameObject, layer: Layer) -> bool {
        if self.objects.contains_key(&object.id) {
            return false;
        }
        self.objects.insert(object.id, Entry { layer, object });
        true
    }

    fn remove(&mut self, id: ObjectId, layer: Layer) -> bool {
        match self.objects.get(&id) {
            Some(entry) if entry.layer == layer => {
                self.objects.remove(&id);
                true
            }
            _ => false,
        }
    }

    fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(&id).map(|e| &e.object)
    }

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(&id).map(|e| &mut e.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(world: &mut World) -> GameObject {
        let id = world.next_id();
        GameObject::new(id, Tag::MainBall, Vec2::new(350.0, 250.0), Vec2::splat(20.0))
    }

    #[test]
    fn test_insert_is_by_identity() {
        let mut world = World::new();
        let b = ball(&mut world);
        assert!(world.insert(b.clone(), Layer::Default));
        assert!(!world.insert(b, Layer::Default));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_remove_respects_layer() {
        let mut world = World::new();
        let id = world.next_id();
        let brick = GameObject::new(id, Tag::Brick, Vec2::new(50.0, 20.0), Vec2::new(80.0, 15.0));
        world.insert(brick, Layer::StaticObjects);

        assert!(!world.remove(id, Layer::Default));
        assert!(world.contains(id));
        assert!(world.remove(id, Layer::StaticObjects));
        assert!(!world.remove(id, Layer::StaticObjects));
    }

    #[test]
    fn test_sweep_out_of_bounds() {
        let window = Vec2::new(700.0, 500.0);
        let mut world = World::new();

        let mut fallen = ball(&mut world);
        fallen.center = Vec2::new(300.0, 530.0);
        let fallen_id = fallen.id;
        world.insert(fallen, Layer::Default);

        // Left border sits just off-screen and must survive
        let border_id = world.next_id();
        world.insert(
            GameObject::new(border_id, Tag::Border, Vec2::new(-500.0, 250.0), Vec2::new(1000.0, 500.0)),
            Layer::Default,
        );

        let inside = ball(&mut world);
        let inside_id = inside.id;
        world.insert(inside, Layer::Default);

        let gone = world.sweep_out_of_bounds(window, 1000.0);
        assert_eq!(gone, vec![fallen_id]);
        assert!(world.contains(border_id));
        assert!(world.contains(inside_id));
    }

    #[test]
    fn test_tag_collision_filter() {
        assert!(Tag::Heart.collides_with(Tag::Paddle));
        assert!(!Tag::Heart.collides_with(Tag::ExtraPaddle));
        assert!(!Tag::Heart.collides_with(Tag::MainBall));
        assert!(Tag::PuckBall.collides_with(Tag::ExtraPaddle));
        assert!(Tag::Brick.collides_with(Tag::MainBall));
        assert!(!Tag::Brick.collides_with(Tag::Paddle));
        assert!(!Tag::MainBall.collides_with(Tag::PuckBall));
    }

    #[test]
    fn test_integrate_moves_objects() {
        let mut world = World::new();
        let b = ball(&mut world).with_velocity(Vec2::new(60.0, -60.0));
        let id = b.id;
        world.insert(b, Layer::Default);
        world.integrate(0.5);
        let moved = world.get(id).map(|o| o.center);
        assert_eq!(moved, Some(Vec2::new(380.0, 220.0)));
    }
}
