//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Stable iteration order (by object ID)
//! - Randomness injected through `RandomSource`
//! - No rendering or platform dependencies

pub mod collision;
pub mod counter;
pub mod effects;
pub mod random;
pub mod selector;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{CollisionResult, aabb_collision, reflect_velocity};
pub use counter::{BoundedCounter, Counter, LeaseCounter};
pub use effects::{EffectHandler, EffectKind, SharedHandler};
pub use random::{RandomSource, SharedRandom, entropy_source, seeded_source};
pub use selector::{CompositionSelector, EffectResources};
pub use state::{GamePhase, GameState, Sprites};
pub use tick::{TickInput, tick};
pub use world::{GameObject, Layer, ObjectCollection, ObjectId, SharedCollection, Tag, World};
