//! Collision effects
//!
//! Every brick carries one [`EffectHandler`]. Handlers compose by wrapping:
//! a wrapper first hands the collision to the handler it owns, then does its
//! own thing. The innermost handler is always a [`BaselineRemoveEffect`], so
//! the brick is removed and counted no matter what is stacked on top.

pub mod baseline;
pub mod camera;
pub mod extra_paddle;
pub mod life;
pub mod puck_balls;

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::world::GameObject;

pub use baseline::BaselineRemoveEffect;
pub use camera::{CameraController, CameraState, CameraZoom, CameraZoomEffect};
pub use extra_paddle::{ExtraPaddle, ExtraPaddleEffect};
pub use life::{HeartCatchEffect, SpawnLifeEffect};
pub use puck_balls::{PuckBallPool, SpawnBallsEffect};

/// Effect kinds, also the buckets of the selector's draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Marker that stacks several effects on one brick; never in a chain
    Double,
    Camera,
    ExtraPaddle,
    Life,
    PuckBalls,
    Baseline,
    /// Carried by spawned hearts, not by bricks
    HeartCatch,
}

impl EffectKind {
    pub const DOUBLE_COIN: u32 = 0;
    pub const CAMERA_COIN: u32 = 1;
    pub const EXTRA_PADDLE_COIN: u32 = 2;
    pub const LIFE_COIN: u32 = 3;
    pub const PUCK_BALL_COIN: u32 = 4;

    /// Map a draw to its bucket; anything past the special buckets is a plain brick
    pub fn from_coin(coin: u32) -> Self {
        match coin {
            Self::DOUBLE_COIN => EffectKind::Double,
            Self::CAMERA_COIN => EffectKind::Camera,
            Self::EXTRA_PADDLE_COIN => EffectKind::ExtraPaddle,
            Self::LIFE_COIN => EffectKind::Life,
            Self::PUCK_BALL_COIN => EffectKind::PuckBalls,
            _ => EffectKind::Baseline,
        }
    }

    /// Kinds that wrap a chain when selected for a brick
    pub fn is_special(self) -> bool {
        matches!(
            self,
            EffectKind::Camera | EffectKind::ExtraPaddle | EffectKind::Life | EffectKind::PuckBalls
        )
    }
}

/// Something that reacts when `this` is struck by `other`
pub trait EffectHandler {
    fn on_collision(&self, this: &GameObject, other: &GameObject);

    fn kind(&self) -> EffectKind;

    /// The handler this one delegates to first, if any
    fn inner(&self) -> Option<&SharedHandler> {
        None
    }

    /// Kinds in the chain, innermost first
    fn chain(&self) -> Vec<EffectKind> {
        let mut kinds = self.inner().map(|h| h.chain()).unwrap_or_default();
        kinds.push(self.kind());
        kinds
    }

    /// Number of special effects stacked on the baseline
    fn stack_depth(&self) -> usize {
        self.chain().into_iter().filter(|k| k.is_special()).count()
    }
}

pub type SharedHandler = Rc<dyn EffectHandler>;
