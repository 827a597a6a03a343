//! Per-brick effect selection
//!
//! Each brick gets its handler chain from one first draw:
//! - bucket 0: "double", stack several effects (see below)
//! - buckets 1-4: camera, extra paddle, life, puck balls
//! - anything else: a plain brick
//!
//! A double amplifies itself: every pending double draws twice more and each
//! hit adds another pending double. The number of stacked effects is one more
//! than the doubles collected, capped at `max_stack_depth`. The pending count
//! is selector state and carries over to later bricks.

use std::rc::Rc;

use glam::Vec2;

use crate::assets::ImageHandle;
use crate::settings::EffectConfig;
use crate::sim::counter::{BoundedCounter, Counter};
use crate::sim::effects::{
    BaselineRemoveEffect, CameraController, CameraZoomEffect, EffectKind, ExtraPaddle,
    ExtraPaddleEffect, PuckBallPool, SharedHandler, SpawnBallsEffect, SpawnLifeEffect,
};
use crate::sim::random::SharedRandom;
use crate::sim::world::SharedCollection;

/// Session resources the effects act on
#[derive(Clone)]
pub struct EffectResources {
    pub objects: SharedCollection,
    pub bricks: Counter,
    pub lives: BoundedCounter,
    pub camera: Rc<CameraController>,
    pub extra_paddle: ExtraPaddle,
    /// Where the extra paddle appears
    pub extra_paddle_position: Vec2,
    pub puck_balls: PuckBallPool,
    pub heart_size: Vec2,
    pub heart_image: Option<ImageHandle>,
}

pub struct CompositionSelector {
    config: EffectConfig,
    resources: EffectResources,
    random: SharedRandom,
    double_count: u32,
}

impl CompositionSelector {
    pub fn new(config: EffectConfig, resources: EffectResources, random: SharedRandom) -> Self {
        Self {
            config: config.sanitized(),
            resources,
            random,
            double_count: 0,
        }
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Doubles still pending from earlier bricks
    pub fn double_count(&self) -> u32 {
        self.double_count
    }

    /// Build the handler chain for one brick
    pub fn build_effect_chain(&mut self) -> SharedHandler {
        let baseline: SharedHandler = Rc::new(BaselineRemoveEffect::new(
            self.resources.objects.clone(),
            self.resources.bricks.clone(),
        ));

        let coin = self.draw_below(self.config.first_toss_bound);
        let kind = EffectKind::from_coin(coin);
        if kind != EffectKind::Double {
            return self.wrap(kind, baseline);
        }

        self.double_count += 1;
        let total = self.total_double_count();
        self.stack_effects(total, baseline)
    }

    fn draw_below(&self, bound: u32) -> u32 {
        self.random.borrow_mut().next_below(bound)
    }

    /// Resolve pending doubles; the loop bound grows with every hit
    fn total_double_count(&mut self) -> u32 {
        let mut total = self.double_count;
        let mut i = 0;
        while i < self.double_count {
            for _ in 0..2 {
                if self.draw_below(self.config.amplification_bound) == EffectKind::DOUBLE_COIN {
                    self.double_count += 1;
                    total += 1;
                }
            }
            self.double_count -= 1;
            i += 1;
        }
        total
    }

    fn stack_effects(&self, total_double_count: u32, baseline: SharedHandler) -> SharedHandler {
        let wanted = total_double_count + 1;
        let mut chain = baseline;
        let mut i = 0;
        while i < self.config.max_stack_depth && i < wanted {
            let coin = self
                .random
                .borrow_mut()
                .next_in(EffectKind::CAMERA_COIN, self.config.amplification_bound);
            chain = self.wrap(EffectKind::from_coin(coin), chain);
            i += 1;
        }
        chain
    }

    fn wrap(&self, kind: EffectKind, inner: SharedHandler) -> SharedHandler {
        let res = &self.resources;
        match kind {
            EffectKind::Camera => Rc::new(CameraZoomEffect::new(inner, res.camera.clone())),
            EffectKind::ExtraPaddle => Rc::new(ExtraPaddleEffect::new(
                inner,
                res.objects.clone(),
                res.extra_paddle.clone(),
                res.extra_paddle_position,
                self.config.extra_paddle_lease,
            )),
            EffectKind::Life => Rc::new(SpawnLifeEffect::new(
                inner,
                res.objects.clone(),
                res.lives.clone(),
                res.bricks.clone(),
                res.heart_size,
                res.heart_image,
                self.config.heart_fall_speed,
            )),
            EffectKind::PuckBalls => Rc::new(SpawnBallsEffect::new(
                inner,
                res.objects.clone(),
                res.puck_balls.clone(),
                self.config.puck_ball_speed,
                self.random.clone(),
            )),
            EffectKind::Double | EffectKind::Baseline | EffectKind::HeartCatch => inner,
        }
    }
}
