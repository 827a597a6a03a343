//! Camera zoom that follows the main ball for a few bounces
//!
//! State machine:
//! - `Idle`: no zoom
//! - `Armed`: a hit count was recorded but the zoom is not on; stays here
//!   if the ball bounced between arming and activation
//! - `Active`: zoom is on; reverts once the ball has bounced
//!   `revert_window` more times, which also re-arms the count
//!
//! One controller exists per session and every camera effect shares it.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{EffectHandler, EffectKind, SharedHandler};
use crate::sim::counter::Counter;
use crate::sim::world::{GameObject, ObjectId, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraState {
    Idle,
    Armed { at: i32 },
    Active { armed_at: i32 },
}

/// Zoomed camera the renderer should use
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraZoom {
    /// Object the camera is centered on
    pub follow: ObjectId,
    pub offset: Vec2,
    /// World area shown
    pub viewport: Vec2,
    /// Screen area it is drawn into
    pub window: Vec2,
}

#[derive(Debug)]
pub struct CameraController {
    ball: ObjectId,
    ball_hits: Counter,
    window: Vec2,
    zoom_factor: f32,
    revert_window: i32,
    armed_at: Cell<i32>,
    state: Cell<CameraState>,
}

impl CameraController {
    pub fn new(ball: ObjectId, ball_hits: Counter, window: Vec2, zoom_factor: f32, revert_window: u32) -> Self {
        Self {
            ball,
            ball_hits,
            window,
            zoom_factor,
            revert_window: i32::try_from(revert_window).unwrap_or(i32::MAX),
            armed_at: Cell::new(0),
            state: Cell::new(CameraState::Idle),
        }
    }

    pub fn state(&self) -> CameraState {
        self.state.get()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state.get(), CameraState::Active { .. })
    }

    /// Hit count the revert window is measured from
    pub fn armed_at(&self) -> i32 {
        self.armed_at.get()
    }

    /// Current zoom, if any
    pub fn zoom(&self) -> Option<CameraZoom> {
        self.is_active().then(|| CameraZoom {
            follow: self.ball,
            offset: Vec2::ZERO,
            viewport: self.window * self.zoom_factor,
            window: self.window,
        })
    }

    /// Arm on the ball's current count and activate if nothing is zoomed yet
    pub fn start_count(&self) {
        if self.is_active() {
            return;
        }
        self.arm();
        self.activate();
    }

    /// Record the ball's current count; no-op while zoomed
    pub fn arm(&self) {
        if self.is_active() {
            return;
        }
        let at = self.ball_hits.value();
        self.armed_at.set(at);
        self.state.set(CameraState::Armed { at });
    }

    /// Turn the zoom on if the ball has not bounced since arming
    ///
    /// Returns whether the zoom is on afterwards.
    pub fn activate(&self) -> bool {
        if let CameraState::Armed { at } = self.state.get() {
            if at == self.ball_hits.value() {
                self.state.set(CameraState::Active { armed_at: at });
                log::debug!("Camera zoom on at ball hit {}", at);
            }
        }
        self.is_active()
    }

    /// Per-frame check of the revert window
    pub fn update(&self) {
        let hits = self.ball_hits.value();
        if hits >= self.armed_at.get().saturating_add(self.revert_window) {
            if self.is_active() {
                log::debug!("Camera zoom off at ball hit {}", hits);
            }
            self.state.set(CameraState::Idle);
            self.armed_at.set(hits);
        }
    }
}

/// Starts the camera zoom when the main ball breaks the brick
pub struct CameraZoomEffect {
    inner: SharedHandler,
    camera: Rc<CameraController>,
}

impl CameraZoomEffect {
    pub fn new(inner: SharedHandler, camera: Rc<CameraController>) -> Self {
        Self { inner, camera }
    }
}

impl EffectHandler for CameraZoomEffect {
    fn on_collision(&self, this: &GameObject, other: &GameObject) {
        self.inner.on_collision(this, other);
        if other.tag == Tag::MainBall {
            self.camera.start_count();
        }
    }

    fn kind(&self) -> EffectKind {
        EffectKind::Camera
    }

    fn inner(&self) -> Option<&SharedHandler> {
        Some(&self.inner)
    }
}
