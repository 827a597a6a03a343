//! Bricker - block-breaking arcade core
//!
//! Core modules:
//! - `sim`: Session state, collision effects and the per-frame tick
//! - `settings`: Data-driven game and effect tuning
//! - `assets`: Opaque image/sound handles resolved by path

pub mod assets;
pub mod settings;
pub mod sim;

pub use assets::{AssetLoader, ImageHandle, PathAssets, SoundHandle};
pub use settings::{EffectConfig, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default window dimensions
    pub const SCREEN_WIDTH: f32 = 700.0;
    pub const SCREEN_HEIGHT: f32 = 500.0;

    /// Paddle defaults (main and extra share dimensions)
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_SPEED: f32 = 200.0;
    /// Puck balls are this fraction of the main ball
    pub const PUCK_BALL_FACTOR: f32 = 0.75;

    /// Hearts (falling pickups and the life display use the same size)
    pub const HEART_RADIUS: f32 = 20.0;

    /// Brick grid defaults
    pub const BRICK_HEIGHT: f32 = 15.0;
    pub const BRICKS_GAP: f32 = 2.0;
    pub const BRICKS_PER_ROW: u32 = 8;
    pub const BRICK_ROWS: u32 = 7;
    /// Largest grid either axis accepts (bricks stay at least a few px wide)
    pub const MAX_GRID_SIZE: u32 = 100;

    /// Borders extend this far off-screen; also the sweep margin
    pub const BORDER_WIDTH: f32 = 1000.0;

    /// Lives
    pub const INITIAL_LIFE: i32 = 3;
    pub const MAX_LIFE: i32 = 4;

    /// Asset paths handed to the loader
    pub const BALL_IMAGE_PATH: &str = "assets/ball.png";
    pub const PUCK_BALL_IMAGE_PATH: &str = "assets/mockBall.png";
    pub const PADDLE_IMAGE_PATH: &str = "assets/paddle.png";
    pub const BRICK_IMAGE_PATH: &str = "assets/brick.png";
    pub const HEART_IMAGE_PATH: &str = "assets/heart.png";
    pub const BALL_COLLISION_SOUND_PATH: &str = "assets/blop_cut_silenced.wav";
}

/// Velocity with the given magnitude on both axes and independent signs
#[inline]
pub fn diagonal_velocity(speed: f32, flip_x: bool, flip_y: bool) -> Vec2 {
    let x = if flip_x { -speed } else { speed };
    let y = if flip_y { -speed } else { speed };
    Vec2::new(x, y)
}
