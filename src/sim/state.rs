//! Game session state
//!
//! One session owns the play field, the shared counters the effects write
//! to, and the selector that gives every brick its handler chain.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::counter::{BoundedCounter, Counter};
use super::effects::{CameraController, ExtraPaddle, PuckBallPool};
use super::random::SharedRandom;
use super::selector::{CompositionSelector, EffectResources};
use super::world::{GameObject, Layer, ObjectCollection, ObjectId, Tag, World};
use crate::assets::{AssetLoader, ImageHandle, SoundHandle};
use crate::consts::*;
use crate::diagonal_velocity;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// All bricks cleared (or forced)
    Won,
    /// Ball lost with no lives left
    Lost,
}

/// Asset handles resolved once per process and reused across resets
#[derive(Debug, Clone, Copy)]
pub struct Sprites {
    pub ball: ImageHandle,
    pub puck_ball: ImageHandle,
    pub paddle: ImageHandle,
    pub brick: ImageHandle,
    pub heart: ImageHandle,
    pub ball_sound: SoundHandle,
}

impl Sprites {
    pub fn load(assets: &mut dyn AssetLoader) -> Self {
        Self {
            ball: assets.read_image(BALL_IMAGE_PATH, true),
            puck_ball: assets.read_image(PUCK_BALL_IMAGE_PATH, true),
            paddle: assets.read_image(PADDLE_IMAGE_PATH, false),
            brick: assets.read_image(BRICK_IMAGE_PATH, false),
            heart: assets.read_image(HEART_IMAGE_PATH, true),
            ball_sound: assets.read_sound(BALL_COLLISION_SOUND_PATH),
        }
    }
}

pub struct GameState {
    pub settings: Settings,
    /// Every active object
    pub world: Rc<RefCell<World>>,
    /// Bricks still standing
    pub bricks: Counter,
    pub lives: BoundedCounter,
    pub main_ball: ObjectId,
    /// Collisions of the main ball (drives the camera)
    pub ball_hits: Counter,
    pub paddle: ObjectId,
    pub extra_paddle: ExtraPaddle,
    pub puck_balls: PuckBallPool,
    pub camera: Rc<CameraController>,
    pub selector: CompositionSelector,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    random: SharedRandom,
    sprites: Sprites,
}

impl GameState {
    /// Create a new session and lay out the bricks
    pub fn new(settings: Settings, random: SharedRandom, assets: &mut dyn AssetLoader) -> Self {
        let sprites = Sprites::load(assets);
        Self::build(settings, random, sprites)
    }

    fn build(settings: Settings, random: SharedRandom, sprites: Sprites) -> Self {
        let window = settings.window();
        let world = World::new().shared();
        let bricks = Counter::new(0);
        let lives = BoundedCounter::new(settings.initial_lives, settings.max_lives);
        let ball_hits = Counter::new(0);

        let (paddle, main_ball, extra_paddle, puck_balls) = {
            let mut w = world.borrow_mut();
            create_borders(&mut w, window);

            let paddle_id = w.next_id();
            let paddle_center = Vec2::new(window.x / 2.0, window.y - (HEART_RADIUS + PADDLE_HEIGHT));
            w.insert(
                GameObject::new(paddle_id, Tag::Paddle, paddle_center, Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT))
                    .with_image(sprites.paddle),
                Layer::Default,
            );

            let ball_id = w.next_id();
            w.insert(
                GameObject::new(ball_id, Tag::MainBall, window / 2.0, Vec2::splat(BALL_RADIUS))
                    .with_image(sprites.ball)
                    .with_sound(sprites.ball_sound)
                    .with_hits(ball_hits.clone()),
                Layer::Default,
            );

            let extra = ExtraPaddle::allocate(
                &mut *w,
                Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
                Some(sprites.paddle),
            );
            let pool = PuckBallPool::allocate(
                &mut *w,
                settings.effects.puck_ball_count,
                settings.effects.puck_ball_radius,
                Some(sprites.puck_ball),
                Some(sprites.ball_sound),
            );
            (paddle_id, ball_id, extra, pool)
        };

        let camera = Rc::new(CameraController::new(
            main_ball,
            ball_hits.clone(),
            window,
            settings.effects.camera_zoom_factor,
            settings.effects.camera_revert_window,
        ));
        let resources = EffectResources {
            objects: world.clone(),
            bricks: bricks.clone(),
            lives: lives.clone(),
            camera: camera.clone(),
            extra_paddle: extra_paddle.clone(),
            extra_paddle_position: window / 2.0,
            puck_balls: puck_balls.clone(),
            heart_size: Vec2::splat(HEART_RADIUS),
            heart_image: Some(sprites.heart),
        };
        let selector = CompositionSelector::new(settings.effects.clone(), resources, random.clone());

        let mut state = Self {
            settings,
            world,
            bricks,
            lives,
            main_ball,
            ball_hits,
            paddle,
            extra_paddle,
            puck_balls,
            camera,
            selector,
            phase: GamePhase::Playing,
            time_ticks: 0,
            random,
            sprites,
        };
        state.serve_ball();
        state.generate_bricks();
        state
    }

    /// Start over with the same settings and random source
    pub fn reset(&mut self) {
        log::info!("Resetting session");
        *self = Self::build(self.settings.clone(), self.random.clone(), self.sprites);
    }

    /// Width of one brick for the configured grid
    pub fn brick_width(&self) -> f32 {
        let per_row = i64::from(self.settings.bricks_per_row.max(1));
        let usable = self.settings.window_width as i64 - (BALL_RADIUS * 2.0) as i64 - (per_row * 2 - 1);
        (usable / per_row).max(1) as f32
    }

    /// Lay out the brick grid, each brick with a fresh effect chain
    pub fn generate_bricks(&mut self) {
        let width = self.brick_width();
        let size = Vec2::new(width, BRICK_HEIGHT);
        let mut special = 0;

        for col in 0..self.settings.bricks_per_row {
            for row in 0..self.settings.brick_rows {
                let top_left = Vec2::new(
                    BALL_RADIUS + col as f32 * (width + BRICKS_GAP),
                    BALL_RADIUS + row as f32 * (BRICK_HEIGHT + BRICKS_GAP),
                );
                let handler = self.selector.build_effect_chain();
                if handler.stack_depth() > 0 {
                    special += 1;
                }

                let mut world = self.world.borrow_mut();
                let id = world.next_id();
                let brick = GameObject::new(id, Tag::Brick, top_left + size / 2.0, size)
                    .with_image(self.sprites.brick)
                    .with_handler(handler);
                world.insert(brick, Layer::StaticObjects);
            }
        }

        self.bricks.set(self.settings.brick_count());
        log::info!(
            "Level built: {} bricks ({} with effects), {} lives",
            self.bricks.value(),
            special,
            self.lives.value()
        );
    }

    /// Put the main ball back at the window center with a random diagonal
    pub fn serve_ball(&mut self) {
        let center = self.settings.window() / 2.0;
        let velocity = {
            let mut random = self.random.borrow_mut();
            let flip_x = random.next_bool();
            let flip_y = random.next_bool();
            diagonal_velocity(self.settings.ball_speed, flip_x, flip_y)
        };

        let mut world = self.world.borrow_mut();
        match world.get_mut(self.main_ball) {
            Some(ball) => {
                ball.center = center;
                ball.velocity = velocity;
            }
            None => {
                let ball = GameObject::new(self.main_ball, Tag::MainBall, center, Vec2::splat(BALL_RADIUS))
                    .with_velocity(velocity)
                    .with_image(self.sprites.ball)
                    .with_sound(self.sprites.ball_sound)
                    .with_hits(self.ball_hits.clone());
                world.insert(ball, Layer::Default);
            }
        }
    }

    /// Current main ball, if it is still in play
    pub fn main_ball(&self) -> Option<GameObject> {
        self.world.borrow().get(self.main_ball).cloned()
    }
}

/// Left, right and top walls, just outside the window
fn create_borders(world: &mut World, window: Vec2) {
    let walls = [
        (Vec2::new(-BORDER_WIDTH, 0.0), Vec2::new(BORDER_WIDTH, window.y)),
        (Vec2::new(window.x, 0.0), Vec2::new(BORDER_WIDTH, window.y)),
        (
            Vec2::new(-BORDER_WIDTH, -BORDER_WIDTH),
            Vec2::new(window.x + BORDER_WIDTH, BORDER_WIDTH),
        ),
    ];
    for (top_left, size) in walls {
        let id = world.next_id();
        world.insert(
            GameObject::new(id, Tag::Border, top_left + size / 2.0, size),
            Layer::Default,
        );
    }
}
