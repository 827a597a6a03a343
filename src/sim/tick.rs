//! Fixed timestep simulation tick
//!
//! Order within a tick:
//! 1. paddle input
//! 2. motion
//! 3. contacts, bounces and effect handlers
//! 4. camera window
//! 5. lost ball, then win
//! 6. paddle clamping, extra paddle expiry, out-of-bounds sweep

use glam::Vec2;

use super::collision::{CollisionResult, bounce, object_collision};
use super::state::{GamePhase, GameState};
use super::world::{GameObject, Layer, ObjectCollection, ObjectId, Tag, World, is_out_of_bounds};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move paddles left
    pub left: bool,
    /// Move paddles right
    pub right: bool,
    /// Declare the level won (debug/testing)
    pub force_win: bool,
    /// Idle/demo mode - paddle follows the main ball
    pub idle_mode: bool,
}

/// One overlapping pair found this tick
#[derive(Debug, Clone)]
struct Contact {
    /// The moving side (ball or heart)
    mover: ObjectId,
    other: ObjectId,
    result: CollisionResult,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    let mut input = input.clone();
    if input.idle_mode {
        steer_toward_ball(state, &mut input);
    }

    {
        let mut world = state.world.borrow_mut();
        let direction = match (input.left, input.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        for id in [state.paddle, state.extra_paddle.id] {
            if let Some(paddle) = world.get_mut(id) {
                paddle.velocity = Vec2::new(direction * PADDLE_SPEED, 0.0);
            }
        }
        world.integrate(dt);
    }

    let contacts = find_contacts(&state.world.borrow());
    for contact in &contacts {
        resolve_contact(state, contact);
    }

    state.camera.update();

    check_game_end(state, &input);

    let window = state.settings.window();
    let mut world = state.world.borrow_mut();
    for id in [state.paddle, state.extra_paddle.id] {
        if let Some(paddle) = world.get_mut(id) {
            clamp_paddle(paddle, window.x);
        }
    }
    if state.extra_paddle.lease.is_expired() && world.remove(state.extra_paddle.id, Layer::Default) {
        log::debug!("Extra paddle lease ran out");
    }
    world.sweep_out_of_bounds(window, BORDER_WIDTH);
}

/// Every overlapping mover/target pair, in id order
fn find_contacts(world: &World) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for mover in world.objects().filter(|o| o.tag.is_ball() || o.tag == Tag::Heart) {
        for other in world.objects() {
            if other.id == mover.id || !mover.tag.collides_with(other.tag) {
                continue;
            }
            let result = object_collision(mover, other);
            if result.hit {
                contacts.push(Contact {
                    mover: mover.id,
                    other: other.id,
                    result,
                });
            }
        }
    }
    contacts
}

fn resolve_contact(state: &GameState, contact: &Contact) {
    {
        let mut world = state.world.borrow_mut();
        // An earlier handler this tick may have removed either side
        if !world.contains(contact.other) {
            return;
        }
        let Some(mover) = world.get_mut(contact.mover) else {
            return;
        };
        if mover.tag.is_ball() {
            bounce(mover, &contact.result);
            mover.hits.increment();
            if contact.other == state.extra_paddle.id {
                state.extra_paddle.lease.consume();
            }
        }
    }

    notify(state, contact.other, contact.mover);
    notify(state, contact.mover, contact.other);
}

/// Run the handler of `struck`, if both objects are still in play
fn notify(state: &GameState, struck: ObjectId, by: ObjectId) {
    let (this, other) = {
        let world = state.world.borrow();
        match (world.get(struck), world.get(by)) {
            (Some(this), Some(other)) => (this.clone(), other.clone()),
            _ => return,
        }
    };
    if let Some(handler) = &this.handler {
        handler.on_collision(&this, &other);
    }
}

/// A lost ball is settled before a win: it costs a life (and delays the
/// win to a later tick) or ends the game
fn check_game_end(state: &mut GameState, input: &TickInput) {
    let window = state.settings.window();
    let ball_lost = state
        .main_ball()
        .is_none_or(|ball| is_out_of_bounds(&ball, window, BORDER_WIDTH));
    if ball_lost {
        if state.lives.value() > 1 {
            state.lives.decrement();
            log::info!("Ball lost, {} lives left", state.lives.value());
            state.serve_ball();
        } else {
            state.phase = GamePhase::Lost;
            log::info!("You lose! ({} ticks)", state.time_ticks);
        }
        return;
    }

    if state.bricks.value() < 1 || input.force_win {
        state.phase = GamePhase::Won;
        log::info!("You win! ({} ticks)", state.time_ticks);
    }
}

/// Keep a paddle fully inside the window horizontally
fn clamp_paddle(paddle: &mut GameObject, window_width: f32) {
    let left = paddle.top_left().x;
    let max_left = window_width - paddle.size.x;
    if left < 0.0 {
        paddle.set_top_left_x(0.0);
    } else if left > max_left {
        paddle.set_top_left_x(max_left);
    }
}

/// Autopilot: chase the main ball's x
fn steer_toward_ball(state: &GameState, input: &mut TickInput) {
    let world = state.world.borrow();
    let (Some(ball), Some(paddle)) = (world.get(state.main_ball), world.get(state.paddle)) else {
        return;
    };
    let dx = ball.center.x - paddle.center.x;
    let dead_zone = paddle.size.x / 8.0;
    input.left = dx < -dead_zone;
    input.right = dx > dead_zone;
}
