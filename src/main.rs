//! Bricker entry point
//!
//! Headless native runner: builds a session and lets the autopilot play it
//! out. `bricker [bricks_per_row rows]` overrides the grid;
//! `BRICKER_SETTINGS` names an optional JSON settings file.

use std::path::Path;

use bricker::consts::*;
use bricker::sim::{GamePhase, GameState, TickInput, entropy_source, tick};
use bricker::{PathAssets, Settings};

/// Give up after ten minutes of game time
const MAX_TICKS: u64 = 60 * 60 * 10;

fn main() {
    env_logger::init();
    log::info!("Bricker (headless) starting...");

    let settings = match std::env::var("BRICKER_SETTINGS") {
        Ok(path) => Settings::load_from(Path::new(&path)),
        Err(_) => Settings::default(),
    };
    let settings = apply_grid_args(settings, std::env::args().skip(1).collect());

    let mut assets = PathAssets::new();
    let mut state = GameState::new(settings, entropy_source(), &mut assets);
    log::info!("Loaded {} assets", assets.len());

    run(&mut state, MAX_TICKS);

    match state.phase {
        GamePhase::Won => log::info!("You win! {} ticks", state.time_ticks),
        GamePhase::Lost => log::info!("You lose! {} bricks left", state.bricks.value()),
        GamePhase::Playing => log::info!(
            "Stopped after {} ticks with {} bricks left",
            state.time_ticks,
            state.bricks.value()
        ),
    }
}

/// Let the autopilot play until the game ends or `max_ticks` have passed
fn run(state: &mut GameState, max_ticks: u64) {
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    // Headless: no wall clock, one fixed step per iteration
    while state.phase == GamePhase::Playing && state.time_ticks < max_ticks {
        tick(state, &input, SIM_DT);

        if state.time_ticks % (60 * 30) == 0 {
            log::info!(
                "t={}s bricks={} lives={} camera={:?}",
                state.time_ticks / 60,
                state.bricks.value(),
                state.lives.value(),
                state.camera.state()
            );
        }
    }
}

/// `per_row rows` on the command line replaces the grid; anything else is ignored
fn apply_grid_args(settings: Settings, args: Vec<String>) -> Settings {
    if args.len() != 2 {
        if !args.is_empty() {
            log::warn!("Expected `bricks_per_row rows`, got {} argument(s)", args.len());
        }
        return settings;
    }
    match (args[0].parse::<u32>(), args[1].parse::<u32>()) {
        (Ok(per_row), Ok(rows)) if per_row > 0 && rows > 0 => {
            log::info!("Grid {} x {}", per_row, rows);
            settings.with_grid(per_row, rows)
        }
        _ => {
            log::warn!("Invalid grid arguments {:?}, using defaults", args);
            settings
        }
    }
}
