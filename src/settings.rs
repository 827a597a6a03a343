//! Game settings and effect tuning
//!
//! Loaded from JSON; every field falls back to its default when missing.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunables for effect selection and the effects themselves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Exclusive upper bound of the first draw per brick
    pub first_toss_bound: u32,
    /// Exclusive upper bound of amplification and stacking draws
    pub amplification_bound: u32,
    /// Maximum number of special effects stacked on one brick
    pub max_stack_depth: u32,
    /// Ball hits the extra paddle absorbs before it disappears
    pub extra_paddle_lease: i32,
    /// Main-ball collisions before the camera zoom reverts
    pub camera_revert_window: u32,
    /// Viewport magnification while the camera follows the ball
    pub camera_zoom_factor: f32,
    /// Size of the shared puck-ball pool
    pub puck_ball_count: usize,
    /// Per-axis speed of a freshly spawned puck ball
    pub puck_ball_speed: f32,
    /// Puck-ball diameter
    pub puck_ball_radius: f32,
    /// Downward speed of a falling heart
    pub heart_fall_speed: f32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            first_toss_bound: 10,
            amplification_bound: 5,
            max_stack_depth: 3,
            extra_paddle_lease: 4,
            camera_revert_window: 4,
            camera_zoom_factor: 1.2,
            puck_ball_count: 2,
            puck_ball_speed: BALL_SPEED,
            puck_ball_radius: BALL_RADIUS * PUCK_BALL_FACTOR,
            heart_fall_speed: 100.0,
        }
    }
}

impl EffectConfig {
    /// Clamp values that would make a uniform draw empty
    pub fn sanitized(mut self) -> Self {
        if self.first_toss_bound == 0 {
            log::warn!("first_toss_bound must be positive, using 1");
            self.first_toss_bound = 1;
        }
        // Stacking draws come from [1, bound), so the bound needs room for one kind
        if self.amplification_bound < 2 {
            log::warn!(
                "amplification_bound {} too small, using 2",
                self.amplification_bound
            );
            self.amplification_bound = 2;
        }
        if self.camera_revert_window == 0 {
            log::warn!("camera_revert_window must be positive, using 1");
            self.camera_revert_window = 1;
        } else if self.camera_revert_window > i32::MAX as u32 {
            log::warn!(
                "camera_revert_window {} too large, using {}",
                self.camera_revert_window,
                i32::MAX
            );
            self.camera_revert_window = i32::MAX as u32;
        }
        if self.extra_paddle_lease < 1 {
            log::warn!(
                "extra_paddle_lease {} would never show the paddle, using 1",
                self.extra_paddle_lease
            );
            self.extra_paddle_lease = 1;
        }
        self
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: f32,
    pub window_height: f32,

    // === Level ===
    /// Bricks per row
    pub bricks_per_row: u32,
    /// Rows of bricks
    pub brick_rows: u32,
    /// Main ball speed per axis
    pub ball_speed: f32,

    // === Lives ===
    pub initial_lives: i32,
    pub max_lives: i32,

    // === Effects ===
    pub effects: EffectConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: SCREEN_WIDTH,
            window_height: SCREEN_HEIGHT,
            bricks_per_row: BRICKS_PER_ROW,
            brick_rows: BRICK_ROWS,
            ball_speed: BALL_SPEED,
            initial_lives: INITIAL_LIFE,
            max_lives: MAX_LIFE,
            effects: EffectConfig::default(),
        }
    }
}

impl Settings {
    /// Window dimensions
    pub fn window(&self) -> Vec2 {
        Vec2::new(self.window_width, self.window_height)
    }

    /// Total number of bricks laid out per session
    pub fn brick_count(&self) -> i32 {
        let count = u64::from(self.bricks_per_row) * u64::from(self.brick_rows);
        i32::try_from(count).unwrap_or(i32::MAX)
    }

    /// Override the brick grid (command-line `per_row rows`)
    pub fn with_grid(mut self, bricks_per_row: u32, brick_rows: u32) -> Self {
        self.bricks_per_row = bricks_per_row;
        self.brick_rows = brick_rows;
        self.clamp_grid();
        self
    }

    /// Keep both grid axes within `[1, MAX_GRID_SIZE]`
    fn clamp_grid(&mut self) {
        let per_row = self.bricks_per_row.clamp(1, MAX_GRID_SIZE);
        let rows = self.brick_rows.clamp(1, MAX_GRID_SIZE);
        if (per_row, rows) != (self.bricks_per_row, self.brick_rows) {
            log::warn!(
                "Grid {} x {} out of range, using {} x {}",
                self.bricks_per_row,
                self.brick_rows,
                per_row,
                rows
            );
            self.bricks_per_row = per_row;
            self.brick_rows = rows;
        }
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.clamp_grid();
        settings.effects = settings.effects.sanitized();
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON (for writing a template settings file)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_effect_config_matches_tuning() {
        let config = EffectConfig::default();
        assert_eq!(config.first_toss_bound, 10);
        assert_eq!(config.amplification_bound, 5);
        assert_eq!(config.max_stack_depth, 3);
        assert_eq!(config.extra_paddle_lease, 4);
        assert_eq!(config.camera_revert_window, 4);
        assert_eq!(config.puck_ball_count, 2);
        assert!((config.puck_ball_radius - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "bricks_per_row": 3, "effects": { "max_stack_depth": 2 } }"#)
            .expect("valid json");
        assert_eq!(settings.bricks_per_row, 3);
        assert_eq!(settings.brick_rows, BRICK_ROWS);
        assert_eq!(settings.effects.max_stack_depth, 2);
        assert_eq!(settings.effects.first_toss_bound, 10);
    }

    #[test]
    fn test_sanitize_empty_bounds() {
        let settings = Settings::from_json(
            r#"{ "effects": { "first_toss_bound": 0, "amplification_bound": 1, "extra_paddle_lease": 0 } }"#,
        )
        .expect("valid json");
        assert_eq!(settings.effects.first_toss_bound, 1);
        assert_eq!(settings.effects.amplification_bound, 2);
        assert_eq!(settings.effects.extra_paddle_lease, 1);
    }

    #[test]
    fn test_oversized_grid_is_clamped() {
        let settings = Settings::default().with_grid(70_000, 70_000);
        assert_eq!(settings.bricks_per_row, MAX_GRID_SIZE);
        assert_eq!(settings.brick_rows, MAX_GRID_SIZE);
        assert_eq!(settings.brick_count(), 10_000);

        let settings = Settings::default().with_grid(0, 3);
        assert_eq!(settings.bricks_per_row, 1);

        let settings = Settings::from_json(r#"{ "bricks_per_row": 4000000000 }"#).expect("valid json");
        assert_eq!(settings.bricks_per_row, MAX_GRID_SIZE);
    }

    #[test]
    fn test_brick_count_saturates() {
        let settings = Settings {
            bricks_per_row: 70_000,
            brick_rows: 70_000,
            ..Settings::default()
        };
        assert_eq!(settings.brick_count(), i32::MAX);
    }

    #[test]
    fn test_huge_camera_window_is_clamped() {
        use crate::sim::counter::Counter;
        use crate::sim::effects::CameraController;
        use crate::sim::world::ObjectId;

        let settings = Settings::from_json(r#"{ "effects": { "camera_revert_window": 3000000000 } }"#)
            .expect("valid json");
        assert_eq!(settings.effects.camera_revert_window, i32::MAX as u32);

        let hits = Counter::new(0);
        let camera = CameraController::new(
            ObjectId(0),
            hits.clone(),
            settings.window(),
            settings.effects.camera_zoom_factor,
            settings.effects.camera_revert_window,
        );
        camera.start_count();
        camera.update();
        assert!(camera.is_active());
    }

    #[test]
    fn test_zero_camera_window_is_raised() {
        let settings = Settings::from_json(r#"{ "effects": { "camera_revert_window": 0 } }"#).expect("valid json");
        assert_eq!(settings.effects.camera_revert_window, 1);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_from(Path::new("/definitely/not/here.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_json_roundtrip_keeps_grid() {
        let settings = Settings::default().with_grid(4, 2);
        let json = settings.to_json().expect("serializable");
        let back = Settings::from_json(&json).expect("valid json");
        assert_eq!(back.brick_count(), 8);
    }
}
