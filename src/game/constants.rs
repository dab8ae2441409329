//! Game constants for arena size, scoring rules, colors, timing, and rendering layers.

use bevy::prelude::*;
use std::time::Duration;

use super::Position;

// Arena dimensions
pub const ARENA_WIDTH: u32 = 20;
pub const ARENA_HEIGHT: u32 = 20;

// Visual settings
pub const CELL_SIZE: f32 = 25.0;
pub const CORNER_RADIUS: f32 = 4.0;
pub const WINDOW_WIDTH: u32 = 720;
pub const WINDOW_HEIGHT: u32 = 760;

// Initial positions
pub const INITIAL_SNAKE_POSITION: Position = Position { x: 10, y: 10 };
pub const INITIAL_FOOD_POSITION: Position = Position { x: 15, y: 15 };

// Scoring and leveling
pub const FOOD_POINTS: u32 = 10;
pub const BONUS_POINTS: u32 = 50;
pub const POINTS_PER_LEVEL: u32 = 100;

// Tick interval adjustments, in milliseconds
pub const MIN_INTERVAL_MS: u64 = 30;
pub const LEVEL_UP_SPEEDUP_MS: u64 = 10;
pub const SLOW_DOWN_MS: u64 = 20;

// Special food
pub const SPECIAL_FOOD_PERIOD: u64 = 100;
pub const SPECIAL_FOOD_CHANCE: f64 = 0.1;
pub const SPECIAL_FOOD_LIFETIME: u32 = 100;

/// Random draws tried before placement falls back to scanning free cells.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

// Timing
pub const POPUP_LIFETIME: Duration = Duration::from_secs(1);

// Colors
pub const SNAKE_HEAD_COLOR: Color = Color::srgba(0.18, 0.8, 0.44, 1.0);
pub const SNAKE_HEAD_GLOW_COLOR: Color = Color::srgba(0.18, 0.8, 0.44, 0.35);
pub const SNAKE_SEGMENT_COLOR: Color = Color::srgba(0.15, 0.68, 0.38, 1.0);
pub const FOOD_COLOR: Color = Color::srgba(0.91, 0.3, 0.24, 1.0);
pub const BONUS_FOOD_COLOR: Color = Color::srgba(0.95, 0.61, 0.07, 1.0);
pub const SLOW_FOOD_COLOR: Color = Color::srgba(0.61, 0.35, 0.71, 1.0);
pub const ARENA_COLOR: Color = Color::srgba(0.2, 0.29, 0.37, 1.0);
pub const ARENA_BORDER_COLOR: Color = Color::srgba(0.3, 1.2, 0.6, 1.0);
pub const BACKGROUND_COLOR: Color = Color::srgba(0.1, 0.13, 0.18, 1.0);
pub const BUTTON_COLOR: Color = Color::srgba(0.17, 0.24, 0.31, 1.0);
pub const BUTTON_HOVER_COLOR: Color = Color::srgba(0.22, 0.32, 0.42, 1.0);
pub const BUTTON_PRESSED_COLOR: Color = Color::srgba(0.15, 0.68, 0.38, 1.0);

// Z-index constants for rendering layers
pub const Z_BACKGROUND: f32 = 0.0;
pub const Z_FOOD: f32 = 1.0;
pub const Z_SPECIAL_FOOD: f32 = 1.2;
pub const Z_SNAKE_SEGMENT: f32 = 1.5;
pub const Z_SNAKE_HEAD: f32 = 2.0;
pub const Z_POPUP: f32 = 5.0;
