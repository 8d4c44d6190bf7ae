//! Breakout Sim - a headless brick-breaker simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, level state)
//! - `level`: Level descriptions and JSON loading

pub mod level;
pub mod sim;

pub use level::{LevelConfig, LevelError};
pub use sim::{LevelState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f64 = 800.0;
    pub const ARENA_HEIGHT: f64 = 600.0;
    /// Thickness of the top and side walls
    pub const ARENA_BORDER: f64 = 25.0;
    /// Band above the top wall reserved for score and lives
    pub const ARENA_HUD_HEIGHT: f64 = 25.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f64 = 100.0;
    pub const PADDLE_HEIGHT: f64 = 20.0;
    pub const PADDLE_SPEED: f64 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 8.0;
    pub const BALL_SPEED: f64 = 5.0;

    /// Block defaults
    pub const BLOCK_WIDTH: f64 = 50.0;
    pub const BLOCK_HEIGHT: f64 = 25.0;
    pub const DEFAULT_BLOCK_ROWS: u32 = 6;
    pub const DEFAULT_FIRST_ROW_Y: f64 = 100.0;

    /// Ticks between progress lines in the headless runner
    pub const PROGRESS_INTERVAL: u64 = 600;
}
