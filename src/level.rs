//! Level descriptions
//!
//! A level is plain data: arena size, paddle, starting balls and block
//! rectangles. It is usually loaded from JSON; every field falls back to the
//! defaults in [`crate::consts`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Arena, Point, Velocity};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse level description: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid level: {0}")]
    Invalid(String),
}

/// Paddle geometry and speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f64,
    pub height: f64,
    /// Pixels moved per tick while a direction is held
    pub speed: f64,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }
}

/// Initial ball velocity, either as components or as a heading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VelocityConfig {
    Components { dx: f64, dy: f64 },
    /// Degrees, 0 = up, clockwise
    Heading { angle: f64, speed: f64 },
}

impl VelocityConfig {
    pub fn to_velocity(self) -> Velocity {
        match self {
            VelocityConfig::Components { dx, dy } => Velocity::new(dx, dy),
            VelocityConfig::Heading { angle, speed } => Velocity::from_angle_and_speed(angle, speed),
        }
    }

    fn is_finite(&self) -> bool {
        match *self {
            VelocityConfig::Components { dx, dy } => dx.is_finite() && dy.is_finite(),
            VelocityConfig::Heading { angle, speed } => angle.is_finite() && speed.is_finite(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallConfig {
    /// Defaults to just above the middle of the paddle
    #[serde(default)]
    pub position: Option<Point>,
    pub velocity: VelocityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockConfig {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Hits needed to destroy the block
    #[serde(default = "default_hits")]
    pub hits: u32,
}

fn default_hits() -> u32 {
    1
}

/// Everything needed to set up one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub name: String,
    pub arena: Arena,
    pub paddle: PaddleConfig,
    pub ball_radius: f64,
    pub balls: Vec<BallConfig>,
    pub blocks: Vec<BlockConfig>,
}

impl Default for LevelConfig {
    /// Two balls and a wall of blocks; the top row takes two hits
    fn default() -> Self {
        let arena = Arena::default();
        let per_row = (arena.inner_width() / BLOCK_WIDTH) as u32;
        let blocks = (0..DEFAULT_BLOCK_ROWS)
            .flat_map(|row| {
                (0..per_row).map(move |col| BlockConfig {
                    x: arena.left_limit() + col as f64 * BLOCK_WIDTH,
                    y: DEFAULT_FIRST_ROW_Y + row as f64 * BLOCK_HEIGHT,
                    width: BLOCK_WIDTH,
                    height: BLOCK_HEIGHT,
                    hits: if row == 0 { 2 } else { 1 },
                })
            })
            .collect();

        Self {
            name: "Default".to_string(),
            arena,
            paddle: PaddleConfig::default(),
            ball_radius: BALL_RADIUS,
            balls: [330.0, 30.0]
                .into_iter()
                .map(|angle| BallConfig {
                    position: None,
                    velocity: VelocityConfig::Heading {
                        angle,
                        speed: BALL_SPEED,
                    },
                })
                .collect(),
            blocks,
        }
    }
}

impl LevelConfig {
    /// Parse and validate a JSON level description
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let config: LevelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded level '{}' from {}", config.name, path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Upper-left corner of the paddle at the start of a turn
    pub fn paddle_start(&self) -> Point {
        Point::new(
            self.arena.width / 2.0 - self.paddle.width / 2.0,
            self.arena.height - self.paddle.height,
        )
    }

    /// Where a ball without an explicit position starts
    pub fn ball_start(&self) -> Point {
        Point::new(
            self.arena.width / 2.0 - self.ball_radius,
            self.paddle_start().y - 2.0 * self.ball_radius,
        )
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        let arena = &self.arena;
        positive("arena width", arena.width)?;
        positive("arena height", arena.height)?;
        non_negative("arena border", arena.border)?;
        non_negative("hud height", arena.hud_height)?;
        if arena.inner_width() <= 0.0 {
            return invalid(format!(
                "borders of {} leave no room in an arena {} wide",
                arena.border, arena.width
            ));
        }
        if arena.top_limit() >= arena.height {
            return invalid(format!(
                "top wall at {} is below the arena bottom {}",
                arena.top_limit(),
                arena.height
            ));
        }

        positive("paddle width", self.paddle.width)?;
        non_negative("paddle height", self.paddle.height)?;
        non_negative("paddle speed", self.paddle.speed)?;
        if self.paddle.width > arena.inner_width() {
            return invalid(format!(
                "paddle width {} exceeds the playable width {}",
                self.paddle.width,
                arena.inner_width()
            ));
        }

        non_negative("ball radius", self.ball_radius)?;
        if self.balls.is_empty() {
            return invalid("level has no balls".to_string());
        }
        for (i, ball) in self.balls.iter().enumerate() {
            if !ball.velocity.is_finite() {
                return invalid(format!("ball {i} has a non-finite velocity"));
            }
            if let Some(p) = ball.position
                && !(p.x.is_finite() && p.y.is_finite())
            {
                return invalid(format!("ball {i} has a non-finite position"));
            }
        }

        for (i, block) in self.blocks.iter().enumerate() {
            if !(block.x.is_finite() && block.y.is_finite()) {
                return invalid(format!("block {i} has a non-finite position"));
            }
            non_negative(&format!("block {i} width"), block.width)?;
            non_negative(&format!("block {i} height"), block.height)?;
        }
        Ok(())
    }
}

fn invalid(msg: String) -> Result<(), LevelError> {
    Err(LevelError::Invalid(msg))
}

fn positive(what: &str, value: f64) -> Result<(), LevelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        invalid(format!("{what} must be positive, got {value}"))
    }
}

fn non_negative(what: &str, value: f64) -> Result<(), LevelError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        invalid(format!("{what} must be non-negative, got {value}"))
    }
}
