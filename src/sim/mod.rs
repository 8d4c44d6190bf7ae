//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, no wall-clock time
//! - Stable iteration order (registration order for obstacles, spawn order for balls)
//! - No rendering or platform dependencies

pub mod arena;
pub mod ball;
pub mod environment;
pub mod listener;
pub mod obstacle;
pub mod point;
pub mod rect;
pub mod segment;
pub mod state;
pub mod tick;
pub mod velocity;

pub use arena::Arena;
pub use ball::{Ball, BallId};
pub use environment::{CollisionInfo, Environment};
pub use listener::{
    BallRemover, BlockRemover, Counter, Effects, HitEvent, HitListener, ListenerHandle, Listeners,
    ScoreTracker,
};
pub use obstacle::{Block, Boundary, BoundaryKind, Obstacle, ObstacleId, Paddle};
pub use point::Point;
pub use rect::Rect;
pub use segment::Segment;
pub use state::LevelState;
pub use tick::{PaddleMove, TickInput, tick};
pub use velocity::Velocity;
