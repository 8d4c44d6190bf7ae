//! Collision surfaces and their hit-response rules
//!
//! Every obstacle exposes a collision rectangle and a `hit()` that returns
//! the ball's new velocity. `hit()` is also where an obstacle updates its
//! own state and notifies listeners.

use serde::{Deserialize, Serialize};

use super::ball::BallId;
use super::listener::{Effects, HitEvent, ListenerHandle, Listeners};
use super::point::Point;
use super::rect::Rect;
use super::velocity::Velocity;

/// Stable identity of an obstacle within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

/// Reflect dy off the top/bottom faces and dx off the left/right faces
///
/// A corner lies on two faces and flips both components.
fn reflect_off_faces(rect: &Rect, point: Point, velocity: Velocity) -> Velocity {
    let mut velocity = velocity;
    if rect.bottom().contains(point) || rect.top().contains(point) {
        velocity = velocity.flip_dy();
    }
    if rect.right().contains(point) || rect.left().contains(point) {
        velocity = velocity.flip_dx();
    }
    velocity
}

/// A destructible block
#[derive(Debug, Clone)]
pub struct Block {
    id: ObstacleId,
    rect: Rect,
    /// Hits left; 0 means destroyed and awaiting removal
    durability: u32,
    listeners: Listeners,
}

impl Block {
    pub fn new(id: ObstacleId, rect: Rect, durability: u32) -> Self {
        Self {
            id,
            rect,
            durability,
            listeners: Listeners::default(),
        }
    }

    pub fn id(&self) -> ObstacleId {
        self.id
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn durability(&self) -> u32 {
        self.durability
    }

    pub fn add_hit_listener(&mut self, listener: ListenerHandle) {
        self.listeners.add(listener);
    }

    pub fn remove_hit_listener(&mut self, listener: &ListenerHandle) {
        self.listeners.remove(listener);
    }

    fn hit(
        &mut self,
        ball: BallId,
        point: Point,
        velocity: Velocity,
        effects: &mut Effects,
    ) -> Velocity {
        self.durability = self.durability.saturating_sub(1);
        let event = HitEvent {
            obstacle: self.id,
            ball,
            point,
            durability: Some(self.durability),
        };
        self.listeners.notify(&event, effects);
        reflect_off_faces(&self.rect, point, velocity)
    }
}

/// Outgoing headings for paddle zones 1, 2, 4 and 5, left to right
///
/// Zone 3 (the middle) is a plain vertical reflection.
const PADDLE_ZONE_ANGLES: [f64; 5] = [300.0, 330.0, 0.0, 30.0, 60.0];
const PADDLE_ZONES: usize = 5;
const PADDLE_CENTER_ZONE: usize = 3;

/// The player-controlled paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    id: ObstacleId,
    rect: Rect,
    /// Horizontal distance covered per tick of input
    speed: f64,
}

impl Paddle {
    pub fn new(id: ObstacleId, rect: Rect, speed: f64) -> Self {
        Self { id, rect, speed }
    }

    pub fn id(&self) -> ObstacleId {
        self.id
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Shift horizontally by `dx`, keeping the left edge within
    /// `[min_x, max_x]`
    pub fn slide(&mut self, dx: f64, min_x: f64, max_x: f64) {
        let ul = self.rect.upper_left();
        let x = (ul.x + dx).min(max_x).max(min_x);
        self.rect = self.rect.moved_to(Point::new(x, ul.y));
    }

    /// Which of the five equal-width zones (1-based, from the left) `x` falls in
    pub fn zone(&self, x: f64) -> usize {
        let section = self.rect.width() / PADDLE_ZONES as f64;
        let left = self.rect.left_x();
        (1..PADDLE_ZONES)
            .rev()
            .find(|&k| x >= left + section * k as f64)
            .map_or(1, |k| k + 1)
    }

    fn hit(&self, point: Point, velocity: Velocity) -> Velocity {
        let zone = self.zone(point.x);
        if zone == PADDLE_CENTER_ZONE {
            return velocity.flip_dy();
        }
        Velocity::from_angle_and_speed(PADDLE_ZONE_ANGLES[zone - 1], velocity.speed())
    }
}

/// What happens to a ball that reaches an arena boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryKind {
    /// Indestructible wall, reflects like a block
    Wall,
    /// Removes the ball instead of bouncing it
    Death,
}

/// An arena edge
#[derive(Debug, Clone)]
pub struct Boundary {
    id: ObstacleId,
    rect: Rect,
    kind: BoundaryKind,
    listeners: Listeners,
}

impl Boundary {
    pub fn new(id: ObstacleId, rect: Rect, kind: BoundaryKind) -> Self {
        Self {
            id,
            rect,
            kind,
            listeners: Listeners::default(),
        }
    }

    pub fn id(&self) -> ObstacleId {
        self.id
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    pub fn add_hit_listener(&mut self, listener: ListenerHandle) {
        self.listeners.add(listener);
    }

    pub fn remove_hit_listener(&mut self, listener: &ListenerHandle) {
        self.listeners.remove(listener);
    }

    fn hit(
        &self,
        ball: BallId,
        point: Point,
        velocity: Velocity,
        effects: &mut Effects,
    ) -> Velocity {
        let event = HitEvent {
            obstacle: self.id,
            ball,
            point,
            durability: None,
        };
        match self.kind {
            BoundaryKind::Wall => {
                self.listeners.notify(&event, effects);
                reflect_off_faces(&self.rect, point, velocity)
            }
            BoundaryKind::Death => {
                effects.remove_ball(ball);
                self.listeners.notify(&event, effects);
                velocity
            }
        }
    }
}

/// Anything a ball can collide with
#[derive(Debug, Clone)]
pub enum Obstacle {
    Block(Block),
    Paddle(Paddle),
    Boundary(Boundary),
}

impl Obstacle {
    pub fn id(&self) -> ObstacleId {
        match self {
            Obstacle::Block(b) => b.id,
            Obstacle::Paddle(p) => p.id,
            Obstacle::Boundary(b) => b.id,
        }
    }

    pub fn collision_rect(&self) -> &Rect {
        match self {
            Obstacle::Block(b) => &b.rect,
            Obstacle::Paddle(p) => &p.rect,
            Obstacle::Boundary(b) => &b.rect,
        }
    }

    /// Resolve a hit at `point` and return the ball's new velocity
    pub fn hit(
        &mut self,
        ball: BallId,
        point: Point,
        velocity: Velocity,
        effects: &mut Effects,
    ) -> Velocity {
        match self {
            Obstacle::Block(b) => b.hit(ball, point, velocity, effects),
            Obstacle::Paddle(p) => p.hit(point, velocity),
            Obstacle::Boundary(b) => b.hit(ball, point, velocity, effects),
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Obstacle::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_paddle(&self) -> Option<&Paddle> {
        match self {
            Obstacle::Paddle(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_paddle_mut(&mut self) -> Option<&mut Paddle> {
        match self {
            Obstacle::Paddle(p) => Some(p),
            _ => None,
        }
    }

    /// Attach a listener; paddles do not emit hit events and ignore it
    pub fn add_hit_listener(&mut self, listener: ListenerHandle) {
        match self {
            Obstacle::Block(b) => b.add_hit_listener(listener),
            Obstacle::Boundary(b) => b.add_hit_listener(listener),
            Obstacle::Paddle(_) => {}
        }
    }
}

impl From<Block> for Obstacle {
    fn from(b: Block) -> Self {
        Obstacle::Block(b)
    }
}

impl From<Paddle> for Obstacle {
    fn from(p: Paddle) -> Self {
        Obstacle::Paddle(p)
    }
}

impl From<Boundary> for Obstacle {
    fn from(b: Boundary) -> Self {
        Obstacle::Boundary(b)
    }
}
