//! Balls and the per-tick movement step

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::environment::{CollisionInfo, Environment};
use super::listener::Effects;
use super::point::Point;
use super::rect::Rect;
use super::segment::Segment;
use super::velocity::Velocity;

/// Stable identity of a ball within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BallId(pub u32);

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    id: BallId,
    center: Point,
    radius: f64,
    velocity: Velocity,
}

impl Ball {
    /// # Panics
    ///
    /// Panics if `radius` is negative or NaN.
    pub fn new(id: BallId, center: Point, radius: f64, velocity: Velocity) -> Self {
        assert!(radius >= 0.0, "ball radius must be non-negative, got {radius}");
        Self {
            id,
            center,
            radius,
            velocity,
        }
    }

    pub fn id(&self) -> BallId {
        self.id
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Advance one tick against `env`
    ///
    /// Returns the collision that was resolved, if any. Removals requested by
    /// the struck obstacle or its listeners land in `effects`.
    pub fn move_one_step(
        &mut self,
        env: &mut Environment,
        arena: &Arena,
        effects: &mut Effects,
    ) -> Option<CollisionInfo> {
        self.keep_inside(arena);

        // A paddle that slid over the ball would otherwise trap it
        if let Some(paddle) = env.paddle_rect()
            && paddle.contains_point(self.center)
        {
            self.center = Point::new(self.center.x, paddle.top_y() - self.radius);
        }

        let trajectory = Segment::new(self.center, self.velocity.apply_to(self.center));
        let Some(collision) = env.closest_collision(&trajectory) else {
            self.center = trajectory.end;
            return None;
        };

        let (dx, dy) = self.contact_offset(&collision.rect, collision.point);
        self.center = collision.point.offset(dx, dy);
        log::trace!(
            "Ball {:?} hit {:?} at ({:.2}, {:.2})",
            self.id,
            collision.obstacle,
            collision.point.x,
            collision.point.y
        );
        self.velocity = env.hit(
            collision.obstacle,
            self.id,
            collision.point,
            self.velocity,
            effects,
        );
        Some(collision)
    }

    /// Bounce off the top and side walls of the arena
    fn keep_inside(&mut self, arena: &Arena) {
        if self.center.y < arena.top_limit() {
            self.center.y = arena.top_limit() + self.radius;
            self.velocity = self.velocity.flip_dy();
        }
        if self.center.x > arena.right_limit() {
            self.center.x = arena.right_limit() - self.radius;
            self.velocity = self.velocity.flip_dx();
        }
        if self.center.x < arena.left_limit() {
            self.center.x = arena.left_limit() + self.radius;
            self.velocity = self.velocity.flip_dx();
        }
    }

    /// Offset from a contact point that leaves the ball flush with `rect`
    ///
    /// Faces are checked top, bottom, left, right; on a corner the x and y
    /// offsets both apply.
    fn contact_offset(&self, rect: &Rect, point: Point) -> (f64, f64) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if rect.top().contains(point) {
            dy = -self.radius;
        }
        if rect.bottom().contains(point) {
            dy = self.radius;
        }
        if rect.left().contains(point) {
            dx = -self.radius;
        }
        if rect.right().contains(point) {
            dx = self.radius;
        }
        (dx, dy)
    }
}
