//! Per-tick velocity
//!
//! Angles are in degrees with 0° pointing up the screen and increasing
//! clockwise, so 90° is to the right.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::point::Point;

/// Displacement applied to a ball every tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: f64,
    pub dy: f64,
}

impl Velocity {
    #[inline]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Build a velocity from a heading (degrees, 0° = up) and a speed
    pub fn from_angle_and_speed(angle: f64, speed: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self::new(sin * speed, -cos * speed)
    }

    /// Magnitude of the velocity
    #[inline]
    pub fn speed(&self) -> f64 {
        self.as_dvec2().length()
    }

    /// Where a point ends up after one unobstructed tick
    #[inline]
    pub fn apply_to(&self, p: Point) -> Point {
        p.offset(self.dx, self.dy)
    }

    #[inline]
    pub fn flip_dx(self) -> Self {
        Self::new(-self.dx, self.dy)
    }

    #[inline]
    pub fn flip_dy(self) -> Self {
        Self::new(self.dx, -self.dy)
    }

    #[inline]
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.dx, self.dy)
    }
}
