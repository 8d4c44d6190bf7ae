//! Points in arena space
//!
//! Screen convention: x grows to the right, y grows downward.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An immutable position in arena coordinates
///
/// Equality is exact coordinate equality. The collision code relies on this,
/// so there is deliberately no tolerance here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    /// This point offset by (dx, dy)
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point::new(v.x, v.y)
    }
}
