//! Axis-aligned rectangles
//!
//! A rectangle is immutable: anything that moves (the paddle) swaps in a new
//! `Rect` rather than editing coordinates in place.

use super::point::Point;
use super::segment::Segment;

/// An axis-aligned rectangle anchored at its upper-left corner
///
/// Zero width or height is allowed; a zero-height rectangle behaves as a
/// line obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    upper_left: Point,
    width: f64,
    height: f64,
}

impl Rect {
    /// # Panics
    ///
    /// Panics if `width` or `height` is negative or NaN.
    pub fn new(upper_left: Point, width: f64, height: f64) -> Self {
        assert!(width >= 0.0, "rectangle width must be non-negative, got {width}");
        assert!(height >= 0.0, "rectangle height must be non-negative, got {height}");
        Self {
            upper_left,
            width,
            height,
        }
    }

    #[inline]
    pub fn upper_left(&self) -> Point {
        self.upper_left
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn left_x(&self) -> f64 {
        self.upper_left.x
    }

    #[inline]
    pub fn right_x(&self) -> f64 {
        self.upper_left.x + self.width
    }

    #[inline]
    pub fn top_y(&self) -> f64 {
        self.upper_left.y
    }

    #[inline]
    pub fn bottom_y(&self) -> f64 {
        self.upper_left.y + self.height
    }

    pub fn center(&self) -> Point {
        self.upper_left.offset(self.width / 2.0, self.height / 2.0)
    }

    /// Same size, new position
    pub fn moved_to(&self, upper_left: Point) -> Rect {
        Rect::new(upper_left, self.width, self.height)
    }

    fn upper_right(&self) -> Point {
        Point::new(self.right_x(), self.top_y())
    }

    fn lower_left(&self) -> Point {
        Point::new(self.left_x(), self.bottom_y())
    }

    fn lower_right(&self) -> Point {
        Point::new(self.right_x(), self.bottom_y())
    }

    pub fn top(&self) -> Segment {
        Segment::new(self.upper_left, self.upper_right())
    }

    pub fn bottom(&self) -> Segment {
        Segment::new(self.lower_left(), self.lower_right())
    }

    pub fn left(&self) -> Segment {
        Segment::new(self.upper_left, self.lower_left())
    }

    pub fn right(&self) -> Segment {
        Segment::new(self.lower_right(), self.upper_right())
    }

    /// Intersections of `segment` with each side, in side order left, right,
    /// top, bottom
    ///
    /// A corner crossing shows up once per side it lies on.
    pub fn intersection_points(&self, segment: &Segment) -> Vec<Point> {
        [self.left(), self.right(), self.top(), self.bottom()]
            .iter()
            .filter_map(|side| side.intersection(segment))
            .collect()
    }

    /// Inclusive containment, x and y ranges checked independently
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left_x() && p.x <= self.right_x() && p.y >= self.top_y() && p.y <= self.bottom_y()
    }
}
