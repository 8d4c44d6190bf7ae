//! Line segments and their intersection algebra
//!
//! Every comparison in here is exact. Vertical segments (Δx = 0) take their
//! own branch and never go through a slope division.

use std::cmp::Ordering;

use super::point::Point;
use super::rect::Rect;

/// A segment between two points; may degenerate to a single point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn middle(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Start and end coincide
    #[inline]
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Δx is exactly zero (single points count as vertical)
    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    /// Whether `p` lies inside this segment's bounding box (inclusive)
    pub fn contains(&self, p: Point) -> bool {
        let (x_lo, x_hi) = self.x_range();
        let (y_lo, y_hi) = self.y_range();
        p.x >= x_lo && p.x <= x_hi && p.y >= y_lo && p.y <= y_hi
    }

    pub fn is_intersecting(&self, other: &Segment) -> bool {
        self.intersection(other).is_some()
    }

    /// The unique intersection point of two segments, if there is one
    ///
    /// Collinear overlapping segments have no unique intersection and yield
    /// `None`, except for two vertical segments that only touch at a shared
    /// endpoint. The result is independent of argument order.
    pub fn intersection(&self, other: &Segment) -> Option<Point> {
        let (a, b) = if self.canonical_cmp(other).is_le() {
            (self, other)
        } else {
            (other, self)
        };
        a.ordered_intersection(b)
    }

    /// Among the intersections with `rect`'s sides, the one nearest to `start`
    ///
    /// Ties keep the side that was evaluated first (left, right, top, bottom).
    pub fn closest_intersection_to_start(&self, rect: &Rect) -> Option<Point> {
        let mut closest: Option<(Point, f64)> = None;
        for p in rect.intersection_points(self) {
            let dist = self.start.distance(p);
            match closest {
                Some((_, best)) if dist >= best => {}
                _ => closest = Some((p, dist)),
            }
        }
        closest.map(|(p, _)| p)
    }

    fn ordered_intersection(&self, other: &Segment) -> Option<Point> {
        if self.is_point() && other.is_point() {
            return (self.start == other.start).then_some(self.start);
        }

        let candidate = match (self.is_vertical(), other.is_vertical()) {
            (true, true) => return vertical_pair_intersection(self, other),
            (true, false) => {
                let x = self.start.x;
                Point::new(x, other.y_at(x))
            }
            (false, true) => {
                let x = other.start.x;
                Point::new(x, self.y_at(x))
            }
            (false, false) => {
                let m1 = self.slope();
                let m2 = other.slope();
                if m1 == m2 {
                    // Parallel or the same line
                    return None;
                }
                // m1(x - x1) + y1 = m2(x - x2) + y2
                let c1 = m1 * self.start.x - self.start.y;
                let c2 = m2 * other.start.x - other.start.y;
                let x = (c2 - c1) / (m2 - m1);
                // y from the flatter line, which is exact on a horizontal
                let flatter = if m2.abs() < m1.abs() { other } else { self };
                Point::new(x, flatter.y_at(x))
            }
        };

        (self.contains(candidate) && other.contains(candidate)).then_some(candidate)
    }

    /// Δy/Δx; only meaningful for non-vertical segments
    fn slope(&self) -> f64 {
        (self.start.y - self.end.y) / (self.start.x - self.end.x)
    }

    /// y on the infinite line through this segment at `x`
    fn y_at(&self, x: f64) -> f64 {
        self.slope() * (x - self.start.x) + self.start.y
    }

    fn x_range(&self) -> (f64, f64) {
        min_max(self.start.x, self.end.x)
    }

    fn y_range(&self) -> (f64, f64) {
        min_max(self.start.y, self.end.y)
    }

    fn canonical_cmp(&self, other: &Segment) -> Ordering {
        let lhs = [self.start.x, self.start.y, self.end.x, self.end.y];
        let rhs = [other.start.x, other.start.y, other.end.x, other.end.y];
        lhs.iter()
            .zip(rhs.iter())
            .map(|(a, b)| a.total_cmp(b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Both segments are vertical and at least one is a proper segment
fn vertical_pair_intersection(a: &Segment, b: &Segment) -> Option<Point> {
    if a.is_point() {
        return b.contains(a.start).then_some(a.start);
    }
    if b.is_point() {
        return a.contains(b.start).then_some(b.start);
    }
    if a.start.x != b.start.x {
        return None;
    }

    let (a_lo, a_hi) = a.y_range();
    let (b_lo, b_hi) = b.y_range();
    // Stacked end to end: the shared endpoint is the only common point
    if a_lo == b_hi {
        return Some(Point::new(b.start.x, b_hi));
    }
    if a_hi == b_lo {
        return Some(Point::new(b.start.x, b_lo));
    }
    None
}

#[inline]
fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::from_coords(x1, y1, x2, y2)
    }

    #[test]
    fn test_length_and_middle() {
        let s = seg(0.0, 0.0, 6.0, 8.0);
        assert_eq!(s.length(), 10.0);
        assert_eq!(s.middle(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_crossing_diagonals() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(0.0, 10.0, 10.0, 0.0);
        assert_eq!(a.intersection(&b), Some(Point::new(5.0, 5.0)));
        assert!(a.is_intersecting(&b));
    }

    #[test]
    fn test_lines_cross_outside_segments() {
        // Infinite lines meet at (5, 5) but the second segment stops short
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(0.0, 10.0, 4.0, 6.0);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn test_vertical_and_horizontal() {
        let v = seg(5.0, 0.0, 5.0, 10.0);
        let h = seg(0.0, 3.0, 10.0, 3.0);
        assert_eq!(v.intersection(&h), Some(Point::new(5.0, 3.0)));
        assert_eq!(h.intersection(&v), Some(Point::new(5.0, 3.0)));
    }

    #[test]
    fn test_parallel_segments() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(0.0, 1.0, 10.0, 1.0);
        assert_eq!(a.intersection(&b), None);

        // Collinear overlap has no unique point
        let c = seg(5.0, 0.0, 15.0, 0.0);
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_vertical_pair_touching_end_to_end() {
        let upper = seg(2.0, 0.0, 2.0, 5.0);
        let lower = seg(2.0, 5.0, 2.0, 9.0);
        assert_eq!(upper.intersection(&lower), Some(Point::new(2.0, 5.0)));
        assert_eq!(lower.intersection(&upper), Some(Point::new(2.0, 5.0)));
    }

    #[test]
    fn test_vertical_pair_overlapping_or_apart() {
        let a = seg(2.0, 0.0, 2.0, 5.0);
        assert_eq!(a.intersection(&seg(2.0, 3.0, 2.0, 9.0)), None);
        assert_eq!(a.intersection(&seg(3.0, 0.0, 3.0, 5.0)), None);
    }

    #[test]
    fn test_point_segments() {
        let p = seg(1.0, 1.0, 1.0, 1.0);
        assert_eq!(p.intersection(&p), Some(Point::new(1.0, 1.0)));
        assert_eq!(p.intersection(&seg(2.0, 2.0, 2.0, 2.0)), None);
    }

    #[test]
    fn test_point_on_vertical_segment_either_order() {
        let p = seg(2.0, 3.0, 2.0, 3.0);
        let v = seg(2.0, 0.0, 2.0, 10.0);
        assert_eq!(p.intersection(&v), Some(Point::new(2.0, 3.0)));
        assert_eq!(v.intersection(&p), Some(Point::new(2.0, 3.0)));
    }

    #[test]
    fn test_point_on_sloped_segment() {
        let p = seg(2.0, 2.0, 2.0, 2.0);
        let diag = seg(0.0, 0.0, 4.0, 4.0);
        assert_eq!(diag.intersection(&p), Some(Point::new(2.0, 2.0)));
        assert_eq!(diag.intersection(&seg(2.0, 3.0, 2.0, 3.0)), None);
    }

    #[test]
    fn test_shared_endpoint() {
        let a = seg(0.0, 0.0, 4.0, 2.0);
        let b = seg(4.0, 2.0, 8.0, 0.0);
        assert_eq!(a.intersection(&b), Some(Point::new(4.0, 2.0)));
    }

    #[test]
    fn test_off_grid_diagonal_hits_horizontal_face_exactly() {
        let rect = Rect::new(Point::new(100.0, 100.0), 50.0, 20.0);
        let start = Point::new(97.3788, 93.0841);
        let s = Segment::new(start, start.offset(4.133, 9.128));

        for hit in [rect.top().intersection(&s), s.intersection(&rect.top())] {
            let p = hit.expect("top face crossed");
            assert_eq!(p.y, 100.0);
            assert!(p.x > 100.0 && p.x < 101.0);
        }
        let closest = s.closest_intersection_to_start(&rect).expect("hit");
        assert_eq!(closest.y, 100.0);
    }

    #[test]
    fn test_off_grid_diagonal_hits_bottom_face_exactly() {
        let rect = Rect::new(Point::new(100.0, 100.0), 50.0, 20.0);
        let start = Point::new(131.71, 127.3);
        let s = Segment::new(start, start.offset(-3.07, -9.91));
        let p = s.closest_intersection_to_start(&rect).expect("hit");
        assert_eq!(p.y, 120.0);
    }

    #[test]
    fn test_closest_intersection_to_start() {
        let rect = Rect::new(Point::new(10.0, 0.0), 10.0, 10.0);
        let s = seg(0.0, 5.0, 30.0, 5.0);
        assert_eq!(s.closest_intersection_to_start(&rect), Some(Point::new(10.0, 5.0)));

        let reversed = seg(30.0, 5.0, 0.0, 5.0);
        assert_eq!(
            reversed.closest_intersection_to_start(&rect),
            Some(Point::new(20.0, 5.0))
        );
    }

    #[test]
    fn test_closest_intersection_miss() {
        let rect = Rect::new(Point::new(10.0, 0.0), 10.0, 10.0);
        assert_eq!(seg(0.0, 20.0, 30.0, 20.0).closest_intersection_to_start(&rect), None);
    }

    #[test]
    fn test_corner_tie_prefers_left_side() {
        // Diagonal hits the upper-left corner, which lies on both left and top
        let rect = Rect::new(Point::new(10.0, 10.0), 10.0, 10.0);
        let s = seg(0.0, 0.0, 10.0, 10.0);
        let hits = rect.intersection_points(&s);
        assert_eq!(hits, vec![Point::new(10.0, 10.0), Point::new(10.0, 10.0)]);
        assert_eq!(s.closest_intersection_to_start(&rect), Some(Point::new(10.0, 10.0)));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn coord() -> impl Strategy<Value = f64> {
            prop_oneof![
                (-100i32..=100).prop_map(f64::from),
                -100.0f64..100.0,
            ]
        }

        fn segment() -> impl Strategy<Value = Segment> {
            (coord(), coord(), coord(), coord())
                .prop_map(|(x1, y1, x2, y2)| Segment::from_coords(x1, y1, x2, y2))
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                max_global_rejects: 16384,
                ..ProptestConfig::default()
            })]

            #[test]
            fn intersection_is_symmetric(a in segment(), b in segment()) {
                prop_assert_eq!(a.intersection(&b), b.intersection(&a));
            }

            #[test]
            fn intersection_lies_in_both_bounding_boxes(a in segment(), b in segment()) {
                if let Some(p) = a.intersection(&b) {
                    prop_assert!(a.contains(p), "{:?} outside {:?}", p, a);
                    prop_assert!(b.contains(p), "{:?} outside {:?}", p, b);
                }
            }

            #[test]
            fn segment_outside_rect_never_hits(
                x in -50.0f64..50.0,
                y in -50.0f64..50.0,
                w in 0.0f64..40.0,
                h in 0.0f64..40.0,
                side in 0u8..4,
                gap in 0.001f64..30.0,
                a1 in -100.0f64..100.0,
                a2 in -100.0f64..100.0,
                d1 in 0.0f64..30.0,
                d2 in 0.0f64..30.0,
            ) {
                let rect = Rect::new(Point::new(x, y), w, h);
                // a1/a2 run along the side, d1/d2 move further away from it
                let s = match side {
                    0 => Segment::from_coords(x - gap - d1, a1, x - gap - d2, a2),
                    1 => Segment::from_coords(x + w + gap + d1, a1, x + w + gap + d2, a2),
                    2 => Segment::from_coords(a1, y - gap - d1, a2, y - gap - d2),
                    _ => Segment::from_coords(a1, y + h + gap + d1, a2, y + h + gap + d2),
                };
                prop_assert!(rect.intersection_points(&s).is_empty(), "{:?} hit {:?}", s, rect);
                prop_assert_eq!(s.closest_intersection_to_start(&rect), None);
            }

            #[test]
            fn crossing_top_face_is_detected(
                x in -50.0f64..50.0,
                y in -50.0f64..50.0,
                w in 1.0f64..60.0,
                h in 1.0f64..40.0,
                sx in -80.0f64..120.0,
                rise in 0.5f64..20.0,
                fall in 0.5f64..20.0,
                dx in prop_oneof![Just(0.0), 0.5f64..20.0, -20.0f64..-0.5],
            ) {
                let rect = Rect::new(Point::new(x, y), w, h);
                let s = Segment::from_coords(sx, y - rise, sx + dx, y + fall);
                let cross_x = sx + dx * rise / (rise + fall);
                prop_assume!(cross_x > x + 1e-6 && cross_x < x + w - 1e-6);

                let top = rect.top().intersection(&s);
                prop_assert_eq!(top.map(|p| p.y), Some(y));
                let closest = s.closest_intersection_to_start(&rect);
                prop_assert_eq!(closest.map(|p| p.y), Some(y));
            }

            #[test]
            fn closest_intersection_is_nearest(a in segment(), x in -50.0f64..50.0, y in -50.0f64..50.0) {
                let rect = Rect::new(Point::new(x, y), 20.0, 10.0);
                let hits = rect.intersection_points(&a);
                if let Some(best) = a.closest_intersection_to_start(&rect) {
                    let best_dist = a.start.distance(best);
                    for p in hits {
                        prop_assert!(best_dist <= a.start.distance(p));
                    }
                } else {
                    prop_assert!(hits.is_empty());
                }
            }
        }
    }
}
