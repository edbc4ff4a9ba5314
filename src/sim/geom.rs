//! Pure 2D geometry for body collision
//!
//! Points are `glam::Vec2`. Everything here is stateless and allocation-light;
//! the only allocating helper is [`edges`], which turns a closed polygon into
//! its segment list.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A point in world coordinates
pub type Point = Vec2;

/// A finite line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Midpoint of the segment
    #[inline]
    pub fn midpoint(&self) -> Point {
        (self.p1 + self.p2) * 0.5
    }
}

/// Axis-aligned rectangle given by its center and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Point,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Point, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Corners in clockwise screen order starting top-left
    pub fn corners(&self) -> [Point; 4] {
        [
            Vec2::new(self.left(), self.top()),
            Vec2::new(self.right(), self.top()),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.left(), self.bottom()),
        ]
    }
}

/// Translate a point by a displacement
#[inline]
pub fn translate(p: Point, v: Vec2) -> Point {
    Vec2::new(p.x + v.x, p.y + v.y)
}

/// Vector from `from` to `to`
#[inline]
pub fn vector_to(from: Point, to: Point) -> Vec2 {
    Vec2::new(to.x - from.x, to.y - from.y)
}

/// Rotate `p` about `pivot` by `angle` radians
///
/// With screen coordinates (y grows downward) a positive angle turns clockwise
/// on screen. Games steer with `-delta` for left and `+delta` for right.
#[inline]
pub fn rotate(p: Point, pivot: Point, angle: f32) -> Point {
    let (sin, cos) = angle.sin_cos();
    let dx = p.x - pivot.x;
    let dy = p.y - pivot.y;
    Vec2::new(dx * cos - dy * sin + pivot.x, dx * sin + dy * cos + pivot.y)
}

/// Parametric segment intersection test
///
/// Parallel and collinear segments never intersect, even when they overlap.
/// Touching at an endpoint counts as intersecting.
pub fn segments_intersect(a: &Segment, b: &Segment) -> bool {
    let d = (b.p2.y - b.p1.y) * (a.p2.x - a.p1.x) - (b.p2.x - b.p1.x) * (a.p2.y - a.p1.y);
    if d == 0.0 {
        return false;
    }

    let n1 = (b.p2.x - b.p1.x) * (a.p1.y - b.p1.y) - (b.p2.y - b.p1.y) * (a.p1.x - b.p1.x);
    let n2 = (a.p2.x - a.p1.x) * (a.p1.y - b.p1.y) - (a.p2.y - a.p1.y) * (a.p1.x - b.p1.x);

    let ua = n1 / d;
    let ub = n2 / d;
    (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
}

/// Strict separating-axis overlap of two axis-aligned boxes
///
/// Boxes that only share an edge or a corner do not overlap.
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    !(a.right() <= b.left()
        || a.bottom() <= b.top()
        || a.left() >= b.right()
        || a.top() >= b.bottom())
}

/// Edges of a closed polygon: point[i] -> point[i+1], last -> first
pub fn edges(points: &[Point]) -> Vec<Segment> {
    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(points.len());
    let mut previous = first;
    for &p in rest {
        lines.push(Segment::new(previous, p));
        previous = p;
    }
    lines.push(Segment::new(previous, first));
    lines
}

/// True if any segment of `a` intersects any segment of `b`
pub fn any_segments_intersect(a: &[Segment], b: &[Segment]) -> bool {
    a.iter()
        .any(|sa| b.iter().any(|sb| segments_intersect(sa, sb)))
}
