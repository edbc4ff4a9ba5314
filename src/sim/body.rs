//! Bodies: the collidable entities the world owns
//!
//! A body's shape is always stored in absolute world coordinates. `center` and
//! the shape move together through [`Body::move_to`], [`Body::translate`] and
//! [`Body::rotate`]; nothing else should write the shape's points.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::{self, Aabb, Point, Segment};

/// Shape representations a body can carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Closed polygon, edges implied point[i] -> point[i+1] and last -> first
    Polygon { points: Vec<Point> },
    /// A single line segment
    Segment { p1: Point, p2: Point },
    /// Axis-aligned box around the body center
    Box { size: Vec2 },
}

impl Shape {
    /// Tag naming the variant, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Polygon { .. } => "polygon",
            Shape::Segment { .. } => "segment",
            Shape::Box { .. } => "box",
        }
    }
}

/// Discriminator a game uses to tell its bodies apart
pub trait BodyKind: Copy + Eq + std::fmt::Debug + 'static {}

impl<T: Copy + Eq + std::fmt::Debug + 'static> BodyKind for T {}

/// A collidable entity
///
/// `K` is the game's discriminator (asteroid, bullet, wall...). Reactions
/// branch on the partner's `kind` rather than on concrete types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body<K> {
    pub kind: K,
    center: Point,
    shape: Shape,
    /// Per-tick displacement; `None` for static bodies
    pub velocity: Option<Vec2>,
    /// Accumulated rotation in radians (unbounded)
    pub angle: f32,
}

impl<K> Body<K> {
    /// Polygon body; the polygon must have at least two points
    pub fn polygon(kind: K, center: Point, points: Vec<Point>) -> Self {
        debug_assert!(points.len() >= 2, "polygon bodies need at least two points");
        Self {
            kind,
            center,
            shape: Shape::Polygon { points },
            velocity: None,
            angle: 0.0,
        }
    }

    /// Segment body, centered on the segment's midpoint
    pub fn segment(kind: K, p1: Point, p2: Point) -> Self {
        Self {
            kind,
            center: Segment::new(p1, p2).midpoint(),
            shape: Shape::Segment { p1, p2 },
            velocity: None,
            angle: 0.0,
        }
    }

    /// Axis-aligned box body
    pub fn aabb(kind: K, center: Point, size: Vec2) -> Self {
        Self {
            kind,
            center,
            shape: Shape::Box { size },
            velocity: None,
            angle: 0.0,
        }
    }

    /// Builder: give the body an initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = Some(velocity);
        self
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Move the body so its center lands on `new_center`, carrying the shape along
    pub fn move_to(&mut self, new_center: Point) {
        let delta = geom::vector_to(self.center, new_center);
        self.translate(delta);
    }

    /// Translate center and every shape point by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.center = geom::translate(self.center, delta);
        match &mut self.shape {
            Shape::Polygon { points } => {
                for p in points.iter_mut() {
                    *p = geom::translate(*p, delta);
                }
            }
            Shape::Segment { p1, p2 } => {
                *p1 = geom::translate(*p1, delta);
                *p2 = geom::translate(*p2, delta);
            }
            Shape::Box { .. } => {}
        }
    }

    /// Advance by one tick of velocity (no-op for static bodies)
    pub fn step(&mut self) {
        if let Some(v) = self.velocity {
            self.translate(v);
        }
    }

    /// Rotate the shape about `pivot` and accumulate `angle`
    ///
    /// Boxes stay axis-aligned; only their center moves when the pivot is
    /// elsewhere.
    pub fn rotate(&mut self, pivot: Point, angle: f32) {
        match &mut self.shape {
            Shape::Polygon { points } => {
                for p in points.iter_mut() {
                    *p = geom::rotate(*p, pivot, angle);
                }
            }
            Shape::Segment { p1, p2 } => {
                *p1 = geom::rotate(*p1, pivot, angle);
                *p2 = geom::rotate(*p2, pivot, angle);
            }
            Shape::Box { .. } => {}
        }
        self.center = geom::rotate(self.center, pivot, angle);
        self.angle += angle;
    }

    /// Absolute points describing the outline (box corners for boxes)
    pub fn points(&self) -> Vec<Point> {
        match &self.shape {
            Shape::Polygon { points } => points.clone(),
            Shape::Segment { p1, p2 } => vec![*p1, *p2],
            Shape::Box { .. } => self.aabb_bounds().corners().to_vec(),
        }
    }

    /// Edge segments used by the line-intersection narrow phase
    pub fn edges(&self) -> Vec<Segment> {
        match &self.shape {
            Shape::Polygon { points } => geom::edges(points),
            Shape::Segment { p1, p2 } => vec![Segment::new(*p1, *p2)],
            Shape::Box { .. } => geom::edges(&self.aabb_bounds().corners()),
        }
    }

    /// Tight axis-aligned bounds of the shape
    pub fn aabb_bounds(&self) -> Aabb {
        match &self.shape {
            Shape::Box { size } => Aabb::new(self.center, *size),
            Shape::Polygon { points } => bounds_of(points),
            Shape::Segment { p1, p2 } => bounds_of(&[*p1, *p2]),
        }
    }
}

fn bounds_of(points: &[Point]) -> Aabb {
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    for p in points {
        min = min.min(*p);
        max = max.max(*p);
    }
    Aabb::new((min + max) * 0.5, max - min)
}
