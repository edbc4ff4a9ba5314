//! Rendering boundary
//!
//! The engine never paints pixels itself. Each tick's Draw step hands bodies
//! to a [`RenderSurface`]; hosts implement it over whatever canvas they have.

pub mod recorder;

pub use recorder::{DrawCommand, RecordingSurface};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_LINE_WIDTH;
use crate::sim::geom::Point;
use crate::sim::{Body, Shape};

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 160, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Drawing primitives the Draw step needs; calls never fail
pub trait RenderSurface {
    /// Stroke a closed polygon
    fn draw_polygon(&mut self, points: &[Point]);
    /// Stroke a line
    fn draw_segment(&mut self, p1: Point, p2: Point, width: f32);
    /// Fill an axis-aligned rectangle given by center and size
    fn draw_rect(&mut self, center: Point, size: Vec2, color: Color);
    /// Clear the whole play area
    fn clear(&mut self, size: Vec2);
}

/// Default look of a body: outline polygons and segments, fill boxes
pub fn draw_outline<K>(body: &Body<K>, surface: &mut dyn RenderSurface) {
    match body.shape() {
        Shape::Polygon { points } => surface.draw_polygon(points),
        Shape::Segment { p1, p2 } => surface.draw_segment(*p1, *p2, DEFAULT_LINE_WIDTH),
        Shape::Box { size } => surface.draw_rect(body.center(), *size, Color::default()),
    }
}
