//! A render surface that records what it was asked to draw

use glam::Vec2;

use super::{Color, RenderSurface};
use crate::sim::geom::Point;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Polygon { points: Vec<Point> },
    Segment { p1: Point, p2: Point, width: f32 },
    Rect { center: Point, size: Vec2, color: Color },
    Clear { size: Vec2 },
}

/// Records draw calls since the last clear (and the clear itself)
///
/// Used by tests and the headless runner; `total_calls` keeps counting across
/// frames.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    /// Commands of the current frame, starting with its `Clear`
    pub commands: Vec<DrawCommand>,
    /// Draw calls over the surface's lifetime, clears excluded
    pub total_calls: u64,
    /// Frames started (number of clears)
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls in the current frame, clear excluded
    pub fn frame_calls(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| !matches!(c, DrawCommand::Clear { .. }))
            .count()
    }

    /// Segments drawn this frame with the given width
    pub fn segments_with_width(&self, width: f32) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Segment { width: w, .. } if *w == width))
            .count()
    }

    fn push(&mut self, command: DrawCommand) {
        self.total_calls += 1;
        self.commands.push(command);
    }
}

impl RenderSurface for RecordingSurface {
    fn draw_polygon(&mut self, points: &[Point]) {
        self.push(DrawCommand::Polygon {
            points: points.to_vec(),
        });
    }

    fn draw_segment(&mut self, p1: Point, p2: Point, width: f32) {
        self.push(DrawCommand::Segment { p1, p2, width });
    }

    fn draw_rect(&mut self, center: Point, size: Vec2, color: Color) {
        self.push(DrawCommand::Rect {
            center,
            size,
            color,
        });
    }

    fn clear(&mut self, size: Vec2) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { size });
        self.frames += 1;
    }
}
