//! Lunar lander
//!
//! Jagged terrain with flat landing pads. The lander falls under gravity and
//! must touch down upright with its base on a pad; touching terrain any other
//! way is a crash.

use std::rc::Rc;

use glam::Vec2;
use rand::Rng;

use super::Collaborators;
use crate::audio::AudioCue;
use crate::platform::{InputSource, Key};
use crate::renderer::{self, RenderSurface};
use crate::settings::WorldSettings;
use crate::sim::geom::{self, Point, Segment};
use crate::sim::{Behavior, Body, BodyHandle, Partner, Shape, TickContext, World};

const GRAVITY: f32 = 0.002;
const BOOST: f32 = 0.004;
const TURN_SPEED: f32 = 0.07;
/// Half-width of the lander's base
const HALF_BASE: f32 = 5.0;
/// Tilt allowed either side of vertical when touching down (degrees)
const LANDING_TOLERANCE: f32 = 10.0;
const FLAME_LENGTH: f32 = 10.0;
const PAD_LINE_WIDTH: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Lander,
    Mountain,
    Pad,
}

/// Generate terrain across the width and drop the lander at the top center
pub fn build(settings: WorldSettings, collab: &Collaborators) -> World<Kind> {
    let mut world = World::new(settings);
    let area = world.area();

    for (kind, p1, p2) in generate_terrain(&mut world, area) {
        add_terrain(&mut world, kind, p1, p2);
    }
    spawn_lander(&mut world, Vec2::new(area.x / 2.0, 15.0), collab);

    world
}

/// Terrain segments left to right, 30-40 px wide; every fourth is a near-flat pad
fn generate_terrain(world: &mut World<Kind>, area: Vec2) -> Vec<(Kind, Point, Point)> {
    let rng = world.rng();
    let mut ordinate = |min: f32, max: f32| min + (max - min) * rng.random::<f32>();

    let mut lines = Vec::new();
    let mut p1 = Vec2::new(0.0, ordinate(area.y * 0.7, area.y));
    while p1.x < area.x {
        let width = ordinate(30.0, 40.0);
        let (kind, p2) = if (3 + lines.len()) % 4 == 0 {
            // Pads only wobble by half a pixel
            (Kind::Pad, Vec2::new(p1.x + width, p1.y + ordinate(-0.5, 0.5)))
        } else {
            (Kind::Mountain, Vec2::new(p1.x + width, ordinate(area.y * 0.7, area.y)))
        };
        lines.push((kind, p1, p2));
        p1 = p2;
    }
    lines
}

pub fn add_terrain(world: &mut World<Kind>, kind: Kind, p1: Point, p2: Point) -> BodyHandle {
    let line_width = match kind {
        Kind::Pad => PAD_LINE_WIDTH,
        _ => 1.0,
    };
    world.add_body(Body::segment(kind, p1, p2), Terrain { line_width })
}

pub fn spawn_lander(world: &mut World<Kind>, center: Point, collab: &Collaborators) -> BodyHandle {
    world.add_body(
        lander_body(center),
        Lander::new(collab.input.clone(), collab.landing.clone()),
    )
}

/// Triangle: top, base right, base left
fn lander_body(center: Point) -> Body<Kind> {
    let h = HALF_BASE;
    Body::polygon(
        Kind::Lander,
        center,
        vec![
            center + Vec2::new(0.0, -h),
            center + Vec2::new(h, h * 3.0),
            center + Vec2::new(-h, h * 3.0),
        ],
    )
    .with_velocity(Vec2::ZERO)
}

/// The lander's base line
fn base(body: &Body<Kind>) -> Option<Segment> {
    match body.shape() {
        Shape::Polygon { points } if points.len() >= 3 => {
            Some(Segment::new(points[1], points[2]))
        }
        _ => None,
    }
}

fn pad_segment(body: &Body<Kind>) -> Option<Segment> {
    match (body.kind, body.shape()) {
        (Kind::Pad, Shape::Segment { p1, p2 }) => Some(Segment::new(*p1, *p2)),
        _ => None,
    }
}

/// Whether the accumulated rotation is within tolerance of upright
///
/// The angle is never normalised, so only the first turn either way counts.
pub fn is_upright(angle: f32) -> bool {
    let deg = angle.to_degrees() + 90.0;
    let near = |target: f32| (deg - target).abs() < LANDING_TOLERANCE;
    near(90.0) || near(270.0)
}

/// Static terrain line with its own stroke width
pub struct Terrain {
    line_width: f32,
}

impl Behavior<Kind> for Terrain {
    fn draw(&self, me: &Body<Kind>, surface: &mut dyn RenderSurface) {
        if let Shape::Segment { p1, p2 } = me.shape() {
            surface.draw_segment(*p1, *p2, self.line_width);
        }
    }
}

pub struct Lander {
    input: Rc<dyn InputSource>,
    landing: Rc<dyn AudioCue>,
    boosting: bool,
    landed: bool,
}

impl Lander {
    pub fn new(input: Rc<dyn InputSource>, landing: Rc<dyn AudioCue>) -> Self {
        Self {
            input,
            landing,
            boosting: false,
            landed: false,
        }
    }
}

impl Behavior<Kind> for Lander {
    fn update(&mut self, me: &mut Body<Kind>, ctx: &mut TickContext<'_, Kind>) {
        let mut velocity = me.velocity.unwrap_or(Vec2::ZERO);

        // Resting on exactly one pad cancels gravity
        let resting = base(me).is_some_and(|b| {
            ctx.others()
                .filter_map(|(_, other)| pad_segment(other))
                .filter(|pad| geom::segments_intersect(&b, pad))
                .count()
                == 1
        });
        if !resting {
            velocity.y += GRAVITY;
        }
        if self.boosting {
            velocity += geom::rotate(Vec2::new(0.0, -BOOST), Vec2::ZERO, me.angle);
        }
        me.velocity = Some(velocity);
        me.step();

        if self.input.is_key_down(Key::Left) {
            me.rotate(me.center(), -TURN_SPEED);
        } else if self.input.is_key_down(Key::Right) {
            me.rotate(me.center(), TURN_SPEED);
        }

        if self.input.is_key_down(Key::Up) && !self.boosting {
            self.boosting = true;
        } else if self.input.is_key_down(Key::Down) && self.boosting {
            self.boosting = false;
        }
    }

    fn collision(
        &mut self,
        me: &mut Body<Kind>,
        other: &Partner<Kind>,
        ctx: &mut TickContext<'_, Kind>,
    ) {
        let on_pad = match (base(me), pad_segment(&other.body)) {
            (Some(b), Some(pad)) => geom::segments_intersect(&b, &pad),
            _ => false,
        };

        if is_upright(me.angle) && on_pad {
            if !self.landed {
                log::info!("lander touched down at {:?}", me.center());
                self.landing.play();
                self.landed = true;
            }
            me.velocity = Some(Vec2::ZERO);
        } else if matches!(other.kind(), Kind::Mountain | Kind::Pad) {
            log::info!("lander crashed at {:?}", me.center());
            ctx.remove_self();
        }
    }

    fn draw(&self, me: &Body<Kind>, surface: &mut dyn RenderSurface) {
        renderer::draw_outline(me, surface);
        if !self.boosting {
            return;
        }
        if let Some(b) = base(me) {
            let flame = geom::rotate(Vec2::new(0.0, FLAME_LENGTH), Vec2::ZERO, me.angle);
            let tip = b.midpoint() + flame;
            surface.draw_segment(b.p1, tip, 1.0);
            surface.draw_segment(b.p2, tip, 1.0);
        }
    }
}
