//! Asteroids
//!
//! A wraparound field of jagged rocks and a triangular ship. Rocks hit by the
//! ship or a bullet break into two smaller rocks until they are down to the
//! smallest size.

use std::f32::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::Collaborators;
use crate::audio::AudioCue;
use crate::platform::{Clock, InputSource, Key};
use crate::settings::WorldSettings;
use crate::sim::geom::{self, Point};
use crate::sim::{Behavior, Body, BodyHandle, Partner, TickContext, World};

/// Radius of a freshly spawned rock
pub const ASTEROID_RADIUS: f32 = 30.0;
/// Radius lost on every split; rocks at this radius or below just vanish
pub const SPLIT_STEP: f32 = 10.0;
const ASTEROID_POINTS: usize = 10;

const TURN_SPEED: f32 = 0.1;
const THRUST: f32 = 0.05;
const BULLET_SPEED: f32 = 5.0;
/// Minimum time between shots (ms)
const FIRE_INTERVAL: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Asteroid,
    Ship,
    Bullet,
}

/// Lay out three rocks and the ship
pub fn build(settings: WorldSettings, collab: &Collaborators) -> World<Kind> {
    let mut world = World::new(settings);
    let area = world.area();

    for spot in [
        Vec2::new(area.x * 0.25, area.y * 0.25),
        Vec2::new(area.x * 0.75, area.y * 0.25),
        Vec2::new(area.x * 0.5, area.y * 0.75),
    ] {
        spawn_asteroid(&mut world, spot, ASTEROID_RADIUS, collab);
    }
    spawn_ship(&mut world, area * 0.5, collab);

    world
}

pub fn spawn_asteroid(
    world: &mut World<Kind>,
    center: Point,
    radius: f32,
    collab: &Collaborators,
) -> BodyHandle {
    let body = asteroid_body(world.rng(), center, radius);
    world.add_body(body, Asteroid::new(radius, collab.explosion.clone()))
}

pub fn spawn_ship(world: &mut World<Kind>, center: Point, collab: &Collaborators) -> BodyHandle {
    world.add_body(
        ship_body(center),
        Ship::new(collab.input.clone(), collab.clock.clone(), collab.shot.clone()),
    )
}

/// Jagged ring of points around `center` drifting in a random direction
fn asteroid_body(rng: &mut Pcg32, center: Point, radius: f32) -> Body<Kind> {
    let points = (0..ASTEROID_POINTS)
        .map(|i| {
            let jag = 0.2 + rng.random::<f32>();
            let p = center + Vec2::new(radius * jag, -radius * jag);
            geom::rotate(p, center, i as f32 * TAU / ASTEROID_POINTS as f32)
        })
        .collect();
    let drift = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5);
    Body::polygon(Kind::Asteroid, center, points).with_velocity(drift)
}

fn ship_body(center: Point) -> Body<Kind> {
    Body::polygon(
        Kind::Ship,
        center,
        vec![
            center + Vec2::new(-8.0, 9.0),
            center + Vec2::new(0.0, -10.0),
            center + Vec2::new(8.0, 9.0),
        ],
    )
    .with_velocity(Vec2::ZERO)
}

fn bullet_body(start: Point, angle: f32) -> Body<Kind> {
    let velocity = geom::rotate(Vec2::new(0.0, -BULLET_SPEED), Vec2::ZERO, angle);
    Body::segment(Kind::Bullet, start, start + velocity).with_velocity(velocity)
}

pub struct Asteroid {
    radius: f32,
    explosion: Rc<dyn AudioCue>,
}

impl Asteroid {
    pub fn new(radius: f32, explosion: Rc<dyn AudioCue>) -> Self {
        Self { radius, explosion }
    }
}

impl Behavior<Kind> for Asteroid {
    fn update(&mut self, me: &mut Body<Kind>, ctx: &mut TickContext<'_, Kind>) {
        me.step();
        ctx.wrap_if_off_screen(me);
    }

    fn collision(
        &mut self,
        me: &mut Body<Kind>,
        other: &Partner<Kind>,
        ctx: &mut TickContext<'_, Kind>,
    ) {
        if !matches!(other.kind(), Kind::Ship | Kind::Bullet) {
            return;
        }
        ctx.remove_self();
        ctx.remove_body(other.handle);
        self.explosion.play();

        if self.radius > SPLIT_STEP {
            let radius = self.radius - SPLIT_STEP;
            log::info!("asteroid split into two of radius {}", radius);
            for _ in 0..2 {
                let body = asteroid_body(ctx.rng(), me.center(), radius);
                ctx.add_body(body, Asteroid::new(radius, self.explosion.clone()));
            }
        } else {
            log::info!("asteroid destroyed");
        }
    }
}

/// Player ship: turns, thrusts and fires from its nose
pub struct Ship {
    input: Rc<dyn InputSource>,
    clock: Rc<dyn Clock>,
    shot: Rc<dyn AudioCue>,
    /// Clock time of the last shot; the first shot is never held back
    last_shot: Option<u64>,
}

impl Ship {
    pub fn new(input: Rc<dyn InputSource>, clock: Rc<dyn Clock>, shot: Rc<dyn AudioCue>) -> Self {
        Self {
            input,
            clock,
            shot,
            last_shot: None,
        }
    }
}

impl Behavior<Kind> for Ship {
    fn update(&mut self, me: &mut Body<Kind>, ctx: &mut TickContext<'_, Kind>) {
        if self.input.is_key_down(Key::Left) {
            me.rotate(me.center(), -TURN_SPEED);
        } else if self.input.is_key_down(Key::Right) {
            me.rotate(me.center(), TURN_SPEED);
        }

        if self.input.is_key_down(Key::Up) {
            let push = geom::rotate(Vec2::new(0.0, -THRUST), Vec2::ZERO, me.angle);
            me.velocity = Some(me.velocity.unwrap_or(Vec2::ZERO) + push);
        }

        let now = self.clock.now();
        let reloaded = self
            .last_shot
            .is_none_or(|last| now.saturating_sub(last) > FIRE_INTERVAL);
        if self.input.is_key_down(Key::Action) && reloaded {
            self.last_shot = Some(now);
            self.shot.play();
            let nose = me.points()[1];
            ctx.add_body(bullet_body(nose, me.angle), Bullet);
        }

        me.step();
        ctx.wrap_if_off_screen(me);
    }
}

pub struct Bullet;

impl Behavior<Kind> for Bullet {
    fn update(&mut self, me: &mut Body<Kind>, ctx: &mut TickContext<'_, Kind>) {
        me.step();
        if ctx.is_off_screen(me.center()) {
            ctx.remove_self();
        }
    }

    fn collision(
        &mut self,
        _me: &mut Body<Kind>,
        other: &Partner<Kind>,
        ctx: &mut TickContext<'_, Kind>,
    ) {
        if other.kind() == Kind::Asteroid {
            ctx.remove_self();
            ctx.remove_body(other.handle);
        }
    }
}
