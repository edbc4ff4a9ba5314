//! Snake
//!
//! A block-grid snake inside four walls. The head steps one block every
//! [`MOVE_INTERVAL`] ms; eating food grows the tail by one block on the next
//! step. Hitting a wall or the tail kills the snake.
//!
//! Blocks on neighbouring squares share an edge, which strict box overlap does
//! not count as contact; only actually overlapping blocks collide.

use std::rc::Rc;

use glam::Vec2;
use rand::Rng;

use super::Collaborators;
use crate::audio::AudioCue;
use crate::platform::{Clock, InputSource, Key};
use crate::renderer::{Color, RenderSurface};
use crate::settings::WorldSettings;
use crate::sim::geom::Point;
use crate::sim::{Behavior, Body, BodyHandle, Partner, TickContext, World, bodies_overlap};

/// Grid size in pixels
pub const BLOCK: f32 = 10.0;
/// Time between head steps (ms)
pub const MOVE_INTERVAL: u64 = 100;
/// Random squares tried before giving up on placing food
const FOOD_ATTEMPTS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Head,
    Tail,
    Food,
    Wall,
}

/// Walls, a head at the center moving right, and one piece of food
pub fn build(settings: WorldSettings, collab: &Collaborators) -> World<Kind> {
    let mut world = World::new(settings);
    let area = world.area();
    let center = area * 0.5;

    let walls = [
        (Vec2::new(center.x, BLOCK / 2.0), Vec2::new(area.x, BLOCK)),
        (Vec2::new(area.x - BLOCK / 2.0, center.y), Vec2::new(BLOCK, area.y - BLOCK * 2.0)),
        (Vec2::new(center.x, area.y - BLOCK / 2.0), Vec2::new(area.x, BLOCK)),
        (Vec2::new(BLOCK / 2.0, center.y), Vec2::new(BLOCK, area.y - BLOCK * 2.0)),
    ];
    for (c, size) in walls {
        world.add_static(Body::aabb(Kind::Wall, c, size));
    }

    spawn_head(&mut world, center, collab);

    let occupied: Vec<Body<Kind>> = world.bodies().map(|(_, b)| b.clone()).collect();
    let spot = find_free_square(world.rng(), area, |candidate| {
        occupied.iter().all(|b| !bodies_overlap(b, candidate))
    });
    if let Some(spot) = spot {
        spawn_food(&mut world, spot);
    }

    world
}

pub fn spawn_head(world: &mut World<Kind>, center: Point, collab: &Collaborators) -> BodyHandle {
    world.add_body(
        block(Kind::Head, center),
        Head::new(collab.input.clone(), collab.clock.clone(), collab.eat.clone()),
    )
}

pub fn spawn_food(world: &mut World<Kind>, center: Point) -> BodyHandle {
    world.add_body(block(Kind::Food, center), Food)
}

fn block(kind: Kind, center: Point) -> Body<Kind> {
    Body::aabb(kind, center, Vec2::splat(BLOCK))
}

/// Center of a random grid square for which `is_free` holds
fn find_free_square<R: Rng>(
    rng: &mut R,
    area: Vec2,
    is_free: impl Fn(&Body<Kind>) -> bool,
) -> Option<Point> {
    let cols = ((area.x / BLOCK) as u32).max(1);
    let rows = ((area.y / BLOCK) as u32).max(1);
    for _ in 0..FOOD_ATTEMPTS {
        let center = Vec2::new(
            rng.random_range(0..cols) as f32 * BLOCK + BLOCK / 2.0,
            rng.random_range(0..rows) as f32 * BLOCK + BLOCK / 2.0,
        );
        if is_free(&block(Kind::Food, center)) {
            return Some(center);
        }
    }
    log::warn!("no free square for food after {} attempts", FOOD_ATTEMPTS);
    None
}

/// Unit step for a held direction key
fn key_direction(key: Key) -> Vec2 {
    match key {
        Key::Left => Vec2::new(-1.0, 0.0),
        Key::Right => Vec2::new(1.0, 0.0),
        Key::Up => Vec2::new(0.0, -1.0),
        Key::Down => Vec2::new(0.0, 1.0),
        Key::Action => Vec2::ZERO,
    }
}

pub struct Head {
    input: Rc<dyn InputSource>,
    clock: Rc<dyn Clock>,
    eat: Rc<dyn AudioCue>,
    direction: Vec2,
    last_move: u64,
    grow: bool,
    /// Tail blocks, nearest the head first
    tail: Vec<BodyHandle>,
}

impl Head {
    pub fn new(input: Rc<dyn InputSource>, clock: Rc<dyn Clock>, eat: Rc<dyn AudioCue>) -> Self {
        Self {
            input,
            clock,
            eat,
            direction: Vec2::new(1.0, 0.0),
            last_move: 0,
            grow: false,
            tail: Vec::new(),
        }
    }

    /// Turn towards held keys; a key pointing straight back is ignored
    fn steer(&mut self) {
        for (first, second) in [(Key::Left, Key::Right), (Key::Up, Key::Down)] {
            for key in [first, second] {
                let dir = key_direction(key);
                if self.input.is_key_down(key) && dir != -self.direction {
                    self.direction = dir;
                    break;
                }
            }
        }
    }

    fn advance(&mut self, me: &mut Body<Kind>, ctx: &mut TickContext<'_, Kind>) {
        let mut prev = me.center();
        me.translate(self.direction * BLOCK);

        if self.grow {
            self.grow = false;
            let handle = ctx.add_static(block(Kind::Tail, prev));
            self.tail.push(handle);
        }

        // Each block takes the place of the one ahead of it
        for handle in &self.tail {
            let Some(old) = ctx.get(*handle).map(|b| b.center()) else {
                continue;
            };
            ctx.move_body(*handle, prev);
            prev = old;
        }
    }

    fn die(&mut self, ctx: &mut TickContext<'_, Kind>) {
        log::info!("snake died with {} tail blocks", self.tail.len());
        ctx.remove_self();
        for handle in self.tail.drain(..) {
            ctx.remove_body(handle);
        }
    }

    fn eat(&mut self, me: &Body<Kind>, ctx: &mut TickContext<'_, Kind>) {
        self.grow = true;
        self.eat.play();
        let area = ctx.area();
        let occupied: Vec<Body<Kind>> = ctx
            .others()
            .map(|(_, b)| b.clone())
            .chain(std::iter::once(me.clone()))
            .collect();
        let spot = find_free_square(ctx.rng(), area, |candidate| {
            occupied.iter().all(|b| !bodies_overlap(b, candidate))
        });
        if let Some(spot) = spot {
            ctx.add_body(block(Kind::Food, spot), Food);
        }
    }
}

impl Behavior<Kind> for Head {
    fn update(&mut self, me: &mut Body<Kind>, ctx: &mut TickContext<'_, Kind>) {
        self.steer();

        let now = self.clock.now();
        if now > self.last_move + MOVE_INTERVAL {
            self.advance(me, ctx);
            self.last_move = now;
        }
    }

    fn collision(
        &mut self,
        me: &mut Body<Kind>,
        other: &Partner<Kind>,
        ctx: &mut TickContext<'_, Kind>,
    ) {
        match other.kind() {
            Kind::Wall | Kind::Tail => self.die(ctx),
            Kind::Food => self.eat(me, ctx),
            Kind::Head => {}
        }
    }
}

pub struct Food;

impl Behavior<Kind> for Food {
    fn collision(
        &mut self,
        _me: &mut Body<Kind>,
        other: &Partner<Kind>,
        ctx: &mut TickContext<'_, Kind>,
    ) {
        if other.kind() == Kind::Head {
            ctx.remove_self();
        }
    }

    fn draw(&self, me: &Body<Kind>, surface: &mut dyn RenderSurface) {
        surface.draw_rect(me.center(), Vec2::splat(BLOCK), Color::GREEN);
    }
}
