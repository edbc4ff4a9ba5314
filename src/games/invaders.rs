//! Space invaders
//!
//! A grid of invaders patrols back and forth dropping bullets; the player's
//! cannon slides along the bottom and fires upward. Everything is a box and
//! anything that touches anything else is destroyed.

use std::rc::Rc;

use glam::Vec2;
use rand::Rng;

use super::Collaborators;
use crate::audio::AudioCue;
use crate::platform::{InputSource, Key};
use crate::settings::WorldSettings;
use crate::sim::geom::Point;
use crate::sim::{Behavior, Body, BodyHandle, Partner, TickContext, World};

const INVADER_COUNT: usize = 24;
const INVADER_SIZE: f32 = 15.0;
const PATROL_SPEED: f32 = 0.3;
/// Patrol distance before turning back
const PATROL_RANGE: f32 = 30.0;
/// Chance per tick that an invader with a clear line below fires
const FIRE_CHANCE: f32 = 0.005;

const PLAYER_SIZE: f32 = 15.0;
const PLAYER_SPEED: f32 = 2.0;

const BULLET_SIZE: f32 = 3.0;
const PLAYER_BULLET_SPEED: f32 = 7.0;
const INVADER_BULLET_SPEED: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Invader,
    Player,
    Bullet,
}

/// An 8x3 grid of invaders and the player near the bottom
pub fn build(settings: WorldSettings, collab: &Collaborators) -> World<Kind> {
    let mut world = World::new(settings);
    let area = world.area();

    for i in 0..INVADER_COUNT {
        let x = 30.0 + (i % 8) as f32 * 30.0;
        let y = 30.0 + (i % 3) as f32 * 30.0;
        spawn_invader(&mut world, Vec2::new(x, y));
    }
    spawn_player(
        &mut world,
        Vec2::new(area.x / 2.0, area.y - PLAYER_SIZE * 2.0),
        collab,
    );

    world
}

pub fn spawn_invader(world: &mut World<Kind>, center: Point) -> BodyHandle {
    world.add_body(
        Body::aabb(Kind::Invader, center, Vec2::splat(INVADER_SIZE)).with_velocity(Vec2::ZERO),
        Invader::default(),
    )
}

pub fn spawn_player(world: &mut World<Kind>, center: Point, collab: &Collaborators) -> BodyHandle {
    world.add_body(
        Body::aabb(Kind::Player, center, Vec2::splat(PLAYER_SIZE)).with_velocity(Vec2::ZERO),
        Player::new(collab.input.clone(), collab.shot.clone()),
    )
}

fn bullet(center: Point, velocity: Vec2) -> Body<Kind> {
    Body::aabb(Kind::Bullet, center, Vec2::splat(BULLET_SIZE)).with_velocity(velocity)
}

/// Whether another invader sits below `center` within one invader width
fn has_invader_below<'a>(center: Point, others: impl IntoIterator<Item = &'a Body<Kind>>) -> bool {
    others.into_iter().any(|b| {
        b.kind == Kind::Invader
            && (center.x - b.center().x).abs() < INVADER_SIZE
            && b.center().y > center.y
    })
}

pub struct Invader {
    patrol_x: f32,
    speed_x: f32,
}

impl Default for Invader {
    fn default() -> Self {
        Self {
            patrol_x: 0.0,
            speed_x: PATROL_SPEED,
        }
    }
}

impl Behavior<Kind> for Invader {
    fn update(&mut self, me: &mut Body<Kind>, ctx: &mut TickContext<'_, Kind>) {
        if self.patrol_x < 0.0 || self.patrol_x > PATROL_RANGE {
            self.speed_x = -self.speed_x;
        }

        if ctx.rng().random::<f32>() < FIRE_CHANCE
            && !has_invader_below(me.center(), ctx.others().map(|(_, b)| b))
        {
            let vx = ctx.rng().random::<f32>() - 0.5;
            // Clear of the invader's bottom edge, since new bodies don't move until next tick
            let y = me.center().y + INVADER_SIZE / 2.0 + INVADER_BULLET_SPEED;
            ctx.add_body(
                bullet(Vec2::new(me.center().x, y), Vec2::new(vx, INVADER_BULLET_SPEED)),
                Bullet,
            );
        }

        me.velocity = Some(Vec2::new(self.speed_x, 0.0));
        me.step();
        self.patrol_x += self.speed_x;
    }

    fn collision(
        &mut self,
        _me: &mut Body<Kind>,
        _other: &Partner<Kind>,
        ctx: &mut TickContext<'_, Kind>,
    ) {
        ctx.remove_self();
    }
}

/// The player's cannon
pub struct Player {
    input: Rc<dyn InputSource>,
    shot: Rc<dyn AudioCue>,
}

impl Player {
    pub fn new(input: Rc<dyn InputSource>, shot: Rc<dyn AudioCue>) -> Self {
        Self { input, shot }
    }
}

impl Behavior<Kind> for Player {
    fn update(&mut self, me: &mut Body<Kind>, ctx: &mut TickContext<'_, Kind>) {
        if self.input.is_key_down(Key::Left) {
            me.translate(Vec2::new(-PLAYER_SPEED, 0.0));
        } else if self.input.is_key_down(Key::Right) {
            me.translate(Vec2::new(PLAYER_SPEED, 0.0));
        }

        if self.input.is_key_down(Key::Action) {
            let muzzle = me.center() - Vec2::new(0.0, PLAYER_SIZE + 10.0);
            ctx.add_body(bullet(muzzle, Vec2::new(0.0, -PLAYER_BULLET_SPEED)), Bullet);
            self.shot.play();
        }
    }

    fn collision(
        &mut self,
        me: &mut Body<Kind>,
        _other: &Partner<Kind>,
        ctx: &mut TickContext<'_, Kind>,
    ) {
        log::info!("player destroyed at {:?}", me.center());
        ctx.remove_self();
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
        _other: &Partner<Kind>,
        ctx: &mut TickContext<'_, Kind>,
    ) {
        ctx.remove_self();
    }
}
