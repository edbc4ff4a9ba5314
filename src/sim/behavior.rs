//! Body capabilities and the context callbacks run in
//!
//! A body's optional behaviors are one trait object with three hooks:
//! - `update`: the Movable step, run once per tick
//! - `collision`: the Reactive step, run once per contact per tick
//! - `draw`: paints the body; defaults to outlining its shape
//!
//! Hooks that a behavior doesn't override are no-ops, so a body that never
//! moves or never reacts simply leaves them alone. Bodies with no behavior at
//! all (walls, terrain) only collide and draw.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::body::{Body, BodyKind};
use super::geom::Point;
use super::world::{BodyHandle, Store};
use super::wrap;
use crate::renderer::{self, RenderSurface};
use crate::settings::WrapPolicy;

/// Per-body behavior hooks
pub trait Behavior<K> {
    /// Movable step: motion integration, steering, timers, spawning
    fn update(&mut self, _me: &mut Body<K>, _ctx: &mut TickContext<'_, K>) {}

    /// Reactive step: called with the contact partner as seen at detection time
    fn collision(&mut self, _me: &mut Body<K>, _other: &Partner<K>, _ctx: &mut TickContext<'_, K>) {
    }

    /// Paint the body
    fn draw(&self, me: &Body<K>, surface: &mut dyn RenderSurface) {
        renderer::draw_outline(me, surface);
    }
}

/// The other side of a contact
#[derive(Debug, Clone)]
pub struct Partner<K> {
    pub handle: BodyHandle,
    /// Snapshot taken when the contact was detected
    pub body: Body<K>,
}

impl<K: BodyKind> Partner<K> {
    #[inline]
    pub fn kind(&self) -> K {
        self.body.kind
    }
}

/// What a behavior may do to the world while it runs
///
/// Structural changes apply immediately: a body added here is live for the
/// rest of the tick, a body removed here gets no further calls this tick.
pub struct TickContext<'w, K> {
    me: BodyHandle,
    store: &'w mut Store<K>,
}

impl<'w, K: BodyKind> TickContext<'w, K> {
    pub(super) fn new(me: BodyHandle, store: &'w mut Store<K>) -> Self {
        Self { me, store }
    }

    /// Handle of the body whose behavior is running
    #[inline]
    pub fn me(&self) -> BodyHandle {
        self.me
    }

    /// Play area size
    pub fn area(&self) -> Vec2 {
        self.store.area()
    }

    /// The world's seeded RNG
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.store.rng
    }

    /// Add a body with behavior
    pub fn add_body(
        &mut self,
        body: Body<K>,
        behavior: impl Behavior<K> + 'static,
    ) -> BodyHandle {
        self.store.insert(body, Some(Box::new(behavior)))
    }

    /// Add a body with no behavior
    pub fn add_static(&mut self, body: Body<K>) -> BodyHandle {
        self.store.insert(body, None)
    }

    /// Remove a body; removing an absent body is a no-op
    pub fn remove_body(&mut self, handle: BodyHandle) {
        self.store.mark_removed(handle);
    }

    /// Remove the body whose behavior is running
    pub fn remove_self(&mut self) {
        self.store.mark_removed(self.me);
    }

    /// Whether `handle` is still live
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.store.is_alive(handle)
    }

    /// Move another live body, keeping its shape in step with its center
    ///
    /// The running body must move itself through the `&mut Body` it was given.
    pub fn move_body(&mut self, handle: BodyHandle, center: Point) {
        if handle == self.me {
            log::warn!("move_body called on the running body; ignored");
            return;
        }
        match self.store.live_body_mut(handle) {
            Some(body) => body.move_to(center),
            None => log::warn!("move_body on a dead or foreign body; ignored"),
        }
    }

    /// Another live body; `None` for the running body and dead handles
    pub fn get(&self, handle: BodyHandle) -> Option<&Body<K>> {
        if handle == self.me {
            return None;
        }
        self.store.live_body(handle)
    }

    /// Every other live body in collection order
    pub fn others(&self) -> impl Iterator<Item = (BodyHandle, &Body<K>)> + '_ {
        let me = self.me;
        let store: &Store<K> = &*self.store;
        store
            .order
            .iter()
            .filter(move |h| **h != me)
            .filter_map(move |h| store.live_body(*h).map(|b| (*h, b)))
    }

    /// Apply the world's wrap policy to `body`; true if it was moved
    pub fn wrap_if_off_screen(&self, body: &mut Body<K>) -> bool {
        match self.store.settings.wrap {
            WrapPolicy::Wrap => wrap::wrap_if_off_screen(body, self.area()),
            WrapPolicy::Off => false,
        }
    }

    /// Whether a point lies outside the play area
    pub fn is_off_screen(&self, p: Point) -> bool {
        let area = self.area();
        p.x < 0.0 || p.x > area.x || p.y < 0.0 || p.y > area.y
    }
}
