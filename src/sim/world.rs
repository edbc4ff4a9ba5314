//! World body store
//!
//! Bodies live in a generational arena and are addressed by [`BodyHandle`].
//! Removal during a tick only marks the slot dead; dead slots are purged once
//! the tick has finished drawing, so handles taken earlier in the tick never
//! dangle and removing twice is harmless. Handles also carry the id of the
//! world that issued them; a handle from another world matches nothing.

use std::sync::atomic::{AtomicU32, Ordering};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use thunderdome as td;

use super::behavior::{Behavior, TickContext};
use super::body::{Body, BodyKind};
use crate::settings::WorldSettings;

static NEXT_WORLD_ID: AtomicU32 = AtomicU32::new(0);

/// Stable handle to a body owned by a [`World`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyHandle {
    world: u32,
    index: td::Index,
}

pub(super) struct Slot<K> {
    pub(super) body: Body<K>,
    pub(super) behavior: Option<Box<dyn Behavior<K>>>,
    pub(super) alive: bool,
}

/// Everything a callback may touch while its own body is checked out
pub(super) struct Store<K> {
    id: u32,
    slots: td::Arena<Slot<K>>,
    /// Collection order; may contain dead handles until the end of the tick
    pub(super) order: Vec<BodyHandle>,
    pub(super) settings: WorldSettings,
    pub(super) rng: Pcg32,
    pub(super) added: usize,
    pub(super) removed: usize,
}

impl<K: BodyKind> Store<K> {
    pub(super) fn insert(
        &mut self,
        body: Body<K>,
        behavior: Option<Box<dyn Behavior<K>>>,
    ) -> BodyHandle {
        log::debug!("add {:?} ({})", body.kind, body.shape().name());
        let index = self.slots.insert(Slot {
            body,
            behavior,
            alive: true,
        });
        let handle = BodyHandle {
            world: self.id,
            index,
        };
        self.order.push(handle);
        self.added += 1;
        handle
    }

    /// The slot behind a handle issued by this store, dead or alive
    pub(super) fn slot(&self, handle: BodyHandle) -> Option<&Slot<K>> {
        if handle.world != self.id {
            return None;
        }
        self.slots.get(handle.index)
    }

    pub(super) fn slot_mut(&mut self, handle: BodyHandle) -> Option<&mut Slot<K>> {
        if handle.world != self.id {
            return None;
        }
        self.slots.get_mut(handle.index)
    }

    /// The live body behind a handle, mutably
    pub(super) fn live_body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body<K>> {
        self.slot_mut(handle)
            .filter(|s| s.alive)
            .map(|s| &mut s.body)
    }

    /// Mark a body dead; absent, foreign or already-dead bodies are ignored
    pub(super) fn mark_removed(&mut self, handle: BodyHandle) {
        if let Some(slot) = self.slot_mut(handle) {
            if slot.alive {
                log::debug!("remove {:?}", slot.body.kind);
                slot.alive = false;
                self.removed += 1;
            }
        }
    }

    pub(super) fn is_alive(&self, handle: BodyHandle) -> bool {
        self.slot(handle).is_some_and(|s| s.alive)
    }

    pub(super) fn live_body(&self, handle: BodyHandle) -> Option<&Body<K>> {
        self.slot(handle).filter(|s| s.alive).map(|s| &s.body)
    }

    /// Snapshot of live handles in collection order
    pub(super) fn live_handles(&self) -> Vec<BodyHandle> {
        self.order
            .iter()
            .copied()
            .filter(|h| self.is_alive(*h))
            .collect()
    }

    pub(super) fn area(&self) -> Vec2 {
        Vec2::new(self.settings.width, self.settings.height)
    }

    /// Drop dead slots for good
    pub(super) fn purge(&mut self) {
        let slots = &mut self.slots;
        self.order.retain(|h| {
            let alive = slots.get(h.index).is_some_and(|s| s.alive);
            if !alive {
                slots.remove(h.index);
            }
            alive
        });
    }

    /// Run `f` with the body's behavior and a private copy of its body
    ///
    /// The copy is written back afterwards, so changes the callback makes to
    /// its own body win over anything it requested for itself via the context.
    /// Liveness is the caller's call: dispatch still notifies a body that was
    /// removed earlier in the same pair.
    pub(super) fn with_behavior<F>(&mut self, handle: BodyHandle, f: F)
    where
        F: FnOnce(&mut dyn Behavior<K>, &mut Body<K>, &mut TickContext<'_, K>),
    {
        let Some(slot) = self.slot_mut(handle) else {
            return;
        };
        let Some(mut behavior) = slot.behavior.take() else {
            return;
        };
        let mut body = slot.body.clone();

        {
            let mut ctx = TickContext::new(handle, self);
            f(behavior.as_mut(), &mut body, &mut ctx);
        }

        if let Some(slot) = self.slot_mut(handle) {
            slot.body = body;
            slot.behavior = Some(behavior);
        }
    }
}

/// The simulated world: owns every body and runs the per-frame tick
pub struct World<K> {
    pub(super) store: Store<K>,
    pub(super) tick_count: u64,
}

impl<K: BodyKind> World<K> {
    /// Create an empty world
    pub fn new(settings: WorldSettings) -> Self {
        log::info!(
            "world created: {}x{}, wrap {:?}, seed {}",
            settings.width,
            settings.height,
            settings.wrap,
            settings.seed
        );
        Self {
            store: Store {
                id: NEXT_WORLD_ID.fetch_add(1, Ordering::Relaxed),
                slots: td::Arena::new(),
                order: Vec::new(),
                rng: Pcg32::seed_from_u64(settings.seed),
                settings,
                added: 0,
                removed: 0,
            },
            tick_count: 0,
        }
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.store.settings
    }

    /// Play area size
    pub fn area(&self) -> Vec2 {
        self.store.area()
    }

    /// The world's seeded RNG, for building initial bodies
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.store.rng
    }

    /// Add a body with behavior; it takes part in collisions from the next tick
    pub fn add_body(&mut self, body: Body<K>, behavior: impl Behavior<K> + 'static) -> BodyHandle {
        self.store.insert(body, Some(Box::new(behavior)))
    }

    /// Add a body with no behavior (walls, terrain)
    pub fn add_static(&mut self, body: Body<K>) -> BodyHandle {
        self.store.insert(body, None)
    }

    /// Remove a body; removing an absent body is a no-op
    pub fn remove_body(&mut self, handle: BodyHandle) {
        self.store.mark_removed(handle);
        self.store.purge();
    }

    /// Whether the handle refers to a live body
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.store.is_alive(handle)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body<K>> {
        self.store.live_body(handle)
    }

    /// Mutable access outside of a tick, e.g. for host-driven setup
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body<K>> {
        self.store.live_body_mut(handle)
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.store.slots.iter().filter(|(_, s)| s.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live handles in collection order
    pub fn handles(&self) -> Vec<BodyHandle> {
        self.store.live_handles()
    }

    /// Live bodies in collection order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body<K>)> + '_ {
        let store = &self.store;
        store
            .order
            .iter()
            .filter_map(move |h| store.live_body(*h).map(|b| (*h, b)))
    }

    /// Number of live bodies of a kind
    pub fn count_kind(&self, kind: K) -> usize {
        self.bodies().filter(|(_, b)| b.kind == kind).count()
    }

    /// Ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
