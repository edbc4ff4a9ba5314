//! Per-frame tick
//!
//! One tick runs to completion before the next starts:
//! 1. Detect: snapshot live bodies and find overlapping pairs
//! 2. Dispatch: notify reactive bodies; they may add/remove bodies
//! 3. Update: run the Movable step of every body still live
//! 4. Draw: clear the surface and paint every live body in collection order
//!
//! Dead slots are purged after Draw.

use super::behavior::Partner;
use super::body::BodyKind;
use super::collision::{self, Contact};
use super::world::World;
use crate::renderer::{self, RenderSurface};

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Contacts found in the Detect step
    pub contacts: Vec<Contact>,
    /// Bodies added during the tick
    pub added: usize,
    /// Bodies removed during the tick
    pub removed: usize,
}

impl<K: BodyKind> World<K> {
    /// Run one Detect -> Dispatch -> Update -> Draw cycle
    pub fn tick(&mut self, surface: &mut dyn RenderSurface) -> TickReport {
        self.store.added = 0;
        self.store.removed = 0;

        let contacts = self.detect();
        self.dispatch(&contacts);
        self.update();
        self.draw(surface);

        self.store.purge();
        self.tick_count += 1;

        if !contacts.is_empty() || self.store.added > 0 || self.store.removed > 0 {
            log::debug!(
                "tick {}: {} contacts, +{} -{} bodies",
                self.tick_count,
                contacts.len(),
                self.store.added,
                self.store.removed
            );
        }

        TickReport {
            contacts,
            added: self.store.added,
            removed: self.store.removed,
        }
    }

    /// Detect step: all overlapping pairs among live bodies
    pub fn detect(&self) -> Vec<Contact> {
        let snapshot: Vec<_> = self.bodies().collect();
        collision::detect(&snapshot)
    }

    fn dispatch(&mut self, contacts: &[Contact]) {
        // Partners see each other as they were when the contact was detected
        let pairs: Vec<_> = contacts
            .iter()
            .filter_map(|c| {
                let a = self.store.live_body(c.a)?.clone();
                let b = self.store.live_body(c.b)?.clone();
                Some((
                    Partner { handle: c.a, body: a },
                    Partner { handle: c.b, body: b },
                ))
            })
            .collect();
        collision::dispatch(&mut self.store, pairs);
    }

    fn update(&mut self) {
        for handle in self.store.live_handles() {
            // Skip bodies removed earlier in this pass
            if !self.store.is_alive(handle) {
                continue;
            }
            self.store
                .with_behavior(handle, |behavior, me, ctx| behavior.update(me, ctx));
        }
    }

    /// Draw step; also usable on its own to repaint without simulating
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.clear(self.area());
        for handle in self.store.live_handles() {
            let Some(slot) = self.store.slot(handle) else {
                continue;
            };
            match &slot.behavior {
                Some(behavior) => behavior.draw(&slot.body, surface),
                None => renderer::draw_outline(&slot.body, surface),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use glam::Vec2;

    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::settings::{WorldSettings, WrapPolicy};
    use crate::sim::{Behavior, Body, BodyHandle, TickContext};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Fragile,
        Solid,
        Spawned,
    }

    /// Counts updates and reactions; removes itself on any contact if `fragile`
    struct Counter {
        updates: Rc<Cell<u32>>,
        reactions: Rc<Cell<u32>>,
        fragile: bool,
    }

    impl Counter {
        fn new(fragile: bool) -> (Self, Rc<Cell<u32>>, Rc<Cell<u32>>) {
            let updates = Rc::new(Cell::new(0));
            let reactions = Rc::new(Cell::new(0));
            (
                Self {
                    updates: updates.clone(),
                    reactions: reactions.clone(),
                    fragile,
                },
                updates,
                reactions,
            )
        }
    }

    impl Behavior<Kind> for Counter {
        fn update(&mut self, me: &mut Body<Kind>, ctx: &mut TickContext<'_, Kind>) {
            self.updates.set(self.updates.get() + 1);
            me.step();
            ctx.wrap_if_off_screen(me);
        }

        fn collision(
            &mut self,
            _me: &mut Body<Kind>,
            _other: &Partner<Kind>,
            ctx: &mut TickContext<'_, Kind>,
        ) {
            self.reactions.set(self.reactions.get() + 1);
            if self.fragile {
                ctx.remove_self();
            }
        }
    }

    /// Removes both itself and its partner, twice over
    struct Smasher;

    impl Behavior<Kind> for Smasher {
        fn collision(
            &mut self,
            _me: &mut Body<Kind>,
            other: &Partner<Kind>,
            ctx: &mut TickContext<'_, Kind>,
        ) {
            ctx.remove_self();
            ctx.remove_body(other.handle);
            ctx.remove_self();
            ctx.remove_body(other.handle);
        }
    }

    /// Spawns a movable counter when it touches anything
    struct Spawner {
        child_updates: Rc<Cell<u32>>,
    }

    impl Behavior<Kind> for Spawner {
        fn collision(
            &mut self,
            _me: &mut Body<Kind>,
            _other: &Partner<Kind>,
            ctx: &mut TickContext<'_, Kind>,
        ) {
            let child = Counter {
                updates: self.child_updates.clone(),
                reactions: Rc::new(Cell::new(0)),
                fragile: false,
            };
            let body = Body::aabb(Kind::Spawned, Vec2::new(200.0, 200.0), Vec2::ONE);
            ctx.add_body(body, child);
        }
    }

    /// Removes another body from its update step
    struct Sniper {
        target: Rc<Cell<Option<BodyHandle>>>,
    }

    impl Behavior<Kind> for Sniper {
        fn update(&mut self, _me: &mut Body<Kind>, ctx: &mut TickContext<'_, Kind>) {
            if let Some(target) = self.target.get() {
                ctx.remove_body(target);
            }
        }
    }

    fn square(kind: Kind, center: Vec2) -> Body<Kind> {
        Body::aabb(kind, center, Vec2::new(10.0, 10.0))
    }

    fn world() -> World<Kind> {
        World::new(WorldSettings::default())
    }

    #[test]
    fn test_reactive_body_removed_and_partner_still_updates() {
        let mut world = world();
        let (fragile, a_updates, a_reactions) = Counter::new(true);
        let (solid, b_updates, b_reactions) = Counter::new(false);
        let a = world.add_body(square(Kind::Fragile, Vec2::new(50.0, 50.0)), fragile);
        let b = world.add_body(square(Kind::Solid, Vec2::new(55.0, 50.0)), solid);

        let mut surface = RecordingSurface::default();
        let report = world.tick(&mut surface);

        assert_eq!(report.contacts.len(), 1);
        assert_eq!(report.removed, 1);
        assert!(!world.contains(a));
        assert!(world.contains(b));
        assert_eq!(a_reactions.get(), 1);
        assert_eq!(b_reactions.get(), 1);
        assert_eq!(a_updates.get(), 0);
        assert_eq!(b_updates.get(), 1);
    }

    #[test]
    fn test_mutual_removal_is_idempotent() {
        let mut world = world();
        let a = world.add_body(square(Kind::Solid, Vec2::new(50.0, 50.0)), Smasher);
        let b = world.add_body(square(Kind::Solid, Vec2::new(52.0, 50.0)), Smasher);
        let c = world.add_static(square(Kind::Solid, Vec2::new(150.0, 150.0)));

        let report = world.tick(&mut RecordingSurface::default());

        assert_eq!(report.removed, 2);
        assert!(!world.contains(a));
        assert!(!world.contains(b));
        assert_eq!(world.handles(), vec![c]);
    }

    #[test]
    fn test_both_sides_react_even_if_first_removes_second() {
        let mut world = world();
        let a = world.add_body(square(Kind::Solid, Vec2::new(50.0, 50.0)), Smasher);
        let (counter, _, reactions) = Counter::new(false);
        let b = world.add_body(square(Kind::Solid, Vec2::new(52.0, 50.0)), counter);

        world.tick(&mut RecordingSurface::default());

        assert_eq!(reactions.get(), 1);
        assert!(!world.contains(a));
        assert!(!world.contains(b));
    }

    #[test]
    fn test_removed_body_skips_later_pairs() {
        let mut world = world();
        // Fragile counter touches two solids; it reacts once, then is gone
        let (fragile, _, reactions) = Counter::new(true);
        world.add_body(square(Kind::Fragile, Vec2::new(50.0, 50.0)), fragile);
        world.add_static(square(Kind::Solid, Vec2::new(45.0, 50.0)));
        world.add_static(square(Kind::Solid, Vec2::new(55.0, 50.0)));

        let report = world.tick(&mut RecordingSurface::default());

        assert_eq!(report.contacts.len(), 2);
        assert_eq!(reactions.get(), 1);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_body_added_during_dispatch_updates_same_tick() {
        let mut world = world();
        let child_updates = Rc::new(Cell::new(0));
        let spawner = Spawner {
            child_updates: child_updates.clone(),
        };
        world.add_body(square(Kind::Solid, Vec2::new(50.0, 50.0)), spawner);
        world.add_static(square(Kind::Solid, Vec2::new(55.0, 50.0)));

        let report = world.tick(&mut RecordingSurface::default());

        assert_eq!(report.added, 1);
        assert_eq!(world.count_kind(Kind::Spawned), 1);
        assert_eq!(child_updates.get(), 1);
    }

    #[test]
    fn test_added_body_not_detected_until_next_tick() {
        let mut world = world();
        let spawner = Spawner {
            child_updates: Rc::new(Cell::new(0)),
        };
        world.add_body(square(Kind::Solid, Vec2::new(50.0, 50.0)), spawner);
        world.add_static(square(Kind::Solid, Vec2::new(55.0, 50.0)));
        // Sits exactly where spawned bodies appear
        world.add_static(Body::aabb(Kind::Solid, Vec2::new(200.0, 200.0), Vec2::new(4.0, 4.0)));

        let first = world.tick(&mut RecordingSurface::default());
        assert_eq!(first.contacts.len(), 1);

        let second = world.detect();
        // Spawner still touches its neighbour, and the child now touches the static box
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_body_removed_during_update_is_neither_updated_nor_drawn() {
        let mut world = world();
        let target = Rc::new(Cell::new(None));
        let sniper = Sniper {
            target: target.clone(),
        };
        world.add_body(Body::segment(Kind::Solid, Vec2::ZERO, Vec2::new(5.0, 0.0)), sniper);
        let (counter, updates, _) = Counter::new(false);
        let victim = world.add_body(square(Kind::Fragile, Vec2::new(150.0, 150.0)), counter);
        target.set(Some(victim));

        let mut surface = RecordingSurface::default();
        let report = world.tick(&mut surface);

        assert_eq!(report.removed, 1);
        assert_eq!(updates.get(), 0);
        assert!(!world.contains(victim));
        assert_eq!(surface.commands.len(), 2);
        assert!(matches!(surface.commands[1], DrawCommand::Segment { .. }));
        assert!(
            !surface
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Rect { .. }))
        );
    }

    #[test]
    fn test_draw_paints_live_bodies_in_order() {
        let mut world = world();
        world.add_static(square(Kind::Solid, Vec2::new(20.0, 20.0)));
        world.add_static(Body::segment(Kind::Solid, Vec2::ZERO, Vec2::new(5.0, 5.0)));

        let mut surface = RecordingSurface::default();
        world.tick(&mut surface);

        assert_eq!(surface.commands.len(), 3);
        assert!(matches!(surface.commands[0], DrawCommand::Clear { .. }));
        assert!(matches!(surface.commands[1], DrawCommand::Rect { .. }));
        assert!(matches!(surface.commands[2], DrawCommand::Segment { .. }));
    }

    #[test]
    fn test_wraparound_scenario() {
        let settings = WorldSettings {
            width: 200.0,
            height: 100.0,
            wrap: WrapPolicy::Wrap,
            ..WorldSettings::default()
        };
        let mut world = World::new(settings);
        let center = Vec2::new(-6.0, 50.0);
        let half = 5.0;
        let body = Body::polygon(
            Kind::Solid,
            center,
            vec![
                center + Vec2::new(-half, -half),
                center + Vec2::new(half, -half),
                center + Vec2::new(half, half),
                center + Vec2::new(-half, half),
            ],
        )
        .with_velocity(Vec2::new(-1.0, 0.0));
        let (counter, _, _) = Counter::new(false);
        let h = world.add_body(body, counter);
        let before = world.get(h).expect("body added").points();

        world.tick(&mut RecordingSurface::default());

        let body = world.get(h).expect("wrapped body stays live");
        assert!((body.center().x - (200.0 - half)).abs() < 1e-4);
        let delta = body.center() - center;
        for (after, before) in body.points().iter().zip(before.iter()) {
            assert!((*after - (*before + delta)).length() < 1e-4);
        }
    }

    #[test]
    fn test_wrap_policy_off_leaves_body_offscreen() {
        let mut world = world();
        let body = square(Kind::Solid, Vec2::new(-20.0, 50.0)).with_velocity(Vec2::new(-1.0, 0.0));
        let (counter, updates, _) = Counter::new(false);
        let h = world.add_body(body, counter);

        world.tick(&mut RecordingSurface::default());

        assert_eq!(updates.get(), 1);
        assert_eq!(world.get(h).map(|b| b.center()), Some(Vec2::new(-21.0, 50.0)));
    }
}
