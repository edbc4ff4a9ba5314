//! Collision detection and dispatch
//!
//! Detection is a naive all-pairs scan over a snapshot of live bodies: fine
//! for the tens of bodies an arcade screen holds. The narrow phase is chosen
//! by shape:
//! - box vs box: strict AABB overlap
//! - anything else: edge segments, overlapping if any pair intersects (a box
//!   meeting a polygon or segment contributes its four edges)

use super::behavior::Partner;
use super::body::{Body, BodyKind, Shape};
use super::geom::{self, Aabb};
use super::world::{BodyHandle, Store};

/// An unordered pair of bodies in contact this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: BodyHandle,
    pub b: BodyHandle,
}

impl Contact {
    /// Whether `handle` takes part in this contact
    pub fn involves(&self, handle: BodyHandle) -> bool {
        self.a == handle || self.b == handle
    }
}

/// Shape-appropriate overlap test for two bodies
pub fn bodies_overlap<K>(a: &Body<K>, b: &Body<K>) -> bool {
    match (a.shape(), b.shape()) {
        (Shape::Box { size: sa }, Shape::Box { size: sb }) => geom::aabb_overlap(
            &Aabb::new(a.center(), *sa),
            &Aabb::new(b.center(), *sb),
        ),
        _ => geom::any_segments_intersect(&a.edges(), &b.edges()),
    }
}

/// All overlapping pairs `(i, j)`, `i < j`, in snapshot order
///
/// No body is tested against itself, and there are no groups or masks: every
/// body in the snapshot is tested against every other.
pub fn detect<K>(bodies: &[(BodyHandle, &Body<K>)]) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for (i, (ha, a)) in bodies.iter().enumerate() {
        for (hb, b) in &bodies[i + 1..] {
            if bodies_overlap(a, b) {
                contacts.push(Contact { a: *ha, b: *hb });
            }
        }
    }
    contacts
}

/// Deliver each contact to both participants' reaction hook
///
/// Each side is notified if it was live when its pair came up, even when the
/// other side's reaction just removed it. Bodies removed while handling an
/// earlier pair are skipped in later pairs.
pub(super) fn dispatch<K: BodyKind>(store: &mut Store<K>, pairs: Vec<(Partner<K>, Partner<K>)>) {
    for (a, b) in pairs {
        let a_live = store.is_alive(a.handle);
        let b_live = store.is_alive(b.handle);

        if a_live {
            store.with_behavior(a.handle, |behavior, me, ctx| {
                behavior.collision(me, &b, ctx)
            });
        }
        if b_live {
            store.with_behavior(b.handle, |behavior, me, ctx| {
                behavior.collision(me, &a, ctx)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WorldSettings;
    use crate::sim::World;
    use glam::Vec2;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Square,
        Line,
        Block,
    }

    fn unit_square(center: Vec2) -> Body<Kind> {
        let h = 0.5;
        Body::polygon(
            Kind::Square,
            center,
            vec![
                center + Vec2::new(-h, -h),
                center + Vec2::new(h, -h),
                center + Vec2::new(h, h),
                center + Vec2::new(-h, h),
            ],
        )
    }

    #[test]
    fn test_segment_bisects_square() {
        let square = unit_square(Vec2::new(10.0, 10.0));
        let line = Body::segment(Kind::Line, Vec2::new(10.0, 0.0), Vec2::new(10.0, 20.0));
        assert!(bodies_overlap(&square, &line));
        assert!(bodies_overlap(&line, &square));
    }

    #[test]
    fn test_segment_inside_polygon_is_not_contact() {
        // Edge-only narrow phase: a segment fully inside crosses no edge
        let square = unit_square(Vec2::new(10.0, 10.0));
        let line = Body::segment(Kind::Line, Vec2::new(9.9, 10.0), Vec2::new(10.1, 10.0));
        assert!(!bodies_overlap(&square, &line));
    }

    #[test]
    fn test_box_vs_polygon_uses_edges() {
        let square = unit_square(Vec2::new(10.0, 10.0));
        let block = Body::aabb(Kind::Block, Vec2::new(11.0, 10.0), Vec2::new(2.0, 2.0));
        assert!(bodies_overlap(&square, &block));

        let far = Body::aabb(Kind::Block, Vec2::new(30.0, 10.0), Vec2::new(2.0, 2.0));
        assert!(!bodies_overlap(&square, &far));
    }

    #[test]
    fn test_boxes_sharing_an_edge_do_not_collide() {
        let a = Body::aabb(Kind::Block, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Body::aabb(Kind::Block, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!bodies_overlap(&a, &b));
    }

    #[test]
    fn test_detect_pairs_each_overlap_once() {
        let mut world = World::new(WorldSettings::default());
        let block = |x: f32, y: f32| Body::aabb(Kind::Block, Vec2::new(x, y), Vec2::splat(10.0));
        let a = world.add_static(block(0.0, 0.0));
        let b = world.add_static(block(5.0, 0.0));
        let c = world.add_static(block(50.0, 0.0));
        let d = world.add_static(block(52.0, 2.0));

        let snapshot: Vec<_> = world.bodies().collect();
        let contacts = detect(&snapshot);

        assert_eq!(contacts.len(), 2);
        assert!(contacts.iter().any(|c| c.involves(a) && c.involves(b)));
        assert!(contacts.iter().any(|x| x.involves(c) && x.involves(d)));
        for contact in &contacts {
            assert_ne!(contact.a, contact.b);
        }
    }

    #[test]
    fn test_overlapping_polygons_pair_once() {
        let mut world = World::new(WorldSettings::default());
        let a = world.add_static(unit_square(Vec2::new(10.0, 10.0)));
        let b = world.add_static(unit_square(Vec2::new(10.2, 10.2)));

        let snapshot: Vec<_> = world.bodies().collect();
        let contacts = detect(&snapshot);
        assert_eq!(contacts, vec![Contact { a, b }]);
    }

    #[test]
    fn test_detect_empty_and_single() {
        let empty: Vec<(BodyHandle, &Body<Kind>)> = Vec::new();
        assert!(detect(&empty).is_empty());

        let mut world = World::new(WorldSettings::default());
        world.add_static(unit_square(Vec2::new(10.0, 10.0)));
        let snapshot: Vec<_> = world.bodies().collect();
        assert!(detect(&snapshot).is_empty());
    }
}
