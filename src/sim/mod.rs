//! Body-collision simulation module
//!
//! The engine core every game builds on:
//! - Geometry primitives and intersection tests
//! - Bodies with polygon, segment or box shapes
//! - A world that owns bodies and runs the Detect -> Dispatch -> Update -> Draw tick
//!
//! Nothing in here knows about a particular game. Randomness comes from the
//! world's seeded RNG so a run is reproducible from its settings.

pub mod behavior;
pub mod body;
pub mod collision;
pub mod geom;
pub mod tick;
pub mod world;
pub mod wrap;

pub use behavior::{Behavior, Partner, TickContext};
pub use body::{Body, BodyKind, Shape};
pub use collision::{Contact, bodies_overlap, detect};
pub use geom::{Aabb, Point, Segment};
pub use tick::TickReport;
pub use world::{BodyHandle, World};
pub use wrap::wrap_if_off_screen;
