//! Vector Arcade - a real-time body-collision micro-engine
//!
//! Core modules:
//! - `sim`: Geometry, bodies, collision detection/dispatch and the world tick
//! - `settings`: World configuration and per-game presets
//! - `platform`: Keyboard and clock collaborators
//! - `renderer`: Render surface boundary
//! - `audio`: Fire-and-forget sound cues
//! - `games`: Asteroids, lunar lander, snake and space invaders on the shared engine

pub mod audio;
pub mod games;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{GamePreset, SettingsError, WorldSettings, WrapPolicy};
pub use sim::{Body, BodyHandle, Shape, TickReport, World};

/// Engine configuration constants
pub mod consts {
    /// Default play area width
    pub const DEFAULT_WIDTH: f32 = 300.0;
    /// Default play area height
    pub const DEFAULT_HEIGHT: f32 = 300.0;

    /// Nominal frame length the headless runner advances its clock by (ms)
    pub const FRAME_MS: u64 = 16;

    /// Line width used when a body doesn't pick its own
    pub const DEFAULT_LINE_WIDTH: f32 = 1.0;

    /// Float tolerance for geometry comparisons in tests and assertions
    pub const EPSILON: f32 = 1e-4;
}
