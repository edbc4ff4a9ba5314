//! Platform abstraction layer
//!
//! Collaborators the games read from the host:
//! - Input: which keys are held
//! - Time: a millisecond clock for rate-limited actions
//!
//! Both are shared through `Rc` and read through `&self`; hosts feed them
//! between ticks.

pub mod input;
pub mod time;

pub use input::{InputSource, Key, Keyboard};
pub use time::{Clock, ManualClock, SystemClock};
