//! Keyboard state

use std::cell::RefCell;
use std::collections::HashSet;

/// Keys the games respond to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Fire / primary action (space bar)
    Action,
}

/// Read-only view of which keys are currently held
pub trait InputSource {
    fn is_key_down(&self, key: Key) -> bool;
}

/// Held-key set updated by the host
#[derive(Debug, Default)]
pub struct Keyboard {
    held: RefCell<HashSet<Key>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, key: Key) {
        self.held.borrow_mut().insert(key);
    }

    pub fn release(&self, key: Key) {
        self.held.borrow_mut().remove(&key);
    }

    /// Release every key (window lost focus)
    pub fn release_all(&self) {
        self.held.borrow_mut().clear();
    }

}

impl InputSource for Keyboard {
    fn is_key_down(&self, key: Key) -> bool {
        self.held.borrow().contains(&key)
    }
}
