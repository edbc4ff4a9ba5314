//! Fire-and-forget sound cues
//!
//! The engine never plays audio itself. Behaviors hold an `Rc<dyn AudioCue>`
//! and call `play()`; what that does is up to the host. [`AudioManager`] is
//! the headless host side: it applies volume and mute, logs each cue and
//! counts plays per effect.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ship, cannon or invader fires
    Shot,
    /// Asteroid breaks apart
    Explosion,
    /// Lander touches down
    Landing,
    /// Snake eats food
    Eat,
}

/// A single cue a behavior can trigger
pub trait AudioCue {
    fn play(&self);
}

/// Cue that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play(&self) {}
}

/// Audio manager for the games
#[derive(Debug)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    plays: RefCell<HashMap<SoundEffect, u32>>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            plays: RefCell::new(HashMap::new()),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect; silent effects are not counted
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("sound {:?} at volume {:.2}", effect, vol);
        *self.plays.borrow_mut().entry(effect).or_insert(0) += 1;
    }

    /// Times `effect` has been played
    pub fn play_count(&self, effect: SoundEffect) -> u32 {
        self.plays.borrow().get(&effect).copied().unwrap_or(0)
    }

    /// Cue bound to one effect, for handing to behaviors
    pub fn cue(self: &Rc<Self>, effect: SoundEffect) -> Rc<dyn AudioCue> {
        Rc::new(EffectCue {
            manager: Rc::clone(self),
            effect,
        })
    }
}

struct EffectCue {
    manager: Rc<AudioManager>,
    effect: SoundEffect,
}

impl AudioCue for EffectCue {
    fn play(&self) {
        self.manager.play(self.effect);
    }
}
