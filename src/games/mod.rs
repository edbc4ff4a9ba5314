//! The bundled arcade games
//!
//! Each game is a `Kind` enum, a handful of behaviors and a `build` function
//! that lays out the starting bodies. None of them touch engine internals;
//! they only use what `sim` exports.

pub mod asteroids;
pub mod invaders;
pub mod lander;
pub mod snake;

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::audio::{AudioCue, AudioManager, SilentCue, SoundEffect};
use crate::platform::{Clock, InputSource};
use crate::renderer::RenderSurface;
use crate::settings::{GamePreset, WorldSettings};
use crate::sim::{BodyKind, TickReport, World};

/// Host-side collaborators shared by a game's behaviors
#[derive(Clone)]
pub struct Collaborators {
    pub input: Rc<dyn InputSource>,
    pub clock: Rc<dyn Clock>,
    /// Played whenever something fires
    pub shot: Rc<dyn AudioCue>,
    /// An asteroid is hit
    pub explosion: Rc<dyn AudioCue>,
    /// The lander touches down
    pub landing: Rc<dyn AudioCue>,
    /// The snake eats
    pub eat: Rc<dyn AudioCue>,
}

impl Collaborators {
    /// Input and clock with every cue silent
    pub fn new(input: Rc<dyn InputSource>, clock: Rc<dyn Clock>) -> Self {
        let silent: Rc<dyn AudioCue> = Rc::new(SilentCue);
        Self {
            input,
            clock,
            shot: silent.clone(),
            explosion: silent.clone(),
            landing: silent.clone(),
            eat: silent,
        }
    }

    /// Route every cue to its effect on `audio`
    pub fn with_audio(self, audio: &Rc<AudioManager>) -> Self {
        Self {
            shot: audio.cue(SoundEffect::Shot),
            explosion: audio.cue(SoundEffect::Explosion),
            landing: audio.cue(SoundEffect::Landing),
            eat: audio.cue(SoundEffect::Eat),
            ..self
        }
    }
}

/// A running world for any of the bundled games
pub enum Arcade {
    Asteroids(World<asteroids::Kind>),
    Lander(World<lander::Kind>),
    Snake(World<snake::Kind>),
    Invaders(World<invaders::Kind>),
}

impl Arcade {
    pub fn build(preset: GamePreset, settings: WorldSettings, collab: &Collaborators) -> Self {
        log::info!("building {}", preset.as_str());
        match preset {
            GamePreset::Asteroids => Arcade::Asteroids(asteroids::build(settings, collab)),
            GamePreset::Lander => Arcade::Lander(lander::build(settings, collab)),
            GamePreset::Snake => Arcade::Snake(snake::build(settings, collab)),
            GamePreset::Invaders => Arcade::Invaders(invaders::build(settings, collab)),
        }
    }

    pub fn preset(&self) -> GamePreset {
        match self {
            Arcade::Asteroids(_) => GamePreset::Asteroids,
            Arcade::Lander(_) => GamePreset::Lander,
            Arcade::Snake(_) => GamePreset::Snake,
            Arcade::Invaders(_) => GamePreset::Invaders,
        }
    }

    pub fn tick(&mut self, surface: &mut dyn RenderSurface) -> TickReport {
        match self {
            Arcade::Asteroids(w) => w.tick(surface),
            Arcade::Lander(w) => w.tick(surface),
            Arcade::Snake(w) => w.tick(surface),
            Arcade::Invaders(w) => w.tick(surface),
        }
    }

    /// Live bodies
    pub fn len(&self) -> usize {
        match self {
            Arcade::Asteroids(w) => w.len(),
            Arcade::Lander(w) => w.len(),
            Arcade::Snake(w) => w.len(),
            Arcade::Invaders(w) => w.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live bodies per kind, keyed by the kind's debug name
    pub fn census(&self) -> BTreeMap<String, usize> {
        match self {
            Arcade::Asteroids(w) => census(w),
            Arcade::Lander(w) => census(w),
            Arcade::Snake(w) => census(w),
            Arcade::Invaders(w) => census(w),
        }
    }
}

fn census<K: BodyKind>(world: &World<K>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for (_, body) in world.bodies() {
        *counts.entry(format!("{:?}", body.kind)).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
pub(crate) mod testing {
    use std::rc::Rc;

    use super::Collaborators;
    use crate::audio::{AudioManager, SoundEffect};
    use crate::platform::{Keyboard, ManualClock};

    /// Collaborators with handles the test keeps for driving them
    pub struct Rig {
        pub keyboard: Rc<Keyboard>,
        pub clock: Rc<ManualClock>,
        pub audio: Rc<AudioManager>,
        pub collab: Collaborators,
    }

    impl Rig {
        pub fn new() -> Self {
            let keyboard = Rc::new(Keyboard::new());
            let clock = Rc::new(ManualClock::new(0));
            let audio = Rc::new(AudioManager::new());
            let collab = Collaborators::new(keyboard.clone(), clock.clone()).with_audio(&audio);
            Self {
                keyboard,
                clock,
                audio,
                collab,
            }
        }

        pub fn shots(&self) -> u32 {
            self.audio.play_count(SoundEffect::Shot)
        }
    }
}
