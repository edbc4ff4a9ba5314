//! World settings and per-game presets
//!
//! Settings are plain serde data so a host can load them from JSON; the
//! headless runner accepts a `--settings` file in that format.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Whether bodies leaving the play area reappear on the opposite side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WrapPolicy {
    #[default]
    Off,
    Wrap,
}

/// Which of the bundled games a world is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePreset {
    Asteroids,
    Lander,
    Snake,
    Invaders,
}

impl GamePreset {
    pub const ALL: [GamePreset; 4] = [
        GamePreset::Asteroids,
        GamePreset::Lander,
        GamePreset::Snake,
        GamePreset::Invaders,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePreset::Asteroids => "asteroids",
            GamePreset::Lander => "lander",
            GamePreset::Snake => "snake",
            GamePreset::Invaders => "invaders",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asteroids" => Some(GamePreset::Asteroids),
            "lander" | "lunar-lander" | "lunarlander" => Some(GamePreset::Lander),
            "snake" => Some(GamePreset::Snake),
            "invaders" | "space-invaders" | "spaceinvaders" => Some(GamePreset::Invaders),
            _ => None,
        }
    }

    /// World configuration this game expects
    pub fn settings(&self) -> WorldSettings {
        match self {
            GamePreset::Asteroids => WorldSettings {
                wrap: WrapPolicy::Wrap,
                ..WorldSettings::default()
            },
            GamePreset::Lander | GamePreset::Snake | GamePreset::Invaders => {
                WorldSettings::default()
            }
        }
    }
}

/// Play area and simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Play area width in pixels
    pub width: f32,
    /// Play area height in pixels
    pub height: f32,
    pub wrap: WrapPolicy,
    /// Seed for the world's RNG
    pub seed: u64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            wrap: WrapPolicy::Off,
            seed: 0,
        }
    }
}

impl WorldSettings {
    /// Same settings with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse JSON on top of `base`: fields the JSON names replace those in `base`
    pub fn from_json_over(json: &str, base: &Self) -> Result<Self, SettingsError> {
        let patch: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(overrides) = patch else {
            return Self::from_json(json);
        };
        let mut merged = serde_json::to_value(base)?;
        if let serde_json::Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }
        let settings: Self = serde_json::from_value(merged)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&contents)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load a JSON file on top of `base`, e.g. a game preset
    pub fn load_over(path: impl AsRef<Path>, base: &Self) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json_over(&contents, base)?;
        log::info!("Loaded settings from {} over preset values", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Play area must be finite and positive
    pub fn validate(&self) -> Result<(), SettingsError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(SettingsError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid play area {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = WorldSettings::default();
        assert_eq!(settings.width, 300.0);
        assert_eq!(settings.height, 300.0);
        assert_eq!(settings.wrap, WrapPolicy::Off);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_preset_names_round_trip() {
        for preset in GamePreset::ALL {
            assert_eq!(GamePreset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(GamePreset::from_str("LANDER"), Some(GamePreset::Lander));
        assert_eq!(GamePreset::from_str("pong"), None);
    }

    #[test]
    fn test_only_asteroids_wraps() {
        assert_eq!(GamePreset::Asteroids.settings().wrap, WrapPolicy::Wrap);
        assert_eq!(GamePreset::Lander.settings().wrap, WrapPolicy::Off);
        assert_eq!(GamePreset::Snake.settings().wrap, WrapPolicy::Off);
        assert_eq!(GamePreset::Invaders.settings().wrap, WrapPolicy::Off);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let settings = WorldSettings::from_json(r#"{"width": 640.0, "wrap": "Wrap"}"#)
            .expect("valid settings");
        assert_eq!(settings.width, 640.0);
        assert_eq!(settings.height, 300.0);
        assert_eq!(settings.wrap, WrapPolicy::Wrap);
        assert_eq!(settings.seed, 0);
    }

    #[test]
    fn test_json_over_preset_keeps_unnamed_fields() {
        let base = GamePreset::Asteroids.settings().with_seed(9);
        let settings = WorldSettings::from_json_over(r#"{"width": 640.0}"#, &base)
            .expect("valid settings");
        assert_eq!(settings.width, 640.0);
        assert_eq!(settings.height, 300.0);
        assert_eq!(settings.wrap, WrapPolicy::Wrap);
        assert_eq!(settings.seed, 9);

        let off = WorldSettings::from_json_over(r#"{"wrap": "Off"}"#, &base)
            .expect("valid settings");
        assert_eq!(off.wrap, WrapPolicy::Off);

        assert!(matches!(
            WorldSettings::from_json_over(r#"{"height": 0.0}"#, &base),
            Err(SettingsError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            WorldSettings::from_json_over("{not json", &base),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            WorldSettings::from_json("{not json"),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            WorldSettings::from_json(r#"{"width": 0.0}"#),
            Err(SettingsError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            WorldSettings::from_json(r#"{"height": -5.0}"#),
            Err(SettingsError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "vector-arcade-settings-{}.json",
            std::process::id()
        ));
        let settings = GamePreset::Asteroids.settings().with_seed(42);
        settings.save(&path).expect("save");
        let loaded = WorldSettings::load(&path).expect("load");
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = WorldSettings::load("/nonexistent/vector-arcade/settings.json");
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }
}
