//! Game settings
//!
//! Read once at startup from a JSON file. Anything missing falls back to
//! its default; an unreadable file falls back entirely.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Fixed run seed; random when absent
    pub seed: Option<u64>,
    /// Level a fresh run starts on
    pub start_level: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Eat cue volume (0.0 - 1.0)
    pub eat_volume: f32,
    /// Die cue volume (0.0 - 1.0)
    pub die_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            seed: None,
            start_level: 1,

            master_volume: 1.0,
            eat_volume: 0.2,
            die_volume: 0.5,
            muted: false,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file
    pub const PATH_ENV: &'static str = "SNAKE_LEVELS_CONFIG";
    /// File looked up in the working directory otherwise
    const DEFAULT_FILE: &'static str = "snake-levels.json";

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Tick rate with a floor of one tick per second
    pub fn effective_tick_rate(&self) -> u32 {
        self.tick_rate.max(1)
    }

    /// Start level clamped into the authored range
    pub fn effective_start_level(&self) -> u32 {
        crate::clamp_level(self.start_level)
    }

    /// Where `load` looks for the settings file
    pub fn path() -> PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_FILE))
    }

    /// Load settings from the configured path
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load settings from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 9, "muted": true }"#).unwrap();
        assert_eq!(settings.seed, Some(9));
        assert!(settings.muted);
        assert_eq!(settings.tick_rate, TICK_RATE);
        assert_eq!(settings.start_level, 1);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ tick_rate: }").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_from(Path::new("/definitely/not/here.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let path = std::env::temp_dir().join(format!("snake-levels-{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        let settings = Settings::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_effective_values() {
        let settings = Settings {
            tick_rate: 0,
            start_level: 42,
            ..Settings::default()
        };
        assert_eq!(settings.effective_tick_rate(), 1);
        assert_eq!(settings.effective_start_level(), 5);
    }
}
