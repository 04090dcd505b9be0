//! Sound cues
//!
//! Two cues exist: eating food and dying. The manager owns the volume
//! model; the platform decides how an audible cue is actually produced.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Food consumed
    Eat,
    /// Lethal collision
    Die,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    eat_volume: f32,
    die_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 1.0,
            eat_volume: 0.2,
            die_volume: 0.5,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.eat_volume = settings.eat_volume.clamp(0.0, 1.0);
        audio.die_volume = settings.die_volume.clamp(0.0, 1.0);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective volume of a cue
    pub fn volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let base = match effect {
            SoundEffect::Eat => self.eat_volume,
            SoundEffect::Die => self.die_volume,
        };
        self.master_volume * base
    }

    /// Whether a cue should make any sound at all
    pub fn is_audible(&self, effect: SoundEffect) -> bool {
        self.volume(effect) > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_volumes() {
        let audio = AudioManager::new();
        assert!((audio.volume(SoundEffect::Eat) - 0.2).abs() < 1e-6);
        assert!((audio.volume(SoundEffect::Die) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_mute_and_master() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(0.5);
        assert!((audio.volume(SoundEffect::Die) - 0.25).abs() < 1e-6);
        audio.set_muted(true);
        assert!(!audio.is_audible(SoundEffect::Eat));
        assert!(!audio.is_audible(SoundEffect::Die));
    }

    #[test]
    fn test_from_settings_clamps() {
        let settings = Settings {
            master_volume: 3.0,
            eat_volume: 0.0,
            ..Settings::default()
        };
        let audio = AudioManager::from_settings(&settings);
        assert!(!audio.is_audible(SoundEffect::Eat));
        assert!((audio.volume(SoundEffect::Die) - 0.5).abs() < 1e-6);
    }
}
