//! Host preferences: audio mix, mouse feel, camera field of view
//!
//! The core never touches a disk; the host decides where the JSON
//! blob lives (config file, local storage, ...).

use serde::{Deserialize, Serialize};

/// Host-facing preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mouse look sensitivity multiplier
    pub mouse_sensitivity: f32,
    /// Camera field of view (degrees)
    pub fov: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.8,
            mouse_sensitivity: 1.0,
            fov: 80.0,
        }
    }
}

impl Settings {
    /// Parse settings the host loaded; falls back to defaults on bad input.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("invalid settings JSON, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Serialize for the host to store.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Clamp every field into its valid range after host edits.
    pub fn sanitize(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.mouse_sensitivity = self.mouse_sensitivity.clamp(0.1, 5.0);
        self.fov = self.fov.clamp(50.0, 120.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.music_volume = 0.25;
        let restored = Settings::from_json(&settings.to_json());
        assert_eq!(restored, settings);
    }

    #[test]
    fn test_bad_json_falls_back_to_defaults() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_sanitize_clamps() {
        let mut settings = Settings {
            master_volume: 2.0,
            sfx_volume: -1.0,
            music_volume: 0.5,
            mouse_sensitivity: 99.0,
            fov: 10.0,
        };
        settings.sanitize();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
        assert_eq!(settings.mouse_sensitivity, 5.0);
        assert_eq!(settings.fov, 50.0);
    }
}
