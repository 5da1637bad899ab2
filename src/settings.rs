//! Player-facing presentation and audio preferences
//!
//! Read-only at runtime. The browser build picks up an optional JSON blob
//! embedded in the page; nothing is written back.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Maximum debris particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Screen shake when a hazard goes off
    pub screen_shake: bool,
    /// Debris particles
    pub particles: bool,
    /// White flash when a hazard goes off
    pub explosion_flash: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Ambience volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            // Visual effects - all on by default
            screen_shake: true,
            particles: true,
            explosion_flash: true,

            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the full-screen flash
        if preset == QualityPreset::Low {
            self.explosion_flash = false;
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Final gain for one-shot effects
    pub fn sfx_gain(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Final gain for the ambience loop
    pub fn music_gain(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    /// Parse from a JSON object; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str::<serde_json::Value>(json)? {
            value @ serde_json::Value::Object(_) => serde_json::from_value(value),
            _ => Err(serde::de::Error::custom("settings must be a JSON object")),
        }
    }

    /// Id of the `<script type="application/json">` element holding overrides
    pub const ELEMENT_ID: &'static str = "game-settings";

    /// Load settings embedded in the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from page");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_cap() {
        let mut settings = Settings::from_preset(QualityPreset::Low);
        assert_eq!(settings.max_particles(), 100);
        assert!(!settings.explosion_flash);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
        assert_eq!(Settings::from_preset(QualityPreset::High).max_particles(), 2000);
    }

    #[test]
    fn test_gains() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            music_volume: 4.0,
            ..Settings::default()
        };
        assert_eq!(settings.sfx_gain(), 0.25);
        assert_eq!(settings.music_gain(), 1.0);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{ "quality": "High", "screen_shake": false }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(!settings.screen_shake);
        assert!(settings.particles);
    }

    #[test]
    fn test_rejects_non_object_json() {
        assert!(Settings::from_json("{ not json").is_err());
        let err = Settings::from_json("[]").unwrap_err();
        assert!(err.to_string().contains("JSON object"));
        assert!(Settings::from_json("42").is_err());
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }
}
