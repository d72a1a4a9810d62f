//! Game settings
//!
//! Persisted separately from the energy keys. Missing fields take their
//! defaults, so older settings files keep loading.

use serde::{Deserialize, Serialize};

use crate::consts::{FLUTTER_CHANCE, RECOVERY_TIME_SECS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; `None` picks one from the clock at startup
    pub seed: Option<u64>,
    /// Wall-clock seconds before an empty energy bar refills
    pub recovery_secs: u64,
    /// Per-tick chance that a flying duck flips vertical direction
    pub flutter_chance: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            recovery_secs: RECOVERY_TIME_SECS,
            flutter_chance: FLUTTER_CHANCE,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "duck_hunt_settings";

    /// Parse settings JSON, clamping values into sane ranges
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => Some(settings.sanitized()),
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                None
            }
        }
    }

    pub fn sanitized(mut self) -> Self {
        self.flutter_chance = self.flutter_chance.clamp(0.0, 1.0);
        if self.recovery_secs == 0 {
            self.recovery_secs = 1;
        }
        self
    }

    /// Seed to use for a new session
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from a JSON file (native). Falls back to defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).unwrap_or_default(),
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{ "recovery_secs": 10 }"#).unwrap();
        assert_eq!(s.recovery_secs, 10);
        assert_eq!(s.flutter_chance, FLUTTER_CHANCE);
        assert_eq!(s.seed, None);
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(Settings::from_json("recovery_secs = 10").is_none());
    }

    #[test]
    fn test_values_clamped() {
        let s = Settings::from_json(r#"{ "flutter_chance": 3.0, "recovery_secs": 0 }"#).unwrap();
        assert_eq!(s.flutter_chance, 1.0);
        assert_eq!(s.recovery_secs, 1);
    }

    #[test]
    fn test_seed_fallback() {
        let mut s = Settings::default();
        assert_eq!(s.seed_or(9), 9);
        s.seed = Some(4);
        assert_eq!(s.seed_or(9), 4);
    }
}
