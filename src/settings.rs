//! Game tuning and user preferences
//!
//! `GameConfig` holds the simulation tuning (JSON-loadable, validated).
//! `Settings` holds the player-facing preferences, persisted in LocalStorage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::difficulty::{DEFAULT_DIFFICULTY, DifficultyTier, is_monotonic};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed number of player slots
    pub max_players: usize,
    pub width: f32,
    pub height: f32,
    pub spawn_interval_ms: f64,
    /// Fraction of each screen edge kept free of spawns
    pub spawn_margin_ratio: f32,
    pub max_target_age_ms: f64,
    pub collidable_box_size: f32,
    pub min_collision_score: f32,
    pub happy_window_ms: f64,
    pub difficulty: Vec<DifficultyTier>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_players: MAX_PLAYERS,
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_margin_ratio: SPAWN_MARGIN_RATIO,
            max_target_age_ms: MAX_TARGET_AGE_MS,
            collidable_box_size: COLLIDABLE_BOX_SIZE,
            min_collision_score: MIN_COLLISION_SCORE,
            happy_window_ms: HAPPY_WINDOW_MS,
            difficulty: DEFAULT_DIFFICULTY.to_vec(),
        }
    }
}

impl GameConfig {
    /// Default tuning for a given screen size
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse and validate; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.max_players == 0 {
            return invalid("max_players must be at least 1");
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return invalid("world size must be positive");
        }
        if !(self.spawn_interval_ms > 0.0) {
            return invalid("spawn_interval_ms must be positive");
        }
        if !(0.0..0.5).contains(&self.spawn_margin_ratio) {
            return invalid("spawn_margin_ratio must be in [0, 0.5)");
        }
        if !(self.max_target_age_ms > 0.0) {
            return invalid("max_target_age_ms must be positive");
        }
        if !(self.collidable_box_size > 0.0) {
            return invalid("collidable_box_size must be positive");
        }
        if !is_monotonic(&self.difficulty) {
            return invalid("difficulty tiers must start at 0 and never decrease");
        }
        Ok(())
    }
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub sound_on: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { sound_on: true }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "pose_pop_settings";

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_on = !self.sound_on;
        self.sound_on
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to write settings");
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = GameConfig::from_json(r#"{"max_players": 2, "width": 1280, "height": 720}"#)
            .unwrap();
        assert_eq!(config.max_players, 2);
        assert_eq!(config.width, 1280.0);
        assert_eq!(config.spawn_interval_ms, SPAWN_INTERVAL_MS);
        assert_eq!(config.difficulty, DEFAULT_DIFFICULTY.to_vec());
    }

    #[test]
    fn test_rejects_bad_values() {
        for json in [
            r#"{"max_players": 0}"#,
            r#"{"width": -1}"#,
            r#"{"spawn_interval_ms": 0}"#,
            r#"{"spawn_margin_ratio": 0.5}"#,
            r#"{"max_target_age_ms": 0}"#,
            r#"{"collidable_box_size": 0}"#,
            r#"{"difficulty": []}"#,
            r#"{"difficulty": [
                {"min_destroyed": 0, "max_targets": 3, "speed": 0},
                {"min_destroyed": 5, "max_targets": 1, "speed": 0}
            ]}"#,
        ] {
            let err = GameConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{json}: {err}");
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_with_size() {
        let config = GameConfig::with_size(800.0, 600.0);
        assert_eq!((config.width, config.height), (800.0, 600.0));
        assert_eq!(config.max_players, MAX_PLAYERS);
    }

    #[test]
    fn test_sound_toggle() {
        let mut settings = Settings::load();
        assert!(settings.sound_on);
        assert!(!settings.toggle_sound());
        assert!(settings.toggle_sound());
        settings.save();
    }
}
