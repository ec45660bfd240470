//! Game settings
//!
//! Gameplay tuning plus the presentation block the host engine reads to set
//! up its window. Loaded from a JSON file; any field left out keeps its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player displacement per tick, per held key
    pub player_speed: f32,
    /// Zombie pursuit step per tick
    pub zombie_step: f32,
    /// Bullet displacement per tick
    pub bullet_speed: f32,
    /// Vertical offset of a new bullet relative to the player
    pub bullet_spawn_offset_y: f32,

    pub zombie_spawn_interval_ms: u64,
    /// Zombies spawn uniformly in [0, x) × [0, y)
    pub zombie_spawn_area: Vec2,
    pub dead_zombie_linger_ms: u64,
    pub restart_delay_ms: u64,

    pub player_start: Vec2,
    pub gun_position: Vec2,

    // === Collision boxes (scaled sprite sizes) ===
    pub player_size: Vec2,
    pub zombie_size: Vec2,
    pub gun_size: Vec2,
    pub bullet_size: Vec2,

    /// Cull bullets this far outside the viewport. `None` keeps them forever.
    pub bullet_cull_margin: Option<f32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            zombie_step: ZOMBIE_STEP,
            bullet_speed: BULLET_SPEED,
            bullet_spawn_offset_y: BULLET_SPAWN_OFFSET_Y,

            zombie_spawn_interval_ms: ZOMBIE_SPAWN_INTERVAL_MS,
            zombie_spawn_area: Vec2::splat(ZOMBIE_SPAWN_AREA),
            dead_zombie_linger_ms: DEAD_ZOMBIE_LINGER_MS,
            restart_delay_ms: RESTART_DELAY_MS,

            player_start: Vec2::from(PLAYER_START),
            gun_position: Vec2::from(GUN_POSITION),

            player_size: Vec2::splat(PLAYER_FRAME * PLAYER_SCALE),
            zombie_size: Vec2::splat(ZOMBIE_FRAME * ZOMBIE_SCALE),
            gun_size: Vec2::splat(GUN_FRAME * GUN_SCALE),
            bullet_size: Vec2::splat(BULLET_FRAME * BULLET_SCALE),

            bullet_cull_margin: Some(BULLET_CULL_MARGIN),
        }
    }
}

/// Window setup for the host engine. The core only reads the viewport size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presentation {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub background_color: String,
    pub pixel_art: bool,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
            title: "Zombie Assault".to_string(),
            background_color: "#555".to_string(),
            pixel_art: true,
        }
    }
}

impl Presentation {
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Complete settings document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,
    pub presentation: Presentation,
}

impl Settings {
    /// Parse and validate a settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from disk. A missing file falls back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let t = &self.tuning;

        positive("tuning.player_speed", t.player_speed)?;
        positive("tuning.zombie_step", t.zombie_step)?;
        positive("tuning.bullet_speed", t.bullet_speed)?;

        if t.zombie_spawn_interval_ms == 0 {
            return Err(invalid("tuning.zombie_spawn_interval_ms", "must be at least 1"));
        }
        if t.zombie_spawn_area.x <= 0.0 || t.zombie_spawn_area.y <= 0.0 {
            return Err(invalid("tuning.zombie_spawn_area", "both extents must be positive"));
        }

        for (field, size) in [
            ("tuning.player_size", t.player_size),
            ("tuning.zombie_size", t.zombie_size),
            ("tuning.gun_size", t.gun_size),
            ("tuning.bullet_size", t.bullet_size),
        ] {
            if size.x <= 0.0 || size.y <= 0.0 {
                return Err(invalid(field, "collision boxes need a positive width and height"));
            }
        }

        if let Some(margin) = t.bullet_cull_margin {
            if !margin.is_finite() || margin < 0.0 {
                return Err(invalid("tuning.bullet_cull_margin", "must be finite and >= 0"));
            }
        }

        if self.presentation.width == 0 || self.presentation.height == 0 {
            return Err(invalid("presentation", "viewport must be non-empty"));
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be a positive number, got {value}")))
    }
}

fn invalid(field: &'static str, reason: &str) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_arcade_values() {
        let settings = Settings::default();
        assert_eq!(settings.tuning.player_speed, 3.0);
        assert_eq!(settings.tuning.zombie_step, 1.0);
        assert_eq!(settings.tuning.bullet_speed, 20.0);
        assert_eq!(settings.presentation.title, "Zombie Assault");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "tuning": { "bullet_speed": 12.5 } }"#).unwrap();
        assert_eq!(settings.tuning.bullet_speed, 12.5);
        assert_eq!(settings.tuning.player_speed, PLAYER_SPEED);
        assert_eq!(settings.presentation.width, VIEWPORT_WIDTH);
    }

    #[test]
    fn test_unbounded_bullets_round_trip() {
        let settings =
            Settings::from_json(r#"{ "tuning": { "bullet_cull_margin": null } }"#).unwrap();
        assert_eq!(settings.tuning.bullet_cull_margin, None);
    }

    #[test]
    fn test_rejects_zero_step() {
        let err = Settings::from_json(r#"{ "tuning": { "zombie_step": 0.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "tuning.zombie_step",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ tuning: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load("/definitely/not/here/zombie-assault.json").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
