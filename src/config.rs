use std::path::{Path, PathBuf};

use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gesture::GestureConfig;
use crate::sticker::{DEFAULT_STICKER_POSITION, Palette};

/// Environment variable holding the path of the JSON config file
pub const CONFIG_ENV_VAR: &str = "SELFIE_STICKERS_CONFIG";

/// Stand-in for the host's answer to an authorization prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Granted,
    Denied,
    /// Not decided yet; the first request grants it
    #[default]
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing keys fall back to the defaults below
pub struct AppConfig {
    pub default_sticker_position: Pos2,
    pub long_press_secs: f64,
    pub drag_slop: f32,
    pub palette: Palette,
    pub gallery_dir: PathBuf,
    /// Still image served by the desktop camera; a test pattern when unset
    pub camera_source: Option<PathBuf>,
    pub camera_permission: Permission,
    pub gallery_permission: Permission,
}

impl Default for AppConfig {
    fn default() -> Self {
        let gesture = GestureConfig::default();
        Self {
            default_sticker_position: DEFAULT_STICKER_POSITION,
            long_press_secs: gesture.long_press_secs,
            drag_slop: gesture.drag_slop,
            palette: Palette::default(),
            gallery_dir: std::env::temp_dir().join("selfie_stickers"),
            camera_source: None,
            camera_permission: Permission::Prompt,
            gallery_permission: Permission::Prompt,
        }
    }
}

impl AppConfig {
    /// Reads a JSON config. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn gesture(&self) -> GestureConfig {
        GestureConfig {
            long_press_secs: self.long_press_secs,
            drag_slop: self.drag_slop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(
            r#"{ "long_press_secs": 0.8, "camera_permission": "denied", "palette": ["🦷", "🚀"] }"#,
        )
        .unwrap();

        assert_eq!(config.long_press_secs, 0.8);
        assert_eq!(config.camera_permission, Permission::Denied);
        assert_eq!(config.gallery_permission, Permission::Prompt);
        assert_eq!(config.palette.get(1), Some("🚀"));
        assert_eq!(config.default_sticker_position, Pos2::new(50.0, 100.0));
        assert_eq!(config.gesture().drag_slop, 5.0);
    }

    #[test]
    fn test_blank_palette_entries_are_ignored() {
        let config = AppConfig::from_json(r#"{ "palette": ["", "⭐"] }"#).unwrap();
        assert_eq!(config.palette.len(), 1);
        assert_eq!(config.palette.get(0), Some("⭐"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            AppConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::new_v4()));
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
    }
}
