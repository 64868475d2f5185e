use std::path::Path;

use egui::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::MIN_EXTENT;

/// Environment variable naming a JSON config file read at startup.
pub const CONFIG_ENV_VAR: &str = "EFRAME_REDACT_CONFIG";

/// Encoding used when the canvas is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
}

impl ExportFormat {
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            ExportFormat::Png => image::ImageFormat::Png,
            ExportFormat::Jpeg => image::ImageFormat::Jpeg,
            ExportFormat::Bmp => image::ImageFormat::Bmp,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Bmp => "bmp",
        }
    }
}

/// User-tunable editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct EditorConfig {
    /// RGBA fill used to black out regions
    pub mask_color: [u8; 4],
    /// Size of the selection shown when selection mode is entered
    pub default_selection: Vec2,
    /// Smallest width/height a selection can be resized to
    pub min_extent: f32,
    /// Extra pixels redrawn around a region when it is restored
    pub restore_padding: f32,
    pub export_format: ExportFormat,
    pub download_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            mask_color: [0, 0, 0, 255],
            default_selection: Vec2::splat(100.0),
            min_extent: MIN_EXTENT,
            restore_padding: 2.0,
            export_format: ExportFormat::Png,
            download_name: "image.png".to_owned(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reads the file named by [`CONFIG_ENV_VAR`], if set.
    pub fn from_env() -> Option<Result<Self, ConfigError>> {
        let path = std::env::var_os(CONFIG_ENV_VAR)?;
        log::info!("Loading editor config from {}", Path::new(&path).display());
        Some(Self::load(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = EditorConfig::from_json(r#"{ "mask_color": [255, 0, 0, 255] }"#).unwrap();
        assert_eq!(config.mask_color, [255, 0, 0, 255]);
        assert_eq!(config.restore_padding, 2.0);
        assert_eq!(config.download_name, "image.png");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(EditorConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }
}
