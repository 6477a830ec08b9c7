/// Renderer options: background colors, outline style and wall extents
use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Vertical position of every wall top (screen-down positive).
pub const DEFAULT_CEILING_Y: f32 = -20.0;
/// Vertical position of every wall bottom.
pub const DEFAULT_FLOOR_Y: f32 = 20.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Settings the renderer reads every frame. Safe to change between frames.
///
/// Every field is optional in YAML; missing ones keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub sky_color: Color,
    pub floor_color: Color,
    pub horizon_color: Color,
    pub outline_color: Color,
    pub outline_width: f32,
    pub ceiling_y: f32,
    pub floor_y: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            sky_color: Color::rgb(0x1c, 0x22, 0x33),
            floor_color: Color::rgb(0x3a, 0x3a, 0x3a),
            horizon_color: Color::rgb(0x6b, 0x6b, 0x6b),
            outline_color: Color::rgb(0x10, 0x10, 0x10),
            outline_width: 1.0,
            ceiling_y: DEFAULT_CEILING_Y,
            floor_y: DEFAULT_FLOOR_Y,
        }
    }
}

impl RendererConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = RendererConfig::from_yaml_str("sky_color: \"#87ceeb\"\nfloor_y: 32\n").unwrap();
        assert_eq!(config.sky_color, Color::rgb(0x87, 0xce, 0xeb));
        assert_eq!(config.floor_y, 32.0);
        assert_eq!(config.ceiling_y, DEFAULT_CEILING_Y);
        assert_eq!(config.floor_color, RendererConfig::default().floor_color);
    }

    #[test]
    fn test_bad_color_is_reported() {
        let err = RendererConfig::from_yaml_str("horizon_color: \"#zzz\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
        assert!(err.to_string().contains("#zzz"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = RendererConfig {
            outline_width: 2.5,
            ..RendererConfig::default()
        };
        let text = config.to_yaml_string().unwrap();
        assert_eq!(RendererConfig::from_yaml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = RendererConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
