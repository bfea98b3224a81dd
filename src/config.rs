//! Roller settings, loaded once at start-up from an optional TOML file.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use bevy::prelude::Resource;
use image::{Rgba, RgbaImage};
use serde::Deserialize;

use crate::geometry::Texture;
use crate::utils::constants::{
    cube_constants::{CUBE_SIZE, EMPTY_IMAGE_SIZE, GREY_LUMA},
    game_constants::TEXTURE_DIR,
    screen_constants::{PROJECTION_SCALE, SCREEN_HEIGHT, SCREEN_WIDTH},
};

/// Immutable settings shared by the renderer, the texture pool and the app shell.
///
/// Every field may be omitted from the file, missing ones take the built-in defaults.
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RollerConfig {
    /// Width of the render sink in pixels.
    pub screen_width: u32,
    /// Height of the render sink in pixels.
    pub screen_height: u32,
    /// Edge length of the cube.
    pub cube_size: f64,
    /// Scale applied to rotated vertices before centering.
    pub projection_scale: f64,
    /// Directory scanned for textures at start-up.
    pub texture_dir: String,
    /// Fixed seed for the roll RNG, a time based one is used when absent.
    pub seed: Option<u64>,
}

impl Default for RollerConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cube_size: CUBE_SIZE,
            projection_scale: PROJECTION_SCALE,
            texture_dir: TEXTURE_DIR.to_string(),
            seed: None,
        }
    }
}

/// Errors raised while reading the settings file.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "could not read config file: {err}"),
            ConfigError::Parse(err) => write!(f, "invalid config file: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// The two stand-in images shown on faces without a texture.
#[derive(Clone, Debug)]
pub struct Placeholders {
    /// Plain white image used before any texture was ever assigned.
    pub empty: Texture,
    /// Cube sized grey image used once the pool ran dry.
    pub grey: Texture,
}

impl RollerConfig {
    /// Parses settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses the settings file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Like [`RollerConfig::load`] but falls back to the defaults, logging why.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded settings from '{}'", path.display());
                config
            }
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings file at '{}', using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("{err}, using defaults");
                Self::default()
            }
        }
    }

    /// Builds the "empty" and "grey" placeholder images.
    pub fn placeholders(&self) -> Placeholders {
        let side = (self.cube_size.round() as u32).max(1);
        Placeholders {
            empty: Arc::new(RgbaImage::from_pixel(
                EMPTY_IMAGE_SIZE,
                EMPTY_IMAGE_SIZE,
                Rgba([255, 255, 255, 255]),
            )),
            grey: Arc::new(RgbaImage::from_pixel(
                side,
                side,
                Rgba([GREY_LUMA, GREY_LUMA, GREY_LUMA, 255]),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Defaults match the classic 960x720 window with a 150 unit cube.
    #[test]
    fn defaults() {
        let config = RollerConfig::default();
        assert_eq!(config.screen_width, 960);
        assert_eq!(config.screen_height, 720);
        assert_eq!(config.cube_size, 150.0);
        assert_eq!(config.projection_scale, 1.5);
        assert_eq!(config.texture_dir, "img");
        assert_eq!(config.seed, None);
    }

    /// Keys left out of the file keep their default value.
    #[test]
    fn partial_override() {
        let config = RollerConfig::from_toml_str("cube_size = 100.0\nseed = 7\n").unwrap();
        assert_eq!(config.cube_size, 100.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.screen_width, 960);
        assert_eq!(config.texture_dir, "img");
    }

    /// Malformed TOML is reported as a parse error.
    #[test]
    fn parse_error_is_reported() {
        let err = RollerConfig::from_toml_str("screen_width = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid config file"));
    }

    /// A missing file is an io error, and the lenient loader falls back to defaults.
    #[test]
    fn missing_file() {
        let path = "definitely/not/here/roller.toml";
        assert!(matches!(RollerConfig::load(path), Err(ConfigError::Io(_))));
        assert_eq!(RollerConfig::load_or_default(path), RollerConfig::default());
    }

    #[test]
    fn placeholder_sizes() {
        let placeholders = RollerConfig::default().placeholders();
        assert_eq!(placeholders.empty.dimensions(), (3, 3));
        assert_eq!(placeholders.grey.dimensions(), (150, 150));
        assert_eq!(placeholders.grey.get_pixel(10, 10).0, [128, 128, 128, 255]);
        assert_eq!(placeholders.empty.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }
}
