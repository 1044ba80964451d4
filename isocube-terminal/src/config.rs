//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. Built-in defaults
//! 2. `isocube.toml` in the working directory, or the file given with `--config`
//! 3. Environment variables (`ISOCUBE_SECTION__KEY`)
//!
//! Command line flags are applied on top by the binary.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use isocube_core::{RotationAngles, SessionSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "isocube.toml";

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub shape: ShapeConfig,
    #[serde(default)]
    pub rotation: RotationConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::MissingFile(path.display().to_string()));
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                if Path::new(DEFAULT_CONFIG_FILE).exists() {
                    figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
                }
            }
        }

        // ISOCUBE_WINDOW__WIDTH=800 -> window.width = 800
        figment = figment.merge(Env::prefixed("ISOCUBE_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session_settings(self.angles().unwrap_or_default())
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Apply command line values on top of the loaded configuration
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(width) = overrides.width {
            self.window.width = width;
        }
        if let Some(height) = overrides.height {
            self.window.height = height;
        }
        if let Some(scale) = overrides.scale {
            self.shape.scale = scale;
        }
        if let Some(dwell_ms) = overrides.dwell_ms {
            self.animation.dwell_ms = dwell_ms;
        }
        if overrides.max_frames.is_some() {
            self.animation.max_frames = overrides.max_frames;
        }
        self.validate()
    }

    /// Configured rotation increment, if any
    pub fn angles(&self) -> Option<RotationAngles> {
        self.rotation
            .angles
            .map(|[x, y, z]| RotationAngles::new(x, y, z))
    }

    /// Session parameters for the given rotation increment
    pub fn session_settings(&self, angles: RotationAngles) -> SessionSettings {
        SessionSettings {
            angles,
            width: self.window.width,
            height: self.window.height,
            scale: self.shape.scale,
            dwell: Duration::from_millis(self.animation.dwell_ms),
            max_frames: self.animation.max_frames,
        }
    }
}

/// Values given on the command line; `None` keeps the configured value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub scale: Option<f64>,
    pub dwell_ms: Option<u64>,
    pub max_frames: Option<u64>,
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Logical window width; world coordinates span `-width/2..width/2`
    pub width: u32,
    /// Logical window height
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Rotating Shape".to_string(),
            width: 1000,
            height: 1000,
        }
    }
}

/// Cube configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeConfig {
    /// Half the cube's side length
    pub scale: f64,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self { scale: 100.0 }
    }
}

/// Rotation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RotationConfig {
    /// Per-frame increment `[x, y, z]` in degrees; prompted for when unset
    pub angles: Option<[f64; 3]>,
}

/// Animation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Time each frame stays on screen, in milliseconds
    pub dwell_ms: u64,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            dwell_ms: 400,
            max_frames: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (error, warn, info, debug, trace)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    MissingFile(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Load(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Load(Box::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1000);
        assert_eq!(config.window.title, "Rotating Shape");
        assert_eq!(config.shape.scale, 100.0);
        assert_eq!(config.animation.dwell_ms, 400);
        assert!(config.angles().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("dwell_ms"));
    }

    #[test]
    fn test_session_settings() {
        let mut config = AppConfig::default();
        config.animation.max_frames = Some(3);
        let settings = config.session_settings(RotationAngles::new(1.0, 2.0, 3.0));
        assert_eq!(settings.dwell, Duration::from_millis(400));
        assert_eq!(settings.max_frames, Some(3));
        assert_eq!(settings.angles, RotationAngles::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.shape.scale = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.window.height = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.rotation.angles = Some([0.0, f64::NAN, 0.0]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_degenerate_window() {
        let mut config = AppConfig::default();
        config.window.width = 1;
        config.window.height = 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_overrides_apply_and_validate() {
        let mut config = AppConfig::default();
        let overrides = ConfigOverrides {
            width: Some(640),
            scale: Some(25.0),
            max_frames: Some(10),
            ..ConfigOverrides::default()
        };
        config.apply_overrides(&overrides).unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 1000);
        assert_eq!(config.shape.scale, 25.0);
        assert_eq!(config.animation.max_frames, Some(10));

        for scale in [f64::NAN, f64::INFINITY, 0.0, -3.0] {
            let overrides = ConfigOverrides {
                scale: Some(scale),
                ..ConfigOverrides::default()
            };
            assert!(matches!(
                AppConfig::default().apply_overrides(&overrides),
                Err(ConfigError::Invalid(_))
            ));
        }
    }
}
