//! Configuration management for the nebby orbit scene.
//!
//! Settings live in `config.toml` inside the platform config directory.
//! A missing file means defaults; every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use nebby_core::{
    Cycle, DEFAULT_EPOCH_SECONDS, DEFAULT_SECTORS, DEFAULT_STAR_COUNT, MAX_PIXEL_RATIO,
    MIN_PIXEL_RATIO,
};
use serde::{Deserialize, Serialize};

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while loading, validating or saving configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("could not determine a configuration directory")]
    NoConfigDir,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Length of one epoch in seconds.
    pub epoch_seconds: f64,
    /// Number of sectors the orbit is divided into.
    pub sectors: u32,
    /// Simulation speed relative to real time.
    pub speed_multiplier: f64,
    /// Number of background stars.
    pub star_count: usize,
    /// Frame scheduler target rate.
    pub target_fps: u32,
    /// Device pixels per logical unit.
    pub pixel_ratio: f32,
    /// Whether the HUD overlay is visible.
    pub show_hud: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epoch_seconds: DEFAULT_EPOCH_SECONDS,
            sectors: DEFAULT_SECTORS,
            speed_multiplier: 1.0,
            star_count: DEFAULT_STAR_COUNT,
            target_fps: 30,
            pixel_ratio: 0.25,
            show_hud: true,
        }
    }
}

impl Config {
    /// Default config file location, e.g. `~/.config/nebby/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "nebby")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location, falling back to defaults when absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_path()?)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Reject values the scene cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.epoch_seconds.is_finite() && self.epoch_seconds > 0.0) {
            return Err(invalid("epoch_seconds", "must be a positive number"));
        }
        if self.sectors == 0 {
            return Err(invalid("sectors", "must be at least 1"));
        }
        if !(self.speed_multiplier.is_finite() && self.speed_multiplier > 0.0) {
            return Err(invalid("speed_multiplier", "must be a positive number"));
        }
        if self.target_fps == 0 {
            return Err(invalid("target_fps", "must be at least 1"));
        }
        if !(MIN_PIXEL_RATIO..=MAX_PIXEL_RATIO).contains(&self.pixel_ratio) {
            return Err(invalid(
                "pixel_ratio",
                format!("must be in [{MIN_PIXEL_RATIO}, {MAX_PIXEL_RATIO}]"),
            ));
        }
        Ok(())
    }

    /// Epoch cycle described by this config.
    pub fn cycle(&self) -> Cycle {
        Cycle::new(self.epoch_seconds, self.sectors)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("nebby-config-{}-{name}", std::process::id()))
            .join(CONFIG_FILE_NAME)
    }

    #[test]
    fn test_defaults_match_scene_constants() {
        let config = Config::default();
        assert_eq!(config.epoch_seconds, 86_400.0);
        assert_eq!(config.sectors, 90);
        assert_eq!(config.star_count, 180);
        assert!(config.validate().is_ok());
        assert_eq!(config.cycle(), Cycle::new(86_400.0, 90));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = Config::from_toml("sectors = 12\nshow_hud = false\n").unwrap();
        assert_eq!(config.sectors, 12);
        assert!(!config.show_hud);
        assert_eq!(config.target_fps, 30);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = Config::from_toml("sectors = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "sectors", .. }));

        let err = Config::from_toml("epoch_seconds = -5.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "epoch_seconds", .. }));

        let err = Config::from_toml("pixel_ratio = 3.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "pixel_ratio", .. }));
    }

    #[test]
    fn test_pixel_ratio_matches_viewport_bounds() {
        let err = Config::from_toml("pixel_ratio = 0.005").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "pixel_ratio", .. }));

        assert!(Config::from_toml(&format!("pixel_ratio = {MIN_PIXEL_RATIO}")).is_ok());
        assert!(Config::from_toml("pixel_ratio = 2.0").is_ok());
        assert!(Config::from_toml("pixel_ratio = 0.3").is_ok());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = Config::from_toml("sectors = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load_from(temp_path("missing")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_path("save");
        let config = Config {
            show_hud: false,
            speed_multiplier: 600.0,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
