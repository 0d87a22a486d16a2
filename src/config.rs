//! Game configuration loaded from JSON.
//!
//! Every field falls back to its default, so a configuration file only needs
//! the values it overrides. Loaded values are validated before use.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::Resource;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::VolumeSettings;
use crate::player::PlayerConfig;
use crate::{DEFAULT_GRAVITY_STRENGTH, FIXED_TIMESTEP_SECONDS};

/// Errors raised while loading a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid configuration JSON.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// A value is outside its accepted range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Top-level game settings.
///
/// # Examples
///
/// ```
/// use gravflip::GameConfig;
///
/// let config: GameConfig =
///     serde_json::from_str(r#"{ "gravity_strength": 4.0, "player": { "interact_range": 20.0 } }"#)
///         .unwrap();
/// assert_eq!(config.gravity_strength, 4.0);
/// assert_eq!(config.player.interact_range, 20.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player tuning.
    pub player: PlayerConfig,
    /// Gravity magnitude for spawned gravity fields.
    pub gravity_strength: f32,
    /// Length of one simulation tick in seconds.
    pub fixed_timestep_seconds: f64,
    /// Initial mixer volumes.
    pub volume: VolumeSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            gravity_strength: DEFAULT_GRAVITY_STRENGTH,
            fixed_timestep_seconds: FIXED_TIMESTEP_SECONDS,
            volume: VolumeSettings::default(),
        }
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_owned(),
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be positive, got {value}")))
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must not be negative, got {value}")))
    }
}

impl GameConfig {
    /// Reads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, is not valid
    /// JSON or holds out-of-range values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Err(e) = config.validate() {
            warn!("rejected config {}: {e}", path.display());
            return Err(e);
        }
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Propagates any [`ConfigError`] from [`GameConfig::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Checks that every value is usable by the simulation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let player = &self.player;
        require_positive("player.move_speed", player.move_speed)?;
        require_positive("player.max_horizontal_speed", player.max_horizontal_speed)?;
        require_non_negative("player.look_sensitivity", player.look_sensitivity)?;
        require_positive("player.interact_range", player.interact_range)?;
        require_non_negative("player.beam_duration", player.beam_duration)?;
        if !(player.camera_offset.is_finite() && player.muzzle_offset.is_finite()) {
            return Err(invalid("player.camera_offset", "offsets must be finite"));
        }
        require_non_negative("gravity_strength", self.gravity_strength)?;
        if !is_usable_tick(self.fixed_timestep_seconds) {
            return Err(invalid(
                "fixed_timestep_seconds",
                &format!("must be positive, got {}", self.fixed_timestep_seconds),
            ));
        }
        if !self.volume.is_valid() {
            return Err(invalid("volume", "channels must lie within [0, 1]"));
        }
        Ok(())
    }

    /// Tick length to install as the fixed timestep.
    ///
    /// Falls back to [`FIXED_TIMESTEP_SECONDS`] when the configured value is
    /// not a positive finite number, as happens with a configuration that
    /// skipped [`GameConfig::validate`].
    #[must_use]
    pub fn timestep_seconds(&self) -> f64 {
        if is_usable_tick(self.fixed_timestep_seconds) {
            self.fixed_timestep_seconds
        } else {
            warn!(
                "ignoring fixed timestep {}s, using {FIXED_TIMESTEP_SECONDS}s",
                self.fixed_timestep_seconds
            );
            FIXED_TIMESTEP_SECONDS
        }
    }
}

const fn is_usable_tick(seconds: f64) -> bool {
    seconds.is_finite() && seconds > 0.0
}
