//! User-editable run defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use sortscope_core::{
    Algorithm, DEFAULT_ELEMENTS, DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY, DEFAULT_SPEED,
    PacingPolicy, SessionConfig,
};

use crate::error::ConfigError;
use crate::paths;
use crate::validation::validate_settings;

/// Largest array the visualizer accepts.
pub const MAX_ELEMENTS: usize = 2048;

/// Persisted run parameters.
///
/// Missing keys fall back to the same defaults [`SessionConfig::default`]
/// uses, so an empty file is a valid settings file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Algorithm picked when none is named on the command line.
    pub algorithm: Algorithm,

    /// Array length, `2..=2048`.
    pub element_count: usize,

    /// Speed percentage, `0..=100`.
    pub speed: u8,

    /// Shortest step delay in milliseconds.
    pub min_delay_ms: u64,

    /// Longest step delay in milliseconds.
    pub max_delay_ms: u64,

    /// Play the highlight sweep after a completed run.
    pub sweep: bool,

    /// Fixed seed for reproducible shuffles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bubble,
            element_count: DEFAULT_ELEMENTS,
            speed: DEFAULT_SPEED,
            min_delay_ms: DEFAULT_MIN_DELAY.as_millis() as u64,
            max_delay_ms: DEFAULT_MAX_DELAY.as_millis() as u64,
            sweep: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// The file is parsed but not validated; call [`validate`](Self::validate)
    /// before handing the values to a session.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Render the settings as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_settings(self)?;
        Ok(())
    }

    /// Load and validate the user's settings file, or return the defaults
    /// if it does not exist yet.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Self::load_or_default_from(paths::settings_path())
    }

    /// [`load_or_default`](Self::load_or_default) against an explicit path.
    pub fn load_or_default_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let settings = Self::load(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Pacing policy for these bounds and speed.
    pub fn pacing(&self) -> PacingPolicy {
        PacingPolicy::new(
            Duration::from_millis(self.min_delay_ms),
            Duration::from_millis(self.max_delay_ms),
        )
        .with_speed(self.speed)
    }

    /// Session parameters for these settings.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            elements: self.element_count,
            min_delay: Duration::from_millis(self.min_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            speed: self.speed,
            sweep: self.sweep,
            seed: self.seed,
        }
    }
}
