//! Session settings: tick cadence, audio stream and synth voicing.

use std::path::Path;

use edumixer_synth::SynthConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, read_to_string, write_creating_dirs};
use crate::format::to_toml_string;
use crate::validation::{ValidationResult, validate_session};

/// Everything about a session that is not console state.
///
/// ```toml
/// tick_rate_hz = 60.0
/// sample_rate = 48000
/// buffer_size = 512
///
/// [synth]
/// headroom = 0.15
/// smoothing_ms = 50.0
///
/// [[synth.voices]]
/// frequency = 130.81
/// waveform = "sine"
/// # ...three more voices
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Scheduler ticks per second.
    pub tick_rate_hz: f32,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Output buffer size in frames.
    pub buffer_size: u32,
    /// Output device name filter; the default device when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_device: Option<String>,
    /// Reference synth voicing.
    pub synth: SynthConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,
            sample_rate: 48000,
            buffer_size: 512,
            output_device: None,
            synth: SynthConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Loads and validates a session file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let session = Self::from_toml(&read_to_string(path.as_ref())?)?;
        session.validate()?;
        Ok(session)
    }

    /// Parses a session from TOML without validating it.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serializes the session to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        to_toml_string(self)
    }

    /// Writes the session to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        write_creating_dirs(path.as_ref(), &self.to_toml()?)
    }

    /// Checks timing and synth ranges.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_session(self)
    }
}
