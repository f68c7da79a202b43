//! Scenes: named console states stored as TOML.

use std::path::Path;

use edumixer_core::ConsoleState;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, read_to_string, write_creating_dirs};
use crate::format::to_toml_string;
use crate::validation::{ValidationResult, validate_console};

/// A named console state.
///
/// Missing fields take their power-on values, so a scene only needs to
/// spell out what differs from a freshly powered console:
///
/// ```toml
/// name = "Lead vocal"
///
/// [console.master]
/// fader = 0.7
///
/// [[console.channels]]
/// gain = 0.9
/// pan = -0.2
///
/// [[console.channels]]
/// [[console.channels]]
/// [[console.channels]]
/// ```
///
/// `channels` and `subgroups`, when present, must list all four strips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name.
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Console controls.
    #[serde(default)]
    pub console: ConsoleState,
}

impl Scene {
    /// Creates a scene from a console state.
    pub fn new(name: impl Into<String>, console: ConsoleState) -> Self {
        Self {
            name: name.into(),
            description: None,
            console,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Loads a scene file and checks every control value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let scene = Self::from_toml(&read_to_string(path.as_ref())?)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Parses a scene without range checks.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serializes the scene to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        to_toml_string(self)
    }

    /// Writes the scene to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        write_creating_dirs(path.as_ref(), &self.to_toml()?)
    }

    /// Checks every control value against its range.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_console(&self.console)
    }
}
