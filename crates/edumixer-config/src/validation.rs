//! Range checks for console state and session settings.
//!
//! The level engine does no validation of its own: it assumes the control
//! surface only ever produces values inside their documented ranges. Files
//! on disk make no such promise, so everything loaded from TOML passes
//! through here first.
//!
//! Every problem is reported, not just the first, each with the path of the
//! offending value (array indices are 0-based, as in the TOML arrays):
//!
//! ```rust
//! use edumixer_config::validate_console;
//! use edumixer_core::ConsoleState;
//!
//! let mut state = ConsoleState::default();
//! state.channels[2].pan = 1.5;
//!
//! let err = validate_console(&state).unwrap_err();
//! assert_eq!(err.paths(), vec!["channels[2].pan"]);
//! ```

use edumixer_core::ConsoleState;
use thiserror::Error;

use crate::session::SessionConfig;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Value outside its allowed range.
    #[error("'{path}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Location of the value.
        path: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// NaN or infinite value.
    #[error("'{path}' is not a finite number")]
    NotFinite {
        /// Location of the value.
        path: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Paths of every offending value.
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Self::OutOfRange { path, .. } | Self::NotFinite { path } => vec![path.as_str()],
            Self::Multiple(errors) => errors.iter().flat_map(Self::paths).collect(),
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Collects problems while walking a structure.
#[derive(Debug, Default)]
struct Issues(Vec<ValidationError>);

impl Issues {
    fn check(&mut self, path: impl FnOnce() -> String, value: f32, min: f32, max: f32) {
        if !value.is_finite() {
            self.0.push(ValidationError::NotFinite { path: path() });
        } else if !(min..=max).contains(&value) {
            self.0.push(ValidationError::OutOfRange {
                path: path(),
                value,
                min,
                max,
            });
        }
    }

    fn unit(&mut self, path: impl FnOnce() -> String, value: f32) {
        self.check(path, value, 0.0, 1.0);
    }

    fn finish(mut self) -> ValidationResult<()> {
        match self.0.len() {
            0 => Ok(()),
            1 => Err(self.0.remove(0)),
            _ => Err(ValidationError::Multiple(self.0)),
        }
    }
}

/// Checks every control value against its range.
///
/// Gain, fader, input level and aux sends must be in [0, 1], pan in
/// [-1, 1], subgroup and master faders in [0, 1].
pub fn validate_console(state: &ConsoleState) -> ValidationResult<()> {
    let mut issues = Issues::default();
    for (i, ch) in state.channels.iter().enumerate() {
        issues.unit(|| format!("channels[{i}].gain"), ch.gain);
        issues.check(|| format!("channels[{i}].pan"), ch.pan, -1.0, 1.0);
        issues.unit(|| format!("channels[{i}].fader"), ch.fader);
        issues.unit(|| format!("channels[{i}].input_level"), ch.input_level);
        for (bus, send) in ch.aux.iter().enumerate() {
            issues.unit(|| format!("channels[{i}].aux[{bus}]"), *send);
        }
    }
    for (i, sub) in state.subgroups.iter().enumerate() {
        issues.unit(|| format!("subgroups[{i}].fader"), sub.fader);
    }
    issues.unit(|| "master.fader".to_string(), state.master.fader);
    issues.finish()
}

/// Lowest and highest accepted tick rate in Hz.
pub const TICK_RATE_RANGE: (f32, f32) = (1.0, 1000.0);
/// Lowest and highest accepted sample rate in Hz.
pub const SAMPLE_RATE_RANGE: (u32, u32) = (8_000, 192_000);
/// Smallest and largest accepted buffer size in frames.
pub const BUFFER_SIZE_RANGE: (u32, u32) = (16, 8_192);

/// Checks session timing and synth settings.
///
/// Voice frequencies must sit below the Nyquist frequency of the session
/// sample rate.
pub fn validate_session(session: &SessionConfig) -> ValidationResult<()> {
    let mut issues = Issues::default();
    issues.check(
        || "tick_rate_hz".to_string(),
        session.tick_rate_hz,
        TICK_RATE_RANGE.0,
        TICK_RATE_RANGE.1,
    );
    issues.check(
        || "sample_rate".to_string(),
        session.sample_rate as f32,
        SAMPLE_RATE_RANGE.0 as f32,
        SAMPLE_RATE_RANGE.1 as f32,
    );
    issues.check(
        || "buffer_size".to_string(),
        session.buffer_size as f32,
        BUFFER_SIZE_RANGE.0 as f32,
        BUFFER_SIZE_RANGE.1 as f32,
    );
    issues.unit(|| "synth.headroom".to_string(), session.synth.headroom);
    issues.check(
        || "synth.smoothing_ms".to_string(),
        session.synth.smoothing_ms,
        0.0,
        10_000.0,
    );
    let nyquist = session.sample_rate as f32 / 2.0;
    for (i, voice) in session.synth.voices.iter().enumerate() {
        issues.check(
            || format!("synth.voices[{i}].frequency"),
            voice.frequency,
            1.0,
            nyquist.max(1.0),
        );
    }
    issues.finish()
}
