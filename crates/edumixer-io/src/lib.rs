//! Audio I/O layer for the edumixer console.
//!
//! This crate provides:
//!
//! - **Live output**: [`StreamedSynth`], a [`ToneBackend`](edumixer_core::ToneBackend)
//!   that plays the reference synth through the default (or a named) cpal
//!   output device
//! - **Tick driver**: [`Ticker`], a host-side periodic callback on its own
//!   thread, released on [`Ticker::stop`] or drop
//! - **Offline rendering**: [`render_offline`] and [`write_wav_stereo`]
//! - **Device listing**: [`list_output_devices`]
//!
//! ## Quick Start
//!
//! An open output stream stays on the thread that opened it, so the
//! scheduler lives there and the ticker only paces it:
//!
//! ```rust,ignore
//! use std::ops::ControlFlow;
//! use std::sync::mpsc;
//!
//! use edumixer_core::{ConsoleState, Scheduler};
//! use edumixer_io::{OutputConfig, StreamedSynth, Ticker};
//!
//! let mut scheduler = Scheduler::new(StreamedSynth::new(OutputConfig::default()));
//! scheduler.power_on()?;
//!
//! let (tx, rx) = mpsc::channel();
//! let ticker = Ticker::start(60.0, move |elapsed| match tx.send(elapsed) {
//!     Ok(()) => ControlFlow::Continue(()),
//!     Err(_) => ControlFlow::Break(()),
//! })?;
//!
//! let state = ConsoleState::default();
//! for _ in rx.iter().take(600) {
//!     scheduler.tick(&state);
//! }
//! ticker.stop();
//! scheduler.power_off()?;
//! ```

mod bridge;
mod devices;
mod offline;
mod output;
mod ticker;
mod wav;

pub use bridge::{AtomicParam, SynthTargets};
pub use devices::{OutputDevice, default_output_device, find_output_device, list_output_devices};
pub use offline::{OfflineRender, render_offline};
pub use output::{OutputConfig, StreamedSynth};
pub use ticker::Ticker;
pub use wav::{read_wav_stereo, write_wav_stereo};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// A rate, duration or size that cannot drive a stream or ticker.
    #[error("Invalid timing: {0}")]
    InvalidTiming(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
