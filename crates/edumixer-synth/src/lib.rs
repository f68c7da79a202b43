//! Edumixer Synth - reference tone backend for the edumixer console
//!
//! One oscillator voice per console channel, each with a smoothed gain and
//! constant-power pan, summed through a smoothed master gain.
//!
//! - [`PolySynth`] - the backend, implementing [`edumixer_core::ToneBackend`]
//! - [`SynthConfig`] - headroom, glide time and voice layout
//! - [`Oscillator`] / [`Waveform`] - the tone source
//! - [`ToneVoice`] / [`VoiceSpec`] - a single voice
//!
//! ```rust
//! use edumixer_core::{ChannelId, ConsoleState, Scheduler};
//! use edumixer_synth::{PolySynth, SynthConfig};
//!
//! let mut scheduler = Scheduler::new(PolySynth::new(48_000.0, SynthConfig::default()));
//! let mut state = ConsoleState::default();
//! state.channel_mut(ChannelId::new(1).unwrap()).gain = 1.0;
//!
//! scheduler.power_on().unwrap();
//! scheduler.tick(&state);
//!
//! let mut block = [0.0f32; 1024];
//! scheduler.backend_mut().render(&mut block);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod oscillator;
pub mod poly_synth;
pub mod voice;

pub use oscillator::{Oscillator, Waveform};
pub use poly_synth::{
    CLASSROOM_VOICES, DEFAULT_HEADROOM, DEFAULT_SMOOTHING_MS, PolySynth, SynthConfig,
};
pub use voice::{ToneVoice, VoiceSpec};
