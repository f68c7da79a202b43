//! Lock-free hand-off of synth targets to the audio thread.
//!
//! The tick thread stores, the audio callback loads once per block. Each
//! value is an `f32` bit-cast into an `AtomicU32`, so neither side ever
//! blocks.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use edumixer_core::CHANNEL_COUNT;

/// An `f32` shared between threads, clamped to a fixed range on store.
#[derive(Debug)]
pub struct AtomicParam {
    value: AtomicU32,
    min: f32,
    max: f32,
    default: f32,
}

impl AtomicParam {
    /// Creates a parameter holding `default`.
    pub fn new(default: f32, min: f32, max: f32) -> Self {
        Self {
            value: AtomicU32::new(default.to_bits()),
            min,
            max,
            default,
        }
    }

    /// Stores `v` clamped to range. NaN stores the default instead.
    #[inline]
    pub fn set(&self, v: f32) {
        let v = if v.is_nan() {
            self.default
        } else {
            v.clamp(self.min, self.max)
        };
        self.value.store(v.to_bits(), Ordering::Release);
    }

    /// Loads the current value.
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.value.load(Ordering::Acquire))
    }

    /// Restores the default.
    pub fn reset(&self) {
        self.set(self.default);
    }
}

/// Everything the audio callback needs from the tick thread.
#[derive(Debug)]
pub struct SynthTargets {
    /// Voice volume per channel, `[0, 8]`.
    pub volumes: [AtomicParam; CHANNEL_COUNT],
    /// Voice pan per channel, `[-1, 1]`.
    pub pans: [AtomicParam; CHANNEL_COUNT],
    /// Master volume, `[0, 1]`.
    pub master: AtomicParam,
    running: AtomicBool,
}

impl SynthTargets {
    /// Upper bound for a voice volume: a channel fed to main and both
    /// subgroup pairs can reach a little over 4.
    pub const MAX_VOLUME: f32 = 8.0;

    /// Creates silent, centred, stopped targets.
    pub fn new() -> Self {
        Self {
            volumes: std::array::from_fn(|_| AtomicParam::new(0.0, 0.0, Self::MAX_VOLUME)),
            pans: std::array::from_fn(|_| AtomicParam::new(0.0, -1.0, 1.0)),
            master: AtomicParam::new(0.0, 0.0, 1.0),
            running: AtomicBool::new(false),
        }
    }

    /// Stores a full set of voice targets.
    pub fn store_voices(&self, volumes: &[f32; CHANNEL_COUNT], pans: &[f32; CHANNEL_COUNT]) {
        for (param, v) in self.volumes.iter().zip(volumes) {
            param.set(*v);
        }
        for (param, p) in self.pans.iter().zip(pans) {
            param.set(*p);
        }
    }

    /// Loads every voice target.
    pub fn load_voices(&self) -> ([f32; CHANNEL_COUNT], [f32; CHANNEL_COUNT]) {
        (
            std::array::from_fn(|i| self.volumes[i].get()),
            std::array::from_fn(|i| self.pans[i].get()),
        )
    }

    /// Whether the synth should be producing sound.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Sets whether the synth should be producing sound.
    #[inline]
    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Release);
    }
}

impl Default for SynthTargets {
    fn default() -> Self {
        Self::new()
    }
}
