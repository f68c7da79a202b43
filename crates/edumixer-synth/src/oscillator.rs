//! Audio-rate tone oscillator.
//!
//! Sine and triangle are the classroom voices; saw and square are available
//! for custom session configs and use a 2nd-order PolyBLEP at their steps.

use core::f32::consts::TAU;
use libm::{fabsf, sinf};

/// Oscillator waveform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Waveform {
    /// Pure fundamental.
    #[default]
    Sine,
    /// Odd harmonics falling at 12 dB/octave.
    Triangle,
    /// All harmonics.
    Saw,
    /// Odd harmonics, 50% duty.
    Square,
}

impl Waveform {
    /// Every waveform, in declaration order.
    pub const ALL: [Self; 4] = [Self::Sine, Self::Triangle, Self::Saw, Self::Square];

    /// Lower-case name used in config files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sine => "sine",
            Self::Triangle => "triangle",
            Self::Saw => "saw",
            Self::Square => "square",
        }
    }
}

/// Phase-accumulator oscillator with a fixed frequency.
///
/// ```rust
/// use edumixer_synth::{Oscillator, Waveform};
///
/// let mut osc = Oscillator::new(48_000.0, 130.81, Waveform::Triangle);
/// let first = osc.advance();
/// assert!(first.abs() <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Oscillator {
    /// Position in the cycle, [0, 1).
    phase: f32,
    phase_inc: f32,
    sample_rate: f32,
    frequency: f32,
    waveform: Waveform,
}

impl Oscillator {
    /// Creates an oscillator at phase 0.
    pub fn new(sample_rate: f32, frequency: f32, waveform: Waveform) -> Self {
        let mut osc = Self {
            phase: 0.0,
            phase_inc: 0.0,
            sample_rate,
            frequency: 0.0,
            waveform,
        };
        osc.set_frequency(frequency);
        osc
    }

    /// Sets the frequency in Hz. Negative values are treated as 0.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.frequency = freq_hz.max(0.0);
        self.phase_inc = if self.sample_rate > 0.0 {
            self.frequency / self.sample_rate
        } else {
            0.0
        };
    }

    /// Frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Sets the sample rate and keeps the frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.set_frequency(self.frequency);
    }

    /// Waveform in use.
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Changes the waveform without resetting phase.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// Current phase in [0, 1).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Returns to phase 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Produces the next sample in [-1, 1] and steps the phase.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let out = self.sample_at(self.phase);
        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        out
    }

    #[inline]
    fn sample_at(&self, phase: f32) -> f32 {
        let dt = self.phase_inc;
        match self.waveform {
            Waveform::Sine => sinf(phase * TAU),
            // Starts at 0 and rises, like the sine.
            Waveform::Triangle => {
                let shifted = phase + 0.25;
                let shifted = if shifted >= 1.0 { shifted - 1.0 } else { shifted };
                1.0 - 4.0 * fabsf(shifted - 0.5)
            }
            Waveform::Saw => 2.0 * phase - 1.0 - poly_blep(phase, dt),
            Waveform::Square => {
                let naive = if phase < 0.5 { 1.0 } else { -1.0 };
                let falling = if phase >= 0.5 { phase - 0.5 } else { phase + 0.5 };
                naive + poly_blep(phase, dt) - poly_blep(falling, dt)
            }
        }
    }
}

/// 2nd-order PolyBLEP residual for a unit step at phase 0.
#[inline]
fn poly_blep(t: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        0.0
    } else if t < dt {
        let x = t / dt;
        x + x - x * x - 1.0
    } else if t > 1.0 - dt {
        let x = (t - 1.0) / dt;
        x * x + x + x + 1.0
    } else {
        0.0
    }
}
