//! One tone voice: an oscillator with a smoothed gain and pan.

use edumixer_core::{SmoothedParam, StereoLevel, constant_power_gains};

use crate::oscillator::{Oscillator, Waveform};

/// Frequency and waveform of a voice.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoiceSpec {
    /// Pitch in Hz.
    pub frequency: f32,
    /// Oscillator shape.
    pub waveform: Waveform,
}

impl VoiceSpec {
    /// Creates a spec.
    pub const fn new(frequency: f32, waveform: Waveform) -> Self {
        Self {
            frequency,
            waveform,
        }
    }
}

/// A voice as the synth renders it.
#[derive(Debug, Clone)]
pub struct ToneVoice {
    oscillator: Oscillator,
    gain: SmoothedParam,
    pan: SmoothedParam,
}

impl ToneVoice {
    /// Creates a silent, centred voice.
    pub fn new(spec: VoiceSpec, sample_rate: f32, smoothing_ms: f32) -> Self {
        Self {
            oscillator: Oscillator::new(sample_rate, spec.frequency, spec.waveform),
            gain: SmoothedParam::with_config(0.0, sample_rate, smoothing_ms),
            pan: SmoothedParam::with_config(0.0, sample_rate, smoothing_ms),
        }
    }

    /// Sets the gain to glide to.
    #[inline]
    pub fn set_gain(&mut self, gain: f32) {
        self.gain.set_target(gain);
    }

    /// Sets the pan position to glide to, clamped to [-1, 1].
    #[inline]
    pub fn set_pan(&mut self, pan: f32) {
        self.pan.set_target(pan.clamp(-1.0, 1.0));
    }

    /// Current smoothed gain.
    pub fn gain(&self) -> f32 {
        self.gain.get()
    }

    /// Current smoothed pan.
    pub fn pan(&self) -> f32 {
        self.pan.get()
    }

    /// Oscillator frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.oscillator.frequency()
    }

    /// Oscillator waveform.
    pub fn waveform(&self) -> Waveform {
        self.oscillator.waveform()
    }

    /// Renders one stereo frame and advances every glide by one sample.
    #[inline]
    pub fn advance(&mut self) -> StereoLevel {
        let sample = self.oscillator.advance() * self.gain.advance();
        let (left, right) = constant_power_gains(self.pan.advance());
        StereoLevel::new(sample * left, sample * right)
    }

    /// Jumps every glide to its target.
    pub fn settle(&mut self) {
        self.gain.snap_to_target();
        self.pan.snap_to_target();
    }

    /// Rebuilds timing for a new sample rate, keeping targets.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.oscillator.set_sample_rate(sample_rate);
        self.gain.set_sample_rate(sample_rate);
        self.pan.set_sample_rate(sample_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_voice_is_silent() {
        let mut voice = ToneVoice::new(VoiceSpec::new(220.0, Waveform::Sine), 48_000.0, 50.0);
        for _ in 0..64 {
            assert_eq!(voice.advance(), StereoLevel::SILENT);
        }
    }

    #[test]
    fn hard_right_voice_only_reaches_right() {
        let mut voice = ToneVoice::new(VoiceSpec::new(220.0, Waveform::Square), 48_000.0, 0.0);
        voice.set_gain(0.5);
        voice.set_pan(1.0);
        let mut peak_right = 0.0f32;
        for _ in 0..480 {
            let frame = voice.advance();
            assert!(frame.left.abs() < 1e-6);
            peak_right = peak_right.max(frame.right.abs());
        }
        assert!((peak_right - 0.5).abs() < 1e-3);
    }

    #[test]
    fn pan_target_is_clamped() {
        let mut voice = ToneVoice::new(VoiceSpec::new(220.0, Waveform::Sine), 48_000.0, 50.0);
        voice.set_pan(3.0);
        voice.settle();
        assert_eq!(voice.pan(), 1.0);
    }
}
