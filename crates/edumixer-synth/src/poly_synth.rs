//! Four-voice reference backend.
//!
//! [`PolySynth`] gives every console channel a fixed, distinguishable pitch
//! (a C major seventh spread across C3, E3, G3, B3) so students can hear
//! which channel is where in the stereo image. Each voice's gain target is
//! `volume × headroom`; the master gain target is the master volume. All
//! targets glide with the configured time constant.

use core::convert::Infallible;

use edumixer_core::{CHANNEL_COUNT, SmoothedParam, StereoLevel, ToneBackend};

use crate::oscillator::Waveform;
use crate::voice::{ToneVoice, VoiceSpec};

/// Voice pitches and shapes of the classroom synth.
pub const CLASSROOM_VOICES: [VoiceSpec; CHANNEL_COUNT] = [
    VoiceSpec::new(130.81, Waveform::Sine),
    VoiceSpec::new(164.81, Waveform::Triangle),
    VoiceSpec::new(196.00, Waveform::Sine),
    VoiceSpec::new(246.94, Waveform::Triangle),
];

/// Per-voice scale that keeps four summed voices below clipping.
pub const DEFAULT_HEADROOM: f32 = 0.15;

/// One-pole time constant for every gain and pan glide.
pub const DEFAULT_SMOOTHING_MS: f32 = 50.0;

/// Construction parameters for [`PolySynth`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SynthConfig {
    /// Scale applied to every voice volume.
    pub headroom: f32,
    /// Glide time constant in milliseconds.
    pub smoothing_ms: f32,
    /// Voice per console channel.
    pub voices: [VoiceSpec; CHANNEL_COUNT],
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            headroom: DEFAULT_HEADROOM,
            smoothing_ms: DEFAULT_SMOOTHING_MS,
            voices: CLASSROOM_VOICES,
        }
    }
}

/// The reference tone backend.
///
/// Rendering is pull-based: the caller (an audio callback or an offline
/// renderer) asks for frames with [`render`](Self::render). While suspended
/// the synth writes silence and voices do not advance, so resuming picks up
/// where it left off.
///
/// ```rust
/// use edumixer_core::ToneBackend;
/// use edumixer_synth::{PolySynth, SynthConfig};
///
/// let mut synth = PolySynth::new(48_000.0, SynthConfig::default());
/// synth.start().unwrap();
/// synth.set_channel_parameters(&[1.0, 0.0, 0.0, 0.0], &[0.0; 4]);
/// synth.set_master_volume(1.0);
///
/// let mut buffer = [0.0f32; 2 * 4_800];
/// synth.render(&mut buffer);
/// assert!(buffer.iter().any(|s| *s != 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct PolySynth {
    voices: [ToneVoice; CHANNEL_COUNT],
    master: SmoothedParam,
    headroom: f32,
    sample_rate: f32,
    running: bool,
}

impl PolySynth {
    /// Creates a suspended synth with every gain at zero.
    pub fn new(sample_rate: f32, config: SynthConfig) -> Self {
        Self {
            voices: config
                .voices
                .map(|spec| ToneVoice::new(spec, sample_rate, config.smoothing_ms)),
            master: SmoothedParam::with_config(0.0, sample_rate, config.smoothing_ms),
            headroom: config.headroom,
            sample_rate,
            running: false,
        }
    }

    /// Whether the synth is producing sound.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Rebuilds glide and oscillator timing for a new sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.master.set_sample_rate(sample_rate);
        for voice in &mut self.voices {
            voice.set_sample_rate(sample_rate);
        }
    }

    /// Voice for channel index `index` (0-based).
    pub fn voice(&self, index: usize) -> Option<&ToneVoice> {
        self.voices.get(index)
    }

    /// Current smoothed master gain.
    pub fn master_gain(&self) -> f32 {
        self.master.get()
    }

    /// Jumps every glide to its target.
    pub fn settle(&mut self) {
        self.master.snap_to_target();
        for voice in &mut self.voices {
            voice.settle();
        }
    }

    /// Renders one stereo frame.
    #[inline]
    pub fn next_frame(&mut self) -> StereoLevel {
        if !self.running {
            return StereoLevel::SILENT;
        }
        let mut mix = StereoLevel::SILENT;
        for voice in &mut self.voices {
            mix += voice.advance();
        }
        mix.scaled(self.master.advance())
    }

    /// Fills `buffer` with interleaved stereo frames.
    ///
    /// A trailing odd sample is zeroed.
    pub fn render(&mut self, buffer: &mut [f32]) {
        let mut frames = buffer.chunks_exact_mut(2);
        for frame in &mut frames {
            let out = self.next_frame();
            frame[0] = out.left;
            frame[1] = out.right;
        }
        for sample in frames.into_remainder() {
            *sample = 0.0;
        }
    }
}

impl ToneBackend for PolySynth {
    type Error = Infallible;

    fn start(&mut self) -> Result<(), Self::Error> {
        self.running = true;
        Ok(())
    }

    fn suspend(&mut self) -> Result<(), Self::Error> {
        self.running = false;
        Ok(())
    }

    fn set_channel_parameters(
        &mut self,
        volumes: &[f32; CHANNEL_COUNT],
        pans: &[f32; CHANNEL_COUNT],
    ) {
        for ((voice, volume), pan) in self.voices.iter_mut().zip(volumes).zip(pans) {
            voice.set_gain(volume * self.headroom);
            voice.set_pan(*pan);
        }
    }

    fn set_master_volume(&mut self, volume: f32) {
        self.master.set_target(volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_synth() -> PolySynth {
        let mut synth = PolySynth::new(48_000.0, SynthConfig::default());
        synth.start().unwrap();
        synth
    }

    #[test]
    fn classroom_layout() {
        let synth = PolySynth::new(48_000.0, SynthConfig::default());
        let freqs: Vec<f32> = (0..4).map(|i| synth.voice(i).unwrap().frequency()).collect();
        assert_eq!(freqs, vec![130.81, 164.81, 196.0, 246.94]);
        assert_eq!(synth.voice(1).unwrap().waveform(), Waveform::Triangle);
        assert!(!synth.is_running());
    }

    #[test]
    fn suspended_synth_writes_silence() {
        let mut synth = PolySynth::new(48_000.0, SynthConfig::default());
        synth.set_channel_parameters(&[1.0; 4], &[0.0; 4]);
        synth.set_master_volume(1.0);
        synth.settle();
        let mut buf = [1.0f32; 256];
        synth.render(&mut buf);
        assert!(buf.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn headroom_scales_voice_gain() {
        let mut synth = running_synth();
        synth.set_channel_parameters(&[2.0, 0.0, 0.0, 0.0], &[0.0; 4]);
        synth.settle();
        assert!((synth.voice(0).unwrap().gain() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn gains_glide_instead_of_jumping() {
        let mut synth = running_synth();
        synth.set_channel_parameters(&[1.0; 4], &[0.0; 4]);
        synth.set_master_volume(1.0);
        synth.next_frame();
        assert!(synth.master_gain() < 0.01);
        // 50 ms at 48 kHz is one time constant.
        for _ in 0..2_400 {
            synth.next_frame();
        }
        assert!((synth.master_gain() - 0.632).abs() < 0.01);
    }

    #[test]
    fn suspend_preserves_voice_state() {
        let mut synth = running_synth();
        synth.set_channel_parameters(&[1.0; 4], &[0.0; 4]);
        synth.set_master_volume(1.0);
        for _ in 0..100 {
            synth.next_frame();
        }
        let gain = synth.master_gain();
        synth.suspend().unwrap();
        for _ in 0..100 {
            assert_eq!(synth.next_frame(), StereoLevel::SILENT);
        }
        assert_eq!(synth.master_gain(), gain);
    }

    #[test]
    fn full_mix_stays_below_clipping() {
        let mut synth = running_synth();
        synth.set_channel_parameters(&[1.0; 4], &[-1.0, -1.0, -1.0, -1.0]);
        synth.set_master_volume(1.0);
        synth.settle();
        let mut buf = vec![0.0f32; 2 * 48_000];
        synth.render(&mut buf);
        let peak = buf.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak > 0.1 && peak <= 0.6 + 1e-3, "peak {peak}");
    }

    #[test]
    fn odd_buffer_tail_is_zeroed() {
        let mut synth = running_synth();
        let mut buf = [9.0f32; 5];
        synth.render(&mut buf);
        assert_eq!(buf[4], 0.0);
    }
}
