//! Faster-than-real-time rendering of a console session.
//!
//! The scheduler ticks at the configured rate in simulated time: after each
//! tick the synth renders exactly the frames that fall before the next tick.
//! The result matches what a live session with the same tick rate would
//! have produced, minus device jitter.

use edumixer_core::{ConsoleState, LevelSnapshot, Scheduler};
use edumixer_synth::PolySynth;

use crate::{Error, Result};

/// Output of [`render_offline`].
#[derive(Debug, Clone)]
pub struct OfflineRender {
    /// Interleaved stereo samples.
    pub samples: Vec<f32>,
    /// Sample rate of `samples`.
    pub sample_rate: u32,
    /// Ticks run.
    pub ticks: u64,
    /// Snapshot from the last tick.
    pub last_levels: LevelSnapshot,
    /// Largest absolute sample.
    pub peak: f32,
}

/// Renders `seconds` of audio from `scheduler` with `state` held fixed.
///
/// The scheduler is not powered on or off here; a muted scheduler renders
/// silence.
pub fn render_offline(
    scheduler: &mut Scheduler<PolySynth>,
    state: &ConsoleState,
    seconds: f32,
    tick_rate_hz: f32,
) -> Result<OfflineRender> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(Error::InvalidTiming(format!("duration {seconds} s")));
    }
    if !tick_rate_hz.is_finite() || tick_rate_hz <= 0.0 {
        return Err(Error::InvalidTiming(format!("tick rate {tick_rate_hz} Hz")));
    }
    let sample_rate = scheduler.backend().sample_rate();
    if sample_rate < 1.0 {
        return Err(Error::InvalidTiming(format!("sample rate {sample_rate} Hz")));
    }

    let total_frames = (f64::from(seconds) * f64::from(sample_rate)).round() as usize;
    let frames_per_tick = f64::from(sample_rate) / f64::from(tick_rate_hz);
    let mut samples = vec![0.0f32; total_frames * 2];

    let mut rendered = 0usize;
    let mut ticks = 0u64;
    while rendered < total_frames {
        scheduler.tick(state);
        ticks += 1;
        // Tick boundaries fall on fractional frame positions; round each one
        // so drift never accumulates.
        let boundary = ((ticks as f64 * frames_per_tick).round() as usize).min(total_frames);
        if boundary > rendered {
            scheduler
                .backend_mut()
                .render(&mut samples[rendered * 2..boundary * 2]);
            rendered = boundary;
        }
    }

    let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    tracing::debug!(frames = total_frames, ticks, peak, "offline render finished");
    Ok(OfflineRender {
        samples,
        sample_rate: sample_rate as u32,
        ticks,
        last_levels: *scheduler.latest(),
        peak,
    })
}
