//! Tone-generation backend contract.
//!
//! The scheduler forwards mapped parameters to a [`ToneBackend`] once per
//! tick while the console is powered. Backends may smooth the targets they
//! receive; the scheduler never waits for them to settle.

use crate::console::CHANNEL_COUNT;
use crate::mapper::BackendParameters;

/// A sound source with one voice per console channel.
///
/// Power transitions can fail on real devices and report through
/// [`Self::Error`]. Parameter updates are plain stores and cannot fail.
pub trait ToneBackend {
    /// Error raised by [`start`](Self::start) or [`suspend`](Self::suspend).
    type Error;

    /// Begins producing sound. Calling it while already started must be
    /// harmless.
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Stops producing sound, keeping voice state for a later `start`.
    fn suspend(&mut self) -> Result<(), Self::Error>;

    /// Sets per-voice volume and pan targets.
    fn set_channel_parameters(
        &mut self,
        volumes: &[f32; CHANNEL_COUNT],
        pans: &[f32; CHANNEL_COUNT],
    );

    /// Sets the master volume target.
    fn set_master_volume(&mut self, volume: f32);

    /// Forwards one tick's worth of mapped parameters.
    fn apply(&mut self, params: &BackendParameters) {
        self.set_channel_parameters(&params.volumes, &params.pans);
        self.set_master_volume(params.master_volume);
    }
}

impl<B: ToneBackend + ?Sized> ToneBackend for &mut B {
    type Error = B::Error;

    fn start(&mut self) -> Result<(), Self::Error> {
        (**self).start()
    }

    fn suspend(&mut self) -> Result<(), Self::Error> {
        (**self).suspend()
    }

    fn set_channel_parameters(
        &mut self,
        volumes: &[f32; CHANNEL_COUNT],
        pans: &[f32; CHANNEL_COUNT],
    ) {
        (**self).set_channel_parameters(volumes, pans);
    }

    fn set_master_volume(&mut self, volume: f32) {
        (**self).set_master_volume(volume);
    }
}

/// A backend that discards everything, for meter-only use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl ToneBackend for NullBackend {
    type Error = core::convert::Infallible;

    fn start(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn suspend(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_channel_parameters(&mut self, _: &[f32; CHANNEL_COUNT], _: &[f32; CHANNEL_COUNT]) {}

    fn set_master_volume(&mut self, _: f32) {}
}
