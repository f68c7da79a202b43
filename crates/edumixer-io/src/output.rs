//! Live output of the reference synth through cpal.

use std::sync::Arc;

use cpal::traits::{DeviceTrait, StreamTrait};
use edumixer_core::{CHANNEL_COUNT, ToneBackend};
use edumixer_synth::{PolySynth, SynthConfig};

use crate::bridge::SynthTargets;
use crate::devices::{device_name, find_output_device};
use crate::{Error, Result};

/// How to open the output stream.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Buffer size in frames.
    pub buffer_size: u32,
    /// Output device name filter (default device if `None`).
    pub device_name: Option<String>,
    /// Voice layout, headroom and glide time.
    pub synth: SynthConfig,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            buffer_size: 512,
            device_name: None,
            synth: SynthConfig::default(),
        }
    }
}

/// The reference synth playing on a real output device.
///
/// The stream is opened on the first [`start`](ToneBackend::start) and kept
/// until the value is dropped. [`suspend`](ToneBackend::suspend) pauses it;
/// the synth inside the callback keeps its voice state. Targets reach the
/// audio thread through [`SynthTargets`] and are picked up once per block.
pub struct StreamedSynth {
    config: OutputConfig,
    targets: Arc<SynthTargets>,
    stream: Option<cpal::Stream>,
}

impl StreamedSynth {
    /// Creates a backend with no stream open yet.
    pub fn new(config: OutputConfig) -> Self {
        Self {
            config,
            targets: Arc::new(SynthTargets::new()),
            stream: None,
        }
    }

    /// Whether a stream has been opened.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Targets shared with the audio thread.
    pub fn targets(&self) -> &Arc<SynthTargets> {
        &self.targets
    }

    fn open(&self) -> Result<cpal::Stream> {
        if self.config.sample_rate == 0 || self.config.buffer_size == 0 {
            return Err(Error::InvalidTiming(format!(
                "sample rate {} / buffer size {}",
                self.config.sample_rate, self.config.buffer_size
            )));
        }

        let host = cpal::default_host();
        let device = find_output_device(&host, self.config.device_name.as_deref())?;
        let name = device_name(&device).unwrap_or_else(|_| "unknown".to_string());

        let stream_config = cpal::StreamConfig {
            channels: 2,
            sample_rate: self.config.sample_rate,
            buffer_size: cpal::BufferSize::Fixed(self.config.buffer_size),
        };

        let mut synth = PolySynth::new(self.config.sample_rate as f32, self.config.synth);
        let targets = Arc::clone(&self.targets);

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    fill_block(&mut synth, &targets, data);
                },
                |err| tracing::warn!(error = %err, "output stream error"),
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        tracing::info!(
            device = %name,
            sample_rate = self.config.sample_rate,
            buffer_size = self.config.buffer_size,
            "output stream opened"
        );
        Ok(stream)
    }
}

/// Audio-thread body: sync targets and power, then render.
fn fill_block(synth: &mut PolySynth, targets: &SynthTargets, data: &mut [f32]) {
    let running = targets.is_running();
    // PolySynth's power transitions cannot fail.
    let _ = if running {
        synth.start()
    } else {
        synth.suspend()
    };
    let (volumes, pans) = targets.load_voices();
    synth.set_channel_parameters(&volumes, &pans);
    synth.set_master_volume(targets.master.get());
    synth.render(data);
}

impl std::fmt::Debug for StreamedSynth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamedSynth")
            .field("config", &self.config)
            .field("open", &self.stream.is_some())
            .finish_non_exhaustive()
    }
}

impl ToneBackend for StreamedSynth {
    type Error = Error;

    fn start(&mut self) -> Result<()> {
        if self.stream.is_none() {
            self.stream = Some(self.open()?);
        }
        self.targets.set_running(true);
        if let Some(stream) = &self.stream {
            stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        }
        tracing::info!("output started");
        Ok(())
    }

    fn suspend(&mut self) -> Result<()> {
        self.targets.set_running(false);
        if let Some(stream) = &self.stream {
            stream.pause().map_err(|e| Error::Stream(e.to_string()))?;
        }
        tracing::info!("output suspended");
        Ok(())
    }

    fn set_channel_parameters(
        &mut self,
        volumes: &[f32; CHANNEL_COUNT],
        pans: &[f32; CHANNEL_COUNT],
    ) {
        self.targets.store_voices(volumes, pans);
    }

    fn set_master_volume(&mut self, volume: f32) {
        self.targets.master.set(volume);
    }
}
