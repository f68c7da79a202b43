//! Stereo WAV writing and reading.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::{Error, Result};

fn stereo_float_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

/// Writes interleaved stereo samples as a 32-bit float WAV file.
///
/// A trailing odd sample is dropped.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    interleaved: &[f32],
    sample_rate: u32,
) -> Result<()> {
    if sample_rate == 0 {
        return Err(Error::InvalidTiming("sample rate 0".into()));
    }
    let mut writer = WavWriter::create(path, stereo_float_spec(sample_rate))?;
    for frame in interleaved.chunks_exact(2) {
        writer.write_sample(frame[0])?;
        writer.write_sample(frame[1])?;
    }
    writer.finalize()?;
    Ok(())
}

/// Reads a stereo WAV file back as interleaved `f32` plus its sample rate.
///
/// Integer files are scaled to [-1, 1]. Mono files are duplicated to both
/// sides.
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32)> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = 1.0 / (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let interleaved = match spec.channels {
        1 => samples.iter().flat_map(|s| [*s, *s]).collect(),
        2 => samples,
        n => {
            let n = usize::from(n);
            samples
                .chunks_exact(n)
                .flat_map(|frame| [frame[0], frame[1]])
                .collect()
        }
    };
    Ok((interleaved, spec.sample_rate))
}
