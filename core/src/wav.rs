//! WAV container adapter
//!
//! The modem exchanges audio as a RIFF/WAVE buffer holding mono, 16-bit
//! signed little-endian PCM. Anything else is rejected with
//! [`ModemError::ContainerFormat`]; partially readable headers are never
//! salvaged.

use crate::error::{ModemError, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::Cursor;

/// PCM samples read from a container together with their sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct PcmAudio {
    pub sample_rate: u32,
    pub samples: Vec<i16>,
}

/// Container sample rates accepted by [`read_wav`]. Anything outside this
/// band would blow up on resampling to the profile rate.
pub const MIN_SAMPLE_RATE: u32 = 8_000;
pub const MAX_SAMPLE_RATE: u32 = 192_000;

fn pcm_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Serialize samples as a mono 16-bit WAV buffer.
pub fn write_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, pcm_spec(sample_rate))?;
        for &sample in samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Parse a mono 16-bit WAV buffer.
pub fn read_wav(bytes: &[u8]) -> Result<PcmAudio> {
    let reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(ModemError::ContainerFormat(format!(
            "expected mono audio, found {} channels",
            spec.channels
        )));
    }
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(ModemError::ContainerFormat(format!(
            "expected 16-bit integer PCM, found {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }
    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&spec.sample_rate) {
        return Err(ModemError::ContainerFormat(format!(
            "sample rate {} Hz outside [{}, {}] Hz",
            spec.sample_rate, MIN_SAMPLE_RATE, MAX_SAMPLE_RATE
        )));
    }

    let samples = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    log::debug!(
        "Read WAV container: {} samples at {} Hz",
        samples.len(),
        spec.sample_rate
    );

    Ok(PcmAudio {
        sample_rate: spec.sample_rate,
        samples,
    })
}
