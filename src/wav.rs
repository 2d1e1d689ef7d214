//! WAV encoder: peak normalization to 16-bit PCM and mono RIFF/WAVE output.

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use serde::Serialize;

use crate::error::SfxError;

pub const CHANNELS: u16 = 1;
pub const BITS_PER_SAMPLE: u16 = 16;
/// Size of the canonical header written by [`encode_wav`].
pub const HEADER_LEN: usize = 44;

/// Scale `samples` so the largest magnitude lands on `32767 · headroom`,
/// then round to i16.
///
/// A silent (or non-finite) peak divides by 1 instead, so silence stays
/// silent. Non-finite samples encode as 0.
pub fn normalize_to_pcm(samples: &[f64], headroom: f64) -> Vec<i16> {
    let peak = samples
        .iter()
        .filter(|s| s.is_finite())
        .fold(0.0_f64, |acc, s| acc.max(s.abs()));
    let peak = if peak > 0.0 { peak } else { 1.0 };
    let scale = i16::MAX as f64 * headroom / peak;
    samples
        .iter()
        .map(|&s| {
            if !s.is_finite() {
                return 0;
            }
            (s * scale)
                .round()
                .clamp(-(i16::MAX as f64), i16::MAX as f64) as i16
        })
        .collect()
}

fn spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

/// Stream `samples` through `writer` and patch the chunk sizes.
fn write_pcm<W: Write + Seek>(mut writer: WavWriter<W>, samples: &[i16]) -> Result<(), hound::Error> {
    let mut pcm = writer.get_i16_writer(samples.len() as u32);
    for &sample in samples {
        pcm.write_sample(sample);
    }
    pcm.flush()?;
    writer.finalize()
}

/// Encode mono i16 PCM to a canonical 44-byte-header WAV byte buffer.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, SfxError> {
    let mut out = Cursor::new(Vec::with_capacity(HEADER_LEN + samples.len() * 2));
    let writer = WavWriter::new(&mut out, spec(sample_rate)).map_err(SfxError::Encode)?;
    write_pcm(writer, samples).map_err(SfxError::Encode)?;
    Ok(out.into_inner())
}

/// Write mono i16 PCM to `path`, creating or overwriting it.
///
/// The parent directory must already exist.
pub fn write_wav(path: &Path, samples: &[i16], sample_rate: u32) -> Result<(), SfxError> {
    let writer = WavWriter::create(path, spec(sample_rate)).map_err(|e| SfxError::wav(path, e))?;
    write_pcm(writer, samples).map_err(|e| SfxError::wav(path, e))
}

/// Header fields of a WAV file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WavInfo {
    pub channels: u16,
    pub bits_per_sample: u16,
    pub sample_rate: u32,
    /// Samples per channel.
    pub frames: u32,
}

pub fn read_wav_info(path: &Path) -> Result<WavInfo, SfxError> {
    let reader = WavReader::open(path).map_err(|e| SfxError::wav(path, e))?;
    let spec = reader.spec();
    Ok(WavInfo {
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        sample_rate: spec.sample_rate,
        frames: reader.duration(),
    })
}

/// Read every sample of a 16-bit WAV file.
pub fn read_wav_samples(path: &Path) -> Result<Vec<i16>, SfxError> {
    let mut reader = WavReader::open(path).map_err(|e| SfxError::wav(path, e))?;
    reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SfxError::wav(path, e))
}
