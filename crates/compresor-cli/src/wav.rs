//! WAV file reading and writing.
//!
//! Files are read into planar [`AudioBuffer`]s with every channel kept,
//! since the engine's detector averages across channels. Interleaving
//! happens only at the file boundary.

use compresor_core::AudioBuffer;
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Error types for WAV I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file header declares zero channels.
    #[error("WAV file has no channels")]
    NoChannels,
}

/// Convenience result type for WAV I/O.
pub type Result<T> = std::result::Result<T, Error>;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(Error::NoChannels);
    }
    let total_samples = reader.len() as u64; // total across all channels
    let num_frames = total_samples / u64::from(spec.channels);
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file into a planar buffer, all channels kept, along with
/// the spec.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(AudioBuffer, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    if spec.channels == 0 {
        return Err(Error::NoChannels);
    }
    let channels = spec.channels as usize;

    let interleaved: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            let max_val = (1i32 << (bits - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    Ok((AudioBuffer::from_interleaved(channels, &interleaved), spec))
}

/// Write a planar buffer to a WAV file.
///
/// The channel count comes from the buffer; `spec.channels` is ignored.
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &AudioBuffer, spec: WavSpec) -> Result<()> {
    let mut out_spec = spec;
    out_spec.channels = u16::try_from(buffer.channels()).unwrap_or(u16::MAX);

    let hound_spec = hound::WavSpec::from(out_spec);
    let mut writer = WavWriter::create(path, hound_spec)?;

    let interleaved = buffer.to_interleaved();
    if out_spec.bits_per_sample == 32 {
        for &sample in &interleaved {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i32 << (out_spec.bits_per_sample - 1)) as f32;
        for &sample in &interleaved {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}
