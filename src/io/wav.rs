use std::fmt;
use std::path::Path;

use crate::SAMPLE_RATE;

/// Decoded WAV contents: interleaved f32 samples plus the layout needed to
/// interpret them.
#[derive(Debug, Clone)]
pub struct WavData {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

#[derive(Debug)]
pub enum WavError {
    /// Sample format the reader does not handle (e.g. 24-bit PCM).
    UnsupportedFormat(String),
    Hound(hound::Error),
}

impl fmt::Display for WavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WavError::UnsupportedFormat(what) => write!(f, "unsupported wav format: {what}"),
            WavError::Hound(err) => write!(f, "wav codec error: {err}"),
        }
    }
}

impl std::error::Error for WavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WavError::Hound(err) => Some(err),
            _ => None,
        }
    }
}

impl From<hound::Error> for WavError {
    fn from(err: hound::Error) -> Self {
        WavError::Hound(err)
    }
}

/// Write interleaved f32 samples as a 32-bit float WAV at [`SAMPLE_RATE`].
pub fn write_wav(
    path: impl AsRef<Path>,
    samples: &[f32],
    channels: u16,
) -> Result<(), WavError> {
    let spec = hound::WavSpec {
        channels,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Read a WAV file into interleaved f32 samples.
///
/// Handles 16-bit integer and 32-bit float sources; integers are scaled
/// into [-1, 1).
pub fn read_wav(path: impl AsRef<Path>) -> Result<WavData, WavError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, 32) => {
            reader.samples::<f32>().collect::<Result<_, _>>()?
        }
        (hound::SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|s| s as f32 / 32_768.0))
            .collect::<Result<_, _>>()?,
        (format, bits) => {
            return Err(WavError::UnsupportedFormat(format!("{format:?}/{bits}-bit")))
        }
    };

    Ok(WavData {
        samples,
        channels: spec.channels,
        sample_rate: spec.sample_rate,
    })
}
