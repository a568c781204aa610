use std::fmt;
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::SAMPLE_RATE;

#[derive(Debug)]
pub enum PlaybackError {
    NoOutputDevice,
    Config(cpal::DefaultStreamConfigError),
    Build(cpal::BuildStreamError),
    Play(cpal::PlayStreamError),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::NoOutputDevice => write!(f, "no default audio output device"),
            PlaybackError::Config(err) => write!(f, "querying output config: {err}"),
            PlaybackError::Build(err) => write!(f, "building output stream: {err}"),
            PlaybackError::Play(err) => write!(f, "starting output stream: {err}"),
        }
    }
}

impl std::error::Error for PlaybackError {}

/// Play a rendered mono buffer on the default output device, blocking
/// until it has finished.
///
/// Samples travel to the audio callback through an SPSC ring buffer that
/// is fully stocked before the stream starts, so the callback never
/// touches the caller's buffer. Once drained the callback emits silence
/// while the tail leaves the device.
pub fn play(samples: &[f32]) -> Result<(), PlaybackError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(PlaybackError::NoOutputDevice)?;
    let config = device
        .default_output_config()
        .map_err(PlaybackError::Config)?;

    let channels = config.channels() as usize;
    let device_rate = config.sample_rate().0;
    if device_rate != SAMPLE_RATE {
        // No resampling here: playback runs at the device rate, so pitch
        // shifts by the ratio of the two rates.
        tracing::warn!(device_rate, engine_rate = SAMPLE_RATE, "sample rate mismatch");
    }

    let (mut producer, mut consumer) = rtrb::RingBuffer::<f32>::new(samples.len().max(1));
    for &sample in samples {
        let _ = producer.push(sample);
    }

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                for frame in data.chunks_mut(channels) {
                    let sample = consumer.pop().unwrap_or(0.0);
                    for slot in frame {
                        *slot = sample;
                    }
                }
            },
            |err| tracing::warn!("playback stream error: {err}"),
            None,
        )
        .map_err(PlaybackError::Build)?;

    stream.play().map_err(PlaybackError::Play)?;

    let seconds = samples.len() as f64 / device_rate as f64;
    thread::sleep(Duration::from_secs_f64(seconds + 0.25));

    Ok(())
}
