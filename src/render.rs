//! Offline renderer: pulls a finite composition into a flat sample buffer.
//!
//! This is the single consumer the graph is built for. It walks output
//! indices `0..duration * SAMPLE_RATE`, computes `time = index / rate`,
//! and queries the root exactly once per index in increasing order - the
//! access pattern the stateful plucked-string generator requires.

use std::fmt;

use crate::graph::node::SignalNode;
use crate::{MAX_RENDER_SECONDS, SAMPLE_RATE};

#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The root's duration was never finalized; rendering would not
    /// terminate.
    UnboundedDuration,
    /// The duration exceeds [`MAX_RENDER_SECONDS`]; almost certainly a
    /// mis-built graph rather than an hour-long composition.
    DurationTooLong { seconds: f64 },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnboundedDuration => {
                write!(f, "cannot render a source with unbounded duration")
            }
            RenderError::DurationTooLong { seconds } => {
                write!(
                    f,
                    "refusing to render {seconds} seconds (ceiling is {MAX_RENDER_SECONDS})"
                )
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Render `source` over `[0, duration)` at [`SAMPLE_RATE`].
///
/// Fails up front on an unbounded or absurdly long duration; it never
/// silently truncates. Logs progress once per rendered second.
pub fn render(source: &mut dyn SignalNode) -> Result<Vec<f32>, RenderError> {
    let duration = source.duration();
    if !duration.is_finite() {
        return Err(RenderError::UnboundedDuration);
    }
    if duration > MAX_RENDER_SECONDS {
        return Err(RenderError::DurationTooLong { seconds: duration });
    }

    let total = (duration * SAMPLE_RATE as f64) as usize;
    tracing::info!(samples = total, seconds = duration, "rendering");

    let mut samples = Vec::with_capacity(total);
    for index in 0..total {
        if index > 0 && index % SAMPLE_RATE as usize == 0 {
            tracing::debug!(
                rendered_seconds = index / SAMPLE_RATE as usize,
                "render progress"
            );
        }

        let time = index as f64 / SAMPLE_RATE as f64;
        samples.push(source.sample(time));
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::extensions::NodeExt;
    use crate::graph::oscillator::Sine;
    use crate::graph::value::Value;

    #[test]
    fn renders_expected_sample_count() {
        let mut source = Value::new(0.5).with_duration(0.5);
        let samples = render(&mut source).unwrap();

        assert_eq!(samples.len(), SAMPLE_RATE as usize / 2);
        assert!(samples.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn rejects_unbounded_sources() {
        let mut source = Sine::new(440.0);
        assert_eq!(render(&mut source), Err(RenderError::UnboundedDuration));
    }

    #[test]
    fn rejects_absurd_durations() {
        let mut source = Value::new(0.1).with_duration(MAX_RENDER_SECONDS * 2.0);
        assert!(matches!(
            render(&mut source),
            Err(RenderError::DurationTooLong { .. })
        ));
    }

    #[test]
    fn samples_follow_the_source_clock() {
        let mut source = Sine::new(441.0).with_duration(0.1);
        let samples = render(&mut source).unwrap();

        // 441 Hz at 44100 Hz repeats every 100 samples.
        assert!((samples[0] - 1.0).abs() < 1e-6);
        assert!((samples[100] - 1.0).abs() < 1e-5);
        assert!((samples[50] + 1.0).abs() < 1e-5);
    }
}
