use std::fmt;

use crate::graph::node::{Extent, SignalNode};

/*
Decay Wrappers
==============

Both wrappers fade a signal toward silence over its duration, and both
report a sequencing size of HALF their duration. The sequencer places the
next note at the previous note's size, so a decaying note keeps ringing
under the first half of its successor - the overlap that makes plucked
lines sound connected instead of gated.

Their gain curves are recomputed whenever the duration changes, inside
`propagate_durations`, so a decay that is narrowed after composition still
reaches silence exactly at its end.

  LinearDecay        gain(t) = 1 + rate * t,  rate = -1/duration
                     (1 at t=0, 0 at t=duration)

  ExponentialDecay   gain(t) = base^t,  base = reduced_by^(1/duration)
                     (1 at t=0, reduced_by at t=duration; the wrapper also
                     stretches its duration to 1.5x the operand's so the
                     tail has room to ring)
*/

/// Linear ramp from full scale at `t = 0` to silence at `t = duration`.
#[derive(Clone)]
pub struct LinearDecay {
    wave: Box<dyn SignalNode>,
    rate: f64,
    extent: Extent,
}

impl LinearDecay {
    pub fn new(wave: impl SignalNode + 'static) -> Self {
        Self::from_boxed(Box::new(wave))
    }

    pub fn from_boxed(wave: Box<dyn SignalNode>) -> Self {
        let extent = Extent::with_duration(wave.duration());
        let mut node = Self {
            wave,
            rate: 0.0,
            extent,
        };
        node.propagate_durations();
        node
    }
}

impl SignalNode for LinearDecay {
    fn sample(&mut self, time: f64) -> f32 {
        self.wave.sample(time) * (1.0 + self.rate * time) as f32
    }

    fn max_amp(&self, time: f64) -> f32 {
        self.wave.max_amp(time)
    }

    fn duration(&self) -> f64 {
        self.extent.duration()
    }

    fn set_duration(&mut self, duration: f64) {
        self.extent.set_duration(duration);
        self.propagate_durations();
    }

    /// Half the duration: lets the tail overlap the next note.
    fn size(&self) -> f64 {
        self.extent.duration() * 0.5
    }

    fn set_size(&mut self, size: f64) {
        self.extent.set_size(size);
    }

    fn propagate_durations(&mut self) {
        let duration = self.extent.duration();
        self.rate = if duration.is_finite() && duration > 0.0 {
            -(1.0 / duration)
        } else {
            0.0
        };
        self.wave.set_duration(self.wave.duration().min(duration));
    }

    fn clone_node(&self) -> Box<dyn SignalNode> {
        Box::new(self.clone())
    }
}

impl fmt::Display for LinearDecay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinearDecay({})", self.wave)
    }
}

/// Exponential fade whose amplitude multiplies by `reduced_by` over one
/// full duration.
#[derive(Clone)]
pub struct ExponentialDecay {
    wave: Box<dyn SignalNode>,
    reduced_by: f64,
    base: f64,
    extent: Extent,
}

impl ExponentialDecay {
    /// `reduced_by` is the amplitude ratio left at the end of the duration,
    /// e.g. 0.0001 fades 80 dB down.
    pub fn new(wave: impl SignalNode + 'static, reduced_by: f64) -> Self {
        Self::from_boxed(Box::new(wave), reduced_by)
    }

    pub fn from_boxed(wave: Box<dyn SignalNode>, reduced_by: f64) -> Self {
        // Half a duration of extra room so the tail rings past the operand.
        let extent = Extent::with_duration(wave.duration() * 1.5);
        let mut node = Self {
            wave,
            reduced_by,
            base: 1.0,
            extent,
        };
        node.propagate_durations();
        node
    }
}

impl SignalNode for ExponentialDecay {
    fn sample(&mut self, time: f64) -> f32 {
        self.wave.sample(time) * self.base.powf(time) as f32
    }

    fn max_amp(&self, time: f64) -> f32 {
        self.wave.max_amp(time)
    }

    fn duration(&self) -> f64 {
        self.extent.duration()
    }

    fn set_duration(&mut self, duration: f64) {
        self.extent.set_duration(duration);
        self.propagate_durations();
    }

    /// Half the duration: lets the tail overlap the next note.
    fn size(&self) -> f64 {
        self.extent.duration() * 0.5
    }

    fn set_size(&mut self, size: f64) {
        self.extent.set_size(size);
    }

    fn propagate_durations(&mut self) {
        let duration = self.extent.duration();
        self.base = if duration.is_finite() && duration > 0.0 {
            self.reduced_by.powf(1.0 / duration)
        } else {
            1.0
        };
        self.wave.set_duration(self.wave.duration().min(duration));
    }

    fn clone_node(&self) -> Box<dyn SignalNode> {
        Box::new(self.clone())
    }
}

impl fmt::Display for ExponentialDecay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExpDecay({})", self.wave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::extensions::NodeExt;
    use crate::graph::value::Value;

    #[test]
    fn linear_decay_ramps_to_silence() {
        let mut decayed = Value::new(1.0).with_duration(2.0).linear_decay();

        assert_eq!(decayed.sample(0.0), 1.0);
        assert!((decayed.sample(1.0) - 0.5).abs() < 1e-6);
        assert!(decayed.sample(2.0).abs() < 1e-6);
    }

    #[test]
    fn linear_decay_reports_half_size() {
        let decayed = Value::new(1.0).with_duration(2.0).linear_decay();
        assert_eq!(decayed.duration(), 2.0);
        assert_eq!(decayed.size(), 1.0);
    }

    #[test]
    fn linear_decay_rate_follows_narrowed_duration() {
        let mut decayed = Value::new(1.0).with_duration(2.0).linear_decay();
        decayed.set_duration(1.0);

        // Rate recomputed for the new duration: silent at t = 1, not t = 2.
        assert!(decayed.sample(1.0).abs() < 1e-6);
        assert!((decayed.sample(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn exponential_decay_hits_target_ratio_at_duration_end() {
        let mut decayed = Value::new(1.0).with_duration(1.0).exponential_decay(0.01);
        let duration = decayed.duration();
        assert!((duration - 1.5).abs() < 1e-9);

        assert_eq!(decayed.sample(0.0), 1.0);
        let end = decayed.sample(duration);
        assert!((end - 0.01).abs() < 1e-4, "expected ~0.01, got {end}");
    }

    #[test]
    fn exponential_decay_stretches_duration_and_halves_size() {
        let decayed = Value::new(1.0).with_duration(1.0).exponential_decay(0.0001);
        assert!((decayed.duration() - 1.5).abs() < 1e-9);
        assert!((decayed.size() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn unbounded_operand_leaves_gain_flat() {
        let mut decayed = Value::new(1.0).linear_decay();
        assert_eq!(decayed.sample(10.0), 1.0);

        let mut decayed = Value::new(1.0).exponential_decay(0.5);
        assert_eq!(decayed.sample(10.0), 1.0);
    }
}
