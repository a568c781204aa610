use std::fmt;

use crate::graph::node::{Extent, SignalNode};

/// Divide a signal by its reported amplitude bound, saturating it to unit
/// scale.
///
/// When the bound is exactly zero the divisor falls back to 1 so silence
/// stays silence instead of raising a division error.
#[derive(Clone)]
pub struct Normalize {
    wave: Box<dyn SignalNode>,
    extent: Extent,
}

impl Normalize {
    pub fn new(wave: impl SignalNode + 'static) -> Self {
        Self::from_boxed(Box::new(wave))
    }

    pub fn from_boxed(wave: Box<dyn SignalNode>) -> Self {
        let extent = Extent::with_duration(wave.duration());
        let mut node = Self { wave, extent };
        node.propagate_durations();
        node
    }
}

impl SignalNode for Normalize {
    fn sample(&mut self, time: f64) -> f32 {
        let amp = self.wave.max_amp(time);
        let divisor = if amp == 0.0 { 1.0 } else { amp };
        self.wave.sample(time) / divisor
    }

    fn max_amp(&self, _time: f64) -> f32 {
        1.0
    }

    fn duration(&self) -> f64 {
        self.extent.duration()
    }

    fn set_duration(&mut self, duration: f64) {
        self.extent.set_duration(duration);
        self.propagate_durations();
    }

    fn size(&self) -> f64 {
        self.extent.size()
    }

    fn set_size(&mut self, size: f64) {
        self.extent.set_size(size);
    }

    fn propagate_durations(&mut self) {
        let duration = self.extent.duration();
        self.wave.set_duration(self.wave.duration().min(duration));
    }

    fn clone_node(&self) -> Box<dyn SignalNode> {
        Box::new(self.clone())
    }
}

impl fmt::Display for Normalize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Normalize({})", self.wave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::extensions::NodeExt;
    use crate::graph::value::Value;

    #[test]
    fn saturates_constant_to_unit_scale() {
        // The amplitude bound of Value(5) is 5, so output is 5/5 = 1, not 5.
        let mut normalized = Normalize::new(Value::new(5.0).scale(1.0));
        for index in 0..10 {
            assert_eq!(normalized.sample(index as f64 * 0.1), 1.0);
        }
    }

    #[test]
    fn zero_amplitude_divides_by_one() {
        let mut normalized = Normalize::new(Value::new(0.0));
        assert_eq!(normalized.sample(0.0), 0.0);
    }

    #[test]
    fn reports_unit_bound() {
        let normalized = Normalize::new(Value::new(3.0));
        assert_eq!(normalized.max_amp(1.0), 1.0);
    }
}
