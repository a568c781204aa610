use std::fmt;

use crate::graph::node::{Extent, SignalNode};

/// Multiply a signal by a constant factor.
///
/// The scalar counterpart of [`Multiply`](crate::graph::multiply::Multiply):
/// use this when the gain is a plain number rather than another signal.
#[derive(Clone)]
pub struct Scale {
    wave: Box<dyn SignalNode>,
    factor: f32,
    extent: Extent,
}

impl Scale {
    pub fn new(wave: impl SignalNode + 'static, factor: f32) -> Self {
        Self::from_boxed(Box::new(wave), factor)
    }

    pub fn from_boxed(wave: Box<dyn SignalNode>, factor: f32) -> Self {
        let extent = Extent::with_duration(wave.duration());
        let mut node = Self {
            wave,
            factor,
            extent,
        };
        node.propagate_durations();
        node
    }
}

impl SignalNode for Scale {
    fn sample(&mut self, time: f64) -> f32 {
        self.wave.sample(time) * self.factor
    }

    fn max_amp(&self, time: f64) -> f32 {
        self.wave.max_amp(time) * self.factor
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

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} * {})", self.wave, self.factor)
    }
}
