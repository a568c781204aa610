use std::fmt;

use crate::graph::node::{Extent, SignalNode};

/// Linear fade-in and fade-out around an otherwise untouched signal.
///
/// The first `ramp` seconds scale linearly from 0 to 1, the last `ramp`
/// seconds before the duration end scale from 1 back to 0, and the middle
/// passes through. Removes the clicks a hard note boundary would cause.
///
/// With an unbounded duration only the fade-in applies; the fade-out
/// engages once a wrapper narrows the duration.
#[derive(Clone)]
pub struct Envelope {
    wave: Box<dyn SignalNode>,
    ramp: f64,
    extent: Extent,
}

impl Envelope {
    pub fn new(wave: impl SignalNode + 'static, ramp: f64) -> Self {
        Self::from_boxed(Box::new(wave), ramp)
    }

    pub fn from_boxed(wave: Box<dyn SignalNode>, ramp: f64) -> Self {
        let extent = Extent::with_duration(wave.duration());
        let mut node = Self { wave, ramp, extent };
        node.propagate_durations();
        node
    }
}

impl SignalNode for Envelope {
    fn sample(&mut self, time: f64) -> f32 {
        let duration = self.extent.duration();
        let value = self.wave.sample(time);

        if time < self.ramp {
            (time / self.ramp) as f32 * value
        } else if time > duration - self.ramp {
            ((duration - time) / self.ramp) as f32 * value
        } else {
            value
        }
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

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Envelope({}, {})", self.wave, self.ramp)
    }
}
