use std::fmt;

use crate::dsp::string::KarplusStrong;
use crate::graph::node::{Extent, SignalNode};

/// Plucked-string generator.
///
/// # Sampling contract
///
/// UNLIKE every other generator in this crate, this node is stateful and
/// call-order dependent: each `sample` call advances the underlying
/// feedback filter by exactly one step and returns the new head of the
/// buffer. The decay only tracks wall-clock time if the node is sampled
/// exactly once per output sample, at the engine sample rate, in strictly
/// increasing time order - precisely what the renderer does. Sampling out
/// of order, repeating an index, or skipping indices makes the string
/// decay faster or slower than real time. There is no way to "rewind".
///
/// Cloning the node clones the filter state, so every composed copy rings
/// independently from its seeding.
#[derive(Clone)]
pub struct PluckedString {
    string: KarplusStrong,
    extent: Extent,
}

impl PluckedString {
    /// String tuned to `frequency` with the given per-period energy decay
    /// (0.996-0.999 are natural values), seeded with a random pluck.
    pub fn new(frequency: f32, energy_decay: f32) -> Self {
        Self {
            string: KarplusStrong::new(frequency, energy_decay),
            extent: Extent::unbounded(),
        }
    }

    /// Re-seed with uniform random noise (the default excitation).
    pub fn pluck_random(mut self) -> Self {
        self.string.pluck_random();
        self
    }

    /// Re-seed with a triangle ramp; softer attack, fewer high partials.
    pub fn pluck_triangle(mut self) -> Self {
        self.string.pluck_triangle();
        self
    }

    /// Re-seed with a sampled sinusoid at `frequency` Hz.
    pub fn pluck_sinusoid(mut self, frequency: f32) -> Self {
        self.string.pluck_sinusoid(frequency);
        self
    }

    /// Buffer length in samples (one period of the fundamental).
    pub fn period(&self) -> usize {
        self.string.period()
    }
}

impl SignalNode for PluckedString {
    /// Advances the filter once; see the type-level contract.
    fn sample(&mut self, _time: f64) -> f32 {
        // A correctly seeded string never underruns its own buffer.
        self.string.advance().unwrap_or(0.0)
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

    fn clone_node(&self) -> Box<dyn SignalNode> {
        Box::new(self.clone())
    }
}

impl fmt::Display for PluckedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PluckedString({})", self.string.period())
    }
}
