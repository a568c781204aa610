use std::fmt;

use crate::graph::node::{Extent, SignalNode};

/*
Signal Summation
================

`Add` sums any number of operands sample-by-sample. Operands are kept
sorted by DESCENDING duration, and evaluation walks the list until it
meets the first operand whose duration has already passed; everything
after it in the list is shorter still, so the walk can stop there. The
sort-on-push is what makes the early stop correct, not an optimization:
an unsorted list would silently drop still-active operands.

Duration bookkeeping follows the push order: the first operand sets the
sum's duration, each later operand can only widen it to the maximum. The
asymmetry is deliberate: a sum adopts its first operand's span and only
ever grows from there.
*/
#[derive(Clone)]
pub struct Add {
    waves: Vec<Box<dyn SignalNode>>,
    extent: Extent,
}

impl Add {
    pub fn new() -> Self {
        Self {
            waves: Vec::new(),
            extent: Extent::unbounded(),
        }
    }

    pub fn push(&mut self, wave: impl SignalNode + 'static) {
        self.push_boxed(Box::new(wave));
    }

    pub fn push_boxed(&mut self, wave: Box<dyn SignalNode>) {
        let duration = if self.waves.is_empty() {
            wave.duration()
        } else {
            self.extent.duration().max(wave.duration())
        };
        self.set_duration(duration);

        self.waves.push(wave);
        self.waves
            .sort_by(|a, b| b.duration().total_cmp(&a.duration()));
    }

    /// Chainable [`push`](Add::push); keeps the operand list flat, unlike
    /// `NodeExt::plus`, which would nest this sum inside a new one.
    pub fn plus(mut self, wave: impl SignalNode + 'static) -> Self {
        self.push(wave);
        self
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }
}

impl Default for Add {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalNode for Add {
    fn sample(&mut self, time: f64) -> f32 {
        let mut total = 0.0;
        for wave in &mut self.waves {
            // Sorted descending: the first expired operand ends the walk.
            if wave.duration() < time {
                break;
            }
            total += wave.sample(time);
        }
        total
    }

    fn max_amp(&self, time: f64) -> f32 {
        let mut total = 0.0;
        for wave in &self.waves {
            if wave.duration() < time {
                break;
            }
            total += wave.max_amp(time);
        }
        total
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
        for wave in &mut self.waves {
            wave.set_duration(wave.duration().min(duration));
        }
    }

    fn clone_node(&self) -> Box<dyn SignalNode> {
        Box::new(self.clone())
    }
}

impl fmt::Display for Add {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (index, wave) in self.waves.iter().enumerate() {
            if index > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", wave)?;
        }
        write!(f, ")")
    }
}
