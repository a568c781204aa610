use std::fmt;

use crate::graph::node::{Extent, SignalNode};

/// Multiply any number of signals sample-by-sample (amplitude or ring
/// modulation).
///
/// Shares [`Add`](crate::graph::add::Add)'s operand discipline: the list
/// stays sorted by descending duration, evaluation stops at the first
/// expired operand, the first push sets the duration and later pushes
/// widen it. The running product starts at 1, so a fully expired product
/// yields 1, not 0.
#[derive(Clone)]
pub struct Multiply {
    waves: Vec<Box<dyn SignalNode>>,
    extent: Extent,
}

impl Multiply {
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

    /// Chainable [`push`](Multiply::push); keeps the operand list flat.
    pub fn times(mut self, wave: impl SignalNode + 'static) -> Self {
        self.push(wave);
        self
    }
}

impl Default for Multiply {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalNode for Multiply {
    fn sample(&mut self, time: f64) -> f32 {
        let mut total = 1.0;
        for wave in &mut self.waves {
            if wave.duration() < time {
                break;
            }
            total *= wave.sample(time);
        }
        total
    }

    fn max_amp(&self, time: f64) -> f32 {
        let mut total = 1.0;
        for wave in &self.waves {
            if wave.duration() < time {
                break;
            }
            total *= wave.max_amp(time);
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

impl fmt::Display for Multiply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (index, wave) in self.waves.iter().enumerate() {
            if index > 0 {
                write!(f, " * ")?;
            }
            write!(f, "{}", wave)?;
        }
        write!(f, ")")
    }
}
