use crate::graph::add::Add;
use crate::graph::decay::{ExponentialDecay, LinearDecay};
use crate::graph::envelope::Envelope;
use crate::graph::multiply::Multiply;
use crate::graph::node::SignalNode;
use crate::graph::normalize::Normalize;
use crate::graph::phase_shift::PhaseShift;
use crate::graph::scale::Scale;
use crate::graph::sequence::NoteSequence;

/// Fluent combinators, so compositions read in signal-flow order:
///
/// ```ignore
/// let note = plucked_string(220.0)
///     .envelope(0.06)
///     .with_duration(0.65)
///     .with_size(0.65);
/// let line = note.clone().then(note.clone()).then(note);
/// let master = line.normalize().scale(0.25);
/// ```
///
/// Every method takes `self` by value; reusing a node after composing it
/// means cloning it first. `Add::plus`, `Multiply::times`, and
/// `NoteSequence::then` have inherent methods of the same names that
/// extend the existing node flat instead of nesting it - method
/// resolution picks those first, which is the intended behavior.
pub trait NodeExt: SignalNode + Sized + 'static {
    /// Sum with another signal.
    fn plus(self, other: impl SignalNode + 'static) -> Add {
        let mut sum = Add::new();
        sum.push(self);
        sum.push(other);
        sum
    }

    /// Multiply with another signal.
    fn times(self, other: impl SignalNode + 'static) -> Multiply {
        let mut product = Multiply::new();
        product.push(self);
        product.push(other);
        product
    }

    /// Multiply by a constant factor.
    fn scale(self, factor: f32) -> Scale {
        Scale::new(self, factor)
    }

    /// Delay by `offset` seconds.
    fn shift(self, offset: f64) -> PhaseShift {
        PhaseShift::new(self, offset)
    }

    /// Linear fade-in/fade-out of `ramp` seconds at each end.
    fn envelope(self, ramp: f64) -> Envelope {
        Envelope::new(self, ramp)
    }

    /// Saturate to unit scale by the reported amplitude bound.
    fn normalize(self) -> Normalize {
        Normalize::new(self)
    }

    /// Fade linearly to silence over the duration; size becomes half the
    /// duration so the tail overlaps the next sequenced note.
    fn linear_decay(self) -> LinearDecay {
        LinearDecay::new(self)
    }

    /// Fade exponentially to `reduced_by` of full scale over the (1.5x
    /// stretched) duration; size becomes half the duration.
    fn exponential_decay(self, reduced_by: f64) -> ExponentialDecay {
        ExponentialDecay::new(self, reduced_by)
    }

    /// Sequence: this node followed by `next`.
    fn then(self, next: impl SignalNode + 'static) -> NoteSequence {
        NoteSequence::new().then(self).then(next)
    }

    /// Set the duration in place and pass the node along.
    fn with_duration(mut self, duration: f64) -> Self {
        self.set_duration(duration);
        self
    }

    /// Set the sequencing size in place and pass the node along.
    fn with_size(mut self, size: f64) -> Self {
        self.set_size(size);
        self
    }

    /// Erase the concrete type for dynamic composition.
    fn boxed(self) -> Box<dyn SignalNode> {
        Box::new(self)
    }
}

impl<T: SignalNode + Sized + 'static> NodeExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::value::Value;

    #[test]
    fn chains_read_in_signal_flow_order() {
        let mut note = Value::new(2.0)
            .with_duration(1.0)
            .envelope(0.1)
            .normalize()
            .scale(0.25);

        assert_eq!(note.duration(), 1.0);
        // Mid-note: envelope passes through, normalize saturates the
        // constant to 1, scale brings it to 0.25.
        assert_eq!(note.sample(0.5), 0.25);
    }

    #[test]
    fn inherent_then_extends_instead_of_nesting() {
        let seq = Value::new(1.0)
            .with_duration(1.0)
            .then(Value::new(2.0).with_duration(1.0))
            .then(Value::new(3.0).with_duration(1.0));

        // Three notes in one sequence, not a sequence of sequences.
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn mutating_the_original_after_composing_does_not_leak() {
        let mut original = Value::new(1.0).with_duration(2.0);
        let composed = original.clone().scale(0.5);

        original.set_duration(0.1);
        assert_eq!(composed.duration(), 2.0);
    }
}
