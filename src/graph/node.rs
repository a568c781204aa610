use std::fmt;

/*
Signal Graph Nodes
==================

Every sound in the engine is a tree of `SignalNode` values: primitive
generators at the leaves (constants, oscillators, plucked strings) and
combinators above them (add, multiply, scale, phase shift, envelope, decay,
normalize, sequence). Evaluation is pull-based and recursive: the renderer
asks the root for `sample(t)`, and each node asks its children, shifting or
scaling time and value according to its own rule.

Two numbers describe a node's footprint on the timeline:

  duration   How long the node is considered active, in seconds.
             `f64::INFINITY` means "not yet finalized" - generators start
             unbounded and get a concrete duration from a wrapper or from
             `set_duration`.

  size       How much room the node claims when the sequencer places it.
             Defaults to the duration; decay nodes deliberately report half
             their duration so the tail of one note rings under the start
             of the next.

Ownership is exclusive and by value. Combinators take their operands by
value, so a composed tree can never alias a node the caller still holds;
reusing a node means cloning it first (`Box<dyn SignalNode>` is `Clone`
through `clone_node`). Because the tree is acyclic and never shared,
evaluation needs no locking anywhere.

Narrowing a duration propagates downward: `set_duration` stores the new
value, then runs `propagate_durations`, which clamps every child to the
parent's duration and lets nodes recompute duration-derived coefficients
(the decay combinators do). The propagation pass is an ordinary method so
it can be exercised in isolation.
*/

/// Duration sentinel for nodes that have not been given a finite extent.
pub const UNBOUNDED: f64 = f64::INFINITY;

/// Core trait implemented by every generator and combinator.
///
/// `sample` takes `&mut self` because some generators are stateful: the
/// plucked string advances its feedback filter on every call and therefore
/// must be sampled exactly once per output index, in increasing time order.
/// Stateless nodes tolerate any access pattern.
pub trait SignalNode: Send + fmt::Display {
    /// Instantaneous value at `time` seconds. Defined for `[0, duration)`
    /// but total: probing past the end returns a value consistent with the
    /// node's own rule (usually silence or a decayed tail), never a panic.
    fn sample(&mut self, time: f64) -> f32;

    /// Amplitude estimate at `time`, used by normalization. This is
    /// whatever bound the node can cheaply report, not a strict maximum.
    fn max_amp(&self, time: f64) -> f32;

    /// Active lifespan in seconds; [`UNBOUNDED`] when not finalized.
    fn duration(&self) -> f64;

    /// Set the duration, then run [`propagate_durations`] so children are
    /// clamped and derived coefficients stay consistent.
    ///
    /// [`propagate_durations`]: SignalNode::propagate_durations
    fn set_duration(&mut self, duration: f64);

    /// Placement extent used by the sequencer.
    fn size(&self) -> f64;

    fn set_size(&mut self, size: f64);

    /// Downward duration pass: clamp each child to `min(child, parent)` and
    /// recompute anything derived from the duration, recursively.
    fn propagate_durations(&mut self) {}

    /// Deep, independent copy of this subtree.
    fn clone_node(&self) -> Box<dyn SignalNode>;
}

impl Clone for Box<dyn SignalNode> {
    fn clone(&self) -> Self {
        self.clone_node()
    }
}

/// Allow boxed nodes to be used wherever a node is expected (for dynamic
/// composition, e.g. the sequencer's reduction tree).
impl SignalNode for Box<dyn SignalNode> {
    fn sample(&mut self, time: f64) -> f32 {
        (**self).sample(time)
    }

    fn max_amp(&self, time: f64) -> f32 {
        (**self).max_amp(time)
    }

    fn duration(&self) -> f64 {
        (**self).duration()
    }

    fn set_duration(&mut self, duration: f64) {
        (**self).set_duration(duration)
    }

    fn size(&self) -> f64 {
        (**self).size()
    }

    fn set_size(&mut self, size: f64) {
        (**self).set_size(size)
    }

    fn propagate_durations(&mut self) {
        (**self).propagate_durations()
    }

    fn clone_node(&self) -> Box<dyn SignalNode> {
        (**self).clone_node()
    }
}

/// Duration and placement extent shared by every node.
///
/// Rust has no base-class state, so each node embeds one of these and
/// delegates the trait accessors to it.
#[derive(Debug, Clone, Copy)]
pub struct Extent {
    duration: f64,
    size: Option<f64>,
}

impl Extent {
    pub fn unbounded() -> Self {
        Self {
            duration: UNBOUNDED,
            size: None,
        }
    }

    pub fn with_duration(duration: f64) -> Self {
        Self {
            duration,
            size: None,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }

    /// Placement extent; falls back to the duration until overridden.
    pub fn size(&self) -> f64 {
        self.size.unwrap_or(self.duration)
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = Some(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_defaults_to_unbounded() {
        let extent = Extent::unbounded();
        assert_eq!(extent.duration(), UNBOUNDED);
        assert_eq!(extent.size(), UNBOUNDED);
    }

    #[test]
    fn size_falls_back_to_duration_until_set() {
        let mut extent = Extent::with_duration(2.0);
        assert_eq!(extent.size(), 2.0);

        extent.set_size(0.5);
        assert_eq!(extent.size(), 0.5);
        assert_eq!(extent.duration(), 2.0);

        // Narrowing the duration afterwards leaves the explicit size alone.
        extent.set_duration(1.0);
        assert_eq!(extent.size(), 0.5);
    }
}
