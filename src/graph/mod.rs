//! Composable signal graph: generators at the leaves, combinators above.
//!
//! A composition is a tree of [`SignalNode`] values built with the named
//! constructors or the fluent [`NodeExt`] helpers. The tree owns its
//! children exclusively (combinators consume their operands), is acyclic
//! by construction, and is evaluated by pulling `sample(t)` from the root.

/// Sum of signals with descending-duration early-stop evaluation.
pub mod add;
/// Linear and exponential fade-outs with tail-overlap sizing.
pub mod decay;
/// Linear fade-in/out around a signal.
pub mod envelope;
/// Fluent combinators (`.plus()`, `.then()`, `.scale()`, ...).
pub mod extensions;
/// Product of signals (amplitude/ring modulation).
pub mod multiply;
/// Core trait and duration/size bookkeeping shared by all nodes.
pub mod node;
/// Saturation to unit scale by the reported amplitude bound.
pub mod normalize;
/// Periodic oscillator.
pub mod oscillator;
/// Time delay; the building block of sequencing.
pub mod phase_shift;
/// Stateful plucked-string generator.
pub mod pluck;
/// Multiplication by a constant factor.
pub mod scale;
/// End-to-end note concatenation via balanced-pair reduction.
pub mod sequence;
/// Constant signal.
pub mod value;

pub use add::Add;
pub use decay::{ExponentialDecay, LinearDecay};
pub use envelope::Envelope;
pub use extensions::NodeExt;
pub use multiply::Multiply;
pub use node::{Extent, SignalNode, UNBOUNDED};
pub use normalize::Normalize;
pub use oscillator::Sine;
pub use phase_shift::PhaseShift;
pub use pluck::PluckedString;
pub use scale::Scale;
pub use sequence::NoteSequence;
pub use value::Value;
