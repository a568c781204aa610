use crate::graph::add::Add;
use crate::graph::extensions::NodeExt;
use crate::graph::oscillator::Sine;
use crate::graph::value::Value;
use crate::graph::SignalNode;

/// Weighted stack of sinusoid partials.
///
/// `partials` pairs a frequency multiple with its strength, e.g.
/// `&[(1.0, 1.0), (2.0, 0.2), (4.0, 0.05)]` for a fundamental with a
/// soft octave and a whisper of the double octave. The sum is scaled by
/// the reciprocal of the total strength so the stack peaks near unit
/// amplitude regardless of how many partials it carries.
pub fn harmonics(frequency: f64, partials: &[(f64, f32)]) -> impl SignalNode {
    let total: f32 = partials.iter().map(|&(_, strength)| strength).sum();

    let mut stack = Add::new();
    for &(multiple, strength) in partials {
        stack.push(Sine::new(frequency * multiple).times(Value::new(strength)));
    }
    stack.times(Value::new(1.0 / total))
}
