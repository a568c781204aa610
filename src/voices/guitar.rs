use crate::graph::extensions::NodeExt;
use crate::graph::pluck::PluckedString;
use crate::graph::value::Value;
use crate::graph::SignalNode;

/// Plucked guitar string: three detuned resonator strings summed.
///
/// The fundamental carries the note; two partner strings at 7/12 and
/// 21/12 of the frequency add body at 8% and 2% amplitude. The ratios
/// come from listening tests, not theory - they fatten the attack without
/// reading as separate notes.
///
/// The result inherits the plucked string's sampling contract: sample it
/// once per output sample, in order.
pub fn plucked_string(frequency: f32) -> impl SignalNode {
    let root = PluckedString::new(frequency, 0.999).pluck_random();
    let low = PluckedString::new(frequency * 7.0 / 12.0, 0.999)
        .pluck_random()
        .times(Value::new(0.08));
    let high = PluckedString::new(frequency * 21.0 / 12.0, 0.999)
        .pluck_random()
        .times(Value::new(0.02));

    root.plus(low).plus(high)
}
