use std::fmt;

use crate::graph::add::Add;
use crate::graph::extensions::NodeExt;
use crate::graph::node::{Extent, SignalNode};
use crate::graph::phase_shift::PhaseShift;
use crate::graph::value::Value;

/*
Note Sequencing
===============

`NoteSequence` concatenates notes end-to-end: each note starts where the
previous note's SIZE ends. Size, not duration - a decay node reports half
its duration as its size, so its ringing tail overlaps the next note.

The combined signal is built by balanced-pair reduction over the appended
list:

    reduce([n])        = n
    reduce([])         = zero-duration silence
    reduce(list)       = let (left, right) = split at midpoint
                         a = reduce(left); b = reduce(right)
                         add(a, shift(b, a.size)) with size a.size + b.size

That yields a combination tree of depth O(log n) instead of the O(n) a
left fold would produce. The depth matters because EVERY `sample(t)` call
on the result re-descends the whole tree; a 64-note line costs 6 levels
per sample instead of 64.

The tree is rebuilt from scratch on every push: O(n log n) per push,
O(n^2 log n) to grow a full sequence. That cost is accepted for the
simplicity of having no incremental-update state to maintain.
*/
#[derive(Clone)]
pub struct NoteSequence {
    notes: Vec<Box<dyn SignalNode>>,
    sound: Box<dyn SignalNode>,
    extent: Extent,
}

impl NoteSequence {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            sound: Box::new(Value::new(0.0)),
            extent: Extent::unbounded(),
        }
    }

    /// Append a note after the current end of the sequence and rebuild the
    /// combined signal.
    pub fn push(&mut self, note: impl SignalNode + 'static) {
        self.push_boxed(Box::new(note));
    }

    pub fn push_boxed(&mut self, note: Box<dyn SignalNode>) {
        self.notes.push(note);
        self.sound = reduce(&self.notes);
        let duration = self.sound.duration();
        self.extent.set_duration(duration);
    }

    /// Chainable [`push`](NoteSequence::push). Shadows `NodeExt::then` on
    /// purpose: appending to an existing sequence extends it rather than
    /// nesting it inside a new one.
    pub fn then(mut self, note: impl SignalNode + 'static) -> Self {
        self.push(note);
        self
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl Default for NoteSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Balanced-pair reduction of a note list into one combined node.
fn reduce(notes: &[Box<dyn SignalNode>]) -> Box<dyn SignalNode> {
    match notes.len() {
        0 => Box::new(Value::new(0.0).with_duration(0.0)),
        1 => notes[0].clone(),
        len => {
            let half = len / 2;
            let a = reduce(&notes[..half]);
            let b = reduce(&notes[half..]);
            let (a_size, b_size) = (a.size(), b.size());

            let mut joined = Add::new();
            joined.push_boxed(a);
            joined.push_boxed(Box::new(PhaseShift::from_boxed(b, a_size)));
            joined.set_size(a_size + b_size);
            Box::new(joined)
        }
    }
}

impl SignalNode for NoteSequence {
    fn sample(&mut self, time: f64) -> f32 {
        self.sound.sample(time)
    }

    fn max_amp(&self, time: f64) -> f32 {
        self.sound.max_amp(time)
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

impl fmt::Display for NoteSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (index, note) in self.notes.iter().enumerate() {
            if index > 0 {
                write!(f, " << ")?;
            }
            write!(f, "{}", note)?;
        }
        write!(f, ")")
    }
}
