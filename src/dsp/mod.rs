//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free after construction and stay focused
//! on the signal-processing math; graph nodes layer timing and composition
//! on top.

/// Fixed-capacity circular sample queue.
pub mod ring_buffer;
/// Plucked-string feedback filter built on the ring buffer.
pub mod string;

pub use ring_buffer::{RingBuffer, RingBufferError};
pub use string::KarplusStrong;
