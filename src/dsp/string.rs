use rand::Rng;

use crate::dsp::ring_buffer::{RingBuffer, RingBufferError};
use crate::SAMPLE_RATE;

/*
Plucked String Filter (Karplus-Strong)
======================================

A physically-motivated model of a vibrating string. One period of the
waveform circulates through a ring buffer whose length sets the pitch:

    period N = sample_rate / frequency   (truncated to an integer)

Each advance step dequeues the oldest sample, averages it with the next
oldest, scales by the energy decay factor, and feeds the result back in:

    s0 = dequeue()
    s1 = peek()
    enqueue(0.5 * (s0 + s1) * decay)

The two-tap average is a lowpass filter applied once per trip around the
buffer, so high harmonics die first and the tone mellows as it rings out.
The decay factor (typically 0.996-0.999) sets how much energy survives each
trip, giving the exponential amplitude envelope of a real string.

The starting contents of the buffer are the "pluck": they decide the
initial harmonic content. Random noise gives the broadband attack of a
picked guitar string; a triangle ramp gives a rounder, softer start; a
sampled sinusoid gives a nearly pure tone that decays without the noisy
transient.

STATE ADVANCES EXPLICITLY. `advance` moves the filter forward exactly one
output sample and is separate from `peek`; callers that want the decay to
track wall-clock time must call `advance` exactly once per output sample,
in order. The graph layer (`graph::pluck`) owns that contract.
*/

/// Feedback filter state for one string.
#[derive(Debug, Clone)]
pub struct KarplusStrong {
    buffer: RingBuffer,
    period: usize,
    energy_decay: f32,
}

impl KarplusStrong {
    /// Create a string tuned to `frequency`, seeded with a random pluck.
    ///
    /// The energy decay factor is the fraction of energy that survives one
    /// full trip around the buffer; 0.996 rings for a few seconds at 110 Hz.
    pub fn new(frequency: f32, energy_decay: f32) -> Self {
        let period = (SAMPLE_RATE as f32 / frequency) as usize;
        let mut string = Self {
            buffer: RingBuffer::new(period),
            period,
            energy_decay,
        };
        string.pluck_random();
        string
    }

    /// Buffer length in samples; one full period of the fundamental.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Re-excite with uniform random noise in [-1, 1].
    ///
    /// A real pluck is a broadband impulse that can contain any frequency,
    /// so noise is the physically honest seeding.
    pub fn pluck_random(&mut self) {
        let mut rng = rand::thread_rng();
        self.reseed(|_, _| rng.gen_range(-1.0..=1.0));
    }

    /// Re-excite with a single triangle ramp across the buffer: rising over
    /// the first half, falling over the second.
    pub fn pluck_triangle(&mut self) {
        self.reseed(|index, period| {
            let half = period as f32 * 0.5;
            if (index as f32) < half {
                index as f32 / half
            } else {
                1.0 - index as f32 / half
            }
        });
    }

    /// Re-excite with one buffer's worth of a sampled sinusoid at an
    /// arbitrary frequency in Hz.
    pub fn pluck_sinusoid(&mut self, frequency: f32) {
        self.reseed(|index, _| {
            (std::f32::consts::TAU * frequency * index as f32 / SAMPLE_RATE as f32).sin()
        });
    }

    /// Drain the buffer, then refill it with exactly `period` fresh samples.
    fn reseed(&mut self, mut excitation: impl FnMut(usize, usize) -> f32) {
        while self.buffer.dequeue().is_ok() {}

        for index in 0..self.period {
            // Cannot overflow: the buffer was just drained and holds
            // exactly `period` slots.
            let _ = self.buffer.enqueue(excitation(index, self.period));
        }
    }

    /// Step the feedback filter by one sample and return the new head value.
    pub fn advance(&mut self) -> Result<f32, RingBufferError> {
        let first = self.buffer.dequeue()?;
        let next = self.buffer.peek()?;

        self.buffer.enqueue(0.5 * (first + next) * self.energy_decay)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_is_sample_rate_over_frequency() {
        // 44100 / 110 = 400.9..., truncated.
        let string = KarplusStrong::new(110.0, 0.996);
        assert_eq!(string.period(), 400);

        let string = KarplusStrong::new(441.0, 0.996);
        assert_eq!(string.period(), 100);
    }

    #[test]
    fn triangle_pluck_is_deterministic() {
        let mut a = KarplusStrong::new(110.0, 0.996);
        let mut b = KarplusStrong::new(110.0, 0.996);
        a.pluck_triangle();
        b.pluck_triangle();

        // Identical seeding must produce bit-identical output runs.
        for _ in 0..2000 {
            assert_eq!(a.advance().unwrap(), b.advance().unwrap());
        }
    }

    #[test]
    fn decay_envelope_is_non_increasing() {
        let mut string = KarplusStrong::new(110.0, 0.996);
        string.pluck_triangle();
        let period = string.period();

        // Peak magnitude per period should only shrink as energy bleeds out.
        let mut peaks = Vec::new();
        for _ in 0..12 {
            let mut peak = 0.0f32;
            for _ in 0..period {
                peak = peak.max(string.advance().unwrap().abs());
            }
            peaks.push(peak);
        }

        for pair in peaks.windows(2) {
            assert!(
                pair[1] <= pair[0] + 1e-4,
                "per-period peak grew: {} -> {}",
                pair[0],
                pair[1]
            );
        }
        assert!(
            peaks[peaks.len() - 1] < peaks[0],
            "string failed to lose energy over 12 periods"
        );
    }

    #[test]
    fn random_pluck_fills_one_full_period() {
        let mut string = KarplusStrong::new(220.0, 0.999);
        string.pluck_random();

        // The filter must be able to run a long time without underrunning.
        for _ in 0..10_000 {
            assert!(string.advance().is_ok());
        }
    }

    #[test]
    fn sinusoid_pluck_starts_near_pure_tone() {
        let mut string = KarplusStrong::new(110.0, 0.999);
        string.pluck_sinusoid(110.0);

        // All seeded samples are within the sinusoid's range.
        for _ in 0..string.period() {
            let value = string.advance().unwrap();
            assert!(value.abs() <= 1.0);
        }
    }
}
