/// Fixed-capacity circular queue of samples.
///
/// Backs the plucked-string filter, which recirculates exactly one period of
/// audio. Capacity is fixed at construction; `enqueue` on a full buffer and
/// `dequeue` on an empty buffer are contract violations and fail loudly
/// rather than silently dropping or inventing samples.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    data: Vec<f32>,
    /// Index of the oldest sample.
    head: usize,
    /// Index one past the newest sample.
    tail: usize,
    used: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity],
            head: 0,
            tail: 0,
            used: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of samples currently queued.
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    pub fn is_full(&self) -> bool {
        self.used == self.data.len()
    }

    /// Append a sample at the tail.
    pub fn enqueue(&mut self, value: f32) -> Result<(), RingBufferError> {
        if self.is_full() {
            return Err(RingBufferError::Full);
        }

        self.data[self.tail] = value;
        self.tail = (self.tail + 1) % self.data.len();
        self.used += 1;
        Ok(())
    }

    /// Remove and return the oldest sample.
    pub fn dequeue(&mut self) -> Result<f32, RingBufferError> {
        if self.is_empty() {
            return Err(RingBufferError::Empty);
        }

        let value = self.data[self.head];
        self.head = (self.head + 1) % self.data.len();
        self.used -= 1;
        Ok(value)
    }

    /// Read the oldest sample without removing it.
    pub fn peek(&self) -> Result<f32, RingBufferError> {
        if self.is_empty() {
            return Err(RingBufferError::Empty);
        }
        Ok(self.data[self.head])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingBufferError {
    /// Enqueue attempted while `len == capacity`.
    Full,
    /// Dequeue or peek attempted while the buffer holds no samples.
    Empty,
}

impl std::fmt::Display for RingBufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RingBufferError::Full => write!(f, "enqueue on a full ring buffer"),
            RingBufferError::Empty => write!(f, "dequeue on an empty ring buffer"),
        }
    }
}

impl std::error::Error for RingBufferError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut buffer = RingBuffer::new(4);
        buffer.enqueue(1.0).unwrap();
        buffer.enqueue(2.0).unwrap();
        buffer.enqueue(3.0).unwrap();

        assert_eq!(buffer.dequeue(), Ok(1.0));
        assert_eq!(buffer.dequeue(), Ok(2.0));
        assert_eq!(buffer.dequeue(), Ok(3.0));
    }

    #[test]
    fn len_tracks_enqueues_minus_dequeues() {
        let mut buffer = RingBuffer::new(8);

        // Interleave operations and verify the count after each step.
        let mut expected = 0usize;
        for round in 0..5 {
            for i in 0..3 {
                buffer.enqueue((round * 3 + i) as f32).unwrap();
                expected += 1;
                assert_eq!(buffer.len(), expected);
            }
            buffer.dequeue().unwrap();
            expected -= 1;
            assert_eq!(buffer.len(), expected);
        }
    }

    #[test]
    fn wraps_around_capacity() {
        let mut buffer = RingBuffer::new(3);

        // Fill, drain two, refill: head and tail both cross the boundary.
        buffer.enqueue(1.0).unwrap();
        buffer.enqueue(2.0).unwrap();
        buffer.enqueue(3.0).unwrap();
        buffer.dequeue().unwrap();
        buffer.dequeue().unwrap();
        buffer.enqueue(4.0).unwrap();
        buffer.enqueue(5.0).unwrap();

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.dequeue(), Ok(3.0));
        assert_eq!(buffer.dequeue(), Ok(4.0));
        assert_eq!(buffer.dequeue(), Ok(5.0));
    }

    #[test]
    fn rejects_enqueue_when_full() {
        let mut buffer = RingBuffer::new(2);
        buffer.enqueue(1.0).unwrap();
        buffer.enqueue(2.0).unwrap();

        assert_eq!(buffer.enqueue(3.0), Err(RingBufferError::Full));
        // The rejected enqueue must not disturb the queued samples.
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.dequeue(), Ok(1.0));
    }

    #[test]
    fn rejects_dequeue_when_empty() {
        let mut buffer = RingBuffer::new(2);

        assert_eq!(buffer.dequeue(), Err(RingBufferError::Empty));
        assert_eq!(buffer.peek(), Err(RingBufferError::Empty));

        buffer.enqueue(1.0).unwrap();
        buffer.dequeue().unwrap();
        assert_eq!(buffer.dequeue(), Err(RingBufferError::Empty));
    }

    #[test]
    fn peek_does_not_consume() {
        let mut buffer = RingBuffer::new(2);
        buffer.enqueue(7.0).unwrap();

        assert_eq!(buffer.peek(), Ok(7.0));
        assert_eq!(buffer.peek(), Ok(7.0));
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut buffer = RingBuffer::new(0);
        assert_eq!(buffer.enqueue(1.0), Err(RingBufferError::Full));
        assert_eq!(buffer.dequeue(), Err(RingBufferError::Empty));
    }
}
