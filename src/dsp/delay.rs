use crate::{
    error::{FlangerError, Result},
    ZERO_DELAY_THRESHOLD,
};

/*
Fractional Delay Buffer
=======================

A fixed-length ring of samples with an integer cursor. Every processed sample
does exactly one `write` at the cursor followed by one `advance`, so the ring
always holds the most recent `capacity` samples in circular order.

Offsets
-------

Reads are addressed by a SIGNED offset relative to the cursor. Negative means
"this many samples into the past", which is the only direction a causal delay
can look:

    offset    reads
    ------    -----
     0.0      storage[cursor]
    -1.0      storage[cursor - 1]
    -2.5      half of storage[cursor - 2], half of storage[cursor - 3]

Valid offsets lie in (-capacity, 0]. All index math goes through Euclidean
modulo, so no offset can produce an out-of-range access.

Linear Interpolation
--------------------

The offset is split into an integer part `i` (truncated toward zero) and a
fractional part `f = offset - i`, so for negative offsets `-1 < f <= 0`:

    y = (1 - |f|) * storage[cursor + i] + |f| * storage[cursor + i - 1]

Near-Zero Offsets
-----------------

Requests with |offset| < 0.1 return storage[cursor] directly, unblended.
*/

pub struct DelayBuffer {
    storage: Vec<f32>,
    cursor: usize,
}

impl DelayBuffer {
    /// Allocate a silent buffer holding `capacity` samples.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(FlangerError::invalid(
                "delay_capacity_samples",
                0u32,
                "must hold at least one sample",
            ));
        }

        Ok(Self {
            storage: vec![0.0; capacity],
            cursor: 0,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Overwrite the sample at the cursor.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.storage[self.cursor] = sample;
    }

    /// Move the cursor forward one slot, wrapping at capacity.
    #[inline]
    pub fn advance(&mut self) {
        self.cursor += 1;
        if self.cursor == self.storage.len() {
            self.cursor = 0;
        }
    }

    /// Interpolated read at a signed offset from the cursor.
    #[inline]
    pub fn read_at(&self, offset: f32) -> f32 {
        if offset.abs() < ZERO_DELAY_THRESHOLD {
            return self.storage[self.cursor];
        }

        let whole = offset.trunc();
        let frac = (offset - whole).abs();
        let whole = whole as isize;

        let near = self.storage[self.wrap(whole)];
        let far = self.storage[self.wrap(whole - 1)];

        near * (1.0 - frac) + far * frac
    }

    /// Largest absolute sample currently held.
    pub fn peak(&self) -> f32 {
        self.storage.iter().fold(0.0f32, |peak, s| peak.max(s.abs()))
    }

    /// Silence the buffer and rewind the cursor without reallocating.
    pub fn reset(&mut self) {
        self.storage.fill(0.0);
        self.cursor = 0;
    }

    #[inline]
    fn wrap(&self, relative: isize) -> usize {
        let len = self.storage.len() as isize;
        (self.cursor as isize + relative).rem_euclid(len) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write `values` one per sample, advancing after each.
    fn fill(buffer: &mut DelayBuffer, values: &[f32]) {
        for &v in values {
            buffer.write(v);
            buffer.advance();
        }
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            DelayBuffer::new(0),
            Err(FlangerError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_fresh_buffer_is_silent() {
        let buffer = DelayBuffer::new(64).unwrap();
        for k in 0..64 {
            let offset = -(k as f32) - 0.37;
            assert_eq!(buffer.read_at(offset), 0.0);
            assert_eq!(buffer.read_at(-(k as f32)), 0.0);
        }
    }

    #[test]
    fn test_silence_until_history_fills() {
        // Zeros written for a whole capacity keep every read at zero
        let mut buffer = DelayBuffer::new(16).unwrap();
        for _ in 0..16 {
            buffer.write(0.0);
            for k in 0..16 {
                assert_eq!(buffer.read_at(-(k as f32) - 0.5), 0.0);
            }
            buffer.advance();
        }
    }

    #[test]
    fn test_zero_offset_returns_latest_write() {
        let mut buffer = DelayBuffer::new(8).unwrap();
        for i in 0..20 {
            let sample = i as f32 * 0.25 - 1.0;
            buffer.write(sample);
            assert_eq!(buffer.read_at(0.0), sample);
            buffer.advance();
        }
    }

    #[test]
    fn test_sub_threshold_offset_is_passthrough() {
        let mut buffer = DelayBuffer::new(8).unwrap();
        fill(&mut buffer, &[1.0, 2.0, 3.0]);
        buffer.write(4.0);

        // No blend toward the neighbouring sample below the threshold
        assert_eq!(buffer.read_at(-0.05), 4.0);
        assert_eq!(buffer.read_at(-0.099), 4.0);
        assert!(buffer.read_at(-0.2) < 4.0);
    }

    #[test]
    fn test_circularity_integer_offsets() {
        let capacity = 32;
        let mut buffer = DelayBuffer::new(capacity).unwrap();
        let values: Vec<f32> = (0..capacity).map(|i| i as f32 + 1.0).collect();
        fill(&mut buffer, &values);

        // Cursor wrapped back to the oldest slot
        assert_eq!(buffer.cursor(), 0);
        assert_eq!(buffer.read_at(0.0), values[0]);

        for k in 1..capacity {
            let expected = values[capacity - k];
            assert_eq!(
                buffer.read_at(-(k as f32)),
                expected,
                "k = {} should read the {}-th most recent sample",
                k,
                k
            );
        }
    }

    #[test]
    fn test_fractional_read_interpolates() {
        let mut buffer = DelayBuffer::new(8).unwrap();
        fill(&mut buffer, &[0.0, 10.0, 20.0, 30.0]);

        // cursor - 1 holds 30, cursor - 2 holds 20
        let y = buffer.read_at(-1.25);
        assert!((y - 27.5).abs() < 1e-5, "got {}", y);

        let y = buffer.read_at(-2.5);
        assert!((y - 15.0).abs() < 1e-5, "got {}", y);
    }

    #[test]
    fn test_read_across_wrap_point() {
        let mut buffer = DelayBuffer::new(4).unwrap();
        fill(&mut buffer, &[1.0, 2.0, 3.0, 4.0, 5.0]);

        // Cursor is at index 1; index 0 holds 5, index 3 holds 4
        assert_eq!(buffer.cursor(), 1);
        assert_eq!(buffer.read_at(-1.0), 5.0);
        let y = buffer.read_at(-1.5);
        assert!((y - 4.5).abs() < 1e-6, "got {}", y);
    }

    #[test]
    fn test_extreme_offsets_never_panic() {
        let mut buffer = DelayBuffer::new(5).unwrap();
        fill(&mut buffer, &[1.0, 2.0, 3.0]);

        for offset in [-4.99, -4.0, -100.3, 7.5, f32::MIN_POSITIVE] {
            let y = buffer.read_at(offset);
            assert!(y.is_finite());
        }
    }

    #[test]
    fn test_peak_and_reset() {
        let mut buffer = DelayBuffer::new(4).unwrap();
        fill(&mut buffer, &[0.5, -0.9, 0.1]);
        assert!((buffer.peak() - 0.9).abs() < 1e-6);

        buffer.reset();
        assert_eq!(buffer.peak(), 0.0);
        assert_eq!(buffer.cursor(), 0);
        assert_eq!(buffer.capacity(), 4);
    }
}
