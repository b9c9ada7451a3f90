//! Bounded PCM byte ring for speaker playback
//!
//! A producer thread appends raw little-endian i16 PCM bytes while the
//! device callback thread drains samples. All internal access is
//! serialized by the ring's own lock; callers never coordinate.

use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Circular byte buffer with a fixed capacity.
///
/// When an append would exceed capacity the oldest bytes are dropped and
/// counted, so the most recent audio always survives.
pub struct PcmRing {
    bytes: Mutex<VecDeque<u8>>,
    capacity: usize,
    overflow_bytes: AtomicUsize,
    underrun_fills: AtomicUsize,
}

impl PcmRing {
    /// Create a ring holding at most `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Mutex::new(VecDeque::with_capacity(capacity.min(1 << 16))),
            capacity,
            overflow_bytes: AtomicUsize::new(0),
            underrun_fills: AtomicUsize::new(0),
        }
    }

    /// Append raw bytes to the tail, dropping from the head on overflow
    pub fn push(&self, data: &[u8]) {
        let mut bytes = self.bytes.lock();
        bytes.extend(data.iter().copied());

        let len = bytes.len();
        if len > self.capacity {
            let excess = len - self.capacity;
            bytes.drain(..excess);
            self.overflow_bytes.fetch_add(excess, Ordering::Relaxed);
        }
    }

    /// Fill `out` with decoded i16 samples, zero-filling on underrun.
    ///
    /// Consumes whole sample pairs only; a trailing odd byte stays in the
    /// ring until its partner arrives. Returns the number of real (non
    /// silence) samples written.
    pub fn read_samples(&self, out: &mut [i16]) -> usize {
        let mut bytes = self.bytes.lock();
        let available = bytes.len() / 2;
        let n = available.min(out.len());

        for sample in out.iter_mut().take(n) {
            let lo = bytes.pop_front().unwrap_or(0);
            let hi = bytes.pop_front().unwrap_or(0);
            *sample = i16::from_le_bytes([lo, hi]);
        }

        if n < out.len() {
            for sample in out.iter_mut().skip(n) {
                *sample = 0;
            }
            self.underrun_fills.fetch_add(1, Ordering::Relaxed);
        }

        n
    }

    /// Discard all buffered, not-yet-played bytes
    pub fn clear(&self) {
        self.bytes.lock().clear();
    }

    /// Current buffered byte count
    pub fn len(&self) -> usize {
        self.bytes.lock().len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    /// Get buffer capacity in bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total bytes dropped to overflow since creation
    pub fn overflow_bytes(&self) -> usize {
        self.overflow_bytes.load(Ordering::Relaxed)
    }

    /// Number of reads that had to fill silence
    pub fn underrun_fills(&self) -> usize {
        self.underrun_fills.load(Ordering::Relaxed)
    }

    /// Get fill level as percentage
    pub fn fill_level(&self) -> f32 {
        self.len() as f32 / self.capacity as f32
    }
}

/// Thread-safe handle to a PCM ring
pub type SharedPcmRing = Arc<PcmRing>;

/// Create a new shared PCM ring
pub fn create_shared_ring(capacity: usize) -> SharedPcmRing {
    Arc::new(PcmRing::new(capacity))
}

/// Producer-facing enqueue/clear surface over a shared ring.
///
/// Adds the empty-chunk guard on top of the raw ring: zero-length chunks
/// are logged, counted, and ignored rather than appended.
pub struct PlaybackQueue {
    ring: SharedPcmRing,
    empty_chunks: AtomicUsize,
}

impl PlaybackQueue {
    pub fn new(ring: SharedPcmRing) -> Self {
        Self {
            ring,
            empty_chunks: AtomicUsize::new(0),
        }
    }

    /// Append a chunk of PCM bytes for playback.
    ///
    /// Empty chunks are a recoverable producer hiccup: warn once per
    /// occurrence and leave the buffer untouched.
    pub fn enqueue(&self, chunk: Bytes) {
        if chunk.is_empty() {
            self.empty_chunks.fetch_add(1, Ordering::Relaxed);
            tracing::warn!("received empty audio chunk, ignoring");
            return;
        }

        self.ring.push(&chunk);
    }

    /// Drop all pending unplayed audio (barge-in)
    pub fn clear(&self) {
        self.ring.clear();
    }

    /// Bytes currently queued and not yet drained
    pub fn pending_bytes(&self) -> usize {
        self.ring.len()
    }

    /// Number of empty chunks rejected so far
    pub fn empty_chunk_count(&self) -> usize {
        self.empty_chunks.load(Ordering::Relaxed)
    }

    /// Shared ring backing this queue
    pub fn ring(&self) -> &SharedPcmRing {
        &self.ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_push_then_read_order() {
        let ring = PcmRing::new(64);
        ring.push(&[0x01, 0x00, 0x02, 0x00, 0x03, 0x00]);

        let mut out = [0i16; 3];
        let n = ring.read_samples(&mut out);
        assert_eq!(n, 3);
        assert_eq!(out, [1, 2, 3]);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_underrun_fills_silence() {
        let ring = PcmRing::new(64);
        ring.push(&[0x05, 0x00]);

        let mut out = [7i16; 4];
        let n = ring.read_samples(&mut out);
        assert_eq!(n, 1);
        assert_eq!(out, [5, 0, 0, 0]);
        assert_eq!(ring.underrun_fills(), 1);
    }

    #[test]
    fn test_partial_sample_carried_until_pair_arrives() {
        let ring = PcmRing::new(64);
        ring.push(&[0x34]);

        let mut out = [1i16; 1];
        assert_eq!(ring.read_samples(&mut out), 0);
        assert_eq!(out, [0]);
        assert_eq!(ring.len(), 1);

        ring.push(&[0x12]);
        assert_eq!(ring.read_samples(&mut out), 1);
        assert_eq!(out, [0x1234]);
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let ring = PcmRing::new(4);
        ring.push(&[0x01, 0x00, 0x02, 0x00]);
        ring.push(&[0x03, 0x00]);

        assert_eq!(ring.len(), 4);
        assert_eq!(ring.overflow_bytes(), 2);

        let mut out = [0i16; 2];
        ring.read_samples(&mut out);
        assert_eq!(out, [2, 3]);
    }

    #[test]
    fn test_clear_discards_pending() {
        let ring = PcmRing::new(64);
        ring.push(&[0xAA; 32]);
        assert_eq!(ring.len(), 32);

        ring.clear();
        assert!(ring.is_empty());

        let mut out = [9i16; 2];
        assert_eq!(ring.read_samples(&mut out), 0);
        assert_eq!(out, [0, 0]);
    }

    #[test]
    fn test_enqueue_empty_chunk_is_counted_noop() {
        let queue = PlaybackQueue::new(create_shared_ring(64));
        queue.enqueue(Bytes::new());

        assert_eq!(queue.empty_chunk_count(), 1);
        assert_eq!(queue.pending_bytes(), 0);

        queue.enqueue(Bytes::new());
        assert_eq!(queue.empty_chunk_count(), 2);
    }

    #[test]
    fn test_enqueue_then_clear_leaves_nothing_pending() {
        let queue = PlaybackQueue::new(create_shared_ring(1024));
        queue.enqueue(Bytes::from_static(&[0x01, 0x02, 0x03, 0x04]));
        assert_eq!(queue.pending_bytes(), 4);

        queue.clear();
        assert_eq!(queue.pending_bytes(), 0);
    }

    #[test]
    fn test_enqueue_does_not_require_sample_alignment() {
        let queue = PlaybackQueue::new(create_shared_ring(64));
        queue.enqueue(Bytes::from_static(&[0x01, 0x02, 0x03]));
        assert_eq!(queue.pending_bytes(), 3);
        assert_eq!(queue.empty_chunk_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_ring_never_exceeds_capacity(
            chunks in proptest::collection::vec(
                proptest::collection::vec(any::<u8>(), 0..64), 0..32),
            capacity in 2usize..128,
        ) {
            let ring = PcmRing::new(capacity);
            for chunk in &chunks {
                ring.push(chunk);
                prop_assert!(ring.len() <= capacity);
            }
        }

        #[test]
        fn prop_read_preserves_byte_order(
            data in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let ring = PcmRing::new(1024);
            ring.push(&data);

            let mut out = vec![0i16; data.len() / 2];
            let n = ring.read_samples(&mut out);
            prop_assert_eq!(n, data.len() / 2);

            for (i, sample) in out.iter().enumerate() {
                let expected = i16::from_le_bytes([data[2 * i], data[2 * i + 1]]);
                prop_assert_eq!(*sample, expected);
            }
            // At most one unpaired byte remains
            prop_assert_eq!(ring.len(), data.len() % 2);
        }
    }
}
