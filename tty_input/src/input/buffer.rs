// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte accumulator for bytes that have arrived but are not yet part of an event.
//!
//! The [`ByteAccumulator`] type owns the storage and position tracking so the decoder
//! only ever deals with "the unconsumed bytes" and "consume N of them".

use smallvec::SmallVec;

/// Inline capacity of the accumulator.
///
/// Between feeds the unconsumed tail is at most one incomplete form (the longest known
/// key form, a partial mouse report, or an unknown CSI sequence up to its lookahead
/// bound), so a single read chunk is the common upper bound on what is stored.
pub const ACCUMULATOR_INLINE_CAPACITY: usize = 256;

/// Read granularity used by the async driver when pulling from an `AsyncRead`.
pub const STDIN_READ_BUFFER_SIZE: usize = 256;

/// Bytes awaiting decoding.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │ data: [consumed bytes...][unconsumed bytes...]              │
/// │                          ^                                  │
/// │                          position                           │
/// └─────────────────────────────────────────────────────────────┘
/// ```
///
/// - Bytes before `position` are already part of an event, or were discarded.
/// - Bytes from `position` onward are pending.
/// - The consumed prefix is dropped once everything is consumed, or once `position`
///   passes half the inline capacity.
#[derive(Debug, Default)]
pub struct ByteAccumulator {
    data: SmallVec<[u8; ACCUMULATOR_INLINE_CAPACITY]>,
    position: usize,
}

impl ByteAccumulator {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// The bytes not yet consumed, in arrival order.
    #[must_use]
    pub fn unconsumed(&self) -> &[u8] { &self.data[self.position..] }

    /// Number of unconsumed bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.data.len() - self.position }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn append(&mut self, bytes: &[u8]) { self.data.extend_from_slice(bytes); }

    /// Mark the first `count` unconsumed bytes as part of an event. Clamped to what is
    /// available.
    pub fn consume(&mut self, count: usize) {
        self.position += count.min(self.len());

        if self.position == self.data.len() {
            self.data.clear();
            self.position = 0;
        } else if self.position > ACCUMULATOR_INLINE_CAPACITY / 2 {
            self.data.drain(..self.position);
            self.position = 0;
        }
    }

    /// Drop the first `count` unconsumed bytes without producing an event. Returns how
    /// many were actually dropped.
    pub fn discard(&mut self, count: usize) -> usize {
        let count = count.min(self.len());
        self.consume(count);
        count
    }

    /// Drop everything. Returns the number of unconsumed bytes that were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.len();
        self.data.clear();
        self.position = 0;
        dropped
    }

    #[cfg(test)]
    fn position(&self) -> usize { self.position }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_accumulator_is_empty() {
        let accumulator = ByteAccumulator::new();
        assert!(accumulator.is_empty());
        assert_eq!(accumulator.len(), 0);
        assert_eq!(accumulator.position(), 0);
        assert!(accumulator.unconsumed().is_empty());
    }

    #[test]
    fn test_append_keeps_arrival_order() {
        let mut accumulator = ByteAccumulator::new();
        accumulator.append(b"\x1b[");
        accumulator.append(b"1;2P");
        assert_eq!(accumulator.unconsumed(), b"\x1b[1;2P");
        assert_eq!(accumulator.len(), 6);
    }

    #[test]
    fn test_consume_updates_position() {
        let mut accumulator = ByteAccumulator::new();
        accumulator.append(b"hello world");
        accumulator.consume(6);
        assert_eq!(accumulator.unconsumed(), b"world");
        assert_eq!(accumulator.position(), 6);
    }

    #[test]
    fn test_consuming_everything_resets_storage() {
        let mut accumulator = ByteAccumulator::new();
        accumulator.append(b"abc");
        accumulator.consume(3);
        assert!(accumulator.is_empty());
        assert_eq!(accumulator.position(), 0);
    }

    #[test]
    fn test_compaction_on_threshold() {
        let mut accumulator = ByteAccumulator::new();
        accumulator.append(&[b'x'; ACCUMULATOR_INLINE_CAPACITY]);
        accumulator.consume(ACCUMULATOR_INLINE_CAPACITY / 2 + 10);

        assert_eq!(accumulator.position(), 0);
        assert_eq!(accumulator.len(), ACCUMULATOR_INLINE_CAPACITY / 2 - 10);
    }

    #[test]
    fn test_discard_and_clear_are_clamped() {
        let mut accumulator = ByteAccumulator::new();
        accumulator.append(b"\x1b[12");
        assert_eq!(accumulator.discard(10), 4);
        assert!(accumulator.is_empty());

        accumulator.append(b"xyz");
        assert_eq!(accumulator.clear(), 3);
        assert_eq!(accumulator.clear(), 0);
    }
}
