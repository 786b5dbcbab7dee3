//! Software overflow queue for TPDO frames.
//!
//! When every hardware transmit mailbox is busy, pending TPDO frames are
//! parked here and re-submitted from the transmit-complete interrupt.
//!
//! The queue is lock-free and supports exactly one producer (task context,
//! inside `send`) and one consumer (interrupt context, inside the completion
//! handler):
//!
//! - `produced` is only written by the producer, `consumed` only by the consumer;
//! - a slot is fully written before the `produced` index exposing it is
//!   published with `Release`, and the consumer reads it after an `Acquire` load.
//!
//! # Overflow policy
//!
//! Capacity equals the mailbox count. `produced == consumed` means empty, so
//! at most `N - 1` distinct frames can be queued. A push that wraps
//! `produced` onto `consumed` is reported as [`PushOutcome::Overflowed`]: the
//! frame is still stored, but the queue reads as empty afterwards and the
//! frames that were waiting are lost. This is a lossy, best-effort policy for
//! sustained overload, not a delivery guarantee.
use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU8, Ordering};

use crate::driver::can_frame::CanFrame;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Result of [`OverflowQueue::push`].
pub enum PushOutcome {
    /// Frame stored and visible to the consumer.
    Queued,
    /// The produced index wrapped onto the consumed index; undrained frames were dropped.
    Overflowed,
}

/// Bounded single-producer/single-consumer ring of CAN frames.
pub struct OverflowQueue<const N: usize> {
    slots: [UnsafeCell<CanFrame>; N],
    produced: AtomicU8,
    consumed: AtomicU8,
}

// Safety: the producer only writes the slot at `produced + 1`, which is never
// in the consumer's readable range `(consumed, produced]`; each index has a
// single writer. Callers uphold one producer context and one consumer context.
unsafe impl<const N: usize> Sync for OverflowQueue<N> {}

impl<const N: usize> OverflowQueue<N> {
    const _ASSERT_CAPACITY: () = assert!(N >= 2 && N <= u8::MAX as usize);

    /// Empty queue; `const` so it can be embedded in a `static` driver.
    pub const fn new() -> Self {
        let () = Self::_ASSERT_CAPACITY;
        Self {
            slots: [const { UnsafeCell::new(CanFrame::EMPTY) }; N],
            produced: AtomicU8::new(0),
            consumed: AtomicU8::new(0),
        }
    }

    #[inline]
    const fn next(index: u8) -> u8 {
        let next = index as usize + 1;
        if next == N {
            0
        } else {
            next as u8
        }
    }

    /// Append a frame. Producer side only.
    pub fn push(&self, frame: &CanFrame) -> PushOutcome {
        let produced = self.produced.load(Ordering::Relaxed);
        let next = Self::next(produced);

        // Safety: slot `next` is outside the consumer's readable range.
        unsafe { *self.slots[next as usize].get() = *frame };
        self.produced.store(next, Ordering::Release);

        if next == self.consumed.load(Ordering::Acquire) {
            PushOutcome::Overflowed
        } else {
            PushOutcome::Queued
        }
    }

    /// Remove the oldest visible frame. Consumer side only.
    pub fn pop(&self) -> Option<CanFrame> {
        let consumed = self.consumed.load(Ordering::Relaxed);
        if consumed == self.produced.load(Ordering::Acquire) {
            return None;
        }
        let next = Self::next(consumed);

        // Safety: slot `next` was published by the `Acquire`d produced index.
        let frame = unsafe { *self.slots[next as usize].get() };
        self.consumed.store(next, Ordering::Release);
        Some(frame)
    }

    /// Number of frames currently visible to the consumer.
    pub fn len(&self) -> usize {
        let produced = self.produced.load(Ordering::Acquire) as usize;
        let consumed = self.consumed.load(Ordering::Acquire) as usize;
        (produced + N - consumed) % N
    }

    /// `true` when no frame is waiting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots (one more than the number of distinct frames it can hold).
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for OverflowQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
