//! Lock-free SPSC element queue.
//!
//! The only state shared between the two threads of the keyer. The
//! input-event thread pushes decoded elements at the tail; the render
//! thread pops them from the head inside its deadline-bound callback.
//!
//! # Rules
//!
//! - Exactly one producer and one consumer (enforced by design, not by the
//!   type system)
//! - `try_pop` never blocks, never allocates, O(1)
//! - All coordination through atomic operations with acquire/release
//!   ordering: a push that completes before a pop attempt is visible to it

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::morse::{Element, MorseSymbol};

/// Default queue capacity in elements.
///
/// A letter expands to at most five elements including its terminating
/// break, so 256 covers dozens of letters of type-ahead.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Bounded lock-free single-producer/single-consumer element ring.
///
/// # Safety
///
/// This type uses `UnsafeCell` internally but is safe to use because:
/// - The producer writes a slot before publishing it with a `Release`
///   store of the tail index
/// - The consumer reads the tail with `Acquire` before touching the slot,
///   so it observes the completed write
/// - Head and tail each have a single writer, so no slot is ever aliased
///   mutably
pub struct ElementQueue<const N: usize = DEFAULT_QUEUE_CAPACITY> {
    /// Ring of element slots
    slots: UnsafeCell<[Element; N]>,

    /// Next read index (monotonically increasing, wraps via mask)
    head: AtomicUsize,

    /// Next write index (monotonically increasing, wraps via mask)
    tail: AtomicUsize,
}

// SAFETY: single producer, single consumer, atomic coordination; see the
// type-level safety notes.
unsafe impl<const N: usize> Sync for ElementQueue<N> {}
unsafe impl<const N: usize> Send for ElementQueue<N> {}

impl<const N: usize> ElementQueue<N> {
    /// Mask for wrapping an index to the ring size.
    const MASK: usize = N - 1;

    /// Create a new empty queue.
    ///
    /// # Panics
    ///
    /// Panics if N is not a power of 2.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "queue capacity must be a power of 2");

        Self {
            slots: UnsafeCell::new([Element::Dit; N]),
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Append one element at the tail. Producer side only.
    ///
    /// Returns `false` without enqueuing when the ring is full; the caller
    /// reports and drops. Never blocks.
    #[inline]
    pub fn push(&self, element: Element) -> bool {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        if tail.wrapping_sub(head) == N {
            return false;
        }

        // SAFETY: only the producer writes slots at `tail`, and the slot is
        // outside the consumer's published window until the store below.
        unsafe {
            (*self.slots.get())[tail & Self::MASK] = element;
        }
        self.tail.store(tail.wrapping_add(1), Ordering::Release);
        true
    }

    /// Remove and return the head element without blocking. Consumer side
    /// only.
    ///
    /// Returns `None` when no element is available; an empty queue is the
    /// idle state, not an error.
    #[inline]
    pub fn try_pop(&self) -> Option<Element> {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        if tail == head {
            return None;
        }

        // SAFETY: the Acquire load above guarantees the producer's write of
        // this slot is visible, and the producer cannot reuse it until the
        // store below publishes the new head.
        let element = unsafe { (*self.slots.get())[head & Self::MASK] };
        self.head.store(head.wrapping_add(1), Ordering::Release);
        Some(element)
    }

    /// Expand a symbol into its primitive elements and enqueue them in
    /// playback order, terminated by the letter break. The rest-only
    /// symbol enqueues a single word break.
    ///
    /// Returns the number of elements enqueued, or 0 when the ring lacks
    /// room for the whole letter (nothing is enqueued in that case, so a
    /// letter is never truncated mid-pattern).
    pub fn push_symbol(&self, symbol: MorseSymbol) -> usize {
        let needed = if symbol.is_rest() {
            1
        } else {
            symbol.remaining() as usize + 1
        };
        if N - self.len() < needed {
            return 0;
        }

        if symbol.is_rest() {
            self.push(Element::WordBreak);
        } else {
            for element in symbol.elements() {
                self.push(element);
            }
            self.push(Element::LetterBreak);
        }
        needed
    }

    /// Number of elements currently queued.
    ///
    /// Racy by nature across threads; exact from the calling side's own
    /// perspective.
    #[inline]
    pub fn len(&self) -> usize {
        self.tail
            .load(Ordering::Acquire)
            .wrapping_sub(self.head.load(Ordering::Acquire))
    }

    /// Whether the queue is currently empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ring capacity in elements.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for ElementQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
