//! Fixed-capacity single-producer / single-consumer FIFO used on every path
//! that crosses from interrupt context into the poll loop (and back).
//!
//! The buffer itself is only storage. [`RingBuffer::split`] hands out one
//! [`Producer`] and one [`Consumer`]; each owns exactly one cursor:
//!
//! * the producer is the only writer of `write` and only reads `read`;
//! * the consumer is the only writer of `read` and only reads `write`.
//!
//! A slot is filled before `write` is published with `Release`, and the
//! consumer loads `write` with `Acquire` before touching the slot, so a
//! partially written slot is never observed. Only loads and stores are used,
//! no read-modify-write, which keeps the queue usable on cores without CAS.
//!
//! # Overflow policy
//!
//! **Reject newest.** Pushing into a full buffer returns `false` and drops the
//! offered item; queued items are never touched. The same policy applies to
//! every instance in the bridge (USB in/out, CAN in/out).
use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicUsize, Ordering};

//==================================================================================RING_BUFFER
/// Statically sized circular queue of `N` slots, all of them usable.
///
/// Cursors run modulo `2 * N` so that "full" (`write - read == N`) and
/// "empty" (`write == read`) stay distinguishable for any `N`.
pub struct RingBuffer<T, const N: usize> {
    slots: [UnsafeCell<MaybeUninit<T>>; N],
    read: AtomicUsize,
    write: AtomicUsize,
}

// The producer/consumer split guarantees each slot is accessed by one side at a time.
unsafe impl<T: Send, const N: usize> Sync for RingBuffer<T, N> {}

impl<T, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> RingBuffer<T, N> {
    const NON_ZERO: () = assert!(N > 0, "ring buffer capacity must be at least 1");

    /// Create an empty buffer. Usable in `static` initializers.
    pub const fn new() -> Self {
        let () = Self::NON_ZERO;
        Self {
            slots: [const { UnsafeCell::new(MaybeUninit::uninit()) }; N],
            read: AtomicUsize::new(0),
            write: AtomicUsize::new(0),
        }
    }

    /// Fixed capacity, in items.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of queued items as seen at the time of the call.
    #[inline]
    pub fn len(&self) -> usize {
        occupancy::<N>(
            self.read.load(Ordering::Acquire),
            self.write.load(Ordering::Acquire),
        )
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == N
    }

    /// Split into the two endpoints. Borrowing `&mut self` ensures at most one
    /// producer and one consumer exist at any time.
    pub fn split(&mut self) -> (Producer<'_, T, N>, Consumer<'_, T, N>) {
        let buffer: &Self = self;
        (Producer { buffer }, Consumer { buffer })
    }
}

impl<T, const N: usize> Drop for RingBuffer<T, N> {
    fn drop(&mut self) {
        let mut read = *self.read.get_mut();
        let write = *self.write.get_mut();
        while read != write {
            // SAFETY: slots between `read` and `write` hold initialized items.
            unsafe { self.slots[read % N].get_mut().assume_init_drop() };
            read = advance::<N>(read);
        }
    }
}

#[inline]
const fn advance<const N: usize>(cursor: usize) -> usize {
    if cursor + 1 == 2 * N {
        0
    } else {
        cursor + 1
    }
}

#[inline]
const fn occupancy<const N: usize>(read: usize, write: usize) -> usize {
    if write >= read {
        write - read
    } else {
        write + 2 * N - read
    }
}

//==================================================================================PRODUCER
/// Write endpoint, typically owned by an interrupt handler.
pub struct Producer<'a, T, const N: usize> {
    buffer: &'a RingBuffer<T, N>,
}

unsafe impl<T: Send, const N: usize> Send for Producer<'_, T, N> {}

impl<T, const N: usize> Producer<'_, T, N> {
    /// Enqueue `item`. Returns `false` (and drops `item`) when the buffer is full.
    pub fn try_push(&mut self, item: T) -> bool {
        let write = self.buffer.write.load(Ordering::Relaxed);
        let read = self.buffer.read.load(Ordering::Acquire);
        if occupancy::<N>(read, write) == N {
            return false;
        }

        // SAFETY: the slot at `write` is outside the consumer's window until
        // the store below publishes it.
        unsafe { (*self.buffer.slots[write % N].get()).write(item) };
        self.buffer.write.store(advance::<N>(write), Ordering::Release);
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.buffer.is_full()
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

//==================================================================================CONSUMER
/// Read endpoint, typically owned by the poll loop.
pub struct Consumer<'a, T, const N: usize> {
    buffer: &'a RingBuffer<T, N>,
}

unsafe impl<T: Send, const N: usize> Send for Consumer<'_, T, N> {}

impl<T, const N: usize> Consumer<'_, T, N> {
    /// Dequeue the oldest item, if any.
    pub fn try_pop(&mut self) -> Option<T> {
        let read = self.buffer.read.load(Ordering::Relaxed);
        let write = self.buffer.write.load(Ordering::Acquire);
        if read == write {
            return None;
        }

        // SAFETY: the Acquire load above makes the producer's write visible,
        // and the producer will not reuse this slot until `read` moves past it.
        let item = unsafe { (*self.buffer.slots[read % N].get()).assume_init_read() };
        self.buffer.read.store(advance::<N>(read), Ordering::Release);
        Some(item)
    }

    /// Oldest item, left in place. Lets a transmit path pop only once the
    /// hardware has accepted the item.
    pub fn peek(&self) -> Option<&T> {
        let read = self.buffer.read.load(Ordering::Relaxed);
        let write = self.buffer.write.load(Ordering::Acquire);
        if read == write {
            return None;
        }

        // SAFETY: same as `try_pop`; `read` cannot move while `&self` is
        // borrowed because popping needs `&mut self`.
        Some(unsafe { (*self.buffer.slots[read % N].get()).assume_init_ref() })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}
