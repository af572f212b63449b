//! A fixed-capacity blocking MPMC buffer.
//!
//! [`BoundedBuffer`] is a ring buffer guarded by a single mutex and two
//! condition variables. Any number of threads may push and pop through a
//! shared reference: producers block while the buffer is full, consumers
//! block while it is empty, and [`try_pop`](BoundedBuffer::try_pop) bounds
//! the wait with a timeout.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use nexus_buffer::BoundedBuffer;
//!
//! let buffer = Arc::new(BoundedBuffer::<u64>::new(16).unwrap());
//!
//! let producer = {
//!     let buffer = Arc::clone(&buffer);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             buffer.push(i); // blocks while full
//!         }
//!     })
//! };
//!
//! let mut sum = 0;
//! for _ in 0..100 {
//!     sum += buffer.pop(); // blocks while empty
//! }
//!
//! producer.join().unwrap();
//! assert_eq!(sum, 99 * 100 / 2);
//! ```
//!
//! # How It Works
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Mutex<Ring<T>>   head, tail, len, slots                  │
//! ├──────────────────────────────────────────────────────────┤
//! │ not_full  (Condvar)  pushers wait here while len == cap  │
//! │ not_empty (Condvar)  poppers wait here while len == 0    │
//! └──────────────────────────────────────────────────────────┘
//!
//! push: lock -> while full { wait(not_full) } -> write tail -> notify_one(not_empty)
//! pop:  lock -> while empty { wait(not_empty) } -> take head -> notify_one(not_full)
//! ```
//!
//! Waiting atomically releases the lock and reacquires it on wake. Every
//! wake re-checks the predicate, which covers spurious wakeups and the case
//! where another thread claimed the slot or item first. Each successful
//! operation wakes at most one waiter on the opposite side.
//!
//! The lock is the only authority over `head`, `tail` and `len`. There are
//! no atomic shortcuts, so the observers ([`len`](BoundedBuffer::len),
//! [`is_full`](BoundedBuffer::is_full), ...) take the lock too and return a
//! snapshot that may be stale as soon as they return.
//!
//! # Ordering
//!
//! Items leave in the order they entered, across all threads. Concurrent
//! pushers are ordered by who acquires the lock first; there is no stronger
//! fairness guarantee between threads.
//!
//! # Timeouts
//!
//! [`try_pop`](BoundedBuffer::try_pop) computes its deadline once, on entry.
//! Spurious wakeups, or wakeups that lose the race for an item to another
//! consumer, go back to waiting on the same absolute deadline rather than
//! restarting the clock:
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use nexus_buffer::{BoundedBuffer, PopTimeoutError};
//!
//! let buffer = BoundedBuffer::<u64>::new(4).unwrap();
//!
//! let start = Instant::now();
//! assert_eq!(buffer.try_pop(Duration::from_millis(20)), Err(PopTimeoutError));
//! assert!(start.elapsed() >= Duration::from_millis(20));
//! ```
//!
//! # Non-blocking and Timed Pushes
//!
//! ```
//! use std::time::Duration;
//!
//! use nexus_buffer::{BoundedBuffer, PushTimeoutError, TryPopError, TryPushError};
//!
//! let buffer = BoundedBuffer::new(1).unwrap();
//!
//! buffer.try_push(1).unwrap();
//! assert_eq!(buffer.try_push(2), Err(TryPushError::Full(2)));
//! assert_eq!(
//!     buffer.push_timeout(3, Duration::from_millis(10)),
//!     Err(PushTimeoutError(3))
//! );
//!
//! assert_eq!(buffer.try_pop_now(), Ok(1));
//! assert_eq!(buffer.try_pop_now(), Err(TryPopError::Empty));
//! ```
//!
//! # Tracing
//!
//! With the `tracing` feature enabled the buffer emits a `debug` event on
//! construction and `trace` events whenever a caller starts waiting. Use
//! [`init_tracing`] to install a subscriber filtered by `RUST_LOG`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod ring;
mod trace;

use std::fmt;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use ring::Ring;
use trace::{debug, trace};

pub use error::{CapacityError, PopTimeoutError, PushTimeoutError, TryPopError, TryPushError};
pub use trace::init_tracing;

/// A fixed-capacity, thread-safe, blocking FIFO buffer.
///
/// Share it between producer and consumer threads by reference (for
/// example with [`std::thread::scope`]) or through an [`Arc`](std::sync::Arc).
/// All operations take `&self`.
///
/// # Example
///
/// ```
/// use std::thread;
///
/// use nexus_buffer::BoundedBuffer;
///
/// let buffer = BoundedBuffer::new(2).unwrap();
///
/// thread::scope(|s| {
///     s.spawn(|| {
///         for c in ['a', 'b', 'c', 'd'] {
///             buffer.push(c);
///         }
///     });
///
///     let received: String = (0..4).map(|_| buffer.pop()).collect();
///     assert_eq!(received, "abcd");
/// });
/// ```
pub struct BoundedBuffer<T> {
    ring: Mutex<Ring<T>>,
    /// Signalled when `len` decreases.
    not_full: Condvar,
    /// Signalled when `len` increases.
    not_empty: Condvar,
    capacity: usize,
}

impl<T> BoundedBuffer<T> {
    /// Creates a buffer holding at most `capacity` items.
    ///
    /// Storage for all `capacity` slots is allocated up front.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_buffer::{BoundedBuffer, CapacityError};
    ///
    /// let buffer = BoundedBuffer::<char>::new(40).unwrap();
    /// assert_eq!(buffer.capacity(), 40);
    ///
    /// assert_eq!(BoundedBuffer::<char>::new(0).unwrap_err(), CapacityError);
    /// ```
    pub fn new(capacity: usize) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError);
        }

        debug!(capacity, "bounded buffer created");

        Ok(Self {
            ring: Mutex::new(Ring::with_capacity(capacity)),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
        })
    }

    /// Pushes a value, blocking while the buffer is full.
    ///
    /// Wakes one consumer blocked in [`pop`](Self::pop) or
    /// [`try_pop`](Self::try_pop), if any.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_buffer::BoundedBuffer;
    ///
    /// let buffer = BoundedBuffer::new(2).unwrap();
    ///
    /// buffer.push(1);
    /// buffer.push(2);
    /// // buffer.push(3) would block here until another thread pops.
    ///
    /// assert!(buffer.is_full());
    /// ```
    pub fn push(&self, value: T) {
        let mut ring = self.ring.lock();
        let mut val = value;

        loop {
            match ring.push(val) {
                Ok(()) => {
                    self.not_empty.notify_one();
                    return;
                }
                Err(v) => val = v,
            }

            trace!(capacity = self.capacity, "buffer full, waiting for a free slot");
            self.not_full.wait(&mut ring);
        }
    }

    /// Removes the oldest value, blocking while the buffer is empty.
    ///
    /// Wakes one producer blocked in [`push`](Self::push) or
    /// [`push_timeout`](Self::push_timeout), if any.
    ///
    /// # Example
    ///
    /// ```
    /// use std::thread;
    ///
    /// use nexus_buffer::BoundedBuffer;
    ///
    /// let buffer = BoundedBuffer::new(4).unwrap();
    ///
    /// thread::scope(|s| {
    ///     s.spawn(|| buffer.push(42));
    ///     assert_eq!(buffer.pop(), 42);
    /// });
    /// ```
    pub fn pop(&self) -> T {
        let mut ring = self.ring.lock();

        loop {
            if let Some(v) = ring.pop() {
                self.not_full.notify_one();
                return v;
            }

            trace!(capacity = self.capacity, "buffer empty, waiting for an item");
            self.not_empty.wait(&mut ring);
        }
    }

    /// Removes the oldest value, waiting at most `wait` for one to arrive.
    ///
    /// The deadline is fixed when the call starts. A zero `wait` polls
    /// without blocking. A `wait` too large to add to [`Instant::now`] waits
    /// indefinitely, like [`pop`](Self::pop).
    ///
    /// # Errors
    ///
    /// Returns [`PopTimeoutError`] if the buffer is still empty when the
    /// deadline passes. The buffer is left untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use nexus_buffer::{BoundedBuffer, PopTimeoutError};
    ///
    /// let buffer = BoundedBuffer::new(4).unwrap();
    /// assert_eq!(buffer.try_pop(Duration::ZERO), Err(PopTimeoutError));
    ///
    /// buffer.push('x');
    /// assert_eq!(buffer.try_pop(Duration::from_secs(3)), Ok('x'));
    /// ```
    pub fn try_pop(&self, wait: Duration) -> Result<T, PopTimeoutError> {
        match Instant::now().checked_add(wait) {
            Some(deadline) => self.pop_deadline(deadline),
            None => Ok(self.pop()),
        }
    }

    /// Removes the oldest value, waiting until `deadline` for one to arrive.
    ///
    /// A deadline already in the past polls without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`PopTimeoutError`] if the buffer is still empty at
    /// `deadline`. The buffer is left untouched.
    pub fn pop_deadline(&self, deadline: Instant) -> Result<T, PopTimeoutError> {
        let mut ring = self.ring.lock();

        loop {
            if let Some(v) = ring.pop() {
                self.not_full.notify_one();
                return Ok(v);
            }

            if Instant::now() >= deadline {
                return Err(PopTimeoutError);
            }

            trace!(
                capacity = self.capacity,
                "buffer empty, waiting for an item until deadline"
            );
            self.not_empty.wait_until(&mut ring, deadline);
        }
    }

    /// Removes the oldest value without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`TryPopError::Empty`] if no value is buffered.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_buffer::{BoundedBuffer, TryPopError};
    ///
    /// let buffer = BoundedBuffer::new(4).unwrap();
    /// assert_eq!(buffer.try_pop_now(), Err(TryPopError::Empty));
    ///
    /// buffer.push(1);
    /// assert_eq!(buffer.try_pop_now(), Ok(1));
    /// ```
    pub fn try_pop_now(&self) -> Result<T, TryPopError> {
        let mut ring = self.ring.lock();

        match ring.pop() {
            Some(v) => {
                self.not_full.notify_one();
                Ok(v)
            }
            None => Err(TryPopError::Empty),
        }
    }

    /// Pushes a value without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`TryPushError::Full`] with the value if every slot is
    /// occupied.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_buffer::{BoundedBuffer, TryPushError};
    ///
    /// let buffer = BoundedBuffer::new(1).unwrap();
    ///
    /// assert!(buffer.try_push(1).is_ok());
    /// assert!(matches!(buffer.try_push(2), Err(TryPushError::Full(2))));
    /// ```
    pub fn try_push(&self, value: T) -> Result<(), TryPushError<T>> {
        let mut ring = self.ring.lock();

        match ring.push(value) {
            Ok(()) => {
                self.not_empty.notify_one();
                Ok(())
            }
            Err(v) => Err(TryPushError::Full(v)),
        }
    }

    /// Pushes a value, waiting at most `wait` for a free slot.
    ///
    /// Follows the same deadline rules as [`try_pop`](Self::try_pop).
    ///
    /// # Errors
    ///
    /// Returns [`PushTimeoutError`] with the value if the buffer is still
    /// full when the deadline passes.
    pub fn push_timeout(&self, value: T, wait: Duration) -> Result<(), PushTimeoutError<T>> {
        match Instant::now().checked_add(wait) {
            Some(deadline) => self.push_deadline(value, deadline),
            None => {
                self.push(value);
                Ok(())
            }
        }
    }

    /// Pushes a value, waiting until `deadline` for a free slot.
    ///
    /// # Errors
    ///
    /// Returns [`PushTimeoutError`] with the value if the buffer is still
    /// full at `deadline`.
    pub fn push_deadline(&self, value: T, deadline: Instant) -> Result<(), PushTimeoutError<T>> {
        let mut ring = self.ring.lock();
        let mut val = value;

        loop {
            match ring.push(val) {
                Ok(()) => {
                    self.not_empty.notify_one();
                    return Ok(());
                }
                Err(v) => val = v,
            }

            if Instant::now() >= deadline {
                return Err(PushTimeoutError(val));
            }

            trace!(
                capacity = self.capacity,
                "buffer full, waiting for a free slot until deadline"
            );
            self.not_full.wait_until(&mut ring, deadline);
        }
    }

    /// Returns the maximum number of values the buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of buffered values.
    ///
    /// The value is a snapshot taken under the lock and may change as soon
    /// as this returns.
    pub fn len(&self) -> usize {
        self.ring.lock().len()
    }

    /// Returns `true` if no values are buffered.
    ///
    /// Snapshot only; see [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.ring.lock().is_empty()
    }

    /// Returns `true` if every slot is occupied.
    ///
    /// Snapshot only; see [`len`](Self::len).
    pub fn is_full(&self) -> bool {
        self.ring.lock().is_full()
    }
}

impl<T> fmt::Debug for BoundedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedBuffer")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<T> IntoIterator for BoundedBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the buffer, yielding the remaining values oldest first.
    ///
    /// Owning the buffer proves no other thread can still be using it.
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            ring: self.ring.into_inner(),
        }
    }
}

/// An iterator over the values left in a [`BoundedBuffer`], oldest first.
///
/// Created by [`BoundedBuffer::into_iter`].
///
/// # Example
///
/// ```
/// use nexus_buffer::BoundedBuffer;
///
/// let buffer = BoundedBuffer::new(4).unwrap();
/// buffer.push(1);
/// buffer.push(2);
/// buffer.push(3);
/// assert_eq!(buffer.pop(), 1);
///
/// let rest: Vec<_> = buffer.into_iter().collect();
/// assert_eq!(rest, [2, 3]);
/// ```
pub struct IntoIter<T> {
    ring: Ring<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.ring.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.ring.len();
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &self.ring.len())
            .finish_non_exhaustive()
    }
}
