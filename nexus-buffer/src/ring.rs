//! The ring storage behind a [`BoundedBuffer`](crate::BoundedBuffer).
//!
//! A single fixed-length allocation of `capacity` slots:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │ head - next slot to pop                               │
//! │ tail - next slot to push                              │
//! │ len  - occupied slots, 0 <= len <= capacity           │
//! ├───────────────────────────────────────────────────────┤
//! │ slots: [Option<T>; capacity]                          │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! Occupied slots are `head, head + 1, ..., head + len - 1` (mod capacity).
//! `head == tail` holds both when empty and when full, so `len` is what
//! tells the two apart.
//!
//! `Ring` is not synchronized. The buffer keeps it behind its mutex and
//! never touches it without holding the lock.

pub(crate) struct Ring<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> Ring<T> {
    /// Allocates a ring with exactly `capacity` empty slots.
    ///
    /// Callers validate `capacity > 0` first.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0);

        Self {
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Writes `value` at `tail` and advances it.
    ///
    /// Returns the value back if every slot is occupied.
    pub(crate) fn push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }

        debug_assert!(self.slots[self.tail].is_none());
        self.slots[self.tail] = Some(value);
        self.tail = self.advance(self.tail);
        self.len += 1;
        Ok(())
    }

    /// Takes the value at `head` and advances it.
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = self.slots[self.head].take();
        debug_assert!(value.is_some());
        self.head = self.advance(self.head);
        self.len -= 1;
        value
    }

    #[inline]
    fn advance(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.slots.len() { 0 } else { next }
    }
}
