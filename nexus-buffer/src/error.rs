//! Error types returned by [`BoundedBuffer`](crate::BoundedBuffer).
//!
//! None of these are failures of the buffer itself. `CapacityError` rejects
//! a bad construction argument, and the rest report that a non-blocking or
//! timed operation could not complete. Errors from push operations hand the
//! rejected value back so the caller can retry or drop it.

use std::fmt;

use thiserror::Error;

/// Error returned by [`BoundedBuffer::new`](crate::BoundedBuffer::new) when
/// the requested capacity is zero.
///
/// A zero-capacity buffer could never accept an item, so every `push` would
/// block forever. The buffer is not created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("buffer capacity must be non-zero")]
pub struct CapacityError;

/// Error returned by [`BoundedBuffer::try_pop`](crate::BoundedBuffer::try_pop)
/// and [`BoundedBuffer::pop_deadline`](crate::BoundedBuffer::pop_deadline).
///
/// The deadline passed while the buffer was still empty. No state was
/// modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timed out waiting on an empty buffer")]
pub struct PopTimeoutError;

/// Error returned by [`BoundedBuffer::push_timeout`](crate::BoundedBuffer::push_timeout)
/// and [`BoundedBuffer::push_deadline`](crate::BoundedBuffer::push_deadline).
///
/// The deadline passed while the buffer was still full. Contains the value
/// that could not be pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushTimeoutError<T>(pub T);

impl<T> PushTimeoutError<T> {
    /// Returns the value that could not be pushed.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for PushTimeoutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timed out waiting on a full buffer")
    }
}

impl<T: fmt::Debug> std::error::Error for PushTimeoutError<T> {}

/// Error returned by [`BoundedBuffer::try_push`](crate::BoundedBuffer::try_push).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryPushError<T> {
    /// Every slot is occupied.
    ///
    /// The value is returned so it can be retried or handled.
    Full(T),
}

impl<T> TryPushError<T> {
    /// Returns the value that could not be pushed.
    pub fn into_inner(self) -> T {
        match self {
            TryPushError::Full(v) => v,
        }
    }

    /// Returns `true` if this error is the `Full` variant.
    pub fn is_full(&self) -> bool {
        matches!(self, TryPushError::Full(_))
    }
}

impl<T> fmt::Display for TryPushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryPushError::Full(_) => write!(f, "buffer full"),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for TryPushError<T> {}

/// Error returned by [`BoundedBuffer::try_pop_now`](crate::BoundedBuffer::try_pop_now).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TryPopError {
    /// No item is buffered.
    #[error("buffer empty")]
    Empty,
}

impl TryPopError {
    /// Returns `true` if this error is the `Empty` variant.
    pub fn is_empty(&self) -> bool {
        matches!(self, TryPopError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(CapacityError.to_string(), "buffer capacity must be non-zero");
        assert_eq!(
            PopTimeoutError.to_string(),
            "timed out waiting on an empty buffer"
        );
        assert_eq!(
            PushTimeoutError(7).to_string(),
            "timed out waiting on a full buffer"
        );
        assert_eq!(TryPushError::Full(7).to_string(), "buffer full");
        assert_eq!(TryPopError::Empty.to_string(), "buffer empty");
    }

    #[test]
    fn rejected_values_are_recoverable() {
        assert_eq!(PushTimeoutError(String::from("x")).into_inner(), "x");

        let err = TryPushError::Full(vec![1, 2, 3]);
        assert!(err.is_full());
        assert_eq!(err.into_inner(), vec![1, 2, 3]);
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}

        assert_error::<CapacityError>();
        assert_error::<PopTimeoutError>();
        assert_error::<PushTimeoutError<u64>>();
        assert_error::<TryPushError<u64>>();
        assert_error::<TryPopError>();
        assert!(TryPopError::Empty.is_empty());
    }
}
