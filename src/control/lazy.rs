//! Suspended computations with memoization.
//!
//! [`Lazy<T, F>`] wraps a zero-argument producer. The producer runs the
//! first time the value is forced; the result is cached and every later
//! force observes the same value. Side effects inside the producer happen
//! exactly once.
//!
//! # Examples
//!
//! ```rust
//! use cons_stream::control::Lazy;
//! use std::cell::Cell;
//!
//! let calls = Cell::new(0);
//! let lazy = Lazy::new(|| {
//!     calls.set(calls.get() + 1);
//!     42
//! });
//!
//! assert_eq!(calls.get(), 0);
//! assert_eq!(*lazy.force(), 42);
//! assert_eq!(*lazy.force(), 42);
//! assert_eq!(calls.get(), 1);
//! ```

use std::cell::{Ref, RefCell};
use std::fmt;

use thiserror::Error;

/// Error returned when a [`Lazy`] value cannot produce its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LazyError {
    /// The producer panicked on an earlier force.
    #[error("lazy value has been poisoned by a panicking producer")]
    Poisoned,
    /// The value was forced again from inside its own producer.
    #[error("lazy value was forced while its producer was running")]
    Reentrant,
}

/// The internal state of a [`Lazy`] value.
#[derive(Debug)]
pub enum LazyState<T, F> {
    /// Not forced yet; holds the producer.
    Pending(F),
    /// The producer is currently running.
    Evaluating,
    /// Forced; holds the cached result.
    Evaluated(T),
    /// The producer panicked. The value is unusable.
    Poisoned,
}

/// A lazily evaluated value, forced at most once.
///
/// `Lazy` is a small state machine
/// (`Pending` -> `Evaluating` -> `Evaluated`, or `Poisoned` on panic)
/// behind a `RefCell`. It is not thread-safe and is meant to be owned by a
/// single structure, such as one cell of a [`Stream`](crate::stream::Stream).
///
/// # Type Parameters
///
/// * `T` - The type of the computed value
/// * `F` - The producer type (defaults to a boxed `FnOnce`)
pub struct Lazy<T, F = Box<dyn FnOnce() -> T>> {
    state: RefCell<LazyState<T, F>>,
}

/// Marks the value poisoned if the producer unwinds.
struct PoisonOnUnwind<'a, T, F> {
    state: &'a RefCell<LazyState<T, F>>,
    armed: bool,
}

impl<T, F> Drop for PoisonOnUnwind<'_, T, F> {
    fn drop(&mut self) {
        if self.armed {
            tracing::trace!("lazy producer panicked, poisoning value");
            *self.state.borrow_mut() = LazyState::Poisoned;
        }
    }
}

impl<T, F: FnOnce() -> T> Lazy<T, F> {
    /// Creates a new lazy value. `producer` is not called until the value
    /// is forced.
    #[inline]
    pub const fn new(producer: F) -> Self {
        Self {
            state: RefCell::new(LazyState::Pending(producer)),
        }
    }

    /// Forces evaluation and returns a reference to the cached value.
    ///
    /// # Panics
    ///
    /// Panics if the producer panicked on an earlier force, or if the value
    /// is forced from inside its own producer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cons_stream::control::Lazy;
    ///
    /// let lazy = Lazy::new(|| "hello".len());
    /// assert_eq!(*lazy.force(), 5);
    /// ```
    pub fn force(&self) -> Ref<'_, T> {
        match self.try_force() {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }

    /// Forces evaluation, reporting poisoning and re-entrancy as errors.
    ///
    /// # Errors
    ///
    /// - [`LazyError::Poisoned`] if an earlier producer run panicked
    /// - [`LazyError::Reentrant`] if called while the producer is running
    pub fn try_force(&self) -> Result<Ref<'_, T>, LazyError> {
        self.evaluate()?;
        Ref::filter_map(self.state.borrow(), |state| match state {
            LazyState::Evaluated(value) => Some(value),
            _ => None,
        })
        .map_err(|_| LazyError::Poisoned)
    }

    /// Runs the producer if it has not run yet.
    ///
    /// The `RefCell` is not borrowed while the producer runs, so the
    /// producer may force other lazy values freely.
    fn evaluate(&self) -> Result<(), LazyError> {
        let producer = {
            let mut state = self.state.borrow_mut();
            match &*state {
                LazyState::Evaluated(_) => return Ok(()),
                LazyState::Evaluating => return Err(LazyError::Reentrant),
                LazyState::Poisoned => return Err(LazyError::Poisoned),
                LazyState::Pending(_) => {}
            }
            let LazyState::Pending(producer) =
                std::mem::replace(&mut *state, LazyState::Evaluating)
            else {
                unreachable!("state was checked to be pending")
            };
            producer
        };

        tracing::trace!("forcing suspended value");
        let mut guard = PoisonOnUnwind {
            state: &self.state,
            armed: true,
        };
        let value = producer();
        guard.armed = false;

        *self.state.borrow_mut() = LazyState::Evaluated(value);
        Ok(())
    }

    /// Consumes the lazy value and returns the result, running the producer
    /// if needed.
    ///
    /// # Errors
    ///
    /// Returns [`LazyError::Poisoned`] if an earlier producer run panicked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cons_stream::control::Lazy;
    ///
    /// assert_eq!(Lazy::new(|| 42).into_inner(), Ok(42));
    /// ```
    pub fn into_inner(self) -> Result<T, LazyError> {
        match self.state.into_inner() {
            LazyState::Evaluated(value) => Ok(value),
            LazyState::Pending(producer) => Ok(producer()),
            LazyState::Evaluating => Err(LazyError::Reentrant),
            LazyState::Poisoned => Err(LazyError::Poisoned),
        }
    }
}

impl<T, F> Lazy<T, F> {
    /// Creates a lazy value that is already evaluated.
    ///
    /// ```rust
    /// use cons_stream::control::Lazy;
    ///
    /// let lazy: Lazy<i32> = Lazy::evaluated(42);
    /// assert!(lazy.is_evaluated());
    /// ```
    #[inline]
    pub const fn evaluated(value: T) -> Self {
        Self {
            state: RefCell::new(LazyState::Evaluated(value)),
        }
    }

    /// Lifts a value into `Lazy`. Same as [`Lazy::evaluated`].
    #[inline]
    pub const fn pure(value: T) -> Self {
        Self::evaluated(value)
    }

    /// Returns the cached value without forcing.
    ///
    /// ```rust
    /// use cons_stream::control::Lazy;
    ///
    /// let lazy = Lazy::new(|| 42);
    /// assert!(lazy.get().is_none());
    /// let _ = lazy.force();
    /// assert_eq!(lazy.get().map(|value| *value), Some(42));
    /// ```
    pub fn get(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.state.borrow(), |state| match state {
            LazyState::Evaluated(value) => Some(value),
            _ => None,
        })
        .ok()
    }

    /// Returns whether the value has been forced.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        matches!(&*self.state.borrow(), LazyState::Evaluated(_))
    }

    /// Returns whether the producer panicked.
    #[inline]
    pub fn is_poisoned(&self) -> bool {
        matches!(&*self.state.borrow(), LazyState::Poisoned)
    }

    /// Moves the cached value out, leaving the value poisoned.
    ///
    /// Only used while tearing down structures, where the value is never
    /// observed again.
    pub(crate) fn take_evaluated(&mut self) -> Option<T> {
        let state = self.state.get_mut();
        if !matches!(state, LazyState::Evaluated(_)) {
            return None;
        }
        match std::mem::replace(state, LazyState::Poisoned) {
            LazyState::Evaluated(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Default> Default for Lazy<T, fn() -> T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Lazy<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.state.borrow() {
            LazyState::Evaluated(value) => formatter.debug_tuple("Lazy").field(value).finish(),
            LazyState::Pending(_) => formatter.debug_tuple("Lazy").field(&"<pending>").finish(),
            LazyState::Evaluating => formatter
                .debug_tuple("Lazy")
                .field(&"<evaluating>")
                .finish(),
            LazyState::Poisoned => formatter.debug_tuple("Lazy").field(&"<poisoned>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;

    #[rstest]
    fn test_lazy_is_pending_until_forced() {
        let lazy = Lazy::new(|| 42);
        assert!(!lazy.is_evaluated());
        assert_eq!(*lazy.force(), 42);
        assert!(lazy.is_evaluated());
    }

    #[rstest]
    #[case(2)]
    #[case(5)]
    #[case(100)]
    fn test_lazy_runs_producer_once(#[case] forces: usize) {
        let calls = Cell::new(0);
        let lazy = Lazy::new(|| {
            calls.set(calls.get() + 1);
            "value".to_string()
        });

        for _ in 0..forces {
            assert_eq!(lazy.force().as_str(), "value");
        }
        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    fn test_lazy_evaluated_skips_producer() {
        let lazy: Lazy<i32> = Lazy::evaluated(7);
        assert!(lazy.is_evaluated());
        assert_eq!(*lazy.force(), 7);
    }

    #[rstest]
    fn test_lazy_panicking_producer_poisons() {
        let lazy: Lazy<i32, _> = Lazy::new(|| -> i32 { panic!("boom") });
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _ = lazy.force();
        }));

        assert!(result.is_err());
        assert!(lazy.is_poisoned());
        assert_eq!(lazy.try_force().err(), Some(LazyError::Poisoned));
    }

    #[rstest]
    fn test_lazy_reentrant_force_is_reported() {
        let slot: Rc<Cell<Option<LazyError>>> = Rc::new(Cell::new(None));
        let lazy: Rc<Lazy<i32>> = Rc::new_cyclic(|weak: &std::rc::Weak<Lazy<i32>>| {
            let weak = weak.clone();
            let slot = Rc::clone(&slot);
            Lazy::new(Box::new(move || {
                if let Some(this) = weak.upgrade() {
                    slot.set(this.try_force().err());
                }
                1
            }) as Box<dyn FnOnce() -> i32>)
        });

        assert_eq!(*lazy.force(), 1);
        assert_eq!(slot.get(), Some(LazyError::Reentrant));
    }

    #[rstest]
    fn test_lazy_take_evaluated() {
        let mut lazy: Lazy<i32> = Lazy::new(Box::new(|| 3));
        assert_eq!(lazy.take_evaluated(), None);
        let _ = lazy.force();
        assert_eq!(lazy.take_evaluated(), Some(3));
        assert!(lazy.get().is_none());
    }

    #[rstest]
    fn test_lazy_debug_shows_state() {
        let lazy = Lazy::new(|| 1);
        assert_eq!(format!("{lazy:?}"), "Lazy(\"<pending>\")");
        let _ = lazy.force();
        assert_eq!(format!("{lazy:?}"), "Lazy(1)");
    }
}
