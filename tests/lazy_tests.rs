#![cfg(feature = "control")]
//! Unit tests for the memoizing `Lazy` suspension.
//!
//! Covers deferral, single evaluation, the non-forcing accessors, poisoning
//! after a panicking producer and re-entrant forcing.

use cons_stream::control::{Lazy, LazyError};
use rstest::rstest;
use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

// =============================================================================
// Deferral and memoization
// =============================================================================

#[rstest]
fn lazy_defers_computation() {
    let called = Cell::new(false);
    let lazy = Lazy::new(|| {
        called.set(true);
        7
    });

    assert!(!called.get());
    assert!(!lazy.is_evaluated());
    assert_eq!(*lazy.force(), 7);
    assert!(called.get());
}

#[rstest]
fn lazy_side_effect_runs_exactly_once() {
    let log = Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let lazy = Lazy::new(move || {
        sink.borrow_mut().push("produced");
        "value".to_string()
    });

    for _ in 0..4 {
        assert_eq!(lazy.force().as_str(), "value");
    }
    assert_eq!(*log.borrow(), vec!["produced"]);
}

#[rstest]
fn lazy_evaluated_never_runs_a_producer() {
    let lazy: Lazy<i32> = Lazy::evaluated(3);
    assert!(lazy.is_evaluated());
    assert_eq!(*lazy.force(), 3);
}

#[rstest]
fn lazy_pure_is_alias_for_evaluated() {
    let lazy: Lazy<&str> = Lazy::pure("ready");
    assert_eq!(lazy.get().map(|value| *value), Some("ready"));
}

// =============================================================================
// Non-forcing accessors
// =============================================================================

#[rstest]
fn lazy_get_does_not_force() {
    let lazy = Lazy::new(|| 1);
    assert!(lazy.get().is_none());
    assert!(!lazy.is_evaluated());

    let _ = lazy.force();
    assert_eq!(lazy.get().map(|value| *value), Some(1));
}

#[rstest]
fn lazy_into_inner_runs_pending_producer() {
    assert_eq!(Lazy::new(|| 10).into_inner(), Ok(10));
    let evaluated: Lazy<i32> = Lazy::evaluated(20);
    assert_eq!(evaluated.into_inner(), Ok(20));
}

#[rstest]
fn lazy_default_uses_type_default() {
    let lazy: Lazy<String, fn() -> String> = Lazy::default();
    assert_eq!(lazy.force().as_str(), "");
}

// =============================================================================
// Failure modes
// =============================================================================

#[rstest]
fn lazy_panicking_producer_poisons() {
    let lazy: Lazy<i32> = Lazy::new(Box::new(|| -> i32 { panic!("producer failed") }) as Box<dyn FnOnce() -> i32>);

    let outcome = catch_unwind(AssertUnwindSafe(|| *lazy.force()));
    assert!(outcome.is_err());
    assert!(lazy.is_poisoned());
    assert_eq!(lazy.try_force().err(), Some(LazyError::Poisoned));
    assert_eq!(lazy.into_inner(), Err(LazyError::Poisoned));
}

#[rstest]
fn lazy_reentrant_force_is_reported() {
    let observed = Rc::new(Cell::new(None));
    let sink = Rc::clone(&observed);
    let lazy: Rc<Lazy<i32>> = Rc::new_cyclic(|weak: &std::rc::Weak<Lazy<i32>>| {
        let weak = weak.clone();
        Lazy::new(Box::new(move || {
            if let Some(this) = weak.upgrade() {
                sink.set(this.try_force().err());
            }
            5
        }) as Box<dyn FnOnce() -> i32>)
    });

    assert_eq!(*lazy.force(), 5);
    assert_eq!(observed.get(), Some(LazyError::Reentrant));
}

#[rstest]
#[case(LazyError::Poisoned, "lazy value has been poisoned by a panicking producer")]
#[case(LazyError::Reentrant, "lazy value was forced while its producer was running")]
fn lazy_error_messages(#[case] error: LazyError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}
