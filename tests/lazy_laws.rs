#![cfg(feature = "control")]
//! Property-based tests for `Lazy<T, F>` laws.
//!
//! - **Idempotence**: `force()` returns the same value every time
//! - **Laziness**: the producer does not run before the first force
//! - **Memoization**: the producer runs at most once
//! - **Transparency**: forcing gives the value the producer computes

use cons_stream::control::Lazy;
use proptest::prelude::*;
use std::cell::Cell;

// =============================================================================
// Idempotence Law
// =============================================================================

proptest! {
    #[test]
    fn prop_lazy_idempotence(value in any::<i32>()) {
        let lazy = Lazy::new(move || value);

        let first = *lazy.force();
        let second = *lazy.force();
        let third = *lazy.force();

        prop_assert_eq!(first, second);
        prop_assert_eq!(second, third);
    }
}

proptest! {
    #[test]
    fn prop_lazy_idempotence_string(value in any::<String>()) {
        let lazy = Lazy::new(move || value.clone());

        let first = lazy.force().clone();
        let second = lazy.force().clone();

        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// Laziness and Memoization Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_lazy_memoization(value in any::<i32>(), forces in 1_usize..20) {
        let call_count = Cell::new(0);
        let lazy = Lazy::new(|| {
            call_count.set(call_count.get() + 1);
            value
        });

        prop_assert_eq!(call_count.get(), 0);
        for _ in 0..forces {
            prop_assert_eq!(*lazy.force(), value);
        }
        prop_assert_eq!(call_count.get(), 1);
    }
}

// =============================================================================
// Transparency
// =============================================================================

proptest! {
    #[test]
    fn prop_lazy_force_matches_eager(values in prop::collection::vec(any::<i64>(), 0..50)) {
        let expected: i64 = values.iter().fold(0_i64, |sum, value| sum.wrapping_add(*value));
        let lazy = Lazy::new(move || values.iter().fold(0_i64, |sum, value| sum.wrapping_add(*value)));

        prop_assert_eq!(*lazy.force(), expected);
    }
}

proptest! {
    #[test]
    fn prop_lazy_evaluated_and_forced_agree(value in any::<u16>()) {
        let evaluated: Lazy<u16> = Lazy::evaluated(value);
        let pending = Lazy::new(move || value);

        prop_assert_eq!(*evaluated.force(), *pending.force());
        prop_assert_eq!(evaluated.into_inner(), pending.into_inner());
    }
}
