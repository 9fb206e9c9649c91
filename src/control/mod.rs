//! Control structures for lazy evaluation.
//!
//! - [`Lazy`]: a suspended computation, forced at most once and memoized
//!
//! # Examples
//!
//! ```rust
//! use cons_stream::control::Lazy;
//!
//! let lazy = Lazy::new(|| {
//!     println!("Computing...");
//!     42
//! });
//! // "Computing..." is not printed yet
//!
//! assert_eq!(*lazy.force(), 42);
//! ```

mod lazy;

pub use lazy::{Lazy, LazyError, LazyState};
