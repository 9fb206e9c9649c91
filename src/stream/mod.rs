//! Lazily evaluated, memoizing cons-streams.
//!
//! A [`Stream`] is either empty or a cell holding a suspended head and a
//! suspended tail. Both are [`Lazy`](crate::control::Lazy) values: forced on
//! first demand, then cached for every clone of the stream.
//!
//! - Construction: [`Stream::cons`], [`Stream::of`], [`Stream::from_list`]
//! - Corecursion: [`Stream::unfold`] and the generators built on it
//!   ([`Stream::constant`], [`Stream::counting_from`], [`Stream::iterate`],
//!   [`Stream::fibonacci`])
//! - Right folds with a suspended "rest": [`Stream::fold_right`],
//!   [`Stream::fold_right_deferred`], and the combinators derived from them
//! - Slicing, zipping and suffix traversal
//!
//! Several combinators come in pairs (`take` / `take_via_unfold`,
//! `flat_map` / `flat_map_via_append`, `scan_right` / `scan_right_via_tails`).
//! Each pair computes the same result on finite input; they differ in how
//! much they force and how much they reuse.
//!
//! # Examples
//!
//! ```rust
//! use cons_stream::stream::Stream;
//!
//! let fibonacci = Stream::fibonacci().take(10).to_vec();
//! assert_eq!(fibonacci, vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
//!
//! let evens = Stream::counting_from(1)
//!     .map(|value| value * 2)
//!     .take_while(|value| *value <= 10)
//!     .to_vec();
//! assert_eq!(evens, vec![2, 4, 6, 8, 10]);
//! ```

mod cons;
mod fold;
mod slice;
mod unfold;
mod zip;

pub use cons::{ConsCell, Stream, StreamIterator, Thunk};
