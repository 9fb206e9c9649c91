//! # cons-stream
//!
//! Persistent functional data structures: an immutable singly-linked list
//! and a lazily evaluated, memoizing cons-stream with corecursive
//! generation.
//!
//! ## Overview
//!
//! - **Control**: [`control::Lazy`], a suspended computation forced at most once
//! - **Persistent Data Structures**: [`persistent::PersistentList`]
//! - **Streams**: [`stream::Stream`], built from lazy cons cells, with
//!   `unfold`-based corecursion and fold-fused combinators
//! - **Type Classes**: Functor, Foldable, Semigroup, Monoid
//!
//! ## Feature Flags
//!
//! - `typeclass`: Type class traits
//! - `control`: The memoizing `Lazy` suspension
//! - `persistent`: Persistent list
//! - `stream`: Lazy streams (enables all of the above)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use cons_stream::prelude::*;
//!
//! let multiples_of_seven = Stream::counting_from(1)
//!     .filter(|value| value % 7 == 0)
//!     .take(5)
//!     .to_list();
//!
//! assert_eq!(multiples_of_seven, PersistentList::from_slice(&[7, 14, 21, 28, 35]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use cons_stream::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;

    #[cfg(feature = "stream")]
    pub use crate::stream::*;
}

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "persistent")]
pub mod persistent;

#[cfg(feature = "stream")]
pub mod stream;
