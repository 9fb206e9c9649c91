//! Type class traits shared by the containers in this crate.
//!
//! - [`TypeConstructor`]: GAT-based emulation of higher-kinded types
//! - [`Functor`]: Mapping over container values
//! - [`Foldable`]: Folding a finite structure to a summary value
//! - [`Semigroup`]: Associative binary operations
//! - [`Monoid`]: Semigroup with identity element
//!
//! # Examples
//!
//! ```rust
//! use cons_stream::persistent::PersistentList;
//! use cons_stream::typeclass::{Foldable, Functor, Monoid, Semigroup};
//!
//! let list: PersistentList<i32> = (1..=3).collect();
//! let doubled = list.fmap(|value| value * 2);
//! assert_eq!(doubled.clone().fold_left(0, |sum, value| sum + value), 12);
//!
//! let joined = PersistentList::empty().combine(doubled);
//! assert_eq!(joined.len(), 3);
//! ```

mod foldable;
mod functor;
mod higher;
mod monoid;
mod semigroup;

pub use foldable::Foldable;
pub use functor::Functor;
pub use higher::TypeConstructor;
pub use monoid::Monoid;
pub use semigroup::Semigroup;
