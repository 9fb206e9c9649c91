//! Monoid type class - semigroups with an identity element.
//!
//! # Laws
//!
//! ```text
//! Self::empty().combine(a) == a
//! a.combine(Self::empty()) == a
//! ```

use super::semigroup::Semigroup;

/// A semigroup with an identity element.
///
/// # Examples
///
/// ```rust
/// use cons_stream::persistent::PersistentList;
/// use cons_stream::typeclass::Monoid;
///
/// let lists = vec![
///     PersistentList::singleton(1),
///     PersistentList::new(),
///     PersistentList::singleton(2),
/// ];
/// assert_eq!(PersistentList::combine_all(lists), PersistentList::from_slice(&[1, 2]));
/// ```
pub trait Monoid: Semigroup {
    /// Returns the identity element.
    fn empty() -> Self;

    /// Combines every element, starting from the identity element.
    fn combine_all<I>(iterator: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator
            .into_iter()
            .fold(Self::empty(), |accumulator, element| {
                accumulator.combine(element)
            })
    }
}
