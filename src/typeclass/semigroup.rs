//! Semigroup type class - types with an associative binary operation.
//!
//! # Laws
//!
//! ## Associativity
//!
//! ```text
//! (a.combine(b)).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! Both sequence types in this crate form a semigroup under concatenation.
//! For streams the concatenation is lazy, so combining an infinite stream
//! with anything is still a well-formed (infinite) stream.

/// A type class for types with an associative binary operation.
///
/// # Examples
///
/// ```rust
/// use cons_stream::persistent::PersistentList;
/// use cons_stream::typeclass::Semigroup;
///
/// let front: PersistentList<i32> = (1..=2).collect();
/// let back: PersistentList<i32> = (3..=4).collect();
/// assert_eq!(front.combine(back), PersistentList::from_slice(&[1, 2, 3, 4]));
/// ```
pub trait Semigroup {
    /// Combines two values. Must be associative.
    #[must_use]
    fn combine(self, other: Self) -> Self;

    /// Combines every element of a non-empty iterator, or returns `None`.
    fn reduce_all<I>(iterator: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator.into_iter().reduce(Self::combine)
    }
}
