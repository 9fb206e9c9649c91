//! Functor type class - mapping over container values.
//!
//! # Laws
//!
//! ## Identity
//!
//! ```text
//! fa.fmap(|x| x) == fa
//! ```
//!
//! ## Composition
//!
//! ```text
//! fa.fmap(f).fmap(g) == fa.fmap(|x| g(f(x)))
//! ```
//!
//! Both containers in this crate may hold many elements, so the mapping
//! function is `FnMut` rather than `FnOnce`. For [`Stream`](crate::stream::Stream)
//! the function is applied lazily and must therefore be `Fn + 'static`;
//! streams implement their own lazy `map` and use it for `fmap`.

use super::higher::TypeConstructor;

/// A type class for containers whose elements can be transformed.
///
/// # Examples
///
/// ```rust
/// use cons_stream::persistent::PersistentList;
/// use cons_stream::typeclass::Functor;
///
/// let list: PersistentList<i32> = (1..=3).collect();
/// let strings = list.fmap(|value| value.to_string());
/// assert_eq!(strings.head(), Some(&"1".to_string()));
/// ```
pub trait Functor: TypeConstructor {
    /// Applies `function` to every element, consuming the container.
    fn fmap<B, F>(self, function: F) -> Self::WithType<B>
    where
        B: Clone + 'static,
        F: Fn(Self::Inner) -> B + 'static;

    /// Applies `function` to every element by reference.
    fn fmap_ref<B, F>(&self, function: F) -> Self::WithType<B>
    where
        B: Clone + 'static,
        F: Fn(&Self::Inner) -> B + 'static;
}
