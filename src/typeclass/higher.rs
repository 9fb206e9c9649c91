//! Higher-Kinded Type emulation through Generic Associated Types.
//!
//! Rust cannot abstract over `PersistentList<_>` or `Stream<_>` as type
//! constructors directly, so the type class traits in this crate go through
//! [`TypeConstructor`], which names the element type and the same
//! constructor re-applied to another element type.

/// A type constructor applied to some element type.
///
/// # Laws
///
/// `<F as TypeConstructor>::WithType<F::Inner>` is `F` itself.
///
/// # Example
///
/// ```rust
/// use cons_stream::persistent::PersistentList;
/// use cons_stream::typeclass::TypeConstructor;
///
/// fn assert_inner<T: TypeConstructor<Inner = i32>>() {}
/// assert_inner::<PersistentList<i32>>();
/// ```
pub trait TypeConstructor {
    /// The element type this constructor is currently applied to.
    type Inner;

    /// The same constructor applied to `B`.
    type WithType<B>: TypeConstructor<Inner = B>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Boxed<T>(T);

    impl<T> TypeConstructor for Boxed<T> {
        type Inner = T;
        type WithType<B> = Boxed<B>;
    }

    #[test]
    fn with_type_changes_inner_type() {
        fn assert_inner<T: TypeConstructor<Inner = String>>() {}
        assert_inner::<<Boxed<i32> as TypeConstructor>::WithType<String>>();
        let Boxed(value) = Boxed(1);
        assert_eq!(value, 1);
    }
}
