//! Right folds with a suspended remainder, and the combinators built on them.
//!
//! The combining function receives the current element and a [`Thunk`] for
//! the fold of the rest. Not calling the thunk stops the traversal, which is
//! what lets `take_while_via_fold` finish on infinite streams, and what lets
//! `map` and `append` stay lazy.
//!
//! Each fold step that calls its thunk directly nests one call on the stack,
//! so a fold that walks very deep before producing a value can exhaust it.
//! The searches (`exists`, `for_all`, `find`) and the skipping parts of
//! `filter` and `flat_map` walk cells in a loop instead.

use std::rc::Rc;

use super::cons::{Stream, Thunk};

impl<T: Clone + 'static> Stream<T> {
    /// Folds from the right. `function` gets each element and a thunk that
    /// computes the fold of the remaining elements on demand.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    ///
    /// let sum = Stream::of([1, 2, 3]).fold_right(0, |element, rest| element + rest());
    /// assert_eq!(sum, 6);
    ///
    /// // Stops at the first element over 10 without touching the rest.
    /// let first_big = Stream::counting_from(1)
    ///     .fold_right(None, |element, rest| if element > 10 { Some(element) } else { rest() });
    /// assert_eq!(first_big, Some(11));
    /// ```
    pub fn fold_right<R, F>(&self, init: R, function: F) -> R
    where
        R: 'static,
        F: Fn(T, Thunk<R>) -> R + 'static,
    {
        self.fold_right_deferred(move || init, function)
    }

    /// Like [`Stream::fold_right`], but the initial value is itself
    /// suspended and only computed if the fold reaches the end.
    pub fn fold_right_deferred<R, I, F>(&self, init: I, function: F) -> R
    where
        R: 'static,
        I: FnOnce() -> R + 'static,
        F: Fn(T, Thunk<R>) -> R + 'static,
    {
        Self::fold_right_shared(self, Box::new(init), &Rc::new(function))
    }

    fn fold_right_shared<R, F>(stream: &Self, init: Thunk<R>, function: &Rc<F>) -> R
    where
        R: 'static,
        F: Fn(T, Thunk<R>) -> R + 'static,
    {
        match stream {
            Self::Empty => init(),
            Self::Cons(cell) => {
                let remaining = Rc::clone(cell);
                let next = Rc::clone(function);
                let rest: Thunk<R> =
                    Box::new(move || Self::fold_right_shared(&remaining.tail(), init, &next));
                function(cell.head(), rest)
            }
        }
    }

    /// Returns whether any element satisfies `predicate`, stopping at the
    /// first match. Walks the cells in a loop, so long finite streams are
    /// safe.
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.iter().any(|element| predicate(&element))
    }

    /// Returns whether every element satisfies `predicate`, stopping at the
    /// first failure.
    pub fn for_all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.iter().all(|element| predicate(&element))
    }

    /// Returns the first element satisfying `predicate`.
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    ///
    /// assert_eq!(Stream::counting_from(1).find(|value| value * value > 50), Some(8));
    /// ```
    pub fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.iter().find(|element| predicate(element))
    }

    /// Lazily applies `function` to each element. The function runs when
    /// the corresponding head of the result is forced.
    ///
    /// Building the result takes the first fold step, which forces the
    /// first head of the source (not the mapped value). Later source heads
    /// are forced along with the tails of the result.
    pub fn map<B, F>(&self, function: F) -> Stream<B>
    where
        B: 'static,
        F: Fn(T) -> B + 'static,
    {
        let function = Rc::new(function);
        self.fold_right(Stream::Empty, move |element, rest| {
            let function = Rc::clone(&function);
            Stream::cons(move || function(element), rest)
        })
    }

    /// Keeps the elements satisfying `predicate`.
    ///
    /// The first kept element is found immediately; each later one is
    /// searched for when the tail before it is forced. Rejected runs are
    /// skipped in a loop, so long gaps between matches do not grow the
    /// stack.
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        Self::filter_shared(self.clone(), Rc::new(predicate))
    }

    fn filter_shared<P>(stream: Self, predicate: Rc<P>) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        let mut current = stream;
        while let Self::Cons(cell) = &current {
            let head = cell.head();
            if predicate(&head) {
                let cell = Rc::clone(cell);
                return Self::cons_evaluated(head, move || {
                    Self::filter_shared(cell.tail(), predicate)
                });
            }
            let next = cell.tail();
            current = next;
        }
        Self::Empty
    }

    /// [`Stream::filter`] expressed as a right fold. Each rejected element
    /// nests one call, so long rejected runs can exhaust the stack.
    pub fn filter_via_fold<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.fold_right(Self::Empty, move |element, rest| {
            if predicate(&element) {
                Self::cons_evaluated(element, rest)
            } else {
                rest()
            }
        })
    }

    /// Concatenates `other` after this stream. `other` is computed only
    /// when this stream is exhausted.
    pub fn append_with<R>(&self, other: R) -> Self
    where
        R: FnOnce() -> Self + 'static,
    {
        self.fold_right_deferred(other, Self::cons_evaluated)
    }

    /// Concatenates `other` after this stream.
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    ///
    /// let infinite = Stream::counting_from(1).append(&Stream::of([0]));
    /// assert_eq!(infinite.take(3).to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        let other = other.clone();
        self.append_with(move || other)
    }

    /// Maps each element to a stream and concatenates the results lazily.
    /// Works on infinite streams.
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    ///
    /// let doubled = Stream::counting_from(1).flat_map(|value| Stream::of([value, value]));
    /// assert_eq!(doubled.take(5).to_vec(), vec![1, 1, 2, 2, 3]);
    /// ```
    pub fn flat_map<B, F>(&self, function: F) -> Stream<B>
    where
        B: Clone + 'static,
        F: Fn(T) -> Stream<B> + 'static,
    {
        Self::flat_map_shared(self.clone(), Rc::new(function))
    }

    /// Skips elements that map to `Empty` in a loop, then appends the rest
    /// of the flattening lazily after the first non-empty inner stream.
    fn flat_map_shared<B, F>(stream: Self, function: Rc<F>) -> Stream<B>
    where
        B: Clone + 'static,
        F: Fn(T) -> Stream<B> + 'static,
    {
        let mut current = stream;
        while let Self::Cons(cell) = &current {
            let inner = function(cell.head());
            if !inner.is_empty() {
                let cell = Rc::clone(cell);
                return inner.append_with(move || Self::flat_map_shared(cell.tail(), function));
            }
            let next = cell.tail();
            current = next;
        }
        Stream::Empty
    }

    /// Maps each element to a stream and appends the result to the already
    /// flattened rest.
    ///
    /// Flattening the rest before appending forces the whole source and
    /// nests one call per element, so this is only suitable for short finite
    /// streams. Prefer [`Stream::flat_map`].
    pub fn flat_map_via_append<B, F>(&self, function: F) -> Stream<B>
    where
        B: Clone + 'static,
        F: Fn(T) -> Stream<B> + 'static,
    {
        self.fold_right(Stream::Empty, move |element, rest| {
            function(element).append(&rest())
        })
    }
}
