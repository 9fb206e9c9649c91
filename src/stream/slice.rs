//! Prefixes and suffixes: `take`, `drop_first` and the `*_while` family.

use std::rc::Rc;

use super::cons::{Cursor, Stream};

impl<T> Stream<T> {
    /// Skips the first `count` elements. Dropping past the end gives `Empty`.
    ///
    /// Only tails are forced; the skipped heads are never computed. This
    /// differs from a drop that walks with `uncons`, which forces each
    /// skipped head before moving on, so side effects in skipped head
    /// producers do not run here.
    ///
    /// Runs in a loop, so large counts do not grow the stack.
    #[must_use]
    pub fn drop_first(&self, count: usize) -> Self {
        let mut current = self.clone();
        for _ in 0..count {
            let Self::Cons(cell) = &current else {
                break;
            };
            let next = cell.tail();
            current = next;
        }
        current
    }

    /// Skips leading elements while `predicate` holds.
    pub fn drop_while<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let mut current = self.clone();
        while let Self::Cons(cell) = &current {
            if !predicate(&*cell.head_ref()) {
                break;
            }
            let next = cell.tail();
            current = next;
        }
        current
    }
}

impl<T: Clone + 'static> Stream<T> {
    /// The first `count` elements.
    ///
    /// Neither heads nor tails of the source are forced until the
    /// corresponding part of the result is. The source tail after the last
    /// taken element is never forced.
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    ///
    /// let stream = Stream::cons_evaluated(1, || Stream::cons_evaluated(2, || panic!("never forced")));
    /// assert_eq!(stream.take(2).to_vec(), vec![1, 2]);
    /// ```
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        match self {
            Self::Cons(cell) if count > 0 => {
                let head_cell = Rc::clone(cell);
                if count == 1 {
                    return Self::cons(move || head_cell.head(), Self::empty);
                }
                let tail_cell = Rc::clone(cell);
                Self::cons(move || head_cell.head(), move || tail_cell.tail().take(count - 1))
            }
            _ => Self::Empty,
        }
    }

    /// The first `count` elements, by corecursion over the source.
    ///
    /// The first head is forced immediately; each later head is forced
    /// together with the tail before it.
    #[must_use]
    pub fn take_via_unfold(&self, count: usize) -> Self {
        Self::unfold((Cursor::At(self.clone()), count), |(cursor, remaining)| {
            if remaining == 0 {
                return None;
            }
            let (head, next) = cursor.resolve().next_lazily()?;
            Some(((next, remaining - 1), head))
        })
    }

    /// The longest prefix whose elements all satisfy `predicate`.
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    ///
    /// let small = Stream::counting_from(1).take_while(|value| *value < 4);
    /// assert_eq!(small.to_vec(), vec![1, 2, 3]);
    /// ```
    pub fn take_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        Self::take_while_shared(self, &Rc::new(predicate))
    }

    fn take_while_shared<P>(stream: &Self, predicate: &Rc<P>) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        let Self::Cons(cell) = stream else {
            return Self::Empty;
        };
        let head = cell.head();
        if !predicate(&head) {
            return Self::Empty;
        }
        let cell = Rc::clone(cell);
        let predicate = Rc::clone(predicate);
        Self::cons_evaluated(head, move || Self::take_while_shared(&cell.tail(), &predicate))
    }

    /// [`Stream::take_while`] expressed as a right fold.
    pub fn take_while_via_fold<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.fold_right(Self::Empty, move |element, rest| {
            if predicate(&element) {
                Self::cons_evaluated(element, rest)
            } else {
                Self::Empty
            }
        })
    }

    /// [`Stream::take_while`] expressed with [`Stream::unfold`].
    pub fn take_while_via_unfold<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        Self::unfold(Cursor::At(self.clone()), move |cursor| {
            let (head, next) = cursor.resolve().next_lazily()?;
            predicate(&head).then_some((next, head))
        })
    }
}
