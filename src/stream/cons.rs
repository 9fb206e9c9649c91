//! The stream type, its cells and its accessors.

use std::cell::Ref;
use std::fmt;
use std::rc::Rc;

use crate::control::Lazy;
use crate::persistent::PersistentList;
use crate::typeclass::{Functor, Monoid, Semigroup, TypeConstructor};

/// A suspended computation handed to fold combinators as "the rest of the
/// fold". Calling it forces the remainder; dropping it forces nothing.
pub type Thunk<R> = Box<dyn FnOnce() -> R>;

type Suspended<T> = Lazy<T, Thunk<T>>;

fn suspend<X, F>(producer: F) -> Suspended<X>
where
    F: FnOnce() -> X + 'static,
{
    let producer: Thunk<X> = Box::new(producer);
    Lazy::new(producer)
}

/// A non-empty stream cell: a suspended head and a suspended tail.
///
/// The two suspensions are forced independently. Each is forced at most
/// once; every clone of the owning [`Stream`] observes the same results.
pub struct ConsCell<T> {
    head: Suspended<T>,
    tail: Suspended<Stream<T>>,
}

impl<T> ConsCell<T> {
    /// Forces the head and borrows it.
    pub fn head_ref(&self) -> Ref<'_, T> {
        self.head.force()
    }

    /// Forces the tail.
    pub fn tail(&self) -> Stream<T> {
        self.tail.force().clone()
    }

    /// Returns whether the head has been forced.
    pub fn is_head_evaluated(&self) -> bool {
        self.head.is_evaluated()
    }

    /// Returns whether the tail has been forced.
    pub fn is_tail_evaluated(&self) -> bool {
        self.tail.is_evaluated()
    }
}

impl<T: Clone> ConsCell<T> {
    /// Forces the head and returns a copy of it.
    pub fn head(&self) -> T {
        self.head.force().clone()
    }
}

/// Unlinks evaluated, uniquely owned tails one cell at a time, so dropping
/// a long forced stream does not recurse once per cell.
impl<T> Drop for ConsCell<T> {
    fn drop(&mut self) {
        let mut next = self.tail.take_evaluated();
        while let Some(Stream::Cons(cell)) = next {
            next = match Rc::try_unwrap(cell) {
                Ok(mut cell) => cell.tail.take_evaluated(),
                Err(_) => None,
            };
        }
    }
}

/// A lazily evaluated, memoizing sequence.
///
/// A stream is either [`Stream::Empty`] or a [`Stream::Cons`] cell holding
/// a suspended head and a suspended tail. Nothing is computed until a
/// consumer asks for a head or a tail, and nothing is computed twice.
///
/// Streams may be infinite. Only bounded consumers (`take`, `take_while`,
/// `exists`, `find`, `head`, iteration with a limit) are safe on them;
/// `to_list`, `to_vec` and folds whose combiner always forces the rest
/// never return on an infinite stream. That is the caller's responsibility
/// and is not checked at runtime.
///
/// `Stream` is single-threaded: it is neither `Send` nor `Sync`.
///
/// # Examples
///
/// ```rust
/// use cons_stream::stream::Stream;
///
/// let stream = Stream::of([1, 2, 3, 4, 5]);
/// assert_eq!(stream.take(2).to_vec(), vec![1, 2]);
///
/// let joined = Stream::of([1, 2, 3]).append(&Stream::of([4, 5, 6]));
/// assert_eq!(joined.to_vec(), vec![1, 2, 3, 4, 5, 6]);
/// ```
pub enum Stream<T> {
    /// The terminal, empty stream.
    Empty,
    /// A cell with a suspended head and a suspended tail.
    Cons(Rc<ConsCell<T>>),
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Cons(cell) => Self::Cons(Rc::clone(cell)),
        }
    }
}

impl<T> Stream<T> {
    /// The empty stream.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// Returns `true` for [`Stream::Empty`]. Forces nothing.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Forces and returns the tail. The tail of `Empty` is `Empty`.
    #[must_use]
    pub fn tail(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Cons(cell) => cell.tail(),
        }
    }
}

impl<T: 'static> Stream<T> {
    /// Builds a cell from a suspended head and a suspended tail. Neither
    /// closure runs until the corresponding part is forced.
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let calls = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&calls);
    /// let stream = Stream::cons(
    ///     move || {
    ///         counter.set(counter.get() + 1);
    ///         1
    ///     },
    ///     Stream::empty,
    /// );
    ///
    /// assert_eq!(calls.get(), 0);
    /// assert_eq!(stream.head(), Some(1));
    /// assert_eq!(stream.head(), Some(1));
    /// assert_eq!(calls.get(), 1);
    /// ```
    pub fn cons<H, R>(head: H, tail: R) -> Self
    where
        H: FnOnce() -> T + 'static,
        R: FnOnce() -> Self + 'static,
    {
        Self::Cons(Rc::new(ConsCell {
            head: suspend(head),
            tail: suspend(tail),
        }))
    }

    /// Builds a cell whose head is already known; only the tail is suspended.
    pub fn cons_evaluated<R>(head: T, tail: R) -> Self
    where
        R: FnOnce() -> Self + 'static,
    {
        Self::Cons(Rc::new(ConsCell {
            head: Lazy::evaluated(head),
            tail: suspend(tail),
        }))
    }

    /// A stream of exactly one element.
    pub fn singleton(value: T) -> Self {
        Self::cons_evaluated(value, Self::empty)
    }
}

impl<T: Clone> Stream<T> {
    /// Forces and returns the head, or `None` for `Empty`. Does not force
    /// the tail.
    #[must_use]
    pub fn head(&self) -> Option<T> {
        match self {
            Self::Empty => None,
            Self::Cons(cell) => Some(cell.head()),
        }
    }

    /// Forces the head and the tail.
    #[must_use]
    pub fn uncons(&self) -> Option<(T, Self)> {
        match self {
            Self::Empty => None,
            Self::Cons(cell) => Some((cell.head(), cell.tail())),
        }
    }

    /// Forces the head and returns a cursor that forces the tail only when
    /// it is next resolved.
    pub(super) fn next_lazily(&self) -> Option<(T, Cursor<T>)> {
        match self {
            Self::Empty => None,
            Self::Cons(cell) => Some((cell.head(), Cursor::After(Rc::clone(cell)))),
        }
    }

    /// Returns a lazy iterator over the elements. Each `next` forces one
    /// head and the tail of the previous cell.
    #[must_use]
    pub fn iter(&self) -> StreamIterator<T> {
        StreamIterator {
            cursor: Cursor::At(self.clone()),
        }
    }

    /// Forces every cell and collects the elements into a `Vec`.
    ///
    /// Never returns on an infinite stream.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Forces every cell and collects the elements into a
    /// [`PersistentList`], in stream order.
    ///
    /// Never returns on an infinite stream.
    ///
    /// ```rust
    /// use cons_stream::persistent::PersistentList;
    /// use cons_stream::stream::Stream;
    ///
    /// let list = PersistentList::from_slice(&[1, 2, 3]);
    /// assert_eq!(list.to_stream().to_list(), list);
    /// ```
    #[must_use]
    pub fn to_list(&self) -> PersistentList<T> {
        let list: PersistentList<T> = self.iter().collect();
        tracing::debug!(length = list.len(), "materialised stream into a list");
        list
    }
}

impl<T: Clone + 'static> Stream<T> {
    /// Converts a list into a stream. Each stream cell is created only when
    /// the tail before it is forced, so unvisited list cells never produce
    /// stream cells.
    pub fn from_list(list: &PersistentList<T>) -> Self {
        match list.uncons() {
            None => Self::Empty,
            Some((head, tail)) => {
                let head = head.clone();
                Self::cons(move || head, move || Self::from_list(&tail))
            }
        }
    }

    /// Builds a finite stream from any iterable.
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    ///
    /// assert_eq!(Stream::of(vec!['a', 'b']).to_vec(), vec!['a', 'b']);
    /// ```
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_list(&values.into_iter().collect())
    }
}

impl<T: Clone + 'static> PersistentList<T> {
    /// Converts this list into a lazy stream. See [`Stream::from_list`].
    #[must_use]
    pub fn to_stream(&self) -> Stream<T> {
        Stream::from_list(self)
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A position in a stream that has not forced its tail yet.
pub(super) enum Cursor<T> {
    /// Positioned at this stream.
    At(Stream<T>),
    /// Positioned at the tail of this cell, which is forced on `resolve`.
    After(Rc<ConsCell<T>>),
}

impl<T> Cursor<T> {
    pub(super) fn resolve(self) -> Stream<T> {
        match self {
            Self::At(stream) => stream,
            Self::After(cell) => cell.tail(),
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// A lazy iterator over the elements of a [`Stream`].
pub struct StreamIterator<T> {
    cursor: Cursor<T>,
}

impl<T: Clone> Iterator for StreamIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = std::mem::replace(&mut self.cursor, Cursor::At(Stream::Empty)).resolve();
        let (head, next) = current.next_lazily()?;
        self.cursor = next;
        Some(head)
    }
}

impl<T: Clone> IntoIterator for Stream<T> {
    type Item = T;
    type IntoIter = StreamIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        StreamIterator {
            cursor: Cursor::At(self),
        }
    }
}

impl<T: Clone> IntoIterator for &Stream<T> {
    type Item = T;
    type IntoIter = StreamIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for Stream<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T: Clone + 'static> FromIterator<T> for Stream<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl<T> Stream<T> {
    /// Writes the evaluated prefix without forcing anything: `?` marks an
    /// unforced head and `...` an unforced tail.
    fn write_evaluated<W>(&self, formatter: &mut fmt::Formatter<'_>, write_element: W) -> fmt::Result
    where
        W: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        write!(formatter, "Stream(")?;
        let mut current = self.clone();
        let mut first = true;
        while let Self::Cons(cell) = current {
            if !first {
                write!(formatter, ", ")?;
            }
            first = false;
            match cell.head.get() {
                Some(head) => write_element(&*head, formatter)?,
                None => write!(formatter, "?")?,
            }
            let Some(tail) = cell.tail.get().map(|tail| (*tail).clone()) else {
                write!(formatter, ", ...")?;
                break;
            };
            current = tail;
        }
        write!(formatter, ")")
    }
}

impl<T: fmt::Display> fmt::Display for Stream<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_evaluated(formatter, |element, formatter| write!(formatter, "{element}"))
    }
}

impl<T: fmt::Debug> fmt::Debug for Stream<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_evaluated(formatter, |element, formatter| write!(formatter, "{element:?}"))
    }
}

// =============================================================================
// Type Class Implementations
// =============================================================================

impl<T> TypeConstructor for Stream<T> {
    type Inner = T;
    type WithType<B> = Stream<B>;
}

impl<T: Clone + 'static> Functor for Stream<T> {
    fn fmap<B, F>(self, function: F) -> Stream<B>
    where
        B: Clone + 'static,
        F: Fn(T) -> B + 'static,
    {
        self.map(function)
    }

    fn fmap_ref<B, F>(&self, function: F) -> Stream<B>
    where
        B: Clone + 'static,
        F: Fn(&T) -> B + 'static,
    {
        self.map(move |element| function(&element))
    }
}

impl<T: Clone + 'static> Semigroup for Stream<T> {
    fn combine(self, other: Self) -> Self {
        self.append(&other)
    }
}

impl<T: Clone + 'static> Monoid for Stream<T> {
    fn empty() -> Self {
        Self::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    fn counted(calls: &Rc<Cell<usize>>, value: i32) -> impl FnOnce() -> i32 + 'static {
        let calls = Rc::clone(calls);
        move || {
            calls.set(calls.get() + 1);
            value
        }
    }

    #[rstest]
    fn test_head_is_memoized_across_clones() {
        let calls = Rc::new(Cell::new(0));
        let stream = Stream::cons(counted(&calls, 1), Stream::empty);
        let copy = stream.clone();

        assert_eq!(stream.head(), Some(1));
        assert_eq!(copy.head(), Some(1));
        assert_eq!(stream.head(), Some(1));
        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    fn test_is_head_evaluated_tracks_forcing() {
        let stream = Stream::cons(|| 7, Stream::empty);
        let Stream::Cons(cell) = &stream else {
            panic!("expected a cell");
        };
        assert!(!cell.is_head_evaluated());
        assert_eq!(cell.head(), 7);
        assert!(cell.is_head_evaluated());
    }

    #[rstest]
    fn test_head_does_not_force_tail() {
        let stream = Stream::cons(|| 1, || panic!("tail must not be forced"));
        assert_eq!(stream.head(), Some(1));
        let Stream::Cons(cell) = &stream else {
            panic!("expected a cell");
        };
        assert!(cell.is_head_evaluated());
        assert!(!cell.is_tail_evaluated());
    }

    #[rstest]
    fn test_tail_does_not_force_head() {
        let stream = Stream::cons(|| -> i32 { panic!("head must not be forced") }, || {
            Stream::singleton(2)
        });
        assert_eq!(stream.tail().head(), Some(2));
    }

    #[rstest]
    fn test_empty_accessors_are_total() {
        let empty: Stream<i32> = Stream::empty();
        assert_eq!(empty.head(), None);
        assert!(empty.tail().is_empty());
        assert!(empty.uncons().is_none());
    }

    #[rstest]
    fn test_from_list_creates_cells_on_demand() {
        let list = PersistentList::from_slice(&[1, 2, 3]);
        let stream = list.to_stream();
        let Stream::Cons(cell) = &stream else {
            panic!("expected a cell");
        };
        assert!(!cell.is_tail_evaluated());
        assert_eq!(stream.head(), Some(1));
        assert!(!cell.is_tail_evaluated());
    }

    #[rstest]
    fn test_iterator_does_not_force_beyond_last_taken() {
        let stream = Stream::cons_evaluated(1, || panic!("tail must not be forced"));
        let taken: Vec<i32> = stream.iter().take(1).collect();
        assert_eq!(taken, vec![1]);
    }

    #[rstest]
    fn test_display_shows_only_evaluated_cells() {
        let stream = Stream::of([1, 2, 3]);
        assert_eq!(format!("{stream}"), "Stream(?, ...)");

        let _ = stream.head();
        assert_eq!(format!("{stream}"), "Stream(1, ...)");

        let _ = stream.to_vec();
        assert_eq!(format!("{stream}"), "Stream(1, 2, 3)");
        assert_eq!(format!("{:?}", Stream::<i32>::empty()), "Stream()");
    }

    #[rstest]
    fn test_long_evaluated_stream_drops_without_overflow() {
        let stream: Stream<u32> = (0..200_000).collect();
        assert_eq!(stream.iter().count(), 200_000);
        drop(stream);
    }
}
