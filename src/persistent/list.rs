//! Persistent (immutable) singly-linked list.
//!
//! [`PersistentList`] is a cons-list: either empty or an element in front
//! of another list. Prepending shares the existing list as the new tail,
//! so no list is ever copied or mutated after construction.
//!
//! - O(1) prepend (`cons`), head, tail and length
//! - O(n) append and reverse
//!
//! Lists are the finite materialization target of
//! [`Stream::to_list`](crate::stream::Stream::to_list) and the input of
//! [`PersistentList::to_stream`].
//!
//! # Examples
//!
//! ```rust
//! use cons_stream::persistent::PersistentList;
//!
//! let list = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Some(&1));
//! assert_eq!(list.len(), 3);
//!
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);
//! assert_eq!(extended.len(), 4);
//! ```
//!
//! # Structural Sharing
//!
//! ```text
//! list1: 1 -> 2 -> 3 -> nil
//! list2 = list1.cons(0): 0 -> [1 -> 2 -> 3 -> nil]  // shares [1, 2, 3] with list1
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::rc::Rc;

use crate::typeclass::{Foldable, Functor, Monoid, Semigroup, TypeConstructor};

struct Node<T> {
    element: T,
    next: Option<Rc<Self>>,
}

/// Unlinks uniquely owned successors one at a time, so dropping a long
/// list does not recurse once per node.
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(node) = next {
            match Rc::try_unwrap(node) {
                Ok(mut node) => next = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

/// A persistent (immutable) singly-linked list.
///
/// # Time Complexity
///
/// | Operation | Complexity |
/// |-----------|------------|
/// | `new`     | O(1)       |
/// | `cons`    | O(1)       |
/// | `head`    | O(1)       |
/// | `tail`    | O(1)       |
/// | `len`     | O(1)       |
/// | `append`  | O(n)       |
/// | `reverse` | O(n)       |
pub struct PersistentList<T> {
    head: Option<Rc<Node<T>>>,
    /// Cached length for O(1) access.
    length: usize,
}

impl<T> Clone for PersistentList<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            length: self.length,
        }
    }
}

impl<T> PersistentList<T> {
    /// Creates a new empty list.
    ///
    /// ```rust
    /// use cons_stream::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = PersistentList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            length: 0,
        }
    }

    /// Creates a list containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().cons(element)
    }

    /// Builds a list in the same order as `elements`, popping from the back.
    fn build_from_vec(mut elements: Vec<T>) -> Self {
        let length = elements.len();
        let mut head: Option<Rc<Node<T>>> = None;
        while let Some(element) = elements.pop() {
            head = Some(Rc::new(Node {
                element,
                next: head,
            }));
        }
        Self { head, length }
    }

    /// Prepends an element, sharing `self` as the tail.
    ///
    /// ```rust
    /// use cons_stream::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(2).cons(1);
    /// assert_eq!(list.head(), Some(&1));
    /// ```
    #[inline]
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        Self {
            head: Some(Rc::new(Node {
                element,
                next: self.head.clone(),
            })),
            length: self.length + 1,
        }
    }

    /// Returns the first element, or `None` for the empty list.
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.element)
    }

    /// Returns the list without its first element. The tail of the empty
    /// list is the empty list.
    ///
    /// ```rust
    /// use cons_stream::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.tail().head(), Some(&2));
    /// ```
    #[inline]
    #[must_use]
    pub fn tail(&self) -> Self {
        self.head.as_ref().map_or_else(Self::new, |node| Self {
            head: node.next.clone(),
            length: self.length.saturating_sub(1),
        })
    }

    /// Splits the list into its head and tail, or `None` when empty.
    #[inline]
    #[must_use]
    pub fn uncons(&self) -> Option<(&T, Self)> {
        self.head.as_ref().map(|node| {
            let tail = Self {
                head: node.next.clone(),
                length: self.length.saturating_sub(1),
            };
            (&node.element, tail)
        })
    }

    /// Returns the number of elements (cached).
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns an iterator over references to the elements, front to back.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> PersistentListIterator<'_, T> {
        PersistentListIterator {
            current: self.head.as_deref(),
        }
    }

    /// Drops the first `count` elements. Shares the remaining nodes.
    ///
    /// ```rust
    /// use cons_stream::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=5).collect();
    /// assert_eq!(list.drop_first(3), PersistentList::from_slice(&[4, 5]));
    /// assert!(list.drop_first(10).is_empty());
    /// ```
    #[must_use]
    pub fn drop_first(&self, count: usize) -> Self {
        let mut current = self.clone();
        for _ in 0..count.min(self.len()) {
            current = current.tail();
        }
        current
    }

    /// Drops the longest prefix whose elements all satisfy `predicate`.
    ///
    /// ```rust
    /// use cons_stream::persistent::PersistentList;
    ///
    /// let list = PersistentList::from_slice(&[1, 1, 1, 2, 3, 1]);
    /// assert_eq!(list.drop_while(|value| *value == 1), PersistentList::from_slice(&[2, 3, 1]));
    /// ```
    #[must_use]
    pub fn drop_while<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let mut current = self.clone();
        while current.head().is_some_and(&mut predicate) {
            current = current.tail();
        }
        current
    }
}

impl<T: Clone> PersistentList<T> {
    /// Builds a list from a slice, preserving order.
    #[must_use]
    pub fn from_slice(slice: &[T]) -> Self {
        let mut head: Option<Rc<Node<T>>> = None;
        for element in slice.iter().rev() {
            head = Some(Rc::new(Node {
                element: element.clone(),
                next: head,
            }));
        }
        Self {
            head,
            length: slice.len(),
        }
    }

    /// Replaces the first element. The empty list stays empty.
    ///
    /// ```rust
    /// use cons_stream::persistent::PersistentList;
    ///
    /// let list = PersistentList::from_slice(&[1, 2, 3]);
    /// assert_eq!(list.set_head(5), PersistentList::from_slice(&[5, 2, 3]));
    /// ```
    #[must_use]
    pub fn set_head(&self, element: T) -> Self {
        if self.is_empty() {
            self.clone()
        } else {
            self.tail().cons(element)
        }
    }

    /// Returns the elements of `self` followed by the elements of `other`.
    /// `other` is shared, not copied.
    ///
    /// ```rust
    /// use cons_stream::persistent::PersistentList;
    ///
    /// let front = PersistentList::from_slice(&[1, 2, 3]);
    /// let back = PersistentList::from_slice(&[4, 5, 6]);
    /// assert_eq!(front.append(&back), PersistentList::from_slice(&[1, 2, 3, 4, 5, 6]));
    /// ```
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }

        let mut elements: Vec<T> = self.iter().cloned().collect();
        let mut head = other.head.clone();
        while let Some(element) = elements.pop() {
            head = Some(Rc::new(Node {
                element,
                next: head,
            }));
        }
        Self {
            head,
            length: self.length + other.length,
        }
    }

    /// Returns the elements in reverse order.
    #[must_use]
    pub fn reverse(&self) -> Self {
        self.iter()
            .fold(Self::new(), |reversed, element| reversed.cons(element.clone()))
    }

    /// Keeps the elements satisfying `predicate`, in order.
    ///
    /// ```rust
    /// use cons_stream::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=5).collect();
    /// assert_eq!(list.filter(|value| value % 2 == 0), PersistentList::from_slice(&[2, 4]));
    /// ```
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        self.iter()
            .filter(|element| predicate(element))
            .cloned()
            .collect()
    }

    /// Maps every element to a list and concatenates the results.
    ///
    /// ```rust
    /// use cons_stream::persistent::PersistentList;
    ///
    /// let list = PersistentList::from_slice(&[1, 2, 3]);
    /// let result = list.flat_map(|value| PersistentList::from_slice(&[*value, value * 2]));
    /// assert_eq!(result, PersistentList::from_slice(&[1, 2, 2, 4, 3, 6]));
    /// ```
    #[must_use]
    pub fn flat_map<B, F>(&self, mut function: F) -> PersistentList<B>
    where
        B: Clone,
        F: FnMut(&T) -> PersistentList<B>,
    {
        let elements: Vec<B> = self
            .iter()
            .flat_map(|element| function(element).into_iter())
            .collect();
        PersistentList::build_from_vec(elements)
    }

    /// Combines elements pairwise, stopping at the end of the shorter list.
    ///
    /// ```rust
    /// use cons_stream::persistent::PersistentList;
    ///
    /// let left = PersistentList::from_slice(&[1, 2, 3]);
    /// let right = PersistentList::from_slice(&[1, 4, 6, 8]);
    /// assert_eq!(left.zip_with(&right, |a, b| a + b), PersistentList::from_slice(&[2, 6, 9]));
    /// ```
    #[must_use]
    pub fn zip_with<U, R, F>(&self, other: &PersistentList<U>, mut function: F) -> PersistentList<R>
    where
        F: FnMut(&T, &U) -> R,
    {
        let elements: Vec<R> = self
            .iter()
            .zip(other.iter())
            .map(|(left, right)| function(left, right))
            .collect();
        PersistentList::build_from_vec(elements)
    }
}

impl<T: PartialEq> PersistentList<T> {
    /// Returns `true` if `prefix` is a prefix of `self`. Every list starts
    /// with the empty list; no list starts with a longer one.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        prefix.len() <= self.len() && self.iter().zip(prefix.iter()).all(|(a, b)| a == b)
    }

    /// Returns `true` if `sub` occurs as a contiguous run anywhere in
    /// `self`. The empty list occurs in every list.
    ///
    /// ```rust
    /// use cons_stream::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=6).collect();
    /// assert!(list.has_subsequence(&PersistentList::from_slice(&[5, 6])));
    /// assert!(!list.has_subsequence(&PersistentList::from_slice(&[6, 5])));
    /// ```
    #[must_use]
    pub fn has_subsequence(&self, sub: &Self) -> bool {
        let mut suffix = self.clone();
        loop {
            if suffix.starts_with(sub) {
                return true;
            }
            if suffix.is_empty() {
                return false;
            }
            suffix = suffix.tail();
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to elements of a [`PersistentList`].
pub struct PersistentListIterator<'a, T> {
    current: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for PersistentListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_deref();
            &node.element
        })
    }
}

/// An owning iterator over elements of a [`PersistentList`].
pub struct PersistentListIntoIterator<T> {
    list: PersistentList<T>,
}

impl<T: Clone> Iterator for PersistentListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (head, tail) = self.list.uncons().map(|(head, tail)| (head.clone(), tail))?;
        self.list = tail;
        Some(head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.length, Some(self.list.length))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentListIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for PersistentList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for PersistentList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::build_from_vec(iter.into_iter().collect())
    }
}

impl<T: Clone> IntoIterator for PersistentList<T> {
    type Item = T;
    type IntoIter = PersistentListIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        PersistentListIntoIterator { list: self }
    }
}

impl<'a, T> IntoIterator for &'a PersistentList<T> {
    type Item = &'a T;
    type IntoIter = PersistentListIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for PersistentList<T> {}

impl<T: Hash> Hash for PersistentList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        for (index, element) in self.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Type Class Implementations
// =============================================================================

impl<T> TypeConstructor for PersistentList<T> {
    type Inner = T;
    type WithType<B> = PersistentList<B>;
}

impl<T: Clone> Functor for PersistentList<T> {
    fn fmap<B, F>(self, function: F) -> PersistentList<B>
    where
        B: Clone + 'static,
        F: Fn(T) -> B + 'static,
    {
        self.into_iter().map(function).collect()
    }

    fn fmap_ref<B, F>(&self, function: F) -> PersistentList<B>
    where
        B: Clone + 'static,
        F: Fn(&T) -> B + 'static,
    {
        self.iter().map(function).collect()
    }
}

impl<T: Clone> Foldable for PersistentList<T> {
    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, T) -> B,
    {
        self.into_iter().fold(init, function)
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(T, B) -> B,
    {
        let elements: Vec<T> = self.into_iter().collect();
        elements
            .into_iter()
            .rev()
            .fold(init, |accumulator, element| function(element, accumulator))
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }
}

impl<T: Clone> Semigroup for PersistentList<T> {
    fn combine(self, other: Self) -> Self {
        self.append(&other)
    }
}

impl<T: Clone> Monoid for PersistentList<T> {
    fn empty() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
