//! Pairwise traversal, suffixes, subsequence search and right scans.

use std::rc::Rc;

use super::cons::{Cursor, Stream};

/// Advances one side of a `zip_all`, padding an exhausted side with `None`.
fn advance<T: Clone>(cursor: Cursor<T>) -> (Option<T>, Cursor<T>) {
    match cursor.resolve().next_lazily() {
        Some((head, next)) => (Some(head), next),
        None => (None, Cursor::At(Stream::Empty)),
    }
}

impl<T: 'static> Stream<T> {
    /// Every suffix of this stream, starting with the stream itself and
    /// ending with `Empty`.
    ///
    /// No heads are forced; each suffix after the first forces one tail.
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    ///
    /// let suffixes: Vec<Vec<i32>> = Stream::of([1, 2, 3])
    ///     .tails()
    ///     .iter()
    ///     .map(|suffix| suffix.to_vec())
    ///     .collect();
    /// assert_eq!(suffixes, vec![vec![1, 2, 3], vec![2, 3], vec![3], vec![]]);
    /// ```
    #[must_use]
    pub fn tails(&self) -> Stream<Self> {
        Stream::unfold(Some(Cursor::At(self.clone())), |cursor: Option<Cursor<T>>| {
            let suffix = cursor?.resolve();
            let next = match &suffix {
                Self::Empty => None,
                Self::Cons(cell) => Some(Cursor::After(Rc::clone(cell))),
            };
            Some((next, suffix))
        })
    }
}

impl<T: Clone + 'static> Stream<T> {
    /// Combines elements pairwise. The result is as long as the shorter
    /// input.
    pub fn zip_with<U, V, F>(&self, other: &Stream<U>, function: F) -> Stream<V>
    where
        U: Clone + 'static,
        V: 'static,
        F: Fn(T, U) -> V + 'static,
    {
        Stream::unfold(
            (Cursor::At(self.clone()), Cursor::At(other.clone())),
            move |(left, right)| {
                let (left_head, left_next) = left.resolve().next_lazily()?;
                let (right_head, right_next) = right.resolve().next_lazily()?;
                Some(((left_next, right_next), function(left_head, right_head)))
            },
        )
    }

    /// Pairs elements up, as long as the shorter input.
    #[must_use]
    pub fn zip<U>(&self, other: &Stream<U>) -> Stream<(T, U)>
    where
        U: Clone + 'static,
    {
        self.zip_with(other, |left, right| (left, right))
    }

    /// Pairs elements up, as long as the longer input, padding the shorter
    /// side with `None`.
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    ///
    /// let pairs = Stream::of([1, 2]).zip_all(&Stream::of(['a'])).to_vec();
    /// assert_eq!(pairs, vec![(Some(1), Some('a')), (Some(2), None)]);
    /// ```
    #[must_use]
    pub fn zip_all<U>(&self, other: &Stream<U>) -> Stream<(Option<T>, Option<U>)>
    where
        U: Clone + 'static,
    {
        Stream::unfold(
            (Cursor::At(self.clone()), Cursor::At(other.clone())),
            |(left, right)| match (advance(left), advance(right)) {
                ((None, _), (None, _)) => None,
                ((left_head, left_next), (right_head, right_next)) => {
                    Some(((left_next, right_next), (left_head, right_head)))
                }
            },
        )
    }

    /// Right scan: the fold of every suffix, computed by folding each one
    /// from scratch. Quadratic, and each suffix fold nests one call per
    /// element; [`Stream::scan_right`] computes the same values in one pass.
    pub fn scan_right_via_tails<R, F>(&self, init: R, function: F) -> Stream<R>
    where
        R: Clone + 'static,
        F: Fn(T, &R) -> R + 'static,
    {
        let function = Rc::new(function);
        self.tails().map(move |suffix| {
            let function = Rc::clone(&function);
            suffix.fold_right(init.clone(), move |element, rest| {
                let accumulated = rest();
                function(element, &accumulated)
            })
        })
    }

    /// Right scan: the fold of every suffix, ending with `init`, reusing
    /// each suffix result for the next one.
    ///
    /// The elements are collected front to back and the results computed
    /// back to front in a loop, so long finite streams do not grow the
    /// stack. Forces the whole stream, so it only terminates on finite
    /// streams.
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    ///
    /// let sums = Stream::of([1, 2, 3]).scan_right(0, |element, sum| element + sum);
    /// assert_eq!(sums.to_vec(), vec![6, 5, 3, 0]);
    /// ```
    pub fn scan_right<R, F>(&self, init: R, function: F) -> Stream<R>
    where
        R: Clone + 'static,
        F: Fn(T, &R) -> R,
    {
        let elements = self.to_vec();
        let mut results = Vec::with_capacity(elements.len() + 1);
        let mut accumulated = init;
        for element in elements.into_iter().rev() {
            let next = function(element, &accumulated);
            results.push(std::mem::replace(&mut accumulated, next));
        }
        results.push(accumulated);
        results.reverse();
        Stream::of(results)
    }
}

impl<T: Clone + PartialEq + 'static> Stream<T> {
    /// Returns whether this stream begins with every element of `prefix`.
    /// An empty prefix matches anything; a prefix longer than the stream
    /// never matches.
    ///
    /// Terminates on an infinite stream when `prefix` is finite.
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.zip_all(prefix)
            .take_while(|(_, expected)| expected.is_some())
            .for_all(|(actual, expected)| actual == expected)
    }

    /// Returns whether `sub` occurs as a contiguous run in this stream,
    /// checking each suffix in turn.
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    ///
    /// let stream = Stream::of([1, 2, 3, 4]);
    /// assert!(stream.has_subsequence(&Stream::of([2, 3])));
    /// assert!(!stream.has_subsequence(&Stream::of([3, 2])));
    /// ```
    pub fn has_subsequence(&self, sub: &Self) -> bool {
        let mut current = self.clone();
        loop {
            if current.starts_with(sub) {
                return true;
            }
            let Self::Cons(cell) = &current else {
                return false;
            };
            let next = cell.tail();
            current = next;
        }
    }

    /// [`Stream::has_subsequence`] expressed over [`Stream::tails`].
    pub fn has_subsequence_via_tails(&self, sub: &Self) -> bool {
        let sub = sub.clone();
        self.tails().exists(move |suffix| suffix.starts_with(&sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![1, 2, 3], vec![10, 20], vec![11, 22])]
    #[case(vec![1], vec![10, 20], vec![11])]
    #[case(vec![], vec![10], vec![])]
    fn test_zip_with_is_as_long_as_shorter(
        #[case] left: Vec<i32>,
        #[case] right: Vec<i32>,
        #[case] expected: Vec<i32>,
    ) {
        let sums = Stream::of(left).zip_with(&Stream::of(right), |a, b| a + b);
        assert_eq!(sums.to_vec(), expected);
    }

    #[rstest]
    fn test_zip_with_infinite_stream() {
        let indexed = Stream::counting_from(0_usize).zip(&Stream::of(['a', 'b']));
        assert_eq!(indexed.to_vec(), vec![(0, 'a'), (1, 'b')]);
    }

    #[rstest]
    fn test_zip_all_pads_both_sides() {
        let pairs = Stream::of([1]).zip_all(&Stream::of([1, 2, 3])).to_vec();
        assert_eq!(pairs, vec![(Some(1), Some(1)), (None, Some(2)), (None, Some(3))]);

        let empty: Stream<i32> = Stream::empty();
        assert!(empty.zip_all(&empty).is_empty());
    }

    #[rstest]
    fn test_tails_of_empty_is_single_empty() {
        let empty: Stream<i32> = Stream::empty();
        let tails = empty.tails().to_vec();
        assert_eq!(tails.len(), 1);
        assert!(tails[0].is_empty());
    }

    #[rstest]
    fn test_tails_forces_no_heads() {
        let stream: Stream<i32> = Stream::cons(|| panic!("head"), Stream::empty);
        assert_eq!(stream.tails().iter().count(), 2);
    }

    #[rstest]
    #[case(vec![1, 2, 3], vec![1, 2], true)]
    #[case(vec![1, 2, 3], vec![], true)]
    #[case(vec![1, 2, 3], vec![2], false)]
    #[case(vec![1, 2], vec![1, 2, 3], false)]
    #[case(vec![], vec![], true)]
    fn test_starts_with(#[case] values: Vec<i32>, #[case] prefix: Vec<i32>, #[case] expected: bool) {
        assert_eq!(Stream::of(values).starts_with(&Stream::of(prefix)), expected);
    }

    #[rstest]
    fn test_starts_with_on_infinite_stream() {
        let naturals = Stream::counting_from(1);
        assert!(naturals.starts_with(&Stream::of([1, 2, 3])));
        assert!(!naturals.starts_with(&Stream::of([2])));
    }

    #[rstest]
    #[case(vec![1, 2, 3, 4, 5], vec![2, 3], true)]
    #[case(vec![1, 2, 3, 4, 5], vec![3, 2], false)]
    #[case(vec![1, 2, 3, 4, 5], vec![], true)]
    #[case(vec![1, 2, 3, 4, 5], vec![5], true)]
    #[case(vec![1, 2, 3, 4, 5], vec![5, 6], false)]
    #[case(vec![], vec![1], false)]
    fn test_has_subsequence_variants(
        #[case] values: Vec<i32>,
        #[case] sub: Vec<i32>,
        #[case] expected: bool,
    ) {
        let stream = Stream::of(values);
        let sub = Stream::of(sub);
        assert_eq!(stream.has_subsequence(&sub), expected);
        assert_eq!(stream.has_subsequence_via_tails(&sub), expected);
    }

    #[rstest]
    fn test_scan_right_variants_agree() {
        let stream = Stream::of([1, 2, 3]);
        let expected = vec![6, 5, 3, 0];
        assert_eq!(stream.scan_right(0, |element, sum| element + sum).to_vec(), expected);
        assert_eq!(
            stream.scan_right_via_tails(0, |element, sum| element + sum).to_vec(),
            expected
        );
    }

    #[rstest]
    fn test_scan_right_of_empty_is_init() {
        let empty: Stream<i32> = Stream::empty();
        assert_eq!(empty.scan_right(7, |element, sum| element + sum).to_vec(), vec![7]);
        assert_eq!(
            empty.scan_right_via_tails(7, |element, sum| element + sum).to_vec(),
            vec![7]
        );
    }
}
