//! Corecursive stream generation.

use std::ops::Add;
use std::rc::Rc;

use super::cons::{Cursor, Stream};

impl<T: 'static> Stream<T> {
    /// Generates a stream from a seed.
    ///
    /// `step` receives the current state and returns either `None` to end
    /// the stream or the next state paired with the next element. The first
    /// step runs immediately; every later step runs when the tail before it
    /// is forced, so an infinite generator costs nothing until consumed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    ///
    /// let countdown = Stream::unfold(3, |remaining| {
    ///     (remaining > 0).then(|| (remaining - 1, remaining))
    /// });
    /// assert_eq!(countdown.to_vec(), vec![3, 2, 1]);
    /// ```
    pub fn unfold<S, F>(seed: S, step: F) -> Self
    where
        S: 'static,
        F: Fn(S) -> Option<(S, T)> + 'static,
    {
        Self::unfold_shared(seed, Rc::new(step))
    }

    fn unfold_shared<S, F>(seed: S, step: Rc<F>) -> Self
    where
        S: 'static,
        F: Fn(S) -> Option<(S, T)> + 'static,
    {
        match step(seed) {
            None => Self::Empty,
            Some((next, value)) => {
                Self::cons_evaluated(value, move || Self::unfold_shared(next, step))
            }
        }
    }
}

impl<T: Clone + 'static> Stream<T> {
    /// The infinite stream `seed, f(seed), f(f(seed)), ...`.
    ///
    /// Each successor is computed when the tail holding it is forced, never
    /// ahead of demand.
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    ///
    /// let powers = Stream::iterate(1_u32, |value| value * 2).take(5).to_vec();
    /// assert_eq!(powers, vec![1, 2, 4, 8, 16]);
    /// ```
    pub fn iterate<F>(seed: T, function: F) -> Self
    where
        F: Fn(&T) -> T + 'static,
    {
        Self::unfold((seed, false), move |(previous, advance)| {
            let current = if advance { function(&previous) } else { previous };
            Some(((current.clone(), true), current))
        })
    }

    /// The infinite stream repeating `value`.
    pub fn constant(value: T) -> Self {
        Self::unfold((), move |()| Some(((), value.clone())))
    }

    /// Maps each element through `function` by corecursion over the source.
    ///
    /// Unlike [`Stream::map`], the first result is computed eagerly and every
    /// later result is computed together with the tail that holds it.
    pub fn map_via_unfold<B, F>(&self, function: F) -> Stream<B>
    where
        B: 'static,
        F: Fn(T) -> B + 'static,
    {
        Stream::unfold(Cursor::At(self.clone()), move |cursor| {
            let (head, next) = cursor.resolve().next_lazily()?;
            Some((next, function(head)))
        })
    }
}

impl<T> Stream<T>
where
    T: Clone + Add<Output = T> + From<u8> + 'static,
{
    /// The infinite stream `start, start + 1, start + 2, ...`.
    ///
    /// ```rust
    /// use cons_stream::stream::Stream;
    ///
    /// assert_eq!(Stream::counting_from(5_i64).take(3).to_vec(), vec![5, 6, 7]);
    /// ```
    pub fn counting_from(start: T) -> Self {
        Self::iterate(start, |value| value.clone() + T::from(1))
    }
}

impl Stream<u64> {
    /// The Fibonacci numbers `0, 1, 1, 2, 3, 5, ...`.
    ///
    /// The stream ends after the last term that fits in a `u64` instead of
    /// overflowing.
    pub fn fibonacci() -> Self {
        Self::unfold(Some((0_u64, Some(1_u64))), |state| {
            let (current, next) = state?;
            Some((next.map(|next| (next, current.checked_add(next))), current))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn test_unfold_runs_first_step_eagerly_and_rest_on_demand() {
        let steps = Rc::new(Cell::new(0));
        let counter = Rc::clone(&steps);
        let stream = Stream::unfold(0, move |state: i32| {
            counter.set(counter.get() + 1);
            Some((state + 1, state))
        });

        assert_eq!(steps.get(), 1);
        assert_eq!(stream.head(), Some(0));
        assert_eq!(steps.get(), 1);

        let _ = stream.tail();
        let _ = stream.tail();
        assert_eq!(steps.get(), 2);
    }

    #[rstest]
    fn test_unfold_ending_immediately_is_empty() {
        let stream: Stream<i32> = Stream::unfold((), |()| None);
        assert!(stream.is_empty());
    }

    #[rstest]
    #[case(0, vec![0, 1, 2, 3])]
    #[case(-2, vec![-2, -1, 0, 1])]
    fn test_counting_from(#[case] start: i32, #[case] expected: Vec<i32>) {
        assert_eq!(Stream::counting_from(start).take(4).to_vec(), expected);
    }

    #[rstest]
    fn test_counting_from_maximum_does_not_compute_successor() {
        assert_eq!(Stream::counting_from(i32::MAX).take(1).to_vec(), vec![i32::MAX]);
        assert_eq!(Stream::counting_from(i32::MAX).take_via_unfold(1).to_vec(), vec![i32::MAX]);
        assert_eq!(Stream::counting_from(u8::MAX).head(), Some(u8::MAX));
    }

    #[rstest]
    fn test_iterate_applies_function_only_on_demand() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let stream = Stream::iterate(1_u64, move |value| {
            counter.set(counter.get() + 1);
            value * 2
        });

        assert_eq!(calls.get(), 0);
        assert_eq!(stream.take(3).to_vec(), vec![1, 2, 4]);
        assert_eq!(calls.get(), 2);
    }

    #[rstest]
    fn test_constant_repeats() {
        assert_eq!(Stream::constant('x').take(3).to_vec(), vec!['x', 'x', 'x']);
    }

    #[rstest]
    fn test_fibonacci_ends_before_overflow() {
        let terms = Stream::fibonacci().to_vec();
        assert_eq!(terms.len(), 94);
        assert_eq!(terms.last(), Some(&12_200_160_415_121_876_738));
    }

    #[rstest]
    fn test_map_via_unfold_matches_map() {
        let source = Stream::of(1..=5);
        assert_eq!(
            source.map_via_unfold(|value| value * 3).to_vec(),
            source.map(|value| value * 3).to_vec()
        );
    }
}
