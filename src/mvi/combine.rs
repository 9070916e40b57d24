//! Parallel composition: many reducers over one (state, action) pair.

use std::fmt;

use super::reducer::{BoxReducer, Reducer};

/// Runs each reducer in order, feeding the state returned by one into the
/// next. Built by [`combine`].
pub struct Combine<S, A> {
    reducers: Vec<BoxReducer<S, A>>,
}

impl<S, A> Combine<S, A> {
    pub fn new(reducers: Vec<BoxReducer<S, A>>) -> Self {
        Self { reducers }
    }

    /// Append another reducer; it runs after the existing ones.
    pub fn push<R>(mut self, reducer: R) -> Self
    where
        R: Reducer<State = S, Action = A> + Send + Sync + 'static,
    {
        self.reducers.push(Box::new(reducer));
        self
    }

    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A> Reducer for Combine<S, A> {
    type State = S;
    type Action = A;

    fn reduce(&self, state: S, action: &A) -> S {
        self.reducers
            .iter()
            .fold(state, |state, reducer| reducer.reduce(state, action))
    }
}

impl<S, A> fmt::Debug for Combine<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combine")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

/// Compose reducers sharing one state and action type.
///
/// Later reducers observe the writes of earlier ones; when two reducers write
/// the same field the last one wins. An empty list is the identity reducer.
pub fn combine<S, A>(reducers: Vec<BoxReducer<S, A>>) -> Combine<S, A> {
    Combine::new(reducers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvi::reducer::{from_fn, ReducerExt};

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Pair {
        left: i32,
        right: i32,
    }

    #[derive(Debug)]
    enum Bump {
        Left,
        Right,
        Both,
    }

    fn left() -> BoxReducer<Pair, Bump> {
        from_fn(|mut state: Pair, action: &Bump| {
            if matches!(action, Bump::Left | Bump::Both) {
                state.left += 1;
            }
            state
        })
        .boxed()
    }

    fn right() -> BoxReducer<Pair, Bump> {
        from_fn(|mut state: Pair, action: &Bump| {
            if matches!(action, Bump::Right | Bump::Both) {
                state.right += 10;
            }
            state
        })
        .boxed()
    }

    #[test]
    fn runs_every_reducer() {
        let reducer = combine(vec![left(), right()]);
        assert_eq!(reducer.len(), 2);
        let state = reducer.reduce(Pair::default(), &Bump::Both);
        assert_eq!(state, Pair { left: 1, right: 10 });
    }

    #[test]
    fn disjoint_reducers_commute() {
        let forward = combine(vec![left(), right()]);
        let backward = combine(vec![right(), left()]);
        for action in [Bump::Left, Bump::Right, Bump::Both] {
            let start = Pair { left: 5, right: -5 };
            assert_eq!(
                forward.reduce(start.clone(), &action),
                backward.reduce(start, &action)
            );
        }
    }

    #[test]
    fn later_reducer_sees_earlier_writes() {
        let set = from_fn(|_: i32, _: &()| 3);
        let double = from_fn(|state: i32, _: &()| state * 2);
        assert_eq!(set.combine_with(double).reduce(0, &()), 6);
    }

    #[test]
    fn overlapping_writes_last_wins() {
        let one = from_fn(|_: i32, _: &()| 1);
        let two = from_fn(|_: i32, _: &()| 2);
        let reducer = combine(vec![one.boxed()]).push(two);
        assert_eq!(reducer.len(), 2);
        assert_eq!(reducer.reduce(0, &()), 2);
    }

    #[test]
    fn empty_combine_is_identity() {
        let reducer: Combine<Pair, Bump> = combine(Vec::new());
        assert!(reducer.is_empty());
        let start = Pair { left: 1, right: 2 };
        assert_eq!(reducer.reduce(start.clone(), &Bump::Both), start);
    }
}
