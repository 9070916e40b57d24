//! Reducer trait and closure adapter.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::combine::Combine;
use super::logging::{Logging, TransitionSink};
use super::optics::{Lens, Prism};
use super::pullback::Pullback;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Action) -> State.
/// An action the reducer does not care about returns the state unchanged.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State;

    /// The action type this reducer handles.
    type Action;

    /// Process an action and return the new state.
    ///
    /// This should be a pure function with no side effects.
    fn reduce(&self, state: Self::State, action: &Self::Action) -> Self::State;
}

/// Type-erased reducer, as held by a `Store` or passed to `combine`.
pub type BoxReducer<S, A> = Box<dyn Reducer<State = S, Action = A> + Send + Sync>;

impl<R: Reducer + ?Sized> Reducer for Box<R> {
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: Self::State, action: &Self::Action) -> Self::State {
        (**self).reduce(state, action)
    }
}

impl<R: Reducer + ?Sized> Reducer for Arc<R> {
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: Self::State, action: &Self::Action) -> Self::State {
        (**self).reduce(state, action)
    }
}

impl<R: Reducer + ?Sized> Reducer for &R {
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: Self::State, action: &Self::Action) -> Self::State {
        (**self).reduce(state, action)
    }
}

/// Reducer backed by a plain function or closure. See [`from_fn`].
pub struct FnReducer<F, S, A> {
    f: F,
    _marker: PhantomData<fn(S, &A) -> S>,
}

impl<F, S, A> Reducer for FnReducer<F, S, A>
where
    F: Fn(S, &A) -> S,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: S, action: &A) -> S {
        (self.f)(state, action)
    }
}

impl<F, S, A> fmt::Debug for FnReducer<F, S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnReducer").finish_non_exhaustive()
    }
}

/// Wrap a function `(State, &Action) -> State` as a [`Reducer`].
pub fn from_fn<F, S, A>(f: F) -> FnReducer<F, S, A>
where
    F: Fn(S, &A) -> S,
{
    FnReducer {
        f,
        _marker: PhantomData,
    }
}

/// Combinator methods available on every reducer.
pub trait ReducerExt: Reducer + Sized {
    /// Lift this reducer into a wider (state, action) domain.
    fn pullback<GS, GA>(
        self,
        lens: Lens<GS, Self::State>,
        prism: Prism<GA, Self::Action>,
    ) -> Pullback<Self, GS, GA> {
        Pullback::new(self, lens, prism)
    }

    /// Run `self`, then `other`, over the same state.
    fn combine_with<R>(self, other: R) -> Combine<Self::State, Self::Action>
    where
        Self: Send + Sync + 'static,
        R: Reducer<State = Self::State, Action = Self::Action> + Send + Sync + 'static,
    {
        Combine::new(vec![self.boxed(), other.boxed()])
    }

    /// Report every transition to `sink` after it completes.
    fn logging<K>(self, sink: K) -> Logging<Self, K>
    where
        K: TransitionSink<Self::State, Self::Action>,
    {
        Logging::new(self, sink)
    }

    fn boxed(self) -> BoxReducer<Self::State, Self::Action>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }
}

impl<R: Reducer + Sized> ReducerExt for R {}
