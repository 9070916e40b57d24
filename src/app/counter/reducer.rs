//! Reducer for the counter.

use crate::mvi::Reducer;

use super::action::CounterAction;
use super::state::CounterState;

/// Reducer for counter state transitions.
///
/// The lookup itself runs outside the reducer; the driver reports its
/// outcome back with `NthPrimeResponse`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Action = CounterAction;

    fn reduce(&self, mut state: Self::State, action: &Self::Action) -> Self::State {
        match action {
            CounterAction::Decrement => {
                state.count = state.count.saturating_sub(1);
            }
            CounterAction::Increment => {
                state.count = state.count.saturating_add(1);
            }
            CounterAction::NthPrimeRequested => {
                state.is_nth_prime_request_in_flight = true;
            }
            CounterAction::NthPrimeResponse(prime) => {
                state.alert_nth_prime = *prime;
                state.is_nth_prime_request_in_flight = false;
            }
            CounterAction::AlertDismissed => {
                state.alert_nth_prime = None;
            }
        }
        state
    }
}
