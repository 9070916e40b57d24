//! PrimeTime: the demo application built on [`crate::mvi`].
//!
//! Three feature reducers, each written against its own small state and
//! action type, are pulled back into [`AppState`] / [`AppAction`] and
//! combined. The activity feed wraps the result.
//!
//! - `counter/` - count up and down, look up the nth prime
//! - `prime_modal/` - save or remove the current count as a favorite
//! - `favorite_primes/` - delete saved favorites
//! - `activity.rs` - higher-order reducer recording favorite changes
//! - `primes.rs` - primality, ordinals, nth-prime lookup

pub mod activity;
pub mod counter;
pub mod favorite_primes;
pub mod prime_modal;
pub mod primes;

use serde::Serialize;

use crate::mvi::{combine, Lens, Prism, Reducer, ReducerExt};
use crate::{lens, prism};

pub use activity::{activity_feed, Activity, ActivityFeed};
pub use counter::{CounterAction, CounterReducer, CounterState};
pub use favorite_primes::{FavoritePrimesAction, FavoritePrimesReducer};
pub use prime_modal::{PrimeModalAction, PrimeModalReducer, PrimeModalState};

/// Root application state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AppState {
    pub count: i64,
    pub favorite_primes: Vec<i64>,
    pub activity_feed: Vec<Activity>,
    pub alert_nth_prime: Option<u64>,
    pub is_nth_prime_request_in_flight: bool,
}

impl AppState {
    pub fn with_count(count: i64) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    pub fn counter(&self) -> CounterState {
        CounterState {
            count: self.count,
            alert_nth_prime: self.alert_nth_prime,
            is_nth_prime_request_in_flight: self.is_nth_prime_request_in_flight,
        }
    }

    pub fn prime_modal(&self) -> PrimeModalState {
        PrimeModalState {
            count: self.count,
            favorite_primes: self.favorite_primes.clone(),
        }
    }
}

/// Root action: one case per feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AppAction {
    Counter(CounterAction),
    PrimeModal(PrimeModalAction),
    FavoritePrimes(FavoritePrimesAction),
}

pub fn counter_lens() -> Lens<AppState, CounterState> {
    Lens::new(AppState::counter, |state: &mut AppState, local: CounterState| {
        state.count = local.count;
        state.alert_nth_prime = local.alert_nth_prime;
        state.is_nth_prime_request_in_flight = local.is_nth_prime_request_in_flight;
    })
}

pub fn prime_modal_lens() -> Lens<AppState, PrimeModalState> {
    Lens::new(
        AppState::prime_modal,
        |state: &mut AppState, local: PrimeModalState| {
            state.count = local.count;
            state.favorite_primes = local.favorite_primes;
        },
    )
}

pub fn favorite_primes_lens() -> Lens<AppState, Vec<i64>> {
    lens!(AppState, favorite_primes)
}

pub fn counter_prism() -> Prism<AppAction, CounterAction> {
    prism!(AppAction::Counter)
}

pub fn prime_modal_prism() -> Prism<AppAction, PrimeModalAction> {
    prism!(AppAction::PrimeModal)
}

pub fn favorite_primes_prism() -> Prism<AppAction, FavoritePrimesAction> {
    prism!(AppAction::FavoritePrimes)
}

/// The application's root reducer.
pub fn app_reducer() -> impl Reducer<State = AppState, Action = AppAction> + Send + Sync + 'static
{
    activity_feed(combine(vec![
        CounterReducer
            .pullback(counter_lens(), counter_prism())
            .boxed(),
        PrimeModalReducer
            .pullback(prime_modal_lens(), prime_modal_prism())
            .boxed(),
        FavoritePrimesReducer
            .pullback(favorite_primes_lens(), favorite_primes_prism())
            .boxed(),
    ]))
}
