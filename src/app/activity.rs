//! Activity feed: a higher-order reducer that records favorite-prime changes.

use serde::Serialize;

use crate::mvi::Reducer;

use super::favorite_primes::FavoritePrimesAction;
use super::prime_modal::PrimeModalAction;
use super::{AppAction, AppState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Activity {
    AddedFavoritePrime(i64),
    RemovedFavoritePrime(i64),
}

/// Wrapper built by [`activity_feed`].
#[derive(Debug, Clone)]
pub struct ActivityFeed<R> {
    reducer: R,
}

/// Wrap `reducer` so favorite-prime changes are appended to
/// `AppState::activity_feed`.
///
/// Entries are computed from the state before the wrapped reducer runs, so a
/// delete records the primes that were at the deleted positions.
pub fn activity_feed<R>(reducer: R) -> ActivityFeed<R>
where
    R: Reducer<State = AppState, Action = AppAction>,
{
    ActivityFeed { reducer }
}

impl<R> Reducer for ActivityFeed<R>
where
    R: Reducer<State = AppState, Action = AppAction>,
{
    type State = AppState;
    type Action = AppAction;

    fn reduce(&self, mut state: AppState, action: &AppAction) -> AppState {
        let entries = activities(&state, action);
        state.activity_feed.extend(entries);
        self.reducer.reduce(state, action)
    }
}

fn activities(state: &AppState, action: &AppAction) -> Vec<Activity> {
    let is_favorite = state.favorite_primes.contains(&state.count);
    match action {
        AppAction::PrimeModal(PrimeModalAction::SaveFavoritePrime) if !is_favorite => {
            vec![Activity::AddedFavoritePrime(state.count)]
        }
        AppAction::PrimeModal(PrimeModalAction::RemoveFavoritePrime) if is_favorite => {
            vec![Activity::RemovedFavoritePrime(state.count)]
        }
        AppAction::FavoritePrimes(FavoritePrimesAction::DeleteFavoritePrimes(indices)) => {
            let mut indices = indices.clone();
            indices.sort_unstable();
            indices.dedup();
            indices
                .into_iter()
                .filter_map(|index| state.favorite_primes.get(index).copied())
                .map(Activity::RemovedFavoritePrime)
                .collect()
        }
        _ => Vec::new(),
    }
}
