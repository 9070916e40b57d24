use crate::mvi::Reducer;

use super::action::PrimeModalAction;
use super::state::PrimeModalState;

#[derive(Debug, Clone, Copy, Default)]
pub struct PrimeModalReducer;

impl Reducer for PrimeModalReducer {
    type State = PrimeModalState;
    type Action = PrimeModalAction;

    fn reduce(&self, mut state: Self::State, action: &Self::Action) -> Self::State {
        match action {
            PrimeModalAction::SaveFavoritePrime => {
                // Already saved: keep the list free of duplicates
                if !state.is_favorite() {
                    state.favorite_primes.push(state.count);
                }
            }
            PrimeModalAction::RemoveFavoritePrime => {
                let count = state.count;
                state.favorite_primes.retain(|prime| *prime != count);
            }
        }
        state
    }
}
