use std::collections::BTreeSet;

use crate::mvi::Reducer;

use super::action::FavoritePrimesAction;

/// Reducer over the favorites list itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct FavoritePrimesReducer;

impl Reducer for FavoritePrimesReducer {
    type State = Vec<i64>;
    type Action = FavoritePrimesAction;

    fn reduce(&self, mut state: Self::State, action: &Self::Action) -> Self::State {
        match action {
            FavoritePrimesAction::DeleteFavoritePrimes(indices) => {
                // Highest first so earlier removals don't shift later ones.
                let indices: BTreeSet<usize> = indices.iter().copied().collect();
                for index in indices.into_iter().rev() {
                    if index < state.len() {
                        state.remove(index);
                    }
                }
            }
        }
        state
    }
}
