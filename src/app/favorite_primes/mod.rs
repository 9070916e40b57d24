//! Favorite primes list: shows the saved primes and deletes them by position.

mod action;
mod reducer;

pub use action::FavoritePrimesAction;
pub use reducer::FavoritePrimesReducer;
