//! "Is this prime?" modal: save or remove the current number as a favorite.

mod action;
mod reducer;
mod state;

pub use action::PrimeModalAction;
pub use reducer::PrimeModalReducer;
pub use state::PrimeModalState;
