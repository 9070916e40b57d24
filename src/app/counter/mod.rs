//! Counter feature module.
//!
//! Increments and decrements the current number and tracks the nth-prime
//! lookup for it.
//!
//! # Architecture
//!
//! - `state.rs` - Counter state (count, lookup alert, in-flight flag)
//! - `action.rs` - User and lookup events
//! - `reducer.rs` - State transitions (pure, no side effects)

mod action;
mod reducer;
mod state;

pub use action::CounterAction;
pub use reducer::CounterReducer;
pub use state::CounterState;
