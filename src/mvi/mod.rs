//! Unidirectional state-management primitives.
//!
//! This module provides the building blocks for a single-store, unidirectional
//! data flow.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Store::send ──→ Reducer ──→ State ──→ Subscribers
//!    ↑                                                  │
//!    └──────────────────────────────────────────────────┘
//! ```
//!
//! - **Reducer**: pure function `(State, &Action) -> State`
//! - **Lens / Prism**: optics from a large state / action to a small one
//! - **combine**: many reducers over one state, run in order
//! - **pullback**: lift a small reducer into a larger state / action space
//! - **logging**: report each transition to a sink without changing it
//! - **Store**: owns the state, runs the root reducer, notifies subscribers

mod combine;
mod error;
mod logging;
mod optics;
mod pullback;
mod reducer;
mod store;

pub use combine::{combine, Combine};
pub use error::StoreError;
pub use logging::{logging, JsonLinesSink, Logging, TracingSink, TransitionSink};
pub use optics::{Lens, Prism};
pub use pullback::{pullback, Pullback};
pub use reducer::{from_fn, BoxReducer, FnReducer, Reducer, ReducerExt};
pub use store::{Store, Subscription};
