//! Errors reported by [`Store`](super::Store).

use thiserror::Error;

/// Contract violations detected by a store.
///
/// Reducers themselves have no error channel: an action a reducer does not
/// handle is a no-op, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store (or the root it forwards to) has been disposed.
    #[error("store has been disposed")]
    Disposed,

    /// `send` was called while the same thread was still dispatching an
    /// earlier action, e.g. from a subscriber or a reducer.
    #[error("re-entrant send: the store is already dispatching an action on this thread")]
    Reentrant,
}
