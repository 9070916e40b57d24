//! Actions for the counter.

use serde::Serialize;

/// Actions that can be dispatched to the counter reducer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CounterAction {
    Decrement,
    Increment,

    /// User asked for the nth prime, n being the current count.
    NthPrimeRequested,

    /// Lookup finished. `None` when it failed or had no answer.
    NthPrimeResponse(Option<u64>),

    /// User dismissed the nth-prime alert.
    AlertDismissed,
}
