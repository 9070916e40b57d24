//! State for the counter.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CounterState {
    pub count: i64,
    /// Result of the last nth-prime lookup, shown until dismissed.
    pub alert_nth_prime: Option<u64>,
    pub is_nth_prime_request_in_flight: bool,
}

impl CounterState {
    /// Whether the "nth prime" button should accept presses.
    pub fn can_request_nth_prime(&self) -> bool {
        !self.is_nth_prime_request_in_flight
    }
}
