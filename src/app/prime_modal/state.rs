use serde::Serialize;

/// The slice of application state the modal reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PrimeModalState {
    pub count: i64,
    pub favorite_primes: Vec<i64>,
}

impl PrimeModalState {
    pub fn is_favorite(&self) -> bool {
        self.favorite_primes.contains(&self.count)
    }
}
