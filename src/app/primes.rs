//! Prime helpers and the nth-prime lookup used by the counter screen.

use thiserror::Error;

/// Default upper bound on `n` for [`SieveLookup`].
pub const DEFAULT_MAX_N: u64 = 10_000;

/// Largest `n` a [`SieveLookup`] can be configured for. The sieve for this
/// bound needs about 16 MB.
pub const MAX_LOOKUP_N: u64 = 1_000_000;

pub fn is_prime(p: i64) -> bool {
    if p <= 1 {
        return false;
    }
    if p <= 3 {
        return true;
    }
    if p % 2 == 0 {
        return false;
    }
    let mut i = 3;
    while i <= p / i {
        if p % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st, ...
pub fn ordinal(n: i64) -> String {
    let abs = n.unsigned_abs();
    let suffix = match (abs % 10, abs % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("there is no {} prime; n must be at least 1", ordinal_of(.0))]
    InvalidIndex(i64),

    #[error("the {} prime is beyond the lookup limit of n = {max}", ordinal_of(.n))]
    OutOfRange { n: i64, max: u64 },
}

fn ordinal_of(n: &i64) -> String {
    ordinal(*n)
}

/// Answers "what is the nth prime?".
///
/// Implementations may be slow or remote; callers run them off the dispatch
/// path and feed the answer back to the store as an action.
pub trait PrimeLookup: Send + Sync {
    fn nth_prime(&self, n: i64) -> Result<u64, LookupError>;
}

/// Local lookup using a sieve of Eratosthenes.
#[derive(Debug, Clone, Copy)]
pub struct SieveLookup {
    max_n: u64,
}

impl SieveLookup {
    /// Lookup answering `n <= max_n`, with `max_n` capped at [`MAX_LOOKUP_N`].
    pub fn new(max_n: u64) -> Self {
        Self {
            max_n: max_n.min(MAX_LOOKUP_N),
        }
    }

    pub fn max_n(&self) -> u64 {
        self.max_n
    }
}

impl Default for SieveLookup {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_N)
    }
}

impl PrimeLookup for SieveLookup {
    fn nth_prime(&self, n: i64) -> Result<u64, LookupError> {
        if n < 1 {
            return Err(LookupError::InvalidIndex(n));
        }
        let index = n.unsigned_abs();
        if index > self.max_n {
            return Err(LookupError::OutOfRange { n, max: self.max_n });
        }

        let limit = sieve_limit(index);
        let mut composite = vec![false; limit + 1];
        let mut found = 0u64;
        for candidate in 2..=limit {
            if composite[candidate] {
                continue;
            }
            found += 1;
            if found == index {
                return Ok(candidate as u64);
            }
            let mut multiple = candidate * candidate;
            while multiple <= limit {
                composite[multiple] = true;
                multiple += candidate;
            }
        }
        // Rosser's bound guarantees the nth prime is below the limit.
        unreachable!("sieve limit {limit} too small for n = {n}")
    }
}

/// Upper bound for the nth prime: n (ln n + ln ln n) for n >= 6.
fn sieve_limit(n: u64) -> usize {
    if n < 6 {
        return 15;
    }
    let n = n as f64;
    (n * (n.ln() + n.ln().ln())).ceil() as usize
}
