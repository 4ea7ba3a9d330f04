//! # Fibonacci Backoff
//!
//! Retry delays that grow along the Fibonacci sequence, capped at a maximum.
//! Used by the error policy so a ProviderConfig whose status cannot be read or
//! written does not hammer the API server.

/// Stateful Fibonacci backoff measured in seconds
#[derive(Debug, Clone)]
pub struct FibonacciBackoff {
    max_secs: u64,
    previous: u64,
    current: u64,
}

impl FibonacciBackoff {
    /// Sequence min, min, 2*min, 3*min, 5*min, ... capped at `max_secs`
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        let min_secs = min_secs.max(1);
        Self {
            max_secs: max_secs.max(min_secs),
            previous: 0,
            current: min_secs,
        }
    }

    /// Next delay in seconds, advancing the sequence
    pub fn next_backoff_seconds(&mut self) -> u64 {
        let delay = self.current.min(self.max_secs);
        let next = self.previous.saturating_add(self.current);
        self.previous = self.current;
        self.current = next.min(self.max_secs);
        delay
    }
}
