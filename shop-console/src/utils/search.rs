//! Search-as-you-type guards
//!
//! [`Debouncer`] lets only the last call in a burst through. [`LatestFetch`]
//! drops responses that a newer fetch has superseded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Trailing-edge debounce
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay; `Some(value)` only if no later call arrived meanwhile
    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let mine = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        (self.generation.load(Ordering::SeqCst) == mine).then_some(value)
    }
}

/// Identifies one started fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Latest-fetch-wins guard
#[derive(Debug, Default)]
pub struct LatestFetch {
    latest: AtomicU64,
}

impl LatestFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call before issuing a request
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// `Some(value)` when `ticket` is still the newest fetch
    pub fn accept<T>(&self, ticket: FetchTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(ticket = ticket.0, "discarding stale response");
            None
        }
    }
}
