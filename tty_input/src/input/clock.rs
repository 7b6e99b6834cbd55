// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Time source for the escape deadline.
//!
//! Instants are [`tokio::time::Instant`], so [`SystemClock`] follows tokio's paused
//! clock in `#[tokio::test(start_paused = true)]` tests. [`ManualClock`] is for
//! synchronous tests that step time by hand.

use std::{fmt::Debug,
          sync::{Arc, atomic::{AtomicU64, Ordering}},
          time::Duration};
use tokio::time::Instant;

pub trait Clock: Debug + Send {
    fn now(&self) -> Instant;
}

/// Reads [`tokio::time::Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant { Instant::now() }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed_nanos: Arc<AtomicU64>,
}

impl Default for ManualClock {
    fn default() -> Self { Self::new() }
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Move time forward by `by`.
    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |it| {
                Some(it.saturating_add(nanos))
            })
            .ok();
    }

    /// Time passed since the clock was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::SeqCst))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant { self.origin + self.elapsed() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let clock = ManualClock::new();
        let start = clock.now();
        assert_eq!(clock.now(), start);

        clock.advance(Duration::from_millis(40));
        assert_eq!(clock.now() - start, Duration::from_millis(40));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(Duration::from_millis(7));
        assert_eq!(clock.elapsed(), Duration::from_millis(7));
    }

    #[tokio::test(start_paused = true)]
    async fn system_clock_follows_paused_tokio_time() {
        let clock = SystemClock;
        let start = clock.now();
        tokio::time::advance(Duration::from_millis(250)).await;
        assert_eq!(clock.now() - start, Duration::from_millis(250));
    }
}
