use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Reading the system clock on every node is too slow; the deadline is only
/// checked on every n-th node. The stop signal is checked on every node.
const DEADLINE_POLL_INTERVAL: u64 = 1024;

/// Shared flag raised by whoever owns the turn to cut a search off.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Cooperative time governor polled by the searchers at every node.
#[derive(Debug, Clone, Default)]
pub struct SearchClock {
    stop: StopSignal,
    deadline: Option<Instant>,
}

impl SearchClock {
    /// A clock that only stops when its signal is raised.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(stop: StopSignal, time_limit: Option<Duration>) -> Self {
        Self {
            stop,
            deadline: time_limit.and_then(|limit| Instant::now().checked_add(limit)),
        }
    }

    #[must_use]
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// True once the turn is over. A passed deadline raises the stop signal
    /// so every later poll agrees, whatever the node count.
    pub fn expired(&self, nodes: u64) -> bool {
        if self.stop.is_raised() {
            return true;
        }
        if let Some(deadline) = self.deadline {
            if nodes.is_multiple_of(DEADLINE_POLL_INTERVAL) && Instant::now() >= deadline {
                self.stop.raise();
                return true;
            }
        }
        false
    }
}
