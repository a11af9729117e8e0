use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source, nanoseconds since an arbitrary origin.
pub trait Clock: Clone + Send + Sync {
    fn now_ns(&self) -> u64;

    fn elapsed(&self, since_ns: u64) -> Duration {
        Duration::from_nanos(self.now_ns().saturating_sub(since_ns))
    }
}

/// Production clock backed by `Instant`.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ns(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }
}

/// Test clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ns: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now_ns
            .fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ns(&self) -> u64 {
        self.now_ns.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    token: u64,
    due_ns: u64,
}

/// Cancellable per-trial countdown keyed by a trial token.
///
/// At most one deadline is armed at a time: arming replaces any prior
/// deadline, so a stale trial's countdown can never fire once the next trial
/// has started. Cancellation is idempotent.
#[derive(Debug, Clone)]
pub struct DeadlineTimer<C: Clock> {
    clock: C,
    armed: Option<Deadline>,
}

impl<C: Clock> DeadlineTimer<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, armed: None }
    }

    /// Start a countdown for `token`, replacing any armed deadline.
    pub fn arm(&mut self, token: u64, duration: Duration) {
        self.armed = Some(Deadline {
            token,
            due_ns: self.clock.now_ns() + duration.as_nanos() as u64,
        });
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// Token of the armed deadline, if any.
    pub fn armed_token(&self) -> Option<u64> {
        self.armed.map(|d| d.token)
    }

    /// Time left before expiry; `None` when nothing is armed.
    pub fn remaining(&self) -> Option<Duration> {
        self.armed
            .map(|d| Duration::from_nanos(d.due_ns.saturating_sub(self.clock.now_ns())))
    }

    /// Disarm and yield the token if the deadline has expired. Expiry fires
    /// at most once per armed deadline.
    pub fn poll(&mut self) -> Option<u64> {
        let due = self.armed.filter(|d| self.clock.now_ns() >= d.due_ns)?;
        self.armed = None;
        Some(due.token)
    }
}
