use std::time::Duration;
use tokio::time::{Instant, sleep_until};

/// A one-shot, re-armable tick source
///
/// At most one tick is outstanding. After each tick fires the owner decides
/// whether to arm the next one and with which interval, so the cadence can
/// change from one tick to the next. Cancelling simply forgets the deadline.
#[derive(Debug, Default)]
pub struct TickScheduler {
    deadline: Option<Instant>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the next tick `after` from now, replacing any pending one
    pub fn schedule(&mut self, after: Duration) {
        self.deadline = Some(Instant::now() + after);
    }

    /// Drop the pending tick, if any
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Resolve when the armed tick is due, disarming it
    ///
    /// Never resolves while nothing is armed. Safe to use as a `select!` branch:
    /// dropping the future before it completes leaves the deadline in place.
    pub async fn fired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending().await,
        }
    }
}
