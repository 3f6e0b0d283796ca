//! Bounded execution window for a resolution call.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

/// Why a future run inside a [`TimeoutScope`] did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeExit {
    /// The inbound cancellation signal fired.
    Cancelled,
    /// The configured duration elapsed.
    DeadlineElapsed(Duration),
}

/// A scope that ends at whichever comes first: cancellation of the parent
/// token or the deadline.
///
/// The deadline is fixed when the scope is created, so every future run
/// inside the same scope shares it. Dropping the scope cancels its child
/// token.
#[derive(Debug)]
pub struct TimeoutScope {
    token: CancellationToken,
    deadline: Instant,
    duration: Duration,
}

impl TimeoutScope {
    pub fn new(parent: &CancellationToken, duration: Duration) -> Self {
        Self {
            token: parent.child_token(),
            deadline: Instant::now() + duration,
            duration,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `future` until it completes or the scope ends.
    pub async fn run<F>(&self, future: F) -> Result<F::Output, ScopeExit>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(ScopeExit::Cancelled),
            _ = sleep_until(self.deadline) => Err(ScopeExit::DeadlineElapsed(self.duration)),
            output = future => Ok(output),
        }
    }
}

impl Drop for TimeoutScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
