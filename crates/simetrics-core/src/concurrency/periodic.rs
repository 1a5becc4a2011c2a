//! Periodic task spawning

use crate::error::{MetricsError, MetricsResult};
use std::future::Future;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// A named unit of work that runs once per period until cancelled
#[derive(Debug, Clone)]
pub struct PeriodicTask {
    name: String,
    period: Duration,
}

impl PeriodicTask {
    pub fn new(name: impl Into<String>, period: Duration) -> Self {
        Self {
            name: name.into(),
            period,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawn the task on the current Tokio runtime
    ///
    /// The first tick fires one full period after spawning. Each tick awaits
    /// `on_tick` to completion before waiting again; cancellation is observed
    /// between ticks, and nothing runs after it.
    pub fn spawn<F, Fut>(self, token: CancellationToken, mut on_tick: F) -> MetricsResult<TaskHandle>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.period.is_zero() {
            return Err(MetricsError::config(format!(
                "period of task '{}' must be greater than zero",
                self.name
            )));
        }
        let runtime =
            Handle::try_current().map_err(|_| MetricsError::NoRuntime(self.name.clone()))?;

        let PeriodicTask { name, period } = self;
        let task_token = token.clone();
        let join = runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => break,
                    _ = interval.tick() => on_tick().await,
                }
            }
            debug!(task = %name, "Periodic task terminated");
        });

        Ok(TaskHandle { token, join })
    }
}

/// Handle to a spawned [`PeriodicTask`]
///
/// Dropping the handle does not stop the task; call [`TaskHandle::stop`] or
/// cancel a parent token.
#[derive(Debug)]
pub struct TaskHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl TaskHandle {
    /// Cancel this task only
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// Whether cancellation was requested, directly or through a parent
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the task has exited its loop
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Wait for the task to exit
    pub async fn join(self) {
        if let Err(e) = self.join.await {
            if e.is_panic() {
                warn!("Periodic task panicked: {}", e);
            }
        }
    }
}
