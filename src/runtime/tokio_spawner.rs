//! Tokio runtime spawner implementation.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::core::{ScheduledTask, Spawn, TaskHandle, TickFn, TicketingError};

/// Tokio-based spawner that runs each periodic task as a tokio task.
#[derive(Clone)]
pub struct TokioSpawner {
    handle: Arc<tokio::runtime::Handle>,
}

impl TokioSpawner {
    /// Create a `TokioSpawner` from a tokio runtime handle.
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self {
            handle: Arc::new(handle),
        }
    }

    /// Create a `TokioSpawner` for the runtime the caller is running on.
    ///
    /// # Errors
    ///
    /// `TicketingError::Spawn` when called outside a tokio runtime.
    pub fn current() -> Result<Self, TicketingError> {
        tokio::runtime::Handle::try_current()
            .map(Self::new)
            .map_err(|e| TicketingError::Spawn(e.to_string()))
    }
}

struct TokioTaskHandle {
    join: JoinHandle<()>,
}

impl TaskHandle for TokioTaskHandle {
    fn cancel(self: Box<Self>) {
        self.join.abort();
    }
}

impl Spawn for TokioSpawner {
    fn spawn_periodic(
        &self,
        task: &ScheduledTask,
        mut tick: TickFn,
    ) -> Result<Box<dyn TaskHandle>, TicketingError> {
        let period = task.period;
        let name = task.name.clone();
        let join = self.handle.spawn(async move {
            tracing::debug!(task = %name, period = ?period, "tokio task started");
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                tick();
            }
        });
        Ok(Box::new(TokioTaskHandle { join }))
    }
}
