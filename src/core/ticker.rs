//! Periodic task abstraction.
//!
//! A [`Spawn`] implementation turns a [`ScheduledTask`] and its tick closure
//! into a running periodic worker, and hands back a [`TaskHandle`] that the
//! supervisor uses to cancel it. Two runtimes are provided:
//!
//! - [`ThreadSpawner`]: one dedicated OS thread per task (always available)
//! - `TokioSpawner`: one tokio task per task (feature `tokio-runtime`)
//!
//! Both fire the first tick one period after spawning and skip missed ticks
//! instead of bursting them.

mod native;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::TicketingError;

pub use native::ThreadSpawner;

/// Closure executed on every tick.
pub type TickFn = Box<dyn FnMut() + Send + 'static>;

/// Which side of the pool a task works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerRole {
    /// Producer: adds tickets.
    Vendor,
    /// Consumer: removes tickets.
    Customer,
}

impl fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vendor => f.write_str("Vendor"),
            Self::Customer => f.write_str("Customer"),
        }
    }
}

/// Description of one periodic worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Unique identity of this spawn.
    pub id: Uuid,
    /// Actor name written to the activity log, e.g. `"Vendor 1"`.
    pub name: String,
    /// Producer or consumer.
    pub role: WorkerRole,
    /// Time between ticks.
    pub period: Duration,
}

impl ScheduledTask {
    /// Describe the `ordinal`-th (1-based) worker of `role`.
    pub fn new(role: WorkerRole, ordinal: usize, period: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: format!("{role} {ordinal}"),
            role,
            period,
        }
    }
}

/// Cancellation handle of a spawned periodic task.
pub trait TaskHandle: Send {
    /// Stop the task from scheduling further ticks.
    ///
    /// Implementations may or may not wait for an in-flight tick; callers
    /// needing that guarantee must provide it themselves.
    fn cancel(self: Box<Self>);
}

/// Abstraction for spawning periodic tasks on a runtime.
pub trait Spawn: Send + Sync {
    /// Start running `tick` every `task.period`.
    ///
    /// # Errors
    ///
    /// `TicketingError::Spawn` if the runtime cannot start the task.
    fn spawn_periodic(
        &self,
        task: &ScheduledTask,
        tick: TickFn,
    ) -> Result<Box<dyn TaskHandle>, TicketingError>;
}
