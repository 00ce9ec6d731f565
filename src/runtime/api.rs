//! Service facade: the API surface a presentation layer consumes.

use std::sync::Arc;

use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};

use crate::config::{Configuration, SupervisorConfig};
use crate::core::{
    ActivityLog, LogEntry, PoolSnapshot, ScheduledTask, Spawn, Supervisor,
    ThreadSpawner, TicketPool, TicketingError,
};

/// Aggregate status for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    /// Whether the workers are running.
    pub running: bool,
    /// Pool size and capacity.
    pub pool: PoolSnapshot,
    /// Current configuration.
    pub config: Configuration,
    /// Number of activity log entries.
    pub log_len: usize,
    /// Names of the running tasks.
    pub tasks: Vec<String>,
}

/// Health response, derived from the live pool and supervisor state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Pool within its bound and, when running, every planned task alive.
    pub ok: bool,
    /// Whether the workers are running.
    pub running: bool,
    /// Live task handles (0 when stopped).
    pub tasks: usize,
    /// Planned tasks per start.
    pub planned_tasks: usize,
    /// Pool size and capacity.
    pub pool: PoolSnapshot,
}

/// One handle over the configuration store, pool, log and supervisor.
pub struct TicketingSystem<S: Spawn = ThreadSpawner> {
    log: Arc<ActivityLog>,
    pool: Arc<TicketPool>,
    supervisor: Supervisor<S>,
}

impl<S: Spawn> TicketingSystem<S> {
    /// Wire the components together. `config` is validated.
    ///
    /// # Errors
    ///
    /// `TicketingError::InvalidConfiguration` if `config` or `plan` is invalid.
    pub fn new(
        config: Configuration,
        plan: SupervisorConfig,
        spawner: S,
    ) -> Result<Self, TicketingError> {
        config
            .validate()
            .and_then(|()| plan.validate())
            .map_err(TicketingError::InvalidConfiguration)?;

        let log = Arc::new(ActivityLog::new());
        let pool = Arc::new(TicketPool::new(config, Arc::clone(&log))?);
        let supervisor = Supervisor::new(Arc::clone(&pool), plan, spawner);
        Ok(Self {
            log,
            pool,
            supervisor,
        })
    }

    /// Current configuration.
    pub fn get_config(&self) -> Configuration {
        self.pool.config().get()
    }

    /// Replace the configuration wholesale.
    ///
    /// # Errors
    ///
    /// `TicketingError::InvalidConfiguration` if a field is not positive or
    /// the new capacity is below the current pool size; nothing changes.
    pub fn set_config(&self, config: Configuration) -> Result<(), TicketingError> {
        self.pool.reconfigure(config)
    }

    /// Start the periodic workers (no-op when running).
    ///
    /// # Errors
    ///
    /// `TicketingError::Spawn` if a worker cannot be started.
    pub fn start(&self) -> Result<(), TicketingError> {
        self.supervisor.start()
    }

    /// Stop the periodic workers (no-op when stopped).
    pub fn stop(&self) {
        self.supervisor.stop();
    }

    /// Whether the workers are running.
    pub fn is_running(&self) -> bool {
        self.supervisor.is_running()
    }

    /// Pool size and capacity.
    pub fn pool_state(&self) -> PoolSnapshot {
        self.pool.snapshot()
    }

    /// All activity entries in order.
    pub fn log(&self) -> Vec<LogEntry> {
        self.log.read_all()
    }

    /// All activity entries rendered as strings.
    pub fn log_lines(&self) -> Vec<String> {
        self.log.lines()
    }

    /// Entries from `offset` on.
    pub fn log_since(&self, offset: usize) -> Vec<LogEntry> {
        self.log.read_since(offset)
    }

    /// Subscribe to future log entries.
    pub fn subscribe(&self, buffer: usize) -> Receiver<LogEntry> {
        self.log.subscribe(buffer)
    }

    /// Running task descriptors.
    pub fn tasks(&self) -> Vec<ScheduledTask> {
        self.supervisor.tasks()
    }

    /// The underlying pool, for callers driving it directly.
    pub const fn pool(&self) -> &Arc<TicketPool> {
        &self.pool
    }

    /// Snapshot of everything a status display needs.
    pub fn status(&self) -> StatusReport {
        StatusReport {
            running: self.is_running(),
            pool: self.pool_state(),
            config: self.get_config(),
            log_len: self.log.len(),
            tasks: self.tasks().into_iter().map(|t| t.name).collect(),
        }
    }

    /// Check the pool bound and that a running supervisor holds exactly the
    /// planned set of tasks.
    pub fn health(&self) -> Health {
        let pool = self.pool.snapshot();
        let plan = self.supervisor.plan();
        let planned_tasks = plan.vendor_count + plan.customer_count;
        let live = self.supervisor.running_task_count();
        let tasks = live.unwrap_or(0);
        let ok = pool.size <= pool.capacity && live.map_or(true, |n| n == planned_tasks);
        if !ok {
            tracing::warn!(?pool, tasks, planned_tasks, "health check failed");
        }
        Health {
            ok,
            running: live.is_some(),
            tasks,
            planned_tasks,
            pool,
        }
    }
}
