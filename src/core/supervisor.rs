//! Lifecycle controller for the periodic vendor and customer tasks.
//!
//! State machine: `Stopped -> Running -> Stopped`. Both transitions are
//! idempotent. Every run owns a gate (`RwLock<bool>`): ticks hold it shared
//! while they touch the pool, and `stop` closes it exclusively before
//! cancelling the tasks. Once `stop` returns no tick can reach the pool, on
//! any runtime.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::config::{RatePolicy, SupervisorConfig};
use crate::core::{
    ScheduledTask, Spawn, TaskHandle, TickFn, TicketPool, TicketingError, WorkerRole,
};

struct RunningSet {
    gate: Arc<RwLock<bool>>,
    tasks: Vec<ScheduledTask>,
    handles: Vec<Box<dyn TaskHandle>>,
}

/// Starts and stops the periodic workers bound to a [`TicketPool`].
pub struct Supervisor<S: Spawn> {
    pool: Arc<TicketPool>,
    plan: SupervisorConfig,
    spawner: S,
    running: Mutex<Option<RunningSet>>,
}

impl<S: Spawn> Supervisor<S> {
    /// Create a stopped supervisor.
    pub const fn new(pool: Arc<TicketPool>, plan: SupervisorConfig, spawner: S) -> Self {
        Self {
            pool,
            plan,
            spawner,
            running: Mutex::new(None),
        }
    }

    /// Spawn the vendor and customer tasks. Does nothing if already running.
    ///
    /// # Errors
    ///
    /// `TicketingError::Spawn` if a task cannot be started. Tasks spawned
    /// before the failure are cancelled and the supervisor stays stopped.
    pub fn start(&self) -> Result<(), TicketingError> {
        let mut running = self.running.lock();
        if running.is_some() {
            debug!("start requested while running; ignoring");
            return Ok(());
        }

        let gate = Arc::new(RwLock::new(true));
        let tasks = self.plan_tasks();
        let mut handles: Vec<Box<dyn TaskHandle>> = Vec::with_capacity(tasks.len());

        for task in &tasks {
            let tick = self.tick_fn(task, Arc::clone(&gate));
            match self.spawner.spawn_periodic(task, tick) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    warn!(task = %task.name, error = %e, "spawn failed; rolling back start");
                    *gate.write() = false;
                    for handle in handles {
                        handle.cancel();
                    }
                    return Err(e);
                }
            }
        }

        info!(
            vendors = self.plan.vendor_count,
            customers = self.plan.customer_count,
            rate_policy = ?self.plan.rate_policy,
            "ticketing started"
        );
        *running = Some(RunningSet {
            gate,
            tasks,
            handles,
        });
        Ok(())
    }

    /// Cancel every task. Does nothing if already stopped.
    ///
    /// Waits for in-flight ticks; after this returns no task touches the pool.
    pub fn stop(&self) {
        let Some(set) = self.running.lock().take() else {
            debug!("stop requested while stopped; ignoring");
            return;
        };

        *set.gate.write() = false;
        let count = set.handles.len();
        for handle in set.handles {
            handle.cancel();
        }
        info!(tasks = count, "ticketing stopped");
    }

    /// Whether the tasks are running.
    pub fn is_running(&self) -> bool {
        self.running.lock().is_some()
    }

    /// Descriptors of the running tasks; empty when stopped.
    pub fn tasks(&self) -> Vec<ScheduledTask> {
        self.running
            .lock()
            .as_ref()
            .map(|set| set.tasks.clone())
            .unwrap_or_default()
    }

    /// Number of live task handles, or `None` when stopped. Read under the
    /// same lock as the running flag.
    pub fn running_task_count(&self) -> Option<usize> {
        self.running.lock().as_ref().map(|set| set.handles.len())
    }

    /// The worker plan used on each start.
    pub const fn plan(&self) -> &SupervisorConfig {
        &self.plan
    }

    fn plan_tasks(&self) -> Vec<ScheduledTask> {
        let vendors = (1..=self.plan.vendor_count)
            .map(|n| ScheduledTask::new(WorkerRole::Vendor, n, self.plan.vendor_period()));
        let customers = (1..=self.plan.customer_count)
            .map(|n| ScheduledTask::new(WorkerRole::Customer, n, self.plan.customer_period()));
        vendors.chain(customers).collect()
    }

    fn tick_fn(&self, task: &ScheduledTask, gate: Arc<RwLock<bool>>) -> TickFn {
        let pool = Arc::clone(&self.pool);
        let role = task.role;
        let actor = task.name.clone();
        let frozen = match self.plan.rate_policy {
            RatePolicy::Live => None,
            RatePolicy::Snapshot => Some(self.pool.config().get()),
        };

        Box::new(move || {
            let open = gate.read();
            if !*open {
                return;
            }
            let cfg = frozen.unwrap_or_else(|| pool.config().get());
            match role {
                WorkerRole::Vendor => pool.try_add(cfg.release_rate(), &actor),
                WorkerRole::Customer => pool.try_remove(cfg.retrieval_rate(), &actor),
            };
        })
    }
}

impl<S: Spawn> Drop for Supervisor<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
