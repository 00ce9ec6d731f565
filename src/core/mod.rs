//! Core ticket pool engine, configuration store, activity log and supervisor.

pub mod activity_log;
pub mod config_store;
pub mod error;
pub mod pool;
pub mod supervisor;
pub mod ticker;

pub use activity_log::{ActivityLog, LogEntry, LogKind, CONFIG_ACTOR};
pub use config_store::ConfigStore;
pub use error::{AppResult, TicketingError};
pub use pool::{PoolSnapshot, TicketPool, Transfer};
pub use supervisor::Supervisor;
pub use ticker::{ScheduledTask, Spawn, TaskHandle, ThreadSpawner, TickFn, WorkerRole};
