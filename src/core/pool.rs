//! Ticket pool engine: a capacity-bounded counter with atomic add/remove.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::core::{ActivityLog, ConfigStore, LogEntry, TicketingError};

/// Outcome of a [`TicketPool::try_add`] or [`TicketPool::try_remove`] call.
///
/// A rejected transfer is a normal outcome, not an error: nothing changed and
/// nothing was logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Whether the pool was mutated.
    pub applied: bool,
    /// Pool size after the call.
    pub size: u64,
}

impl Transfer {
    const fn applied(size: u64) -> Self {
        Self { applied: true, size }
    }

    const fn rejected(size: u64) -> Self {
        Self {
            applied: false,
            size,
        }
    }
}

/// Consistent view of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Tickets currently pooled.
    pub size: u64,
    /// Configured maximum.
    pub capacity: u64,
}

impl PoolSnapshot {
    /// Free slots left before the pool is full.
    pub const fn remaining(&self) -> u64 {
        self.capacity.saturating_sub(self.size)
    }
}

/// Bounded ticket pool.
///
/// The size, the capacity read and the log append for an operation all happen
/// under one mutex, so operations are linearizable and the activity log lists
/// them in their serialization order. Capacity comes from the pool's own
/// configuration store on every call, and [`TicketPool::reconfigure`] is the
/// only way to replace it, so `size <= capacity` holds across every swap.
pub struct TicketPool {
    size: Mutex<u64>,
    config: Arc<ConfigStore>,
    log: Arc<ActivityLog>,
}

impl TicketPool {
    /// Create an empty pool configured with `config`, logging to `log`.
    ///
    /// # Errors
    ///
    /// `TicketingError::InvalidConfiguration` if any field of `config` is not positive.
    pub fn new(config: Configuration, log: Arc<ActivityLog>) -> Result<Self, TicketingError> {
        let store = ConfigStore::new(config, Arc::clone(&log))?;
        Ok(Self {
            size: Mutex::new(0),
            config: Arc::new(store),
            log,
        })
    }

    /// Add `rate` tickets on behalf of `actor` if they all fit.
    pub fn try_add(&self, rate: u64, actor: &str) -> Transfer {
        let mut size = self.size.lock();
        let capacity = self.config.get().capacity();
        match size.checked_add(rate) {
            Some(next) if rate > 0 && next <= capacity => {
                *size = next;
                self.log.append(LogEntry::added(actor, rate, next));
                tracing::debug!(actor, rate, size = next, "tickets added");
                Transfer::applied(next)
            }
            _ => {
                tracing::trace!(actor, rate, size = *size, capacity, "add rejected");
                Transfer::rejected(*size)
            }
        }
    }

    /// Remove `rate` tickets on behalf of `actor` if that many are pooled.
    pub fn try_remove(&self, rate: u64, actor: &str) -> Transfer {
        let mut size = self.size.lock();
        if rate == 0 || *size < rate {
            tracing::trace!(actor, rate, size = *size, "remove rejected");
            return Transfer::rejected(*size);
        }
        *size -= rate;
        let next = *size;
        self.log.append(LogEntry::purchased(actor, rate, next));
        tracing::debug!(actor, rate, size = next, "tickets purchased");
        Transfer::applied(next)
    }

    /// Current size and capacity, read together.
    pub fn snapshot(&self) -> PoolSnapshot {
        let size = self.size.lock();
        PoolSnapshot {
            size: *size,
            capacity: self.config.get().capacity(),
        }
    }

    /// Replace the configuration wholesale while no pool operation is in flight.
    ///
    /// # Errors
    ///
    /// `TicketingError::InvalidConfiguration` if a field is not positive or if
    /// the new capacity is below the current pool size. Nothing changes.
    pub fn reconfigure(&self, new: Configuration) -> Result<(), TicketingError> {
        let size = self.size.lock();
        self.config.replace(new, *size)
    }

    /// The configuration store this pool reads its capacity from (read-only).
    pub const fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    /// The activity log this pool appends to.
    pub const fn log(&self) -> &Arc<ActivityLog> {
        &self.log
    }
}
