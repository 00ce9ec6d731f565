//! Configuration store with atomic whole-record replacement.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::Configuration;
use crate::core::{ActivityLog, LogEntry, TicketingError};

/// Holds the current [`Configuration`] of one [`TicketPool`](crate::core::TicketPool).
///
/// Reads copy the record out under a shared lock and writes swap it under an
/// exclusive one, so a reader never observes fields from two different saves.
/// The store is created and replaced only through its pool, which holds the
/// pool lock across the capacity check and the swap.
pub struct ConfigStore {
    current: RwLock<Configuration>,
    log: Arc<ActivityLog>,
}

fn rejected(reason: String) -> TicketingError {
    tracing::warn!(error = %reason, "configuration rejected");
    TicketingError::InvalidConfiguration(reason)
}

impl ConfigStore {
    /// Create a store holding `initial`.
    ///
    /// # Errors
    ///
    /// `TicketingError::InvalidConfiguration` if any field is not positive.
    pub(crate) fn new(initial: Configuration, log: Arc<ActivityLog>) -> Result<Self, TicketingError> {
        initial.validate().map_err(rejected)?;
        Ok(Self {
            current: RwLock::new(initial),
            log,
        })
    }

    /// Current configuration.
    pub fn get(&self) -> Configuration {
        *self.current.read()
    }

    /// Validate and swap in `new`, logging its JSON form against `pool_size`.
    ///
    /// The caller holds the pool lock, so `pool_size` cannot move until the
    /// swap and the log entry are done.
    ///
    /// # Errors
    ///
    /// `TicketingError::InvalidConfiguration` if any field is not positive or
    /// the new capacity is below `pool_size`. The stored configuration is left
    /// unchanged.
    pub(crate) fn replace(&self, new: Configuration, pool_size: u64) -> Result<(), TicketingError> {
        new.validate().map_err(rejected)?;
        if new.capacity() < pool_size {
            return Err(rejected(format!(
                "maxTicketCapacity {} is below the current pool size {pool_size}",
                new.max_ticket_capacity
            )));
        }

        *self.current.write() = new;
        let json = new.to_json();
        self.log.append(LogEntry::configuration_saved(json.as_str(), pool_size));
        tracing::info!(config = %json, "configuration saved");
        Ok(())
    }
}
