//! Builder assembling a [`TicketingSystem`] from configuration sources.

use crate::config::{Configuration, SupervisorConfig};
use crate::core::{Spawn, ThreadSpawner, TicketingError};
use crate::runtime::TicketingSystem;

/// Fluent builder for [`TicketingSystem`].
///
/// ```
/// use ticket_pool::builders::SystemBuilder;
/// use ticket_pool::config::Configuration;
///
/// let system = SystemBuilder::new()
///     .with_config(Configuration::new(100, 5, 3, 50))
///     .build()
///     .unwrap();
/// assert!(!system.is_running());
/// ```
#[derive(Debug, Clone)]
pub struct SystemBuilder<S = ThreadSpawner> {
    config: Configuration,
    plan: SupervisorConfig,
    spawner: S,
}

impl Default for SystemBuilder<ThreadSpawner> {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemBuilder<ThreadSpawner> {
    /// Builder with default configuration, default plan and OS-thread workers.
    pub fn new() -> Self {
        Self {
            config: Configuration::default(),
            plan: SupervisorConfig::default(),
            spawner: ThreadSpawner::new(),
        }
    }
}

impl<S: Spawn> SystemBuilder<S> {
    /// Use `config` as the initial configuration.
    #[must_use]
    pub fn with_config(mut self, config: Configuration) -> Self {
        self.config = config;
        self
    }

    /// Read the initial configuration from `TICKETING_*` environment variables.
    ///
    /// # Errors
    ///
    /// `TicketingError::InvalidConfiguration` if a variable is malformed.
    pub fn with_env_config(self) -> Result<Self, TicketingError> {
        let config = Configuration::from_env()
            .map_err(|e| TicketingError::InvalidConfiguration(format!("environment: {e}")))?;
        Ok(self.with_config(config))
    }

    /// Use `plan` for the worker set.
    #[must_use]
    pub fn with_plan(mut self, plan: SupervisorConfig) -> Self {
        self.plan = plan;
        self
    }

    /// Run workers on a different runtime.
    pub fn with_spawner<T: Spawn>(self, spawner: T) -> SystemBuilder<T> {
        SystemBuilder {
            config: self.config,
            plan: self.plan,
            spawner,
        }
    }

    /// Validate and assemble the system.
    ///
    /// # Errors
    ///
    /// `TicketingError::InvalidConfiguration` if the configuration or plan is invalid.
    pub fn build(self) -> Result<TicketingSystem<S>, TicketingError> {
        TicketingSystem::new(self.config, self.plan, self.spawner)
    }
}
