//! Worker plan for the supervisor: how many vendors and customers run, how
//! often they tick, and how they pick up rate changes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How running tasks observe rate changes made while they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePolicy {
    /// Every tick re-reads the configuration store.
    #[default]
    Live,
    /// Rates are captured once at start and kept until the next start.
    Snapshot,
}

/// Supervisor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Number of vendor (producer) tasks.
    pub vendor_count: usize,
    /// Number of customer (consumer) tasks.
    pub customer_count: usize,
    /// Vendor tick period in milliseconds.
    pub vendor_period_ms: u64,
    /// Customer tick period in milliseconds.
    pub customer_period_ms: u64,
    /// Rate observation policy.
    pub rate_policy: RatePolicy,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            vendor_count: 2,
            customer_count: 3,
            vendor_period_ms: 1000,
            customer_period_ms: 1500,
            rate_policy: RatePolicy::Live,
        }
    }
}

impl SupervisorConfig {
    /// Create the default plan (2 vendors at 1000 ms, 3 customers at 1500 ms).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of vendor tasks.
    #[must_use]
    pub const fn with_vendors(mut self, count: usize) -> Self {
        self.vendor_count = count;
        self
    }

    /// Set the number of customer tasks.
    #[must_use]
    pub const fn with_customers(mut self, count: usize) -> Self {
        self.customer_count = count;
        self
    }

    /// Set the vendor tick period.
    #[must_use]
    pub fn with_vendor_period(mut self, period: Duration) -> Self {
        self.vendor_period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the customer tick period.
    #[must_use]
    pub fn with_customer_period(mut self, period: Duration) -> Self {
        self.customer_period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the rate observation policy.
    #[must_use]
    pub const fn with_rate_policy(mut self, policy: RatePolicy) -> Self {
        self.rate_policy = policy;
        self
    }

    /// Vendor tick period.
    pub const fn vendor_period(&self) -> Duration {
        Duration::from_millis(self.vendor_period_ms)
    }

    /// Customer tick period.
    pub const fn customer_period(&self) -> Duration {
        Duration::from_millis(self.customer_period_ms)
    }

    /// Validate supervisor configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.vendor_count > 0 && self.vendor_period_ms == 0 {
            return Err("vendor_period_ms must be greater than 0".into());
        }
        if self.customer_count > 0 && self.customer_period_ms == 0 {
            return Err("customer_period_ms must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse supervisor configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
