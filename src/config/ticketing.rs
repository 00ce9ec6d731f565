//! Ticketing run parameters: capacity and vendor/customer rates.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`Configuration::total_tickets`].
pub const ENV_TOTAL_TICKETS: &str = "TICKETING_TOTAL_TICKETS";
/// Environment variable overriding [`Configuration::ticket_release_rate`].
pub const ENV_RELEASE_RATE: &str = "TICKETING_RELEASE_RATE";
/// Environment variable overriding [`Configuration::customer_retrieval_rate`].
pub const ENV_RETRIEVAL_RATE: &str = "TICKETING_RETRIEVAL_RATE";
/// Environment variable overriding [`Configuration::max_ticket_capacity`].
pub const ENV_MAX_CAPACITY: &str = "TICKETING_MAX_CAPACITY";

/// Run parameters for the ticket pool.
///
/// Fields are signed so that out-of-range input (zero or negative) can be
/// represented and rejected by [`Configuration::validate`]. The JSON form uses
/// camelCase keys, e.g. `{"totalTickets":100,"ticketReleaseRate":5,...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Total tickets advertised for the event. Informational; does not bound releases.
    pub total_tickets: i64,
    /// Tickets added by each vendor tick.
    pub ticket_release_rate: i64,
    /// Tickets removed by each customer tick.
    pub customer_retrieval_rate: i64,
    /// Upper bound on the pool size.
    pub max_ticket_capacity: i64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            total_tickets: 100,
            ticket_release_rate: 5,
            customer_retrieval_rate: 3,
            max_ticket_capacity: 50,
        }
    }
}

impl Configuration {
    /// Create a configuration from its four fields.
    pub const fn new(
        total_tickets: i64,
        ticket_release_rate: i64,
        customer_retrieval_rate: i64,
        max_ticket_capacity: i64,
    ) -> Self {
        Self {
            total_tickets,
            ticket_release_rate,
            customer_retrieval_rate,
            max_ticket_capacity,
        }
    }

    /// Validate that every field is a positive integer.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("totalTickets", self.total_tickets),
            ("ticketReleaseRate", self.ticket_release_rate),
            ("customerRetrievalRate", self.customer_retrieval_rate),
            ("maxTicketCapacity", self.max_ticket_capacity),
        ];
        for (name, value) in fields {
            if value <= 0 {
                return Err(format!("{name} must be greater than 0 (got {value})"));
            }
        }
        Ok(())
    }

    /// Pool capacity as an unsigned count. A non-positive value yields 0.
    pub fn capacity(&self) -> u64 {
        u64::try_from(self.max_ticket_capacity).unwrap_or(0)
    }

    /// Vendor release rate as an unsigned count. A non-positive value yields 0.
    pub fn release_rate(&self) -> u64 {
        u64::try_from(self.ticket_release_rate).unwrap_or(0)
    }

    /// Customer retrieval rate as an unsigned count. A non-positive value yields 0.
    pub fn retrieval_rate(&self) -> u64 {
        u64::try_from(self.customer_retrieval_rate).unwrap_or(0)
    }

    /// Compact JSON form, as written to the activity log on save.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                "{{\"totalTickets\":{},\"ticketReleaseRate\":{},\"customerRetrievalRate\":{},\"maxTicketCapacity\":{}}}",
                self.total_tickets,
                self.ticket_release_rate,
                self.customer_retrieval_rate,
                self.max_ticket_capacity
            )
        })
    }

    /// Parse a configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        Self::from_json_str(&raw)
    }

    /// Build a configuration from `TICKETING_*` environment variables.
    ///
    /// Unset variables keep their default value; set but unparsable or
    /// non-positive values are rejected.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup, using the same keys
    /// as [`Configuration::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let overrides: [(&str, &mut i64); 4] = [
            (ENV_TOTAL_TICKETS, &mut cfg.total_tickets),
            (ENV_RELEASE_RATE, &mut cfg.ticket_release_rate),
            (ENV_RETRIEVAL_RATE, &mut cfg.customer_retrieval_rate),
            (ENV_MAX_CAPACITY, &mut cfg.max_ticket_capacity),
        ];
        for (key, slot) in overrides {
            if let Some(raw) = lookup(key) {
                *slot = raw
                    .trim()
                    .parse()
                    .map_err(|e| format!("{key}={raw:?} is not an integer: {e}"))?;
            }
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
