//! Error types for ticket pool operations.

use thiserror::Error;

/// Errors produced by ticket pool components.
///
/// Capacity and underflow rejections are not errors; see
/// [`Transfer`](crate::core::Transfer).
#[derive(Debug, Error)]
pub enum TicketingError {
    /// A configuration field was out of range, or the new capacity is below
    /// the number of tickets currently pooled.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A periodic worker could not be spawned.
    #[error("failed to spawn worker: {0}")]
    Spawn(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
