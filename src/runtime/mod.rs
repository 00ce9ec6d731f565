//! Runtime adapters and the service API surface.

pub mod api;
#[cfg(feature = "tokio-runtime")]
pub mod tokio_spawner;

pub use api::{Health, StatusReport, TicketingSystem};
#[cfg(feature = "tokio-runtime")]
pub use tokio_spawner::TokioSpawner;
