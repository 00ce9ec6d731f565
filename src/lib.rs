//! # Ticket Pool
//!
//! A bounded, concurrent producer/consumer ticket pool with configurable rates.
//!
//! Vendors periodically release tickets into a shared pool, customers
//! periodically purchase them, and the pool never holds more than the
//! configured capacity. Every accepted operation lands in an ordered,
//! append-only activity log that a presentation layer can poll or subscribe to.
//!
//! ## Components
//!
//! - **Configuration store** ([`core::ConfigStore`]): validated run parameters,
//!   swapped atomically as a whole record
//! - **Ticket pool** ([`core::TicketPool`]): linearizable `try_add` /
//!   `try_remove` / `snapshot` over a capacity-bounded counter
//! - **Activity log** ([`core::ActivityLog`]): ordered record of accepted operations
//! - **Supervisor** ([`core::Supervisor`]): idempotent start/stop of the
//!   periodic vendor and customer tasks, with no tick after `stop` returns
//!
//! Rejections (a vendor that would overflow the pool, a customer asking for
//! more than is pooled) are a normal outcome: nothing changes and nothing is
//! logged.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ticket_pool::builders::SystemBuilder;
//! use ticket_pool::config::Configuration;
//!
//! let system = SystemBuilder::new()
//!     .with_config(Configuration::new(100, 5, 3, 50))
//!     .build()?;
//!
//! system.start()?;
//! std::thread::sleep(std::time::Duration::from_secs(3));
//! system.stop();
//!
//! for line in system.log_lines() {
//!     println!("{line}");
//! }
//! # Ok::<(), ticket_pool::core::TicketingError>(())
//! ```
//!
//! Workers run on dedicated OS threads by default. With the `tokio-runtime`
//! feature (on by default) they can run as tokio tasks instead via
//! `runtime::TokioSpawner`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core engine: pool, configuration store, activity log, supervisor.
pub mod core;
/// Configuration models for run parameters and the worker plan.
pub mod config;
/// Builders to construct a ticketing system from configuration.
pub mod builders;
/// Runtime adapters (OS threads, tokio) and the API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;
