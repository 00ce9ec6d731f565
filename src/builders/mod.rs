//! Builders to construct a ticketing system from configuration.

pub mod system_builder;

pub use system_builder::SystemBuilder;
