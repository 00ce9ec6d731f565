//! Configuration models for run parameters and the worker plan.

pub mod supervisor;
pub mod ticketing;

pub use supervisor::{RatePolicy, SupervisorConfig};
pub use ticketing::Configuration;
