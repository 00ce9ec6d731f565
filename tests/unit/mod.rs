//! Unit tests for individual components

mod activity_log_test;
mod builders_test;
mod config_test;
mod pool_test;
mod runtime_test;
