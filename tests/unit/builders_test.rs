//! Tests for the system builder

use ticket_pool::builders::SystemBuilder;
use ticket_pool::config::{Configuration, SupervisorConfig};
use ticket_pool::core::TicketingError;

#[test]
fn test_build_with_defaults() {
    let system = SystemBuilder::new().build().unwrap();
    assert_eq!(system.get_config(), Configuration::default());
    assert!(!system.is_running());
    assert!(system.log().is_empty());
    assert!(system.health().ok);
}

#[test]
fn test_build_rejects_invalid_config() {
    let result = SystemBuilder::new()
        .with_config(Configuration::new(100, 5, 3, 0))
        .build();
    assert!(matches!(result, Err(TicketingError::InvalidConfiguration(_))));
}

#[test]
fn test_build_rejects_invalid_plan() {
    let result = SystemBuilder::new()
        .with_plan(SupervisorConfig {
            customer_period_ms: 0,
            ..SupervisorConfig::default()
        })
        .build();
    assert!(matches!(result, Err(TicketingError::InvalidConfiguration(_))));
}

#[test]
fn test_status_report_serializes() {
    let system = SystemBuilder::new().build().unwrap();
    let json = serde_json::to_value(system.status()).unwrap();
    assert_eq!(json["running"], false);
    assert_eq!(json["pool"]["capacity"], 50);
    assert_eq!(json["config"]["ticketReleaseRate"], 5);
}
