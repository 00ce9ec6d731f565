//! Tests for configuration validation and parsing

use ticket_pool::config::{Configuration, RatePolicy, SupervisorConfig};

#[test]
fn test_configuration_validation() {
    assert!(Configuration::new(100, 5, 3, 50).validate().is_ok());
    assert!(Configuration::new(1, 1, 1, 1).validate().is_ok());
}

#[test]
fn test_configuration_rejects_each_non_positive_field() {
    let bad = [
        Configuration::new(-1, 5, 3, 50),
        Configuration::new(100, 0, 3, 50),
        Configuration::new(100, 5, -3, 50),
        Configuration::new(100, 5, 3, 0),
    ];
    for cfg in bad {
        assert!(cfg.validate().is_err(), "{cfg:?} should be invalid");
    }
}

#[test]
fn test_configuration_from_json() {
    let json = r#"{
        "totalTickets": 200,
        "ticketReleaseRate": 4,
        "customerRetrievalRate": 2,
        "maxTicketCapacity": 40
    }"#;
    let cfg = Configuration::from_json_str(json).unwrap();
    assert_eq!(cfg, Configuration::new(200, 4, 2, 40));
}

#[test]
fn test_configuration_from_json_rejects_negative() {
    let json = r#"{"totalTickets":-1,"ticketReleaseRate":4,"customerRetrievalRate":2,"maxTicketCapacity":40}"#;
    let err = Configuration::from_json_str(json).unwrap_err();
    assert!(err.contains("totalTickets"), "{err}");
}

#[test]
fn test_configuration_from_json_rejects_missing_field() {
    let err = Configuration::from_json_str(r#"{"totalTickets":1}"#).unwrap_err();
    assert!(err.starts_with("parse error"), "{err}");
}

#[test]
fn test_configuration_from_json_file() {
    let path = std::env::temp_dir().join(format!("ticket_pool_cfg_{}.json", std::process::id()));
    std::fs::write(&path, Configuration::new(10, 2, 1, 9).to_json()).unwrap();
    let cfg = Configuration::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(cfg, Configuration::new(10, 2, 1, 9));

    assert!(Configuration::from_json_file(&path).is_err());
}

#[test]
fn test_supervisor_config_defaults() {
    let plan = SupervisorConfig::default();
    assert_eq!(plan.vendor_count, 2);
    assert_eq!(plan.customer_count, 3);
    assert_eq!(plan.vendor_period().as_millis(), 1000);
    assert_eq!(plan.customer_period().as_millis(), 1500);
    assert_eq!(plan.rate_policy, RatePolicy::Live);
    assert!(plan.validate().is_ok());
}

#[test]
fn test_supervisor_config_zero_period_invalid() {
    let plan = SupervisorConfig {
        vendor_period_ms: 0,
        ..SupervisorConfig::default()
    };
    assert!(plan.validate().is_err());

    // No vendors, so the vendor period is irrelevant.
    let plan = SupervisorConfig {
        vendor_count: 0,
        vendor_period_ms: 0,
        ..SupervisorConfig::default()
    };
    assert!(plan.validate().is_ok());
}

#[test]
fn test_supervisor_config_from_json_partial() {
    let plan = SupervisorConfig::from_json_str(r#"{"customer_count": 1, "rate_policy": "snapshot"}"#)
        .unwrap();
    assert_eq!(plan.customer_count, 1);
    assert_eq!(plan.vendor_count, 2);
    assert_eq!(plan.rate_policy, RatePolicy::Snapshot);
}
