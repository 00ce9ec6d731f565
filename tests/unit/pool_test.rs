//! Tests for the ticket pool engine

use std::sync::Arc;

use ticket_pool::config::Configuration;
use ticket_pool::core::{ActivityLog, PoolSnapshot, TicketPool, TicketingError, Transfer};

fn make_pool(cfg: Configuration) -> TicketPool {
    TicketPool::new(cfg, Arc::new(ActivityLog::new())).unwrap()
}

#[test]
fn test_add_to_empty_pool() {
    let pool = make_pool(Configuration::new(100, 5, 3, 50));

    let out = pool.try_add(5, "V1");

    assert_eq!(out, Transfer { applied: true, size: 5 });
    assert_eq!(pool.log().lines(), vec!["V1 added 5 tickets. Total: 5"]);
}

#[test]
fn test_remove_to_empty_then_underflow() {
    let pool = make_pool(Configuration::new(100, 5, 3, 50));
    pool.try_add(3, "V1");
    let before = pool.log().len();

    assert_eq!(pool.try_remove(3, "C1"), Transfer { applied: true, size: 0 });
    assert_eq!(pool.log().len(), before + 1);

    assert_eq!(pool.try_remove(1, "C1"), Transfer { applied: false, size: 0 });
    assert_eq!(pool.log().len(), before + 1);
    assert_eq!(
        pool.log().lines().last().map(String::as_str),
        Some("C1 purchased 3 tickets. Remaining: 0")
    );
}

#[test]
fn test_add_over_capacity_is_rejected_whole() {
    let pool = make_pool(Configuration::new(100, 5, 3, 50));
    for _ in 0..9 {
        assert!(pool.try_add(5, "V1").applied);
    }
    assert_eq!(pool.snapshot().size, 45);
    let logged = pool.log().len();

    // 45 + 6 would overflow; nothing of it is applied.
    assert_eq!(pool.try_add(6, "V2"), Transfer { applied: false, size: 45 });
    assert_eq!(pool.log().len(), logged);
    assert_eq!(pool.snapshot(), PoolSnapshot { size: 45, capacity: 50 });
}

#[test]
fn test_invalid_reconfigure_keeps_previous() {
    let pool = make_pool(Configuration::default());
    let err = pool.reconfigure(Configuration::new(-1, 5, 3, 50)).unwrap_err();
    assert!(matches!(err, TicketingError::InvalidConfiguration(_)));
    assert_eq!(pool.config().get(), Configuration::default());
    assert!(pool.log().is_empty());
}

#[test]
fn test_capacity_change_applies_to_next_add() {
    let pool = make_pool(Configuration::new(100, 5, 3, 10));
    pool.try_add(10, "V1");
    assert!(!pool.try_add(5, "V1").applied);

    pool.reconfigure(Configuration::new(100, 5, 3, 15)).unwrap();
    assert_eq!(pool.try_add(5, "V1"), Transfer { applied: true, size: 15 });
}

#[test]
fn test_lowering_capacity_below_size_never_takes_effect() {
    let pool = make_pool(Configuration::new(100, 5, 3, 50));
    assert!(pool.try_add(20, "V1").applied);

    let err = pool.reconfigure(Configuration::new(100, 5, 3, 5)).unwrap_err();
    assert!(matches!(err, TicketingError::InvalidConfiguration(_)));

    let snapshot = pool.snapshot();
    assert!(snapshot.size <= snapshot.capacity, "{snapshot:?}");
    assert_eq!(snapshot, PoolSnapshot { size: 20, capacity: 50 });
    assert_eq!(pool.config().get().max_ticket_capacity, 50);
}

#[test]
fn test_pool_refuses_negative_capacity() {
    let result = TicketPool::new(Configuration::new(100, 5, 3, -5), Arc::new(ActivityLog::new()));
    assert!(matches!(result, Err(TicketingError::InvalidConfiguration(_))));
}
