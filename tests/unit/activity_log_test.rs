//! Tests for the activity log

use std::sync::Arc;
use std::thread;

use ticket_pool::core::{ActivityLog, LogEntry, LogKind, CONFIG_ACTOR};

#[test]
fn test_entries_keep_append_order() {
    let log = ActivityLog::new();
    log.append(LogEntry::added("Vendor 1", 5, 5));
    log.append(LogEntry::purchased("Customer 1", 3, 2));
    log.append(LogEntry::configuration_saved(r#"{"totalTickets":1}"#, 2));

    let entries = log.read_all();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].kind, LogKind::Added);
    assert_eq!(entries[0].delta, 5);
    assert_eq!(entries[1].kind, LogKind::Purchased);
    assert_eq!(entries[1].delta, -3);
    assert_eq!(entries[2].actor, CONFIG_ACTOR);
    assert_eq!(entries[2].resulting_size, 2);
    assert!(entries.iter().all(|e| e.created_at_ms > 0));

    assert_eq!(
        log.lines(),
        vec![
            "Vendor 1 added 5 tickets. Total: 5",
            "Customer 1 purchased 3 tickets. Remaining: 2",
            r#"Configuration saved: {"totalTickets":1}"#,
        ]
    );
}

#[test]
fn test_concurrent_appends_all_land_with_unique_sequence() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 250;

    let log = Arc::new(ActivityLog::new());
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    log.append(LogEntry::added(format!("Vendor {t}"), 1, i as u64));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let entries = log.read_all();
    assert_eq!(entries.len(), THREADS * PER_THREAD);
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.seq, i as u64);
    }
}

#[test]
fn test_reader_sees_prefix_while_appending() {
    let log = Arc::new(ActivityLog::new());
    let writer = {
        let log = Arc::clone(&log);
        thread::spawn(move || {
            for i in 0..1000u64 {
                log.append(LogEntry::added("Vendor 1", 1, i + 1));
            }
        })
    };

    let mut last_len = 0;
    while last_len < 1000 {
        let snapshot = log.read_all();
        assert!(snapshot.len() >= last_len);
        for (i, entry) in snapshot.iter().enumerate() {
            assert_eq!(entry.resulting_size, i as u64 + 1);
        }
        last_len = snapshot.len();
    }
    writer.join().unwrap();
}

#[test]
fn test_subscriber_receives_entries_in_order() {
    let log = ActivityLog::new();
    log.append(LogEntry::added("Vendor 1", 1, 1));
    let rx = log.subscribe(16);
    log.append(LogEntry::added("Vendor 2", 2, 3));
    log.append(LogEntry::purchased("Customer 1", 3, 0));

    let got: Vec<u64> = rx.try_iter().map(|e| e.seq).collect();
    assert_eq!(got, vec![1, 2]);
}
