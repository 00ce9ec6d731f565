//! Tests for the tokio spawner

#![cfg(feature = "tokio-runtime")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ticket_pool::core::{ScheduledTask, Spawn, WorkerRole};
use ticket_pool::runtime::tokio_spawner::TokioSpawner;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_spawner_ticks_until_cancelled() {
    let spawner = TokioSpawner::current().expect("inside runtime");
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let task = ScheduledTask::new(WorkerRole::Vendor, 1, Duration::from_millis(10));

    let handle = spawner
        .spawn_periodic(&task, Box::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

    tokio::time::sleep(Duration::from_millis(120)).await;
    handle.cancel();
    tokio::time::sleep(Duration::from_millis(20)).await;
    let after_cancel = count.load(Ordering::SeqCst);
    assert!(after_cancel >= 2, "only {after_cancel} ticks");

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(count.load(Ordering::SeqCst), after_cancel);
}

#[test]
fn test_tokio_spawner_requires_runtime() {
    assert!(TokioSpawner::current().is_err());
}
