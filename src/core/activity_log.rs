//! Append-only activity log.
//!
//! Entries are recorded in the order the pool serialized the operations that
//! produced them. Observers either poll ([`ActivityLog::read_all`],
//! [`ActivityLog::read_since`]) or subscribe to a bounded channel.

use std::fmt;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::util::clock::now_ms;

/// Actor name used for configuration entries.
pub const CONFIG_ACTOR: &str = "config";

/// What an entry records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    /// A vendor added tickets.
    Added,
    /// A customer purchased (removed) tickets.
    Purchased,
    /// The configuration was replaced; carries its JSON form.
    ConfigurationSaved(String),
}

/// One immutable activity record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in the log, starting at zero. Assigned on append.
    pub seq: u64,
    /// Who caused the entry (`"Vendor 1"`, `"Customer 2"`, `"config"`).
    pub actor: String,
    /// What happened.
    pub kind: LogKind,
    /// Signed change to the pool size.
    pub delta: i64,
    /// Pool size after the operation.
    pub resulting_size: u64,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
}

impl LogEntry {
    fn new(actor: impl Into<String>, kind: LogKind, delta: i64, resulting_size: u64) -> Self {
        Self {
            seq: 0,
            actor: actor.into(),
            kind,
            delta,
            resulting_size,
            created_at_ms: now_ms(),
        }
    }

    /// Entry for `count` tickets added by `actor`.
    pub fn added(actor: impl Into<String>, count: u64, resulting_size: u64) -> Self {
        Self::new(actor, LogKind::Added, signed(count), resulting_size)
    }

    /// Entry for `count` tickets purchased by `actor`.
    pub fn purchased(actor: impl Into<String>, count: u64, resulting_size: u64) -> Self {
        Self::new(actor, LogKind::Purchased, -signed(count), resulting_size)
    }

    /// Entry for a configuration swap.
    pub fn configuration_saved(json: impl Into<String>, pool_size: u64) -> Self {
        Self::new(
            CONFIG_ACTOR,
            LogKind::ConfigurationSaved(json.into()),
            0,
            pool_size,
        )
    }
}

fn signed(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LogKind::Added => write!(
                f,
                "{} added {} tickets. Total: {}",
                self.actor,
                self.delta.unsigned_abs(),
                self.resulting_size
            ),
            LogKind::Purchased => write!(
                f,
                "{} purchased {} tickets. Remaining: {}",
                self.actor,
                self.delta.unsigned_abs(),
                self.resulting_size
            ),
            LogKind::ConfigurationSaved(json) => write!(f, "Configuration saved: {json}"),
        }
    }
}

/// Ordered, append-only record of accepted operations.
///
/// Never evicts. Appends take the write lock for one `push`; readers clone
/// under the read lock, so they see a prefix of the final sequence.
#[derive(Default)]
pub struct ActivityLog {
    entries: RwLock<Vec<LogEntry>>,
    subscribers: Mutex<Vec<Sender<LogEntry>>>,
}

impl ActivityLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, assigning its sequence number. Returns that number.
    ///
    /// Subscribers are fed with `try_send` while the write lock is held, so
    /// each subscriber sees entries in log order. A subscriber whose buffer is
    /// full misses the entry; a disconnected one is dropped.
    pub fn append(&self, mut entry: LogEntry) -> u64 {
        let mut entries = self.entries.write();
        let seq = entries.len() as u64;
        entry.seq = seq;

        {
            let mut subscribers = self.subscribers.lock();
            if !subscribers.is_empty() {
                subscribers.retain(|tx| match tx.try_send(entry.clone()) {
                    Ok(()) => true,
                    Err(TrySendError::Full(_)) => {
                        tracing::trace!(seq, "log subscriber lagging, entry dropped");
                        true
                    }
                    Err(TrySendError::Disconnected(_)) => false,
                });
            }
        }

        entries.push(entry);
        seq
    }

    /// All entries in append order.
    pub fn read_all(&self) -> Vec<LogEntry> {
        self.entries.read().clone()
    }

    /// Entries with `seq >= offset`, in order.
    pub fn read_since(&self, offset: usize) -> Vec<LogEntry> {
        let entries = self.entries.read();
        entries.get(offset..).map(<[LogEntry]>::to_vec).unwrap_or_default()
    }

    /// Rendered lines in append order.
    pub fn lines(&self) -> Vec<String> {
        self.entries.read().iter().map(ToString::to_string).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing has been logged yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Subscribe to entries appended from now on, buffering at most `buffer`
    /// undelivered entries.
    pub fn subscribe(&self, buffer: usize) -> Receiver<LogEntry> {
        let (tx, rx) = bounded(buffer.max(1));
        self.subscribers.lock().push(tx);
        rx
    }
}
