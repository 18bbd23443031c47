//! Notification surface: transient user-facing messages.
//!
//! DESIGN
//! ======
//! `notify` is fire-and-forget. Each notification is logged through
//! `tracing` and kept in a bounded ring buffer; the oldest entry is dropped
//! once capacity is reached. Sequence numbers increase monotonically so a
//! client can poll for everything after the last one it saw.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Destructive,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub seq: u64,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    /// Milliseconds since Unix epoch.
    pub ts: i64,
}

#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Mutex<NotifierInner>>,
}

struct NotifierInner {
    buffer: VecDeque<Notification>,
    capacity: usize,
    next_seq: u64,
}

impl Notifier {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Mutex::new(NotifierInner {
                buffer: VecDeque::with_capacity(capacity),
                capacity,
                next_seq: 1,
            })),
        }
    }

    /// Record and log a notification. Returns its sequence number.
    pub fn notify(&self, title: &str, description: &str, severity: Severity) -> u64 {
        match severity {
            Severity::Info | Severity::Success => info!(title, description, ?severity, "notification"),
            Severity::Warning | Severity::Destructive => warn!(title, description, ?severity, "notification"),
        }

        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let seq = inner.next_seq;
        inner.next_seq += 1;
        if inner.buffer.len() >= inner.capacity {
            inner.buffer.pop_front();
        }
        inner.buffer.push_back(Notification {
            seq,
            title: title.to_owned(),
            description: description.to_owned(),
            severity,
            ts: now_ms(),
        });
        seq
    }

    /// Buffered notifications with `seq > after`, oldest first.
    #[must_use]
    pub fn since(&self, after: u64) -> Vec<Notification> {
        let inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.buffer.iter().filter(|n| n.seq > after).cloned().collect()
    }

    /// Every buffered notification, oldest first.
    #[cfg(test)]
    #[must_use]
    pub fn recent(&self) -> Vec<Notification> {
        self.since(0)
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;
