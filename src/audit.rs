//! Audit events as data.
//!
//! The service emits one [`LookupEvent`] per completed lookup and a
//! [`NotFoundEvent`] per hard miss. Delivery is a pluggable observer so the
//! presentation layer decides where events go (CSV files, a database, a
//! message queue). The global sink follows the install-or-clear pattern:
//! `set_audit_sink(Some(sink))` to install, `set_audit_sink(None)` to stop
//! observing.

use std::sync::{Arc, OnceLock, RwLock};

use chrono::{DateTime, Utc};
use classify::QueryKind;
use serde::{Deserialize, Serialize};

/// A completed lookup, positive or negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEvent {
    pub timestamp: DateTime<Utc>,
    pub user_id: u64,
    pub raw_input: String,
    pub kind: QueryKind,
    pub value: String,
    pub found: bool,
    pub matched_name: Option<String>,
}

/// A lookup that found nothing and produced no suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFoundEvent {
    pub timestamp: DateTime<Utc>,
    pub user_id: u64,
    pub raw_input: String,
    pub kind: QueryKind,
    pub value: String,
}

/// Observer for audit events.
pub trait AuditSink: Send + Sync {
    fn lookup(&self, event: &LookupEvent);
    fn not_found(&self, event: &NotFoundEvent);
}

/// Install or clear the global audit sink.
pub fn set_audit_sink(sink: Option<Arc<dyn AuditSink>>) {
    let lock = sink_lock();
    let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = sink;
}

fn sink_lock() -> &'static RwLock<Option<Arc<dyn AuditSink>>> {
    static SINK: OnceLock<RwLock<Option<Arc<dyn AuditSink>>>> = OnceLock::new();
    SINK.get_or_init(|| RwLock::new(None))
}

pub(crate) fn audit_sink() -> Option<Arc<dyn AuditSink>> {
    let guard = sink_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}
