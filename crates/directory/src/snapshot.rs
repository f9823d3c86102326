use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::Record;

/// An immutable, point-in-time view of the directory.
///
/// Record order is the source order and is part of the contract: matchers
/// resolve duplicate identifiers by taking the first record in this order.
/// A snapshot is never mutated after construction; reloads build a fresh
/// one and swap it in whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    records: Vec<Record>,
    loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            loaded_at: Utc::now(),
        }
    }

    /// A snapshot with no records, used before the first load. Lookups
    /// against it report data-unavailable rather than no-match.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}
