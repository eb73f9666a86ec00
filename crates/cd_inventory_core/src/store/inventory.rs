//! Ordered CD inventory and its mutation operations.
//!
//! # Responsibility
//! - Append new records at the end of the sequence.
//! - Remove the first record matching an identifier.
//!
//! # Invariants
//! - `add` always grows the inventory by exactly one record.
//! - `delete` removes at most one record, the earliest match.
//! - The inventory and the persisted file may diverge; only explicit
//!   load/save reconciles them.

use crate::model::record::{CdId, CdRecord};
use log::debug;

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The first matching record was removed from `position`.
    Removed { position: usize, record: CdRecord },
    /// No record carried the requested identifier.
    NotFound,
}

impl DeleteOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }
}

/// Ordered in-memory collection of CD records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    records: Vec<CdRecord>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already ordered record sequence, e.g. one decoded from disk.
    pub fn from_records(records: Vec<CdRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CdRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CdRecord> {
        self.records.iter()
    }

    /// Appends a new record at the last position without any uniqueness
    /// check and returns it.
    ///
    /// Identifier text is coerced with `parse_cd_id` before calling this, so
    /// an invalid integer is reported to the caller and never reaches the
    /// inventory.
    pub fn add(
        &mut self,
        id: CdId,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> &CdRecord {
        self.records.push(CdRecord::new(id, title, artist));
        debug!(
            "event=inventory_add module=store status=ok len={}",
            self.records.len()
        );
        &self.records[self.records.len() - 1]
    }

    /// Removes the first record whose identifier equals `id`.
    ///
    /// Later records sharing the same identifier are retained.
    pub fn delete(&mut self, id: CdId) -> DeleteOutcome {
        match self.records.iter().position(|record| record.id == id) {
            Some(position) => {
                let record = self.records.remove(position);
                debug!(
                    "event=inventory_delete module=store status=ok position={} len={}",
                    position,
                    self.records.len()
                );
                DeleteOutcome::Removed { position, record }
            }
            None => {
                debug!("event=inventory_delete module=store status=not_found");
                DeleteOutcome::NotFound
            }
        }
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a CdRecord;
    type IntoIter = std::slice::Iter<'a, CdRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
