//! In-memory record store

use crate::StoreError;
use govault_domain::traits::RecordStore;
use govault_domain::{Category, Record};

/// Vec-backed RecordStore
///
/// Holds a fixed snapshot of records. Lookups never fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Vec<Record>,
}

impl MemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given records
    pub fn with_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Add or replace a record
    pub fn insert(&mut self, record: Record) {
        self.records
            .retain(|r| !(r.id == record.id && r.category == record.category));
        self.records.push(record);
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryRecordStore {
    type Error = StoreError;

    fn records_in(&self, category: Category) -> Result<Vec<Record>, Self::Error> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect())
    }
}
