//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Category, Record};

/// Category-filtered read access to the vault's working set
///
/// Implemented by the infrastructure layer (govault-store). The engine only
/// ever reads through this trait; how records are persisted is not its concern.
pub trait RecordStore {
    /// Error type for store operations
    type Error;

    /// All currently known records of a category
    fn records_in(&self, category: Category) -> Result<Vec<Record>, Self::Error>;

    /// Get a single record by category and ID
    fn get_record(&self, category: Category, id: &str) -> Result<Option<Record>, Self::Error> {
        Ok(self
            .records_in(category)?
            .into_iter()
            .find(|record| record.id == id))
    }

    /// Every record across all categories
    fn all_records(&self) -> Result<Vec<Record>, Self::Error> {
        let mut records = Vec::new();
        for category in Category::ALL {
            records.extend(self.records_in(category)?);
        }
        Ok(records)
    }
}
