//! GoVault Storage Layer
//!
//! Implements the `RecordStore` trait that the relationship engine reads
//! through.
//!
//! # Architecture
//!
//! - SQLite for the persisted working set (one row per record, fields as JSON)
//! - An in-memory store for tests and for callers embedding the engine
//! - JSON snapshot import for seeding a vault exported from the sheet store
//!
//! # Examples
//!
//! ```no_run
//! use govault_store::SqliteRecordStore;
//!
//! let store = SqliteRecordStore::new(":memory:").unwrap();
//! // Store is now ready for record lookups
//! ```

#![warn(missing_docs)]

mod memory;

pub use memory::MemoryRecordStore;

use govault_domain::traits::RecordStore;
use govault_domain::{Category, FieldValue, Record};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Field map or snapshot could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of RecordStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each request or thread should open
/// its own SqliteRecordStore.
pub struct SqliteRecordStore {
    conn: Connection,
}

impl SqliteRecordStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Insert a record, replacing any existing record with the same category and ID
    pub fn upsert_record(&self, record: &Record) -> Result<(), StoreError> {
        let fields_json = serde_json::to_string(&record.fields)?;

        self.conn.execute(
            "INSERT INTO records (id, category, subcategory, fields_json, last_modified, url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(category, id) DO UPDATE SET
             subcategory = excluded.subcategory,
             fields_json = excluded.fields_json,
             last_modified = excluded.last_modified,
             url = excluded.url",
            params![
                &record.id,
                record.category.as_str(),
                &record.subcategory,
                &fields_json,
                &record.last_modified,
                &record.url,
            ],
        )?;

        Ok(())
    }

    /// Delete a record
    pub fn delete_record(&self, category: Category, id: &str) -> Result<(), StoreError> {
        let deleted = self.conn.execute(
            "DELETE FROM records WHERE category = ?1 AND id = ?2",
            params![category.as_str(), id],
        )?;

        if deleted == 0 {
            return Err(StoreError::NotFound(format!("{}/{}", category, id)));
        }

        Ok(())
    }

    /// Import a JSON array of records, upserting each one
    ///
    /// The whole snapshot is applied in a single transaction. Returns the
    /// number of records imported.
    pub fn import_snapshot<R: Read>(&mut self, reader: R) -> Result<usize, StoreError> {
        let records: Vec<Record> = serde_json::from_reader(reader)?;

        let tx = self.conn.transaction()?;
        for record in &records {
            let fields_json = serde_json::to_string(&record.fields)?;
            tx.execute(
                "INSERT OR REPLACE INTO records (id, category, subcategory, fields_json, last_modified, url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    &record.id,
                    record.category.as_str(),
                    &record.subcategory,
                    &fields_json,
                    &record.last_modified,
                    &record.url,
                ],
            )?;
        }
        tx.commit()?;

        debug!(count = records.len(), "imported record snapshot");
        Ok(records.len())
    }

    /// Total number of stored records
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Map a result row to a Record
    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<Record> {
        let category_str: String = row.get(1)?;
        let category = Category::parse(&category_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(format!(
                    "Unknown category: {}",
                    category_str
                ))),
            )
        })?;

        let fields_json: String = row.get(3)?;
        let fields: BTreeMap<String, FieldValue> = serde_json::from_str(&fields_json)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
            })?;

        Ok(Record {
            id: row.get(0)?,
            category,
            subcategory: row.get(2)?,
            fields,
            last_modified: row.get(4)?,
            url: row.get(5)?,
        })
    }
}

impl RecordStore for SqliteRecordStore {
    type Error = StoreError;

    fn records_in(&self, category: Category) -> Result<Vec<Record>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category, subcategory, fields_json, last_modified, url
             FROM records WHERE category = ?1 ORDER BY id",
        )?;

        let records = stmt
            .query_map(params![category.as_str()], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn get_record(&self, category: Category, id: &str) -> Result<Option<Record>, Self::Error> {
        let record = self
            .conn
            .query_row(
                "SELECT id, category, subcategory, fields_json, last_modified, url
                 FROM records WHERE category = ?1 AND id = ?2",
                params![category.as_str(), id],
                Self::row_to_record,
            )
            .optional()?;

        Ok(record)
    }
}
