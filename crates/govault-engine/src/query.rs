//! Relationship queries against a record store

use crate::aggregator::analyze_document_relationships;
use crate::detectors::DetectorContext;
use crate::{EngineConfig, EngineError};
use govault_domain::traits::RecordStore;
use govault_domain::{Category, RelatedDocument, Record, Relationship};
use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, warn};

/// Current timestamp in milliseconds since Unix epoch
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn store_error<E: Display>(e: E) -> EngineError {
    EngineError::Store(e.to_string())
}

/// The relationship engine
///
/// Stateless apart from its configuration. The record store is passed into
/// every call, so each request can bring its own store (and credentials).
///
/// # Examples
///
/// ```
/// use govault_domain::{Category, Record};
/// use govault_engine::RelationshipEngine;
/// use govault_store::MemoryRecordStore;
///
/// let store = MemoryRecordStore::with_records(vec![
///     Record::new("prop-1", Category::Property).with_field("address", "123 Main St"),
///     Record::new("ins-1", Category::Insurance).with_field("propertyAddress", "123 Main St"),
/// ]);
///
/// let engine = RelationshipEngine::default();
/// let related = engine.document_relationships(&store, "prop-1", "Property");
/// assert_eq!(related.len(), 1);
/// assert_eq!(related[0].id, "ins-1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RelationshipEngine {
    config: EngineConfig,
}

impl RelationshipEngine {
    /// Create an engine with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the detectors for `record` against an in-memory working set
    pub fn analyze(&self, record: &Record, all_records: &[Record], now: u64) -> Vec<Relationship> {
        let ctx = DetectorContext::new(&self.config, now);
        analyze_document_relationships(record, all_records, &ctx)
    }

    /// Relationships of a stored document, as seen from that document
    ///
    /// Returns an empty list when the document does not exist. Store failures
    /// are returned as errors.
    pub fn relationships_for<S>(
        &self,
        store: &S,
        document_id: &str,
        category: Category,
    ) -> Result<Vec<RelatedDocument>, EngineError>
    where
        S: RecordStore,
        S::Error: Display,
    {
        let Some(subject) = store.get_record(category, document_id).map_err(store_error)? else {
            debug!(document = document_id, %category, "document not found");
            return Ok(Vec::new());
        };

        let all_records = store.all_records().map_err(store_error)?;
        let edges = self.analyze(&subject, &all_records, current_timestamp());

        Ok(edges
            .iter()
            .filter(|edge| edge.involves(&subject.id, subject.category))
            .filter_map(|edge| {
                let (other_id, other_category) = edge.other_end(&subject.id, subject.category);
                all_records
                    .iter()
                    .find(|r| r.id == other_id && r.category == other_category)
                    .map(|other| RelatedDocument::project(&subject, edge, other))
            })
            .collect())
    }

    /// Relationships of a document for display
    ///
    /// Never fails: an unknown category, a missing document or an unreachable
    /// store all yield an empty list.
    pub fn document_relationships<S>(
        &self,
        store: &S,
        document_id: &str,
        category: &str,
    ) -> Vec<RelatedDocument>
    where
        S: RecordStore,
        S::Error: Display,
    {
        let Some(category) = Category::parse(category) else {
            warn!(category, "unknown category in relationship query");
            return Vec::new();
        };

        match self.relationships_for(store, document_id, category) {
            Ok(related) => related,
            Err(e) => {
                error!(document = document_id, %category, error = %e, "failed to load relationships");
                Vec::new()
            }
        }
    }

    /// Relationships a candidate record would have if saved
    ///
    /// The candidate replaces any stored record with the same category and
    /// ID, so edited records are analyzed against their new values.
    pub fn analyze_candidate<S>(&self, store: &S, candidate: &Record) -> Result<Vec<Relationship>, EngineError>
    where
        S: RecordStore,
        S::Error: Display,
    {
        let mut all_records = store.all_records().map_err(store_error)?;
        all_records.retain(|r| !(r.id == candidate.id && r.category == candidate.category));
        all_records.push(candidate.clone());

        Ok(self.analyze(candidate, &all_records, current_timestamp()))
    }
}
