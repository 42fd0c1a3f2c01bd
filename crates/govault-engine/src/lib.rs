//! GoVault Relationship Engine
//!
//! Infers links between vault records and estimates the impact of changes.
//!
//! The engine provides:
//! - Fuzzy address and name matching ([`similarity`])
//! - One detector per category pair ([`detectors`])
//! - Category-driven dispatch over the detectors ([`aggregator`])
//! - Relationship queries against a record store ([`RelationshipEngine`])
//! - Risk-scored impact reports for proposed changes ([`ImpactAnalyzer`])
//!
//! Relationships are never stored. Every query recomputes them from the
//! current record snapshot.
//!
//! # Examples
//!
//! ```
//! use govault_domain::{Category, FieldValue, Record, RiskLevel};
//! use govault_engine::{EngineConfig, ImpactAnalyzer, RelationshipEngine};
//! use govault_store::MemoryRecordStore;
//! use std::collections::BTreeMap;
//!
//! let store = MemoryRecordStore::with_records(vec![
//!     Record::new("chk-1", Category::Finance).with_field("accountNumber", "000111222333"),
//! ]);
//!
//! let analyzer = ImpactAnalyzer::new(RelationshipEngine::new(EngineConfig::default()));
//! let mut changes = BTreeMap::new();
//! changes.insert("accountNumber".to_string(), FieldValue::from("000111229999"));
//!
//! let report = analyzer.analyze_document_impact(&store, "chk-1", "Finance", &changes);
//! assert_eq!(report.risk_level, RiskLevel::High);
//! ```

#![warn(missing_docs)]

pub mod aggregator;
mod config;
pub mod detectors;
mod error;
mod impact;
mod query;
pub mod similarity;

pub use aggregator::analyze_document_relationships;
pub use config::{EngineConfig, RiskPolicy};
pub use error::EngineError;
pub use impact::{default_rules, ImpactAnalyzer, ImpactRule};
pub use query::RelationshipEngine;
