//! GoVault Domain Layer
//!
//! This crate contains the core data model for the GoVault relationship engine.
//! It depends only on `serde` and defines the value objects and trait
//! interfaces that the engine, store and server crates build upon.
//!
//! ## Key Concepts
//!
//! - **Category**: The closed set of vault sections a record belongs to
//! - **Record**: A category-tagged bag of fields owned by an external store
//! - **Relationship**: A directed, typed, confidence-scored edge between records
//! - **Strength**: An unnormalized confidence accumulator
//! - **Impact report**: Derived summary of what a proposed change may affect
//!
//! ## Architecture
//!
//! - Pure data and logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod impact;
pub mod record;
pub mod relationship;
pub mod strength;
pub mod traits;

// Re-exports for convenience
pub use category::Category;
pub use impact::{ImpactReport, RiskLevel};
pub use record::{FieldValue, Record};
pub use relationship::{Direction, RelatedDocument, Relationship, RelationshipType};
pub use strength::Strength;
