//! Relationship module - directed edges between vault records

use crate::{Category, Record, Strength};
use serde::{Deserialize, Serialize};

/// Type of relationship between records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipType {
    /// A policy covers an asset
    Insures,

    /// A person is named as beneficiary of a policy
    BeneficiaryOf,

    /// A loan is secured by an asset
    LoanSecures,

    /// An account pays for a policy or bill
    PaymentSource,

    /// A person or entity owns an asset
    Owns,

    /// A service record maintains an asset
    Maintains,

    /// A legal document governs an asset
    Governs,

    /// A person witnessed a legal document
    Witnesses,

    /// A professional acts for a record (agent, advisor, attorney)
    ProfessionalFor,

    /// A provider services an account or policy
    Services,

    /// A newer document replaces an older one
    Supersedes,
}

impl RelationshipType {
    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Insures => "insures",
            RelationshipType::BeneficiaryOf => "beneficiary-of",
            RelationshipType::LoanSecures => "loan-secures",
            RelationshipType::PaymentSource => "payment-source",
            RelationshipType::Owns => "owns",
            RelationshipType::Maintains => "maintains",
            RelationshipType::Governs => "governs",
            RelationshipType::Witnesses => "witnesses",
            RelationshipType::ProfessionalFor => "professional-for",
            RelationshipType::Services => "services",
            RelationshipType::Supersedes => "supersedes",
        }
    }
}

/// A directed edge between two records
///
/// Edges are derived, never authored: the engine recomputes them from the
/// current record snapshot on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Source record ID
    pub source_id: String,

    /// Source record category
    pub source_category: Category,

    /// Target record ID
    pub target_id: String,

    /// Target record category
    pub target_category: Category,

    /// Type of relationship
    pub relationship_type: RelationshipType,

    /// Accumulated confidence (unnormalized)
    pub strength: Strength,

    /// Human-readable explanation
    pub description: String,

    /// Whether the edge was inferred rather than entered by a user
    pub auto_detected: bool,

    /// Creation time (Unix milliseconds)
    pub created_at: u64,

    /// Last update time (Unix milliseconds)
    pub updated_at: u64,
}

impl Relationship {
    /// Create an auto-detected relationship from `source` to `target`
    pub fn detected(
        source: &Record,
        target: &Record,
        relationship_type: RelationshipType,
        strength: Strength,
        description: impl Into<String>,
        now: u64,
    ) -> Self {
        Self {
            source_id: source.id.clone(),
            source_category: source.category,
            target_id: target.id.clone(),
            target_category: target.category,
            relationship_type,
            strength,
            description: description.into(),
            auto_detected: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the record `(id, category)` is the edge source
    ///
    /// Ids are only unique within a category, so both must agree.
    pub fn is_source(&self, id: &str, category: Category) -> bool {
        self.source_id == id && self.source_category == category
    }

    /// Whether the edge touches the record `(id, category)`
    pub fn involves(&self, id: &str, category: Category) -> bool {
        self.is_source(id, category) || (self.target_id == id && self.target_category == category)
    }

    /// ID and category of the end that is not `(id, category)`
    pub fn other_end(&self, id: &str, category: Category) -> (&str, Category) {
        if self.is_source(id, category) {
            (&self.target_id, self.target_category)
        } else {
            (&self.source_id, self.source_category)
        }
    }
}

/// Which way an edge points relative to the queried document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The queried document is the edge source
    Outgoing,
    /// The queried document is the edge target
    Incoming,
}

/// A relationship projected for display next to a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedDocument {
    /// ID of the related record
    pub id: String,

    /// Display title of the related record
    pub title: String,

    /// Category of the related record
    pub category: Category,

    /// Subcategory of the related record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    /// Type of the underlying relationship
    pub relationship_type: RelationshipType,

    /// Edge direction relative to the queried document
    pub direction: Direction,

    /// Display strength, clamped to [0, 1]
    pub strength: f64,

    /// Human-readable explanation
    pub description: String,

    /// Last modification time of the related record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    /// Link to the related record, if navigable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl RelatedDocument {
    /// Project an edge as seen from `subject`, describing the `other` record
    pub fn project(subject: &Record, edge: &Relationship, other: &Record) -> Self {
        let direction = if edge.is_source(&subject.id, subject.category) {
            Direction::Outgoing
        } else {
            Direction::Incoming
        };

        Self {
            id: other.id.clone(),
            title: other.title(),
            category: other.category,
            subcategory: other.subcategory.clone(),
            relationship_type: edge.relationship_type,
            direction,
            strength: edge.strength.display(),
            description: edge.description.clone(),
            last_modified: other.last_modified.clone(),
            url: other.url.clone(),
        }
    }
}
