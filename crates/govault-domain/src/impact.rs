//! Impact module - what a proposed change to a document may affect

use crate::{Category, RelatedDocument};
use serde::{Deserialize, Serialize};

/// Risk classification of a proposed change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Nothing notable depends on the change
    #[default]
    Low,
    /// Related documents should be reviewed
    Medium,
    /// Money movement or legal standing may break
    High,
}

impl RiskLevel {
    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Derived summary of a proposed change; never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    /// Documents related to the one being changed
    pub affected_documents: Vec<RelatedDocument>,

    /// Follow-up actions for the user
    pub suggested_actions: Vec<String>,

    /// Risk classification
    pub risk_level: RiskLevel,

    /// One-sentence summary
    pub description: String,
}

impl ImpactReport {
    /// Report for a change that affects nothing
    pub fn empty(description: impl Into<String>) -> Self {
        Self {
            affected_documents: Vec::new(),
            suggested_actions: Vec::new(),
            risk_level: RiskLevel::Low,
            description: description.into(),
        }
    }

    /// Zero-impact report for a document of `category`
    ///
    /// Known categories are rendered with their wire name; anything else is
    /// echoed as given.
    pub fn unaffected(category: &str) -> Self {
        let name = Category::parse(category).map_or(category, |c| c.as_str());
        Self::empty(Self::summary(name, 0))
    }

    /// One-sentence summary of how many documents a change touches
    ///
    /// # Examples
    ///
    /// ```
    /// use govault_domain::ImpactReport;
    ///
    /// assert_eq!(
    ///     ImpactReport::summary("Property", 1),
    ///     "Changing this Property document may affect 1 related document."
    /// );
    /// ```
    pub fn summary(category: &str, affected: usize) -> String {
        format!(
            "Changing this {} document may affect {} related document{}.",
            category,
            affected,
            if affected == 1 { "" } else { "s" }
        )
    }
}
