//! Impact analysis for proposed document changes

use crate::{RelationshipEngine, RiskPolicy};
use govault_domain::traits::RecordStore;
use govault_domain::{Category, FieldValue, ImpactReport, RiskLevel};
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::{error, info};

/// A category-specific trigger: changing one of `fields` calls for `actions`
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactRule {
    /// Category of the changed document
    pub category: Category,
    /// Fields whose presence in the change set fires the rule
    pub fields: Vec<String>,
    /// Follow-up actions to suggest
    pub actions: Vec<String>,
    /// Risk assigned when the rule fires
    pub risk: RiskLevel,
}

impl ImpactRule {
    /// Create a rule
    pub fn new(category: Category, fields: &[&str], actions: &[&str], risk: RiskLevel) -> Self {
        Self {
            category,
            fields: fields.iter().map(|f| f.to_string()).collect(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
            risk,
        }
    }

    /// Whether this rule fires for a change set on a document of `category`
    pub fn applies(&self, category: Category, changes: &BTreeMap<String, FieldValue>) -> bool {
        self.category == category && self.fields.iter().any(|f| changes.contains_key(f))
    }
}

/// Built-in rules, in evaluation order
pub fn default_rules() -> Vec<ImpactRule> {
    vec![
        ImpactRule::new(
            Category::Property,
            &["address"],
            &[
                "Update address on related insurance policies",
                "Notify mortgage lender of address change",
            ],
            RiskLevel::Medium,
        ),
        ImpactRule::new(
            Category::Insurance,
            &["renewalDate"],
            &[
                "Update calendar reminders for the new renewal date",
                "Review coverage amounts before renewal",
            ],
            RiskLevel::Medium,
        ),
        ImpactRule::new(
            Category::Finance,
            &["accountNumber"],
            &[
                "Update automatic payment setups",
                "Notify payees of the new account number",
            ],
            RiskLevel::High,
        ),
        ImpactRule::new(
            Category::Insurance,
            &["beneficiaries"],
            &["Confirm beneficiary designations with family members"],
            RiskLevel::High,
        ),
        ImpactRule::new(
            Category::Legal,
            &["executor"],
            &["Review executor designation with your attorney"],
            RiskLevel::Medium,
        ),
        ImpactRule::new(
            Category::Contacts,
            &["phone", "email"],
            &["Update contact details on linked records"],
            RiskLevel::Low,
        ),
    ]
}

/// Derives impact reports from relationships and change-triggered rules
#[derive(Debug, Clone)]
pub struct ImpactAnalyzer {
    engine: RelationshipEngine,
    rules: Vec<ImpactRule>,
}

impl ImpactAnalyzer {
    /// Create an analyzer with the built-in rules
    pub fn new(engine: RelationshipEngine) -> Self {
        Self::with_rules(engine, default_rules())
    }

    /// Create an analyzer with a custom rule table
    pub fn with_rules(engine: RelationshipEngine, rules: Vec<ImpactRule>) -> Self {
        Self { engine, rules }
    }

    /// Summarize what a proposed change to a document may affect
    ///
    /// Risk starts at low and is folded over every rule that fires, using the
    /// engine's [`RiskPolicy`]. With the default `LastWins` policy a later rule
    /// replaces an earlier, possibly higher, level.
    ///
    /// An unknown category or an unreachable store yields a zero-impact report.
    pub fn analyze_document_impact<S>(
        &self,
        store: &S,
        document_id: &str,
        category: &str,
        changes: &BTreeMap<String, FieldValue>,
    ) -> ImpactReport
    where
        S: RecordStore,
        S::Error: Display,
    {
        let Some(parsed) = Category::parse(category) else {
            return ImpactReport::unaffected(category);
        };

        let affected_documents = match self.engine.relationships_for(store, document_id, parsed) {
            Ok(related) => related,
            Err(e) => {
                error!(document = document_id, category = %parsed, error = %e, "impact analysis failed");
                return ImpactReport::unaffected(parsed.as_str());
            }
        };

        let policy: RiskPolicy = self.engine.config().risk_policy;
        let mut risk_level = RiskLevel::Low;
        let mut suggested_actions = Vec::new();

        for rule in self.rules.iter().filter(|r| r.applies(parsed, changes)) {
            suggested_actions.extend(rule.actions.iter().cloned());
            risk_level = policy.combine(risk_level, rule.risk);
        }

        info!(
            document = document_id,
            category = %parsed,
            affected = affected_documents.len(),
            risk = risk_level.as_str(),
            "impact analyzed"
        );

        ImpactReport {
            description: ImpactReport::summary(parsed.as_str(), affected_documents.len()),
            affected_documents,
            suggested_actions,
            risk_level,
        }
    }
}
