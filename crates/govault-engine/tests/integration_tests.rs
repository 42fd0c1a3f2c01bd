//! Integration tests for govault-engine
//!
//! These tests run the engine against in-memory and SQLite record stores.

use govault_domain::traits::RecordStore;
use govault_domain::{Category, Direction, FieldValue, Record, RelationshipType, RiskLevel};
use govault_engine::{
    EngineConfig, ImpactAnalyzer, ImpactRule, RelationshipEngine, RiskPolicy,
};
use govault_store::{MemoryRecordStore, SqliteRecordStore};
use std::collections::BTreeMap;

/// Store that is always unreachable
struct OfflineStore;

impl RecordStore for OfflineStore {
    type Error = String;

    fn records_in(&self, _category: Category) -> Result<Vec<Record>, Self::Error> {
        Err("sheet service unavailable".to_string())
    }
}

fn vault() -> Vec<Record> {
    vec![
        Record::new("prop-1", Category::Property)
            .with_field("address", "123 Main St")
            .with_field("propertyType", "Single Family Home")
            .with_field("purchasePrice", 500_000.0),
        Record::new("ins-1", Category::Insurance)
            .with_field("policyName", "Homeowners Gold")
            .with_field("propertyAddress", "123 Main St")
            .with_field("policyType", "home")
            .with_field("paymentAccount", "****4321")
            .with_field("beneficiaries", vec!["Jane Doe"]),
        Record::new("loan-1", Category::Finance)
            .with_field("accountName", "First National Mortgage")
            .with_field("collateralAddress", "123 Main St")
            .with_field("purpose", "mortgage"),
        Record::new("chk-1", Category::Finance).with_field("accountNumber", "000987654321"),
        Record::new("fam-1", Category::FamilyId).with_field("fullName", "Jane Doe"),
        Record::new("will-1", Category::Legal).with_field("documentType", "Last Will"),
    ]
}

fn changes(fields: &[(&str, &str)]) -> BTreeMap<String, FieldValue> {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), FieldValue::from(*v)))
        .collect()
}

#[test]
fn test_property_end_to_end_scenario() {
    let records = vec![
        Record::new("prop-1", Category::Property).with_field("address", "123 Main St"),
        Record::new("ins-1", Category::Insurance)
            .with_field("propertyAddress", "123 Main St")
            .with_field("policyType", "home"),
        Record::new("loan-1", Category::Finance)
            .with_field("collateralAddress", "123 Main St")
            .with_field("purpose", "mortgage"),
    ];

    let engine = RelationshipEngine::default();
    let edges = engine.analyze(&records[0], &records, 1_700_000_000_000);

    assert_eq!(edges.len(), 2);

    let insures = edges
        .iter()
        .find(|e| e.relationship_type == RelationshipType::Insures)
        .expect("insures edge");
    assert_eq!(insures.source_id, "ins-1");
    assert_eq!(insures.source_category, Category::Insurance);

    let loan = edges
        .iter()
        .find(|e| e.relationship_type == RelationshipType::LoanSecures)
        .expect("loan-secures edge");
    assert_eq!(loan.source_id, "loan-1");
    assert_eq!(loan.source_category, Category::Finance);
    assert_eq!(loan.target_id, "prop-1");

    assert!(edges.iter().all(|e| e.auto_detected));
    assert!(edges.iter().all(|e| e.created_at == 1_700_000_000_000));
}

#[test]
fn test_document_relationships_projection() {
    let store = MemoryRecordStore::with_records(vault());
    let engine = RelationshipEngine::default();

    let related = engine.document_relationships(&store, "prop-1", "Property");
    let ids: Vec<&str> = related.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["ins-1", "loan-1"]);

    let policy = &related[0];
    assert_eq!(policy.title, "Homeowners Gold");
    assert_eq!(policy.category, Category::Insurance);
    assert_eq!(policy.direction, Direction::Incoming);
    // 0.8 address + 0.5 type accumulates past 1.0 but displays clamped
    assert_eq!(policy.strength, 1.0);
}

#[test]
fn test_raw_strength_is_not_normalized() {
    let records = vault();
    let engine = RelationshipEngine::default();
    let edges = engine.analyze(&records[0], &records, 0);

    let insures = edges
        .iter()
        .find(|e| e.relationship_type == RelationshipType::Insures)
        .unwrap();
    assert!(insures.strength.value() > 1.0);
}

#[test]
fn test_insurance_relationships_include_beneficiary() {
    let store = MemoryRecordStore::with_records(vault());
    let engine = RelationshipEngine::default();

    let related = engine.document_relationships(&store, "ins-1", "insurance");
    let beneficiary = related
        .iter()
        .find(|r| r.relationship_type == RelationshipType::BeneficiaryOf)
        .expect("beneficiary edge");
    assert_eq!(beneficiary.id, "fam-1");
    assert_eq!(beneficiary.strength, 0.95);
    assert_eq!(beneficiary.direction, Direction::Incoming);
}

#[test]
fn test_finance_and_legal_relationships() {
    let store = MemoryRecordStore::with_records(vault());
    let engine = RelationshipEngine::default();

    let auto_pay = engine.document_relationships(&store, "chk-1", "Finance");
    assert_eq!(auto_pay.len(), 1);
    assert_eq!(auto_pay[0].relationship_type, RelationshipType::PaymentSource);
    assert_eq!(auto_pay[0].direction, Direction::Outgoing);

    let governed = engine.document_relationships(&store, "will-1", "Legal");
    let ids: Vec<&str> = governed.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["prop-1", "loan-1", "chk-1"]);
}

#[test]
fn test_unknown_category_returns_empty() {
    let store = MemoryRecordStore::with_records(vault());
    let engine = RelationshipEngine::default();

    assert!(engine.document_relationships(&store, "prop-1", "Passwords").is_empty());
    assert!(engine.document_relationships(&store, "prop-1", "").is_empty());
}

#[test]
fn test_missing_document_returns_empty() {
    let store = MemoryRecordStore::with_records(vault());
    let engine = RelationshipEngine::default();

    assert!(engine.document_relationships(&store, "prop-404", "Property").is_empty());
}

#[test]
fn test_shared_row_id_across_categories() {
    let store = MemoryRecordStore::with_records(vec![
        Record::new("row-2", Category::Property).with_field("address", "123 Main St"),
        Record::new("row-2", Category::Insurance).with_field("propertyAddress", "123 Main St"),
    ]);
    let engine = RelationshipEngine::default();

    let related = engine.document_relationships(&store, "row-2", "Property");
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, "row-2");
    assert_eq!(related[0].category, Category::Insurance);
    assert_eq!(related[0].direction, Direction::Incoming);

    let from_policy = engine.document_relationships(&store, "row-2", "Insurance");
    assert_eq!(from_policy.len(), 1);
    assert_eq!(from_policy[0].category, Category::Property);
    assert_eq!(from_policy[0].direction, Direction::Outgoing);

    let analyzer = ImpactAnalyzer::new(engine);
    let report = analyzer.analyze_document_impact(&store, "row-2", "Property", &BTreeMap::new());
    assert_eq!(report.affected_documents.len(), 1);
    assert_eq!(report.affected_documents[0].category, Category::Insurance);
}

#[test]
fn test_store_failure_degrades_to_empty() {
    let engine = RelationshipEngine::default();

    assert!(engine.document_relationships(&OfflineStore, "prop-1", "Property").is_empty());
    assert!(engine.relationships_for(&OfflineStore, "prop-1", Category::Property).is_err());
}

#[test]
fn test_analyze_candidate_uses_unsaved_values() {
    let store = MemoryRecordStore::with_records(vault());
    let engine = RelationshipEngine::default();

    // stored copy has the old address; the edited copy moves house
    let edited = Record::new("prop-1", Category::Property).with_field("address", "9 Lake Rd");
    let edges = engine.analyze_candidate(&store, &edited).unwrap();

    // loan purpose "mortgage" alone still passes; the policy no longer does
    let kinds: Vec<RelationshipType> = edges.iter().map(|e| e.relationship_type).collect();
    assert_eq!(kinds, vec![RelationshipType::LoanSecures]);
}

#[test]
fn test_impact_finance_account_number_is_high() {
    let store = MemoryRecordStore::with_records(vault());
    let analyzer = ImpactAnalyzer::new(RelationshipEngine::default());

    let report = analyzer.analyze_document_impact(
        &store,
        "chk-1",
        "Finance",
        &changes(&[("accountNumber", "000111112222")]),
    );

    assert_eq!(report.risk_level, RiskLevel::High);
    assert!(report
        .suggested_actions
        .iter()
        .any(|a| a.contains("automatic payment")));
    assert_eq!(report.affected_documents.len(), 1);
    assert_eq!(
        report.description,
        "Changing this Finance document may affect 1 related document."
    );
}

#[test]
fn test_impact_property_address_is_medium() {
    let store = MemoryRecordStore::with_records(vault());
    let analyzer = ImpactAnalyzer::new(RelationshipEngine::default());

    let report = analyzer.analyze_document_impact(
        &store,
        "prop-1",
        "Property",
        &changes(&[("address", "9 Lake Rd")]),
    );

    assert_eq!(report.risk_level, RiskLevel::Medium);
    assert_eq!(report.suggested_actions.len(), 2);
    assert_eq!(report.affected_documents.len(), 2);
}

#[test]
fn test_impact_without_trigger_is_low() {
    let store = MemoryRecordStore::with_records(vault());
    let analyzer = ImpactAnalyzer::new(RelationshipEngine::default());

    let report = analyzer.analyze_document_impact(
        &store,
        "ins-1",
        "Insurance",
        &changes(&[("notes", "called agent")]),
    );

    assert_eq!(report.risk_level, RiskLevel::Low);
    assert!(report.suggested_actions.is_empty());
    assert!(!report.affected_documents.is_empty());
}

#[test]
fn test_impact_unknown_category_and_offline_store() {
    let store = MemoryRecordStore::with_records(vault());
    let analyzer = ImpactAnalyzer::new(RelationshipEngine::default());
    let change = changes(&[("accountNumber", "1")]);

    let unknown = analyzer.analyze_document_impact(&store, "chk-1", "Recipes", &change);
    assert_eq!(unknown.risk_level, RiskLevel::Low);
    assert!(unknown.suggested_actions.is_empty());

    let offline = analyzer.analyze_document_impact(&OfflineStore, "chk-1", "Finance", &change);
    assert_eq!(offline.risk_level, RiskLevel::Low);
    assert!(offline.affected_documents.is_empty());
    assert!(offline.suggested_actions.is_empty());
}

#[test]
fn test_risk_policies_disagree_on_overwrite() {
    let store = MemoryRecordStore::with_records(vault());
    let rules = vec![
        ImpactRule::new(Category::Insurance, &["paymentAccount"], &["Verify auto-pay"], RiskLevel::High),
        ImpactRule::new(Category::Insurance, &["renewalDate"], &["Update reminders"], RiskLevel::Medium),
    ];
    let change = changes(&[("paymentAccount", "****9999"), ("renewalDate", "2027-03-01")]);

    let last_wins = ImpactAnalyzer::with_rules(RelationshipEngine::default(), rules.clone());
    let report = last_wins.analyze_document_impact(&store, "ins-1", "Insurance", &change);
    assert_eq!(report.risk_level, RiskLevel::Medium);
    assert_eq!(report.suggested_actions, vec!["Verify auto-pay", "Update reminders"]);

    let config = EngineConfig {
        risk_policy: RiskPolicy::Highest,
        ..EngineConfig::default()
    };
    let highest = ImpactAnalyzer::with_rules(RelationshipEngine::new(config), rules);
    let report = highest.analyze_document_impact(&store, "ins-1", "Insurance", &change);
    assert_eq!(report.risk_level, RiskLevel::High);
}

#[test]
fn test_engine_over_sqlite_store() {
    let mut store = SqliteRecordStore::new(":memory:").unwrap();
    let snapshot = serde_json::to_vec(&vault()).unwrap();
    store.import_snapshot(snapshot.as_slice()).unwrap();

    let engine = RelationshipEngine::default();
    let related = engine.document_relationships(&store, "prop-1", "Property");
    assert_eq!(related.len(), 2);
}
