//! Dispatch from a record's category to the detectors that apply to it

use crate::detectors::{self, Detector, DetectorContext};
use govault_domain::{Category, Record, Relationship};
use tracing::debug;

const PROPERTY: &[(&str, Detector)] = &[
    ("insurance_for_property", detectors::insurance_for_property),
    ("loans_for_property", detectors::loans_for_property),
];
const INSURANCE: &[(&str, Detector)] = &[
    ("property_for_insurance", detectors::property_for_insurance),
    ("beneficiaries", detectors::beneficiaries),
];
const FINANCE: &[(&str, Detector)] = &[("auto_pay", detectors::auto_pay)];
const LEGAL: &[(&str, Detector)] = &[("governed_assets", detectors::governed_assets)];
const CONTACTS: &[(&str, Detector)] = &[("professional_services", detectors::professional_services)];

/// Named detectors that run for a subject of the given category
pub fn detectors_for(category: Category) -> &'static [(&'static str, Detector)] {
    match category {
        Category::Property => PROPERTY,
        Category::Insurance => INSURANCE,
        Category::Finance => FINANCE,
        Category::Legal => LEGAL,
        Category::Contacts => CONTACTS,
        Category::FamilyId | Category::Taxes | Category::Business => &[],
    }
}

/// Run every applicable detector for `record` and concatenate their edges
///
/// Edges from different detectors are not deduplicated: the same pair of
/// records may be linked twice with different relationship types.
pub fn analyze_document_relationships(
    record: &Record,
    all_records: &[Record],
    ctx: &DetectorContext<'_>,
) -> Vec<Relationship> {
    let mut edges = Vec::new();

    for (name, detect) in detectors_for(record.category) {
        let found = detect(record, all_records, ctx);
        for edge in &found {
            debug!(
                detector = name,
                source = %edge.source_id,
                target = %edge.target_id,
                kind = edge.relationship_type.as_str(),
                strength = edge.strength.value(),
                "relationship detected"
            );
        }
        edges.extend(found);
    }

    debug!(
        record = %record.id,
        category = %record.category,
        candidates = all_records.len(),
        edges = edges.len(),
        "relationship analysis complete"
    );
    edges
}
