//! Estate documents governing assets

use super::*;
use crate::similarity::contains_any;
use govault_domain::RelationshipType;

/// Assets governed by a will or trust (Legal subject)
///
/// Any legal document whose type mentions "will" or "trust" governs every
/// Property and Finance record in the vault.
pub fn governed_assets(
    document: &Record,
    all_records: &[Record],
    ctx: &DetectorContext<'_>,
) -> Vec<Relationship> {
    let document_type = kind_of(document, &["documentType", "type"]);
    if !contains_any(&document_type, &["will", "trust"]) {
        return Vec::new();
    }

    [Category::Property, Category::Finance]
        .into_iter()
        .flat_map(|category| candidates(document, all_records, category))
        .map(|asset| {
            Relationship::detected(
                document,
                asset,
                RelationshipType::Governs,
                Strength::new(GOVERNS_STRENGTH),
                format!("{} governs the disposition of {}", document_type, asset.title()),
                ctx.now,
            )
        })
        .collect()
}
