//! Beneficiary detection for insurance policies

use super::*;
use crate::similarity::names_match;
use govault_domain::RelationshipType;

const BENEFICIARY_FIELDS: &[&str] = &[
    "beneficiaries",
    "beneficiary",
    "primaryBeneficiary",
    "contingentBeneficiary",
];

fn named_beneficiaries(policy: &Record) -> Vec<String> {
    BENEFICIARY_FIELDS
        .iter()
        .flat_map(|field| policy.list(field))
        .collect()
}

/// People named as beneficiaries of a policy (Insurance subject)
///
/// Contacts are matched on `name`, family members on `fullName`. Each person
/// yields at most one edge, pointing from the person to the policy.
pub fn beneficiaries(
    policy: &Record,
    all_records: &[Record],
    ctx: &DetectorContext<'_>,
) -> Vec<Relationship> {
    let names = named_beneficiaries(policy);
    if names.is_empty() {
        return Vec::new();
    }

    let people = [
        (Category::Contacts, &["name"][..], CONTACT_BENEFICIARY_STRENGTH),
        (Category::FamilyId, &["fullName", "name"][..], FAMILY_BENEFICIARY_STRENGTH),
    ];

    let mut edges = Vec::new();
    for (category, name_fields, weight) in people {
        for person in candidates(policy, all_records, category) {
            let person_name = person.text_any(name_fields);
            let listed = names.iter().any(|name| names_match(name, &person_name));

            if listed {
                edges.push(Relationship::detected(
                    person,
                    policy,
                    RelationshipType::BeneficiaryOf,
                    Strength::new(weight),
                    format!("{} is a beneficiary of {}", person_name, policy.title()),
                    ctx.now,
                ));
            }
        }
    }

    edges
}
