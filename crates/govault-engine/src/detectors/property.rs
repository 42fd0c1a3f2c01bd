//! Property <-> Insurance coverage and Property <- Finance loan detectors

use super::*;
use crate::similarity::{addresses_match, contains_any};
use govault_domain::RelationshipType;
use tracing::trace;

const PROPERTY_ADDRESS: &[&str] = &["address", "propertyAddress"];
const PROPERTY_TYPE: &[&str] = &["propertyType", "type"];
const INSURED_ADDRESS: &[&str] = &["propertyAddress", "insuredAddress"];
const POLICY_TYPE: &[&str] = &["policyType", "type"];
const COLLATERAL_ADDRESS: &[&str] = &["collateralAddress", "propertyAddress"];
const LOAN_PURPOSE: &[&str] = &["purpose", "loanPurpose"];
const LOAN_AMOUNT: &[&str] = &["loanAmount", "originalAmount", "amount"];
const PURCHASE_PRICE: &[&str] = &["purchasePrice", "purchaseAmount"];

const RESIDENTIAL: &[&str] = &[
    "home", "house", "residence", "residential", "condo", "townhouse", "primary", "single family",
];
const HOME_POLICY: &[&str] = &["home", "dwelling", "condo"];
const VEHICLE: &[&str] = &["vehicle", "car", "auto", "truck", "motorcycle", "boat"];
const AUTO_POLICY: &[&str] = &["auto", "vehicle", "car", "motor"];
const RENTAL: &[&str] = &["rental", "investment"];
const LANDLORD_POLICY: &[&str] = &["landlord", "rental"];

/// Weight of the property-type/policy-type keyword pairing, if any
fn type_weight(property_type: &str, policy_type: &str) -> f64 {
    if contains_any(property_type, VEHICLE) && contains_any(policy_type, AUTO_POLICY) {
        VEHICLE_TYPE_WEIGHT
    } else if contains_any(property_type, RESIDENTIAL) && contains_any(policy_type, HOME_POLICY) {
        RESIDENTIAL_TYPE_WEIGHT
    } else if contains_any(property_type, RENTAL) && contains_any(policy_type, LANDLORD_POLICY) {
        RENTAL_TYPE_WEIGHT
    } else {
        0.0
    }
}

/// Score how strongly a policy appears to cover a property
fn coverage(property: &Record, policy: &Record) -> (Strength, String) {
    let address = property.text_any(PROPERTY_ADDRESS);
    let policy_type = kind_of(policy, POLICY_TYPE);
    let mut strength = Strength::ZERO;

    let address_matched = addresses_match(&address, &policy.text_any(INSURED_ADDRESS));
    if address_matched {
        strength += COVERAGE_ADDRESS_WEIGHT;
    }
    strength += type_weight(&kind_of(property, PROPERTY_TYPE), &policy_type);

    let label = if policy_type.is_empty() {
        "Insurance".to_string()
    } else {
        policy_type
    };
    let description = if address_matched {
        format!("{} policy covers the property at {}", label, address)
    } else {
        format!("{} policy matches the property type of {}", label, property.title())
    };

    (strength, description)
}

/// Insurance policies covering a property (Property subject)
///
/// Edges point from the policy to the property.
pub fn insurance_for_property(
    property: &Record,
    all_records: &[Record],
    ctx: &DetectorContext<'_>,
) -> Vec<Relationship> {
    candidates(property, all_records, Category::Insurance)
        .filter_map(|policy| {
            let (strength, description) = coverage(property, policy);
            trace!(policy = %policy.id, strength = strength.value(), "coverage score");
            strength
                .exceeds(ctx.config.insurance_threshold)
                .then(|| {
                    Relationship::detected(
                        policy,
                        property,
                        RelationshipType::Insures,
                        strength,
                        description,
                        ctx.now,
                    )
                })
        })
        .collect()
}

/// Properties covered by a policy (Insurance subject)
///
/// Same scoring as [`insurance_for_property`], seen from the policy.
pub fn property_for_insurance(
    policy: &Record,
    all_records: &[Record],
    ctx: &DetectorContext<'_>,
) -> Vec<Relationship> {
    candidates(policy, all_records, Category::Property)
        .filter_map(|property| {
            let (strength, description) = coverage(property, policy);
            strength
                .exceeds(ctx.config.insurance_threshold)
                .then(|| {
                    Relationship::detected(
                        policy,
                        property,
                        RelationshipType::Insures,
                        strength,
                        description,
                        ctx.now,
                    )
                })
        })
        .collect()
}

/// Loans secured by a property (Property subject)
///
/// Edges point from the loan to the property.
pub fn loans_for_property(
    property: &Record,
    all_records: &[Record],
    ctx: &DetectorContext<'_>,
) -> Vec<Relationship> {
    let address = property.text_any(PROPERTY_ADDRESS);
    let purchase_price = property.number_any(PURCHASE_PRICE).filter(|p| *p > 0.0);

    candidates(property, all_records, Category::Finance)
        .filter_map(|loan| {
            let mut strength = Strength::ZERO;
            let mut reasons = Vec::new();

            if addresses_match(&address, &loan.text_any(COLLATERAL_ADDRESS)) {
                strength += COLLATERAL_ADDRESS_WEIGHT;
                reasons.push("collateral address matches");
            }

            if contains_any(&loan.text_any(LOAN_PURPOSE), &["home", "mortgage"]) {
                strength += LOAN_PURPOSE_WEIGHT;
                reasons.push("home loan purpose");
            }

            if let (Some(price), Some(amount)) = (purchase_price, loan.number_any(LOAN_AMOUNT)) {
                if ((amount - price) / price).abs() <= ctx.config.loan_amount_tolerance {
                    strength += LOAN_AMOUNT_WEIGHT;
                    reasons.push("amount close to purchase price");
                }
            }

            strength.exceeds(ctx.config.loan_threshold).then(|| {
                Relationship::detected(
                    loan,
                    property,
                    RelationshipType::LoanSecures,
                    strength,
                    format!("{} is secured by {} ({})", loan.title(), property.title(), reasons.join(", ")),
                    ctx.now,
                )
            })
        })
        .collect()
}
