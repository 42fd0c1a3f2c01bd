//! Category-pair relationship detectors
//!
//! Each detector is a pure function of a subject record and the vault's
//! working set. It sums weighted partial signals into a [`Strength`] and
//! emits an edge only when that sum passes the detector's threshold. Hard
//! evidence (an address or account match) carries more weight than keyword
//! overlap.

mod contacts;
mod finance;
mod insurance;
mod legal;
mod property;

pub use contacts::professional_services;
pub use finance::auto_pay;
pub use insurance::beneficiaries;
pub use legal::governed_assets;
pub use property::{insurance_for_property, loans_for_property, property_for_insurance};

use crate::EngineConfig;
use govault_domain::{Category, Record, Relationship, Strength};

/// Insured address on the policy matches the property address
pub const COVERAGE_ADDRESS_WEIGHT: f64 = 0.8;

/// Residential property paired with a home/dwelling policy
pub const RESIDENTIAL_TYPE_WEIGHT: f64 = 0.5;

/// Vehicle paired with an auto policy
pub const VEHICLE_TYPE_WEIGHT: f64 = 0.6;

/// Rental property paired with a landlord policy
pub const RENTAL_TYPE_WEIGHT: f64 = 0.5;

/// Loan collateral address matches the property address
pub const COLLATERAL_ADDRESS_WEIGHT: f64 = 0.9;

/// Loan purpose mentions a home or mortgage
pub const LOAN_PURPOSE_WEIGHT: f64 = 0.7;

/// Loan amount is close to the purchase price
pub const LOAN_AMOUNT_WEIGHT: f64 = 0.5;

/// Beneficiary named on a policy matches a contact
pub const CONTACT_BENEFICIARY_STRENGTH: f64 = 0.9;

/// Beneficiary named on a policy matches a family member
pub const FAMILY_BENEFICIARY_STRENGTH: f64 = 0.95;

/// Account pays a policy (last four digits agree)
pub const AUTO_PAY_STRENGTH: f64 = 0.8;

/// A will or trust governs an asset
pub const GOVERNS_STRENGTH: f64 = 0.7;

/// Professional's own name appears on the record
pub const PROFESSIONAL_NAME_WEIGHT: f64 = 0.9;

/// Professional's firm appears on the record
pub const PROFESSIONAL_FIRM_WEIGHT: f64 = 0.6;

/// Everything a detector needs besides the records themselves
#[derive(Debug, Clone, Copy)]
pub struct DetectorContext<'a> {
    /// Thresholds
    pub config: &'a EngineConfig,
    /// Timestamp stamped on emitted edges (Unix milliseconds)
    pub now: u64,
}

impl<'a> DetectorContext<'a> {
    /// Create a context
    pub fn new(config: &'a EngineConfig, now: u64) -> Self {
        Self { config, now }
    }
}

/// Signature shared by all detectors
pub type Detector = fn(&Record, &[Record], &DetectorContext<'_>) -> Vec<Relationship>;

/// Records of one category, excluding the subject itself
pub(crate) fn candidates<'r>(
    subject: &'r Record,
    all_records: &'r [Record],
    category: Category,
) -> impl Iterator<Item = &'r Record> + 'r {
    all_records.iter().filter(move |record| {
        record.category == category
            && !(record.id == subject.id && record.category == subject.category)
    })
}

/// A record's kind: an explicit type field, else its subcategory
pub(crate) fn kind_of(record: &Record, fields: &[&str]) -> String {
    let kind = record.text_any(fields);
    if kind.is_empty() {
        record.subcategory.clone().unwrap_or_default()
    } else {
        kind
    }
}
