//! Professional-service detection for contacts

use super::*;
use crate::similarity::{contains_any, names_match};
use govault_domain::RelationshipType;

const SPECIALTY: &[&str] = &["specialty", "profession", "role", "relationship", "type"];
const COMPANY: &[&str] = &["company", "firm", "organization"];

/// Which record fields carry the professional's name and firm for one kind of service
struct Service {
    keywords: &'static [&'static str],
    category: Category,
    person_fields: &'static [&'static str],
    firm_fields: &'static [&'static str],
}

const SERVICES: &[Service] = &[
    Service {
        keywords: &["insurance"],
        category: Category::Insurance,
        person_fields: &["agentName", "agent"],
        firm_fields: &["provider", "company", "insurer"],
    },
    Service {
        keywords: &["financial", "advisor"],
        category: Category::Finance,
        person_fields: &["advisor", "advisorName", "financialAdvisor"],
        firm_fields: &["institution", "bank", "company"],
    },
    Service {
        keywords: &["attorney", "legal", "lawyer"],
        category: Category::Legal,
        person_fields: &["attorney", "attorneyName", "preparedBy"],
        firm_fields: &["lawFirm", "firm"],
    },
];

/// Records a professional contact works on (Contacts subject)
///
/// The contact's specialty or company decides which categories are searched;
/// within them the contact's own name and firm name are matched against the
/// record. Edges point from the contact to the record.
pub fn professional_services(
    contact: &Record,
    all_records: &[Record],
    ctx: &DetectorContext<'_>,
) -> Vec<Relationship> {
    let name = contact.text("name");
    let company = contact.text_any(COMPANY);
    let profile = format!("{} {}", kind_of(contact, SPECIALTY), company);

    let mut edges = Vec::new();
    for service in SERVICES.iter().filter(|s| contains_any(&profile, s.keywords)) {
        for record in candidates(contact, all_records, service.category) {
            let mut strength = Strength::ZERO;
            if names_match(&name, &record.text_any(service.person_fields)) {
                strength += PROFESSIONAL_NAME_WEIGHT;
            }
            if names_match(&company, &record.text_any(service.firm_fields)) {
                strength += PROFESSIONAL_FIRM_WEIGHT;
            }

            if !strength.is_zero() && strength.reaches(ctx.config.professional_threshold) {
                edges.push(Relationship::detected(
                    contact,
                    record,
                    RelationshipType::ProfessionalFor,
                    strength,
                    format!("{} provides professional services for {}", contact.title(), record.title()),
                    ctx.now,
                ));
            }
        }
    }

    edges
}
