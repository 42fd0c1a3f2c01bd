//! Category module - the vault sections a record can live in

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vault section a record belongs to
///
/// This is the single source of truth for category names; the store, the
/// detectors and the HTTP layer all match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Identity documents of family members (passports, licenses, ...)
    #[serde(rename = "FamilyID", alias = "FamilyIDs")]
    FamilyId,

    /// Bank accounts, loans, investments
    Finance,

    /// Real estate and vehicles
    Property,

    /// Insurance policies
    Insurance,

    /// Tax returns and filings
    Taxes,

    /// Wills, trusts, powers of attorney
    Legal,

    /// Business entities and their documents
    Business,

    /// People and professionals the family deals with
    Contacts,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 8] = [
        Category::FamilyId,
        Category::Finance,
        Category::Property,
        Category::Insurance,
        Category::Taxes,
        Category::Legal,
        Category::Business,
        Category::Contacts,
    ];

    /// Get the wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FamilyId => "FamilyID",
            Category::Finance => "Finance",
            Category::Property => "Property",
            Category::Insurance => "Insurance",
            Category::Taxes => "Taxes",
            Category::Legal => "Legal",
            Category::Business => "Business",
            Category::Contacts => "Contacts",
        }
    }

    /// Parse a category name, case-insensitively
    ///
    /// Returns `None` for anything that is not a known category so callers
    /// can treat unknown input as "nothing to do" instead of an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use govault_domain::Category;
    ///
    /// assert_eq!(Category::parse("insurance"), Some(Category::Insurance));
    /// assert_eq!(Category::parse("Family IDs"), Some(Category::FamilyId));
    /// assert_eq!(Category::parse("recipes"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "familyid" | "familyids" | "family-ids" | "family_ids" | "family ids" | "family-id" => {
                Some(Category::FamilyId)
            }
            "finance" => Some(Category::Finance),
            "property" => Some(Category::Property),
            "insurance" => Some(Category::Insurance),
            "taxes" => Some(Category::Taxes),
            "legal" => Some(Category::Legal),
            "business" => Some(Category::Business),
            "contacts" | "contact" => Some(Category::Contacts),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_wire_names() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Category::parse("family-ids"), Some(Category::FamilyId));
        assert_eq!(Category::parse("  CONTACT "), Some(Category::Contacts));
        assert_eq!(Category::parse(""), None);
        assert_eq!(Category::parse("Passwords"), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Category::FamilyId).unwrap();
        assert_eq!(json, "\"FamilyID\"");

        let parsed: Category = serde_json::from_str("\"FamilyIDs\"").unwrap();
        assert_eq!(parsed, Category::FamilyId);
    }
}
