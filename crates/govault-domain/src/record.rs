//! Record module - category-tagged field bags owned by the external store

use crate::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single field value as it arrives from the sheet/document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Empty cell
    Null,
    /// Checkbox-style value
    Bool(bool),
    /// Numeric cell
    Number(f64),
    /// Free text
    Text(String),
    /// Multi-valued cell (e.g. a list of beneficiaries)
    List(Vec<String>),
}

impl FieldValue {
    /// Render the value as text; lists are joined with ", "
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(", "),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// A vault record
///
/// Records are read-only inputs to the engine. Every accessor degrades to an
/// empty value instead of failing, so detectors never have to special-case
/// missing or oddly typed cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Store-assigned identifier (row id or file id)
    pub id: String,

    /// Vault section
    pub category: Category,

    /// Finer grouping inside the category (e.g. "Auto" under Insurance)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    /// Field name -> value
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,

    /// Last modification time as reported by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    /// Link to the backing document, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Record {
    /// Create an empty record
    pub fn new(id: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            category,
            subcategory: None,
            fields: BTreeMap::new(),
            last_modified: None,
            url: None,
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Builder-style subcategory setter
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Get a field rendered as text, or `""` when absent
    pub fn text(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map(FieldValue::as_text)
            .unwrap_or_default()
    }

    /// Get the first non-empty text among several field aliases
    ///
    /// # Examples
    ///
    /// ```
    /// use govault_domain::{Category, Record};
    ///
    /// let loan = Record::new("l1", Category::Finance).with_field("loanPurpose", "Mortgage");
    /// assert_eq!(loan.text_any(&["purpose", "loanPurpose"]), "Mortgage");
    /// assert_eq!(loan.text_any(&["missing"]), "");
    /// ```
    pub fn text_any(&self, names: &[&str]) -> String {
        names
            .iter()
            .map(|name| self.text(name))
            .find(|value| !value.trim().is_empty())
            .unwrap_or_default()
    }

    /// Get a multi-valued field
    ///
    /// Accepts either a real list or a comma-separated string; blank entries
    /// are dropped.
    pub fn list(&self, name: &str) -> Vec<String> {
        let raw: Vec<String> = match self.fields.get(name) {
            Some(FieldValue::List(items)) => items.clone(),
            Some(FieldValue::Text(s)) => s.split(',').map(str::to_string).collect(),
            _ => Vec::new(),
        };

        raw.into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// Get a numeric field
    ///
    /// Text cells such as `"$450,000"` are parsed after stripping currency
    /// symbols and thousands separators.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.fields.get(name)? {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => {
                let cleaned: String = s
                    .chars()
                    .filter(|c| !matches!(c, '$' | ',' | ' '))
                    .collect();
                cleaned.parse().ok()
            }
            _ => None,
        }
    }

    /// Get the first numeric value among several field aliases
    pub fn number_any(&self, names: &[&str]) -> Option<f64> {
        names.iter().find_map(|name| self.number(name))
    }

    /// Human-readable title for display in relationship lists
    pub fn title(&self) -> String {
        let title = self.text_any(&[
            "name",
            "fullName",
            "title",
            "policyName",
            "accountName",
            "address",
            "documentType",
            "institution",
            "provider",
        ]);

        if title.is_empty() {
            self.id.clone()
        } else {
            title
        }
    }
}
