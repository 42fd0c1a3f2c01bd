//! Fuzzy matching for addresses and person/company names
//!
//! Both matchers work on the same normalization: lowercase, ASCII punctuation
//! removed, whitespace collapsed. No stemming or transliteration is attempted.

use std::collections::HashSet;

/// Share of address tokens that must overlap for two addresses to match
pub const ADDRESS_OVERLAP_RATIO: f64 = 0.6;

/// Name tokens this short or shorter are ignored (initials, "jr", "de")
const MIN_NAME_TOKEN_LEN: usize = 2;

/// A single shared name token counts only if it is longer than this
const SINGLE_TOKEN_MIN_LEN: usize = 5;

/// Lowercase, strip ASCII punctuation and collapse whitespace
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn tokens(normalized: &str) -> HashSet<&str> {
    normalized.split(' ').filter(|t| !t.is_empty()).collect()
}

/// Whether two free-text addresses refer to the same place
///
/// Matches when the shared token count divided by the larger token count is
/// above [`ADDRESS_OVERLAP_RATIO`]. Empty addresses never match.
///
/// # Examples
///
/// ```
/// use govault_engine::similarity::addresses_match;
///
/// assert!(addresses_match("123 Main Street, Springfield", "123 main street springfield"));
/// assert!(!addresses_match("123 Main Street", "456 Oak Avenue"));
/// ```
pub fn addresses_match(a: &str, b: &str) -> bool {
    let (a, b) = (normalize(a), normalize(b));
    let (tokens_a, tokens_b) = (tokens(&a), tokens(&b));

    let longest = tokens_a.len().max(tokens_b.len());
    if longest == 0 {
        return false;
    }

    let shared = tokens_a.intersection(&tokens_b).count();
    shared as f64 / longest as f64 > ADDRESS_OVERLAP_RATIO
}

/// Whether two names refer to the same person or company
///
/// An exact match after normalization always counts. Otherwise tokens longer
/// than two characters are compared: two shared tokens match, and a single
/// shared token matches only if it is longer than five characters.
///
/// # Examples
///
/// ```
/// use govault_engine::similarity::names_match;
///
/// assert!(names_match("John Smith", "john  smith"));
/// assert!(names_match("Michael Rodriguez", "Michael R."));
/// assert!(!names_match("Jane Doe", "Jane Smith"));
/// ```
pub fn names_match(a: &str, b: &str) -> bool {
    let (a, b) = (normalize(a), normalize(b));
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }

    let significant = |s: &str| -> HashSet<String> {
        s.split(' ')
            .filter(|t| t.chars().count() > MIN_NAME_TOKEN_LEN)
            .map(str::to_string)
            .collect()
    };
    let (tokens_a, tokens_b) = (significant(&a), significant(&b));
    let shared: Vec<&String> = tokens_a.intersection(&tokens_b).collect();

    match shared.as_slice() {
        [] => false,
        [only] => only.chars().count() > SINGLE_TOKEN_MIN_LEN,
        _ => true,
    }
}

/// Last four digits of an account number, ignoring separators and masks
///
/// Returns `None` when fewer than four digits are present.
pub fn last_four_digits(account: &str) -> Option<String> {
    let digits: Vec<char> = account.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 4 {
        return None;
    }
    Some(digits[digits.len() - 4..].iter().collect())
}

/// Whether `haystack` contains any of the keywords, case-insensitively
pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    let haystack = haystack.to_lowercase();
    keywords.iter().any(|keyword| haystack.contains(keyword))
}
