//! Strength module - unnormalized relationship confidence

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Accumulated confidence for a relationship
///
/// Detectors add up independent partial signals (an address match, a
/// keyword match, ...). The sum is deliberately left unnormalized: an edge
/// backed by two strong signals may score above 1.0, and detector thresholds
/// are compared against that raw value. Use [`Strength::display`] when a
/// value in `[0, 1]` is needed for presentation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Strength(f64);

impl Strength {
    /// No evidence
    pub const ZERO: Strength = Strength(0.0);

    /// Create a strength from a raw score
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw accumulated value (may exceed 1.0)
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Value clamped to `[0, 1]` for display
    pub fn display(&self) -> f64 {
        self.0.clamp(0.0, 1.0)
    }

    /// Whether any signal contributed
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Whether the raw value is strictly above a threshold
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.0 > threshold
    }

    /// Whether the raw value is at or above a threshold
    pub fn reaches(&self, threshold: f64) -> bool {
        self.0 >= threshold
    }
}

impl Add<f64> for Strength {
    type Output = Strength;

    fn add(self, weight: f64) -> Strength {
        Strength(self.0 + weight)
    }
}

impl AddAssign<f64> for Strength {
    fn add_assign(&mut self, weight: f64) {
        self.0 += weight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_past_one() {
        let mut strength = Strength::ZERO;
        strength += 0.8;
        strength += 0.6;
        assert!((strength.value() - 1.4).abs() < 1e-9);
        assert_eq!(strength.display(), 1.0);
    }

    #[test]
    fn test_threshold_comparisons() {
        let strength = Strength::new(0.5);
        assert!(!strength.exceeds(0.5));
        assert!(strength.reaches(0.5));
        assert!(strength.exceeds(0.4));
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Strength::new(0.9)).unwrap();
        assert_eq!(json, "0.9");
    }
}
