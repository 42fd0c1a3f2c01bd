//! Engine configuration
//!
//! Detector emit thresholds and the impact risk policy. Signal weights are
//! fixed constants in [`crate::detectors`]; only the cut-offs are tunable.

use crate::EngineError;
use govault_domain::RiskLevel;
use serde::{Deserialize, Serialize};

/// How risk levels from several matching impact rules are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskPolicy {
    /// Each matching rule overwrites the previous level, in rule order
    #[default]
    LastWins,

    /// The highest level of any matching rule wins
    Highest,
}

impl RiskPolicy {
    /// Fold the next rule's risk into the running level
    pub fn combine(&self, current: RiskLevel, next: RiskLevel) -> RiskLevel {
        match self {
            RiskPolicy::LastWins => next,
            RiskPolicy::Highest => current.max(next),
        }
    }
}

/// Configuration for the relationship engine
///
/// # Examples
///
/// ```
/// use govault_engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.insurance_threshold, 0.5);
/// assert!(config.validate().is_ok());
///
/// let strict = EngineConfig::strict();
/// assert!(strict.loan_threshold > config.loan_threshold);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Property <-> Insurance edges are kept when strength exceeds this
    pub insurance_threshold: f64,

    /// Property <- Finance loan edges are kept when strength exceeds this
    pub loan_threshold: f64,

    /// Contact -> record professional edges are kept when strength reaches this
    pub professional_threshold: f64,

    /// Relative distance between loan amount and purchase price that still
    /// counts as correlated
    pub loan_amount_tolerance: f64,

    /// Risk combination for impact rules
    pub risk_policy: RiskPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            insurance_threshold: 0.5,
            loan_threshold: 0.6,
            professional_threshold: 0.6,
            loan_amount_tolerance: 0.2,
            risk_policy: RiskPolicy::LastWins,
        }
    }
}

impl EngineConfig {
    /// Configuration that only keeps edges backed by hard evidence
    ///
    /// Keyword-only matches no longer pass on their own: an insurance or loan
    /// edge needs an address match, a professional edge needs a name match.
    pub fn strict() -> Self {
        Self {
            insurance_threshold: 0.8,
            loan_threshold: 0.9,
            professional_threshold: 0.9,
            loan_amount_tolerance: 0.1,
            risk_policy: RiskPolicy::Highest,
        }
    }

    /// Check that thresholds are usable
    pub fn validate(&self) -> Result<(), EngineError> {
        let thresholds = [
            ("insurance_threshold", self.insurance_threshold),
            ("loan_threshold", self.loan_threshold),
            ("professional_threshold", self.professional_threshold),
        ];

        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.loan_amount_tolerance) {
            return Err(EngineError::Config(format!(
                "loan_amount_tolerance must be in [0, 1], got {}",
                self.loan_amount_tolerance
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.insurance_threshold, 0.5);
        assert_eq!(config.loan_threshold, 0.6);
        assert_eq!(config.professional_threshold, 0.6);
        assert_eq!(config.loan_amount_tolerance, 0.2);
        assert_eq!(config.risk_policy, RiskPolicy::LastWins);
    }

    #[test]
    fn test_keyword_evidence_stays_weaker_than_hard_evidence() {
        for config in [EngineConfig::default(), EngineConfig::strict()] {
            assert!(config.insurance_threshold < config.loan_threshold);
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.loan_threshold = -0.1;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.loan_amount_tolerance = 1.5;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.insurance_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_risk_policy_combine() {
        assert_eq!(
            RiskPolicy::LastWins.combine(RiskLevel::High, RiskLevel::Medium),
            RiskLevel::Medium
        );
        assert_eq!(
            RiskPolicy::Highest.combine(RiskLevel::High, RiskLevel::Medium),
            RiskLevel::High
        );
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml = r#"
            loan_threshold = 0.75
            risk_policy = "highest"
        "#;

        let config: EngineConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.loan_threshold, 0.75);
        assert_eq!(config.risk_policy, RiskPolicy::Highest);
        assert_eq!(config.insurance_threshold, 0.5);
    }
}
