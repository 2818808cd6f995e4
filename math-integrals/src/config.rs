//! JSON configuration for integrals
//!
//! ```json
//! {
//!   "rule": { "type": "gauss_legendre", "n": 40 },
//!   "diff_method": { "method": "finite_difference", "epsilon": 1e-6 },
//!   "bezier_evaluation": "Horner"
//! }
//! ```
//!
//! Every field is optional; missing fields fall back to the per-geometry
//! defaults.

use crate::differential::DiffMethod;
use crate::dispatch::IntegrationOptions;
use crate::error::Result;
use crate::rules::{GaussKronrod, GaussLegendre, HAdaptiveCubature, IntegrationRule};
use math_geometry::BezierEvaluation;
use math_quadrature::{CubatureOptions, QuadGkOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Integration rule as written in a configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    GaussLegendre {
        n: usize,
    },
    GaussKronrod(QuadGkOptions),
    #[serde(rename = "hadaptive_cubature")]
    HAdaptiveCubature(CubatureOptions),
}

impl RuleConfig {
    /// Build the rule; `GaussLegendre` computes its nodes here
    pub fn to_rule(&self) -> Result<IntegrationRule> {
        Ok(match self {
            RuleConfig::GaussLegendre { n } => GaussLegendre::new(*n)?.into(),
            RuleConfig::GaussKronrod(options) => GaussKronrod::with_options(*options).into(),
            RuleConfig::HAdaptiveCubature(options) => {
                HAdaptiveCubature::with_options(*options).into()
            }
        })
    }
}

/// Serializable counterpart of [`IntegrationOptions`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    pub rule: Option<RuleConfig>,
    pub diff_method: Option<DiffMethod>,
    pub bezier_evaluation: BezierEvaluation,
}

impl IntegrationConfig {
    /// Load configuration from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate and convert into options for [`integral_with`](crate::integral_with)
    pub fn to_options(&self) -> Result<IntegrationOptions> {
        let rule = self.rule.as_ref().map(RuleConfig::to_rule).transpose()?;
        if let Some(method) = &self.diff_method {
            method.validate()?;
        }
        Ok(IntegrationOptions {
            rule,
            diff_method: self.diff_method,
            bezier_evaluation: self.bezier_evaluation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntegralError;
    use crate::rules::RuleKind;

    #[test]
    fn test_empty_config_is_default() {
        let config = IntegrationConfig::from_json("{}").unwrap();
        assert_eq!(config, IntegrationConfig::default());
        assert_eq!(config.to_options().unwrap(), IntegrationOptions::default());
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "rule": { "type": "gauss_legendre", "n": 12 },
            "diff_method": { "method": "analytical" },
            "bezier_evaluation": "Horner"
        }"#;
        let options = IntegrationConfig::from_json(json).unwrap().to_options().unwrap();
        let rule = options.rule.unwrap();
        assert_eq!(rule.to_string(), "GaussLegendre(12)");
        assert_eq!(options.diff_method, Some(DiffMethod::Analytical));
        assert_eq!(options.bezier_evaluation, BezierEvaluation::Horner);
    }

    #[test]
    fn test_adaptive_rule_options() {
        let json = r#"{ "rule": { "type": "gauss_kronrod", "rtol": 1e-10 } }"#;
        let config = IntegrationConfig::from_json(json).unwrap();
        match &config.rule {
            Some(RuleConfig::GaussKronrod(options)) => {
                assert_eq!(options.rtol, 1e-10);
                assert_eq!(options.max_evals, QuadGkOptions::default().max_evals);
            }
            other => panic!("unexpected rule {:?}", other),
        }

        let json = r#"{ "rule": { "type": "hadaptive_cubature" } }"#;
        let options = IntegrationConfig::from_json(json).unwrap().to_options().unwrap();
        assert_eq!(options.rule.unwrap().kind(), RuleKind::HAdaptiveCubature);
    }

    #[test]
    fn test_invalid_config() {
        let zero_points = r#"{ "rule": { "type": "gauss_legendre", "n": 0 } }"#;
        let config = IntegrationConfig::from_json(zero_points).unwrap();
        assert!(matches!(config.to_options(), Err(IntegralError::Quadrature(_))));

        let bad_step = r#"{ "diff_method": { "method": "finite_difference", "epsilon": -1.0 } }"#;
        let config = IntegrationConfig::from_json(bad_step).unwrap();
        assert!(config.to_options().is_err());

        assert!(matches!(
            IntegrationConfig::from_json("{ not json"),
            Err(IntegralError::Json(_))
        ));
        assert!(matches!(
            IntegrationConfig::from_file("/nonexistent/integration.json"),
            Err(IntegralError::Io(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = IntegrationConfig {
            rule: Some(RuleConfig::GaussLegendre { n: 8 }),
            diff_method: Some(DiffMethod::finite_difference()),
            bezier_evaluation: BezierEvaluation::DeCasteljau,
        };
        let back = IntegrationConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
