//! Projection assumptions: rate convention and iteration limits

mod rates;

pub use rates::{RateConvention, savings_monthly_rate, debt_monthly_rate};

use crate::error::{ProjectionError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Iteration cap for savings projections (100 years of months)
pub const SAVINGS_PERIOD_CAP: u32 = 1200;

/// Iteration cap for debt payoff (50 years of months)
pub const DEBT_PERIOD_CAP: u32 = 600;

/// Remaining debt balance treated as paid off
pub const PAYOFF_TOLERANCE: f64 = 0.5;

/// Container for all projection assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    /// Annual-to-monthly conversion for forward and reverse savings paths
    pub rate_convention: RateConvention,

    /// Maximum months a savings projection may run
    pub savings_period_cap: u32,

    /// Maximum months a debt payoff may run
    pub debt_period_cap: u32,

    /// Debt balance at or below this is considered paid off
    pub payoff_tolerance: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            rate_convention: RateConvention::Compound,
            savings_period_cap: SAVINGS_PERIOD_CAP,
            debt_period_cap: DEBT_PERIOD_CAP,
            payoff_tolerance: PAYOFF_TOLERANCE,
        }
    }
}

impl Assumptions {
    /// Load assumptions from a JSON file. Missing keys keep their defaults.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let assumptions: Assumptions = serde_json::from_reader(BufReader::new(file))?;
        assumptions.validate()?;
        log::debug!("Loaded assumptions from {}: {:?}", path.display(), assumptions);
        Ok(assumptions)
    }

    /// Caps must stay within the hard limits and the tolerance must be a
    /// finite non-negative amount.
    pub fn validate(&self) -> Result<()> {
        within_cap("savings_period_cap", self.savings_period_cap, SAVINGS_PERIOD_CAP)?;
        within_cap("debt_period_cap", self.debt_period_cap, DEBT_PERIOD_CAP)?;
        if !self.payoff_tolerance.is_finite() || self.payoff_tolerance < 0.0 {
            return Err(ProjectionError::invalid(
                "payoff_tolerance",
                format!("must be a finite non-negative amount (got {})", self.payoff_tolerance),
            ));
        }
        Ok(())
    }

    /// Monthly growth rate for savings projections
    pub fn savings_rate(&self, annual_rate: f64, growth_enabled: bool) -> f64 {
        savings_monthly_rate(self.rate_convention, annual_rate, growth_enabled)
    }
}

fn within_cap(field: &'static str, value: u32, limit: u32) -> Result<()> {
    if value == 0 || value > limit {
        return Err(ProjectionError::invalid(
            field,
            format!("must be between 1 and {} (got {})", limit, value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let assumptions = Assumptions::default();
        assert_eq!(assumptions.rate_convention, RateConvention::Compound);
        assert_eq!(assumptions.savings_period_cap, 1200);
        assert_eq!(assumptions.debt_period_cap, 600);
        assert_eq!(assumptions.payoff_tolerance, 0.5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let assumptions: Assumptions =
            serde_json::from_str(r#"{"rate_convention": "SimpleDivision"}"#).unwrap();
        assert_eq!(assumptions.rate_convention, RateConvention::SimpleDivision);
        assert_eq!(assumptions.savings_period_cap, SAVINGS_PERIOD_CAP);
        assert_eq!(assumptions.debt_period_cap, DEBT_PERIOD_CAP);
    }

    #[test]
    fn test_validate_rejects_out_of_range_caps() {
        assert!(Assumptions::default().validate().is_ok());

        let cases = [
            (0, DEBT_PERIOD_CAP, "savings_period_cap"),
            (SAVINGS_PERIOD_CAP + 1, DEBT_PERIOD_CAP, "savings_period_cap"),
            (4_000_000_000, DEBT_PERIOD_CAP, "savings_period_cap"),
            (SAVINGS_PERIOD_CAP, 0, "debt_period_cap"),
            (SAVINGS_PERIOD_CAP, DEBT_PERIOD_CAP + 1, "debt_period_cap"),
        ];
        for (savings_cap, debt_cap, expected) in cases {
            let assumptions = Assumptions {
                savings_period_cap: savings_cap,
                debt_period_cap: debt_cap,
                ..Default::default()
            };
            match assumptions.validate() {
                Err(ProjectionError::InvalidInput { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected {} rejection, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_validate_rejects_bad_tolerance() {
        for tolerance in [-1.0, f64::NAN, f64::INFINITY] {
            let assumptions = Assumptions {
                payoff_tolerance: tolerance,
                ..Default::default()
            };
            assert!(assumptions.validate().unwrap_err().is_invalid_input());
        }

        let exact = Assumptions {
            payoff_tolerance: 0.0,
            savings_period_cap: 1,
            debt_period_cap: 1,
            ..Default::default()
        };
        assert!(exact.validate().is_ok());
    }

    #[test]
    fn test_json_with_huge_cap_is_rejected() {
        let path = std::env::temp_dir().join(format!("goaltrackr_assumptions_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"savings_period_cap": 4000000000}"#).unwrap();
        let err = Assumptions::from_json_path(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Assumptions::from_json_path(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, crate::ProjectionError::Io(_)));
    }
}
