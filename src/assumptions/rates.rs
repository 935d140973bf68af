//! Annual to monthly rate conversion

use serde::{Deserialize, Serialize};

/// Method for converting an annual growth rate to a monthly rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateConvention {
    /// Monthly-equivalent compounding: r_monthly = (1 + r_annual)^(1/12) - 1
    #[default]
    Compound,
    /// Simple division: r_monthly = r_annual / 12
    SimpleDivision,
}

impl RateConvention {
    /// Convert an annual rate to the effective monthly rate
    pub fn monthly_rate(&self, annual_rate: f64) -> f64 {
        if annual_rate == 0.0 {
            return 0.0;
        }
        match self {
            RateConvention::Compound => (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0,
            RateConvention::SimpleDivision => annual_rate / 12.0,
        }
    }
}

/// Monthly growth rate for the savings paths (forward and reverse).
/// A disabled growth toggle forces the rate to zero.
pub fn savings_monthly_rate(convention: RateConvention, annual_rate: f64, growth_enabled: bool) -> f64 {
    if !growth_enabled {
        return 0.0;
    }
    convention.monthly_rate(annual_rate)
}

/// Monthly interest rate on a debt: APR / 12, regardless of convention
pub fn debt_monthly_rate(apr: f64) -> f64 {
    RateConvention::SimpleDivision.monthly_rate(apr)
}
