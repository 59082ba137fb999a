//! Engine configuration, passed explicitly into every calculation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Hard ceiling on simulated months (100 years).
///
/// A safety valve against runaway loops, not a precision guarantee: a debt that
/// would clear in month 1201 is reported as never paid off.
pub const MAX_PAYOFF_MONTHS: u32 = 1200;

/// Average weeks in a month, used only for display conversions.
pub const WEEKS_PER_MONTH: f64 = 4.33;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Iteration ceiling for every payoff simulation.
    pub max_payoff_months: u32,
    pub weeks_per_month: f64,
    /// Percent of balance assumed as the monthly payment when a simple debt
    /// arrives without one. Only the ingest layer reads this.
    pub minimum_payment_percent: f64,
    /// Lower bound for the assumed minimum payment.
    pub minimum_payment_floor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_payoff_months: MAX_PAYOFF_MONTHS,
            weeks_per_month: WEEKS_PER_MONTH,
            minimum_payment_percent: 2.0,
            minimum_payment_floor: 25.0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_payoff_months == 0 {
            return Err(Error::InvalidConfig(
                "max_payoff_months must be at least 1".into(),
            ));
        }
        if !(self.weeks_per_month.is_finite() && self.weeks_per_month > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "weeks_per_month must be positive, got {}",
                self.weeks_per_month
            )));
        }
        if !(self.minimum_payment_percent.is_finite() && self.minimum_payment_percent >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "minimum_payment_percent must be non-negative, got {}",
                self.minimum_payment_percent
            )));
        }
        if !(self.minimum_payment_floor.is_finite() && self.minimum_payment_floor >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "minimum_payment_floor must be non-negative, got {}",
                self.minimum_payment_floor
            )));
        }
        Ok(())
    }

    /// Assumed monthly payment for a simple debt that arrived without one.
    pub fn assumed_minimum_payment(&self, balance: f64) -> f64 {
        if balance <= 0.0 {
            return 0.0;
        }
        (balance * self.minimum_payment_percent / 100.0)
            .max(self.minimum_payment_floor)
            .min(balance)
    }
}
