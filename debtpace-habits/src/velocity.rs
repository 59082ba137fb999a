//! Payment velocity: how much extra the user pays, and which way it is heading.

use debtpace_core::PortfolioTotals;
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::records::CheckInRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityTrend {
    Increasing,
    #[default]
    Stable,
    Decreasing,
}

impl VelocityTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            VelocityTrend::Increasing => "increasing",
            VelocityTrend::Stable => "stable",
            VelocityTrend::Decreasing => "decreasing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVelocity {
    pub average_extra_payment: f64,
    pub velocity_trend: VelocityTrend,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn classify(early: f64, recent: f64, threshold: f64) -> VelocityTrend {
    if early <= 0.0 {
        return if recent > 0.0 {
            VelocityTrend::Increasing
        } else {
            VelocityTrend::Stable
        };
    }

    let change = (recent - early) / early;
    if change > threshold {
        VelocityTrend::Increasing
    } else if change < -threshold {
        VelocityTrend::Decreasing
    } else {
        VelocityTrend::Stable
    }
}

/// Mean extra payment and the trend of the latest third against the earliest
/// third. Check-ins without an extra payment are left out, not counted as 0.
pub fn calculate_payment_velocity(
    check_ins: &[CheckInRecord],
    config: &AnalyticsConfig,
) -> PaymentVelocity {
    let payments: Vec<f64> = check_ins.iter().filter_map(|c| c.extra_payment).collect();
    if payments.is_empty() {
        return PaymentVelocity::default();
    }

    // Fewer than 3 points cannot be split into thirds.
    let velocity_trend = if payments.len() < 3 {
        VelocityTrend::Stable
    } else {
        let third = payments.len() / 3;
        let early = mean(&payments[..third]);
        let recent = mean(&payments[payments.len() - third..]);
        classify(early, recent, config.trend_threshold)
    };

    PaymentVelocity {
        average_extra_payment: mean(&payments),
        velocity_trend,
    }
}

/// Average extra payment as a share of the portfolio's monthly payment.
///
/// Weekly extras are scaled to a month with `weeks_per_month`. Zero when the
/// portfolio has no monthly payment.
pub fn extra_payment_share(
    velocity: &PaymentVelocity,
    totals: &PortfolioTotals,
    weeks_per_month: f64,
) -> f64 {
    if totals.total_monthly_payment <= 0.0 {
        return 0.0;
    }
    velocity.average_extra_payment * weeks_per_month / totals.total_monthly_payment
}
