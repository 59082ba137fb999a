//! Payoff projection: time to clear the whole portfolio at a blended rate,
//! under three extra-payment scenarios.
//!
//! The portfolio is treated as one synthetic balance at the balance-weighted
//! average rate, paid by the sum of all monthly payments. This answers "when is
//! all of it gone" without modeling which debt gets paid first; see
//! `crate::strategy` for per-debt ordering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::aggregate::{aggregate, ordered_sum};
use crate::amortization::{DebtComputed, balance_after, simulate_payoff};
use crate::config::EngineConfig;
use crate::debt::monthly_rate;
use crate::estimate::Estimate;
use crate::time::add_months;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Current payments, nothing extra.
    CurrentPace,
    /// Current payments plus the user's habitual extra payment.
    WithHabitualExtra,
    /// Current payments plus the full available surplus.
    BestCase,
}

impl ScenarioKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::CurrentPace => "Current pace",
            ScenarioKind::WithHabitualExtra => "With extra payments",
            ScenarioKind::BestCase => "Best case",
        }
    }
}

/// The whole portfolio collapsed into one balance and rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendedPortfolio {
    pub total_debt: f64,
    /// Balance-weighted average annual percentage rate.
    pub blended_rate: f64,
    pub monthly_payment: f64,
}

impl BlendedPortfolio {
    pub fn from_debts(debts: &[DebtComputed]) -> Self {
        let totals = aggregate(debts);
        Self {
            total_debt: totals.total_debt,
            blended_rate: blended_rate(debts),
            monthly_payment: totals.total_monthly_payment,
        }
    }

    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.blended_rate)
    }

    /// The combined payment cannot outpace the combined interest.
    pub fn is_unpayable(&self) -> bool {
        self.total_debt > 0.0 && self.monthly_payment <= self.total_debt * self.monthly_rate()
    }
}

/// Balance-weighted average annual rate; 0 for an empty or zero-balance portfolio.
pub fn blended_rate(debts: &[DebtComputed]) -> f64 {
    let total = ordered_sum(debts.iter().map(|d| d.debt.outstanding()).collect());
    if total <= 0.0 {
        return 0.0;
    }
    let weighted = ordered_sum(
        debts
            .iter()
            .map(|d| d.debt.outstanding() * d.debt.annual_rate())
            .collect(),
    );
    weighted / total
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionScenario {
    pub kind: ScenarioKind,
    pub label: String,
    /// Extra amount on top of the portfolio's monthly payment.
    pub extra_payment: f64,
    pub monthly_payment: f64,
    pub months_remaining: Estimate<u32>,
    /// Display-only conversion of `months_remaining`.
    pub weeks_remaining: Estimate<f64>,
    /// Month the last payment lands in; `None` when it never does.
    pub date_estimate: Option<NaiveDate>,
    /// Months saved against the current pace, never negative.
    pub months_saved: u32,
    pub weeks_saved: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub portfolio: BlendedPortfolio,
    pub current_pace: ProjectionScenario,
    pub with_habitual_extra: ProjectionScenario,
    pub best_case: ProjectionScenario,
}

impl Projection {
    pub fn scenarios(&self) -> [&ProjectionScenario; 3] {
        [&self.current_pace, &self.with_habitual_extra, &self.best_case]
    }

    /// Interest saved by `improved` against the current pace.
    pub fn interest_savings(&self, improved: &ProjectionScenario) -> InterestSavings {
        calculate_interest_savings(
            &self.portfolio,
            &self.current_pace,
            improved,
            improved.extra_payment,
        )
    }
}

fn months_saved(baseline: Estimate<u32>, scenario: Estimate<u32>) -> u32 {
    match (baseline, scenario) {
        (Estimate::Finite(b), Estimate::Finite(s)) => b.saturating_sub(s),
        _ => 0,
    }
}

fn scenario(
    kind: ScenarioKind,
    portfolio: &BlendedPortfolio,
    extra: f64,
    baseline_months: Option<Estimate<u32>>,
    today: NaiveDate,
    config: &EngineConfig,
) -> ProjectionScenario {
    let monthly_payment = portfolio.monthly_payment + extra;
    let months_remaining = if portfolio.is_unpayable() {
        Estimate::Never
    } else {
        simulate_payoff(
            portfolio.total_debt,
            portfolio.monthly_rate(),
            monthly_payment,
            config.max_payoff_months,
        )
        .months
    };

    let saved = baseline_months.map_or(0, |b| months_saved(b, months_remaining));

    trace!(
        scenario = kind.label(),
        extra,
        months = %months_remaining,
        saved,
        "projected scenario"
    );

    ProjectionScenario {
        kind,
        label: kind.label().to_string(),
        extra_payment: extra,
        monthly_payment,
        months_remaining,
        weeks_remaining: months_remaining.map(|m| m as f64 * config.weeks_per_month),
        date_estimate: months_remaining
            .finite()
            .and_then(|m| add_months(today, m)),
        months_saved: saved,
        weeks_saved: saved as f64 * config.weeks_per_month,
    }
}

/// Project the portfolio under no extra, the habitual extra, and the full
/// available surplus (never less than the habitual extra).
pub fn project(
    debts: &[DebtComputed],
    habitual_extra: f64,
    available_surplus: f64,
    today: NaiveDate,
    config: &EngineConfig,
) -> Projection {
    let portfolio = BlendedPortfolio::from_debts(debts);
    let habitual = habitual_extra.max(0.0);
    let surplus = available_surplus.max(habitual);

    let current_pace = scenario(
        ScenarioKind::CurrentPace,
        &portfolio,
        0.0,
        None,
        today,
        config,
    );
    let baseline = Some(current_pace.months_remaining);
    let with_habitual_extra = scenario(
        ScenarioKind::WithHabitualExtra,
        &portfolio,
        habitual,
        baseline,
        today,
        config,
    );
    let best_case = scenario(
        ScenarioKind::BestCase,
        &portfolio,
        surplus,
        baseline,
        today,
        config,
    );

    Projection {
        portfolio,
        current_pace,
        with_habitual_extra,
        best_case,
    }
}

/// Estimated interest saved between two projected timelines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestSavings {
    pub months_saved: u32,
    /// `None` when either timeline never finishes.
    pub interest_saved: Option<f64>,
    /// Extra money paid over the improved timeline.
    pub extra_contributed: Option<f64>,
}

/// Approximate interest saved by finishing in `improved` instead of `baseline`.
///
/// Average-balance method: `rate × mean(balance today, balance at the
/// baseline midpoint) × months saved / 12`. This is an estimate, not a pair of
/// full amortization schedules.
pub fn calculate_interest_savings(
    portfolio: &BlendedPortfolio,
    baseline: &ProjectionScenario,
    improved: &ProjectionScenario,
    extra: f64,
) -> InterestSavings {
    let (m0, m1) = match (baseline.months_remaining, improved.months_remaining) {
        (Estimate::Finite(m0), Estimate::Finite(m1)) => (m0, m1),
        _ => {
            return InterestSavings {
                months_saved: 0,
                interest_saved: None,
                extra_contributed: None,
            };
        }
    };

    let saved = m0.saturating_sub(m1);
    let midpoint = balance_after(
        portfolio.total_debt,
        portfolio.monthly_rate(),
        baseline.monthly_payment,
        m0 / 2,
    );
    let average_balance = (portfolio.total_debt + midpoint) / 2.0;
    let interest_saved = portfolio.blended_rate / 100.0 * average_balance * saved as f64 / 12.0;

    InterestSavings {
        months_saved: saved,
        interest_saved: Some(interest_saved),
        extra_contributed: Some(extra.max(0.0) * m1 as f64),
    }
}
