//! Amortization calculator: monthly payment, months to payoff and total
//! interest for a single debt under a fixed payment plan.
//!
//! Interest is simple monthly compounding on the declining balance. There are
//! no day-count conventions, fees or percentage-of-balance minimums.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::debt::{DebtInput, monthly_rate};
use crate::estimate::Estimate;

/// A balance at or below this is treated as retired.
pub const PAYOFF_TOLERANCE: f64 = 1e-6;

/// One simulated month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    /// 1-based month number.
    pub month: u32,
    /// Amount paid this month; the last month is clamped to what was owed.
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Balance after this month's payment.
    pub balance: f64,
}

/// Month-by-month payoff steps for a balance under a fixed payment.
///
/// Stops once the balance is retired or `max_months` rows have been produced.
/// Callers decide what running out of months means.
#[derive(Debug, Clone)]
pub struct PayoffSteps {
    balance: f64,
    rate: f64,
    payment: f64,
    month: u32,
    max_months: u32,
}

impl PayoffSteps {
    pub fn new(balance: f64, monthly_rate: f64, payment: f64, max_months: u32) -> Self {
        Self {
            balance,
            rate: monthly_rate,
            payment,
            month: 0,
            max_months,
        }
    }

    /// Balance still owed after the rows produced so far.
    pub fn balance(&self) -> f64 {
        self.balance
    }
}

impl Iterator for PayoffSteps {
    type Item = ScheduleRow;

    fn next(&mut self) -> Option<ScheduleRow> {
        if self.balance <= PAYOFF_TOLERANCE || self.month >= self.max_months {
            return None;
        }

        let interest = self.balance * self.rate;
        let due = self.balance + interest;
        let (payment, balance) = if due - self.payment <= PAYOFF_TOLERANCE {
            (due, 0.0)
        } else {
            (self.payment, due - self.payment)
        };

        self.month += 1;
        self.balance = balance;

        Some(ScheduleRow {
            month: self.month,
            payment,
            interest,
            principal: payment - interest,
            balance,
        })
    }
}

/// Result of a payoff simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payoff {
    pub months: Estimate<u32>,
    pub total_interest: Estimate<f64>,
}

impl Payoff {
    const NEVER: Payoff = Payoff {
        months: Estimate::Never,
        total_interest: Estimate::Never,
    };

    const IMMEDIATE: Payoff = Payoff {
        months: Estimate::Finite(0),
        total_interest: Estimate::Finite(0.0),
    };
}

/// Simulate paying `payment` per month against `balance` at `monthly_rate`.
///
/// Returns `Never` when the payment does not exceed the first month's
/// interest, or when the ceiling is reached with money still owed.
pub fn simulate_payoff(balance: f64, monthly_rate: f64, payment: f64, max_months: u32) -> Payoff {
    if balance <= PAYOFF_TOLERANCE {
        return Payoff::IMMEDIATE;
    }
    if payment <= balance * monthly_rate {
        return Payoff::NEVER;
    }

    let mut steps = PayoffSteps::new(balance, monthly_rate, payment, max_months);
    let mut months = 0;
    let mut total_interest = 0.0;
    for row in steps.by_ref() {
        months = row.month;
        total_interest += row.interest;
    }

    if steps.balance() > PAYOFF_TOLERANCE {
        debug!(balance, max_months, "payoff ceiling reached");
        return Payoff::NEVER;
    }

    Payoff {
        months: Estimate::Finite(months),
        total_interest: Estimate::Finite(total_interest),
    }
}

/// Balance left after `months` payments (0 once retired).
pub fn balance_after(balance: f64, monthly_rate: f64, payment: f64, months: u32) -> f64 {
    let mut steps = PayoffSteps::new(balance, monthly_rate, payment, months);
    for _ in steps.by_ref() {}
    steps.balance().max(0.0)
}

/// Fixed monthly payment of a fixed-rate mortgage.
///
/// `P·r / (1 − (1+r)^−n)`, or `P / n` at 0% APR. Zero when there is no
/// principal or no term.
pub fn mortgage_payment(principal: f64, annual_rate: f64, term_years: u32) -> f64 {
    let n = term_years.saturating_mul(12);
    if principal <= 0.0 || n == 0 {
        return 0.0;
    }

    let r = monthly_rate(annual_rate);
    if r == 0.0 {
        return principal / n as f64;
    }

    principal * r / (1.0 - (1.0 + r).powf(-(n as f64)))
}

/// A debt with its payoff computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtComputed {
    pub debt: DebtInput,
    /// Supplied payment for simple debts, derived payment for mortgages.
    pub monthly_payment: f64,
    pub months_to_payoff: Estimate<u32>,
    pub total_interest: Estimate<f64>,
}

impl DebtComputed {
    pub fn id(&self) -> &str {
        self.debt.id()
    }

    pub fn is_payable(&self) -> bool {
        self.months_to_payoff.is_finite()
    }
}

fn payment_for(debt: &DebtInput) -> f64 {
    match debt {
        DebtInput::Simple(d) => d.monthly_payment,
        DebtInput::Mortgage(d) => mortgage_payment(d.principal, d.interest_rate, d.term_years),
    }
}

/// Compute payment, months to payoff and total interest for one debt.
///
/// Total for sanitized input: an unpayable debt comes back with `Never`
/// rather than an error.
pub fn compute(debt: &DebtInput, config: &EngineConfig) -> DebtComputed {
    let monthly_payment = payment_for(debt);

    let payoff = match debt {
        DebtInput::Mortgage(d) if d.principal <= 0.0 || d.term_years == 0 => Payoff::IMMEDIATE,
        _ => simulate_payoff(
            debt.outstanding(),
            debt.monthly_rate(),
            monthly_payment,
            config.max_payoff_months,
        ),
    };

    if payoff.months.is_never() {
        debug!(
            debt_id = debt.id(),
            kind = %debt.kind(),
            monthly_payment,
            "debt is unpayable at this payment"
        );
    }

    DebtComputed {
        debt: debt.clone(),
        monthly_payment,
        months_to_payoff: payoff.months,
        total_interest: payoff.total_interest,
    }
}

pub fn compute_all(debts: &[DebtInput], config: &EngineConfig) -> Vec<DebtComputed> {
    debts.iter().map(|d| compute(d, config)).collect()
}

/// Month-by-month schedule, or `None` when the debt never clears.
pub fn schedule(debt: &DebtInput, config: &EngineConfig) -> Option<Vec<ScheduleRow>> {
    let computed = compute(debt, config);
    let months = computed.months_to_payoff.finite()?;

    let rows = PayoffSteps::new(
        debt.outstanding(),
        debt.monthly_rate(),
        computed.monthly_payment,
        config.max_payoff_months,
    )
    .take(months as usize)
    .collect();
    Some(rows)
}
