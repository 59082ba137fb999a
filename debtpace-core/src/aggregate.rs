//! Portfolio totals over a list of computed debts.

use serde::{Deserialize, Serialize};

use crate::amortization::DebtComputed;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    /// Balances and mortgage principals owed today.
    pub total_debt: f64,
    pub total_monthly_payment: f64,
    /// Interest over the payable debts only.
    pub total_interest: f64,
    /// At least one debt never clears at its current payment, so
    /// `total_interest` understates the true cost.
    pub has_unpayable_debt: bool,
    pub debt_count: usize,
}

impl PortfolioTotals {
    /// Total interest, or `None` when an unpayable debt makes it meaningless.
    pub fn interest_if_payable(&self) -> Option<f64> {
        (!self.has_unpayable_debt).then_some(self.total_interest)
    }
}

/// Sum in ascending order so the result does not depend on input order.
pub(crate) fn ordered_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

/// Fold computed debts into portfolio totals.
pub fn aggregate(debts: &[DebtComputed]) -> PortfolioTotals {
    let total_debt = ordered_sum(debts.iter().map(|d| d.debt.outstanding()).collect());
    let total_monthly_payment = ordered_sum(debts.iter().map(|d| d.monthly_payment).collect());
    let total_interest = ordered_sum(
        debts
            .iter()
            .filter_map(|d| d.total_interest.finite())
            .collect(),
    );

    PortfolioTotals {
        total_debt,
        total_monthly_payment,
        total_interest,
        has_unpayable_debt: debts.iter().any(|d| d.total_interest.is_never()),
        debt_count: debts.len(),
    }
}
