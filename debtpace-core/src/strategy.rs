//! Per-debt payoff ordering (avalanche / snowball).
//!
//! Unlike `crate::projection`, every debt keeps its own balance and rate. Each
//! month all open debts accrue interest and receive their own payment; whatever
//! is left of the budget (the extra amount plus payments freed by debts already
//! retired) goes to the open debts in priority order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

use crate::amortization::{DebtComputed, PAYOFF_TOLERANCE};
use crate::config::EngineConfig;
use crate::estimate::Estimate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffStrategy {
    /// Highest interest rate first.
    Avalanche,
    /// Lowest balance first.
    Snowball,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffEvent {
    pub id: String,
    /// Month in which the debt was retired (0 = already clear).
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyOutcome {
    pub strategy: PayoffStrategy,
    pub months: Estimate<u32>,
    pub total_interest: Estimate<f64>,
    /// Debts in the order they were retired.
    pub payoff_order: Vec<PayoffEvent>,
}

#[derive(Debug, Clone)]
struct OpenDebt {
    id: String,
    balance: f64,
    annual_rate: f64,
    monthly_rate: f64,
    payment: f64,
}

#[derive(Debug, Clone)]
struct QueueEntry {
    strategy: PayoffStrategy,
    annual_rate: f64,
    balance: f64,
    // Input position; earlier debts win ties.
    seq: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is max-heap: the greatest entry is paid first.
        let primary = match self.strategy {
            PayoffStrategy::Avalanche => self.annual_rate.total_cmp(&other.annual_rate),
            PayoffStrategy::Snowball => other.balance.total_cmp(&self.balance),
        };
        primary.then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Simulate paying every debt its own payment plus `extra`, directing the
/// leftover budget by `strategy`.
pub fn simulate_strategy(
    debts: &[DebtComputed],
    extra: f64,
    strategy: PayoffStrategy,
    config: &EngineConfig,
) -> StrategyOutcome {
    let budget: f64 = debts.iter().map(|d| d.monthly_payment).sum::<f64>() + extra.max(0.0);

    let mut payoff_order = Vec::new();
    let mut open: Vec<OpenDebt> = Vec::new();
    for d in debts {
        if d.debt.outstanding() <= PAYOFF_TOLERANCE {
            payoff_order.push(PayoffEvent {
                id: d.id().to_string(),
                month: 0,
            });
            continue;
        }
        open.push(OpenDebt {
            id: d.id().to_string(),
            balance: d.debt.outstanding(),
            annual_rate: d.debt.annual_rate(),
            monthly_rate: d.debt.monthly_rate(),
            payment: d.monthly_payment,
        });
    }

    let outcome = |months: Estimate<u32>,
                   total_interest: Estimate<f64>,
                   payoff_order: Vec<PayoffEvent>| StrategyOutcome {
        strategy,
        months,
        total_interest,
        payoff_order,
    };

    let first_interest: f64 = open.iter().map(|d| d.balance * d.monthly_rate).sum();
    if !open.is_empty() && budget <= first_interest {
        debug!(budget, first_interest, ?strategy, "budget cannot outpace interest");
        return outcome(Estimate::Never, Estimate::Never, payoff_order);
    }

    let mut total_interest = 0.0;
    let mut month = 0;
    while !open.is_empty() {
        if month >= config.max_payoff_months {
            debug!(month, remaining = open.len(), ?strategy, "strategy ceiling reached");
            return outcome(Estimate::Never, Estimate::Never, payoff_order);
        }
        month += 1;

        let mut remaining = budget;
        for d in open.iter_mut() {
            let interest = d.balance * d.monthly_rate;
            total_interest += interest;
            d.balance += interest;

            let paid = d.payment.min(d.balance).min(remaining);
            d.balance -= paid;
            remaining -= paid;
        }

        let mut queue: BinaryHeap<QueueEntry> = open
            .iter()
            .enumerate()
            .filter(|(_, d)| d.balance > PAYOFF_TOLERANCE)
            .map(|(seq, d)| QueueEntry {
                strategy,
                annual_rate: d.annual_rate,
                balance: d.balance,
                seq,
            })
            .collect();

        while remaining > 0.0 {
            let Some(entry) = queue.pop() else { break };
            let target = &mut open[entry.seq];
            let paid = remaining.min(target.balance);
            target.balance -= paid;
            remaining -= paid;
        }

        open.retain(|d| {
            if d.balance <= PAYOFF_TOLERANCE {
                payoff_order.push(PayoffEvent {
                    id: d.id.clone(),
                    month,
                });
                false
            } else {
                true
            }
        });
    }

    outcome(
        Estimate::Finite(month),
        Estimate::Finite(total_interest),
        payoff_order,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{compute, compute_all};
    use crate::debt::{DebtInput, SimpleKind};

    fn two_debts() -> Vec<DebtComputed> {
        compute_all(
            &[
                DebtInput::simple("small", "Store card", SimpleKind::CreditCard, 500.0, 5.0, 25.0),
                DebtInput::simple("big", "Visa", SimpleKind::CreditCard, 5000.0, 24.0, 150.0),
            ],
            &EngineConfig::default(),
        )
    }

    #[test]
    fn test_avalanche_targets_highest_rate() {
        let out = simulate_strategy(&two_debts(), 200.0, PayoffStrategy::Avalanche, &EngineConfig::default());
        assert!(out.months.is_finite());
        assert_eq!(out.payoff_order[0].id, "big");
        assert_eq!(out.payoff_order.len(), 2);
    }

    #[test]
    fn test_snowball_targets_lowest_balance() {
        let out = simulate_strategy(&two_debts(), 200.0, PayoffStrategy::Snowball, &EngineConfig::default());
        assert_eq!(out.payoff_order[0].id, "small");
        assert!(out.payoff_order[0].month < out.payoff_order[1].month);
    }

    #[test]
    fn test_avalanche_never_costs_more_interest() {
        let cfg = EngineConfig::default();
        let a = simulate_strategy(&two_debts(), 200.0, PayoffStrategy::Avalanche, &cfg);
        let s = simulate_strategy(&two_debts(), 200.0, PayoffStrategy::Snowball, &cfg);
        assert!(a.total_interest.finite().unwrap() <= s.total_interest.finite().unwrap());
    }

    #[test]
    fn test_single_debt_matches_amortization() {
        let cfg = EngineConfig::default();
        let debt = DebtInput::simple("cc", "Card", SimpleKind::CreditCard, 1000.0, 21.9, 50.0);
        let alone = compute(&debt, &cfg);
        let out = simulate_strategy(&[alone.clone()], 0.0, PayoffStrategy::Avalanche, &cfg);

        assert_eq!(out.months, alone.months_to_payoff);
        let diff = out.total_interest.finite().unwrap() - alone.total_interest.finite().unwrap();
        assert!(diff.abs() < 1e-6);
    }

    #[test]
    fn test_unpayable_budget() {
        let cfg = EngineConfig::default();
        let debts = compute_all(
            &[DebtInput::simple("cc", "Card", SimpleKind::CreditCard, 10_000.0, 24.0, 100.0)],
            &cfg,
        );
        let out = simulate_strategy(&debts, 50.0, PayoffStrategy::Snowball, &cfg);
        assert!(out.months.is_never());
        assert!(out.total_interest.is_never());
    }

    #[test]
    fn test_extra_rescues_underwater_debt() {
        let cfg = EngineConfig::default();
        let debts = compute_all(
            &[DebtInput::simple("cc", "Card", SimpleKind::CreditCard, 10_000.0, 24.0, 100.0)],
            &cfg,
        );
        let out = simulate_strategy(&debts, 300.0, PayoffStrategy::Avalanche, &cfg);
        assert!(out.months.is_finite());
    }

    #[test]
    fn test_already_clear_debts_listed_first() {
        let cfg = EngineConfig::default();
        let debts = compute_all(
            &[
                DebtInput::simple("live", "Loan", SimpleKind::PersonalLoan, 100.0, 0.0, 50.0),
                DebtInput::simple("done", "Old card", SimpleKind::CreditCard, 0.0, 20.0, 0.0),
            ],
            &cfg,
        );
        let out = simulate_strategy(&debts, 0.0, PayoffStrategy::Snowball, &cfg);
        assert_eq!(out.payoff_order[0], PayoffEvent { id: "done".into(), month: 0 });
        assert_eq!(out.months, Estimate::Finite(2));
    }

    #[test]
    fn test_empty_portfolio() {
        let out = simulate_strategy(&[], 100.0, PayoffStrategy::Avalanche, &EngineConfig::default());
        assert_eq!(out.months, Estimate::Finite(0));
        assert!(out.payoff_order.is_empty());
    }
}
