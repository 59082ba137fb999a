//! Plain-text rendering of engine output.

use anyhow::Result;
use debtpace_core::{
    DebtComputed, Estimate, InterestSavings, PortfolioTotals, Projection, ProjectionScenario,
    ScheduleRow, StrategyOutcome,
};
use serde::Serialize;

use crate::commands::HabitsReport;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `$1,234.56`
pub fn money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

fn months(m: Estimate<u32>) -> String {
    match m {
        Estimate::Finite(1) => "1 month".to_string(),
        Estimate::Finite(n) => format!("{n} months"),
        Estimate::Never => "never".to_string(),
    }
}

fn money_or_never(v: Estimate<f64>) -> String {
    v.finite().map(money).unwrap_or_else(|| "never".to_string())
}

pub fn print_debts(debts: &[DebtComputed], totals: &PortfolioTotals) {
    println!(
        "{:<14} {:<14} {:>14} {:>7} {:>12} {:>12} {:>14}",
        "ID", "TYPE", "BALANCE", "APR", "PAYMENT", "PAYOFF", "INTEREST"
    );
    for d in debts {
        println!(
            "{:<14} {:<14} {:>14} {:>6.2}% {:>12} {:>12} {:>14}",
            d.id(),
            d.debt.kind().as_str(),
            money(d.debt.outstanding()),
            d.debt.annual_rate(),
            money(d.monthly_payment),
            months(d.months_to_payoff),
            money_or_never(d.total_interest),
        );
    }

    println!();
    println!("Debts:            {}", totals.debt_count);
    println!("Total owed:       {}", money(totals.total_debt));
    println!("Monthly payments: {}", money(totals.total_monthly_payment));
    match totals.interest_if_payable() {
        Some(interest) => println!("Total interest:   {}", money(interest)),
        None => {
            println!("Total interest:   {} (payable debts only)", money(totals.total_interest));
            println!("\nAt least one debt never pays off at its current payment.");
        }
    }
}

pub fn print_schedule(id: &str, rows: Option<&[ScheduleRow]>) {
    let Some(rows) = rows else {
        println!("{id}: the payment does not cover interest, so this debt never pays off.");
        return;
    };

    println!(
        "{:>5} {:>12} {:>12} {:>12} {:>14}",
        "MONTH", "PAYMENT", "INTEREST", "PRINCIPAL", "BALANCE"
    );
    for r in rows {
        println!(
            "{:>5} {:>12} {:>12} {:>12} {:>14}",
            r.month,
            money(r.payment),
            money(r.interest),
            money(r.principal),
            money(r.balance)
        );
    }
}

fn print_scenario(s: &ProjectionScenario) {
    let date = s
        .date_estimate
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| "never".to_string());
    println!(
        "- {:<22} {:>12}/mo  {:>12}  {}",
        s.label,
        money(s.monthly_payment),
        months(s.months_remaining),
        date
    );
    if s.months_saved > 0 {
        println!(
            "  {:<22} saves {} ({:.1} weeks)",
            "",
            months(Estimate::Finite(s.months_saved)),
            s.weeks_saved
        );
    }
}

fn print_savings(label: &str, savings: &InterestSavings) {
    match (savings.interest_saved, savings.extra_contributed) {
        (Some(saved), Some(extra)) => println!(
            "{label}: about {} less interest for {} paid in extra",
            money(saved),
            money(extra)
        ),
        _ => println!("{label}: not estimable"),
    }
}

pub fn print_projection(
    projection: &Projection,
    habitual: &InterestSavings,
    best_case: &InterestSavings,
) {
    let p = &projection.portfolio;
    println!(
        "Portfolio: {} at a blended {:.2}% APR, paying {}/mo\n",
        money(p.total_debt),
        p.blended_rate,
        money(p.monthly_payment)
    );

    for s in projection.scenarios() {
        print_scenario(s);
    }

    println!();
    print_savings("With extra payments", habitual);
    print_savings("Best case", best_case);
}

pub fn print_strategy(outcome: &StrategyOutcome) {
    println!(
        "{:?}: debt-free in {}, {} total interest\n",
        outcome.strategy,
        months(outcome.months),
        money_or_never(outcome.total_interest)
    );
    for (i, event) in outcome.payoff_order.iter().enumerate() {
        println!("{:>2}. {:<16} month {}", i + 1, event.id, event.month);
    }
}

pub fn print_habits(report: &HabitsReport) {
    println!(
        "Average extra payment: {} ({})",
        money(report.velocity.average_extra_payment),
        report.velocity.velocity_trend.as_str()
    );
    println!("Consistency:           {}%", report.consistency_score);
    println!("Current streak:        {} weeks", report.current_streak);
    if let Some(share) = report.extra_payment_share {
        println!("Extra vs payments:     {:.1}%", share * 100.0);
    }

    if !report.weekly.is_empty() {
        println!("\n{:>4} {:>8} {:>9} {:>12} {:>5}", "WEEK", "CHECKIN", "CHALLENGE", "EXTRA", "MOOD");
        for w in &report.weekly {
            println!(
                "{:>4} {:>8} {:>9} {:>12} {:>5}",
                w.week,
                if w.checked_in { "yes" } else { "-" },
                if w.challenge_completed { "done" } else { "-" },
                money(w.extra_payment),
                w.mood_score
            );
        }
    }

    if !report.insights.is_empty() {
        println!();
        for insight in &report.insights {
            println!("* {insight}");
        }
    }
}
