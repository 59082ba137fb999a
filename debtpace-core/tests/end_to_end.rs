use chrono::NaiveDate;
use debtpace_core::{
    aggregate, compute, compute_all, project, schedule, simulate_strategy, DebtInput, EngineConfig,
    Estimate, PayoffStrategy,
};

fn load(json: &str) -> Vec<DebtInput> {
    serde_json::from_str(json).unwrap()
}

const PORTFOLIO: &str = r#"[
    {"id": "visa", "name": "Visa", "debtType": "credit_card",
     "balance": 1000, "interestRate": 21.9, "monthlyPayment": 50},
    {"id": "civic", "name": "Civic", "debtType": "car_loan",
     "balance": 8000, "interestRate": 6.5, "monthlyPayment": 250},
    {"id": "degree", "name": "Degree", "debtType": "student_loan",
     "balance": 12000, "interestRate": 4.5, "monthlyPayment": 150},
    {"id": "home", "name": "House", "debtType": "mortgage",
     "principal": 200000, "interestRate": 5.6, "termYears": 30}
]"#;

/// A card paying well above interest clears in a bit over two years.
#[test]
fn test_credit_card_example() {
    let debt = &load(PORTFOLIO)[0];
    let out = compute(debt, &EngineConfig::default());

    assert_eq!(out.months_to_payoff, Estimate::Finite(26));
    let interest = out.total_interest.finite().unwrap();
    assert!((interest - 255.56).abs() < 0.01, "interest was {interest}");
}

/// Paying exactly the monthly interest never clears the card.
#[test]
fn test_interest_only_card_example() {
    let json = r#"{"id": "visa", "name": "Visa", "debtType": "credit_card",
                   "balance": 1000, "interestRate": 21.9, "monthlyPayment": 18.25}"#;
    let debt: DebtInput = serde_json::from_str(json).unwrap();
    let out = compute(&debt, &EngineConfig::default());

    assert!(out.months_to_payoff.is_never());
    assert!(out.total_interest.is_never());

    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["monthsToPayoff"], "never");
    assert_eq!(value["totalInterest"], "never");
}

#[test]
fn test_mortgage_example() {
    let debt = &load(PORTFOLIO)[3];
    let out = compute(debt, &EngineConfig::default());

    assert!((out.monthly_payment - 1148.16).abs() < 0.01);
    assert_eq!(out.months_to_payoff, Estimate::Finite(360));
    let interest = out.total_interest.finite().unwrap();
    assert!((interest - 213_336.87).abs() < 1.0, "interest was {interest}");
}

#[test]
fn test_full_portfolio_flow() {
    let cfg = EngineConfig::default();
    let computed = compute_all(&load(PORTFOLIO), &cfg);
    let totals = aggregate(&computed);

    assert_eq!(totals.total_debt, 221_000.0);
    assert!(!totals.has_unpayable_debt);
    assert_eq!(totals.debt_count, 4);

    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let projection = project(&computed, 200.0, 800.0, today, &cfg);
    let current = projection.current_pace.months_remaining.finite().unwrap();
    let best = projection.best_case.months_remaining.finite().unwrap();
    assert!(best < current);
    assert!(projection.best_case.date_estimate < projection.current_pace.date_estimate);

    let savings = projection.interest_savings(&projection.best_case);
    assert_eq!(savings.months_saved, current - best);
    assert!(savings.interest_saved.unwrap() > 0.0);

    let avalanche = simulate_strategy(&computed, 200.0, PayoffStrategy::Avalanche, &cfg);
    assert_eq!(avalanche.payoff_order.len(), 4);
    assert_eq!(avalanche.payoff_order[0].id, "visa");
}

#[test]
fn test_schedule_serializes_rows() {
    let debt = &load(PORTFOLIO)[0];
    let rows = schedule(debt, &EngineConfig::default()).unwrap();
    let value = serde_json::to_value(&rows[0]).unwrap();

    assert_eq!(value["month"], 1);
    assert_eq!(value["payment"], 50.0);
    assert!((value["balance"].as_f64().unwrap() - 968.25).abs() < 1e-9);
}
