use debtpace_core::{aggregate, compute_all, DebtInput, EngineConfig, SimpleKind};
use debtpace_habits::{
    calculate_consistency_score, calculate_payment_velocity, calculate_weekly_performance,
    extra_payment_share, generate_insights, AnalyticsConfig, ChallengeRecord, CheckInRecord,
    VelocityTrend,
};
use proptest::prelude::*;

#[test]
fn test_empty_history_is_neutral() {
    let cfg = AnalyticsConfig::default();
    let velocity = calculate_payment_velocity(&[], &cfg);
    assert_eq!(velocity.average_extra_payment, 0.0);
    assert_eq!(velocity.velocity_trend, VelocityTrend::Stable);

    let weekly = calculate_weekly_performance(&[], &[], &cfg);
    assert!(weekly.is_empty());

    let score = calculate_consistency_score(&[], &[], 4);
    assert_eq!(score, 0);
    assert!(generate_insights(&velocity, &weekly, score, &cfg).is_empty());

    let value = serde_json::to_value(velocity).unwrap();
    assert_eq!(value["averageExtraPayment"], 0.0);
    assert_eq!(value["velocityTrend"], "stable");
}

#[test]
fn test_steady_saver_over_eight_weeks() {
    let cfg = AnalyticsConfig::default();
    let check_ins: Vec<CheckInRecord> = (1..=8)
        .map(|w| CheckInRecord::new(w, 4).with_extra_payment(20.0 + 10.0 * w as f64))
        .collect();
    let challenges = vec![
        ChallengeRecord::new(2, "Brew coffee at home", true),
        ChallengeRecord::new(9, "Sell something unused", false),
    ];

    let velocity = calculate_payment_velocity(&check_ins, &cfg);
    assert_eq!(velocity.average_extra_payment, 65.0);
    assert_eq!(velocity.velocity_trend, VelocityTrend::Increasing);

    let weekly = calculate_weekly_performance(&check_ins, &challenges, &cfg);
    assert_eq!(weekly.len(), 9);
    assert!(weekly[1].challenge_completed);
    assert!(!weekly[8].checked_in);

    let score = calculate_consistency_score(&check_ins, &challenges, 10);
    assert_eq!(score, 80);

    // Week 9 has only an open challenge, so there is no running streak.
    let insights = generate_insights(&velocity, &weekly, score, &cfg);
    assert_eq!(insights.len(), 2);
    assert!(insights[0].contains("picking up"));
    assert!(insights[1].contains("80% consistency"));
}

#[test]
fn test_extra_share_against_portfolio() {
    let engine = EngineConfig::default();
    let debts = vec![
        DebtInput::simple("a", "Card", SimpleKind::CreditCard, 2000.0, 19.9, 100.0),
        DebtInput::simple("b", "Loan", SimpleKind::PersonalLoan, 5000.0, 8.0, 333.0),
    ];
    let totals = aggregate(&compute_all(&debts, &engine));

    let check_ins = vec![
        CheckInRecord::new(1, 3).with_extra_payment(10.0),
        CheckInRecord::new(2, 3).with_extra_payment(10.0),
    ];
    let velocity = calculate_payment_velocity(&check_ins, &AnalyticsConfig::default());
    let share = extra_payment_share(&velocity, &totals, engine.weeks_per_month);
    assert!((share - 0.1).abs() < 1e-9, "share was {share}");
}

fn history() -> impl Strategy<Value = (Vec<CheckInRecord>, Vec<ChallengeRecord>, u32)> {
    (
        prop::collection::vec((0u32..120, 1u8..=5), 0..60),
        prop::collection::vec((0u32..120, any::<bool>()), 0..60),
        0u32..100,
    )
        .prop_map(|(c, ch, week)| {
            let check_ins = c.into_iter().map(|(w, m)| CheckInRecord::new(w, m)).collect();
            let challenges = ch
                .into_iter()
                .map(|(w, done)| ChallengeRecord::new(w, "", done))
                .collect();
            (check_ins, challenges, week)
        })
}

proptest! {
    #[test]
    fn consistency_is_a_percent((check_ins, challenges, week) in history()) {
        let score = calculate_consistency_score(&check_ins, &challenges, week);
        prop_assert!(score <= 100);
        if week == 0 || (check_ins.is_empty() && challenges.is_empty()) {
            prop_assert_eq!(score, 0);
        }
    }

    #[test]
    fn weekly_performance_is_sorted_and_unique((check_ins, challenges, _week) in history()) {
        let weekly = calculate_weekly_performance(&check_ins, &challenges, &AnalyticsConfig::default());
        prop_assert!(weekly.windows(2).all(|w| w[0].week < w[1].week));
    }

    #[test]
    fn velocity_average_is_within_range(payments in prop::collection::vec(0.0f64..5000.0, 1..40)) {
        let check_ins: Vec<_> = payments
            .iter()
            .enumerate()
            .map(|(i, p)| CheckInRecord::new(i as u32 + 1, 3).with_extra_payment(*p))
            .collect();
        let v = calculate_payment_velocity(&check_ins, &AnalyticsConfig::default());
        let lo = payments.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = payments.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(v.average_extra_payment >= lo - 1e-9);
        prop_assert!(v.average_extra_payment <= hi + 1e-9);
    }
}
