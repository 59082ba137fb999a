use debtpace_core::{aggregate, compute_all, EngineConfig};
use debtpace_habits::AnalyticsConfig;
use debtpace_ingest::{load_challenges, load_check_ins, load_debts};
use std::path::PathBuf;

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("debtpace-ingest-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_csv_and_json_load_the_same_portfolio() {
    let cfg = EngineConfig::default();
    let csv = write_fixture(
        "debts.csv",
        "id,name,type,balance,rate,payment,term_years\n\
         visa,Visa,credit_card,1000,21.9,50,\n\
         home,House,mortgage,200000,5.6,,30\n",
    );
    let json = write_fixture(
        "debts.JSON",
        r#"[
            {"id": "visa", "name": "Visa", "debtType": "credit_card",
             "balance": 1000, "interestRate": 21.9, "monthlyPayment": 50},
            {"id": "home", "name": "House", "debtType": "mortgage",
             "principal": 200000, "interestRate": 5.6, "termYears": 30}
        ]"#,
    );

    let from_csv = load_debts(&csv, &cfg).unwrap();
    let from_json = load_debts(&json, &cfg).unwrap();
    assert_eq!(from_csv, from_json);

    let totals = aggregate(&compute_all(&from_csv, &cfg));
    assert_eq!(totals.total_debt, 201_000.0);
    assert!(!totals.has_unpayable_debt);
}

#[test]
fn test_missing_file_names_the_path() {
    let err = load_debts("/nonexistent/debts.csv", &EngineConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/debts.csv"));
}

#[test]
fn test_habit_files() {
    let check_ins = write_fixture(
        "check_ins.csv",
        "week,extra_payment,new_income,mood_score,challenge_completed\n\
         1,20,,3,\n\
         2,30,,4,yes\n\
         2,35,,4,yes\n",
    );
    let challenges = write_fixture("challenges.csv", "week,title,completed\n3,Meal prep,yes\n");

    let check_ins = load_check_ins(&check_ins, &AnalyticsConfig::default()).unwrap();
    assert_eq!(check_ins.len(), 2);
    assert_eq!(check_ins[1].extra_payment, Some(35.0));

    let challenges = load_challenges(&challenges).unwrap();
    assert_eq!(challenges.len(), 1);
    assert!(challenges[0].completed);
}
