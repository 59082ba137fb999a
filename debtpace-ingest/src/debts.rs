//! Debt lists from CSV or JSON.
//!
//! CSV header: `id,name,type,balance,rate,payment,term_years`. Mortgages put
//! the principal in `balance`, leave `payment` blank and fill `term_years`.

use anyhow::{Context, Result};
use debtpace_core::{validate_portfolio, DebtInput, EngineConfig, SimpleKind};
use serde::Deserialize;
use std::path::Path;

use crate::money::{parse_money, parse_optional_money};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DebtRow {
    id: String,
    name: String,
    #[serde(rename = "type")]
    debt_type: String,
    balance: String,
    rate: String,
    payment: String,
    term_years: String,
}

enum RowKind {
    Simple(SimpleKind),
    Mortgage,
}

fn row_kind(raw: &str, row: usize) -> RowKind {
    let normalized = raw.trim().to_lowercase().replace([' ', '-'], "_");
    match normalized.as_str() {
        "credit_card" | "card" | "cc" => RowKind::Simple(SimpleKind::CreditCard),
        "personal_loan" | "personal" => RowKind::Simple(SimpleKind::PersonalLoan),
        "car_loan" | "auto_loan" | "car" | "auto" => RowKind::Simple(SimpleKind::CarLoan),
        "student_loan" | "student" => RowKind::Simple(SimpleKind::StudentLoan),
        "mortgage" | "home_loan" => RowKind::Mortgage,
        other => {
            if !other.is_empty() {
                tracing::warn!(row, debt_type = other, "unknown debt type, treating as credit_card");
            }
            RowKind::Simple(SimpleKind::CreditCard)
        }
    }
}

fn parse_rate(raw: &str) -> f64 {
    parse_money(raw.trim().trim_end_matches('%'))
}

fn parse_term(raw: &str, row: usize) -> u32 {
    let term = raw.trim().parse::<u32>().unwrap_or(0);
    if term < 1 {
        tracing::warn!(row, term_years = raw.trim(), "mortgage term below 1 year, using 1");
        return 1;
    }
    term
}

fn row_to_debt(r: DebtRow, row: usize, config: &EngineConfig) -> DebtInput {
    let id = match r.id.trim() {
        "" => format!("debt-{row}"),
        id => id.to_string(),
    };
    let name = match r.name.trim() {
        "" => id.clone(),
        name => name.to_string(),
    };
    let balance = parse_money(&r.balance);
    let rate = parse_rate(&r.rate);

    match row_kind(&r.debt_type, row) {
        RowKind::Mortgage => {
            DebtInput::mortgage(id, name, balance, rate, parse_term(&r.term_years, row))
        }
        RowKind::Simple(kind) => {
            let payment = parse_optional_money(&r.payment).unwrap_or_else(|| {
                let assumed = config.assumed_minimum_payment(balance);
                tracing::debug!(row, assumed, "no payment given, assuming minimum");
                assumed
            });
            DebtInput::simple(id, name, kind, balance, rate, payment)
        }
    }
}

/// Parse a debts CSV. Rows are numbered from 1 for generated ids and logs.
pub fn parse_debts_csv(text: &str, config: &EngineConfig) -> Result<Vec<DebtInput>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut debts = Vec::new();
    for (i, result) in rdr.deserialize::<DebtRow>().enumerate() {
        let row = i + 1;
        let record = result.with_context(|| format!("reading debt row {row}"))?;
        debts.push(row_to_debt(record, row, config));
    }

    validate_portfolio(&debts).context("validating debts")?;
    tracing::debug!(count = debts.len(), "parsed debts csv");
    Ok(debts)
}

/// Parse the camelCase JSON wire form: an array of debt records.
pub fn load_debts_json(text: &str) -> Result<Vec<DebtInput>> {
    let debts: Vec<DebtInput> = serde_json::from_str(text).context("parsing debts json")?;
    validate_portfolio(&debts).context("validating debts")?;
    Ok(debts)
}

/// Load debts from a `.json` or `.csv` file, picked by extension.
pub fn load_debts(path: impl AsRef<Path>, config: &EngineConfig) -> Result<Vec<DebtInput>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        load_debts_json(&text).with_context(|| format!("loading {}", path.display()))
    } else {
        parse_debts_csv(&text, config).with_context(|| format!("loading {}", path.display()))
    }
}
