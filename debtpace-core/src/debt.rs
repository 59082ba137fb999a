//! Debt record types: the two debt shapes and their validation rules.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};

/// Every debt type a record can carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DebtKind {
    CreditCard,
    PersonalLoan,
    CarLoan,
    StudentLoan,
    Mortgage,
}

impl DebtKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtKind::CreditCard => "credit_card",
            DebtKind::PersonalLoan => "personal_loan",
            DebtKind::CarLoan => "car_loan",
            DebtKind::StudentLoan => "student_loan",
            DebtKind::Mortgage => "mortgage",
        }
    }
}

impl fmt::Display for DebtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Debt types modeled by balance, rate and a fixed monthly payment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SimpleKind {
    CreditCard,
    PersonalLoan,
    CarLoan,
    StudentLoan,
}

impl From<SimpleKind> for DebtKind {
    fn from(kind: SimpleKind) -> Self {
        match kind {
            SimpleKind::CreditCard => DebtKind::CreditCard,
            SimpleKind::PersonalLoan => DebtKind::PersonalLoan,
            SimpleKind::CarLoan => DebtKind::CarLoan,
            SimpleKind::StudentLoan => DebtKind::StudentLoan,
        }
    }
}

/// Credit card or installment loan with a caller-supplied monthly payment.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleDebt {
    pub id: String,
    pub name: String,
    pub kind: SimpleKind,
    pub balance: f64,
    /// Annual percentage rate, e.g. 21.9 for 21.9%.
    pub interest_rate: f64,
    pub monthly_payment: f64,
}

/// Fixed-rate, fixed-term mortgage. The monthly payment is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct MortgageDebt {
    pub id: String,
    pub name: String,
    pub principal: f64,
    /// Annual percentage rate.
    pub interest_rate: f64,
    pub term_years: u32,
}

/// A single debt as supplied by the caller.
///
/// The `id` is the stable identity across recomputation; nothing else about a
/// debt is remembered between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DebtRecord", into = "DebtRecord")]
pub enum DebtInput {
    Simple(SimpleDebt),
    Mortgage(MortgageDebt),
}

impl DebtInput {
    pub fn simple(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: SimpleKind,
        balance: f64,
        interest_rate: f64,
        monthly_payment: f64,
    ) -> Self {
        DebtInput::Simple(SimpleDebt {
            id: id.into(),
            name: name.into(),
            kind,
            balance,
            interest_rate,
            monthly_payment,
        })
    }

    pub fn mortgage(
        id: impl Into<String>,
        name: impl Into<String>,
        principal: f64,
        interest_rate: f64,
        term_years: u32,
    ) -> Self {
        DebtInput::Mortgage(MortgageDebt {
            id: id.into(),
            name: name.into(),
            principal,
            interest_rate,
            term_years,
        })
    }

    pub fn id(&self) -> &str {
        match self {
            DebtInput::Simple(d) => &d.id,
            DebtInput::Mortgage(d) => &d.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DebtInput::Simple(d) => &d.name,
            DebtInput::Mortgage(d) => &d.name,
        }
    }

    pub fn kind(&self) -> DebtKind {
        match self {
            DebtInput::Simple(d) => d.kind.into(),
            DebtInput::Mortgage(_) => DebtKind::Mortgage,
        }
    }

    /// Balance owed today: `balance` for simple debts, `principal` for mortgages.
    pub fn outstanding(&self) -> f64 {
        match self {
            DebtInput::Simple(d) => d.balance,
            DebtInput::Mortgage(d) => d.principal,
        }
    }

    /// Annual percentage rate.
    pub fn annual_rate(&self) -> f64 {
        match self {
            DebtInput::Simple(d) => d.interest_rate,
            DebtInput::Mortgage(d) => d.interest_rate,
        }
    }

    /// Monthly compounding rate as a fraction.
    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.annual_rate())
    }

    /// Check the record against the engine's input contract.
    pub fn validate(&self) -> Result<()> {
        let id = self.id();
        let invalid = |reason: String| Error::InvalidDebt {
            id: id.to_string(),
            reason,
        };

        if id.trim().is_empty() {
            return Err(invalid("id must not be empty".into()));
        }

        let mut fields = vec![("interestRate", self.annual_rate())];
        match self {
            DebtInput::Simple(d) => {
                fields.push(("balance", d.balance));
                fields.push(("monthlyPayment", d.monthly_payment));
            }
            DebtInput::Mortgage(d) => {
                fields.push(("principal", d.principal));
                if d.term_years < 1 {
                    return Err(invalid("termYears must be at least 1".into()));
                }
            }
        }

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(invalid(format!("{field} must be a finite number")));
            }
            if value < 0.0 {
                return Err(invalid(format!("{field} must not be negative, got {value}")));
            }
        }

        Ok(())
    }
}

/// Convert an annual percentage rate into a monthly fraction.
pub fn monthly_rate(annual_percent: f64) -> f64 {
    annual_percent / 100.0 / 12.0
}

/// Validate every record and the uniqueness of their ids.
pub fn validate_portfolio(debts: &[DebtInput]) -> Result<()> {
    let mut seen = HashSet::new();
    for debt in debts {
        debt.validate()?;
        if !seen.insert(debt.id()) {
            return Err(Error::DuplicateDebtId(debt.id().to_string()));
        }
    }
    Ok(())
}

/// Flat wire shape, discriminated by `debtType`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebtRecord {
    id: String,
    #[serde(default)]
    name: String,
    debt_type: DebtKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    balance: Option<f64>,
    interest_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    monthly_payment: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    principal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    term_years: Option<u32>,
}

impl TryFrom<DebtRecord> for DebtInput {
    type Error = String;

    fn try_from(r: DebtRecord) -> std::result::Result<Self, Self::Error> {
        let missing = |field: &str| format!("{} debt '{}' is missing {field}", r.debt_type, r.id);

        let kind = match r.debt_type {
            DebtKind::Mortgage => {
                let principal = r.principal.ok_or_else(|| missing("principal"))?;
                let term_years = r.term_years.ok_or_else(|| missing("termYears"))?;
                return Ok(DebtInput::mortgage(
                    r.id,
                    r.name,
                    principal,
                    r.interest_rate,
                    term_years,
                ));
            }
            DebtKind::CreditCard => SimpleKind::CreditCard,
            DebtKind::PersonalLoan => SimpleKind::PersonalLoan,
            DebtKind::CarLoan => SimpleKind::CarLoan,
            DebtKind::StudentLoan => SimpleKind::StudentLoan,
        };

        let balance = r.balance.ok_or_else(|| missing("balance"))?;
        let monthly_payment = r.monthly_payment.ok_or_else(|| missing("monthlyPayment"))?;
        Ok(DebtInput::simple(
            r.id,
            r.name,
            kind,
            balance,
            r.interest_rate,
            monthly_payment,
        ))
    }
}

impl From<DebtInput> for DebtRecord {
    fn from(debt: DebtInput) -> Self {
        match debt {
            DebtInput::Simple(d) => DebtRecord {
                id: d.id,
                name: d.name,
                debt_type: d.kind.into(),
                balance: Some(d.balance),
                interest_rate: d.interest_rate,
                monthly_payment: Some(d.monthly_payment),
                principal: None,
                term_years: None,
            },
            DebtInput::Mortgage(d) => DebtRecord {
                id: d.id,
                name: d.name,
                debt_type: DebtKind::Mortgage,
                balance: None,
                interest_rate: d.interest_rate,
                monthly_payment: None,
                principal: Some(d.principal),
                term_years: Some(d.term_years),
            },
        }
    }
}
