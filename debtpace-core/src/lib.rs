//! debtpace-core: debt records, amortization, portfolio totals and payoff projections
//!
//! Everything here is a pure function of its inputs. Nothing reads a clock,
//! a file or global state; today's date and the engine config are parameters.

pub mod aggregate;
pub mod amortization;
pub mod config;
pub mod debt;
pub mod error;
pub mod estimate;
pub mod projection;
pub mod strategy;
pub mod time;

pub use aggregate::{aggregate, PortfolioTotals};
pub use amortization::{
    balance_after, compute, compute_all, mortgage_payment, schedule, simulate_payoff,
    DebtComputed, Payoff, PayoffSteps, ScheduleRow, PAYOFF_TOLERANCE,
};
pub use config::{EngineConfig, MAX_PAYOFF_MONTHS, WEEKS_PER_MONTH};
pub use debt::{
    monthly_rate, validate_portfolio, DebtInput, DebtKind, MortgageDebt, SimpleDebt, SimpleKind,
};
pub use error::{Error, Result};
pub use estimate::Estimate;
pub use projection::{
    blended_rate, calculate_interest_savings, project, BlendedPortfolio, InterestSavings,
    Projection, ProjectionScenario, ScenarioKind,
};
pub use strategy::{simulate_strategy, PayoffEvent, PayoffStrategy, StrategyOutcome};
pub use time::{add_months, today_in};
