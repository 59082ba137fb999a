use anyhow::{bail, Context, Result};
use debtpace_core::{
    aggregate, compute_all, project, schedule, simulate_strategy, today_in, DebtComputed,
    InterestSavings, PayoffStrategy, PortfolioTotals, Projection, ScheduleRow,
};
use debtpace_habits::{
    calculate_consistency_score, calculate_payment_velocity, calculate_weekly_performance,
    current_streak, extra_payment_share, generate_insights, PaymentVelocity, WeekRecord,
};
use debtpace_ingest::{load_challenges, load_check_ins, load_debts};
use serde::Serialize;
use std::path::Path;

use crate::config::Config;
use crate::report;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DebtsReport<'a> {
    debts: &'a [DebtComputed],
    totals: PortfolioTotals,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleReport<'a> {
    id: &'a str,
    rows: Option<Vec<ScheduleRow>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectReport<'a> {
    projection: &'a Projection,
    habitual_savings: InterestSavings,
    best_case_savings: InterestSavings,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitsReport {
    pub current_week: u32,
    pub velocity: PaymentVelocity,
    pub consistency_score: u8,
    pub current_streak: u32,
    /// Only present when a debts file was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_payment_share: Option<f64>,
    pub weekly: Vec<WeekRecord>,
    pub insights: Vec<String>,
}

fn load_computed(file: &Path, cfg: &Config) -> Result<Vec<DebtComputed>> {
    let debts = load_debts(file, &cfg.engine)?;
    Ok(compute_all(&debts, &cfg.engine))
}

pub fn cmd_debts(file: &Path, cfg: &Config, json: bool) -> Result<()> {
    let computed = load_computed(file, cfg)?;
    let totals = aggregate(&computed);

    if json {
        return report::print_json(&DebtsReport {
            debts: &computed,
            totals,
        });
    }
    report::print_debts(&computed, &totals);
    Ok(())
}

pub fn cmd_schedule(file: &Path, id: &str, cfg: &Config, json: bool) -> Result<()> {
    let debts = load_debts(file, &cfg.engine)?;
    let Some(debt) = debts.iter().find(|d| d.id() == id) else {
        bail!("No debt with id '{}' in {}", id, file.display());
    };

    let rows = schedule(debt, &cfg.engine);
    if json {
        return report::print_json(&ScheduleReport { id, rows });
    }
    report::print_schedule(id, rows.as_deref());
    Ok(())
}

pub fn cmd_project(file: &Path, extra: f64, surplus: f64, cfg: &Config, json: bool) -> Result<()> {
    let computed = load_computed(file, cfg)?;
    let today = today_in(&cfg.display.timezone)?;

    let projection = project(&computed, extra, surplus, today, &cfg.engine);
    let habitual_savings = projection.interest_savings(&projection.with_habitual_extra);
    let best_case_savings = projection.interest_savings(&projection.best_case);

    if json {
        return report::print_json(&ProjectReport {
            projection: &projection,
            habitual_savings,
            best_case_savings,
        });
    }
    report::print_projection(&projection, &habitual_savings, &best_case_savings);
    Ok(())
}

pub fn cmd_strategy(
    file: &Path,
    extra: f64,
    strategy: PayoffStrategy,
    cfg: &Config,
    json: bool,
) -> Result<()> {
    let computed = load_computed(file, cfg)?;
    let outcome = simulate_strategy(&computed, extra, strategy, &cfg.engine);

    if json {
        return report::print_json(&outcome);
    }
    report::print_strategy(&outcome);
    Ok(())
}

pub struct HabitsArgs<'a> {
    pub check_ins: &'a Path,
    pub challenges: Option<&'a Path>,
    pub week: Option<u32>,
    pub debts: Option<&'a Path>,
}

pub fn cmd_habits(args: HabitsArgs<'_>, cfg: &Config, json: bool) -> Result<()> {
    let check_ins = load_check_ins(args.check_ins, &cfg.analytics)?;
    let challenges = match args.challenges {
        Some(p) => load_challenges(p)?,
        None => Vec::new(),
    };

    let latest = check_ins
        .iter()
        .map(|c| c.week)
        .chain(challenges.iter().map(|c| c.week))
        .max()
        .unwrap_or(0);
    let current_week = args.week.unwrap_or(latest);

    let velocity = calculate_payment_velocity(&check_ins, &cfg.analytics);
    let weekly = calculate_weekly_performance(&check_ins, &challenges, &cfg.analytics);
    let consistency_score = calculate_consistency_score(&check_ins, &challenges, current_week);
    let insights = generate_insights(&velocity, &weekly, consistency_score, &cfg.analytics);

    let extra_payment_share = match args.debts {
        Some(p) => {
            let totals = aggregate(&load_computed(p, cfg).context("loading debts for context")?);
            Some(extra_payment_share(
                &velocity,
                &totals,
                cfg.engine.weeks_per_month,
            ))
        }
        None => None,
    };

    let report = HabitsReport {
        current_week,
        velocity,
        consistency_score,
        current_streak: current_streak(&weekly),
        extra_payment_share,
        weekly,
        insights,
    };

    if json {
        return report::print_json(&report);
    }
    report::print_habits(&report);
    Ok(())
}

pub fn cmd_config_show(cfg: &Config, json: bool) -> Result<()> {
    if json {
        return report::print_json(cfg);
    }
    print!("{}", toml::to_string_pretty(cfg).context("serialize config")?);
    Ok(())
}
