//! Weekly check-in and challenge CSVs.
//!
//! Check-ins: `week,extra_payment,new_income,mood_score,challenge_completed`.
//! Challenges: `week,title,completed`.

use anyhow::{Context, Result};
use debtpace_habits::{AnalyticsConfig, ChallengeRecord, CheckInRecord};
use serde::Deserialize;
use std::path::Path;

use crate::money::parse_optional_money;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CheckInRow {
    week: String,
    extra_payment: String,
    new_income: String,
    mood_score: String,
    challenge_completed: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChallengeRow {
    week: String,
    title: String,
    completed: String,
}

fn parse_week(raw: &str, row: usize) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(week) if week >= 1 => Some(week),
        _ => {
            tracing::warn!(row, week = raw.trim(), "skipping row without a valid week");
            None
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "x" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn parse_mood(raw: &str, row: usize, neutral: u8) -> u8 {
    match raw.trim().parse::<u8>() {
        Ok(mood) if (1..=5).contains(&mood) => mood,
        _ => {
            if !raw.trim().is_empty() {
                tracing::warn!(row, mood = raw.trim(), "mood outside 1..=5, using neutral");
            }
            neutral
        }
    }
}

fn reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
}

/// Sort by week and keep the last record seen for any repeated week.
pub fn normalize_check_ins(mut check_ins: Vec<CheckInRecord>) -> Vec<CheckInRecord> {
    // Stable sort keeps file order within a week, so the last one wins below.
    check_ins.sort_by_key(|c| c.week);

    let mut out: Vec<CheckInRecord> = Vec::with_capacity(check_ins.len());
    for c in check_ins {
        match out.last_mut() {
            Some(prev) if prev.week == c.week => {
                tracing::warn!(week = c.week, "duplicate check-in for week, keeping the later one");
                *prev = c;
            }
            _ => out.push(c),
        }
    }
    out
}

/// Parse a check-ins CSV into a sorted series with at most one record per week.
pub fn parse_check_ins_csv(text: &str, config: &AnalyticsConfig) -> Result<Vec<CheckInRecord>> {
    let mut rdr = reader(text);
    let mut check_ins = Vec::new();

    for (i, result) in rdr.deserialize::<CheckInRow>().enumerate() {
        let row = i + 1;
        let r = result.with_context(|| format!("reading check-in row {row}"))?;
        let Some(week) = parse_week(&r.week, row) else {
            continue;
        };

        check_ins.push(CheckInRecord {
            week,
            extra_payment: parse_optional_money(&r.extra_payment),
            new_income: parse_optional_money(&r.new_income),
            mood_score: parse_mood(&r.mood_score, row, config.neutral_mood),
            challenge_completed: parse_flag(&r.challenge_completed),
        });
    }

    Ok(normalize_check_ins(check_ins))
}

/// Parse a challenges CSV. Anything but a recognised yes counts as not completed.
pub fn parse_challenges_csv(text: &str) -> Result<Vec<ChallengeRecord>> {
    let mut rdr = reader(text);
    let mut challenges = Vec::new();

    for (i, result) in rdr.deserialize::<ChallengeRow>().enumerate() {
        let row = i + 1;
        let r = result.with_context(|| format!("reading challenge row {row}"))?;
        let Some(week) = parse_week(&r.week, row) else {
            continue;
        };
        let completed = parse_flag(&r.completed).unwrap_or(false);
        challenges.push(ChallengeRecord::new(week, r.title, completed));
    }

    challenges.sort_by_key(|c| c.week);
    Ok(challenges)
}

pub fn load_check_ins(path: impl AsRef<Path>, config: &AnalyticsConfig) -> Result<Vec<CheckInRecord>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("opening {}", path.display()))?;
    parse_check_ins_csv(&text, config).with_context(|| format!("loading {}", path.display()))
}

pub fn load_challenges(path: impl AsRef<Path>) -> Result<Vec<ChallengeRecord>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("opening {}", path.display()))?;
    parse_challenges_csv(&text).with_context(|| format!("loading {}", path.display()))
}
