//! Week-by-week engagement: the joined weekly view, consistency score and streaks.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::AnalyticsConfig;
use crate::records::{ChallengeRecord, CheckInRecord};

/// One week that has a check-in, a challenge, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRecord {
    pub week: u32,
    pub checked_in: bool,
    pub challenge_completed: bool,
    /// 0 when the week had no check-in or no extra payment.
    pub extra_payment: f64,
    pub new_income: f64,
    /// The neutral mood when the week had no check-in.
    pub mood_score: u8,
}

impl WeekRecord {
    fn empty(week: u32, neutral_mood: u8) -> Self {
        Self {
            week,
            checked_in: false,
            challenge_completed: false,
            extra_payment: 0.0,
            new_income: 0.0,
            mood_score: neutral_mood,
        }
    }
}

/// Join check-ins and challenges by week number, in week order.
pub fn calculate_weekly_performance(
    check_ins: &[CheckInRecord],
    challenges: &[ChallengeRecord],
    config: &AnalyticsConfig,
) -> Vec<WeekRecord> {
    let mut weeks: BTreeMap<u32, WeekRecord> = BTreeMap::new();

    for c in check_ins {
        let rec = weeks
            .entry(c.week)
            .or_insert_with(|| WeekRecord::empty(c.week, config.neutral_mood));
        rec.checked_in = true;
        rec.extra_payment = c.extra_payment.unwrap_or(0.0);
        rec.new_income = c.new_income.unwrap_or(0.0);
        rec.mood_score = c.mood_score;
        rec.challenge_completed |= c.challenge_completed.unwrap_or(false);
    }

    for ch in challenges {
        let rec = weeks
            .entry(ch.week)
            .or_insert_with(|| WeekRecord::empty(ch.week, config.neutral_mood));
        rec.challenge_completed |= ch.completed;
    }

    weeks.into_values().collect()
}

/// Percent of weeks 1..=`current_week` with a check-in or a completed challenge.
///
/// Always within 0..=100; 0 before the first week.
pub fn calculate_consistency_score(
    check_ins: &[CheckInRecord],
    challenges: &[ChallengeRecord],
    current_week: u32,
) -> u8 {
    if current_week == 0 {
        return 0;
    }

    let active: BTreeSet<u32> = check_ins
        .iter()
        .map(|c| c.week)
        .chain(challenges.iter().filter(|ch| ch.completed).map(|ch| ch.week))
        .filter(|w| (1..=current_week).contains(w))
        .collect();

    let ratio = active.len() as f64 / current_week as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Consecutive checked-in weeks ending at the latest recorded week.
pub fn current_streak(weekly: &[WeekRecord]) -> u32 {
    let mut streak = 0;
    let mut expected: Option<u32> = None;

    for rec in weekly.iter().rev() {
        if !rec.checked_in {
            break;
        }
        if let Some(week) = expected {
            if rec.week != week {
                break;
            }
        }
        streak += 1;
        match rec.week.checked_sub(1) {
            Some(prev) => expected = Some(prev),
            None => break,
        }
    }

    streak
}
