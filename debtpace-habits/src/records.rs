//! Check-in and challenge records as supplied by the surrounding app.
//!
//! The series is read-only here: at most one check-in per week, ordered by
//! week. The ingest layer enforces that before anything reaches this crate.

use serde::{Deserialize, Serialize};

/// One weekly check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    /// 1-based week number.
    pub week: u32,
    #[serde(default)]
    pub extra_payment: Option<f64>,
    #[serde(default)]
    pub new_income: Option<f64>,
    /// 1 (rough) to 5 (great).
    pub mood_score: u8,
    #[serde(default)]
    pub challenge_completed: Option<bool>,
}

impl CheckInRecord {
    pub fn new(week: u32, mood_score: u8) -> Self {
        Self {
            week,
            extra_payment: None,
            new_income: None,
            mood_score,
            challenge_completed: None,
        }
    }

    pub fn with_extra_payment(mut self, amount: f64) -> Self {
        self.extra_payment = Some(amount);
        self
    }

    pub fn with_new_income(mut self, amount: f64) -> Self {
        self.new_income = Some(amount);
        self
    }

    pub fn with_challenge(mut self, completed: bool) -> Self {
        self.challenge_completed = Some(completed);
        self
    }
}

/// A weekly challenge offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRecord {
    pub week: u32,
    #[serde(default)]
    pub title: String,
    pub completed: bool,
}

impl ChallengeRecord {
    pub fn new(week: u32, title: impl Into<String>, completed: bool) -> Self {
        Self {
            week,
            title: title.into(),
            completed,
        }
    }
}
