//! Deterministic insight rules over velocity, weekly performance and consistency.
//!
//! Rules are evaluated in declaration order and each fires at most once.

use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::performance::{current_streak, WeekRecord};
use crate::velocity::{PaymentVelocity, VelocityTrend};

const MOOD_WINDOW: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Insight {
    SlowingDown { average_extra_payment: f64 },
    PickingUp { average_extra_payment: f64 },
    NeedsConsistency { score: u8 },
    StrongConsistency { score: u8 },
    OnAStreak { weeks: u32 },
    LowMood { average_mood: f64 },
    NewIncome { week: u32, amount: f64 },
}

impl Insight {
    pub fn message(&self) -> String {
        match self {
            Insight::SlowingDown { average_extra_payment } => format!(
                "Your extra payments have been slowing down. Even a small amount above your \
                 ${average_extra_payment:.2} average keeps the momentum going."
            ),
            Insight::PickingUp { .. } => {
                "Your extra payments are picking up. Every extra dollar shortens your payoff date."
                    .to_string()
            }
            Insight::NeedsConsistency { score } => format!(
                "You've been active in {score}% of weeks so far. A quick weekly check-in \
                 helps you stay on track."
            ),
            Insight::StrongConsistency { score } => {
                format!("{score}% consistency. You're showing up week after week.")
            }
            Insight::OnAStreak { weeks } => {
                format!("You're on a {weeks}-week check-in streak. Keep it alive!")
            }
            Insight::LowMood { .. } => {
                "The last few weeks have felt rough. Progress counts even when it's slow."
                    .to_string()
            }
            Insight::NewIncome { amount, .. } => format!(
                "You reported ${amount:.2} in new income. Putting part of it toward your \
                 highest-rate debt saves the most interest."
            ),
        }
    }
}

fn recent_mood(weekly: &[WeekRecord]) -> Option<f64> {
    let moods: Vec<f64> = weekly
        .iter()
        .rev()
        .filter(|w| w.checked_in)
        .take(MOOD_WINDOW)
        .map(|w| f64::from(w.mood_score))
        .collect();

    if moods.len() < MOOD_WINDOW {
        return None;
    }
    Some(moods.iter().sum::<f64>() / moods.len() as f64)
}

/// Run the rule table. No history means no insights.
pub fn evaluate_rules(
    velocity: &PaymentVelocity,
    weekly: &[WeekRecord],
    consistency_score: u8,
    config: &AnalyticsConfig,
) -> Vec<Insight> {
    let Some(latest) = weekly.last() else {
        return Vec::new();
    };

    let mut out = Vec::new();

    match velocity.velocity_trend {
        VelocityTrend::Decreasing => out.push(Insight::SlowingDown {
            average_extra_payment: velocity.average_extra_payment,
        }),
        VelocityTrend::Increasing => out.push(Insight::PickingUp {
            average_extra_payment: velocity.average_extra_payment,
        }),
        VelocityTrend::Stable => {}
    }

    if consistency_score < config.low_consistency {
        out.push(Insight::NeedsConsistency {
            score: consistency_score,
        });
    } else if consistency_score >= config.high_consistency {
        out.push(Insight::StrongConsistency {
            score: consistency_score,
        });
    }

    let streak = current_streak(weekly);
    if config.streak_weeks > 0 && streak >= config.streak_weeks {
        out.push(Insight::OnAStreak { weeks: streak });
    }

    if let Some(average_mood) = recent_mood(weekly) {
        if average_mood <= config.low_mood {
            out.push(Insight::LowMood { average_mood });
        }
    }

    if latest.new_income > 0.0 {
        out.push(Insight::NewIncome {
            week: latest.week,
            amount: latest.new_income,
        });
    }

    tracing::trace!(fired = out.len(), "evaluated insight rules");
    out
}

/// The rule table rendered as advisory messages.
pub fn generate_insights(
    velocity: &PaymentVelocity,
    weekly: &[WeekRecord],
    consistency_score: u8,
    config: &AnalyticsConfig,
) -> Vec<String> {
    evaluate_rules(velocity, weekly, consistency_score, config)
        .iter()
        .map(Insight::message)
        .collect()
}
