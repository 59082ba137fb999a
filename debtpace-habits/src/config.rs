//! Thresholds for trend detection and the insight rule table.

use debtpace_core::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Relative change between early and recent extra payments that counts
    /// as a trend (0.10 = 10%).
    pub trend_threshold: f64,
    /// Consistency score below which we nudge.
    pub low_consistency: u8,
    /// Consistency score at or above which we praise.
    pub high_consistency: u8,
    /// Consecutive check-in weeks that count as a streak.
    pub streak_weeks: u32,
    /// Mean mood at or below which we check on the user.
    pub low_mood: f64,
    /// Mood assumed for weeks without a check-in.
    pub neutral_mood: u8,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trend_threshold: 0.10,
            low_consistency: 50,
            high_consistency: 80,
            streak_weeks: 3,
            low_mood: 2.0,
            neutral_mood: 3,
        }
    }
}

impl AnalyticsConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.trend_threshold.is_finite() && self.trend_threshold >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "trend_threshold must be non-negative, got {}",
                self.trend_threshold
            )));
        }
        if self.low_consistency > 100 || self.high_consistency > 100 {
            return Err(Error::InvalidConfig(
                "consistency thresholds must be within 0..=100".into(),
            ));
        }
        if self.low_consistency > self.high_consistency {
            return Err(Error::InvalidConfig(
                "low_consistency must not exceed high_consistency".into(),
            ));
        }
        if !(1..=5).contains(&self.neutral_mood) {
            return Err(Error::InvalidConfig(format!(
                "neutral_mood must be within 1..=5, got {}",
                self.neutral_mood
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AnalyticsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_consistency_thresholds() {
        let cfg = AnalyticsConfig {
            low_consistency: 90,
            high_consistency: 60,
            ..AnalyticsConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_mood() {
        let cfg = AnalyticsConfig {
            neutral_mood: 0,
            ..AnalyticsConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
