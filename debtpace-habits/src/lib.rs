//! debtpace-habits: behavioral analytics over weekly check-ins and challenges
//!
//! Empty history is the normal starting state, so every entry point returns
//! zeroed or neutral output for it instead of an error.

pub mod config;
pub mod insights;
pub mod performance;
pub mod records;
pub mod velocity;

pub use config::AnalyticsConfig;
pub use insights::{evaluate_rules, generate_insights, Insight};
pub use performance::{
    calculate_consistency_score, calculate_weekly_performance, current_streak, WeekRecord,
};
pub use records::{ChallengeRecord, CheckInRecord};
pub use velocity::{calculate_payment_velocity, extra_payment_share, PaymentVelocity, VelocityTrend};
