//! Error types for debtpace-core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid debt '{id}': {reason}")]
    InvalidDebt { id: String, reason: String },

    #[error("Duplicate debt id: {0}")]
    DuplicateDebtId(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, Error>;
