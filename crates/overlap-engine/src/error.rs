//! Error types for overlap-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlapError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Invalid search options: {0}")]
    InvalidOptions(String),

    #[error("Participant not found: {0}")]
    ParticipantNotFound(String),

    #[error("Proposal not found: {0}")]
    ProposalNotFound(String),
}

pub type Result<T> = std::result::Result<T, OverlapError>;
