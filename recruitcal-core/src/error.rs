//! Error types for the recruitcal scheduling engine.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::candidate::CandidateId;

/// Errors that can occur in scheduling operations.
///
/// Every variant is recoverable: an operation that returns one of these
/// leaves the pool, the event store and any open proposal untouched.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Candidate {0} is already in the pool")]
    DuplicateCandidate(CandidateId),

    #[error("No interview scheduled for candidate {0}")]
    EventNotFound(CandidateId),

    #[error("No interview proposal is open")]
    NoActiveProposal,

    #[error("Candidate {0} is not in the pool")]
    CandidateNotInPool(CandidateId),

    #[error("Candidate {0} already has an interview scheduled")]
    AlreadyScheduled(CandidateId),

    #[error("Interview must end after it starts (start {start}, end {end})")]
    InvalidTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Unknown time zone '{0}'")]
    InvalidTimezone(String),

    #[error("Month boundaries out of range: {0}")]
    MonthOutOfRange(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scheduling operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;
