use chrono::{DateTime, NaiveDate, Utc};
use ulid::Ulid;

use crate::model::AppointmentStatus;
use crate::store::StoreError;

/// Every way a scheduling operation can fail. One variant per
/// caller-distinguishable kind: a presentation layer can map these to
/// "fix your input", "does not exist", "pick another time", and "try again
/// later" without string-matching.
#[derive(Debug)]
pub enum ScheduleError {
    /// End instant not strictly after start.
    BadTime {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Input that failed to parse as an ISO calendar date.
    BadDate(String),
    /// Date range whose end precedes its start.
    BadRange { start: NaiveDate, end: NaiveDate },
    NotFound(Ulid),
    OwnerNotFound(Ulid),
    /// Proposed range overlaps the identified existing appointment.
    Conflict(Ulid),
    EmptyTitle,
    IllegalTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
    LimitExceeded(&'static str),
    /// I/O failure propagated from the persistence boundary. Never retried
    /// here; callers re-issue the request.
    Store(String),
}

impl ScheduleError {
    /// Short label for metrics, one per variant.
    pub(crate) fn outcome_label(&self) -> &'static str {
        match self {
            ScheduleError::BadTime { .. } => "bad_time",
            ScheduleError::BadDate(_) => "bad_date",
            ScheduleError::BadRange { .. } => "bad_range",
            ScheduleError::NotFound(_) => "not_found",
            ScheduleError::OwnerNotFound(_) => "no_owner",
            ScheduleError::Conflict(_) => "conflict",
            ScheduleError::EmptyTitle => "empty_title",
            ScheduleError::IllegalTransition { .. } => "illegal_transition",
            ScheduleError::LimitExceeded(_) => "limit",
            ScheduleError::Store(_) => "store",
        }
    }
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::BadTime { start, end } => {
                write!(f, "end time must be after start time: [{start}, {end})")
            }
            ScheduleError::BadDate(input) => {
                write!(f, "invalid date {input:?}: expected YYYY-MM-DD")
            }
            ScheduleError::BadRange { start, end } => {
                write!(f, "invalid date range: {end} is before {start}")
            }
            ScheduleError::NotFound(id) => write!(f, "appointment not found: {id}"),
            ScheduleError::OwnerNotFound(id) => write!(f, "owner not found: {id}"),
            ScheduleError::Conflict(id) => {
                write!(f, "time slot overlaps existing appointment {id}")
            }
            ScheduleError::EmptyTitle => write!(f, "title must not be empty"),
            ScheduleError::IllegalTransition { from, to } => {
                write!(f, "illegal status transition: {from} -> {to}")
            }
            ScheduleError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            ScheduleError::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl std::error::Error for ScheduleError {}

impl From<StoreError> for ScheduleError {
    fn from(e: StoreError) -> Self {
        ScheduleError::Store(e.0)
    }
}
