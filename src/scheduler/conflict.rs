use chrono::{DateTime, Utc};
use ulid::Ulid;

use crate::limits::MAX_APPOINTMENT_MINUTES;
use crate::model::{Appointment, TimeRange};

use super::ScheduleError;

/// Validate a proposed pair of instants and construct the range. Inverted
/// and zero-length ranges never reach the overlap predicate.
pub fn validate_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<TimeRange, ScheduleError> {
    if end <= start {
        return Err(ScheduleError::BadTime { start, end });
    }
    let range = TimeRange::new(start, end);
    if range.duration_minutes() > MAX_APPOINTMENT_MINUTES {
        return Err(ScheduleError::LimitExceeded("appointment too long"));
    }
    Ok(range)
}

/// First appointment in `existing` whose range overlaps `proposed`,
/// skipping `exclude` (the appointment being edited, if any).
///
/// `existing` normally comes from the store's overlapping-range query, but
/// the predicate is re-applied here: adapters are allowed to return a
/// superset.
pub fn find_conflict(
    existing: &[Appointment],
    proposed: &TimeRange,
    exclude: Option<Ulid>,
) -> Option<Ulid> {
    existing
        .iter()
        .filter(|a| exclude != Some(a.id))
        .find(|a| a.span.overlaps(proposed))
        .map(|a| a.id)
}
