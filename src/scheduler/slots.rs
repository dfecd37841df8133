use std::time::Instant;

use chrono::{NaiveDate, TimeDelta, TimeZone, Utc};
use tracing::debug;

use crate::model::{TimeRange, TimeSlot};
use crate::observability;

use super::{ScheduleError, Scheduler};

/// Parse an ISO `YYYY-MM-DD` calendar date.
pub(super) fn parse_iso_date(input: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ScheduleError::BadDate(input.to_string()))
}

impl Scheduler {
    /// Available slots for one calendar day: the fixed hour grid of the
    /// business-hours window, minus every candidate that overlaps an
    /// existing appointment. Ascending by hour, recomputed fresh per call.
    /// A day with no appointments returns the full grid.
    pub async fn available_slots(&self, date: &str) -> Result<Vec<TimeSlot>, ScheduleError> {
        let started = Instant::now();
        let day = parse_iso_date(date)?;
        let bounds = self.day_bounds(day)?;
        let existing = self.store.starting_within(&bounds).await?;

        let tz = self.config.timezone;
        let duration = TimeDelta::minutes(self.config.slot_duration_minutes as i64);
        let mut slots =
            Vec::with_capacity((self.config.closing_hour - self.config.opening_hour) as usize);

        for hour in self.config.opening_hour..self.config.closing_hour {
            let Some(wall) = day.and_hms_opt(hour, 0, 0) else {
                continue;
            };
            // A wall-clock hour can be absent on a DST-gap day; no slot then.
            let Some(local) = tz.from_local_datetime(&wall).earliest() else {
                continue;
            };
            let start = local.with_timezone(&Utc);
            let candidate = TimeRange::new(start, start + duration);
            if existing.iter().any(|a| a.span.overlaps(&candidate)) {
                continue;
            }
            slots.push(TimeSlot {
                start,
                duration_minutes: self.config.slot_duration_minutes,
                label: local.format("%H:%M").to_string(),
            });
        }

        debug!(
            date,
            existing = existing.len(),
            free = slots.len(),
            "computed slot grid"
        );
        metrics::histogram!(observability::QUERY_DURATION_SECONDS, "op" => "available_slots")
            .record(started.elapsed().as_secs_f64());
        Ok(slots)
    }
}
