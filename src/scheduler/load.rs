use std::time::Instant;

use tracing::debug;

use crate::limits::MAX_LOAD_RANGE_DAYS;
use crate::model::{AppointmentStatus, DailyLoad, TimeRange};
use crate::observability;

use super::slots::parse_iso_date;
use super::{ScheduleError, Scheduler};

impl Scheduler {
    /// Scheduled-appointment counts per calendar day over an inclusive date
    /// range, for admin capacity views. Grouping follows the reference
    /// timezone; days with nothing scheduled are absent from the result.
    pub async fn load_by_date_range(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<DailyLoad, ScheduleError> {
        let started = Instant::now();
        let first = parse_iso_date(start_date)?;
        let last = parse_iso_date(end_date)?;
        if last < first {
            return Err(ScheduleError::BadRange {
                start: first,
                end: last,
            });
        }
        if (last - first).num_days() + 1 > MAX_LOAD_RANGE_DAYS {
            return Err(ScheduleError::LimitExceeded("load window too wide"));
        }

        let window = TimeRange::new(self.day_bounds(first)?.start, self.day_bounds(last)?.end);
        let appointments = self.store.starting_within(&window).await?;

        let tz = self.config.timezone;
        let mut load = DailyLoad::new();
        for appointment in &appointments {
            if appointment.status != AppointmentStatus::Scheduled {
                continue;
            }
            let day = appointment.span.start.with_timezone(&tz).date_naive();
            *load.entry(day).or_insert(0) += 1;
        }

        debug!(
            start_date,
            end_date,
            scanned = appointments.len(),
            days = load.len(),
            "aggregated load"
        );
        metrics::histogram!(observability::QUERY_DURATION_SECONDS, "op" => "load")
            .record(started.elapsed().as_secs_f64());
        Ok(load)
    }
}
