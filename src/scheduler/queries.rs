use std::time::Instant;

use ulid::Ulid;

use crate::model::Appointment;
use crate::observability;

use super::slots::parse_iso_date;
use super::{ScheduleError, Scheduler};

impl Scheduler {
    pub async fn appointment(&self, id: Ulid) -> Result<Appointment, ScheduleError> {
        self.fetch(id).await
    }

    /// All of an owner's appointments, ascending by start.
    pub async fn appointments_by_owner(
        &self,
        owner_id: Ulid,
    ) -> Result<Vec<Appointment>, ScheduleError> {
        let started = Instant::now();
        let mut mine = self.store.by_owner(owner_id).await?;
        mine.sort_by_key(|a| a.span.start);
        metrics::histogram!(observability::QUERY_DURATION_SECONDS, "op" => "by_owner")
            .record(started.elapsed().as_secs_f64());
        Ok(mine)
    }

    /// Appointments starting on one calendar day, ascending by start.
    pub async fn appointments_on(&self, date: &str) -> Result<Vec<Appointment>, ScheduleError> {
        let day = parse_iso_date(date)?;
        let bounds = self.day_bounds(day)?;
        let mut hits = self.store.starting_within(&bounds).await?;
        hits.sort_by_key(|a| a.span.start);
        Ok(hits)
    }

    /// Every appointment in the store, ascending by start.
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, ScheduleError> {
        let mut every = self.store.all().await?;
        every.sort_by_key(|a| a.span.start);
        Ok(every)
    }
}
