mod booking;
mod conflict;
mod error;
mod load;
mod queries;
mod slots;

pub use conflict::{find_conflict, validate_range};
pub use error::ScheduleError;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use tokio::sync::Mutex;
use ulid::Ulid;

use crate::config::SchedulerConfig;
use crate::directory::OwnerDirectory;
use crate::model::{Appointment, TimeRange};
use crate::notify::{CacheKey, InvalidationHub};
use crate::store::AppointmentStore;

/// The appointment-scheduling orchestrator. Storage and identity are ports
/// injected at construction; there is no ambient or global state.
pub struct Scheduler {
    store: Arc<dyn AppointmentStore>,
    directory: Arc<dyn OwnerDirectory>,
    config: SchedulerConfig,
    notify: Arc<InvalidationHub>,
    /// Held across conflict check + insert; see `create_appointment`.
    booking_gate: Mutex<()>,
}

impl Scheduler {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        directory: Arc<dyn OwnerDirectory>,
        config: SchedulerConfig,
        notify: Arc<InvalidationHub>,
    ) -> Result<Self, ScheduleError> {
        config.validate()?;
        Ok(Self {
            store,
            directory,
            config,
            notify,
            booking_gate: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Fetch an appointment or fail with `NotFound`.
    pub(super) async fn fetch(&self, id: Ulid) -> Result<Appointment, ScheduleError> {
        self.store.get(id).await?.ok_or(ScheduleError::NotFound(id))
    }

    /// Absolute UTC bounds of one calendar day in the reference timezone.
    /// The single place wall-clock day boundaries are constructed.
    pub(super) fn day_bounds(&self, day: NaiveDate) -> Result<TimeRange, ScheduleError> {
        let start = local_midnight(self.config.timezone, day)?;
        let next = day
            .succ_opt()
            .ok_or_else(|| ScheduleError::BadDate(day.to_string()))?;
        let end = local_midnight(self.config.timezone, next)?;
        Ok(TimeRange::new(start, end))
    }

    /// Send invalidations for every cache key a mutation dirtied: each
    /// calendar day the range touches, plus the owner's listing. Runs
    /// synchronously before the mutating operation returns success.
    pub(super) fn invalidate(&self, span: &TimeRange, owner_id: Ulid) {
        let tz = self.config.timezone;
        let mut day = span.start.with_timezone(&tz).date_naive();
        let last = (span.end - TimeDelta::nanoseconds(1))
            .with_timezone(&tz)
            .date_naive();
        while day <= last {
            self.notify.send(CacheKey::Date(day));
            let Some(next) = day.succ_opt() else { break };
            day = next;
        }
        self.notify.send(CacheKey::Owner(owner_id));
    }
}

fn local_midnight(tz: Tz, day: NaiveDate) -> Result<DateTime<Utc>, ScheduleError> {
    tz.from_local_datetime(&day.and_time(NaiveTime::MIN))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| ScheduleError::BadDate(day.to_string()))
}
