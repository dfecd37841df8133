use chrono_tz::Tz;

use crate::limits::{MAX_CLOSING_HOUR, MAX_SLOT_MINUTES};
use crate::scheduler::ScheduleError;

/// Business-hours grid and the reference timezone.
///
/// All wall-clock interpretation (day boundaries, slot labels, load
/// grouping) happens in `timezone` and nowhere else. Instants are stored
/// and compared in UTC; the reference timezone is only ever applied at the
/// calendar edges.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// First hour of the slot grid (inclusive).
    pub opening_hour: u32,
    /// Hour the grid stops at (exclusive).
    pub closing_hour: u32,
    /// Width of one candidate slot.
    pub slot_duration_minutes: u32,
    pub timezone: Tz,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            opening_hour: 9,
            closing_hour: 17,
            slot_duration_minutes: 60,
            timezone: chrono_tz::UTC,
        }
    }
}

impl SchedulerConfig {
    /// Read configuration from `DOCKET_*` environment variables, falling
    /// back to the defaults for anything missing or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            opening_hour: std::env::var("DOCKET_OPENING_HOUR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.opening_hour),
            closing_hour: std::env::var("DOCKET_CLOSING_HOUR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.closing_hour),
            slot_duration_minutes: std::env::var("DOCKET_SLOT_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.slot_duration_minutes),
            timezone: std::env::var("DOCKET_TIMEZONE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timezone),
        }
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.opening_hour >= self.closing_hour {
            return Err(ScheduleError::LimitExceeded(
                "opening hour must be before closing hour",
            ));
        }
        if self.closing_hour > MAX_CLOSING_HOUR {
            return Err(ScheduleError::LimitExceeded("closing hour past end of day"));
        }
        if self.slot_duration_minutes == 0 || self.slot_duration_minutes > MAX_SLOT_MINUTES {
            return Err(ScheduleError::LimitExceeded("slot duration out of range"));
        }
        Ok(())
    }
}
