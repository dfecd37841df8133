use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Half-open interval `[start, end)` over absolute instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start < end, "TimeRange start must be before end");
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// The one overlap predicate used everywhere. Ranges that merely touch
    /// (`self.end == other.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_instant(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }

    /// Returns true if `self` fully contains `other`.
    pub fn contains_range(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Where an appointment is in its lifecycle. New bookings start `Scheduled`;
/// the terminal states are reached through the guarded transition table and
/// never lead back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Transition table: self-transitions are idempotent no-ops, `Scheduled`
    /// may move to either terminal state, terminal states accept nothing else.
    pub fn can_transition(self, to: AppointmentStatus) -> bool {
        self == to || self == AppointmentStatus::Scheduled
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One booked interval, owned by exactly one user.
///
/// Invariant: `span.end > span.start` for every persisted appointment.
/// `id` is immutable after creation; `created_at`/`updated_at` are
/// system-managed, never client-settable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Ulid,
    pub title: String,
    pub description: Option<String>,
    pub span: TimeRange,
    pub status: AppointmentStatus,
    pub owner_id: Ulid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Whole minutes until the appointment starts. Negative once it has.
    pub fn time_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.span.start - now).num_minutes()
    }
}

/// Inputs for `create_appointment`. `override_conflict` is the explicit
/// administrative bypass of the overlap check, never default-on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub owner_id: Ulid,
    #[serde(default)]
    pub override_conflict: bool,
}

/// Partial update for an existing appointment. Absent fields keep their
/// stored value; the description cannot be cleared through a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// One available candidate interval within business hours. Derived, never
/// persisted; present in a result set only if available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub duration_minutes: u32,
    /// Wall-clock start in the reference timezone, `HH:MM`.
    pub label: String,
}

/// Calendar date → count of scheduled appointments starting that day.
/// Dates with zero appointments are absent, not present with value 0.
pub type DailyLoad = BTreeMap<NaiveDate, u64>;

/// Projection of the external identity collaborator's user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Ulid,
    pub name: String,
    pub email: Option<String>,
}
