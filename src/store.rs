//! The persistence port. The scheduling core never touches a database
//! directly; it talks to an `AppointmentStore` injected at construction.
//! `MemoryStore` is the reference adapter used by tests and by embedders
//! that do not need durable storage.

use async_trait::async_trait;
use dashmap::DashMap;
use ulid::Ulid;

use crate::model::{Appointment, TimeRange};

/// I/O failure at the persistence boundary. Propagated to the caller
/// verbatim; the core performs no retries.
#[derive(Debug)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store error: {}", self.0)
    }
}

impl std::error::Error for StoreError {}

/// Persistence contract consumed by the scheduler.
///
/// Listing methods return appointments ascending by `span.start`. Range
/// queries may over-approximate (return a superset); the scheduler
/// re-applies the overlap predicate itself, so a SQL adapter scanning a
/// coarser index stays correct.
///
/// A multi-process deployment that cannot rely on the scheduler's in-process
/// booking gate should make `insert` enforce an exclusion constraint on
/// overlapping ranges and surface the violation as a `StoreError` the
/// embedder maps to a conflict.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn insert(&self, appointment: Appointment) -> Result<(), StoreError>;

    async fn get(&self, id: Ulid) -> Result<Option<Appointment>, StoreError>;

    /// Replace the stored appointment with the same id. Returns false if no
    /// such appointment exists.
    async fn update(&self, appointment: Appointment) -> Result<bool, StoreError>;

    async fn remove(&self, id: Ulid) -> Result<Option<Appointment>, StoreError>;

    /// Appointments whose *start* falls within `window`.
    async fn starting_within(&self, window: &TimeRange) -> Result<Vec<Appointment>, StoreError>;

    /// Appointments whose stored range overlaps `range`. Scans the full
    /// set, not one day, so bookings spanning midnight are found.
    async fn overlapping(&self, range: &TimeRange) -> Result<Vec<Appointment>, StoreError>;

    async fn by_owner(&self, owner_id: Ulid) -> Result<Vec<Appointment>, StoreError>;

    /// Cascade hook: remove every appointment owned by `owner_id`. Returns
    /// the number removed.
    async fn remove_by_owner(&self, owner_id: Ulid) -> Result<u64, StoreError>;

    async fn all(&self) -> Result<Vec<Appointment>, StoreError>;
}

/// In-memory adapter over a concurrent map.
pub struct MemoryStore {
    appointments: DashMap<Ulid, Appointment>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            appointments: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    fn collect_sorted<F>(&self, keep: F) -> Vec<Appointment>
    where
        F: Fn(&Appointment) -> bool,
    {
        let mut hits: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        hits.sort_by_key(|a| a.span.start);
        hits
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn insert(&self, appointment: Appointment) -> Result<(), StoreError> {
        self.appointments.insert(appointment.id, appointment);
        Ok(())
    }

    async fn get(&self, id: Ulid) -> Result<Option<Appointment>, StoreError> {
        Ok(self.appointments.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update(&self, appointment: Appointment) -> Result<bool, StoreError> {
        match self.appointments.get_mut(&appointment.id) {
            Some(mut entry) => {
                *entry = appointment;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: Ulid) -> Result<Option<Appointment>, StoreError> {
        Ok(self.appointments.remove(&id).map(|(_, appointment)| appointment))
    }

    async fn starting_within(&self, window: &TimeRange) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.collect_sorted(|a| window.contains_instant(a.span.start)))
    }

    async fn overlapping(&self, range: &TimeRange) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.collect_sorted(|a| a.span.overlaps(range)))
    }

    async fn by_owner(&self, owner_id: Ulid) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.collect_sorted(|a| a.owner_id == owner_id))
    }

    async fn remove_by_owner(&self, owner_id: Ulid) -> Result<u64, StoreError> {
        let ids: Vec<Ulid> = self
            .appointments
            .iter()
            .filter(|entry| entry.value().owner_id == owner_id)
            .map(|entry| *entry.key())
            .collect();
        let mut removed = 0;
        for id in ids {
            if self.appointments.remove(&id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn all(&self) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.collect_sorted(|_| true))
    }
}
