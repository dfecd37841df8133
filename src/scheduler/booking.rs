use chrono::Utc;
use tracing::{debug, info};
use ulid::Ulid;

use crate::limits::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
use crate::model::{Appointment, AppointmentPatch, AppointmentStatus, BookingRequest};
use crate::observability;

use super::conflict::{find_conflict, validate_range};
use super::{ScheduleError, Scheduler};

fn validate_title(title: &str) -> Result<(), ScheduleError> {
    if title.trim().is_empty() {
        return Err(ScheduleError::EmptyTitle);
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(ScheduleError::LimitExceeded("title too long"));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ScheduleError> {
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(ScheduleError::LimitExceeded("description too long"));
    }
    Ok(())
}

fn status_label(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Scheduled => "scheduled",
        AppointmentStatus::Completed => "completed",
        AppointmentStatus::Cancelled => "cancelled",
    }
}

impl Scheduler {
    /// Book a new appointment.
    ///
    /// Pipeline: time validation → owner resolution → conflict check →
    /// persist. Exactly one store write on success, none on rejection. The
    /// booking gate is held from the conflict check through the insert, so
    /// two concurrent requests for the same slot serialize and the second
    /// sees the first's write.
    pub async fn create_appointment(
        &self,
        request: BookingRequest,
    ) -> Result<Appointment, ScheduleError> {
        let result = self.try_create(request).await;
        let outcome = match &result {
            Ok(_) => "created",
            Err(e) => e.outcome_label(),
        };
        metrics::counter!(observability::BOOKINGS_TOTAL, "outcome" => outcome).increment(1);
        result
    }

    async fn try_create(&self, request: BookingRequest) -> Result<Appointment, ScheduleError> {
        validate_title(&request.title)?;
        if let Some(description) = &request.description {
            validate_description(description)?;
        }
        let span = validate_range(request.start, request.end)?;

        if !self.directory.owner_exists(request.owner_id).await? {
            return Err(ScheduleError::OwnerNotFound(request.owner_id));
        }

        let _gate = self.booking_gate.lock().await;

        if request.override_conflict {
            metrics::counter!(observability::CONFLICT_OVERRIDES_TOTAL).increment(1);
            debug!(owner = %request.owner_id, "conflict check bypassed by override");
        } else {
            // Full-set scan, not date-scoped: an appointment spanning
            // midnight must still be caught.
            let existing = self.store.overlapping(&span).await?;
            if let Some(blocking) = find_conflict(&existing, &span, None) {
                return Err(ScheduleError::Conflict(blocking));
            }
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Ulid::new(),
            title: request.title,
            description: request.description,
            span,
            status: AppointmentStatus::Scheduled,
            owner_id: request.owner_id,
            created_at: now,
            updated_at: now,
        };
        self.store.insert(appointment.clone()).await?;
        self.invalidate(&appointment.span, appointment.owner_id);

        info!(id = %appointment.id, owner = %appointment.owner_id, "booked appointment");
        Ok(appointment)
    }

    /// Apply a partial update. The effective range (patch values merged
    /// over stored ones) is re-validated, so a single-bound patch cannot
    /// persist an inverted range. Conflict detection is not re-run on
    /// update.
    pub async fn update_appointment(
        &self,
        id: Ulid,
        patch: AppointmentPatch,
    ) -> Result<Appointment, ScheduleError> {
        let mut appointment = self.fetch(id).await?;
        let previous_span = appointment.span;

        if let Some(title) = patch.title {
            validate_title(&title)?;
            appointment.title = title;
        }
        if let Some(description) = patch.description {
            validate_description(&description)?;
            appointment.description = Some(description);
        }
        let start = patch.start.unwrap_or(appointment.span.start);
        let end = patch.end.unwrap_or(appointment.span.end);
        appointment.span = validate_range(start, end)?;
        appointment.updated_at = Utc::now();

        if !self.store.update(appointment.clone()).await? {
            return Err(ScheduleError::NotFound(id));
        }
        // Both the old and the new days may hold stale cached results.
        self.invalidate(&previous_span, appointment.owner_id);
        if appointment.span != previous_span {
            self.invalidate(&appointment.span, appointment.owner_id);
        }
        debug!(id = %appointment.id, "updated appointment");
        Ok(appointment)
    }

    pub async fn complete_appointment(&self, id: Ulid) -> Result<Appointment, ScheduleError> {
        self.transition(id, AppointmentStatus::Completed).await
    }

    pub async fn cancel_appointment(&self, id: Ulid) -> Result<Appointment, ScheduleError> {
        self.transition(id, AppointmentStatus::Cancelled).await
    }

    /// Guarded one-way transition. Re-applying the current status is an
    /// idempotent success with no write; any other edge out of a terminal
    /// state is rejected.
    async fn transition(
        &self,
        id: Ulid,
        to: AppointmentStatus,
    ) -> Result<Appointment, ScheduleError> {
        let mut appointment = self.fetch(id).await?;
        if !appointment.status.can_transition(to) {
            return Err(ScheduleError::IllegalTransition {
                from: appointment.status,
                to,
            });
        }
        if appointment.status == to {
            return Ok(appointment);
        }
        appointment.status = to;
        appointment.updated_at = Utc::now();
        if !self.store.update(appointment.clone()).await? {
            return Err(ScheduleError::NotFound(id));
        }
        metrics::counter!(observability::TRANSITIONS_TOTAL, "to" => status_label(to)).increment(1);
        self.invalidate(&appointment.span, appointment.owner_id);
        info!(id = %appointment.id, "marked as {to}");
        Ok(appointment)
    }

    /// Hard delete, independent of status.
    pub async fn delete_appointment(&self, id: Ulid) -> Result<(), ScheduleError> {
        let removed = self
            .store
            .remove(id)
            .await?
            .ok_or(ScheduleError::NotFound(id))?;
        self.invalidate(&removed.span, removed.owner_id);
        info!(id = %removed.id, "deleted appointment");
        Ok(())
    }

    /// Cascade hook for the identity collaborator: deleting a user deletes
    /// every appointment the user owns. Returns the number removed.
    pub async fn purge_owner(&self, owner_id: Ulid) -> Result<u64, ScheduleError> {
        let owned = self.store.by_owner(owner_id).await?;
        let removed = self.store.remove_by_owner(owner_id).await?;
        for appointment in &owned {
            self.invalidate(&appointment.span, owner_id);
        }
        if removed > 0 {
            metrics::counter!(observability::CASCADE_REMOVALS_TOTAL).increment(removed);
            info!(owner = %owner_id, removed, "purged owner appointments");
        }
        Ok(removed)
    }
}
