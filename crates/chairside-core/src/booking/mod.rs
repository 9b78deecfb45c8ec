//! Booking and availability engine.
//!
//! This module provides the slot-availability pipeline:
//! - Candidate slot generation over the configured business day
//! - Conflict detection against appointments and time blocks
//! - Destination validation for reschedules (drag-and-drop moves)
//! - Commit-path operations that check and write through one database
//!   connection, so the per-professional non-overlap invariant holds at
//!   commit time

mod conflict;
mod reschedule;
mod slots;

pub use conflict::{
    check_window, classify_slots, free_slots, intervals_overlap, BusyInterval, BusySource,
    SlotAvailability,
};
pub use reschedule::validate_move;
pub use slots::{day_bounds, parse_time_of_day, Slot, SlotGenerator};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::appointment::{Appointment, AppointmentStatus};
use crate::error::{BookingError, CoreError, ValidationError};
use crate::payments::DepositPolicy;
use crate::storage::{Config, SalonDb};

/// A classified candidate slot, as surfaced to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotStatus {
    pub slot: Slot,
    pub availability: SlotAvailability,
}

/// A booking request for a new appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub professional_id: String,
    pub service_id: String,
    pub client_id: String,
    pub start_time: DateTime<Utc>,
    pub note: Option<String>,
}

/// Booking engine configured with business hours, slot cadence, and
/// deposit policy.
pub struct BookingEngine {
    open: String,
    close: String,
    working_days: Vec<u8>,
    generator: SlotGenerator,
    deposit_policy: DepositPolicy,
}

impl BookingEngine {
    /// Build an engine from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self, ValidationError> {
        Ok(Self {
            open: config.hours.open.clone(),
            close: config.hours.close.clone(),
            working_days: config.hours.working_days.clone(),
            generator: SlotGenerator::new(config.booking.slot_cadence_min)?,
            deposit_policy: DepositPolicy::new(config.deposits.percent)?,
        })
    }

    /// Whether the date falls on a configured working weekday.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        let weekday = date.weekday().num_days_from_monday() as u8; // 0=Mon .. 6=Sun
        self.working_days.contains(&weekday)
    }

    /// Open/close instants of the business day on a date.
    pub fn day_bounds(
        &self,
        date: NaiveDate,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), ValidationError> {
        day_bounds(date, &self.open, &self.close)
    }

    /// Candidate slots for a date, regardless of occupancy.
    pub fn day_slots(&self, date: NaiveDate) -> Result<Vec<Slot>, ValidationError> {
        let (start, end) = self.day_bounds(date)?;
        Ok(self.generator.generate(start, end))
    }

    /// Every candidate slot for the date classified against the occupied
    /// set. Returns an empty list on non-working days.
    pub fn availability(
        &self,
        db: &SalonDb,
        professional_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<SlotStatus>, CoreError> {
        if !self.is_working_day(date) {
            return Ok(Vec::new());
        }

        let (day_start, day_end) = self.day_bounds(date)?;
        let slots = self.generator.generate(day_start, day_end);
        let busy = db.busy_intervals(professional_id, day_start, day_end)?;

        Ok(classify_slots(&slots, &busy)
            .into_iter()
            .map(|(slot, availability)| SlotStatus { slot, availability })
            .collect())
    }

    /// Check that `[start, end)` lies inside the business day.
    fn check_within_hours(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), BookingError> {
        let date = start.date_naive();
        if !self.is_working_day(date) {
            return Err(BookingError::ClosedDay { date });
        }
        let (day_start, day_end) = self
            .day_bounds(date)
            .map_err(|_| BookingError::OutsideBusinessHours { start })?;
        if start < day_start || end > day_end {
            return Err(BookingError::OutsideBusinessHours { start });
        }
        Ok(())
    }

    /// Book a new appointment.
    ///
    /// Validates the service, computes the end instant from the service
    /// duration, checks business hours and the occupied set, computes the
    /// deposit, and persists. Check and insert run on the same
    /// connection.
    pub fn book(&self, db: &SalonDb, request: &BookingRequest) -> Result<Appointment, CoreError> {
        let service = db
            .get_service(&request.service_id)?
            .ok_or_else(|| BookingError::ServiceNotFound(request.service_id.clone()))?;
        if !service.active {
            return Err(BookingError::ServiceInactive(service.id.clone()).into());
        }
        db.get_client(&request.client_id)?
            .ok_or_else(|| BookingError::ClientNotFound(request.client_id.clone()))?;

        let start = request.start_time;
        let end = start + chrono::Duration::minutes(i64::from(service.duration_min));
        self.check_within_hours(start, end)?;

        let busy = db.busy_intervals(&request.professional_id, start, end)?;
        match check_window(start, end, &busy) {
            SlotAvailability::Free => {}
            SlotAvailability::Occupied { appointment_id } => {
                return Err(BookingError::SlotOccupied { appointment_id }.into())
            }
            SlotAvailability::Blocked { block_kind } => {
                return Err(BookingError::SlotBlocked { kind: block_kind }.into())
            }
        }

        let mut appointment = Appointment::new(
            request.professional_id.clone(),
            request.service_id.clone(),
            request.client_id.clone(),
            start,
            end,
        );
        appointment.note = request.note.clone();
        appointment.deposit_minor = self.deposit_policy.deposit_for(&service);

        db.create_appointment(&appointment)?;
        Ok(appointment)
    }

    /// Reschedule an existing appointment to a new start instant.
    ///
    /// The duration is preserved. The destination is re-validated with the
    /// moved appointment excluded from the occupied set, so a no-op move
    /// to its own slot succeeds.
    pub fn reschedule(
        &self,
        db: &SalonDb,
        appointment_id: &str,
        new_start: DateTime<Utc>,
    ) -> Result<Appointment, CoreError> {
        let mut appointment = db
            .get_appointment(appointment_id)?
            .ok_or_else(|| BookingError::AppointmentNotFound(appointment_id.to_string()))?;

        if !appointment.status.occupies_interval() {
            return Err(ValidationError::InvalidValue {
                field: "status".to_string(),
                message: format!(
                    "only confirmed appointments can be rescheduled (status: {})",
                    appointment.status
                ),
            }
            .into());
        }

        let duration = appointment.end_time - appointment.start_time;
        let new_end = new_start + duration;
        self.check_within_hours(new_start, new_end)?;

        let busy = db.busy_intervals(&appointment.professional_id, new_start, new_end)?;
        validate_move(appointment_id, new_start, new_end, &busy)?;

        appointment.move_to(new_start, new_end);
        db.update_appointment(&appointment)?;
        Ok(appointment)
    }
}

/// Transition an appointment's status and persist the result.
pub fn set_appointment_status(
    db: &SalonDb,
    appointment_id: &str,
    status: AppointmentStatus,
) -> Result<Appointment, CoreError> {
    let mut appointment = db
        .get_appointment(appointment_id)?
        .ok_or_else(|| BookingError::AppointmentNotFound(appointment_id.to_string()))?;

    appointment.transition_to(status).map_err(|e| {
        CoreError::Validation(ValidationError::InvalidTransition {
            from: e.from.to_string(),
            to: e.to.to_string(),
        })
    })?;

    db.update_appointment(&appointment)?;
    Ok(appointment)
}
