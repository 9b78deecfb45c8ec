//! Appointment types and status lifecycle.
//!
//! Appointments follow strict status transitions:
//!
//!   CONFIRMED ────────> COMPLETED
//!       |
//!       +─────────────> CANCELLED
//!       |
//!       +─────────────> NO_SHOW
//!
//! Completed, cancelled, and no-show are terminal. An appointment is never
//! physically deleted in the normal flow; cancellation is a status
//! transition, after which the appointment stops occupying its interval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Appointment status enumeration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked and holding its time window (initial state)
    Confirmed,
    /// Service was delivered (terminal)
    Completed,
    /// Cancelled ahead of time (terminal)
    Cancelled,
    /// Client did not show up (terminal)
    NoShow,
}

impl AppointmentStatus {
    /// Check if a transition is valid.
    pub fn can_transition_to(&self, to: &AppointmentStatus) -> bool {
        match self {
            AppointmentStatus::Confirmed => matches!(
                to,
                AppointmentStatus::Completed
                    | AppointmentStatus::Cancelled
                    | AppointmentStatus::NoShow
            ),
            // Terminal states
            AppointmentStatus::Completed
            | AppointmentStatus::Cancelled
            | AppointmentStatus::NoShow => false,
        }
    }

    /// Get valid next states for this state.
    pub fn valid_transitions(&self) -> &[AppointmentStatus] {
        match self {
            AppointmentStatus::Confirmed => &[
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
                AppointmentStatus::NoShow,
            ],
            AppointmentStatus::Completed
            | AppointmentStatus::Cancelled
            | AppointmentStatus::NoShow => &[],
        }
    }

    /// Whether an appointment in this status still occupies its window.
    pub fn occupies_interval(&self) -> bool {
        matches!(self, AppointmentStatus::Confirmed)
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Confirmed
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
        }
    }
}

/// A booked appointment.
///
/// The end instant is derived at booking time from the service duration
/// (`end_time = start_time + duration`) and updated on reschedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique identifier
    pub id: String,
    /// Professional delivering the service
    pub professional_id: String,
    /// Booked service
    pub service_id: String,
    /// Client receiving the service
    pub client_id: String,
    /// Start instant
    pub start_time: DateTime<Utc>,
    /// End instant (start + service duration)
    pub end_time: DateTime<Utc>,
    /// Lifecycle status
    pub status: AppointmentStatus,
    /// Free-form booking note
    pub note: Option<String>,
    /// Deposit collected at booking, in currency minor units
    pub deposit_minor: Option<i64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Create a new confirmed appointment.
    pub fn new(
        professional_id: impl Into<String>,
        service_id: impl Into<String>,
        client_id: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Appointment {
            id: uuid::Uuid::new_v4().to_string(),
            professional_id: professional_id.into(),
            service_id: service_id.into(),
            client_id: client_id.into(),
            start_time,
            end_time,
            status: AppointmentStatus::Confirmed,
            note: None,
            deposit_minor: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Transition to a new status.
    ///
    /// Returns an error if the transition is invalid.
    pub fn transition_to(
        &mut self,
        new_status: AppointmentStatus,
    ) -> Result<(), StatusTransitionError> {
        if !self.status.can_transition_to(&new_status) {
            return Err(StatusTransitionError {
                from: self.status,
                to: new_status,
            });
        }

        self.status = new_status;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Move the appointment to a new window.
    ///
    /// The booking engine validates the destination before calling this.
    pub fn move_to(&mut self, start_time: DateTime<Utc>, end_time: DateTime<Utc>) {
        self.start_time = start_time;
        self.end_time = end_time;
        self.updated_at = Utc::now();
    }

    /// Duration in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// Error returned when an invalid status transition is attempted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusTransitionError {
    pub from: AppointmentStatus,
    pub to: AppointmentStatus,
}

impl fmt::Display for StatusTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid status transition: {} → {}", self.from, self.to)
    }
}

impl std::error::Error for StatusTransitionError {}
