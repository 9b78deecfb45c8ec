//! Destination validation for appointment moves.
//!
//! Before a reschedule is committed, the destination window is re-checked
//! against the occupied set with the moved appointment excluded, so a
//! no-op move onto the appointment's own slot is never rejected. A failed
//! validation carries the reason (occupied vs blocked) back to the caller.

use chrono::{DateTime, Utc};

use crate::booking::conflict::{check_window, BusyInterval, BusySource, SlotAvailability};
use crate::error::BookingError;

/// Validate a proposed move of `appointment_id` to `[new_start, new_end)`.
///
/// The interval belonging to the moved appointment is excluded from the
/// occupied set before checking.
pub fn validate_move(
    appointment_id: &str,
    new_start: DateTime<Utc>,
    new_end: DateTime<Utc>,
    busy: &[BusyInterval],
) -> Result<(), BookingError> {
    let others: Vec<BusyInterval> = busy
        .iter()
        .filter(|interval| match &interval.source {
            BusySource::Appointment {
                appointment_id: id,
            } => id != appointment_id,
            BusySource::Block { .. } => true,
        })
        .cloned()
        .collect();

    match check_window(new_start, new_end, &others) {
        SlotAvailability::Free => Ok(()),
        SlotAvailability::Occupied {
            appointment_id: other,
        } => Err(BookingError::SlotOccupied {
            appointment_id: other,
        }),
        SlotAvailability::Blocked { block_kind } => {
            Err(BookingError::SlotBlocked { kind: block_kind })
        }
    }
}
