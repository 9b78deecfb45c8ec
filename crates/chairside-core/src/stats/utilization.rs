//! Slot utilization for a professional's day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::booking::{SlotAvailability, SlotStatus};

/// Booked-vs-free breakdown of one day's candidate slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationReport {
    pub date: NaiveDate,
    pub total_slots: u64,
    pub free_slots: u64,
    pub occupied_slots: u64,
    pub blocked_slots: u64,
    pub booked_minutes: i64,
    pub available_minutes: i64,
    /// Occupied slots as a fraction of bookable (non-blocked) slots.
    pub utilization_rate: f64,
}

/// Compute utilization from a day's classified slots.
pub fn utilization_report(date: NaiveDate, statuses: &[SlotStatus]) -> UtilizationReport {
    let mut report = UtilizationReport {
        date,
        total_slots: 0,
        free_slots: 0,
        occupied_slots: 0,
        blocked_slots: 0,
        booked_minutes: 0,
        available_minutes: 0,
        utilization_rate: 0.0,
    };

    for status in statuses {
        report.total_slots += 1;
        let minutes = status.slot.duration_minutes();
        match &status.availability {
            SlotAvailability::Free => {
                report.free_slots += 1;
                report.available_minutes += minutes;
            }
            SlotAvailability::Occupied { .. } => {
                report.occupied_slots += 1;
                report.booked_minutes += minutes;
            }
            SlotAvailability::Blocked { .. } => {
                report.blocked_slots += 1;
            }
        }
    }

    let bookable = report.free_slots + report.occupied_slots;
    if bookable > 0 {
        report.utilization_rate = report.occupied_slots as f64 / bookable as f64;
    }
    report
}
