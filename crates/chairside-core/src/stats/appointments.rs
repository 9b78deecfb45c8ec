//! Appointment status breakdowns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::appointment::{Appointment, AppointmentStatus};

/// Status breakdown over a set of appointments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentReport {
    pub total: u64,
    pub confirmed: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub no_show: u64,
    /// No-shows as a fraction of finished appointments (0.0 to 1.0).
    pub no_show_rate: f64,
    /// Appointments starting on the reference date.
    pub today_total: u64,
    pub today_confirmed: u64,
}

/// Summarize appointments, with `today` as the reference date for the
/// today_* counters.
pub fn appointment_report(appointments: &[Appointment], today: NaiveDate) -> AppointmentReport {
    let mut report = AppointmentReport::default();

    for appointment in appointments {
        report.total += 1;
        match appointment.status {
            AppointmentStatus::Confirmed => report.confirmed += 1,
            AppointmentStatus::Completed => report.completed += 1,
            AppointmentStatus::Cancelled => report.cancelled += 1,
            AppointmentStatus::NoShow => report.no_show += 1,
        }

        if appointment.start_time.date_naive() == today {
            report.today_total += 1;
            if appointment.status == AppointmentStatus::Confirmed {
                report.today_confirmed += 1;
            }
        }
    }

    let finished = report.completed + report.no_show;
    if finished > 0 {
        report.no_show_rate = report.no_show as f64 / finished as f64;
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn appointment_at(day: u32, hour: u32, status: AppointmentStatus) -> Appointment {
        let start = Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap();
        let mut appt =
            Appointment::new("pro-1", "svc-1", "client-1", start, start + Duration::minutes(30));
        if status != AppointmentStatus::Confirmed {
            appt.transition_to(status).unwrap();
        }
        appt
    }

    #[test]
    fn empty_report() {
        let report = appointment_report(&[], NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(report.total, 0);
        assert_eq!(report.no_show_rate, 0.0);
    }

    #[test]
    fn status_counts() {
        let appointments = vec![
            appointment_at(3, 9, AppointmentStatus::Completed),
            appointment_at(3, 10, AppointmentStatus::Completed),
            appointment_at(3, 11, AppointmentStatus::NoShow),
            appointment_at(4, 9, AppointmentStatus::Cancelled),
            appointment_at(4, 10, AppointmentStatus::Confirmed),
        ];

        let report =
            appointment_report(&appointments, NaiveDate::from_ymd_opt(2024, 6, 4).unwrap());
        assert_eq!(report.total, 5);
        assert_eq!(report.completed, 2);
        assert_eq!(report.no_show, 1);
        assert_eq!(report.cancelled, 1);
        assert_eq!(report.confirmed, 1);
        // 1 no-show out of 3 finished
        assert!((report.no_show_rate - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.today_total, 2);
        assert_eq!(report.today_confirmed, 1);
    }
}
