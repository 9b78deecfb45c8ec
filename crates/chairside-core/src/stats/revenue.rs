//! Revenue and deposit aggregation.
//!
//! Amounts stay in currency minor units throughout; display conversion
//! is the caller's concern via [`crate::payments::from_minor_units`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::appointment::{Appointment, AppointmentStatus};
use crate::catalog::Service;

/// Revenue attributed to one service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRevenue {
    pub service_id: String,
    pub service_name: String,
    pub completed_count: u64,
    pub revenue_minor: i64,
}

/// Revenue aggregation over a set of appointments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevenueReport {
    /// Price of every completed appointment's service, summed.
    pub completed_revenue_minor: i64,
    /// Deposits recorded on non-cancelled appointments.
    pub deposits_collected_minor: i64,
    /// Per-service breakdown, sorted by revenue descending.
    pub by_service: Vec<ServiceRevenue>,
}

/// Aggregate revenue from appointments against the service catalog.
///
/// Appointments referencing a service missing from `services` contribute
/// nothing to revenue; deposits are summed from the appointment rows
/// themselves.
pub fn revenue_report(appointments: &[Appointment], services: &[Service]) -> RevenueReport {
    let by_id: HashMap<&str, &Service> =
        services.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut report = RevenueReport::default();
    let mut per_service: HashMap<&str, ServiceRevenue> = HashMap::new();

    for appointment in appointments {
        if appointment.status != AppointmentStatus::Cancelled {
            report.deposits_collected_minor += appointment.deposit_minor.unwrap_or(0);
        }
        if appointment.status != AppointmentStatus::Completed {
            continue;
        }

        let Some(service) = by_id.get(appointment.service_id.as_str()) else {
            continue;
        };

        report.completed_revenue_minor += service.price_minor;
        let entry = per_service
            .entry(service.id.as_str())
            .or_insert_with(|| ServiceRevenue {
                service_id: service.id.clone(),
                service_name: service.name.clone(),
                completed_count: 0,
                revenue_minor: 0,
            });
        entry.completed_count += 1;
        entry.revenue_minor += service.price_minor;
    }

    let mut by_service: Vec<ServiceRevenue> = per_service.into_values().collect();
    by_service.sort_by(|a, b| b.revenue_minor.cmp(&a.revenue_minor));
    report.by_service = by_service;
    report
}
