//! Analytics over the salon's local data.
//!
//! This module provides:
//! - Appointment status breakdowns and no-show rate
//! - Revenue and deposit aggregation per service
//! - Slot utilization for a professional's day
//! - Lead funnel conversion tracking
//!
//! Analyzers are pure over entity slices; callers load data through
//! [`crate::storage::SalonDb`] and feed it in.

mod appointments;
mod leads;
mod revenue;
mod utilization;

pub use appointments::{appointment_report, AppointmentReport};
pub use leads::{lead_funnel, LeadFunnelReport};
pub use revenue::{revenue_report, RevenueReport, ServiceRevenue};
pub use utilization::{utilization_report, UtilizationReport};
