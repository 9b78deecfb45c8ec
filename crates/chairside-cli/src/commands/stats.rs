//! Business analytics commands.

use clap::Subcommand;

use chairside_core::booking::BookingEngine;
use chairside_core::stats::{appointment_report, lead_funnel, revenue_report, utilization_report};
use chairside_core::{Config, SalonDb};
use chrono::Utc;

use super::parse_date;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Appointment status breakdown
    Appointments,
    /// Revenue and deposits per service
    Revenue,
    /// Slot utilization for a professional's day
    Utilization {
        /// Professional ID
        professional_id: String,
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Lead funnel conversion
    Leads,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = SalonDb::open()?;

    match action {
        StatsAction::Appointments => {
            let appointments = db.list_appointments()?;
            let report = appointment_report(&appointments, Utc::now().date_naive());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        StatsAction::Revenue => {
            let appointments = db.list_appointments()?;
            let services = db.list_services()?;
            let report = revenue_report(&appointments, &services);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        StatsAction::Utilization {
            professional_id,
            date,
        } => {
            let config = Config::load_or_default();
            let engine = BookingEngine::from_config(&config)?;
            let date = parse_date(&date)?;

            let statuses = engine.availability(&db, &professional_id, date)?;
            let report = utilization_report(date, &statuses);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        StatsAction::Leads => {
            let leads = db.list_leads()?;
            let report = lead_funnel(&leads);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
