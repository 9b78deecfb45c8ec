//! Availability view commands.

use clap::Subcommand;
use serde::Serialize;

use chairside_core::booking::BookingEngine;
use chairside_core::{Config, SalonDb, SlotAvailability};
use chrono::Duration;

use super::parse_date;

#[derive(Subcommand)]
pub enum AvailabilityAction {
    /// Classified slots for one day
    Day {
        /// Professional ID
        professional_id: String,
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Booked/free slot counts for seven days
    Week {
        /// Professional ID
        professional_id: String,
        /// First date (YYYY-MM-DD)
        date: String,
    },
    /// Appointments and blocks for one day, ordered by start
    Schedule {
        /// Professional ID
        professional_id: String,
        /// Date (YYYY-MM-DD)
        date: String,
    },
}

#[derive(Serialize)]
struct DaySummary {
    date: chrono::NaiveDate,
    working_day: bool,
    total: usize,
    free: usize,
    occupied: usize,
    blocked: usize,
}

pub fn run(action: AvailabilityAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = SalonDb::open()?;
    let config = Config::load_or_default();
    let engine = BookingEngine::from_config(&config)?;

    match action {
        AvailabilityAction::Day {
            professional_id,
            date,
        } => {
            let date = parse_date(&date)?;
            let statuses = engine.availability(&db, &professional_id, date)?;
            println!("{}", serde_json::to_string_pretty(&statuses)?);
        }
        AvailabilityAction::Week {
            professional_id,
            date,
        } => {
            let first = parse_date(&date)?;
            let mut summaries = Vec::new();

            for offset in 0..7 {
                let day = first + Duration::days(offset);
                let statuses = engine.availability(&db, &professional_id, day)?;
                let mut summary = DaySummary {
                    date: day,
                    working_day: engine.is_working_day(day),
                    total: statuses.len(),
                    free: 0,
                    occupied: 0,
                    blocked: 0,
                };
                for status in &statuses {
                    match status.availability {
                        SlotAvailability::Free => summary.free += 1,
                        SlotAvailability::Occupied { .. } => summary.occupied += 1,
                        SlotAvailability::Blocked { .. } => summary.blocked += 1,
                    }
                }
                summaries.push(summary);
            }

            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        AvailabilityAction::Schedule {
            professional_id,
            date,
        } => {
            let date = parse_date(&date)?;
            let (day_start, day_end) = engine.day_bounds(date)?;

            let appointments = db.appointments_between(&professional_id, day_start, day_end)?;
            let blocks = db.time_blocks_between(&professional_id, day_start, day_end)?;

            let schedule = serde_json::json!({
                "date": date,
                "appointments": appointments,
                "blocks": blocks,
            });
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }
    }
    Ok(())
}
