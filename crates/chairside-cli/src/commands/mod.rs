pub mod appointment;
pub mod availability;
pub mod block;
pub mod client;
pub mod config;
pub mod lead;
pub mod portfolio;
pub mod service;
pub mod stats;

use chairside_core::booking::parse_time_of_day;
use chrono::{DateTime, NaiveDate, Utc};

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(s: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("expected YYYY-MM-DD, got '{s}'"))?)
}

/// Combine `YYYY-MM-DD` and `HH:mm` arguments into a UTC instant.
pub fn parse_instant(date: &str, time: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    let date = parse_date(date)?;
    let (hour, minute) = parse_time_of_day(time)?;
    Ok(date
        .and_hms_opt(hour, minute, 0)
        .ok_or_else(|| format!("invalid time of day '{time}'"))?
        .and_utc())
}
