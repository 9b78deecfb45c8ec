//! Candidate slot generation over a business day.
//!
//! Produces the fixed-cadence sequence of bookable windows between the
//! open and close boundaries of a day. Generation is deterministic and
//! side-effect free; the conflict detector decides which of the candidate
//! windows are actually free.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A fixed-length candidate window `[start, start + cadence)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Slot {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Duration in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// Parse an `HH:mm` time-of-day string.
pub fn parse_time_of_day(s: &str) -> Result<(u32, u32), ValidationError> {
    let invalid = || ValidationError::InvalidValue {
        field: "time_of_day".to_string(),
        message: format!("expected HH:mm, got '{s}'"),
    };

    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return Err(invalid());
    }

    let hour: u32 = parts[0].parse().map_err(|_| invalid())?;
    let minute: u32 = parts[1].parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok((hour, minute))
}

/// Resolve the open/close boundaries of a business day onto a date.
///
/// Hours that close at or before they open are rejected; a salon day does
/// not cross midnight.
pub fn day_bounds(
    date: NaiveDate,
    open: &str,
    close: &str,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ValidationError> {
    let (open_h, open_m) = parse_time_of_day(open)?;
    let (close_h, close_m) = parse_time_of_day(close)?;

    let start = date
        .and_hms_opt(open_h, open_m, 0)
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "open".to_string(),
            message: format!("invalid time of day '{open}'"),
        })?
        .and_utc();
    let end = date
        .and_hms_opt(close_h, close_m, 0)
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "close".to_string(),
            message: format!("invalid time of day '{close}'"),
        })?
        .and_utc();

    if end <= start {
        return Err(ValidationError::InvalidTimeRange { start, end });
    }
    Ok((start, end))
}

/// Generator for fixed-cadence candidate slots.
pub struct SlotGenerator {
    cadence_min: u32,
}

impl SlotGenerator {
    /// Create a generator with the given cadence in minutes.
    ///
    /// A non-positive cadence would degenerate to an infinite or empty
    /// sequence, so it is rejected.
    pub fn new(cadence_min: u32) -> Result<Self, ValidationError> {
        if cadence_min == 0 {
            return Err(ValidationError::InvalidValue {
                field: "cadence_min".to_string(),
                message: "slot cadence must be positive".to_string(),
            });
        }
        Ok(Self { cadence_min })
    }

    pub fn cadence_min(&self) -> u32 {
        self.cadence_min
    }

    /// Generate the ordered candidate windows covering `[day_start, day_end)`.
    ///
    /// A final partial window that would cross `day_end` is not emitted.
    pub fn generate(&self, day_start: DateTime<Utc>, day_end: DateTime<Utc>) -> Vec<Slot> {
        let cadence = chrono::Duration::minutes(i64::from(self.cadence_min));
        let mut slots = Vec::new();
        let mut cursor = day_start;

        while cursor + cadence <= day_end {
            slots.push(Slot::new(cursor, cursor + cadence));
            cursor += cadence;
        }
        slots
    }
}
