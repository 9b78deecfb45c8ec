//! Owner-declared blackout intervals.
//!
//! A time block marks a stretch of a professional's calendar as
//! unbookable: vacation days, breaks between appointments, or ad-hoc
//! unavailability. The conflict detector treats blocks exactly like
//! appointments when deciding whether a candidate window is free.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Kind of blackout interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Multi-day or full-day leave
    Vacation,
    /// Short rest between appointments
    Break,
    /// Any other owner-declared unavailability
    Unavailable,
}

impl Default for BlockKind {
    fn default() -> Self {
        BlockKind::Unavailable
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Vacation => write!(f, "vacation"),
            BlockKind::Break => write!(f, "break"),
            BlockKind::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// A blackout window on a professional's calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: String,
    pub professional_id: String,
    pub kind: BlockKind,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TimeBlock {
    /// Create a new time block.
    ///
    /// Returns an error if the interval is empty or inverted.
    pub fn new(
        professional_id: impl Into<String>,
        kind: BlockKind,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        label: Option<String>,
    ) -> Result<Self, ValidationError> {
        if end_time <= start_time {
            return Err(ValidationError::InvalidTimeRange {
                start: start_time,
                end: end_time,
            });
        }

        Ok(TimeBlock {
            id: uuid::Uuid::new_v4().to_string(),
            professional_id: professional_id.into(),
            kind,
            start_time,
            end_time,
            label,
            created_at: Utc::now(),
        })
    }

    /// Duration of the block in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}
