//! Conflict detection between candidate windows and occupied intervals.
//!
//! All comparisons use half-open intervals `[start, end)`: an appointment
//! ending at 10:00 never conflicts with one starting at 10:00. Occupied
//! intervals come from two sources, and the distinction matters to
//! callers: a window taken by another appointment is reported as occupied,
//! one covered by a time block as blocked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::appointment::Appointment;
use crate::booking::slots::Slot;
use crate::timeblock::{BlockKind, TimeBlock};

/// Where a busy interval came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BusySource {
    /// A confirmed appointment
    Appointment { appointment_id: String },
    /// An owner-declared time block
    Block { block_kind: BlockKind },
}

/// An occupied interval on a professional's calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub source: BusySource,
}

impl BusyInterval {
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            start_time: appointment.start_time,
            end_time: appointment.end_time,
            source: BusySource::Appointment {
                appointment_id: appointment.id.clone(),
            },
        }
    }

    pub fn from_block(block: &TimeBlock) -> Self {
        Self {
            start_time: block.start_time,
            end_time: block.end_time,
            source: BusySource::Block {
                block_kind: block.kind,
            },
        }
    }
}

/// Half-open interval overlap: `[a0,a1)` and `[b0,b1)` overlap iff
/// `a0 < b1 && b0 < a1`.
pub fn intervals_overlap(
    a0: DateTime<Utc>,
    a1: DateTime<Utc>,
    b0: DateTime<Utc>,
    b1: DateTime<Utc>,
) -> bool {
    a0 < b1 && b0 < a1
}

/// Availability verdict for a candidate window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum SlotAvailability {
    /// No occupied interval overlaps the window
    Free,
    /// An appointment overlaps the window
    Occupied { appointment_id: String },
    /// A time block overlaps the window
    Blocked { block_kind: BlockKind },
}

impl SlotAvailability {
    pub fn is_free(&self) -> bool {
        matches!(self, SlotAvailability::Free)
    }
}

/// Check a candidate window against a set of occupied intervals.
///
/// When both an appointment and a block overlap the window, the
/// appointment decides the verdict; among several overlapping intervals
/// of the same source the earliest-starting one is reported.
pub fn check_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    busy: &[BusyInterval],
) -> SlotAvailability {
    let mut first_appointment: Option<&BusyInterval> = None;
    let mut first_block: Option<&BusyInterval> = None;

    for interval in busy {
        if !intervals_overlap(start, end, interval.start_time, interval.end_time) {
            continue;
        }
        match &interval.source {
            BusySource::Appointment { .. } => {
                if first_appointment.map_or(true, |cur| interval.start_time < cur.start_time) {
                    first_appointment = Some(interval);
                }
            }
            BusySource::Block { .. } => {
                if first_block.map_or(true, |cur| interval.start_time < cur.start_time) {
                    first_block = Some(interval);
                }
            }
        }
    }

    if let Some(interval) = first_appointment {
        if let BusySource::Appointment { appointment_id } = &interval.source {
            return SlotAvailability::Occupied {
                appointment_id: appointment_id.clone(),
            };
        }
    }
    if let Some(interval) = first_block {
        if let BusySource::Block { block_kind } = &interval.source {
            return SlotAvailability::Blocked {
                block_kind: *block_kind,
            };
        }
    }
    SlotAvailability::Free
}

/// Classify every candidate slot against the occupied set.
pub fn classify_slots(slots: &[Slot], busy: &[BusyInterval]) -> Vec<(Slot, SlotAvailability)> {
    slots
        .iter()
        .map(|slot| {
            (
                *slot,
                check_window(slot.start_time, slot.end_time, busy),
            )
        })
        .collect()
}

/// Keep only the free candidate slots.
pub fn free_slots(slots: &[Slot], busy: &[BusyInterval]) -> Vec<Slot> {
    slots
        .iter()
        .filter(|slot| check_window(slot.start_time, slot.end_time, busy).is_free())
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, hour, minute, 0).unwrap()
    }

    fn busy_appointment(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> BusyInterval {
        BusyInterval {
            start_time: start,
            end_time: end,
            source: BusySource::Appointment {
                appointment_id: id.to_string(),
            },
        }
    }

    fn busy_block(kind: BlockKind, start: DateTime<Utc>, end: DateTime<Utc>) -> BusyInterval {
        BusyInterval {
            start_time: start,
            end_time: end,
            source: BusySource::Block { block_kind: kind },
        }
    }

    #[test]
    fn adjacent_intervals_do_not_overlap() {
        // Appointment ending at 10:00 vs window starting at 10:00
        assert!(!intervals_overlap(at(10, 0), at(10, 30), at(9, 0), at(10, 0)));
        assert!(!intervals_overlap(at(9, 0), at(10, 0), at(10, 0), at(10, 30)));
    }

    #[test]
    fn containment_overlaps() {
        assert!(intervals_overlap(at(9, 0), at(12, 0), at(10, 0), at(10, 30)));
        assert!(intervals_overlap(at(10, 0), at(10, 30), at(9, 0), at(12, 0)));
    }

    #[test]
    fn free_window_reported_free() {
        let busy = vec![busy_appointment("a1", at(9, 0), at(10, 0))];
        assert_eq!(
            check_window(at(10, 0), at(10, 30), &busy),
            SlotAvailability::Free
        );
    }

    #[test]
    fn occupied_window_names_the_appointment() {
        let busy = vec![busy_appointment("a1", at(9, 0), at(10, 0))];
        assert_eq!(
            check_window(at(9, 30), at(10, 0), &busy),
            SlotAvailability::Occupied {
                appointment_id: "a1".to_string()
            }
        );
    }

    #[test]
    fn blocked_window_names_the_kind() {
        let busy = vec![busy_block(BlockKind::Vacation, at(0, 0), at(23, 59))];
        assert_eq!(
            check_window(at(9, 0), at(9, 30), &busy),
            SlotAvailability::Blocked {
                block_kind: BlockKind::Vacation
            }
        );
    }

    #[test]
    fn appointment_takes_precedence_over_block() {
        let busy = vec![
            busy_block(BlockKind::Break, at(9, 0), at(12, 0)),
            busy_appointment("a1", at(9, 30), at(10, 0)),
        ];
        assert_eq!(
            check_window(at(9, 30), at(10, 0), &busy),
            SlotAvailability::Occupied {
                appointment_id: "a1".to_string()
            }
        );
    }

    #[test]
    fn earliest_overlapping_appointment_reported() {
        let busy = vec![
            busy_appointment("later", at(10, 0), at(11, 0)),
            busy_appointment("earlier", at(9, 0), at(10, 30)),
        ];
        assert_eq!(
            check_window(at(9, 30), at(10, 30), &busy),
            SlotAvailability::Occupied {
                appointment_id: "earlier".to_string()
            }
        );
    }

    #[test]
    fn classify_full_day() {
        use crate::booking::slots::{day_bounds, SlotGenerator};

        let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let (start, end) = day_bounds(date, "08:00", "18:00").unwrap();
        let slots = SlotGenerator::new(30).unwrap().generate(start, end);

        let busy = vec![
            busy_appointment("a1", at(9, 0), at(10, 0)),
            busy_block(BlockKind::Break, at(12, 0), at(13, 0)),
        ];

        let classified = classify_slots(&slots, &busy);
        let free = classified.iter().filter(|(_, a)| a.is_free()).count();
        // 20 slots, 2 occupied (9:00, 9:30), 2 blocked (12:00, 12:30)
        assert_eq!(free, 16);
        assert_eq!(free_slots(&slots, &busy).len(), 16);
    }

    proptest! {
        /// overlap(a, b) == overlap(b, a)
        #[test]
        fn overlap_is_symmetric(a0 in 0_i64..10_000, alen in 1_i64..500,
                                b0 in 0_i64..10_000, blen in 1_i64..500) {
            let base = at(0, 0);
            let (a_start, a_end) = (base + Duration::minutes(a0), base + Duration::minutes(a0 + alen));
            let (b_start, b_end) = (base + Duration::minutes(b0), base + Duration::minutes(b0 + blen));

            prop_assert_eq!(
                intervals_overlap(a_start, a_end, b_start, b_end),
                intervals_overlap(b_start, b_end, a_start, a_end)
            );
        }

        /// overlap is false whenever a1 <= b0 or b1 <= a0
        #[test]
        fn disjoint_intervals_never_overlap(a0 in 0_i64..10_000, alen in 1_i64..500,
                                            gap in 0_i64..500, blen in 1_i64..500) {
            let base = at(0, 0);
            let a_start = base + Duration::minutes(a0);
            let a_end = a_start + Duration::minutes(alen);
            let b_start = a_end + Duration::minutes(gap);
            let b_end = b_start + Duration::minutes(blen);

            prop_assert!(!intervals_overlap(a_start, a_end, b_start, b_end));
            prop_assert!(!intervals_overlap(b_start, b_end, a_start, a_end));
        }

        /// every generated slot is exactly one cadence long
        #[test]
        fn generated_slots_match_cadence(cadence in 1_u32..120, span_min in 1_i64..1_440) {
            use crate::booking::slots::{Slot, SlotGenerator};

            let start = at(0, 0);
            let end = start + Duration::minutes(span_min);
            let slots: Vec<Slot> = SlotGenerator::new(cadence).unwrap().generate(start, end);

            for slot in &slots {
                prop_assert_eq!(slot.duration_minutes(), i64::from(cadence));
                prop_assert!(slot.end_time <= end);
            }
        }
    }
}
