//! Delivery time-slot model.
//!
//! The booking day is divided into a small fixed set of equal-width,
//! non-overlapping windows. Slots are the unit of conflict detection:
//! driver exclusivity and district capacity are both evaluated per
//! (date, slot) pair.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fixed two-hour delivery window.
///
/// The daily set is finite and non-overlapping; there is no "custom"
/// window. Ordering follows the clock.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TimeSlot {
    /// 09:00–11:00
    Morning,
    /// 11:00–13:00
    Midday,
    /// 13:00–15:00
    Afternoon,
    /// 15:00–17:00
    LateAfternoon,
}

impl TimeSlot {
    /// All slots in clock order.
    pub fn all() -> [TimeSlot; 4] {
        [
            TimeSlot::Morning,
            TimeSlot::Midday,
            TimeSlot::Afternoon,
            TimeSlot::LateAfternoon,
        ]
    }

    /// Window start time.
    pub fn start(self) -> NaiveTime {
        let (h, _) = self.hours();
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    /// Window end time (exclusive).
    pub fn end(self) -> NaiveTime {
        let (_, h) = self.hours();
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    /// Window width in minutes. Identical for every slot.
    pub fn duration_minutes(self) -> i64 {
        let (start, end) = self.hours();
        i64::from(end - start) * 60
    }

    fn hours(self) -> (u32, u32) {
        match self {
            TimeSlot::Morning => (9, 11),
            TimeSlot::Midday => (11, 13),
            TimeSlot::Afternoon => (13, 15),
            TimeSlot::LateAfternoon => (15, 17),
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start().format("%H:%M"),
            self.end().format("%H:%M")
        )
    }
}

/// Error returned when parsing an unknown slot label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTimeSlotError(pub String);

impl fmt::Display for ParseTimeSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown time slot: '{}'", self.0)
    }
}

impl std::error::Error for ParseTimeSlotError {}

impl FromStr for TimeSlot {
    type Err = ParseTimeSlotError;

    /// Parses the "HH:MM-HH:MM" label used on the wire and in the UI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSlot::all()
            .into_iter()
            .find(|slot| slot.to_string() == s)
            .ok_or_else(|| ParseTimeSlotError(s.to_string()))
    }
}
