//! Weekly time grid and day-pairing policy.
//!
//! The grid is a sequence of 30-minute slot start times per operating day.
//! The default grid runs 07:00 to 21:00 (28 slot starts, 07:00 … 20:30)
//! over Monday to Saturday.
//!
//! # Time Model
//! Times of day are minutes since midnight. A session end time must itself
//! be a slot start in the grid, so the latest possible end is the last slot
//! (20:30 on the default grid).
//!
//! # Day Pairing
//! Two-session patterns use one of three fixed day pairs:
//! (Mon, Thu), (Tue, Fri), (Wed, Sat). A run-scoped rotation counter picks
//! which pair is tried first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SchedulerError;

/// Slot granularity (minutes).
pub const SLOT_MINUTES: u16 = 30;

/// Operating day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
}

impl Day {
    /// The six operating days, Monday first.
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Full English name.
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Day::ALL
            .iter()
            .copied()
            .find(|d| {
                let name = d.name().to_ascii_lowercase();
                lower == name || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| SchedulerError::UnknownDay(s.to_string()))
    }
}

/// The fixed day pairs for two-session patterns, in base order.
pub const DAY_PAIRS: [(Day, Day); 3] = [
    (Day::Monday, Day::Thursday),
    (Day::Tuesday, Day::Friday),
    (Day::Wednesday, Day::Saturday),
];

/// Day pairs rotated so that pair `rotation % 3` comes first.
///
/// All three pairs are always returned; rotation only changes order.
pub fn rotated_day_pairs(rotation: usize) -> [(Day, Day); 3] {
    let mut pairs = DAY_PAIRS;
    pairs.rotate_left(rotation % DAY_PAIRS.len());
    pairs
}

/// A time of day with minute resolution.
///
/// Serializes as an `HH:MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Creates a time of day. Returns `None` past 23:59.
    pub fn new(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour * 60 + minute))
        } else {
            None
        }
    }

    /// Creates a time of day from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < 24 * 60).then_some(Self(minutes))
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Hour component.
    #[inline]
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Minute component.
    #[inline]
    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Adds minutes, returning `None` past midnight.
    pub fn checked_add_minutes(self, minutes: u16) -> Option<Self> {
        self.0.checked_add(minutes).and_then(Self::from_minutes)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SchedulerError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u16 = h.parse().map_err(|_| invalid())?;
        let minute: u16 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The bookable weekly grid.
///
/// Slot starts are `day_start`, `day_start + 30`, … strictly before
/// `day_end`. `day_end` itself is not a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeGrid {
    /// First slot start.
    pub day_start: TimeOfDay,
    /// Exclusive bound on slot starts.
    pub day_end: TimeOfDay,
    /// Operating days in week order.
    pub days: Vec<Day>,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            day_start: TimeOfDay(7 * 60),
            day_end: TimeOfDay(21 * 60),
            days: Day::ALL.to_vec(),
        }
    }
}

impl TimeGrid {
    /// Creates a grid over the given window and days.
    pub fn new(day_start: TimeOfDay, day_end: TimeOfDay, days: Vec<Day>) -> Self {
        Self {
            day_start,
            day_end,
            days,
        }
    }

    /// Slot start times in ascending order.
    pub fn slots(&self) -> impl Iterator<Item = TimeOfDay> + '_ {
        (self.day_start.minutes()..self.day_end.minutes())
            .step_by(SLOT_MINUTES as usize)
            .map(TimeOfDay)
    }

    /// Number of slots per day.
    pub fn slot_count(&self) -> usize {
        self.slots().count()
    }

    /// Whether `time` is one of the grid's slot starts.
    pub fn contains(&self, time: TimeOfDay) -> bool {
        time >= self.day_start
            && time < self.day_end
            && (time.minutes() - self.day_start.minutes()) % SLOT_MINUTES == 0
    }

    /// Whether `day` is an operating day.
    pub fn is_operating_day(&self, day: Day) -> bool {
        self.days.contains(&day)
    }

    /// Adds `minutes` to `start`.
    ///
    /// Returns `None` ("no valid slot") unless the result is a slot start.
    pub fn add_minutes(&self, start: TimeOfDay, minutes: u16) -> Option<TimeOfDay> {
        start
            .checked_add_minutes(minutes)
            .filter(|end| self.contains(*end))
    }

    /// Day pairs in rotation order, restricted to operating days.
    pub fn day_pairs(&self, rotation: usize) -> Vec<(Day, Day)> {
        rotated_day_pairs(rotation)
            .into_iter()
            .filter(|(a, b)| self.is_operating_day(*a) && self.is_operating_day(*b))
            .collect()
    }

    /// Bookable minutes per day (slot count × slot length).
    pub fn minutes_per_day(&self) -> u32 {
        self.slot_count() as u32 * SLOT_MINUTES as u32
    }
}
